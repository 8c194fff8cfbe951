use std::path::PathBuf;

use insights::InsightsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Not enough usable games: {0}")]
    InsufficientData(String),

    #[error("Feature row has {actual} columns, model expects {expected}")]
    FeatureMismatch { expected: usize, actual: usize },

    #[error("{rows} feature rows but {labels} labels")]
    LabelCount { rows: usize, labels: usize },

    #[error("Label {label} out of range for {classes} classes")]
    InvalidLabel { label: usize, classes: usize },

    #[error("Least-squares system is singular")]
    Singular,

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Model serialization error: {0}")]
    Serialize(#[from] bincode::Error),

    #[error(transparent)]
    Insights(#[from] InsightsError),
}
