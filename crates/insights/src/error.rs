//! Pipeline error types

use std::path::PathBuf;

use thiserror::Error;

use crate::clients::chess_com::ChessComError;

#[derive(Error, Debug)]
pub enum InsightsError {
    #[error("Configuration error: {0}")]
    Config(&'static str),

    #[error("Invalid value for {key}: {value}")]
    InvalidSetting { key: &'static str, value: String },

    #[error("chess.com error: {0}")]
    ChessCom(#[from] ChessComError),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("No games to analyze in {0}")]
    EmptyDataset(PathBuf),
}

impl InsightsError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        InsightsError::Io {
            path: path.into(),
            source,
        }
    }
}
