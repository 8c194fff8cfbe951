//! Game outcome classifier: random forest over ratings, time class and opening.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use chess_core::GameRecord;
use insights::chart::{self, Heatmap};
use insights::{store, InsightsConfig};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ModelError;
use crate::features::{outcome_class, FeatureRow, OneHotEncoder, CLASS_LABELS};
use crate::forest::{ForestParams, RandomForest};
use crate::metrics::{self, ClassMetrics};
use crate::split::{train_test_split, TRAIN_RATIO};

pub const NUMERIC_FEATURES: [&str; 3] = ["White Rating", "Black Rating", "Rating Differential"];
pub const CATEGORICAL_FEATURES: [&str; 2] = ["Time Class", "Main Opening"];
pub const MODEL_FILE: &str = "game_outcome_predictor.bin";

/// Everything needed to score a new game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeModel {
    pub encoder: OneHotEncoder,
    pub forest: RandomForest,
}

/// A fitted model with its held-out labels and predictions.
#[derive(Debug, Clone)]
pub struct Trained {
    pub model: OutcomeModel,
    pub train_rows: usize,
    pub y_test: Vec<usize>,
    pub y_pred: Vec<usize>,
}

#[derive(Debug, Clone)]
pub struct OutcomeSummary {
    pub train_rows: usize,
    pub test_rows: usize,
    pub accuracy: f64,
    pub report: Vec<ClassMetrics>,
    pub confusion: Vec<Vec<usize>>,
    pub model_path: PathBuf,
    pub figure_path: PathBuf,
}

/// Feature row and class for every game with both ratings and a decided result.
pub fn outcome_examples(records: &[GameRecord]) -> Vec<(FeatureRow, usize)> {
    records
        .iter()
        .filter_map(|r| {
            let white = r.white_rating? as f64;
            let black = r.black_rating? as f64;
            let class = outcome_class(r.result)?;
            let row = FeatureRow {
                numeric: vec![white, black, black - white],
                categorical: vec![r.time_class.as_str().to_string(), r.main_opening.clone()],
            };
            Some((row, class))
        })
        .collect()
}

pub fn save_model(model: &OutcomeModel, path: &Path) -> Result<(), ModelError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ModelError::Io { path: parent.to_path_buf(), source })?;
    }
    let file = File::create(path).map_err(|source| ModelError::Io { path: path.to_path_buf(), source })?;
    bincode::serialize_into(BufWriter::new(file), model)?;
    Ok(())
}

pub fn load_model(path: &Path) -> Result<OutcomeModel, ModelError> {
    let file = File::open(path).map_err(|source| ModelError::Io { path: path.to_path_buf(), source })?;
    Ok(bincode::deserialize_from(BufReader::new(file))?)
}

/// Seeded 80/20 split, one-hot encoding fitted on the training side, then
/// the forest.
pub fn train(records: &[GameRecord], params: ForestParams) -> Result<Trained, ModelError> {
    let examples = outcome_examples(records);
    let seed = params.seed;
    let (train, test) = train_test_split(examples, TRAIN_RATIO, seed);
    if train.is_empty() || test.is_empty() {
        return Err(ModelError::InsufficientData(format!(
            "{} training and {} test games",
            train.len(),
            test.len()
        )));
    }

    let (train_rows, y_train): (Vec<FeatureRow>, Vec<usize>) = train.into_iter().unzip();
    let (test_rows, y_test): (Vec<FeatureRow>, Vec<usize>) = test.into_iter().unzip();

    let encoder = OneHotEncoder::fit(&NUMERIC_FEATURES, &CATEGORICAL_FEATURES, &train_rows)?;
    let x_train = encoder.transform_all(&train_rows)?;
    let x_test = encoder.transform_all(&test_rows)?;
    info!(columns = encoder.width(), train = x_train.len(), test = x_test.len(), "Features prepared");

    info!(trees = params.n_estimators, "Training random forest");
    let forest = RandomForest::fit(&x_train, &y_train, CLASS_LABELS.len(), params)?;
    let y_pred = forest.predict_all(&x_test)?;

    Ok(Trained {
        model: OutcomeModel { encoder, forest },
        train_rows: x_train.len(),
        y_test,
        y_pred,
    })
}

pub fn run(config: &InsightsConfig, params: ForestParams) -> Result<OutcomeSummary, ModelError> {
    let records = store::load_nonempty_records(&config.processed_json_path())?;
    info!(games = records.len(), "Loaded processed games");

    let Trained { model, train_rows, y_test, y_pred } = train(&records, params)?;

    let accuracy = metrics::accuracy(&y_test, &y_pred);
    let report = metrics::classification_report(&y_test, &y_pred, &CLASS_LABELS);
    let confusion = metrics::confusion_matrix(&y_test, &y_pred, CLASS_LABELS.len());
    println!("Accuracy: {accuracy:.4}");
    println!("Classification Report:\n{}", metrics::format_classification_report(&report));

    let figure_path = config
        .figures_dir()
        .join(format!("{}_confusion_matrix.svg", config.username));
    let heatmap = Heatmap {
        title: "Confusion Matrix".into(),
        x_label: "Predicted".into(),
        y_label: "Actual".into(),
        labels: CLASS_LABELS.iter().map(|l| l.to_string()).collect(),
        cells: confusion.clone(),
    };
    chart::save_svg(&figure_path, &chart::render_heatmap(&heatmap))?;

    let model_path = config.models_dir.join(MODEL_FILE);
    save_model(&model, &model_path)?;
    info!(path = %model_path.display(), "Model saved");

    Ok(OutcomeSummary {
        train_rows,
        test_rows: y_test.len(),
        accuracy,
        report,
        confusion,
        model_path,
        figure_path,
    })
}
