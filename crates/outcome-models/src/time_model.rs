//! Score regression from time usage: linear model over time class, the
//! player's average time per move and rating.

use chess_core::GameRecord;
use insights::stats::time_management::per_game_times;
use insights::{store, InsightsConfig};
use tracing::info;

use crate::error::ModelError;
use crate::features::{outcome_score, FeatureRow, OneHotEncoder};
use crate::linear::LinearRegression;
use crate::metrics;
use crate::split::{train_test_split, SEED, TRAIN_RATIO};

pub const NUMERIC_FEATURES: [&str; 2] = ["Average Time Per Move", "Player Rating"];
pub const CATEGORICAL_FEATURES: [&str; 1] = ["Time Class"];

#[derive(Debug, Clone)]
pub struct TimeModelSummary {
    pub train_rows: usize,
    pub test_rows: usize,
    pub mse: f64,
    pub model: LinearRegression,
    pub columns: Vec<String>,
}

/// One example per non-daily game with clock data, the player's rating and
/// a decided result.
pub fn time_examples(records: &[GameRecord], username: &str) -> Vec<(FeatureRow, f64)> {
    per_game_times(records, username)
        .filter_map(|(r, avg)| {
            let rating = r.player_rating(username)? as f64;
            let score = outcome_score(r.result)?;
            let row = FeatureRow {
                numeric: vec![avg, rating],
                categorical: vec![r.time_class.as_str().to_string()],
            };
            Some((row, score))
        })
        .collect()
}

pub fn train(records: &[GameRecord], username: &str, seed: u64) -> Result<TimeModelSummary, ModelError> {
    let (train, test) = train_test_split(time_examples(records, username), TRAIN_RATIO, seed);
    if train.is_empty() || test.is_empty() {
        return Err(ModelError::InsufficientData(format!(
            "{} training and {} test games with clock data",
            train.len(),
            test.len()
        )));
    }

    let (train_rows, y_train): (Vec<FeatureRow>, Vec<f64>) = train.into_iter().unzip();
    let (test_rows, y_test): (Vec<FeatureRow>, Vec<f64>) = test.into_iter().unzip();

    let encoder = OneHotEncoder::fit(&NUMERIC_FEATURES, &CATEGORICAL_FEATURES, &train_rows)?;
    let x_train = encoder.transform_all(&train_rows)?;
    let x_test = encoder.transform_all(&test_rows)?;

    let model = LinearRegression::fit(&x_train, &y_train)?;
    let mse = metrics::mean_squared_error(&y_test, &model.predict_all(&x_test)?);

    Ok(TimeModelSummary {
        train_rows: x_train.len(),
        test_rows: x_test.len(),
        mse,
        model,
        columns: encoder.column_names(),
    })
}

pub fn run(config: &InsightsConfig) -> Result<TimeModelSummary, ModelError> {
    let records = store::load_nonempty_records(&config.processed_json_path())?;
    info!(games = records.len(), "Loaded processed games");

    let summary = train(&records, &config.username, SEED)?;
    info!(train = summary.train_rows, test = summary.test_rows, "Linear model trained");
    println!("Mean Squared Error: {:.4}", summary.mse);
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{Outcome, TimeClass};
    use std::collections::BTreeMap;

    const ME: &str = "me";

    /// `ME` as white; white spends `per_move` seconds on each of three moves.
    fn record(time_class: TimeClass, per_move: u32, rating: i32, result: Outcome) -> GameRecord {
        let clock = |left: u32| format!("{}:{:02}", left / 60, left % 60);
        let moves = format!(
            "1. e4 {{[%clk {}]}} 1... e5 {{[%clk 3:00]}} 2. Nf3 {{[%clk {}]}} 2... Nc6 {{[%clk 2:59]}} 3. Bc4 {{[%clk {}]}} 3... Bc5 {{[%clk 2:58]}} 1-0",
            clock(180),
            clock(180 - per_move),
            clock(180 - 2 * per_move),
        );
        GameRecord {
            url: String::new(),
            time_class,
            end_time: Default::default(),
            white_player: ME.into(),
            white_rating: Some(rating),
            black_player: "them".into(),
            black_rating: Some(1500),
            result,
            main_opening: "Italian game".into(),
            variation: String::new(),
            information: BTreeMap::new(),
            moves,
        }
    }

    #[test]
    fn test_examples_use_clock_rating_and_score() {
        let records = vec![
            record(TimeClass::Blitz, 4, 1510, Outcome::Draw),
            record(TimeClass::Daily, 4, 1510, Outcome::Win),
            record(TimeClass::Blitz, 4, 1510, Outcome::Unknown),
        ];
        let examples = time_examples(&records, ME);
        assert_eq!(examples.len(), 1);
        let (row, score) = &examples[0];
        assert_eq!(row.numeric, vec![4.0, 1510.0]);
        assert_eq!(row.categorical, vec!["Blitz".to_string()]);
        assert_eq!(*score, 0.5);
    }

    #[test]
    fn test_train_reports_mse() {
        let records: Vec<GameRecord> = (0..30)
            .map(|i| {
                let tc = if i % 2 == 0 { TimeClass::Blitz } else { TimeClass::Rapid };
                let result = if i % 3 == 0 { Outcome::Loss } else { Outcome::Win };
                record(tc, 2 + (i % 5) as u32, 1400 + i * 7, result)
            })
            .collect();
        let summary = train(&records, ME, SEED).unwrap();
        assert_eq!(summary.train_rows, 24);
        assert_eq!(summary.test_rows, 6);
        assert!(summary.mse.is_finite() && summary.mse >= 0.0);
        assert_eq!(
            summary.columns,
            vec!["Average Time Per Move", "Player Rating", "Time Class_Blitz", "Time Class_Rapid"]
        );
    }
}
