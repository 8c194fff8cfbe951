//! Train the game outcome classifier on the processed games table.
//!
//! Usage: cargo run --release --bin train-outcome-model -- [--username <name>] [--trees 300]

use anyhow::Context;
use clap::Parser;
use insights::{logging, InsightsConfig};
use outcome_models::forest::ForestParams;
use outcome_models::outcome;
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "Train a random forest to predict game outcomes")]
struct Args {
    /// chess.com username (defaults to CHESS_USERNAME)
    #[arg(long, short)]
    username: Option<String>,

    #[arg(long, default_value_t = 300)]
    trees: usize,

    #[arg(long, default_value_t = 10)]
    max_depth: usize,

    #[arg(long, default_value_t = 5)]
    min_samples_split: usize,

    /// Loss, Draw and Win weights, e.g. `1,0.3,1`
    #[arg(long, value_delimiter = ',', default_values_t = [1.0, 1.0, 1.0])]
    class_weights: Vec<f64>,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init_tracing();

    let args = Args::parse();
    let config = InsightsConfig::from_env(args.username)?;
    let params = ForestParams {
        n_estimators: args.trees,
        max_depth: args.max_depth,
        min_samples_split: args.min_samples_split,
        class_weights: args.class_weights,
        seed: args.seed,
    };

    let summary = outcome::run(&config, params).context("training outcome model")?;
    info!(
        accuracy = summary.accuracy,
        model = %summary.model_path.display(),
        figure = %summary.figure_path.display(),
        "Outcome model done"
    );
    Ok(())
}
