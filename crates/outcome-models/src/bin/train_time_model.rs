//! Fit the time-management score regression and report its test error.
//!
//! Usage: cargo run --bin train-time-model -- [--username <name>]

use anyhow::Context;
use clap::Parser;
use insights::{logging, InsightsConfig};
use outcome_models::time_model;

#[derive(Parser, Debug)]
#[command(about = "Predict game score from time usage and rating")]
struct Args {
    /// chess.com username (defaults to CHESS_USERNAME)
    #[arg(long, short)]
    username: Option<String>,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init_tracing();

    let args = Args::parse();
    let config = InsightsConfig::from_env(args.username)?;
    let summary = time_model::run(&config).context("training time model")?;

    println!("Intercept: {:.6}", summary.model.intercept);
    for (name, coef) in summary.columns.iter().zip(&summary.model.coefficients) {
        println!("  {name}: {coef:.6}");
    }
    Ok(())
}
