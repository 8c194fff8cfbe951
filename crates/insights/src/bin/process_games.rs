//! Flatten raw chess.com games into the processed games table.
//!
//! Usage: cargo run --bin process-games -- [--username <name>]

use clap::Parser;
use chess_core::OpeningCatalog;
use insights::error::InsightsError;
use insights::{logging, process, store, InsightsConfig};
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "Process raw games into per-game records")]
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

    let raw = store::load_raw_games(&config.raw_games_path())?;
    info!(count = raw.len(), "Loaded raw games");

    let openings_path = config.openings_path();
    let mut catalog =
        OpeningCatalog::load(&openings_path).map_err(|e| InsightsError::io(&openings_path, e))?;
    info!(known = catalog.known().len(), "Loaded opening list");

    let records = process::process_games(&raw, &config.username, &mut catalog);

    store::save_records_json(&config.processed_json_path(), &records)?;
    store::save_records_csv(&config.processed_csv_path(), &records)?;

    let added = catalog
        .append_learned(&openings_path)
        .map_err(|e| InsightsError::io(&openings_path, e))?;
    info!(added, path = %openings_path.display(), "Opening list updated");

    println!("Processed data saved for {} games.", records.len());
    Ok(())
}
