//! Download every game in a player's chess.com archives.
//!
//! Usage: cargo run --bin fetch-games -- [--username <name>]
//!
//! Writes data/raw/<username>_raw_games.json. An empty fetch leaves an existing
//! file untouched.

use anyhow::Context;
use clap::Parser;
use insights::clients::chess_com::ChessComClient;
use insights::{fetch, logging, store, InsightsConfig};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(about = "Fetch all chess.com games for a player")]
struct Args {
    /// chess.com username (defaults to CHESS_USERNAME)
    #[arg(long, short)]
    username: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init_tracing();

    let args = Args::parse();
    let config = InsightsConfig::from_env(args.username)?;
    let client = ChessComClient::from_config(&config)?;

    info!(username = %config.username, "Fetching games");
    let games = fetch::fetch_all_games(&client, &config.username)
        .await
        .context("fetching games from chess.com")?;

    let path = config.raw_games_path();
    if store::save_raw_games(&path, &games)? {
        info!(count = games.len(), path = %path.display(), "Raw games saved");
    } else {
        warn!("No games fetched; nothing written");
    }
    Ok(())
}
