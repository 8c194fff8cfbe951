//! Download a player's complete game history, archive by archive.

use serde_json::Value;
use tracing::{info, warn};

use crate::clients::chess_com::{ChessComClient, ChessComError};

/// Fetch every game in every monthly archive for `username`, in archive order.
///
/// A failed archive listing yields no games, and a failed archive is skipped;
/// both are logged. Transport failures on the archive listing propagate.
pub async fn fetch_all_games(
    client: &ChessComClient,
    username: &str,
) -> Result<Vec<Value>, ChessComError> {
    let archives = match client.fetch_archives(username).await {
        Ok(a) => a,
        Err(e @ ChessComError::Status { .. }) => {
            warn!("Error fetching archives: {e}");
            Vec::new()
        }
        Err(e) => return Err(e),
    };

    if archives.is_empty() {
        warn!(
            %username,
            "No archives fetched. Check the username and that the chess.com API is reachable."
        );
        return Ok(Vec::new());
    }
    info!(count = archives.len(), "Archives fetched");

    let mut all_games = Vec::new();
    for archive_url in &archives {
        match client.fetch_archive(archive_url).await {
            Ok(games) => {
                info!(archive = %archive_url, games = games.len(), "Fetched archive");
                all_games.extend(games);
            }
            Err(e) => warn!(archive = %archive_url, "Skipping archive: {e}"),
        }
    }

    info!(total = all_games.len(), "Total games fetched");
    Ok(all_games)
}
