#![allow(dead_code)]

use std::path::Path;
use std::time::Duration;

use insights::clients::chess_com::ChessComClient;
use insights::InsightsConfig;
use serde_json::{json, Value};

pub const USERNAME: &str = "Ardil30";

/// Config rooted in a scratch directory so tests never touch ./data or ./reports.
pub fn config_in(root: &Path) -> InsightsConfig {
    let mut config = InsightsConfig::for_user(USERNAME);
    config.data_dir = root.join("data");
    config.reports_dir = root.join("reports");
    config.models_dir = root.join("models");
    config
}

/// Client against a mock server, without the politeness delay.
pub fn client(base_url: &str) -> ChessComClient {
    ChessComClient::new(base_url, "chess-insights-tests", Duration::from_secs(5), Duration::ZERO)
        .expect("Failed to build client")
}

/// A standard blitz game as the chess.com archive API returns it, with
/// `USERNAME` on `color` and a 3+0 clock on every move.
pub fn raw_game(id: u32, color: &str, result_for_user: &str, opponent_result: &str, eco: &str, end_time: i64) -> Value {
    let me = json!({ "username": USERNAME, "rating": 1500 + id as i64, "result": result_for_user });
    let them = json!({ "username": "opponent", "rating": 1480, "result": opponent_result });
    let (white, black) = if color == "white" { (me, them) } else { (them, me) };
    json!({
        "url": format!("https://www.chess.com/game/live/{id}"),
        "pgn": format!(
            "[Event \"Live Chess\"]\n[Site \"Chess.com\"]\n[ECOUrl \"{eco}\"]\n\n\
             1. e4 {{[%clk 0:03:00]}} 1... e5 {{[%clk 0:03:00]}} \
             2. Nf3 {{[%clk 0:02:55]}} 2... Nc6 {{[%clk 0:02:57]}} \
             3. Bc4 {{[%clk 0:02:50]}} 3... Bc5 {{[%clk 0:02:54]}} 1-0"
        ),
        "time_class": "blitz",
        "end_time": end_time,
        "rated": true,
        "rules": "chess",
        "eco": eco,
        "white": white,
        "black": black,
    })
}

pub const ITALIAN: &str = "https://www.chess.com/openings/Italian-Game-Two-Knights-Defense";
pub const SICILIAN: &str = "https://www.chess.com/openings/Sicilian-Defense-Najdorf-Variation";
