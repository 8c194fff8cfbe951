//! Flat-file persistence: raw archive dumps and the flattened game table.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use chess_core::game_data::end_time_format;
use chess_core::{GameRecord, RawGame};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::InsightsError;

fn ensure_parent(path: &Path) -> Result<(), InsightsError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| InsightsError::io(parent, e))?;
    }
    Ok(())
}

fn write_pretty_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), InsightsError> {
    ensure_parent(path)?;
    let file = File::create(path).map_err(|e| InsightsError::io(path, e))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)?;
    Ok(())
}

/// Write raw games as pretty JSON. An empty list leaves any existing file
/// untouched; returns whether the file was written.
pub fn save_raw_games(path: &Path, games: &[Value]) -> Result<bool, InsightsError> {
    if games.is_empty() {
        warn!(path = %path.display(), "No games to save, leaving file as is");
        return Ok(false);
    }
    write_pretty_json(path, games)?;
    let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    info!(path = %path.display(), games = games.len(), bytes = size, "Saved raw games");
    Ok(true)
}

pub fn load_raw_games(path: &Path) -> Result<Vec<RawGame>, InsightsError> {
    let file = File::open(path).map_err(|e| InsightsError::io(path, e))?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

pub fn save_records_json(path: &Path, records: &[GameRecord]) -> Result<(), InsightsError> {
    write_pretty_json(path, records)?;
    info!(path = %path.display(), rows = records.len(), "Saved processed games (JSON)");
    Ok(())
}

pub fn load_records(path: &Path) -> Result<Vec<GameRecord>, InsightsError> {
    let file = File::open(path).map_err(|e| InsightsError::io(path, e))?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Load the table, failing if it holds no games.
pub fn load_nonempty_records(path: &Path) -> Result<Vec<GameRecord>, InsightsError> {
    let records = load_records(path)?;
    if records.is_empty() {
        return Err(InsightsError::EmptyDataset(path.to_path_buf()));
    }
    Ok(records)
}

/// CSV has no nested values, so the header map is written as JSON text.
#[derive(Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Game URL")]
    url: &'a str,
    #[serde(rename = "Time Class")]
    time_class: &'static str,
    #[serde(rename = "End Time")]
    end_time: String,
    #[serde(rename = "White Player")]
    white_player: &'a str,
    #[serde(rename = "White Rating")]
    white_rating: Option<i32>,
    #[serde(rename = "Black Player")]
    black_player: &'a str,
    #[serde(rename = "Black Rating")]
    black_rating: Option<i32>,
    #[serde(rename = "Result")]
    result: &'static str,
    #[serde(rename = "Main Opening")]
    main_opening: &'a str,
    #[serde(rename = "Variation")]
    variation: &'a str,
    #[serde(rename = "Information")]
    information: String,
    #[serde(rename = "Moves")]
    moves: &'a str,
}

pub fn save_records_csv(path: &Path, records: &[GameRecord]) -> Result<(), InsightsError> {
    ensure_parent(path)?;
    let mut writer = csv::Writer::from_path(path)?;
    for r in records {
        writer.serialize(CsvRow {
            url: &r.url,
            time_class: r.time_class.as_str(),
            end_time: r.end_time.format(end_time_format::FORMAT).to_string(),
            white_player: &r.white_player,
            white_rating: r.white_rating,
            black_player: &r.black_player,
            black_rating: r.black_rating,
            result: r.result.as_str(),
            main_opening: &r.main_opening,
            variation: &r.variation,
            information: serde_json::to_string(&r.information)?,
            moves: &r.moves,
        })?;
    }
    writer.flush().map_err(|e| InsightsError::io(path, e))?;
    info!(path = %path.display(), rows = records.len(), "Saved processed games (CSV)");
    Ok(())
}
