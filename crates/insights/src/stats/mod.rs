//! Descriptive aggregates over the flattened game table. Every function here
//! is pure: records in, a serialisable report out.

pub mod calendar;
pub mod openings;
pub mod outcomes;
pub mod streaks;
pub mod time_management;
pub mod trends;

/// `part / whole` as a percentage; None for an empty group.
pub(crate) fn percent(part: usize, whole: usize) -> Option<f64> {
    if whole == 0 {
        None
    } else {
        Some(part as f64 / whole as f64 * 100.0)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::collections::BTreeMap;

    use chess_core::{GameRecord, Outcome, TimeClass};
    use chrono::NaiveDateTime;

    pub const ME: &str = "me";

    /// A game `ME` played as white.
    pub fn game(end_time: &str, result: Outcome) -> GameRecord {
        GameRecord {
            url: format!("https://www.chess.com/game/live/{end_time}"),
            time_class: TimeClass::Blitz,
            end_time: NaiveDateTime::parse_from_str(end_time, "%Y-%m-%d %H:%M:%S").unwrap(),
            white_player: ME.to_string(),
            white_rating: Some(1500),
            black_player: "opponent".to_string(),
            black_rating: Some(1500),
            result,
            main_opening: "Unknown".to_string(),
            variation: "Unknown".to_string(),
            information: BTreeMap::new(),
            moves: String::new(),
        }
    }
}
