use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::outcome::{player_color, Color, Outcome};

/// One side of a chess.com archive game.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPlayer {
    pub username: Option<String>,
    pub rating: Option<i32>,
    pub result: Option<String>,
}

/// The fields of a chess.com archive game the pipeline reads. Everything is
/// optional; unknown fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawGame {
    pub url: Option<String>,
    pub pgn: Option<String>,
    pub time_class: Option<String>,
    pub end_time: Option<i64>,
    pub rules: Option<String>,
    /// Opening page URL, e.g. "https://www.chess.com/openings/Italian-Game"
    pub eco: Option<String>,
    pub white: RawPlayer,
    pub black: RawPlayer,
}

impl RawGame {
    /// Standard chess (no variants). Games without a `rules` field are not counted.
    pub fn is_standard(&self) -> bool {
        self.rules.as_deref() == Some("chess")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TimeClass {
    Bullet,
    Blitz,
    Rapid,
    Daily,
    #[serde(other)]
    Unknown,
}

impl TimeClass {
    pub fn parse(s: &str) -> TimeClass {
        match s.trim().to_lowercase().as_str() {
            "bullet" => TimeClass::Bullet,
            "blitz" => TimeClass::Blitz,
            "rapid" => TimeClass::Rapid,
            "daily" => TimeClass::Daily,
            _ => TimeClass::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeClass::Bullet => "Bullet",
            TimeClass::Blitz => "Blitz",
            TimeClass::Rapid => "Rapid",
            TimeClass::Daily => "Daily",
            TimeClass::Unknown => "Unknown",
        }
    }

    pub const LIVE: [TimeClass; 3] = [TimeClass::Bullet, TimeClass::Blitz, TimeClass::Rapid];
}

impl fmt::Display for TimeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `YYYY-MM-DD HH:MM:SS`, always UTC.
pub mod end_time_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// One flattened row per finished game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    #[serde(rename = "Game URL")]
    pub url: String,
    #[serde(rename = "Time Class")]
    pub time_class: TimeClass,
    #[serde(rename = "End Time", with = "end_time_format")]
    pub end_time: NaiveDateTime,
    #[serde(rename = "White Player")]
    pub white_player: String,
    #[serde(rename = "White Rating")]
    pub white_rating: Option<i32>,
    #[serde(rename = "Black Player")]
    pub black_player: String,
    #[serde(rename = "Black Rating")]
    pub black_rating: Option<i32>,
    #[serde(rename = "Result")]
    pub result: Outcome,
    #[serde(rename = "Main Opening")]
    pub main_opening: String,
    #[serde(rename = "Variation")]
    pub variation: String,
    #[serde(rename = "Information")]
    pub information: BTreeMap<String, String>,
    #[serde(rename = "Moves")]
    pub moves: String,
}

impl GameRecord {
    pub fn player_color(&self, username: &str) -> Option<Color> {
        player_color(username, &self.white_player, &self.black_player)
    }

    fn rating_of(&self, color: Color) -> Option<i32> {
        match color {
            Color::White => self.white_rating,
            Color::Black => self.black_rating,
        }
    }

    pub fn player_rating(&self, username: &str) -> Option<i32> {
        self.rating_of(self.player_color(username)?)
    }

    pub fn opponent_rating(&self, username: &str) -> Option<i32> {
        self.rating_of(self.player_color(username)?.opposite())
    }

    /// Opponent rating minus the player's rating.
    pub fn rating_differential(&self, username: &str) -> Option<i32> {
        Some(self.opponent_rating(username)? - self.player_rating(username)?)
    }
}
