//! Game outcome from the configured player's point of view.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
    Draw,
    Unknown,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Win => "Win",
            Outcome::Loss => "Loss",
            Outcome::Draw => "Draw",
            Outcome::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

// chess.com per-colour result codes
const WIN_CODES: &[&str] = &["win"];
const LOSS_CODES: &[&str] = &[
    "checkmated",
    "timeout",
    "resigned",
    "abandoned",
    "lose",
    "bughousepartnerlose",
    "kingofthehill",
    "threecheck",
];
const DRAW_CODES: &[&str] = &[
    "stalemate",
    "draw",
    "insufficient material",
    "insufficient",
    "repetition",
    "agreed",
    "50move",
    "timevsinsufficient",
];

/// Map a chess.com result code (e.g. "resigned", "agreed") to an outcome for
/// the player it belongs to. Returns None for codes outside the vocabulary.
pub fn classify_result_code(code: &str) -> Option<Outcome> {
    let code = code.trim().to_lowercase();
    if WIN_CODES.contains(&code.as_str()) {
        Some(Outcome::Win)
    } else if LOSS_CODES.contains(&code.as_str()) {
        Some(Outcome::Loss)
    } else if DRAW_CODES.contains(&code.as_str()) {
        Some(Outcome::Draw)
    } else {
        None
    }
}

/// Which colour `username` played, compared case-insensitively.
pub fn player_color(username: &str, white: &str, black: &str) -> Option<Color> {
    let username = username.trim().to_lowercase();
    if username == white.trim().to_lowercase() {
        Some(Color::White)
    } else if username == black.trim().to_lowercase() {
        Some(Color::Black)
    } else {
        None
    }
}

/// Outcome of a game for `username`, given both players and their result codes.
pub fn determine_outcome(
    username: &str,
    white: &str,
    black: &str,
    white_result: &str,
    black_result: &str,
) -> Outcome {
    let code = match player_color(username, white, black) {
        Some(Color::White) => white_result,
        Some(Color::Black) => black_result,
        None => return Outcome::Unknown,
    };
    classify_result_code(code).unwrap_or(Outcome::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_white_win_and_black_loss() {
        assert_eq!(
            determine_outcome("alice", "Alice", "bob", "win", "resigned"),
            Outcome::Win
        );
        assert_eq!(
            determine_outcome("bob", "Alice", "bob", "win", "resigned"),
            Outcome::Loss
        );
    }

    #[test]
    fn test_every_known_code_maps_to_decided_outcome() {
        for code in WIN_CODES.iter().chain(LOSS_CODES).chain(DRAW_CODES) {
            let as_white = determine_outcome("me", "me", "them", code, "win");
            let as_black = determine_outcome("me", "them", "me", "win", code);
            assert_ne!(as_white, Outcome::Unknown, "{code}");
            assert_eq!(as_white, as_black, "{code}");
        }
    }

    #[test]
    fn test_draw_codes() {
        assert_eq!(classify_result_code("Agreed"), Some(Outcome::Draw));
        assert_eq!(
            classify_result_code("insufficient material"),
            Some(Outcome::Draw)
        );
        assert_eq!(classify_result_code("50move"), Some(Outcome::Draw));
    }

    #[test]
    fn test_unknown_when_user_plays_neither_side() {
        assert_eq!(
            determine_outcome("carol", "alice", "bob", "win", "checkmated"),
            Outcome::Unknown
        );
    }

    #[test]
    fn test_names_are_trimmed_and_case_insensitive() {
        assert_eq!(player_color(" Alice ", "alice ", "bob"), Some(Color::White));
        assert_eq!(player_color("BOB", "alice", "Bob"), Some(Color::Black));
    }

    #[test]
    fn test_unrecognised_code_is_unknown() {
        assert_eq!(
            determine_outcome("alice", "alice", "bob", "exploded", "win"),
            Outcome::Unknown
        );
    }
}
