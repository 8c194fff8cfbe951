//! PGN parsing: header tags and move text.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Move text reported when a PGN has no moves section.
pub const NO_MOVES: &str = "No Moves available";

/// Move text reported when a PGN has no blank line between headers and moves.
pub const INVALID_PGN: &str = "Invalid PGN format";

/// A PGN split into its header tags and its raw move text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PgnSections {
    pub headers: BTreeMap<String, String>,
    pub moves: String,
}

impl PgnSections {
    pub fn is_valid(&self) -> bool {
        self.moves != INVALID_PGN
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }
}

/// Split a PGN into header tags and move text.
///
/// Never fails: an empty PGN yields no headers and [`NO_MOVES`]; a PGN with
/// no blank-line separator yields no headers and [`INVALID_PGN`].
pub fn split_pgn(pgn: &str) -> PgnSections {
    if pgn.trim().is_empty() {
        return PgnSections {
            headers: BTreeMap::new(),
            moves: NO_MOVES.to_string(),
        };
    }

    let normalized = pgn.replace("\r\n", "\n");
    let Some((header_block, move_block)) = normalized.split_once("\n\n") else {
        return PgnSections {
            headers: BTreeMap::new(),
            moves: INVALID_PGN.to_string(),
        };
    };

    let mut headers = BTreeMap::new();
    for line in header_block.trim().lines() {
        let line = line.trim();
        if let Some((key, value)) = parse_header_line(line) {
            headers.insert(key.to_string(), value.to_string());
        }
    }

    // Anything after a second blank line (e.g. trailing comments) stays with the moves
    let moves = move_block.trim();
    let moves = if moves.is_empty() { NO_MOVES } else { moves };

    PgnSections {
        headers,
        moves: moves.to_string(),
    }
}

/// `[Key "Value"]` -> ("Key", "Value")
fn parse_header_line(line: &str) -> Option<(&str, &str)> {
    let inner = line.strip_prefix('[')?.strip_suffix(']')?;
    let (key, value) = inner.split_once(' ')?;
    Some((key, value.trim_matches('"')))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[Event "Live Chess"]
[Site "Chess.com"]
[White "Player1"]
[Black "Player2"]
[Result "1-0"]
[ECO "C50"]
[WhiteElo "1500"]

1. e4 {[%clk 0:09:58]} 1... e5 {[%clk 0:09:57]} 2. Nf3 {[%clk 0:09:50]} 2... Nc6 {[%clk 0:09:41]} 1-0"#;

    #[test]
    fn test_split_pgn_basic() {
        let sections = split_pgn(SAMPLE);
        assert!(sections.is_valid());
        assert_eq!(sections.header("White"), Some("Player1"));
        assert_eq!(sections.header("Event"), Some("Live Chess"));
        assert_eq!(sections.header("ECO"), Some("C50"));
        assert_eq!(sections.headers.len(), 7);
        assert!(sections.moves.starts_with("1. e4 {[%clk 0:09:58]}"));
        assert!(sections.moves.ends_with("1-0"));
    }

    #[test]
    fn test_split_pgn_empty() {
        let sections = split_pgn("");
        assert!(sections.headers.is_empty());
        assert_eq!(sections.moves, NO_MOVES);

        let sections = split_pgn("   \n ");
        assert_eq!(sections.moves, NO_MOVES);
    }

    #[test]
    fn test_split_pgn_without_separator_is_invalid() {
        let sections = split_pgn("[White \"a\"]\n[Black \"b\"]\n1. e4 e5");
        assert!(!sections.is_valid());
        assert!(sections.headers.is_empty());
        assert_eq!(sections.moves, INVALID_PGN);
    }

    #[test]
    fn test_split_pgn_headers_only() {
        let sections = split_pgn("[White \"a\"]\n\n");
        assert_eq!(sections.header("White"), Some("a"));
        assert_eq!(sections.moves, NO_MOVES);
    }

    #[test]
    fn test_split_pgn_crlf() {
        let sections = split_pgn("[White \"a\"]\r\n[Black \"b\"]\r\n\r\n1. d4 d5 *");
        assert_eq!(sections.header("Black"), Some("b"));
        assert_eq!(sections.moves, "1. d4 d5 *");
    }

    #[test]
    fn test_split_pgn_ignores_malformed_header_lines() {
        let sections = split_pgn("[White \"a\"]\nnot a header\n[Lonely]\n\n1. e4 *");
        assert_eq!(sections.headers.len(), 1);
    }
}
