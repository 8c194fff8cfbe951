//! Shared chess.com game types and pure PGN / outcome / opening helpers.

pub mod clock;
pub mod game_data;
pub mod openings;
pub mod outcome;
pub mod pgn;

pub use game_data::{GameRecord, RawGame, RawPlayer, TimeClass};
pub use openings::{OpeningCatalog, OpeningClass};
pub use outcome::{Color, Outcome};
