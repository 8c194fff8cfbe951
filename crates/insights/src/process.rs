//! Flatten raw chess.com games into [`GameRecord`] rows.

use chess_core::openings::opening_name_from_eco;
use chess_core::outcome::determine_outcome;
use chess_core::pgn::split_pgn;
use chess_core::{GameRecord, OpeningCatalog, OpeningClass, RawGame, TimeClass};
use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::{debug, info};

/// Unix seconds -> UTC timestamp; missing or out-of-range values become the epoch.
fn end_time(unix: Option<i64>) -> NaiveDateTime {
    unix.and_then(|t| DateTime::from_timestamp(t, 0))
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
        .naive_utc()
}

/// Classify the game's opening, teaching the catalog the name if it is new.
fn classify_opening(game: &RawGame, catalog: &mut OpeningCatalog) -> OpeningClass {
    let opening_name = opening_name_from_eco(game.eco.as_deref());
    let class = catalog.classify(&opening_name);
    if class.is_new && catalog.learn(&opening_name) {
        info!(opening = %opening_name, "New opening added");
    }
    class
}

/// Build one row from a raw game. The catalog learns the opening if it is new.
pub fn process_game(game: &RawGame, username: &str, catalog: &mut OpeningCatalog) -> GameRecord {
    let sections = split_pgn(game.pgn.as_deref().unwrap_or(""));
    let class = classify_opening(game, catalog);

    let white = game.white.username.clone().unwrap_or_else(|| "Unknown".to_string());
    let black = game.black.username.clone().unwrap_or_else(|| "Unknown".to_string());
    let result = determine_outcome(
        username,
        &white,
        &black,
        game.white.result.as_deref().unwrap_or(""),
        game.black.result.as_deref().unwrap_or(""),
    );

    GameRecord {
        url: game.url.clone().unwrap_or_default(),
        time_class: game
            .time_class
            .as_deref()
            .map(TimeClass::parse)
            .unwrap_or(TimeClass::Unknown),
        end_time: end_time(game.end_time),
        white_player: white,
        white_rating: game.white.rating,
        black_player: black,
        black_rating: game.black.rating,
        result,
        main_opening: class.main_opening,
        variation: class.variation,
        information: sections.headers,
        moves: sections.moves,
    }
}

/// Flatten every standard-chess game, in input order. Every game, variants
/// included, is classified first, so variant openings still extend the list.
pub fn process_games(
    games: &[RawGame],
    username: &str,
    catalog: &mut OpeningCatalog,
) -> Vec<GameRecord> {
    let mut records = Vec::with_capacity(games.len());
    let mut skipped = 0usize;

    for game in games {
        if !game.is_standard() {
            classify_opening(game, catalog);
            skipped += 1;
            debug!(url = ?game.url, rules = ?game.rules, "Skipping non-standard game");
            continue;
        }
        records.push(process_game(game, username, catalog));
    }

    info!(
        processed = records.len(),
        skipped,
        new_openings = catalog.learned().len(),
        "Processed games"
    );
    records
}
