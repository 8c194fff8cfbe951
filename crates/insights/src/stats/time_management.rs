use std::collections::BTreeMap;

use chess_core::clock::average_time_per_move;
use chess_core::{GameRecord, Outcome, TimeClass};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeManagementRow {
    pub time_class: TimeClass,
    pub result: Outcome,
    /// Mean over games of the player's average seconds per move
    pub average_time_per_move: f64,
    pub games: usize,
}

fn outcome_rank(o: Outcome) -> u8 {
    match o {
        Outcome::Loss => 0,
        Outcome::Draw => 1,
        Outcome::Win => 2,
        Outcome::Unknown => 3,
    }
}

/// Average time per move of `username`'s own moves in every non-daily game.
pub fn per_game_times<'a>(
    records: &'a [GameRecord],
    username: &'a str,
) -> impl Iterator<Item = (&'a GameRecord, f64)> + 'a {
    records
        .iter()
        .filter(|r| r.time_class != TimeClass::Daily)
        .filter_map(move |r| {
            let color = r.player_color(username)?;
            Some((r, average_time_per_move(&r.moves, color)?))
        })
}

/// Mean time per move grouped by time class and outcome. Daily games and
/// games without at least two usable clock readings are left out. Rows are
/// ordered by time class, then Loss, Draw, Win.
pub fn average_time_by_outcome(records: &[GameRecord], username: &str) -> Vec<TimeManagementRow> {
    let mut groups: BTreeMap<(TimeClass, u8), (Outcome, f64, usize)> = BTreeMap::new();
    for (r, avg) in per_game_times(records, username) {
        let entry = groups
            .entry((r.time_class, outcome_rank(r.result)))
            .or_insert((r.result, 0.0, 0));
        entry.1 += avg;
        entry.2 += 1;
    }

    groups
        .into_iter()
        .map(|((time_class, _), (result, total, games))| TimeManagementRow {
            time_class,
            result,
            average_time_per_move: total / games as f64,
            games,
        })
        .collect()
}
