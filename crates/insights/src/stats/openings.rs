use std::collections::HashMap;

use chess_core::{GameRecord, Outcome};
use serde::Serialize;

use super::percent;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpeningWinRate {
    pub main_opening: String,
    pub games: usize,
    pub win_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpeningEffectiveness {
    pub main_opening: String,
    pub games: usize,
    pub win_rate: f64,
    pub draw_rate: f64,
    pub loss_rate: f64,
}

#[derive(Default)]
struct Tally {
    games: usize,
    wins: usize,
    draws: usize,
    losses: usize,
}

/// Per-opening tallies, most played first (ties by name).
fn tally_by_opening(records: &[GameRecord]) -> Vec<(String, Tally)> {
    let mut by_opening: HashMap<&str, Tally> = HashMap::new();
    for r in records {
        let t = by_opening.entry(r.main_opening.as_str()).or_default();
        t.games += 1;
        match r.result {
            Outcome::Win => t.wins += 1,
            Outcome::Draw => t.draws += 1,
            Outcome::Loss => t.losses += 1,
            Outcome::Unknown => {}
        }
    }

    let mut tallies: Vec<(String, Tally)> = by_opening
        .into_iter()
        .map(|(name, t)| (name.to_string(), t))
        .collect();
    tallies.sort_by(|a, b| b.1.games.cmp(&a.1.games).then_with(|| a.0.cmp(&b.0)));
    tallies
}

/// Games played and win % per main opening, keeping openings with at least
/// `min_games` games, most played first.
pub fn opening_win_rates(records: &[GameRecord], min_games: usize) -> Vec<OpeningWinRate> {
    tally_by_opening(records)
        .into_iter()
        .filter(|(_, t)| t.games >= min_games)
        .map(|(main_opening, t)| OpeningWinRate {
            main_opening,
            games: t.games,
            win_rate: percent(t.wins, t.games).unwrap_or(0.0),
        })
        .collect()
}

/// Win / draw / loss percentages for every main opening, most played first.
pub fn opening_effectiveness(records: &[GameRecord]) -> Vec<OpeningEffectiveness> {
    tally_by_opening(records)
        .into_iter()
        .map(|(main_opening, t)| OpeningEffectiveness {
            main_opening,
            games: t.games,
            win_rate: percent(t.wins, t.games).unwrap_or(0.0),
            draw_rate: percent(t.draws, t.games).unwrap_or(0.0),
            loss_rate: percent(t.losses, t.games).unwrap_or(0.0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::fixtures::game;

    fn with_opening(opening: &str, result: Outcome) -> GameRecord {
        let mut g = game("2024-01-01 12:00:00", result);
        g.main_opening = opening.to_string();
        g
    }

    fn sample() -> Vec<GameRecord> {
        let mut records = Vec::new();
        for i in 0..12 {
            let result = if i < 9 { Outcome::Win } else { Outcome::Loss };
            records.push(with_opening("Italian", result));
        }
        for i in 0..10 {
            let result = match i % 3 {
                0 => Outcome::Win,
                1 => Outcome::Draw,
                _ => Outcome::Loss,
            };
            records.push(with_opening("Sicilian", result));
        }
        records.push(with_opening("Bongcloud", Outcome::Loss));
        records
    }

    #[test]
    fn test_win_rates_filter_and_order() {
        let rates = opening_win_rates(&sample(), 10);
        assert_eq!(rates.len(), 2);
        assert_eq!(rates[0].main_opening, "Italian");
        assert_eq!(rates[0].games, 12);
        assert!((rates[0].win_rate - 75.0).abs() < 1e-9);
        assert_eq!(rates[1].main_opening, "Sicilian");
        assert!((rates[1].win_rate - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_effectiveness_covers_every_opening() {
        let rows = opening_effectiveness(&sample());
        assert_eq!(rows.len(), 3);
        let sicilian = rows.iter().find(|r| r.main_opening == "Sicilian").unwrap();
        assert!((sicilian.win_rate - 40.0).abs() < 1e-9);
        assert!((sicilian.draw_rate - 30.0).abs() < 1e-9);
        assert!((sicilian.loss_rate - 30.0).abs() < 1e-9);
        assert_eq!(rows.last().unwrap().main_opening, "Bongcloud");
    }

    #[test]
    fn test_empty_input() {
        assert!(opening_win_rates(&[], 1).is_empty());
        assert!(opening_effectiveness(&[]).is_empty());
    }
}
