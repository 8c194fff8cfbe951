//! Win rate by rating differential (opponent rating minus the player's).

use std::fmt;

use chess_core::{GameRecord, Outcome};
use serde::Serialize;

use super::percent;

const BIN_MIN: i32 = -70;
const BIN_MAX: i32 = 70;
const BIN_WIDTH: i32 = 10;

/// Half-open interval `[lower, upper)`; `None` is an infinite end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RatingBin {
    pub lower: Option<i32>,
    pub upper: Option<i32>,
}

impl RatingBin {
    pub fn contains(&self, diff: f64) -> bool {
        self.lower.map_or(true, |l| diff >= l as f64) && self.upper.map_or(true, |u| diff < u as f64)
    }
}

impl fmt::Display for RatingBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.lower, self.upper) {
            (Some(l), Some(u)) => write!(f, "{l} to {u}"),
            (None, Some(u)) => write!(f, "-inf to {u}"),
            (Some(l), None) => write!(f, "{l} to inf"),
            (None, None) => f.write_str("-inf to inf"),
        }
    }
}

/// `(-inf,-70) [-70,-60) ... [60,70) [70,inf)`
pub fn rating_bins() -> Vec<RatingBin> {
    let mut bins = vec![RatingBin {
        lower: None,
        upper: Some(BIN_MIN),
    }];
    let mut lower = BIN_MIN;
    while lower < BIN_MAX {
        bins.push(RatingBin {
            lower: Some(lower),
            upper: Some(lower + BIN_WIDTH),
        });
        lower += BIN_WIDTH;
    }
    bins.push(RatingBin {
        lower: Some(BIN_MAX),
        upper: None,
    });
    bins
}

/// Index into [`rating_bins`] of the bin holding `diff`; None only for NaN.
pub fn bin_index(diff: f64) -> Option<usize> {
    if diff.is_nan() {
        return None;
    }
    if diff < BIN_MIN as f64 {
        return Some(0);
    }
    if diff >= BIN_MAX as f64 {
        return Some(((BIN_MAX - BIN_MIN) / BIN_WIDTH) as usize + 1);
    }
    Some(((diff - BIN_MIN as f64) / BIN_WIDTH as f64).floor() as usize + 1)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DifferentialRow {
    pub bin: String,
    pub lower: Option<i32>,
    pub upper: Option<i32>,
    pub games: usize,
    /// None for a bin with no games
    pub win_rate: Option<f64>,
}

/// Games and win % per rating-differential bin. Every bin is reported, empty
/// ones with zero games. Games without both ratings, or that `username` did
/// not play, are left out.
pub fn win_rate_by_rating_differential(records: &[GameRecord], username: &str) -> Vec<DifferentialRow> {
    let bins = rating_bins();
    let mut games = vec![0usize; bins.len()];
    let mut wins = vec![0usize; bins.len()];

    for r in records {
        let Some(diff) = r.rating_differential(username) else {
            continue;
        };
        if let Some(i) = bin_index(diff as f64) {
            games[i] += 1;
            if r.result == Outcome::Win {
                wins[i] += 1;
            }
        }
    }

    bins.iter()
        .enumerate()
        .map(|(i, bin)| DifferentialRow {
            bin: bin.to_string(),
            lower: bin.lower,
            upper: bin.upper,
            games: games[i],
            win_rate: percent(wins[i], games[i]),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::fixtures::{game, ME};

    #[test]
    fn test_bins_are_contiguous() {
        let bins = rating_bins();
        assert_eq!(bins.len(), 16);
        assert_eq!(bins[0].lower, None);
        assert_eq!(bins[15].upper, None);
        for pair in bins.windows(2) {
            assert_eq!(pair[0].upper, pair[1].lower);
        }
        for bin in &bins[1..15] {
            assert_eq!(bin.upper.unwrap() - bin.lower.unwrap(), 10);
        }
    }

    #[test]
    fn test_every_value_in_exactly_one_bin() {
        let bins = rating_bins();
        let mut x = -200.0;
        while x <= 200.0 {
            let holding: Vec<usize> = (0..bins.len()).filter(|&i| bins[i].contains(x)).collect();
            assert_eq!(holding, vec![bin_index(x).unwrap()], "diff {x}");
            x += 2.5;
        }
        assert_eq!(bin_index(f64::MIN), Some(0));
        assert_eq!(bin_index(f64::MAX), Some(15));
        assert_eq!(bin_index(f64::NAN), None);
    }

    #[test]
    fn test_bin_edges_are_left_closed() {
        assert_eq!(bin_index(-70.0), Some(1));
        assert_eq!(bin_index(-70.5), Some(0));
        assert_eq!(bin_index(0.0), Some(8));
        assert_eq!(bin_index(69.9), Some(14));
        assert_eq!(bin_index(70.0), Some(15));
    }

    #[test]
    fn test_labels() {
        let labels: Vec<String> = rating_bins().iter().map(|b| b.to_string()).collect();
        assert_eq!(labels[0], "-inf to -70");
        assert_eq!(labels[1], "-70 to -60");
        assert_eq!(labels[15], "70 to inf");
    }

    #[test]
    fn test_win_rate_by_differential() {
        let mut stronger = game("2024-01-01 10:00:00", Outcome::Loss);
        stronger.black_rating = Some(1600); // diff +100
        let mut equal_win = game("2024-01-01 11:00:00", Outcome::Win);
        equal_win.black_rating = Some(1505); // diff +5
        let equal_loss = game("2024-01-01 12:00:00", Outcome::Loss); // diff 0
        let mut unrated = game("2024-01-01 13:00:00", Outcome::Win);
        unrated.black_rating = None;

        let rows = win_rate_by_rating_differential(&[stronger, equal_win, equal_loss, unrated], ME);
        assert_eq!(rows.len(), 16);
        assert_eq!(rows[8].bin, "0 to 10");
        assert_eq!(rows[8].games, 2);
        assert_eq!(rows[8].win_rate, Some(50.0));
        assert_eq!(rows[15].games, 1);
        assert_eq!(rows[15].win_rate, Some(0.0));
        assert_eq!(rows[3].games, 0);
        assert_eq!(rows[3].win_rate, None);
    }
}
