use std::collections::BTreeMap;

use chess_core::game_data::end_time_format;
use chess_core::{GameRecord, TimeClass};
use chrono::NaiveDateTime;
use serde::Serialize;

pub const DEFAULT_WINDOW: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    #[serde(with = "end_time_format")]
    pub end_time: NaiveDateTime,
    pub player_rating: i32,
    pub smoothed_rating: f64,
    pub opponent_rating: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingTrend {
    pub time_class: TimeClass,
    pub points: Vec<TrendPoint>,
}

/// Trailing mean over up to `window` values; the first values average over
/// what is available so far.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    let mut out = Vec::with_capacity(values.len());
    let mut running = 0.0;
    for (i, v) in values.iter().enumerate() {
        running += v;
        if i >= window {
            running -= values[i - window];
        }
        out.push(running / (i + 1).min(window) as f64);
    }
    out
}

/// `username`'s rating over time for each time class, oldest first, with a
/// rolling mean. Games without the player's rating are skipped.
pub fn rating_trends(records: &[GameRecord], username: &str, window: usize) -> Vec<RatingTrend> {
    let mut by_class: BTreeMap<TimeClass, Vec<&GameRecord>> = BTreeMap::new();
    for r in records {
        if r.player_rating(username).is_some() {
            by_class.entry(r.time_class).or_default().push(r);
        }
    }

    by_class
        .into_iter()
        .map(|(time_class, mut games)| {
            games.sort_by_key(|r| r.end_time);
            let ratings: Vec<i32> = games
                .iter()
                .filter_map(|r| r.player_rating(username))
                .collect();
            let as_f64: Vec<f64> = ratings.iter().map(|&r| r as f64).collect();
            let smoothed = rolling_mean(&as_f64, window);

            let points = games
                .iter()
                .zip(ratings)
                .zip(smoothed)
                .map(|((r, player_rating), smoothed_rating)| TrendPoint {
                    end_time: r.end_time,
                    player_rating,
                    smoothed_rating,
                    opponent_rating: r.opponent_rating(username),
                })
                .collect();

            RatingTrend { time_class, points }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::fixtures::{game, ME};
    use chess_core::Outcome;

    #[test]
    fn test_rolling_mean_min_periods_one() {
        let smoothed = rolling_mean(&[10.0, 20.0, 30.0, 40.0], 2);
        assert_eq!(smoothed, vec![10.0, 15.0, 25.0, 35.0]);
        assert_eq!(rolling_mean(&[], 20), Vec::<f64>::new());
    }

    #[test]
    fn test_trends_split_by_time_class_and_sorted() {
        let mut late = game("2024-01-03 10:00:00", Outcome::Win);
        late.white_rating = Some(1520);
        let early = game("2024-01-01 10:00:00", Outcome::Win);
        let mut rapid = game("2024-01-02 10:00:00", Outcome::Win);
        rapid.time_class = TimeClass::Rapid;
        rapid.white_rating = Some(1700);

        let trends = rating_trends(&[late, rapid, early], ME, 20);
        assert_eq!(trends.len(), 2);
        assert_eq!(trends[0].time_class, TimeClass::Blitz);

        let blitz = &trends[0].points;
        assert_eq!(blitz[0].player_rating, 1500);
        assert_eq!(blitz[1].player_rating, 1520);
        assert_eq!(blitz[1].smoothed_rating, 1510.0);
        assert_eq!(blitz[1].opponent_rating, Some(1500));

        assert_eq!(trends[1].points[0].smoothed_rating, 1700.0);
    }
}
