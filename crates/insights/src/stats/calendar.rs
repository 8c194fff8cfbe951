//! When games are played: weekday, month and time-of-day breakdowns.

use std::collections::BTreeMap;
use std::fmt;

use chess_core::{GameRecord, Outcome};
use chrono::{Datelike, Timelike, Weekday};
use serde::Serialize;

use super::percent;

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekdayRow {
    pub day: &'static str,
    pub win: usize,
    pub draw: usize,
    pub loss: usize,
    pub other: usize,
}

impl WeekdayRow {
    pub fn total(&self) -> usize {
        self.win + self.draw + self.loss + self.other
    }
}

/// Game counts per weekday (Monday first) split by result.
pub fn results_by_weekday(records: &[GameRecord]) -> Vec<WeekdayRow> {
    let mut rows: Vec<WeekdayRow> = WEEK
        .iter()
        .map(|&d| WeekdayRow {
            day: weekday_name(d),
            win: 0,
            draw: 0,
            loss: 0,
            other: 0,
        })
        .collect();

    for r in records {
        let row = &mut rows[r.end_time.weekday().num_days_from_monday() as usize];
        match r.result {
            Outcome::Win => row.win += 1,
            Outcome::Draw => row.draw += 1,
            Outcome::Loss => row.loss += 1,
            Outcome::Unknown => row.other += 1,
        }
    }
    rows
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthCount {
    /// `YYYY-MM`
    pub month: String,
    pub games: usize,
}

/// Games per calendar month, oldest first. Months without games are omitted.
pub fn games_by_month(records: &[GameRecord]) -> Vec<MonthCount> {
    let mut counts: BTreeMap<(i32, u32), usize> = BTreeMap::new();
    for r in records {
        *counts.entry((r.end_time.year(), r.end_time.month())).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|((y, m), games)| MonthCount {
            month: format!("{y:04}-{m:02}"),
            games,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum TimeOfDay {
    Morning,
    Noon,
    Evening,
    Night,
}

impl TimeOfDay {
    pub const ALL: [TimeOfDay; 4] = [
        TimeOfDay::Morning,
        TimeOfDay::Noon,
        TimeOfDay::Evening,
        TimeOfDay::Night,
    ];

    /// Morning 05-11, Noon 12-16, Evening 17-20, Night otherwise.
    pub fn from_hour(hour: u32) -> TimeOfDay {
        match hour {
            5..=11 => TimeOfDay::Morning,
            12..=16 => TimeOfDay::Noon,
            17..=20 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "Morning",
            TimeOfDay::Noon => "Noon",
            TimeOfDay::Evening => "Evening",
            TimeOfDay::Night => "Night",
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthTimeOfDayCount {
    /// Calendar month, 1-12, pooled across years
    pub month: u32,
    pub time_of_day: TimeOfDay,
    pub games: usize,
}

/// Games per (calendar month, time of day), only for combinations that occur.
pub fn games_by_time_of_day(records: &[GameRecord]) -> Vec<MonthTimeOfDayCount> {
    let mut counts: BTreeMap<(u32, TimeOfDay), usize> = BTreeMap::new();
    for r in records {
        let slot = TimeOfDay::from_hour(r.end_time.hour());
        *counts.entry((r.end_time.month(), slot)).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|((month, time_of_day), games)| MonthTimeOfDayCount {
            month,
            time_of_day,
            games,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeOfDayWinRate {
    pub time_of_day: TimeOfDay,
    pub matches: usize,
    pub win_rate: f64,
}

/// Matches played and win % per time of day, Morning to Night. Slots with no
/// games are omitted.
pub fn win_rate_by_time_of_day(records: &[GameRecord]) -> Vec<TimeOfDayWinRate> {
    let mut tallies: BTreeMap<TimeOfDay, (usize, usize)> = BTreeMap::new();
    for r in records {
        let t = tallies
            .entry(TimeOfDay::from_hour(r.end_time.hour()))
            .or_default();
        t.0 += 1;
        if r.result == Outcome::Win {
            t.1 += 1;
        }
    }
    tallies
        .into_iter()
        .map(|(time_of_day, (matches, wins))| TimeOfDayWinRate {
            time_of_day,
            matches,
            win_rate: percent(wins, matches).unwrap_or(0.0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::fixtures::game;

    #[test]
    fn test_time_of_day_boundaries() {
        assert_eq!(TimeOfDay::from_hour(4), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(5), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(11), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(12), TimeOfDay::Noon);
        assert_eq!(TimeOfDay::from_hour(17), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(20), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(21), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(0), TimeOfDay::Night);
    }

    #[test]
    fn test_results_by_weekday() {
        let records = vec![
            game("2024-03-04 10:00:00", Outcome::Win),  // Monday
            game("2024-03-04 22:00:00", Outcome::Loss), // Monday
            game("2024-03-10 09:00:00", Outcome::Draw), // Sunday
            game("2024-03-10 09:30:00", Outcome::Unknown),
        ];
        let rows = results_by_weekday(&records);
        assert_eq!(rows.len(), 7);
        assert_eq!(rows[0].day, "Monday");
        assert_eq!((rows[0].win, rows[0].loss), (1, 1));
        assert_eq!(rows[6].day, "Sunday");
        assert_eq!((rows[6].draw, rows[6].other), (1, 1));
        assert_eq!(rows[3].total(), 0);
    }

    #[test]
    fn test_games_by_month_sorted() {
        let records = vec![
            game("2024-02-01 10:00:00", Outcome::Win),
            game("2023-12-31 10:00:00", Outcome::Win),
            game("2024-02-11 10:00:00", Outcome::Win),
        ];
        let months = games_by_month(&records);
        assert_eq!(
            months,
            vec![
                MonthCount { month: "2023-12".into(), games: 1 },
                MonthCount { month: "2024-02".into(), games: 2 },
            ]
        );
    }

    #[test]
    fn test_time_of_day_breakdowns() {
        let records = vec![
            game("2024-01-05 06:00:00", Outcome::Win),
            game("2024-01-05 07:00:00", Outcome::Loss),
            game("2023-01-20 23:00:00", Outcome::Win),
            game("2024-06-05 13:00:00", Outcome::Win),
        ];

        let by_month = games_by_time_of_day(&records);
        assert_eq!(by_month.len(), 3);
        assert_eq!(by_month[0].month, 1);
        assert_eq!(by_month[0].time_of_day, TimeOfDay::Morning);
        assert_eq!(by_month[0].games, 2);
        assert_eq!(by_month[1].time_of_day, TimeOfDay::Night);

        let rates = win_rate_by_time_of_day(&records);
        let slots: Vec<TimeOfDay> = rates.iter().map(|r| r.time_of_day).collect();
        assert_eq!(slots, vec![TimeOfDay::Morning, TimeOfDay::Noon, TimeOfDay::Night]);
        assert_eq!(rates[0].matches, 2);
        assert_eq!(rates[0].win_rate, 50.0);
    }
}
