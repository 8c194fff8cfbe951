//! Clock annotations (`{[%clk 0:09:58]}`) embedded in chess.com move text.

use std::sync::LazyLock;

use regex::Regex;

use crate::outcome::Color;

// White moves read "12. Nf3 {[%clk ...]}", black moves read "12... Nc6 {[%clk ...]}"
static WHITE_CLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^.]\.\s[^\[]+\[%clk\s([0-9:.]+)\]").unwrap());
static BLACK_CLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.\.\.\s[^\[]+\[%clk\s([0-9:.]+)\]").unwrap());

/// Parse `h:mm:ss(.f)` or `m:ss(.f)` into seconds.
pub fn parse_clock(value: &str) -> Option<f64> {
    let parts: Vec<f64> = value
        .split(':')
        .map(|p| p.parse::<f64>())
        .collect::<Result<_, _>>()
        .ok()?;

    match parts.as_slice() {
        [m, s] => Some(m * 60.0 + s),
        [h, m, s] => Some(h * 3600.0 + m * 60.0 + s),
        _ => None,
    }
}

/// Remaining-clock readings (seconds) after each of `color`'s moves, in move order.
pub fn clock_readings(moves: &str, color: Color) -> Vec<f64> {
    let re = match color {
        Color::White => &*WHITE_CLOCK_RE,
        Color::Black => &*BLACK_CLOCK_RE,
    };

    re.captures_iter(moves)
        .filter_map(|cap| parse_clock(cap.get(1)?.as_str()))
        .collect()
}

/// Average seconds spent per move by `color`.
///
/// Only consecutive readings where the clock went down count; increments and
/// garbled readings that make the clock go up are dropped.
pub fn average_time_per_move(moves: &str, color: Color) -> Option<f64> {
    let readings = clock_readings(moves, color);
    if readings.len() < 2 {
        return None;
    }

    let spent: Vec<f64> = readings
        .windows(2)
        .filter(|w| w[0] > w[1])
        .map(|w| w[0] - w[1])
        .collect();

    if spent.is_empty() {
        None
    } else {
        Some(spent.iter().sum::<f64>() / spent.len() as f64)
    }
}
