use chess_core::{GameRecord, Outcome};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LongestStreaks {
    pub win: usize,
    pub loss: usize,
    pub draw: usize,
}

impl LongestStreaks {
    fn record(&mut self, outcome: Outcome, length: usize) {
        let slot = match outcome {
            Outcome::Win => &mut self.win,
            Outcome::Loss => &mut self.loss,
            Outcome::Draw => &mut self.draw,
            Outcome::Unknown => return,
        };
        *slot = (*slot).max(length);
    }
}

/// Longest run of consecutive wins, losses and draws in chronological order.
/// Games are stably sorted by end time first; an Unknown result ends a run.
pub fn longest_streaks(records: &[GameRecord]) -> LongestStreaks {
    let mut ordered: Vec<&GameRecord> = records.iter().collect();
    ordered.sort_by_key(|r| r.end_time);

    let mut longest = LongestStreaks::default();
    let mut current: Option<(Outcome, usize)> = None;

    for r in ordered {
        current = match current {
            Some((kind, n)) if kind == r.result => Some((kind, n + 1)),
            Some((kind, n)) => {
                longest.record(kind, n);
                Some((r.result, 1))
            }
            None => Some((r.result, 1)),
        };
    }
    if let Some((kind, n)) = current {
        longest.record(kind, n);
    }
    longest
}
