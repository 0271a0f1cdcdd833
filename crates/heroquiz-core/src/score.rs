//! Per-widget score keeping.

use serde::{Deserialize, Serialize};

/// Answered/correct counters plus one lock per question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scoreboard {
    answered_flags: Vec<bool>,
    answered: usize,
    correct: usize,
}

/// Where the board stands after recording an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// More questions remain.
    Partial { answered: usize, total: usize },
    /// Every question is answered.
    Complete { correct: usize, total: usize },
}

impl Scoreboard {
    pub fn new(total: usize) -> Self {
        Self {
            answered_flags: vec![false; total],
            answered: 0,
            correct: 0,
        }
    }

    pub fn total(&self) -> usize {
        self.answered_flags.len()
    }

    pub fn answered(&self) -> usize {
        self.answered
    }

    pub fn correct(&self) -> usize {
        self.correct
    }

    pub fn is_answered(&self, question: usize) -> bool {
        self.answered_flags.get(question).copied().unwrap_or(false)
    }

    pub fn is_complete(&self) -> bool {
        self.answered == self.total()
    }

    /// Lock `question` and count the answer.
    ///
    /// Returns `None` when the question is already answered or does not
    /// exist; counters are untouched in that case.
    pub fn record(&mut self, question: usize, is_correct: bool) -> Option<Progress> {
        let flag = self.answered_flags.get_mut(question)?;
        if *flag {
            return None;
        }
        *flag = true;
        self.answered += 1;
        if is_correct {
            self.correct += 1;
        }

        let total = self.total();
        Some(if self.answered == total {
            Progress::Complete {
                correct: self.correct,
                total,
            }
        } else {
            Progress::Partial {
                answered: self.answered,
                total,
            }
        })
    }

    pub fn percent(&self) -> u32 {
        percent(self.correct, self.total())
    }
}

/// `part / total` as a rounded percentage; 0 when `total` is 0.
pub fn percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((part as f64 / total as f64) * 100.0).round() as u32
}

/// Qualitative band for a checklist percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Legendary,
    Strong,
    Nice,
    Learning,
}

impl Tier {
    pub fn from_percent(percent: u32) -> Self {
        match percent {
            90.. => Tier::Legendary,
            75..=89 => Tier::Strong,
            60..=74 => Tier::Nice,
            _ => Tier::Learning,
        }
    }
}

/// Serializable snapshot of one widget's score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCard {
    /// Container id of the widget.
    pub widget: String,
    /// Widget kind, e.g. "true_false".
    pub kind: String,
    pub total: usize,
    pub answered: usize,
    pub correct: usize,
    pub percent: u32,
    /// Whether the widget reached its final summary.
    pub finished: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_counts_once_per_question() {
        let mut board = Scoreboard::new(2);
        assert_eq!(
            board.record(0, true),
            Some(Progress::Partial {
                answered: 1,
                total: 2
            })
        );
        assert_eq!(board.record(0, false), None);
        assert_eq!(board.answered(), 1);
        assert_eq!(board.correct(), 1);

        assert_eq!(
            board.record(1, false),
            Some(Progress::Complete {
                correct: 1,
                total: 2
            })
        );
        assert!(board.is_complete());
        assert_eq!(board.percent(), 50);
    }

    #[test]
    fn out_of_range_question_is_ignored() {
        let mut board = Scoreboard::new(1);
        assert_eq!(board.record(5, true), None);
        assert_eq!(board.answered(), 0);
        assert!(!board.is_answered(5));
    }

    #[test]
    fn answered_never_exceeds_total() {
        let mut board = Scoreboard::new(3);
        for round in 0..4 {
            for q in 0..5 {
                board.record(q, round % 2 == 0);
            }
        }
        assert_eq!(board.answered(), 3);
        assert_eq!(board.correct(), 3);
    }

    #[test]
    fn percent_guards_zero_total() {
        assert_eq!(percent(0, 0), 0);
        assert_eq!(Scoreboard::new(0).percent(), 0);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(1, 8), 13);
    }

    #[test]
    fn tier_bands() {
        assert_eq!(Tier::from_percent(100), Tier::Legendary);
        assert_eq!(Tier::from_percent(90), Tier::Legendary);
        assert_eq!(Tier::from_percent(89), Tier::Strong);
        assert_eq!(Tier::from_percent(75), Tier::Strong);
        assert_eq!(Tier::from_percent(74), Tier::Nice);
        assert_eq!(Tier::from_percent(60), Tier::Nice);
        assert_eq!(Tier::from_percent(59), Tier::Learning);
        assert_eq!(Tier::from_percent(0), Tier::Learning);
    }
}
