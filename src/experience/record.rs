//! Win/loss/tie tally with a blended score.

use serde::{Deserialize, Serialize};

use crate::core::Outcome;

/// Blending rate applied to each new outcome.
pub const DEFAULT_ALPHA: f64 = 0.2;

/// Score of a record that has never been updated.
pub const INITIAL_SCORE: f64 = 0.5;

/// Experience for one key.
///
/// `score` moves toward the outcome value (1 win, 0 loss, 0.5 tie) by
/// `alpha` on every update and always lies in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub score: f64,
}

impl Default for Record {
    fn default() -> Self {
        Self {
            wins: 0,
            losses: 0,
            ties: 0,
            score: INITIAL_SCORE,
        }
    }
}

impl Record {
    #[must_use]
    pub const fn new(wins: u32, losses: u32, ties: u32, score: f64) -> Self {
        Self {
            wins,
            losses,
            ties,
            score,
        }
    }

    #[must_use]
    pub const fn games(&self) -> u32 {
        self.wins + self.losses + self.ties
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        (0.0..=1.0).contains(&self.score)
    }

    /// Count `outcome` and blend its value into the score.
    pub fn update(&mut self, outcome: Outcome, alpha: f64) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => self.losses += 1,
            Outcome::Tie => self.ties += 1,
        }
        self.score = self.score * (1.0 - alpha) + outcome.value() * alpha;
    }

    /// `key#wins-losses-ties#score`. The score keeps full precision.
    #[must_use]
    pub fn to_line(&self, key: &str) -> String {
        format!("{key}#{}-{}-{}#{:?}", self.wins, self.losses, self.ties, self.score)
    }

    /// Parse one line, splitting from the right so keys may contain `#`.
    #[must_use]
    pub fn parse_line(line: &str) -> Option<(&str, Record)> {
        let mut parts = line.rsplitn(3, '#');
        let score = parts.next()?.trim().parse::<f64>().ok()?;
        let tally = parts.next()?;
        let key = parts.next()?;
        if key.is_empty() {
            return None;
        }

        let mut counts = tally.split('-').map(|n| n.trim().parse::<u32>().ok());
        let wins = counts.next()??;
        let losses = counts.next()??;
        let ties = counts.next()??;
        if counts.next().is_some() {
            return None;
        }

        let record = Record::new(wins, losses, ties, score);
        record.is_valid().then_some((key, record))
    }
}
