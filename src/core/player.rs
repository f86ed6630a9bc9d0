//! Sides, winners and match results.
//!
//! ## Side
//!
//! Every game here is two-player: `Home` moves first and plays the `X` mark,
//! `Away` plays `O`. On the wire a side is its index (0 or 1) and an unknown
//! turn is `-1`.
//!
//! ## Winner / MatchResult / Outcome
//!
//! `Winner` is the authoritative code kept by a game instance. `MatchResult`
//! is what gets posted to players at the end (`H`, `A`, `T`), and `Outcome`
//! is that result seen from one side.

use serde::{Deserialize, Serialize};

/// One of the two seats at the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    Home,
    Away,
}

impl Side {
    /// Both sides, home first.
    pub const ALL: [Side; 2] = [Side::Home, Side::Away];

    /// Wire index (0 = Home, 1 = Away).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::Home => 0,
            Side::Away => 1,
        }
    }

    /// Side for a wire index, `None` for anything but 0 or 1.
    #[must_use]
    pub fn from_index(index: i64) -> Option<Side> {
        match index {
            0 => Some(Side::Home),
            1 => Some(Side::Away),
            _ => None,
        }
    }

    #[must_use]
    pub const fn opponent(self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }

    /// Encode an optional turn owner the way state strings carry it.
    #[must_use]
    pub fn turn_code(turn: Option<Side>) -> i64 {
        turn.map_or(-1, |side| side.index() as i64)
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Home => f.write_str("Home"),
            Side::Away => f.write_str("Away"),
        }
    }
}

/// Winner code of a game instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winner {
    Home,
    Away,
    Tie,
    /// Ended without a result (aborted or forfeited with no winner known).
    Aborted,
    NotFinished,
}

impl Winner {
    /// Numeric code: 0=Home, 1=Away, -1=Tie, -2=Aborted, -3=Not finished.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Winner::Home => 0,
            Winner::Away => 1,
            Winner::Tie => -1,
            Winner::Aborted => -2,
            Winner::NotFinished => -3,
        }
    }

    #[must_use]
    pub const fn side(side: Side) -> Winner {
        match side {
            Side::Home => Winner::Home,
            Side::Away => Winner::Away,
        }
    }

    /// Result to post to the players. Anything without a winning side is a tie.
    #[must_use]
    pub const fn match_result(self) -> MatchResult {
        match self {
            Winner::Home => MatchResult::HomeWin,
            Winner::Away => MatchResult::AwayWin,
            _ => MatchResult::Tie,
        }
    }
}

/// Final result posted to both players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchResult {
    HomeWin,
    AwayWin,
    Tie,
}

impl MatchResult {
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            MatchResult::HomeWin => 'H',
            MatchResult::AwayWin => 'A',
            MatchResult::Tie => 'T',
        }
    }

    #[must_use]
    pub fn from_char(c: char) -> Option<MatchResult> {
        match c {
            'H' | 'h' => Some(MatchResult::HomeWin),
            'A' | 'a' => Some(MatchResult::AwayWin),
            'T' | 't' => Some(MatchResult::Tie),
            _ => None,
        }
    }

    /// The result as seen by `side`.
    #[must_use]
    pub fn outcome_for(self, side: Side) -> Outcome {
        match (self, side) {
            (MatchResult::Tie, _) => Outcome::Tie,
            (MatchResult::HomeWin, Side::Home) | (MatchResult::AwayWin, Side::Away) => Outcome::Win,
            _ => Outcome::Loss,
        }
    }
}

impl std::fmt::Display for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A finished game from one side's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
    Tie,
}

impl Outcome {
    /// Target value blended into experience scores.
    #[must_use]
    pub const fn value(self) -> f64 {
        match self {
            Outcome::Win => 1.0,
            Outcome::Loss => 0.0,
            Outcome::Tie => 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_basics() {
        assert_eq!(Side::Home.index(), 0);
        assert_eq!(Side::Away.index(), 1);
        assert_eq!(Side::Home.opponent(), Side::Away);
        assert_eq!(Side::from_index(1), Some(Side::Away));
        assert_eq!(Side::from_index(-1), None);
        assert_eq!(Side::turn_code(None), -1);
        assert_eq!(format!("{}", Side::Away), "Away");
    }

    #[test]
    fn test_winner_codes() {
        assert_eq!(Winner::Home.code(), 0);
        assert_eq!(Winner::Away.code(), 1);
        assert_eq!(Winner::Tie.code(), -1);
        assert_eq!(Winner::Aborted.code(), -2);
        assert_eq!(Winner::NotFinished.code(), -3);
        assert_eq!(Winner::Aborted.match_result(), MatchResult::Tie);
    }

    #[test]
    fn test_outcome_for_each_side() {
        assert_eq!(MatchResult::HomeWin.outcome_for(Side::Home), Outcome::Win);
        assert_eq!(MatchResult::HomeWin.outcome_for(Side::Away), Outcome::Loss);
        assert_eq!(MatchResult::AwayWin.outcome_for(Side::Away), Outcome::Win);
        assert_eq!(MatchResult::Tie.outcome_for(Side::Home), Outcome::Tie);
        assert_eq!(MatchResult::from_char('T'), Some(MatchResult::Tie));
        assert_eq!(MatchResult::from_char('x'), None);
    }

    #[test]
    fn test_side_serialization() {
        let json = serde_json::to_string(&Side::Away).unwrap();
        let side: Side = serde_json::from_str(&json).unwrap();
        assert_eq!(side, Side::Away);
    }
}
