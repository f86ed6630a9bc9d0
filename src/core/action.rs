//! Move history records.
//!
//! Each game defines its own action type; once applied by the authoritative
//! instance a move is recorded in its wire notation so histories from
//! different games look the same to drivers and logs.

use serde::{Deserialize, Serialize};

use super::player::Side;

/// One applied move, in wire notation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// The side that moved.
    pub side: Side,

    /// Move as sent on the wire (`2d`, `1,3`, `4`).
    pub notation: String,

    /// Ply number, starting at 1.
    pub ply: u32,
}

impl MoveRecord {
    #[must_use]
    pub fn new(side: Side, notation: impl Into<String>, ply: u32) -> Self {
        Self {
            side,
            notation: notation.into(),
            ply,
        }
    }
}

impl std::fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}. {} {}", self.ply, self.side, self.notation)
    }
}
