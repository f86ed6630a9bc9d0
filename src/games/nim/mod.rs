//! Misère Nim.
//!
//! - A row of piles, `3,5,7` unless configured otherwise
//! - On your turn remove at least one object from a single pile
//! - Whoever removes the last object loses
//!
//! State strings are `turn,p0,p1,...`, moves are `pile,count`.

mod game;

pub use game::{NimAction, NimPosition, NimRules, Piles, DEFAULT_PILES};
