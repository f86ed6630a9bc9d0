//! Core types shared by every game: sides, cells, move records, RNG and
//! match configuration.

pub mod action;
pub mod cell;
pub mod config;
pub mod player;
pub mod rng;

pub use action::MoveRecord;
pub use cell::Cell;
pub use config::{GameKind, MatchConfig, SeatConfig, StrategyKind};
pub use player::{MatchResult, Outcome, Side, Winner};
pub use rng::GameRng;
