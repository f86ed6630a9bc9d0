//! Rules engine trait for game implementations.
//!
//! Games implement `RulesEngine` to define:
//! - Legal actions for each position
//! - How actions produce new positions
//! - Win/loss conditions and scoring
//!
//! Strategies, search and drivers call into `RulesEngine` but never
//! interpret game-specific concepts directly.

pub mod engine;

pub use engine::{GameResult, RulesEngine, Scoreboard};
