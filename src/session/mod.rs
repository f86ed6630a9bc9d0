//! Running games: instances, the offline driver and the protocol client.
//!
//! ## Pieces
//!
//! - `GameInstance`: one copy of a game, either the referee's or a seat's.
//!   Shared copies live behind a `parking_lot` mutex (`SharedGame`).
//! - `MatchRunner`: plays a series between two seats on one thread.
//! - `ClientSession`: reacts to server lines for one seat.
//! - `StatusReporter`: logs a shared game's state from a background thread.
//! - `run_configured`: builds and runs a series from a `MatchConfig`.

mod client;
mod driver;
mod instance;
mod reporter;
mod setup;

pub use client::ClientSession;
pub use driver::{GameSummary, MatchRunner, MoveSource, ScriptedMoves, SeriesSummary};
pub use instance::{GameInstance, SharedGame};
pub use reporter::StatusReporter;
pub use setup::{configured_runner, run_configured, strategy_factory, ConfiguredGame, StrategySettings};
