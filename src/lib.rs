//! # tabletop-ai
//!
//! A two-player board game engine with search-based AI.
//!
//! ## Design Principles
//!
//! 1. **One Rules Trait**: Nim, Tic-Tac-Toe and Othello all implement
//!    `RulesEngine`. Search, strategies and drivers only talk to the trait.
//!
//! 2. **Value Positions**: Positions are plain values; applying a move
//!    returns a new one. Othello boards use `im-rs` vectors so search
//!    snapshots are cheap.
//!
//! 3. **Explicit Randomness**: Randomized strategies take a seeded `GameRng`,
//!    so every series can be replayed.
//!
//! ## Architecture
//!
//! - **Referee and Seats**: A match has one authoritative game instance and
//!   one client copy per seat. Moves flow from a seat's strategy to the
//!   referee as protocol lines; state flows back to the seats.
//!
//! - **Learning**: Strategies that learn keep an experience table
//!   (`key#wins-losses-ties#score`) that is updated after each game and
//!   saved when the series ends.
//!
//! ## Modules
//!
//! - `core`: Sides, cells, results, move records, RNG, match configuration
//! - `rules`: `RulesEngine` trait
//! - `games`: Nim, Tic-Tac-Toe and Othello rules
//! - `search`: Minimax, alpha-beta and the Othello heuristic
//! - `experience`: Experience records, store and storage backends
//! - `strategy`: Move-choosing strategies for each seat
//! - `protocol`: Line protocol messages
//! - `session`: Game instances, the match driver and the protocol client

pub mod core;
pub mod error;
pub mod experience;
pub mod games;
pub mod protocol;
pub mod rules;
pub mod search;
pub mod session;
pub mod strategy;

// Re-export commonly used types
pub use crate::core::{
    Cell, GameKind, GameRng, MatchConfig, MatchResult, MoveRecord, Outcome, SeatConfig, Side, StrategyKind, Winner,
};

pub use crate::error::{Error, IllegalReason, Result};

pub use crate::rules::{GameResult, RulesEngine, Scoreboard};

pub use crate::games::{
    NimAction, NimPosition, NimRules, OthelloAction, OthelloPosition, OthelloRules, TicTacToeAction,
    TicTacToePosition, TicTacToeRules,
};

pub use crate::search::{alpha_beta, minimax, AlphaBetaConfig, Evaluator, GreedyConfig, OthelloHeuristic, SearchOutcome};

pub use crate::experience::{ExperienceStorage, ExperienceStore, FileStorage, InMemoryStorage, Record};

pub use crate::strategy::{
    ExactMinimax, HeuristicAlphaBeta, LearnedGreedy, NimClosedForm, NoStrategy, Strategy, StrategyFactory,
};

pub use crate::protocol::{GameMessage, Message};

pub use crate::session::{
    run_configured, ClientSession, GameInstance, MatchRunner, MoveSource, ScriptedMoves, SeriesSummary, SharedGame,
    StatusReporter,
};
