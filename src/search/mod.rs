//! Adversarial search over any `RulesEngine`.
//!
//! ## Routines
//!
//! - `minimax`: exhaustive, no pruning. Used for Tic-Tac-Toe.
//! - `alpha_beta`: same values as minimax with pruning and an optional
//!   ply limit. Used for Othello with `OthelloHeuristic` at the cutoff.
//!
//! Both search from the point of view of one side (`perspective`): that side
//! maximizes, the other minimizes. A side to move with no legal action passes.
//!
//! ## Evaluators
//!
//! Leaves are scored by an `Evaluator`. `TerminalUtility` gives +1/-1/0 for
//! finished games and 0 otherwise, which is exact for games searched to the end.

mod alpha_beta;
mod config;
mod heuristic;
mod minimax;

pub use alpha_beta::alpha_beta;
pub use config::{AlphaBetaConfig, GreedyConfig};
pub use heuristic::{coin_parity, corner_control, mobility, OthelloHeuristic};
pub use minimax::minimax;

use crate::core::Side;
use crate::rules::{GameResult, RulesEngine};

/// Scores a position for one side. Larger is better for `perspective`.
pub trait Evaluator<E: RulesEngine> {
    fn evaluate(&self, rules: &E, position: &E::Position, perspective: Side) -> i32;
}

/// +1 for a won game, -1 for a lost one, 0 for a draw or an unfinished game.
#[derive(Clone, Copy, Debug, Default)]
pub struct TerminalUtility;

impl<E: RulesEngine> Evaluator<E> for TerminalUtility {
    fn evaluate(&self, rules: &E, position: &E::Position, perspective: Side) -> i32 {
        match rules.is_terminal(position) {
            Some(GameResult::Winner(side)) if side == perspective => 1,
            Some(GameResult::Winner(_)) => -1,
            Some(GameResult::Draw) | None => 0,
        }
    }
}

/// Best root action with its backed-up value.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchOutcome<A> {
    pub action: A,
    pub value: i32,

    /// Positions visited, root included.
    pub nodes: u64,
}

/// What the side to move can do at an interior node.
pub(crate) enum Step<E: RulesEngine> {
    /// Score the node as a leaf.
    Leaf,
    /// `side` chooses among `actions`.
    Choose { side: Side, actions: Vec<E::Action> },
    /// The side to move cannot; play continues from `position`.
    Pass { position: E::Position },
}

/// Classify `position` for the search routines.
pub(crate) fn step<E: RulesEngine>(rules: &E, position: &E::Position) -> Step<E> {
    if rules.is_terminal(position).is_some() {
        return Step::Leaf;
    }
    let Some(side) = rules.to_move(position) else {
        return Step::Leaf;
    };
    let actions = rules.legal_actions(position, side);
    if !actions.is_empty() {
        return Step::Choose { side, actions };
    }
    let passed = rules.pass(position);
    if rules.legal_actions(&passed, side.opponent()).is_empty() {
        // Neither side can move but the rules did not call it over.
        return Step::Leaf;
    }
    Step::Pass { position: passed }
}
