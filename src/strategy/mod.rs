//! Decision strategies: who picks the moves for a seat.
//!
//! A strategy is attached to one side of one game at a time. The game
//! instance asks it for a move whenever that side is to play, then posts the
//! final result so learning strategies can update their experience. At the
//! end of a series `on_shutdown` gives them a chance to persist it.
//!
//! ## Variants
//!
//! | Strategy | Game | Notes |
//! |---|---|---|
//! | `NoStrategy` | any | Human seat, never supplies a move |
//! | `NimClosedForm` | Nim | Nim-sum play, random when losing |
//! | `LearnedGreedy` | Tic-Tac-Toe | Experience-scored one-ply lookahead |
//! | `ExactMinimax` | any | Full-depth minimax |
//! | `HeuristicAlphaBeta` | Othello | Depth-limited alpha-beta |
//!
//! A strategy that cannot compute a move (not attached, nothing legal) logs
//! the error and answers with the game's fallback move, leaving the
//! authoritative instance to reject it.

mod alpha_beta;
mod greedy;
mod learning;
mod minimax;
mod nim;

pub use alpha_beta::HeuristicAlphaBeta;
pub use greedy::LearnedGreedy;
pub use learning::Learning;
pub use minimax::ExactMinimax;
pub use nim::{closed_form_move, NimClosedForm};

use log::error;

use crate::core::{MatchResult, Side};
use crate::error::{Error, Result};
use crate::rules::RulesEngine;

/// The game and side a strategy is currently playing.
#[derive(Clone, Debug)]
pub struct Attachment<E> {
    pub rules: E,
    pub side: Side,
}

/// Move selection for one seat.
pub trait Strategy<E: RulesEngine>: Send {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Start playing `side` of a game under `rules`.
    fn attach(&mut self, rules: &E, side: Side);

    /// Pick a move for the attached side.
    ///
    /// `None` only from strategies that never move on their own.
    fn choose_move(&mut self, position: &E::Position) -> Option<E::Action>;

    /// The game this strategy was attached to has ended.
    fn on_result(&mut self, _result: MatchResult) {}

    /// The series is over; persist anything worth keeping.
    fn on_shutdown(&mut self) -> Result<()> {
        Ok(())
    }

    /// False for seats whose moves come from elsewhere (humans).
    fn is_automated(&self) -> bool {
        true
    }
}

/// Builds fresh strategies, e.g. after a forfeit leaves one in an unknown state.
pub type StrategyFactory<E> = Box<dyn FnMut() -> Result<Box<dyn Strategy<E>>> + Send>;

/// Unwrap a computed move or log the failure and fall back.
pub(crate) fn or_fallback<E: RulesEngine>(name: &str, computed: Result<E::Action>) -> E::Action {
    computed.unwrap_or_else(|err| {
        error!("{} could not choose a move: {}", name, err);
        E::fallback_action()
    })
}

/// Attachment or `NotAttached`.
pub(crate) fn attached<E>(attachment: &Option<Attachment<E>>) -> Result<&Attachment<E>> {
    attachment.as_ref().ok_or(Error::NotAttached)
}

/// A seat played by a person. Moves come from the driver's move source.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoStrategy;

impl<E: RulesEngine> Strategy<E> for NoStrategy {
    fn name(&self) -> &'static str {
        "human"
    }

    fn attach(&mut self, _rules: &E, _side: Side) {}

    fn choose_move(&mut self, _position: &E::Position) -> Option<E::Action> {
        None
    }

    fn is_automated(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{TicTacToeAction, TicTacToeRules};

    #[test]
    fn test_no_strategy_never_moves() {
        let rules = TicTacToeRules::new();
        let mut human = NoStrategy;
        Strategy::<TicTacToeRules>::attach(&mut human, &rules, Side::Home);

        assert!(Strategy::<TicTacToeRules>::choose_move(&mut human, &rules.initial_position()).is_none());
        assert!(!Strategy::<TicTacToeRules>::is_automated(&human));
    }

    #[test]
    fn test_fallback_on_error() {
        let action = or_fallback::<TicTacToeRules>("test", Err(Error::NotAttached));
        assert_eq!(action, TicTacToeAction(0));

        let action = or_fallback::<TicTacToeRules>("test", Ok(TicTacToeAction(5)));
        assert_eq!(action, TicTacToeAction(5));
    }
}
