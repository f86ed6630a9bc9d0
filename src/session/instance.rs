//! A game being played, as seen by one seat or by the referee.

use std::sync::Arc;

use log::{debug, info, warn};
use parking_lot::Mutex;

use crate::core::{MatchResult, MoveRecord, Side, Winner};
use crate::error::{Error, IllegalReason, Result};
use crate::rules::{GameResult, RulesEngine, Scoreboard};
use crate::strategy::Strategy;

/// A game instance behind its own lock, shared with reporters and drivers.
pub type SharedGame<E> = Arc<Mutex<GameInstance<E>>>;

/// One copy of a game.
///
/// The authoritative copy (no seat) starts at the opening position, applies
/// moves and decides the winner. A client copy (one seat) has no position
/// until the first state arrives, and asks its strategy for moves.
pub struct GameInstance<E: RulesEngine> {
    rules: E,
    position: Option<E::Position>,
    seat: Option<Side>,
    strategy: Option<Box<dyn Strategy<E>>>,
    changed: bool,
    done: bool,
    winner: Winner,
    forfeit_winner: Option<Side>,
    history: Vec<MoveRecord>,
}

impl<E: RulesEngine> std::fmt::Debug for GameInstance<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameInstance")
            .field("game", &self.rules.name())
            .field("position", &self.position)
            .field("seat", &self.seat)
            .field("strategy", &self.strategy.as_ref().map(|s| s.name()))
            .field("done", &self.done)
            .field("winner", &self.winner)
            .finish()
    }
}

impl<E: RulesEngine> GameInstance<E> {
    /// The referee's copy, at the opening position.
    #[must_use]
    pub fn authoritative(rules: E) -> Self {
        let position = rules.initial_position();
        let mut game = Self {
            rules,
            position: Some(position),
            seat: None,
            strategy: None,
            changed: true,
            done: false,
            winner: Winner::NotFinished,
            forfeit_winner: None,
            history: Vec::new(),
        };
        game.refresh_result();
        game
    }

    /// A seat's copy with `strategy` attached to `seat`.
    #[must_use]
    pub fn client(rules: E, seat: Side, mut strategy: Box<dyn Strategy<E>>) -> Self {
        strategy.attach(&rules, seat);
        Self {
            rules,
            position: None,
            seat: Some(seat),
            strategy: Some(strategy),
            changed: false,
            done: false,
            winner: Winner::NotFinished,
            forfeit_winner: None,
            history: Vec::new(),
        }
    }

    /// Wrap in a lock for sharing.
    #[must_use]
    pub fn shared(self) -> SharedGame<E> {
        Arc::new(Mutex::new(self))
    }

    // === Accessors ===

    #[must_use]
    pub fn rules(&self) -> &E {
        &self.rules
    }

    #[must_use]
    pub fn position(&self) -> Option<&E::Position> {
        self.position.as_ref()
    }

    /// Seat of a client copy; `None` for the authoritative copy.
    #[must_use]
    pub fn seat(&self) -> Option<Side> {
        self.seat
    }

    /// Side to move, if known.
    #[must_use]
    pub fn turn(&self) -> Option<Side> {
        self.position.as_ref().and_then(|p| self.rules.to_move(p))
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.done
    }

    #[must_use]
    pub fn winner(&self) -> Winner {
        self.winner
    }

    /// Moves applied by this copy, oldest first.
    #[must_use]
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// False when the seat's moves must come from outside (a human).
    #[must_use]
    pub fn is_automated(&self) -> bool {
        self.strategy.as_ref().map_or(false, |s| s.is_automated())
    }

    /// Disc counts for games that keep score, with any forfeit applied.
    #[must_use]
    pub fn score(&self) -> Option<Scoreboard> {
        let position = self.position.as_ref()?;
        self.rules.score(position, self.forfeit_winner)
    }

    // === State transfer ===

    /// Replace the position with a serialized one.
    ///
    /// A malformed state is logged and leaves the prior position in place.
    pub fn apply_remote_state(&mut self, serialized: &str) -> Result<()> {
        match self.rules.parse_position(serialized) {
            Ok(position) => {
                self.position = Some(position);
                self.changed = true;
                self.refresh_result();
                Ok(())
            }
            Err(err) => {
                warn!("{} kept its state: {}", self.label(), err);
                Err(err)
            }
        }
    }

    /// Serialized position without touching the changed flag.
    #[must_use]
    pub fn current_state(&self) -> Option<String> {
        self.position.as_ref().map(|p| self.rules.serialize_position(p))
    }

    /// Serialized position if it changed since the last call, or always when forced.
    pub fn serialize_state(&mut self, force: bool) -> Option<String> {
        let position = self.position.as_ref()?;
        if !self.changed && !force {
            return None;
        }
        self.changed = false;
        Some(self.rules.serialize_position(position))
    }

    // === Play ===

    /// Ask the attached strategy for a move in wire notation.
    ///
    /// `None` when this is not a client copy, it is not our turn, the game is
    /// over, or the strategy does not move on its own.
    pub fn request_move(&mut self) -> Option<String> {
        let seat = self.seat?;
        let position = self.position.as_ref()?;
        if self.done || self.rules.to_move(position) != Some(seat) {
            return None;
        }
        let action = self.strategy.as_mut()?.choose_move(position)?;
        let notation = self.rules.format_action(&action);
        debug!("{} requests {}", self.label(), notation);
        Some(notation)
    }

    /// Parse and apply a move from `side`.
    ///
    /// Illegal or malformed moves leave the position untouched. A finished,
    /// forfeited or aborted game accepts no more moves.
    pub fn process_move(&mut self, side: Side, notation: &str) -> Result<()> {
        if self.done {
            return Err(Error::IllegalMove {
                side,
                action: notation.to_string(),
                reason: IllegalReason::GameOver,
            });
        }
        let position = self.position.as_ref().ok_or_else(|| Error::IllegalMove {
            side,
            action: notation.to_string(),
            reason: IllegalReason::WrongTurn,
        })?;
        let action = self.rules.parse_action(notation)?;
        let next = self.rules.apply(position, side, &action)?;

        let ply = self.history.len() as u32 + 1;
        self.history.push(MoveRecord::new(side, self.rules.format_action(&action), ply));
        self.position = Some(next);
        self.changed = true;
        self.refresh_result();
        Ok(())
    }

    /// End the game with `loser` forfeiting.
    pub fn forfeit(&mut self, loser: Side) {
        info!("{}: {} forfeits", self.label(), loser);
        self.done = true;
        self.winner = Winner::side(loser.opponent());
        self.forfeit_winner = Some(loser.opponent());
        self.changed = true;
    }

    /// End the game without a winner.
    pub fn abort(&mut self) {
        info!("{}: aborted", self.label());
        self.done = true;
        self.winner = Winner::Aborted;
        self.changed = true;
    }

    /// Post the final result to the attached strategy.
    pub fn notify_result(&mut self, result: MatchResult) {
        if let Some(strategy) = self.strategy.as_mut() {
            strategy.on_result(result);
        }
    }

    /// Detach the strategy so it can be attached to the next game.
    pub fn take_strategy(&mut self) -> Option<Box<dyn Strategy<E>>> {
        self.strategy.take()
    }

    fn refresh_result(&mut self) {
        // Forfeits and aborts are final.
        if self.forfeit_winner.is_some() || self.winner == Winner::Aborted {
            return;
        }
        let Some(position) = self.position.as_ref() else {
            return;
        };
        match self.rules.is_terminal(position) {
            Some(result) => {
                self.done = true;
                self.winner = match result {
                    GameResult::Winner(side) => Winner::side(side),
                    GameResult::Draw => Winner::Tie,
                };
            }
            None => {
                self.done = false;
                self.winner = Winner::NotFinished;
            }
        }
    }

    fn label(&self) -> String {
        match self.seat {
            Some(side) => format!("{} ({})", self.rules.name(), side),
            None => format!("{} (referee)", self.rules.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::nim::NimRules;
    use crate::games::tictactoe::TicTacToeRules;
    use crate::strategy::{ExactMinimax, NoStrategy};

    #[test]
    fn test_authoritative_applies_moves() {
        let mut game = GameInstance::authoritative(NimRules::default());
        assert_eq!(game.serialize_state(false).as_deref(), Some("0,3,5,7"));
        assert_eq!(game.serialize_state(false), None);
        assert_eq!(game.serialize_state(true).as_deref(), Some("0,3,5,7"));

        game.process_move(Side::Home, "0,1").unwrap();
        assert_eq!(game.serialize_state(false).as_deref(), Some("1,2,5,7"));
        assert_eq!(game.history()[0].to_string(), "1. Home 0,1");
        assert_eq!(game.turn(), Some(Side::Away));
    }

    #[test]
    fn test_illegal_move_leaves_state() {
        let mut game = GameInstance::authoritative(NimRules::default());
        game.serialize_state(false);

        assert!(matches!(game.process_move(Side::Away, "0,1"), Err(Error::IllegalMove { .. })));
        assert!(matches!(game.process_move(Side::Home, "zero"), Err(Error::MoveFormat { .. })));
        assert_eq!(game.serialize_state(false), None);
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_game_over_sets_winner() {
        let mut game = GameInstance::authoritative(NimRules::new(&[1]).unwrap());
        game.process_move(Side::Home, "0,1").unwrap();
        assert!(game.is_done());
        // Home took the last object.
        assert_eq!(game.winner(), Winner::Away);
    }

    #[test]
    fn test_client_requests_move_on_its_turn() {
        let rules = TicTacToeRules::new();
        let mut client = GameInstance::client(rules, Side::Away, Box::new(ExactMinimax::<TicTacToeRules>::new()));
        assert_eq!(client.request_move(), None);

        client.apply_remote_state("0,X, , , , , , , , ").unwrap();
        assert_eq!(client.request_move(), None);

        client.apply_remote_state("1,X, , , , , , , , ").unwrap();
        assert_eq!(client.request_move().as_deref(), Some("4"));
    }

    #[test]
    fn test_bad_state_keeps_prior_position() {
        let mut client = GameInstance::client(NimRules::default(), Side::Home, Box::new(NoStrategy));
        client.apply_remote_state("0,1,2").unwrap();
        assert!(client.apply_remote_state("banana").is_err());
        assert_eq!(client.serialize_state(true).as_deref(), Some("0,1,2"));
        assert!(!client.is_automated());
        assert_eq!(client.request_move(), None);
    }

    #[test]
    fn test_forfeit_and_abort() {
        let mut game = GameInstance::authoritative(TicTacToeRules::new());
        game.forfeit(Side::Home);
        assert!(game.is_done());
        assert_eq!(game.winner(), Winner::Away);

        let mut game = GameInstance::authoritative(TicTacToeRules::new());
        game.abort();
        assert_eq!(game.winner(), Winner::Aborted);
        assert_eq!(game.winner().match_result(), MatchResult::Tie);
    }

    #[test]
    fn test_ended_game_stays_ended() {
        let mut game = GameInstance::authoritative(NimRules::default());
        game.forfeit(Side::Home);

        let err = game.process_move(Side::Home, "0,1").unwrap_err();
        assert!(matches!(err, Error::IllegalMove { reason: IllegalReason::GameOver, .. }));
        assert!(game.history().is_empty());

        // A fresh state does not revive a forfeited game.
        game.apply_remote_state("0,3,5,7").unwrap();
        assert!(game.is_done());
        assert_eq!(game.winner(), Winner::Away);

        let mut game = GameInstance::authoritative(NimRules::default());
        game.abort();
        assert!(game.process_move(Side::Home, "0,1").is_err());
        game.apply_remote_state("1,1,1,1").unwrap();
        assert_eq!(game.winner(), Winner::Aborted);
    }
}
