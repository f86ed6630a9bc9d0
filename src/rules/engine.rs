//! Rules engine trait for game implementations.
//!
//! Games implement `RulesEngine` to define their rules:
//! - What actions are legal
//! - How actions produce a new position
//! - Turn alternation, terminal detection and scoring
//! - The text forms used on the wire and in experience keys

use std::fmt::Debug;

use crate::core::Side;
use crate::error::Result;

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single winner.
    Winner(Side),
    /// Draw (no winner).
    Draw,
}

impl GameResult {
    /// Check if a side won.
    #[must_use]
    pub fn is_winner(&self, side: Side) -> bool {
        matches!(self, GameResult::Winner(s) if *s == side)
    }
}

/// Final per-side score of a game that keeps one (Othello piece counts).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub home: u32,
    pub away: u32,
}

impl Scoreboard {
    #[must_use]
    pub fn of(&self, side: Side) -> u32 {
        match side {
            Side::Home => self.home,
            Side::Away => self.away,
        }
    }
}

/// Rules engine trait.
///
/// Positions are values: `apply` and `pass` return new positions and never
/// touch their input, so a search can branch freely from any snapshot.
///
/// ## Implementation Notes
///
/// - `legal_actions`: return empty if the side can't move
/// - `apply`: reject anything `legal_actions` would not produce
/// - `is_terminal`: return None if the game continues
pub trait RulesEngine: Clone + Send + 'static {
    type Position: Clone + Debug + PartialEq + Send;
    type Action: Clone + Debug + PartialEq + Send;

    /// Short game name used in logs.
    fn name(&self) -> &'static str;

    /// Starting position, Home to move.
    fn initial_position(&self) -> Self::Position;

    /// Whose turn it is, `None` if unknown.
    fn to_move(&self, position: &Self::Position) -> Option<Side>;

    /// All actions `side` may take on `position`.
    fn legal_actions(&self, position: &Self::Position, side: Side) -> Vec<Self::Action>;

    /// Apply `action` for `side`, failing with `IllegalMove` if it is not legal.
    fn apply(&self, position: &Self::Position, side: Side, action: &Self::Action) -> Result<Self::Position>;

    /// Hand the turn to the other side without moving.
    fn pass(&self, position: &Self::Position) -> Self::Position;

    /// Check if the game is over.
    fn is_terminal(&self, position: &Self::Position) -> Option<GameResult>;

    /// Per-side score; `forfeit_winner` is set when the game ended by forfeit.
    fn score(&self, _position: &Self::Position, _forfeit_winner: Option<Side>) -> Option<Scoreboard> {
        None
    }

    /// Comma-delimited state string starting with the turn code.
    fn serialize_position(&self, position: &Self::Position) -> String;

    /// Inverse of `serialize_position`; fails with `StateFormat`.
    fn parse_position(&self, text: &str) -> Result<Self::Position>;

    /// Wire notation of an action.
    fn format_action(&self, action: &Self::Action) -> String;

    /// Inverse of `format_action`; fails with `MoveFormat`.
    fn parse_action(&self, text: &str) -> Result<Self::Action>;

    /// Single-token key of a position, used by experience stores.
    fn position_key(&self, position: &Self::Position) -> String;

    /// Move returned when a strategy cannot compute one.
    fn fallback_action() -> Self::Action;

    // === Convenience Methods ===

    /// Legal actions for whoever is to move.
    fn actions_to_move(&self, position: &Self::Position) -> Vec<Self::Action> {
        self.to_move(position)
            .map(|side| self.legal_actions(position, side))
            .unwrap_or_default()
    }
}
