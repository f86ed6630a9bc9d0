//! Game implementations.
//!
//! Each game is a `RulesEngine` with its own position and action types:
//!
//! - `nim`: misère Nim over any number of piles
//! - `tictactoe`: the 3×3 game
//! - `othello`: Othello/Reversi on any even board from 4×4 to 26×26

pub mod nim;
pub mod othello;
pub mod tictactoe;

pub use nim::{NimAction, NimPosition, NimRules};
pub use othello::{OthelloAction, OthelloPosition, OthelloRules};
pub use tictactoe::{TicTacToeAction, TicTacToePosition, TicTacToeRules};

use crate::core::Side;
use crate::error::{Error, Result};

/// Parse the leading turn field of a state string (`0`, `1` or `-1`).
pub(crate) fn parse_turn(state: &str, field: Option<&str>) -> Result<Option<Side>> {
    let field = field.map(str::trim).unwrap_or_default();
    let code = field
        .parse::<i64>()
        .map_err(|_| Error::state_format(state, format!("bad turn '{field}'")))?;
    match code {
        -1 => Ok(None),
        _ => Side::from_index(code)
            .map(Some)
            .ok_or_else(|| Error::state_format(state, format!("turn {code} is not 0, 1 or -1"))),
    }
}
