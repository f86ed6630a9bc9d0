//! Tic-Tac-Toe.
//!
//! Cells are numbered 0-8 row by row. Home plays `X` and moves first.
//! State strings are `turn,c0,...,c8`, moves are the cell number.

mod game;

pub use game::{TicTacToeAction, TicTacToePosition, TicTacToeRules, CELLS, LINES};
