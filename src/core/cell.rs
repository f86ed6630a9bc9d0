//! Grid cells shared by Tic-Tac-Toe and Othello.

use serde::{Deserialize, Serialize};

use super::player::Side;

/// A cell on a grid board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Home,
    Away,
}

impl Cell {
    /// Mark placed by `side`.
    #[must_use]
    pub const fn of(side: Side) -> Cell {
        match side {
            Side::Home => Cell::Home,
            Side::Away => Cell::Away,
        }
    }

    #[must_use]
    pub const fn owner(self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::Home => Some(Side::Home),
            Cell::Away => Some(Side::Away),
        }
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Character used in state strings (empty is a space).
    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Home => 'X',
            Cell::Away => 'O',
        }
    }

    /// Character used in experience keys (empty is `-`).
    #[must_use]
    pub const fn key_char(self) -> char {
        match self {
            Cell::Empty => '-',
            cell => cell.to_char(),
        }
    }

    #[must_use]
    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            ' ' | '-' | '.' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::Home),
            'O' | 'o' => Some(Cell::Away),
            _ => None,
        }
    }

    /// Parse one comma-separated state field. An empty field is an empty cell.
    #[must_use]
    pub fn from_field(field: &str) -> Option<Cell> {
        match field.chars().next() {
            None => Some(Cell::Empty),
            Some(c) => Cell::from_char(c),
        }
    }
}
