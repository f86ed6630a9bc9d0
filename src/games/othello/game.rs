//! Othello rules.

use serde::{Deserialize, Serialize};

use super::board::Board;
use super::{column_index, column_letter};
use crate::core::{Cell, Side};
use crate::error::{Error, IllegalReason, Result};
use crate::games::parse_turn;
use crate::rules::{GameResult, RulesEngine, Scoreboard};

/// Smallest supported board side.
pub const MIN_DIMENSION: usize = 4;

/// Largest supported board side (one column letter per column).
pub const MAX_DIMENSION: usize = 26;

/// Board plus the turn owner.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OthelloPosition {
    pub board: Board,
    pub turn: Option<Side>,
}

/// Place a disc at (row, col). Wire form is the row number then the column letter: `2d`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OthelloAction {
    pub row: usize,
    pub col: usize,
}

impl OthelloAction {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for OthelloAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.row, column_letter(self.col))
    }
}

/// Othello on an R×C board.
#[derive(Clone, Copy, Debug)]
pub struct OthelloRules {
    rows: usize,
    cols: usize,
}

impl Default for OthelloRules {
    fn default() -> Self {
        Self { rows: 8, cols: 8 }
    }
}

impl OthelloRules {
    /// Rules for an R×C board. Both sides must be even and within 4..=26.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        for (name, value) in [("rows", rows), ("cols", cols)] {
            if value % 2 != 0 || !(MIN_DIMENSION..=MAX_DIMENSION).contains(&value) {
                return Err(Error::invalid_config(format!(
                    "othello {name} must be even and between {MIN_DIMENSION} and {MAX_DIMENSION}, got {value}"
                )));
            }
        }
        Ok(Self { rows, cols })
    }

    /// Square board.
    pub fn square(size: usize) -> Result<Self> {
        Self::new(size, size)
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Disc counts with no forfeit adjustment.
    #[must_use]
    pub fn disc_counts(board: &Board) -> Scoreboard {
        Scoreboard {
            home: board.count(Cell::Home) as u32,
            away: board.count(Cell::Away) as u32,
        }
    }
}

impl RulesEngine for OthelloRules {
    type Position = OthelloPosition;
    type Action = OthelloAction;

    fn name(&self) -> &'static str {
        "othello"
    }

    fn initial_position(&self) -> OthelloPosition {
        OthelloPosition {
            board: Board::opening(self.rows, self.cols),
            turn: Some(Side::Home),
        }
    }

    fn to_move(&self, position: &OthelloPosition) -> Option<Side> {
        position.turn
    }

    fn legal_actions(&self, position: &OthelloPosition, side: Side) -> Vec<OthelloAction> {
        position
            .board
            .legal_moves(side)
            .into_iter()
            .map(|(row, col)| OthelloAction { row, col })
            .collect()
    }

    fn apply(&self, position: &OthelloPosition, side: Side, action: &OthelloAction) -> Result<OthelloPosition> {
        let illegal = |reason: IllegalReason| Error::IllegalMove {
            side,
            action: action.to_string(),
            reason,
        };

        if position.turn != Some(side) {
            return Err(illegal(IllegalReason::WrongTurn));
        }
        let board = &position.board;
        match board.get(action.row, action.col) {
            None => return Err(illegal(IllegalReason::OutOfRange)),
            Some(Cell::Empty) => {}
            Some(_) => return Err(illegal(IllegalReason::Occupied)),
        }
        let next = board.place(side, action.row, action.col).ok_or_else(|| {
            // A full stop with no move for either side is reported as game over.
            if self.is_terminal(position).is_some() {
                illegal(IllegalReason::GameOver)
            } else {
                illegal(IllegalReason::NoFlip)
            }
        })?;

        // The opponent moves next unless they have nothing to play.
        let turn = if next.has_move(side.opponent()) {
            side.opponent()
        } else {
            side
        };
        Ok(OthelloPosition {
            board: next,
            turn: Some(turn),
        })
    }

    fn pass(&self, position: &OthelloPosition) -> OthelloPosition {
        OthelloPosition {
            board: position.board.clone(),
            turn: position.turn.map(Side::opponent),
        }
    }

    fn is_terminal(&self, position: &OthelloPosition) -> Option<GameResult> {
        let board = &position.board;
        if board.has_move(Side::Home) || board.has_move(Side::Away) {
            return None;
        }
        let counts = Self::disc_counts(board);
        Some(match counts.home.cmp(&counts.away) {
            std::cmp::Ordering::Greater => GameResult::Winner(Side::Home),
            std::cmp::Ordering::Less => GameResult::Winner(Side::Away),
            std::cmp::Ordering::Equal => GameResult::Draw,
        })
    }

    /// Disc counts. A forfeit hands every empty square to the side that did
    /// not forfeit and keeps it strictly ahead.
    fn score(&self, position: &OthelloPosition, forfeit_winner: Option<Side>) -> Option<Scoreboard> {
        let board = &position.board;
        let mut counts = Self::disc_counts(board);
        if let Some(winner) = forfeit_winner {
            let empty = board.count(Cell::Empty) as u32;
            let (own, other) = match winner {
                Side::Home => (&mut counts.home, counts.away),
                Side::Away => (&mut counts.away, counts.home),
            };
            *own += empty;
            if *own <= other {
                *own = other + 1;
            }
        }
        Some(counts)
    }

    fn serialize_position(&self, position: &OthelloPosition) -> String {
        let board = &position.board;
        let mut out = format!(
            "{},{},{}",
            Side::turn_code(position.turn),
            board.rows(),
            board.cols()
        );
        for cell in board.cells() {
            out.push(',');
            out.push(cell.to_char());
        }
        out
    }

    fn parse_position(&self, text: &str) -> Result<OthelloPosition> {
        let mut fields = text.trim_end_matches(['\r', '\n']).split(',');
        let turn = parse_turn(text, fields.next())?;

        let mut dimension = |name: &str, expected: usize| -> Result<usize> {
            let field = fields.next().unwrap_or_default().trim();
            let value = field
                .parse::<usize>()
                .map_err(|_| Error::state_format(text, format!("bad {name} '{field}'")))?;
            if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&value) {
                return Err(Error::state_format(text, format!("{name} {value} out of range")));
            }
            if value % 2 != 0 {
                return Err(Error::state_format(text, format!("{name} {value} is odd")));
            }
            if value != expected {
                return Err(Error::state_format(
                    text,
                    format!("{name} {value} does not match this board ({expected})"),
                ));
            }
            Ok(value)
        };
        let rows = dimension("rows", self.rows)?;
        let cols = dimension("cols", self.cols)?;

        let cells = fields
            .map(|field| {
                Cell::from_field(field).ok_or_else(|| Error::state_format(text, format!("bad cell '{field}'")))
            })
            .collect::<Result<Vec<_>>>()?;
        let found = cells.len();
        let board = Board::from_cells(rows, cols, cells).ok_or_else(|| {
            Error::state_format(text, format!("expected {} cells, found {found}", rows * cols))
        })?;
        Ok(OthelloPosition { board, turn })
    }

    fn format_action(&self, action: &OthelloAction) -> String {
        action.to_string()
    }

    fn parse_action(&self, text: &str) -> Result<OthelloAction> {
        let trimmed = text.trim();
        let letter = trimmed
            .chars()
            .last()
            .ok_or_else(|| Error::move_format(text, "empty move"))?;
        let col = column_index(letter).ok_or_else(|| Error::move_format(text, "column must be a letter"))?;
        let row = trimmed[..trimmed.len() - letter.len_utf8()]
            .parse::<usize>()
            .map_err(|_| Error::move_format(text, "row must be a number"))?;
        Ok(OthelloAction { row, col })
    }

    fn position_key(&self, position: &OthelloPosition) -> String {
        position.board.cells().map(Cell::key_char).collect()
    }

    fn fallback_action() -> OthelloAction {
        OthelloAction::new(0, 0)
    }
}
