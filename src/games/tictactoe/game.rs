//! Tic-Tac-Toe rules.

use serde::{Deserialize, Serialize};

use crate::core::{Cell, Side};
use crate::error::{Error, IllegalReason, Result};
use crate::games::parse_turn;
use crate::rules::{GameResult, RulesEngine};

/// Number of cells on the board.
pub const CELLS: usize = 9;

/// The eight winning lines: rows, columns, diagonals.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// 3×3 board in row-major order plus the turn owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicTacToePosition {
    pub cells: [Cell; CELLS],
    pub turn: Option<Side>,
}

impl TicTacToePosition {
    /// Build from a 9-character picture such as `"XO-  X---"`.
    ///
    /// Returns `None` if the picture is not 9 cell characters.
    #[must_use]
    pub fn from_picture(picture: &str, turn: Option<Side>) -> Option<Self> {
        let mut cells = [Cell::Empty; CELLS];
        let mut chars = picture.chars();
        for cell in &mut cells {
            *cell = Cell::from_char(chars.next()?)?;
        }
        if chars.next().is_some() {
            return None;
        }
        Some(Self { cells, turn })
    }

    #[must_use]
    pub fn open_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.is_empty()).count()
    }

    /// Side holding a complete line, if any.
    #[must_use]
    pub fn line_owner(&self) -> Option<Side> {
        LINES.iter().find_map(|&[a, b, c]| {
            let owner = self.cells[a].owner()?;
            (self.cells[b] == self.cells[a] && self.cells[c] == self.cells[a]).then_some(owner)
        })
    }
}

/// Place a mark on cell 0-8.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicTacToeAction(pub usize);

#[derive(Clone, Copy, Debug, Default)]
pub struct TicTacToeRules;

impl TicTacToeRules {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RulesEngine for TicTacToeRules {
    type Position = TicTacToePosition;
    type Action = TicTacToeAction;

    fn name(&self) -> &'static str {
        "tictactoe"
    }

    fn initial_position(&self) -> TicTacToePosition {
        TicTacToePosition {
            cells: [Cell::Empty; CELLS],
            turn: Some(Side::Home),
        }
    }

    fn to_move(&self, position: &TicTacToePosition) -> Option<Side> {
        position.turn
    }

    fn legal_actions(&self, position: &TicTacToePosition, side: Side) -> Vec<TicTacToeAction> {
        if position.turn != Some(side) || self.is_terminal(position).is_some() {
            return Vec::new();
        }
        (0..CELLS)
            .filter(|&i| position.cells[i].is_empty())
            .map(TicTacToeAction)
            .collect()
    }

    fn apply(&self, position: &TicTacToePosition, side: Side, action: &TicTacToeAction) -> Result<TicTacToePosition> {
        let illegal = |reason: IllegalReason| Error::IllegalMove {
            side,
            action: action.0.to_string(),
            reason,
        };

        if self.is_terminal(position).is_some() {
            return Err(illegal(IllegalReason::GameOver));
        }
        if position.turn != Some(side) {
            return Err(illegal(IllegalReason::WrongTurn));
        }
        let cell = position
            .cells
            .get(action.0)
            .ok_or_else(|| illegal(IllegalReason::OutOfRange))?;
        if !cell.is_empty() {
            return Err(illegal(IllegalReason::Occupied));
        }

        let mut next = *position;
        next.cells[action.0] = Cell::of(side);
        next.turn = Some(side.opponent());
        Ok(next)
    }

    fn pass(&self, position: &TicTacToePosition) -> TicTacToePosition {
        TicTacToePosition {
            turn: position.turn.map(Side::opponent),
            ..*position
        }
    }

    fn is_terminal(&self, position: &TicTacToePosition) -> Option<GameResult> {
        if let Some(side) = position.line_owner() {
            return Some(GameResult::Winner(side));
        }
        (position.open_cells() == 0).then_some(GameResult::Draw)
    }

    fn serialize_position(&self, position: &TicTacToePosition) -> String {
        let mut out = Side::turn_code(position.turn).to_string();
        for cell in &position.cells {
            out.push(',');
            out.push(cell.to_char());
        }
        out
    }

    fn parse_position(&self, text: &str) -> Result<TicTacToePosition> {
        // Cells may be spaces, so the text is not trimmed.
        let mut fields = text.trim_end_matches(['\r', '\n']).split(',');
        let turn = parse_turn(text, fields.next())?;

        let mut cells = [Cell::Empty; CELLS];
        for (i, cell) in cells.iter_mut().enumerate() {
            let field = fields
                .next()
                .ok_or_else(|| Error::state_format(text, format!("expected {CELLS} cells, found {i}")))?;
            *cell = Cell::from_field(field)
                .ok_or_else(|| Error::state_format(text, format!("bad cell '{field}'")))?;
        }
        if fields.next().is_some() {
            return Err(Error::state_format(text, format!("more than {CELLS} cells")));
        }
        Ok(TicTacToePosition { cells, turn })
    }

    fn format_action(&self, action: &TicTacToeAction) -> String {
        action.0.to_string()
    }

    fn parse_action(&self, text: &str) -> Result<TicTacToeAction> {
        text.trim()
            .parse::<usize>()
            .map(TicTacToeAction)
            .map_err(|_| Error::move_format(text, "expected a cell number 0-8"))
    }

    fn position_key(&self, position: &TicTacToePosition) -> String {
        position.cells.iter().map(|c| c.key_char()).collect()
    }

    fn fallback_action() -> TicTacToeAction {
        TicTacToeAction(0)
    }
}
