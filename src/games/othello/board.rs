//! Othello board: an R×C grid on a persistent vector.
//!
//! `im::Vector` gives O(1) clones with structural sharing, so search can
//! keep a board per node without copying the whole grid.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Cell, Side};

/// The eight compass directions as (row, col) steps: N, S, W, E, NW, NE, SW, SE.
pub const DIRECTIONS: [(isize, isize); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Cell indices flipped by one placement.
pub type Flips = SmallVec<[usize; 16]>;

/// Row-major grid of cells.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vector<Cell>,
}

impl Board {
    /// An empty grid.
    #[must_use]
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: std::iter::repeat(Cell::Empty).take(rows * cols).collect(),
        }
    }

    /// Grid with the four opening discs in the middle.
    ///
    /// Both dimensions must be at least 2.
    #[must_use]
    pub fn opening(rows: usize, cols: usize) -> Self {
        let mut board = Self::empty(rows, cols);
        let (mr, mc) = (rows / 2, cols / 2);
        board.set(mr - 1, mc - 1, Cell::Away);
        board.set(mr - 1, mc, Cell::Home);
        board.set(mr, mc - 1, Cell::Home);
        board.set(mr, mc, Cell::Away);
        board
    }

    /// Build from row-major cells. `None` if the count does not match.
    #[must_use]
    pub fn from_cells(rows: usize, cols: usize, cells: impl IntoIterator<Item = Cell>) -> Option<Self> {
        let cells: Vector<Cell> = cells.into_iter().collect();
        (cells.len() == rows * cols).then_some(Self { rows, cols, cells })
    }

    /// Build from one string per row (`X`, `O`, `-`/`.`/space).
    #[must_use]
    pub fn from_rows(picture: &[&str]) -> Option<Self> {
        let rows = picture.len();
        let cols = picture.first().map_or(0, |row| row.chars().count());
        let cells = picture
            .iter()
            .flat_map(|row| row.chars().map(Cell::from_char))
            .collect::<Option<Vec<_>>>()?;
        Self::from_cells(rows, cols, cells)
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// Cell at (row, col), `None` off the board.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.in_bounds(row, col)
            .then(|| self.cells[row * self.cols + col])
    }

    /// Cell at (row, col). Callers guarantee the coordinate is on the board.
    #[must_use]
    pub fn at(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        let index = row * self.cols + col;
        self.cells.set(index, cell);
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    /// Number of cells holding `cell`.
    #[must_use]
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Step from (row, col) by (dr, dc), `None` when leaving the board.
    fn step(&self, row: usize, col: usize, dr: isize, dc: isize) -> Option<(usize, usize)> {
        let r = row.checked_add_signed(dr)?;
        let c = col.checked_add_signed(dc)?;
        self.in_bounds(r, c).then_some((r, c))
    }

    /// Opposing run flipped in one direction, empty if the direction does not qualify.
    fn run(&self, side: Side, row: usize, col: usize, (dr, dc): (isize, isize)) -> Flips {
        let own = Cell::of(side);
        let theirs = Cell::of(side.opponent());
        let mut run = Flips::new();
        let mut cursor = self.step(row, col, dr, dc);

        while let Some((r, c)) = cursor {
            match self.at(r, c) {
                cell if cell == theirs => run.push(r * self.cols + c),
                cell if cell == own => return run,
                _ => break,
            }
            cursor = self.step(r, c, dr, dc);
        }
        Flips::new()
    }

    /// Every cell `side` would flip by placing at (row, col).
    ///
    /// Empty when the target is occupied, off the board, or no direction qualifies.
    #[must_use]
    pub fn flips(&self, side: Side, row: usize, col: usize) -> Flips {
        if self.get(row, col) != Some(Cell::Empty) {
            return Flips::new();
        }
        DIRECTIONS
            .iter()
            .flat_map(|&dir| self.run(side, row, col, dir))
            .collect()
    }

    #[must_use]
    pub fn is_legal(&self, side: Side, row: usize, col: usize) -> bool {
        self.get(row, col) == Some(Cell::Empty)
            && DIRECTIONS
                .iter()
                .any(|&dir| !self.run(side, row, col, dir).is_empty())
    }

    /// Legal squares for `side` in row-major order.
    #[must_use]
    pub fn legal_moves(&self, side: Side) -> Vec<(usize, usize)> {
        (0..self.rows)
            .flat_map(|r| (0..self.cols).map(move |c| (r, c)))
            .filter(|&(r, c)| self.is_legal(side, r, c))
            .collect()
    }

    #[must_use]
    pub fn has_move(&self, side: Side) -> bool {
        (0..self.rows).any(|r| (0..self.cols).any(|c| self.is_legal(side, r, c)))
    }

    /// Board after `side` places at (row, col), `None` if nothing flips.
    #[must_use]
    pub fn place(&self, side: Side, row: usize, col: usize) -> Option<Board> {
        let flips = self.flips(side, row, col);
        if flips.is_empty() {
            return None;
        }
        let mark = Cell::of(side);
        let mut next = self.clone();
        for index in flips {
            next.cells.set(index, mark);
        }
        next.set(row, col, mark);
        Some(next)
    }
}

impl std::fmt::Display for Board {
    /// Text picture with row numbers and column letters.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let header: String = (0..self.cols)
            .map(|c| format!(" {}", super::column_letter(c)))
            .collect();
        writeln!(f, " {header}")?;
        for r in 0..self.rows {
            write!(f, "{r}")?;
            for c in 0..self.cols {
                write!(f, " {}", self.at(r, c).to_char())?;
            }
            writeln!(f, " {r}")?;
        }
        write!(f, " {header}")
    }
}
