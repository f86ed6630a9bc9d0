//! Othello position evaluation.
//!
//! Three terms, each scaled into a fixed band and summed:
//!
//! - **Coin parity** (±25): disc difference over disc total.
//! - **Corner control** (±30): corners, the squares next to them and the
//!   squares two away, weighted by whether the corner is already held.
//! - **Mobility** (±25): legal squares, with squares next to a corner
//!   counting against the mover since they give the corner away.

use crate::core::{Cell, Side};
use crate::games::othello::{Board, OthelloPosition, OthelloRules};

use super::Evaluator;

const COIN_WEIGHT: i32 = 25;
const CORNER_WEIGHT: i32 = 30;
const MOBILITY_WEIGHT: i32 = 25;

/// Boards smaller than this have no distance-two squares distinct from the center.
const POTENTIAL_MIN_SIDE: usize = 6;

/// `weight * (own - opp) / (|own| + |opp|)`, 0 when both are 0.
fn scaled(weight: i32, own: i32, opp: i32) -> i32 {
    let total = own.abs() + opp.abs();
    if total == 0 {
        0
    } else {
        weight * (own - opp) / total
    }
}

/// Corners of the board, each with the step pointing inward.
fn corners(board: &Board) -> [(usize, usize, isize, isize); 4] {
    let (last_row, last_col) = (board.rows().saturating_sub(1), board.cols().saturating_sub(1));
    [
        (0, 0, 1, 1),
        (0, last_col, 1, -1),
        (last_row, 0, -1, 1),
        (last_row, last_col, -1, -1),
    ]
}

fn offset(origin: usize, step: isize, times: isize) -> usize {
    origin.wrapping_add_signed(step * times)
}

fn held(board: &Board, row: usize, col: usize, cell: Cell) -> bool {
    board.get(row, col) == Some(cell)
}

/// True if (row, col) touches a corner: the diagonal X-square or an edge C-square.
fn next_to_corner(board: &Board, row: usize, col: usize) -> bool {
    corners(board).iter().any(|&(cr, cc, dr, dc)| {
        (row, col) == (offset(cr, dr, 1), offset(cc, dc, 1))
            || (row, col) == (cr, offset(cc, dc, 1))
            || (row, col) == (offset(cr, dr, 1), cc)
    })
}

/// Disc difference term.
#[must_use]
pub fn coin_parity(board: &Board, side: Side) -> i32 {
    let own = board.count(Cell::of(side)) as i32;
    let opp = board.count(Cell::of(side.opponent())) as i32;
    scaled(COIN_WEIGHT, own, opp)
}

/// Corner term for one side before scaling.
fn corner_points(board: &Board, side: Side) -> i32 {
    let own = Cell::of(side);
    let with_potential = board.rows().min(board.cols()) >= POTENTIAL_MIN_SIDE;
    let mut points = 0;

    for (cr, cc, dr, dc) in corners(board) {
        let corner_ours = held(board, cr, cc, own);
        if corner_ours {
            points += 4;
        }
        // Squares next to the corner only pay off once the corner is ours.
        let risky = |penalty: i32| if corner_ours { 1 } else { -penalty };

        if held(board, offset(cr, dr, 1), offset(cc, dc, 1), own) {
            points += risky(4);
        }
        if held(board, cr, offset(cc, dc, 1), own) {
            points += risky(3);
        }
        if held(board, offset(cr, dr, 1), cc, own) {
            points += risky(3);
        }

        if with_potential {
            if held(board, cr, offset(cc, dc, 2), own) {
                points += 2;
            }
            if held(board, offset(cr, dr, 2), cc, own) {
                points += 2;
            }
            if held(board, offset(cr, dr, 2), offset(cc, dc, 2), own) {
                points += 1;
            }
        }
    }
    points
}

/// Corner control term.
#[must_use]
pub fn corner_control(board: &Board, side: Side) -> i32 {
    scaled(
        CORNER_WEIGHT,
        corner_points(board, side),
        corner_points(board, side.opponent()),
    )
}

/// Mobility points for one side before scaling.
fn mobility_points(board: &Board, side: Side) -> i32 {
    board
        .legal_moves(side)
        .into_iter()
        .map(|(r, c)| if next_to_corner(board, r, c) { -1 } else { 1 })
        .sum()
}

/// Mobility term.
#[must_use]
pub fn mobility(board: &Board, side: Side) -> i32 {
    scaled(
        MOBILITY_WEIGHT,
        mobility_points(board, side),
        mobility_points(board, side.opponent()),
    )
}

/// Sum of coin parity, corner control and mobility from the searching side's view.
#[derive(Clone, Copy, Debug, Default)]
pub struct OthelloHeuristic;

impl OthelloHeuristic {
    #[must_use]
    pub fn score(board: &Board, side: Side) -> i32 {
        coin_parity(board, side) + corner_control(board, side) + mobility(board, side)
    }
}

impl Evaluator<OthelloRules> for OthelloHeuristic {
    fn evaluate(&self, _rules: &OthelloRules, position: &OthelloPosition, perspective: Side) -> i32 {
        Self::score(&position.board, perspective)
    }
}
