//! Othello (Reversi) on rectangular boards.
//!
//! ## Rules
//!
//! - The middle four squares start as a cross: `O X` over `X O`
//! - Home plays `X` and moves first
//! - A placement must sandwich at least one run of opposing discs against
//!   one of your own; every sandwiched run flips
//! - A side with no legal placement is skipped
//! - The game ends when neither side can place; most discs wins
//!
//! State strings are `turn,rows,cols,c0,c1,...` in row-major order, moves
//! are the row number followed by the column letter (`2d`).

mod board;
mod game;

pub use board::{Board, Flips, DIRECTIONS};
pub use game::{OthelloAction, OthelloPosition, OthelloRules, MAX_DIMENSION, MIN_DIMENSION};

/// Column letter for a column index (0 → `a`).
#[must_use]
pub fn column_letter(col: usize) -> char {
    u8::try_from(col)
        .ok()
        .filter(|&c| c < 26)
        .map_or('?', |c| char::from(b'a' + c))
}

/// Column index for a letter, either case.
#[must_use]
pub fn column_index(letter: char) -> Option<usize> {
    letter
        .is_ascii_alphabetic()
        .then(|| usize::from(letter.to_ascii_lowercase() as u8 - b'a'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letters() {
        assert_eq!(column_letter(0), 'a');
        assert_eq!(column_letter(25), 'z');
        assert_eq!(column_letter(26), '?');
        assert_eq!(column_index('d'), Some(3));
        assert_eq!(column_index('D'), Some(3));
        assert_eq!(column_index('3'), None);
    }
}
