//! Error types for the engine.

use std::fmt;

use thiserror::Error;

use crate::core::Side;

/// Why a move was rejected by a rules engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalReason {
    /// It is not the mover's turn (or the turn is unknown).
    WrongTurn,
    /// The game is already over.
    GameOver,
    /// The target cell already holds a mark.
    Occupied,
    /// Row, column, cell or pile index is outside the board.
    OutOfRange,
    /// Nim: count is zero or larger than the pile.
    InvalidCount,
    /// Othello: no direction yields a flip.
    NoFlip,
}

impl fmt::Display for IllegalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            IllegalReason::WrongTurn => "it is not this side's turn",
            IllegalReason::GameOver => "the game is already over",
            IllegalReason::Occupied => "the location is already taken",
            IllegalReason::OutOfRange => "the location is out of range",
            IllegalReason::InvalidCount => "the count must be between 1 and the pile size",
            IllegalReason::NoFlip => "the placement flips nothing",
        };
        f.write_str(text)
    }
}

/// Main error type for the crate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("illegal move '{action}' by {side}: {reason}")]
    IllegalMove {
        side: Side,
        action: String,
        reason: IllegalReason,
    },

    #[error("malformed state '{state}': {message}")]
    StateFormat { state: String, message: String },

    #[error("malformed move '{text}': {message}")]
    MoveFormat { text: String, message: String },

    #[error("strategy is not attached to a game")]
    NotAttached,

    #[error("no legal moves available")]
    NoLegalMoves,

    #[error("experience record '{key}' has score {score} outside [0, 1]")]
    ScoreOutOfRange { key: String, score: f64 },

    #[error("malformed experience line {line_number}: '{line}'")]
    ExperienceFormat { line_number: usize, line: String },

    #[error("unrecognized protocol message '{0}'")]
    Protocol(String),

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration decode error: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io {
            operation: operation.into(),
            source,
        }
    }

    pub(crate) fn state_format(state: &str, message: impl Into<String>) -> Self {
        Error::StateFormat {
            state: state.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn move_format(text: &str, message: impl Into<String>) -> Self {
        Error::MoveFormat {
            text: text.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Error::InvalidConfiguration {
            message: message.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_illegal_move_message() {
        let err = Error::IllegalMove {
            side: Side::Away,
            action: "2d".to_string(),
            reason: IllegalReason::NoFlip,
        };
        assert_eq!(
            err.to_string(),
            "illegal move '2d' by Away: the placement flips nothing"
        );
    }

    #[test]
    fn test_io_error_keeps_operation() {
        let err = Error::io(
            "read experience file",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.to_string().starts_with("failed to read experience file"));
    }
}
