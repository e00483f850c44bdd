//! Crate-wide error type
//!
//! Only usage errors surface here: coordinates outside the grid, a
//! malformed direction value, operations aimed at an occupied or empty
//! square. Rule violations (an illegal move, a color with nothing to
//! play) are ordinary negative results, and an internal inconsistency
//! between the grid and a piece's recorded position is a defect in the
//! engine itself, reported by panicking rather than by a value.

use thiserror::Error;

/// Errors reported by the board and rules API.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Coordinates outside `[0, size)` in either dimension.
    #[error("coordinates ({row}, {col}) are outside the {size}x{size} board")]
    OutOfBounds { row: usize, col: usize, size: usize },

    /// The target square already holds a piece.
    #[error("square ({row}, {col}) is already occupied")]
    Occupied { row: usize, col: usize },

    /// The square holds no piece to act on.
    #[error("square ({row}, {col}) is empty")]
    Vacant { row: usize, col: usize },

    /// The piece handle does not refer to a piece currently on the board.
    #[error("piece is not on the board")]
    PieceNotOnBoard,

    /// A direction step other than +1 or -1.
    #[error("invalid direction {0}, expected +1 or -1")]
    InvalidDirection(i32),
}
