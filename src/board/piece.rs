//! Piece and color types

use super::{Direction, Pos};

/// Piece colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    /// Get opponent color
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Direction this color's men advance toward: `Dark` toward the last
    /// row, `Light` toward row 0.
    #[inline]
    pub fn forward(self) -> Direction {
        match self {
            Color::Dark => Direction::Down,
            Color::Light => Direction::Up,
        }
    }

    /// Row that crowns this color's men on a board of the given size.
    #[inline]
    pub fn crowning_row(self, size: usize) -> usize {
        match self {
            Color::Dark => size - 1,
            Color::Light => 0,
        }
    }
}

/// Opaque handle to a piece, minted by [`super::Board::add`].
///
/// A handle stays valid until the piece is removed; re-adding a captured
/// piece mints a fresh handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub(crate) u32);

/// A playing token: color, king status and current grid location.
///
/// The position fields are written exclusively by the board's mutators;
/// they always match the grid cell that references the piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub color: Color,
    pub is_king: bool,
    pub row: usize,
    pub col: usize,
}

impl Piece {
    pub(crate) fn new(color: Color, is_king: bool, pos: Pos) -> Self {
        Self {
            color,
            is_king,
            row: pos.row,
            col: pos.col,
        }
    }

    #[inline]
    pub fn pos(&self) -> Pos {
        Pos::new(self.row, self.col)
    }
}
