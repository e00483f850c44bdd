//! Board state and mutation primitives
//!
//! The board owns the grid and the piece registry. Cells reference pieces
//! by handle, and every piece records the cell it stands on; the two views
//! are kept in agreement by the mutators alone, and the agreement is
//! re-checked after every mutation before any notification goes out.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::Error;

use super::events::{BoardEvent, EventBus, EventKind, SubscriptionId};
use super::{Color, Piece, PieceId, Pos};

/// The authoritative grid of pieces for one game.
///
/// Single occupancy holds by construction: a cell is written only after
/// it is checked empty. The size is fixed at creation; the board is never
/// resized.
pub struct Board {
    size: usize,
    grid: Vec<Option<PieceId>>,
    pieces: BTreeMap<PieceId, Piece>,
    next_id: u32,
    events: EventBus,
}

impl Board {
    /// Create an empty `size` x `size` board.
    pub fn new(size: usize) -> Self {
        assert!(size >= 2, "board size must be at least 2");
        Self {
            size,
            grid: vec![None; size * size],
            pieces: BTreeMap::new(),
            next_id: 0,
            events: EventBus::default(),
        }
    }

    /// Create a board with the new-game layout: men on the dark squares
    /// (`(row + col)` odd) of the first `size / 2 - 1` rows for dark and
    /// the last `size / 2 - 1` rows for light.
    ///
    /// On the standard 8x8 board this places 12 men per side. Placement
    /// goes through [`Board::add`], so the layout satisfies the same
    /// invariants as any other position.
    pub fn with_initial_setup(size: usize) -> Self {
        let mut board = Self::new(size);
        let rows = size / 2 - 1;
        for row in 0..rows {
            for col in 0..size {
                if (row + col) % 2 == 1 {
                    board
                        .add(Color::Dark, Pos::new(row, col))
                        .expect("setup squares are empty and in bounds");
                }
            }
        }
        for row in (size - rows)..size {
            for col in 0..size {
                if (row + col) % 2 == 1 {
                    board
                        .add(Color::Light, Pos::new(row, col))
                        .expect("setup squares are empty and in bounds");
                }
            }
        }
        board
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn index(&self, pos: Pos) -> usize {
        pos.row * self.size + pos.col
    }

    fn check_bounds(&self, pos: Pos) -> Result<(), Error> {
        if pos.row < self.size && pos.col < self.size {
            Ok(())
        } else {
            Err(Error::OutOfBounds {
                row: pos.row,
                col: pos.col,
                size: self.size,
            })
        }
    }

    /// Occupant of an in-bounds square.
    ///
    /// Infallible accessor for callers that have already validated the
    /// coordinates; use [`Board::piece_at`] at the API boundary.
    #[inline]
    pub fn get(&self, pos: Pos) -> Option<PieceId> {
        debug_assert!(pos.row < self.size && pos.col < self.size);
        self.grid[self.index(pos)]
    }

    /// Occupant of a square, `Ok(None)` when the square is empty.
    pub fn piece_at(&self, pos: Pos) -> Result<Option<PieceId>, Error> {
        self.check_bounds(pos)?;
        Ok(self.grid[self.index(pos)])
    }

    /// True iff the square holds no piece. Validates bounds the same way
    /// as [`Board::piece_at`].
    pub fn is_empty(&self, pos: Pos) -> Result<bool, Error> {
        Ok(self.piece_at(pos)?.is_none())
    }

    /// Piece data for a handle, `None` once the piece has been removed.
    #[inline]
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(&id)
    }

    /// Where the piece stands, read from its own position fields rather
    /// than by scanning the grid.
    pub fn location_of(&self, id: PieceId) -> Option<Pos> {
        self.pieces.get(&id).map(Piece::pos)
    }

    /// Snapshot of every piece on the board, in handle order.
    pub fn all_pieces(&self) -> Vec<(PieceId, Piece)> {
        self.pieces.iter().map(|(&id, &piece)| (id, piece)).collect()
    }

    /// Number of pieces on the board.
    #[inline]
    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    /// Place a new man of the given color.
    ///
    /// Fails without mutating or notifying if the square is occupied or
    /// out of bounds. The returned handle is freshly minted, so a piece
    /// already on the board can never be added a second time.
    pub fn add(&mut self, color: Color, pos: Pos) -> Result<PieceId, Error> {
        self.insert(Piece::new(color, false, pos))
    }

    /// Place an already-crowned piece (endgame positions, tests).
    pub fn add_king(&mut self, color: Color, pos: Pos) -> Result<PieceId, Error> {
        self.insert(Piece::new(color, true, pos))
    }

    fn insert(&mut self, piece: Piece) -> Result<PieceId, Error> {
        let pos = piece.pos();
        self.check_bounds(pos)?;
        let idx = self.index(pos);
        if self.grid[idx].is_some() {
            return Err(Error::Occupied {
                row: pos.row,
                col: pos.col,
            });
        }
        let id = PieceId(self.next_id);
        self.next_id += 1;
        self.grid[idx] = Some(id);
        self.pieces.insert(id, piece);
        self.check_rep();
        self.events.emit(&BoardEvent::Added { id, piece, pos });
        Ok(id)
    }

    /// Relocate a piece to an empty square, crowning it if the square is
    /// the far row for its color. Returns whether the move crowned it.
    ///
    /// Emits a `Move` event reflecting the final state, then a `Promote`
    /// event if the piece was crowned.
    pub fn move_to(&mut self, id: PieceId, to: Pos) -> Result<bool, Error> {
        self.check_bounds(to)?;
        let piece = *self.pieces.get(&id).ok_or(Error::PieceNotOnBoard)?;
        let to_idx = self.index(to);
        if self.grid[to_idx].is_some() {
            return Err(Error::Occupied {
                row: to.row,
                col: to.col,
            });
        }
        let from = piece.pos();
        // Promotion is decided by the destination row, before the piece's
        // position fields are overwritten.
        let crowned = !piece.is_king && to.row == piece.color.crowning_row(self.size);
        let from_idx = self.index(from);
        self.grid[from_idx] = None;
        self.grid[to_idx] = Some(id);
        if let Some(stored) = self.pieces.get_mut(&id) {
            stored.row = to.row;
            stored.col = to.col;
            if crowned {
                stored.is_king = true;
            }
        }
        let piece = self.pieces[&id];
        self.check_rep();
        self.events.emit(&BoardEvent::Moved {
            id,
            piece,
            from,
            to,
        });
        if crowned {
            self.events.emit(&BoardEvent::Promoted { id, piece });
        }
        Ok(crowned)
    }

    /// Detach a piece from the board, returning it as it stood.
    pub fn remove(&mut self, id: PieceId) -> Result<Piece, Error> {
        let piece = *self.pieces.get(&id).ok_or(Error::PieceNotOnBoard)?;
        self.remove_at(piece.pos())
    }

    /// Detach whatever occupies the square. Fails if the square is empty.
    pub fn remove_at(&mut self, pos: Pos) -> Result<Piece, Error> {
        self.check_bounds(pos)?;
        let idx = self.index(pos);
        let id = self.grid[idx].ok_or(Error::Vacant {
            row: pos.row,
            col: pos.col,
        })?;
        self.grid[idx] = None;
        let piece = match self.pieces.remove(&id) {
            Some(piece) => piece,
            None => panic!(
                "representation invariant violated at ({}, {}): grid references a piece missing from the registry",
                pos.row, pos.col
            ),
        };
        self.check_rep();
        self.events.emit(&BoardEvent::Removed { id, piece, pos });
        Ok(piece)
    }

    /// Remove every piece. Each occupied cell yields exactly one `Remove`
    /// event.
    pub fn clear(&mut self) {
        let ids: Vec<PieceId> = self.pieces.keys().copied().collect();
        for id in ids {
            // every id collected above is still on the board
            let _ = self.remove(id);
        }
    }

    /// Register a handler for every future event of the given kind.
    ///
    /// Handlers run synchronously, in registration order, within the
    /// mutating call's stack frame.
    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F) -> SubscriptionId
    where
        F: FnMut(&BoardEvent) + 'static,
    {
        self.events.subscribe(kind, Box::new(handler))
    }

    /// Drop a previously registered handler. Returns whether one was
    /// removed.
    pub fn unsubscribe(&mut self, kind: EventKind, subscription: SubscriptionId) -> bool {
        self.events.unsubscribe(kind, subscription)
    }

    /// Verify that the grid and the piece registry agree: every occupied
    /// cell's piece records that cell's coordinates, and every registered
    /// piece is referenced by its cell.
    ///
    /// A mismatch is a defect in the board itself, not caller error, so
    /// it aborts instead of returning.
    fn check_rep(&self) {
        for (idx, slot) in self.grid.iter().enumerate() {
            if let Some(id) = slot {
                let row = idx / self.size;
                let col = idx % self.size;
                match self.pieces.get(id) {
                    Some(piece) if piece.row == row && piece.col == col => {}
                    _ => panic!(
                        "representation invariant violated at ({}, {}): grid and piece position disagree",
                        row, col
                    ),
                }
            }
        }
        for (id, piece) in &self.pieces {
            if self.grid[self.index(piece.pos())] != Some(*id) {
                panic!(
                    "representation invariant violated at ({}, {}): piece not referenced by its cell",
                    piece.row, piece.col
                );
            }
        }
    }
}

impl fmt::Display for Board {
    /// One character per cell: `.` empty, `d`/`D` dark man/king, `l`/`L`
    /// light man/king. A debugging convenience, not a stable format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                let slot = self.grid[row * self.size + col];
                let ch = match slot.and_then(|id| self.pieces.get(&id)) {
                    None => '.',
                    Some(piece) => match (piece.color, piece.is_king) {
                        (Color::Dark, false) => 'd',
                        (Color::Dark, true) => 'D',
                        (Color::Light, false) => 'l',
                        (Color::Light, true) => 'L',
                    },
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("size", &self.size)
            .field("pieces", &self.pieces)
            .finish_non_exhaustive()
    }
}
