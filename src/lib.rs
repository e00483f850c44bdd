//! Checkers (draughts) board and rules engine
//!
//! An in-memory engine for checkers on a configurable-size board:
//! - Square grid with single-occupancy placement, movement and removal
//! - Typed change notifications (`add`, `remove`, `move`, `promote`)
//!   dispatched synchronously per board instance
//! - Legal-move enumeration: diagonal steps, backward steps for kings,
//!   and recursive multi-jump capture chains (partial stops included)
//! - Move validation against a claimed destination, and the mutation
//!   sequence that applies a validated move
//! - Uniform-random move selection with a caller-supplied RNG
//!
//! Rendering, input handling, turn orchestration and game-over detection
//! are collaborator concerns: drive moves through [`rules`] and observe
//! the results through [`Board::subscribe`].
//!
//! # Architecture
//!
//! The engine is organized into a few modules:
//! - [`board`]: the authoritative grid, its mutation primitives and its
//!   notification channel
//! - [`rules`]: stateless move logic layered on a board
//! - [`error`]: the usage-error taxonomy shared by both
//!
//! # Quick Start
//!
//! ```
//! use checkers::{rules, Board, Color, Direction, EventKind, Pos};
//!
//! let mut board = Board::new(8);
//! board.subscribe(EventKind::Remove, |event| println!("captured: {event:?}"));
//!
//! let dark = board.add(Color::Dark, Pos::new(2, 3)).unwrap();
//! board.add(Color::Light, Pos::new(3, 4)).unwrap();
//!
//! // The dark man can jump the light one.
//! let moves = rules::legal_moves(&board, dark, Direction::Down);
//! assert!(moves.iter().any(|m| m.to == Pos::new(4, 5)));
//!
//! let applied = rules::attempt_move(
//!     &mut board,
//!     dark,
//!     Direction::Down, // whose turn it is
//!     Direction::Down, // which way this piece advances
//!     Pos::new(4, 5),
//! )
//! .unwrap()
//! .expect("the jump is legal");
//! assert_eq!(applied.removed.len(), 1);
//! assert!(board.is_empty(Pos::new(3, 4)).unwrap());
//! ```

pub mod board;
pub mod error;
pub mod rules;

// Re-export commonly used types for convenience
pub use board::{
    Board, BoardEvent, Color, Direction, EventKind, Piece, PieceId, Pos, SubscriptionId,
    DEFAULT_BOARD_SIZE,
};
pub use error::Error;
pub use rules::{AppliedMove, CapturedPiece, Jump, MoveCandidate};
