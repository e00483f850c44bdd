//! Game rules for checkers
//!
//! This module implements the move logic layered on a [`crate::Board`]:
//! - Legal-move enumeration (simple steps and capture chains)
//! - The recursive jump search over multi-capture chains
//! - Move validation and application, including uniform-random play
//!
//! The functions here are stateless: every call takes the board it
//! operates on, and the turn being played, as arguments. That keeps the
//! rules referentially transparent — whose turn it is, and whether an
//! available capture must be taken, are decisions owned by the caller.

pub mod apply;
pub mod jumps;
pub mod moves;

// Re-exports for convenient access
pub use apply::{attempt_move, attempt_random_move, AppliedMove, CapturedPiece};
pub use jumps::{jump_sequences, Jump};
pub use moves::{legal_moves, MoveCandidate};
