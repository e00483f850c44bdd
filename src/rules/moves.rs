//! Legal-move enumeration
//!
//! A man steps one square diagonally toward its own edge; a king steps
//! both ways. Capture chains come from the jump search. The full union
//! of steps and jumps is returned: whether an available capture is
//! mandatory is a game-rule decision this engine leaves to the caller.

use crate::board::{Board, Direction, PieceId, Pos};

use super::jumps::jump_sequences;

/// Diagonal column offsets of a single step.
const STEP_COLS: [i32; 2] = [-1, 1];

/// A reachable destination together with the opposing pieces removed on
/// the way, in jump order. Empty `captures` means a simple step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveCandidate {
    pub to: Pos,
    pub captures: Vec<Pos>,
}

/// Enumerate every legal destination for the piece, moving toward
/// `direction`.
///
/// Simple steps come first (forward pair, then the backward pair for
/// kings), followed by one candidate per capture chain. A piece that is
/// not on the board has no moves.
pub fn legal_moves(board: &Board, id: PieceId, direction: Direction) -> Vec<MoveCandidate> {
    let piece = match board.piece(id) {
        Some(piece) => *piece,
        None => return Vec::new(),
    };
    let from = piece.pos();
    let mut candidates = Vec::new();

    let forward = direction.row_step();
    let mut row_steps = vec![forward];
    if piece.is_king {
        row_steps.push(-forward);
    }
    for row_step in row_steps {
        for col_step in STEP_COLS {
            let r = from.row as i32 + row_step;
            let c = from.col as i32 + col_step;
            if !Pos::is_valid(r, c, board.size()) {
                continue;
            }
            let to = Pos::new(r as usize, c as usize);
            if board.get(to).is_none() {
                candidates.push(MoveCandidate {
                    to,
                    captures: Vec::new(),
                });
            }
        }
    }

    for chain in jump_sequences(board, &piece, direction, &[], from) {
        if let Some(last) = chain.last() {
            candidates.push(MoveCandidate {
                to: last.landing,
                captures: chain.iter().map(|jump| jump.captured).collect(),
            });
        }
    }

    candidates
}
