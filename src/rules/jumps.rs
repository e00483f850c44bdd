//! Recursive capture-chain search
//!
//! A jump lands two squares away diagonally, over an opposing piece on
//! the midpoint square. From each landing the search continues for
//! further jumps, so one move may capture several pieces. The search
//! returns every chain, not only the maximal ones: a player may stop an
//! in-progress multi-capture early.

use crate::board::{Board, Direction, Piece, Pos};

/// The four two-square diagonal landing offsets.
const JUMP_OFFSETS: [(i32, i32); 4] = [(2, -2), (2, 2), (-2, -2), (-2, 2)];

/// One hop of a capture chain: the square jumped over and the landing
/// square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jump {
    pub captured: Pos,
    pub landing: Pos,
}

/// Enumerate every capture chain the piece could play from `from`.
///
/// A landing is valid iff it is in bounds and empty, the midpoint square
/// holds an opposing piece that this chain has not already captured, and
/// (for men) the hop is not backward relative to `direction`. Each valid
/// landing contributes the chain that stops there plus one chain per
/// continuation found by recursing from the landing, so the result holds
/// every intermediate stop as well as the full chains.
///
/// `already_captured` is the set of squares jumped earlier in this chain;
/// it is copied per branch, never shared across siblings. The board is
/// not mutated during the search: captured pieces stay on their squares
/// (still blocking landings) and the moving piece still occupies its
/// origin square.
///
/// Termination: every recursive call grows `already_captured` by one
/// square of a finite board.
pub fn jump_sequences(
    board: &Board,
    piece: &Piece,
    direction: Direction,
    already_captured: &[Pos],
    from: Pos,
) -> Vec<Vec<Jump>> {
    let mut chains = Vec::new();

    for (row_step, col_step) in JUMP_OFFSETS {
        // Men only jump toward their own edge; kings jump both ways.
        if !piece.is_king && row_step.signum() != direction.row_step() {
            continue;
        }

        let r = from.row as i32 + row_step;
        let c = from.col as i32 + col_step;
        if !Pos::is_valid(r, c, board.size()) {
            continue;
        }
        let landing = Pos::new(r as usize, c as usize);
        if board.get(landing).is_some() {
            continue;
        }

        // Midpoint of the two-square hop.
        let mid = Pos::new((from.row + landing.row) / 2, (from.col + landing.col) / 2);
        if already_captured.contains(&mid) {
            continue;
        }
        let victim = match board.get(mid).and_then(|id| board.piece(id)) {
            Some(victim) => victim,
            None => continue,
        };
        if victim.color == piece.color {
            continue;
        }

        let jump = Jump {
            captured: mid,
            landing,
        };
        chains.push(vec![jump]);

        let mut used = already_captured.to_vec();
        used.push(mid);
        for continuation in jump_sequences(board, piece, direction, &used, landing) {
            let mut chain = Vec::with_capacity(continuation.len() + 1);
            chain.push(jump);
            chain.extend(continuation);
            chains.push(chain);
        }
    }

    chains
}
