//! Move application
//!
//! Validation and mutation live in one place so that "what moves are
//! legal" and "what happens when one is taken" cannot drift apart: a
//! claimed destination is checked against [`legal_moves`] and, only if it
//! matches, turned into the board mutations it stands for (relocation,
//! captures in chain order, promotion).

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{Board, Color, Direction, PieceId, Pos};
use crate::error::Error;

use super::moves::legal_moves;

/// A captured piece as it stood before removal. The pieces themselves are
/// gone from the board once the move is applied, so this snapshot is the
/// ground truth of what was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapturedPiece {
    pub pos: Pos,
    pub color: Color,
    pub was_king: bool,
}

/// Everything that changed when a validated move was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMove {
    pub from: Pos,
    pub to: Pos,
    pub made_king: bool,
    /// Pieces removed by the move, in jump order; empty for a simple step.
    pub removed: Vec<CapturedPiece>,
}

/// Validate the claimed destination and, if it is legal, apply the move.
///
/// Returns `Ok(None)` — no mutation, no events — when it is not this
/// direction's turn (`piece_direction != turn_direction`), when the piece
/// is not on the board, or when the destination matches no candidate of
/// [`legal_moves`]. An out-of-range destination is a usage error.
///
/// On success the piece is relocated first (emitting `Move` and possibly
/// `Promote`), then the captured pieces are removed in chain order (one
/// `Remove` event each).
pub fn attempt_move(
    board: &mut Board,
    id: PieceId,
    turn_direction: Direction,
    piece_direction: Direction,
    to: Pos,
) -> Result<Option<AppliedMove>, Error> {
    if to.row >= board.size() || to.col >= board.size() {
        return Err(Error::OutOfBounds {
            row: to.row,
            col: to.col,
            size: board.size(),
        });
    }
    if piece_direction != turn_direction {
        return Ok(None);
    }
    let from = match board.location_of(id) {
        Some(pos) => pos,
        None => return Ok(None),
    };
    let candidate = match legal_moves(board, id, piece_direction)
        .into_iter()
        .find(|m| m.to == to)
    {
        Some(candidate) => candidate,
        None => return Ok(None),
    };

    // Snapshot the victims before they leave the board.
    let mut removed = Vec::with_capacity(candidate.captures.len());
    for &pos in &candidate.captures {
        if let Some(victim) = board.get(pos).and_then(|vid| board.piece(vid).copied()) {
            removed.push(CapturedPiece {
                pos,
                color: victim.color,
                was_king: victim.is_king,
            });
        }
    }

    let made_king = board.move_to(id, to)?;
    for capture in &removed {
        board.remove_at(capture.pos)?;
    }

    Ok(Some(AppliedMove {
        from,
        to,
        made_king,
        removed,
    }))
}

/// Play a uniformly random legal move for the color.
///
/// Visits the color's pieces in shuffled order and applies a shuffled
/// candidate of the first piece that has any. Returns `Ok(None)` — and
/// mutates nothing — when no piece of the color has a legal move; the
/// caller decides what a stalemate means.
pub fn attempt_random_move<R: Rng + ?Sized>(
    board: &mut Board,
    color: Color,
    direction: Direction,
    rng: &mut R,
) -> Result<Option<AppliedMove>, Error> {
    let mut ids: Vec<PieceId> = board
        .all_pieces()
        .into_iter()
        .filter(|(_, piece)| piece.color == color)
        .map(|(id, _)| id)
        .collect();
    ids.shuffle(rng);

    for id in ids {
        let mut candidates = legal_moves(board, id, direction);
        if candidates.is_empty() {
            continue;
        }
        candidates.shuffle(rng);
        let choice = candidates.swap_remove(0);
        return attempt_move(board, id, direction, direction, choice.to);
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardEvent, EventKind};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_wrong_turn_is_rejected_without_mutation() {
        let mut board = Board::new(8);
        let dark = board.add(Color::Dark, Pos::new(2, 3)).unwrap();
        let before = board.all_pieces();

        let result =
            attempt_move(&mut board, dark, Direction::Up, Direction::Down, Pos::new(3, 4));
        assert_eq!(result, Ok(None));
        assert_eq!(board.all_pieces(), before);
    }

    #[test]
    fn test_illegal_destination_is_rejected() {
        let mut board = Board::new(8);
        let dark = board.add(Color::Dark, Pos::new(2, 3)).unwrap();

        // Straight ahead is not a diagonal step.
        let result =
            attempt_move(&mut board, dark, Direction::Down, Direction::Down, Pos::new(3, 3));
        assert_eq!(result, Ok(None));
        assert_eq!(board.location_of(dark), Some(Pos::new(2, 3)));
    }

    #[test]
    fn test_out_of_bounds_destination_is_an_error() {
        let mut board = Board::new(8);
        let dark = board.add(Color::Dark, Pos::new(2, 3)).unwrap();

        let result =
            attempt_move(&mut board, dark, Direction::Down, Direction::Down, Pos::new(8, 8));
        assert_eq!(
            result,
            Err(Error::OutOfBounds {
                row: 8,
                col: 8,
                size: 8
            })
        );
    }

    #[test]
    fn test_removed_piece_cannot_move() {
        let mut board = Board::new(8);
        let dark = board.add(Color::Dark, Pos::new(2, 3)).unwrap();
        board.remove(dark).unwrap();

        let result =
            attempt_move(&mut board, dark, Direction::Down, Direction::Down, Pos::new(3, 4));
        assert_eq!(result, Ok(None));
    }

    #[test]
    fn test_simple_step_applied() {
        let mut board = Board::new(8);
        let dark = board.add(Color::Dark, Pos::new(2, 3)).unwrap();

        let applied =
            attempt_move(&mut board, dark, Direction::Down, Direction::Down, Pos::new(3, 4))
                .unwrap()
                .unwrap();
        assert_eq!(applied.from, Pos::new(2, 3));
        assert_eq!(applied.to, Pos::new(3, 4));
        assert!(!applied.made_king);
        assert!(applied.removed.is_empty());
        assert_eq!(board.location_of(dark), Some(Pos::new(3, 4)));
        assert!(board.is_empty(Pos::new(2, 3)).unwrap());
    }

    #[test]
    fn test_jump_removes_the_victim() {
        let mut board = Board::new(8);
        let dark = board.add(Color::Dark, Pos::new(2, 3)).unwrap();
        board.add(Color::Light, Pos::new(3, 4)).unwrap();

        let applied =
            attempt_move(&mut board, dark, Direction::Down, Direction::Down, Pos::new(4, 5))
                .unwrap()
                .unwrap();
        assert_eq!(
            applied.removed,
            vec![CapturedPiece {
                pos: Pos::new(3, 4),
                color: Color::Light,
                was_king: false,
            }]
        );
        assert!(board.is_empty(Pos::new(3, 4)).unwrap());
        assert_eq!(board.location_of(dark), Some(Pos::new(4, 5)));
        assert_eq!(board.piece_count(), 1);
    }

    #[test]
    fn test_double_jump_removes_both_in_order() {
        let mut board = Board::new(8);
        let dark = board.add(Color::Dark, Pos::new(2, 3)).unwrap();
        board.add(Color::Light, Pos::new(3, 4)).unwrap();
        board.add(Color::Light, Pos::new(5, 6)).unwrap();

        let applied =
            attempt_move(&mut board, dark, Direction::Down, Direction::Down, Pos::new(6, 7))
                .unwrap()
                .unwrap();
        let captured: Vec<Pos> = applied.removed.iter().map(|c| c.pos).collect();
        assert_eq!(captured, vec![Pos::new(3, 4), Pos::new(5, 6)]);
        assert_eq!(board.piece_count(), 1);
        assert_eq!(board.location_of(dark), Some(Pos::new(6, 7)));
    }

    #[test]
    fn test_capture_snapshot_keeps_king_flag() {
        let mut board = Board::new(8);
        let dark = board.add(Color::Dark, Pos::new(2, 3)).unwrap();
        board.add_king(Color::Light, Pos::new(3, 4)).unwrap();

        let applied =
            attempt_move(&mut board, dark, Direction::Down, Direction::Down, Pos::new(4, 5))
                .unwrap()
                .unwrap();
        assert!(applied.removed[0].was_king);
    }

    #[test]
    fn test_capture_landing_on_far_row_promotes() {
        let mut board = Board::new(8);
        // d at (5,2) jumps l at (6,3) and lands on the crowning row.
        let dark = board.add(Color::Dark, Pos::new(5, 2)).unwrap();
        board.add(Color::Light, Pos::new(6, 3)).unwrap();

        let promotions = Rc::new(RefCell::new(0));
        let seen = Rc::clone(&promotions);
        board.subscribe(EventKind::Promote, move |_| {
            *seen.borrow_mut() += 1;
        });

        let applied =
            attempt_move(&mut board, dark, Direction::Down, Direction::Down, Pos::new(7, 4))
                .unwrap()
                .unwrap();
        assert!(applied.made_king);
        assert_eq!(applied.removed.len(), 1);
        assert!(board.piece(dark).unwrap().is_king);
        assert_eq!(*promotions.borrow(), 1, "promote fires exactly once");
    }

    #[test]
    fn test_event_sequence_on_capture() {
        let mut board = Board::new(8);
        let dark = board.add(Color::Dark, Pos::new(2, 3)).unwrap();
        board.add(Color::Light, Pos::new(3, 4)).unwrap();

        let log = Rc::new(RefCell::new(Vec::new()));
        for kind in [EventKind::Move, EventKind::Remove, EventKind::Promote] {
            let log = Rc::clone(&log);
            board.subscribe(kind, move |event| log.borrow_mut().push(*event));
        }

        attempt_move(&mut board, dark, Direction::Down, Direction::Down, Pos::new(4, 5))
            .unwrap()
            .unwrap();

        let log = log.borrow();
        assert_eq!(log.len(), 2);
        assert!(matches!(
            log[0],
            BoardEvent::Moved { to, .. } if to == Pos::new(4, 5)
        ));
        assert!(matches!(
            log[1],
            BoardEvent::Removed { pos, .. } if pos == Pos::new(3, 4)
        ));
    }

    #[test]
    fn test_random_move_with_no_pieces_is_none() {
        let mut board = Board::new(8);
        board.add(Color::Dark, Pos::new(2, 3)).unwrap();
        let before = board.all_pieces();

        let mut rng = StdRng::seed_from_u64(7);
        let result =
            attempt_random_move(&mut board, Color::Light, Direction::Up, &mut rng).unwrap();
        assert!(result.is_none());
        assert_eq!(board.all_pieces(), before);
    }

    #[test]
    fn test_random_move_plays_the_only_legal_move() {
        let mut board = Board::new(8);
        // The dark man's left diagonal is blocked and the jump over it is
        // blocked too, leaving (3,4) as the position's only move.
        let dark = board.add(Color::Dark, Pos::new(2, 3)).unwrap();
        board.add(Color::Light, Pos::new(3, 2)).unwrap();
        board.add(Color::Light, Pos::new(4, 1)).unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        let applied = attempt_random_move(&mut board, Color::Dark, Direction::Down, &mut rng)
            .unwrap()
            .unwrap();
        assert_eq!(applied.to, Pos::new(3, 4));
        assert_eq!(board.location_of(dark), Some(Pos::new(3, 4)));
    }

    #[test]
    fn test_random_move_is_deterministic_for_equal_seeds() {
        let mut first = Board::with_initial_setup(8);
        let mut second = Board::with_initial_setup(8);

        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);
        let a = attempt_random_move(&mut first, Color::Dark, Direction::Down, &mut rng_a)
            .unwrap();
        let b = attempt_random_move(&mut second, Color::Dark, Direction::Down, &mut rng_b)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_self_play_preserves_consistency() {
        let mut board = Board::with_initial_setup(8);
        let mut rng = StdRng::seed_from_u64(1234);
        let mut turn = Color::Dark;
        let mut idle = 0;

        for _ in 0..120 {
            let before = board.piece_count();
            match attempt_random_move(&mut board, turn, turn.forward(), &mut rng).unwrap() {
                Some(applied) => {
                    idle = 0;
                    assert_eq!(board.piece_count(), before - applied.removed.len());
                }
                None => {
                    idle += 1;
                    if idle == 2 {
                        break;
                    }
                }
            }
            turn = turn.opponent();
        }
        // Every mutation above re-checked the representation invariant.
    }
}
