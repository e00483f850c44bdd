//! Typed change notifications for board mutations
//!
//! Every committed mutation is broadcast synchronously to the handlers
//! subscribed for its kind, in registration order, within the mutating
//! call's stack frame. The table is owned by each board instance, so two
//! boards never cross-notify. Handlers must not mutate the board they
//! observe; the borrow rules make that impossible to express directly.

use std::collections::HashMap;

use super::{Piece, PieceId, Pos};

/// Kinds of board mutation, used as subscription keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Add,
    Remove,
    Move,
    Promote,
}

/// A committed board mutation.
///
/// The embedded [`Piece`] is a snapshot taken after the mutation, so a
/// `Moved` event carries the piece's final position and king status, and
/// a `Removed` event carries the piece as it stood when taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardEvent {
    Added {
        id: PieceId,
        piece: Piece,
        pos: Pos,
    },
    Removed {
        id: PieceId,
        piece: Piece,
        pos: Pos,
    },
    Moved {
        id: PieceId,
        piece: Piece,
        from: Pos,
        to: Pos,
    },
    Promoted {
        id: PieceId,
        piece: Piece,
    },
}

impl BoardEvent {
    /// The subscription key this event is dispatched under.
    #[inline]
    pub fn kind(&self) -> EventKind {
        match self {
            BoardEvent::Added { .. } => EventKind::Add,
            BoardEvent::Removed { .. } => EventKind::Remove,
            BoardEvent::Moved { .. } => EventKind::Move,
            BoardEvent::Promoted { .. } => EventKind::Promote,
        }
    }
}

/// Handle returned by [`super::Board::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(&BoardEvent)>;

/// Per-board publish/subscribe table keyed by event kind.
#[derive(Default)]
pub(crate) struct EventBus {
    handlers: HashMap<EventKind, Vec<(SubscriptionId, Handler)>>,
    next_id: u64,
}

impl EventBus {
    pub(crate) fn subscribe(&mut self, kind: EventKind, handler: Handler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.entry(kind).or_default().push((id, handler));
        id
    }

    /// Returns whether a handler was actually removed.
    pub(crate) fn unsubscribe(&mut self, kind: EventKind, id: SubscriptionId) -> bool {
        match self.handlers.get_mut(&kind) {
            Some(handlers) => {
                let before = handlers.len();
                handlers.retain(|(handler_id, _)| *handler_id != id);
                handlers.len() != before
            }
            None => false,
        }
    }

    pub(crate) fn emit(&mut self, event: &BoardEvent) {
        if let Some(handlers) = self.handlers.get_mut(&event.kind()) {
            for (_, handler) in handlers.iter_mut() {
                handler(event);
            }
        }
    }
}
