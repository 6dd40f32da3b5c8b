use chatsync_core::error::{ChatSyncError, Result};

use crate::config::MatchPolicy;
use crate::reconcile::board::{DeliveryBoard, DeliveryStatus, PendingId};
use crate::view::{ChatView, ViewHandle};

/// A message rendered optimistically, awaiting its self-echo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMessage {
    pub id: PendingId,
    /// Exact text sent.
    pub content: String,
    pub handle: ViewHandle,
    pub status: DeliveryStatus,
}

/// Pending messages in registration order (single writer).
pub struct PendingSet {
    entries: Vec<PendingMessage>,
    policy: MatchPolicy,
    board: DeliveryBoard,
    next_id: u64,
}

impl PendingSet {
    pub fn new(policy: MatchPolicy) -> Self {
        Self {
            entries: Vec::new(),
            policy,
            board: DeliveryBoard::new(),
            next_id: 1,
        }
    }

    /// Query handle shared with other tasks.
    pub fn board(&self) -> DeliveryBoard {
        self.board.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register a message the send path just rendered.
    ///
    /// A handle may back at most one pending entry at a time.
    pub fn register(
        &mut self,
        content: impl Into<String>,
        handle: ViewHandle,
    ) -> Result<PendingId> {
        if self.entries.iter().any(|e| e.handle == handle) {
            return Err(ChatSyncError::DuplicatePending(handle.0));
        }
        let id = PendingId(self.next_id);
        self.next_id += 1;

        self.entries.push(PendingMessage {
            id,
            content: content.into(),
            handle,
            status: DeliveryStatus::Pending,
        });
        self.board.set(id, DeliveryStatus::Pending);
        Ok(id)
    }

    /// Remove an entry without notifying the view. Its id is forgotten by the board.
    pub fn withdraw(&mut self, id: PendingId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        if self.entries.len() == before {
            return false;
        }
        self.board.forget(id);
        true
    }

    /// Promote pending entries whose text equals `content` exactly.
    ///
    /// Each match is marked delivered, reported to the view once, and dropped
    /// from the set so a repeated echo cannot match it again. Returns the
    /// number of entries transitioned; zero is a normal outcome (e.g. the
    /// message was sent from another session).
    pub fn reconcile<V>(&mut self, content: &str, view: &mut V) -> usize
    where
        V: ChatView + ?Sized,
    {
        let mut matched = 0;
        for entry in self.entries.iter_mut() {
            if entry.status != DeliveryStatus::Pending || entry.content != content {
                continue;
            }
            entry.status = DeliveryStatus::Delivered;
            self.board.set(entry.id, DeliveryStatus::Delivered);
            view.mark_delivered(entry.handle);
            matched += 1;

            if self.policy == MatchPolicy::OldestFirst {
                break;
            }
        }

        if matched > 0 {
            self.entries.retain(|e| e.status == DeliveryStatus::Pending);
        }
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presence::TypingPresence;
    use crate::view::IncomingMessage;

    #[derive(Default)]
    struct Marks(Vec<ViewHandle>);

    impl ChatView for Marks {
        fn display_error(&mut self, _message: &str) {}
        fn append_incoming_message(&mut self, _msg: &IncomingMessage) {}
        fn mark_delivered(&mut self, handle: ViewHandle) {
            self.0.push(handle);
        }
        fn typing_changed(&mut self, _presence: &TypingPresence) {}
    }

    #[test]
    fn delivers_exact_match_once() {
        let mut set = PendingSet::new(MatchPolicy::AllIdentical);
        let id = set.register("hi", ViewHandle(1)).unwrap();
        let mut view = Marks::default();

        assert_eq!(set.reconcile("hi", &mut view), 1);
        assert_eq!(set.reconcile("hi", &mut view), 0);
        assert_eq!(view.0, vec![ViewHandle(1)]);
        assert_eq!(set.board().status(id), Some(DeliveryStatus::Delivered));
        assert!(set.is_empty());
    }

    #[test]
    fn no_normalization() {
        let mut set = PendingSet::new(MatchPolicy::AllIdentical);
        set.register("hi", ViewHandle(1)).unwrap();
        let mut view = Marks::default();

        assert_eq!(set.reconcile("hi ", &mut view), 0);
        assert_eq!(set.reconcile("Hi", &mut view), 0);
        assert_eq!(set.len(), 1);
        assert!(view.0.is_empty());
    }

    #[test]
    fn all_identical_delivers_every_duplicate() {
        let mut set = PendingSet::new(MatchPolicy::AllIdentical);
        set.register("ok", ViewHandle(1)).unwrap();
        set.register("other", ViewHandle(2)).unwrap();
        set.register("ok", ViewHandle(3)).unwrap();
        let mut view = Marks::default();

        assert_eq!(set.reconcile("ok", &mut view), 2);
        assert_eq!(view.0, vec![ViewHandle(1), ViewHandle(3)]);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn oldest_first_delivers_one_per_echo() {
        let mut set = PendingSet::new(MatchPolicy::OldestFirst);
        let a = set.register("ok", ViewHandle(1)).unwrap();
        let b = set.register("ok", ViewHandle(2)).unwrap();
        let mut view = Marks::default();

        assert_eq!(set.reconcile("ok", &mut view), 1);
        assert_eq!(set.board().status(a), Some(DeliveryStatus::Delivered));
        assert_eq!(set.board().status(b), Some(DeliveryStatus::Pending));

        assert_eq!(set.reconcile("ok", &mut view), 1);
        assert_eq!(view.0, vec![ViewHandle(1), ViewHandle(2)]);
    }

    #[test]
    fn duplicate_handle_is_rejected() {
        let mut set = PendingSet::new(MatchPolicy::AllIdentical);
        set.register("a", ViewHandle(7)).unwrap();
        let err = set.register("b", ViewHandle(7)).unwrap_err();
        assert_eq!(err.code().as_str(), "DUPLICATE_PENDING");
    }

    #[test]
    fn board_lists_pending_in_order() {
        let mut set = PendingSet::new(MatchPolicy::AllIdentical);
        let a = set.register("a", ViewHandle(1)).unwrap();
        let b = set.register("b", ViewHandle(2)).unwrap();
        let c = set.register("c", ViewHandle(3)).unwrap();
        set.reconcile("b", &mut Marks::default());

        let board = set.board();
        assert_eq!(board.pending_ids(), vec![a, c]);
        assert_eq!(board.pending_count(), 2);
        assert_eq!(board.status(b), Some(DeliveryStatus::Delivered));
        assert_eq!(board.status(PendingId(99)), None);
    }

    #[test]
    fn withdrawn_entry_leaves_set_and_board() {
        let mut set = PendingSet::new(MatchPolicy::AllIdentical);
        let a = set.register("a", ViewHandle(1)).unwrap();
        let b = set.register("b", ViewHandle(2)).unwrap();

        assert!(set.withdraw(a));
        assert!(!set.withdraw(a));
        assert_eq!(set.len(), 1);
        assert_eq!(set.board().status(a), None);
        assert_eq!(set.board().pending_ids(), vec![b]);

        // the handle is free again
        set.register("a again", ViewHandle(1)).unwrap();
        let mut view = Marks::default();
        assert_eq!(set.reconcile("a", &mut view), 0);
    }
}
