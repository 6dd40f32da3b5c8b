use std::sync::Arc;

use dashmap::{DashMap, DashSet};

/// Id of one registered pending message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PendingId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    Pending,
    Delivered,
}

/// Shared, read-mostly view of delivery status.
///
/// Written only by the reconciler; any task may query it (e.g. a timeout
/// layer asking whether a message is still pending). Delivered ids keep
/// answering `status` for the life of the session; the pending index only
/// holds ids still awaiting an echo.
#[derive(Clone, Default)]
pub struct DeliveryBoard {
    statuses: Arc<DashMap<PendingId, DeliveryStatus>>,
    pending: Arc<DashSet<PendingId>>,
}

impl DeliveryBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self, id: PendingId) -> Option<DeliveryStatus> {
        self.statuses.get(&id).map(|r| *r.value())
    }

    /// Ids still awaiting a self-echo, oldest first.
    pub fn pending_ids(&self) -> Vec<PendingId> {
        let mut ids: Vec<PendingId> = self.pending.iter().map(|id| *id).collect();
        ids.sort();
        ids
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub(crate) fn set(&self, id: PendingId, status: DeliveryStatus) {
        match status {
            DeliveryStatus::Pending => {
                self.pending.insert(id);
            }
            DeliveryStatus::Delivered => {
                self.pending.remove(&id);
            }
        }
        self.statuses.insert(id, status);
    }

    pub(crate) fn forget(&self, id: PendingId) {
        self.pending.remove(&id);
        self.statuses.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_index_tracks_transitions() {
        let board = DeliveryBoard::new();
        for n in 1..=3 {
            board.set(PendingId(n), DeliveryStatus::Pending);
        }
        board.set(PendingId(2), DeliveryStatus::Delivered);
        board.forget(PendingId(3));

        assert_eq!(board.pending_ids(), vec![PendingId(1)]);
        assert_eq!(board.pending_count(), 1);
        assert_eq!(board.status(PendingId(2)), Some(DeliveryStatus::Delivered));
        assert_eq!(board.status(PendingId(3)), None);
    }
}
