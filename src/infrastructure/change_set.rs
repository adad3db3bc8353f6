//! Pending changes shared by the repositories of one unit of work

use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::{Booking, Hotel, Room};

/// A write staged by a repository, applied on `save_changes`
#[derive(Debug, Clone)]
pub enum PendingChange {
    AddHotel(Hotel),
    UpdateHotel(Hotel),
    DeleteHotel(Uuid),
    AddRoom(Room),
    UpdateRoom(Room),
    DeleteRoom(Uuid),
    AddBooking(Booking),
    UpdateBooking(Booking),
    DeleteBooking(Uuid),
}

impl PendingChange {
    pub fn describe(&self) -> String {
        match self {
            Self::AddHotel(h) => format!("add hotel {}", h.id),
            Self::UpdateHotel(h) => format!("update hotel {}", h.id),
            Self::DeleteHotel(id) => format!("delete hotel {}", id),
            Self::AddRoom(r) => format!("add room {}", r.id),
            Self::UpdateRoom(r) => format!("update room {}", r.id),
            Self::DeleteRoom(id) => format!("delete room {}", id),
            Self::AddBooking(b) => format!("add booking {}", b.id),
            Self::UpdateBooking(b) => format!("update booking {}", b.id),
            Self::DeleteBooking(id) => format!("delete booking {}", id),
        }
    }
}

/// Ordered list of staged writes. Clones share the same list.
#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
    pending: Arc<Mutex<Vec<PendingChange>>>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn stage(&self, change: PendingChange) {
        self.pending.lock().await.push(change);
    }

    /// Drain every staged change in staging order
    pub async fn take(&self) -> Vec<PendingChange> {
        std::mem::take(&mut *self.pending.lock().await)
    }

    pub async fn len(&self) -> usize {
        self.pending.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn clones_share_staged_changes() {
        let changes = ChangeSet::new();
        let other = changes.clone();

        other.stage(PendingChange::DeleteHotel(Uuid::new_v4())).await;
        changes.stage(PendingChange::DeleteRoom(Uuid::new_v4())).await;
        assert_eq!(changes.len().await, 2);

        let drained = changes.take().await;
        assert!(matches!(drained[0], PendingChange::DeleteHotel(_)));
        assert!(matches!(drained[1], PendingChange::DeleteRoom(_)));
        assert!(other.is_empty().await);
    }
}
