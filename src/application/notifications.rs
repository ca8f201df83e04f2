//! Thread-safe notification store for the bell panel.
//!
//! Wraps the pure [`NotificationLog`] with locking and monotonic id
//! assignment. The dispatcher writes into it; the bell panel reads
//! snapshots and toggles read state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use crate::domain::events::ServerEvent;
use crate::domain::foundation::{NotificationId, Timestamp};
use crate::domain::notifications::{Notification, NotificationLog};

/// Shared, capped, most-recent-first notification store.
pub struct NotificationStore {
    log: RwLock<NotificationLog>,
    next_id: AtomicU64,
}

impl NotificationStore {
    /// Create a store with the given cap.
    pub fn new(cap: usize) -> Self {
        Self {
            log: RwLock::new(NotificationLog::new(cap)),
            next_id: AtomicU64::new(1),
        }
    }

    /// Create a store with the default bell-panel cap (50).
    pub fn with_default_cap() -> Self {
        Self::new(50)
    }

    /// Record a notification for a classified event.
    ///
    /// Assigns the next monotonic id and stamps arrival time. Exactly one
    /// notification exists per inbound event; the dispatcher is the only
    /// caller on the hot path.
    pub fn add_for_event(&self, event: &ServerEvent) -> NotificationId {
        let id = NotificationId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let notification = Notification::from_event(id, event, Timestamp::now());
        self.write().add(notification);
        id
    }

    /// Insert an already-built notification (tests, imports).
    pub fn add(&self, notification: Notification) {
        self.write().add(notification);
    }

    /// Mark one entry read. No-op if absent.
    pub fn mark_read(&self, id: NotificationId) {
        self.write().mark_read(id);
    }

    /// Mark every entry read.
    pub fn mark_all_read(&self) {
        self.write().mark_all_read();
    }

    /// Remove one entry. No-op if absent.
    pub fn clear(&self, id: NotificationId) {
        self.write().clear(id);
    }

    /// Remove every entry.
    pub fn clear_all(&self) {
        self.write().clear_all();
    }

    /// Unread count, recomputed from the log on every call.
    pub fn unread_count(&self) -> usize {
        self.read().unread_count()
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Entries newest first.
    pub fn snapshot(&self) -> Vec<Notification> {
        self.read().snapshot()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, NotificationLog> {
        self.log.read().expect("NotificationStore: log lock poisoned")
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, NotificationLog> {
        self.log.write().expect("NotificationStore: log lock poisoned")
    }
}

impl Default for NotificationStore {
    fn default() -> Self {
        Self::with_default_cap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::events::OrderSummary;

    fn new_order(id: i64) -> ServerEvent {
        ServerEvent::NewOrder {
            order: OrderSummary {
                id: Some(id),
                ..Default::default()
            },
            message: format!("New order #{} received", id),
            timestamp: None,
        }
    }

    #[test]
    fn ids_are_strictly_increasing() {
        let store = NotificationStore::with_default_cap();

        let first = store.add_for_event(&new_order(1));
        let second = store.add_for_event(&new_order(2));
        let third = store.add_for_event(&new_order(3));

        assert!(first < second);
        assert!(second < third);
    }

    #[test]
    fn fifty_one_adds_retain_fifty_most_recent() {
        let store = NotificationStore::with_default_cap();

        let mut ids = Vec::new();
        for n in 1..=51 {
            ids.push(store.add_for_event(&new_order(n)));
        }

        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 50);
        // Newest first; the very first insert fell off the back.
        assert_eq!(snapshot.first().map(|n| n.id), ids.last().copied());
        assert_eq!(snapshot.last().map(|n| n.id), Some(ids[1]));
        assert!(!snapshot.iter().any(|n| n.id == ids[0]));
    }

    #[test]
    fn unread_count_tracks_read_toggles() {
        let store = NotificationStore::with_default_cap();

        let a = store.add_for_event(&new_order(1));
        let _b = store.add_for_event(&new_order(2));
        assert_eq!(store.unread_count(), 2);

        store.mark_read(a);
        assert_eq!(store.unread_count(), 1);

        store.mark_all_read();
        assert_eq!(store.unread_count(), 0);

        store.add_for_event(&new_order(3));
        assert_eq!(store.unread_count(), 1);
    }

    #[test]
    fn clear_operations_remove_entries() {
        let store = NotificationStore::with_default_cap();

        let a = store.add_for_event(&new_order(1));
        store.add_for_event(&new_order(2));

        store.clear(a);
        assert_eq!(store.len(), 1);

        store.clear_all();
        assert!(store.is_empty());
        assert_eq!(store.unread_count(), 0);
    }

    #[test]
    fn mark_read_unknown_id_is_noop() {
        let store = NotificationStore::with_default_cap();
        store.add_for_event(&new_order(1));

        store.mark_read(NotificationId::new(9999));
        assert_eq!(store.unread_count(), 1);
    }
}
