//! Bell-panel notification log.
//!
//! [`NotificationLog`] is the pure, single-threaded core: an ordered,
//! bounded, most-recent-first list with read tracking. The thread-safe
//! store the dispatcher writes into lives in the application layer and
//! wraps this type.

mod toast;

pub use toast::{Toast, ToastSeverity};

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::domain::events::{
    EventKind, InventoryAlert, OrderSummary, ReservationSummary, ServerEvent, TableSummary,
};
use crate::domain::foundation::{NotificationId, Timestamp};

/// Domain object a notification points at.
///
/// Carried as decoded at the transport boundary; screens treat it as an
/// opaque reference and refetch the authoritative record over REST.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotificationPayload {
    Order(OrderSummary),
    Inventory(InventoryAlert),
    Table(TableSummary),
    Reservation(ReservationSummary),
    None,
}

/// One entry in the bell panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: EventKind,
    pub title: String,
    pub message: String,
    pub payload: NotificationPayload,
    pub read: bool,
    /// Arrival time at this client, not the server-side event time.
    pub received_at: Timestamp,
}

impl Notification {
    /// Build a notification from a classified event.
    ///
    /// Exactly one notification is built per inbound event; the id comes
    /// from the store's monotonic counter.
    pub fn from_event(id: NotificationId, event: &ServerEvent, received_at: Timestamp) -> Self {
        let (title, payload) = match event {
            ServerEvent::NewOrder { order, .. } => {
                ("New order".to_string(), NotificationPayload::Order(order.clone()))
            }
            ServerEvent::OrderReady { order, .. } => {
                ("Order ready".to_string(), NotificationPayload::Order(order.clone()))
            }
            ServerEvent::OrderStatusChanged { order, .. } => {
                ("Order update".to_string(), NotificationPayload::Order(order.clone()))
            }
            ServerEvent::InventoryLow { inventory, .. } => (
                "Low stock".to_string(),
                NotificationPayload::Inventory(inventory.clone()),
            ),
            ServerEvent::TableUpdated { table, .. } => (
                "Table update".to_string(),
                NotificationPayload::Table(table.clone()),
            ),
            ServerEvent::ReservationCreated { reservation, .. } => (
                "New reservation".to_string(),
                NotificationPayload::Reservation(reservation.clone()),
            ),
            ServerEvent::CustomNotification { title, .. } => (
                title.clone().unwrap_or_else(|| "Notification".to_string()),
                NotificationPayload::None,
            ),
        };

        Self {
            id,
            kind: event.kind(),
            title,
            message: event.message().to_string(),
            payload,
            read: false,
            received_at,
        }
    }
}

/// Ordered, capped log of notifications, newest first.
///
/// Beyond the cap the oldest entries are silently dropped. Read-state
/// changes never reorder entries.
#[derive(Debug, Clone)]
pub struct NotificationLog {
    entries: VecDeque<Notification>,
    cap: usize,
}

impl NotificationLog {
    /// Create an empty log with the given capacity.
    pub fn new(cap: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(cap),
            cap,
        }
    }

    /// Default bell-panel capacity.
    pub fn with_default_cap() -> Self {
        Self::new(50)
    }

    /// Prepend a notification; drop the oldest entry past the cap.
    pub fn add(&mut self, notification: Notification) {
        self.entries.push_front(notification);
        while self.entries.len() > self.cap {
            self.entries.pop_back();
        }
    }

    /// Mark one entry read. No-op if the id is absent.
    pub fn mark_read(&mut self, id: NotificationId) {
        if let Some(entry) = self.entries.iter_mut().find(|n| n.id == id) {
            entry.read = true;
        }
    }

    /// Mark every entry read.
    pub fn mark_all_read(&mut self) {
        for entry in &mut self.entries {
            entry.read = true;
        }
    }

    /// Remove one entry. No-op if the id is absent.
    pub fn clear(&mut self, id: NotificationId) {
        self.entries.retain(|n| n.id != id);
    }

    /// Remove every entry.
    pub fn clear_all(&mut self) {
        self.entries.clear();
    }

    /// Count of unread entries, always recomputed from the list itself.
    pub fn unread_count(&self) -> usize {
        self.entries.iter().filter(|n| !n.read).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    /// Owned copy of the entries, newest first.
    pub fn snapshot(&self) -> Vec<Notification> {
        self.entries.iter().cloned().collect()
    }
}
