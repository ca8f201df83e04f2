//! Toast tray: the ephemeral alert channel.
//!
//! Holds currently visible toasts and expires them on read. Independent
//! of the notification log: the same event feeds both, but a dismissed
//! toast leaves no trace while the bell entry stays.

use std::sync::RwLock;

use uuid::Uuid;

use crate::domain::foundation::Timestamp;
use crate::domain::notifications::Toast;
use crate::ports::ToastSink;

/// In-memory tray of active toasts.
///
/// Expiry is evaluated against the wall clock whenever the tray is read,
/// so no background timer is needed and nothing persists.
pub struct ToastTray {
    active: RwLock<Vec<Toast>>,
}

impl ToastTray {
    /// Create an empty tray.
    pub fn new() -> Self {
        Self {
            active: RwLock::new(Vec::new()),
        }
    }

    /// Currently visible toasts, oldest first, expired ones pruned.
    pub fn active(&self) -> Vec<Toast> {
        self.prune();
        self.active
            .read()
            .expect("ToastTray: lock poisoned")
            .clone()
    }

    /// Dismiss one toast early. No-op if it already expired.
    pub fn dismiss(&self, id: Uuid) {
        self.active
            .write()
            .expect("ToastTray: lock poisoned")
            .retain(|t| t.id != id);
    }

    /// Drop expired toasts.
    fn prune(&self) {
        let now = Timestamp::now();
        self.active
            .write()
            .expect("ToastTray: lock poisoned")
            .retain(|t| !t.is_expired(now));
    }
}

impl Default for ToastTray {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastSink for ToastTray {
    fn push(&self, toast: Toast) {
        self.prune();
        self.active
            .write()
            .expect("ToastTray: lock poisoned")
            .push(toast);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::domain::events::{OrderSummary, ServerEvent};

    fn toast(ttl: Duration) -> Toast {
        let event = ServerEvent::OrderReady {
            order: OrderSummary::default(),
            message: "Order #5 is ready for delivery".to_string(),
            timestamp: None,
        };
        Toast::from_event(&event, ttl)
    }

    #[test]
    fn push_makes_toast_visible() {
        let tray = ToastTray::new();
        tray.push(toast(Duration::from_secs(60)));

        assert_eq!(tray.active().len(), 1);
    }

    #[test]
    fn expired_toasts_are_pruned_on_read() {
        let tray = ToastTray::new();
        tray.push(toast(Duration::ZERO));
        tray.push(toast(Duration::from_secs(60)));

        // The zero-ttl toast is already past its expiry.
        let visible = tray.active();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].duration, Duration::from_secs(60));
    }

    #[test]
    fn dismiss_removes_single_toast() {
        let tray = ToastTray::new();
        tray.push(toast(Duration::from_secs(60)));
        tray.push(toast(Duration::from_secs(60)));

        let id = tray.active()[0].id;
        tray.dismiss(id);

        let visible = tray.active();
        assert_eq!(visible.len(), 1);
        assert!(visible.iter().all(|t| t.id != id));
    }

    #[test]
    fn dismiss_unknown_id_is_noop() {
        let tray = ToastTray::new();
        tray.push(toast(Duration::from_secs(60)));

        tray.dismiss(Uuid::new_v4());
        assert_eq!(tray.active().len(), 1);
    }
}
