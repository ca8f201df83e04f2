//! Ephemeral toast alerts.
//!
//! Toasts are a side channel for the same source events that feed the
//! notification log: they self-expire and are never persisted. One toast
//! per inbound event, with a kind-specific severity.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::events::{EventSeverity, ServerEvent};
use crate::domain::foundation::Timestamp;

/// Visual weight of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastSeverity {
    Info,
    Success,
    Warning,
    Error,
}

impl From<EventSeverity> for ToastSeverity {
    fn from(severity: EventSeverity) -> Self {
        match severity {
            EventSeverity::Info => ToastSeverity::Info,
            EventSeverity::Success => ToastSeverity::Success,
            EventSeverity::Warning => ToastSeverity::Warning,
            EventSeverity::Error => ToastSeverity::Error,
        }
    }
}

/// A self-expiring visual alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toast {
    pub id: Uuid,
    pub message: String,
    pub severity: ToastSeverity,
    /// How long the toast stays visible.
    pub duration: Duration,
    pub created_at: Timestamp,
}

impl Toast {
    /// Build the toast for a classified event.
    ///
    /// Severity mapping: ready orders read as success, low stock as a
    /// warning (unless the server says otherwise), custom notifications
    /// honor the server severity, everything else is informational.
    pub fn from_event(event: &ServerEvent, duration: Duration) -> Self {
        let severity = match event {
            ServerEvent::OrderReady { .. } => ToastSeverity::Success,
            ServerEvent::InventoryLow { severity, .. } => severity
                .map(ToastSeverity::from)
                .unwrap_or(ToastSeverity::Warning),
            ServerEvent::CustomNotification { severity, .. } => severity
                .map(ToastSeverity::from)
                .unwrap_or(ToastSeverity::Info),
            _ => ToastSeverity::Info,
        };

        Self {
            id: Uuid::new_v4(),
            message: event.message().to_string(),
            severity,
            duration,
            created_at: Timestamp::now(),
        }
    }

    /// When this toast should disappear.
    pub fn expires_at(&self) -> Timestamp {
        self.created_at.plus(self.duration)
    }

    /// Whether the toast has outlived its duration as of `now`.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now.is_after(&self.expires_at())
    }
}
