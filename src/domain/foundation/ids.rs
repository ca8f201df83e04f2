//! Typed identifiers for the realtime core.

use serde::{Deserialize, Serialize};

/// Identifier of an authenticated user, assigned by the backend at signup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a notification log entry.
///
/// Assigned by the notification store from a monotonic counter, so later
/// entries always carry strictly greater ids even when inserted within the
/// same clock tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(u64);

impl NotificationId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for NotificationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_round_trips_value() {
        let id = UserId::new(42);
        assert_eq!(id.value(), 42);
        assert_eq!(format!("{}", id), "42");
    }

    #[test]
    fn notification_ids_order_by_value() {
        assert!(NotificationId::new(2) > NotificationId::new(1));
    }

    #[test]
    fn user_id_serializes_transparently() {
        let json = serde_json::to_string(&UserId::new(7)).unwrap();
        assert_eq!(json, "7");
    }
}
