//! Inbound realtime event taxonomy.
//!
//! Every message the server pushes is decoded here, at the transport
//! boundary, into exactly one variant of [`ServerEvent`]. Downstream
//! consumers (notification log, toast channel, feature handlers) never see
//! raw JSON. Unknown `type` tags fail decoding and are dropped by the
//! dispatcher; forward compatibility is preferred over strict parsing.
//!
//! Payload fields are deliberately lenient: the event payload is a signal,
//! not a source of truth, and its shape is not guaranteed to match the REST
//! representation of the same object. Screens refetch instead of patching.

use serde::{Deserialize, Serialize};

// ============================================
// Event Kinds
// ============================================

/// The fixed taxonomy inbound messages are classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    NewOrder,
    OrderReady,
    OrderStatusChanged,
    InventoryLow,
    TableUpdated,
    ReservationCreated,
    CustomNotification,
}

impl EventKind {
    /// All kinds, in a stable order (useful for bulk subscription).
    pub const ALL: [EventKind; 7] = [
        EventKind::NewOrder,
        EventKind::OrderReady,
        EventKind::OrderStatusChanged,
        EventKind::InventoryLow,
        EventKind::TableUpdated,
        EventKind::ReservationCreated,
        EventKind::CustomNotification,
    ];

    /// Wire name of the kind (the `type` tag value).
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::NewOrder => "new_order",
            EventKind::OrderReady => "order_ready",
            EventKind::OrderStatusChanged => "order_status_changed",
            EventKind::InventoryLow => "inventory_low",
            EventKind::TableUpdated => "table_updated",
            EventKind::ReservationCreated => "reservation_created",
            EventKind::CustomNotification => "custom_notification",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================
// Payload Shapes
// ============================================

/// Order fields embedded in order-related events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub table_id: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Inventory fields embedded in low-stock alerts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryAlert {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub item_name: Option<String>,
    #[serde(default)]
    pub current_quantity: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
}

/// Table fields embedded in table-state events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableSummary {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub table_number: Option<i32>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Reservation fields embedded in reservation events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReservationSummary {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub guest_count: Option<i32>,
    #[serde(default)]
    pub reservation_time: Option<String>,
}

/// Severity attached to inventory alerts and custom notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventSeverity {
    Info,
    Success,
    Warning,
    Error,
}

// ============================================
// The Tagged Union
// ============================================

/// A normalized inbound event, one variant per kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    NewOrder {
        #[serde(default)]
        order: OrderSummary,
        #[serde(default)]
        message: String,
        #[serde(default)]
        timestamp: Option<String>,
    },
    OrderReady {
        #[serde(default)]
        order: OrderSummary,
        #[serde(default)]
        message: String,
        #[serde(default)]
        timestamp: Option<String>,
    },
    OrderStatusChanged {
        #[serde(default)]
        order: OrderSummary,
        #[serde(default)]
        message: String,
        #[serde(default)]
        timestamp: Option<String>,
    },
    InventoryLow {
        #[serde(default)]
        inventory: InventoryAlert,
        #[serde(default)]
        message: String,
        #[serde(default)]
        timestamp: Option<String>,
        #[serde(default)]
        severity: Option<EventSeverity>,
    },
    TableUpdated {
        #[serde(default)]
        table: TableSummary,
        #[serde(default)]
        message: String,
        #[serde(default)]
        timestamp: Option<String>,
    },
    ReservationCreated {
        #[serde(default)]
        reservation: ReservationSummary,
        #[serde(default)]
        message: String,
        #[serde(default)]
        timestamp: Option<String>,
    },
    CustomNotification {
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        message: String,
        #[serde(default)]
        severity: Option<EventSeverity>,
        #[serde(default)]
        timestamp: Option<String>,
    },
}

impl ServerEvent {
    /// The kind this event was classified into.
    pub fn kind(&self) -> EventKind {
        match self {
            ServerEvent::NewOrder { .. } => EventKind::NewOrder,
            ServerEvent::OrderReady { .. } => EventKind::OrderReady,
            ServerEvent::OrderStatusChanged { .. } => EventKind::OrderStatusChanged,
            ServerEvent::InventoryLow { .. } => EventKind::InventoryLow,
            ServerEvent::TableUpdated { .. } => EventKind::TableUpdated,
            ServerEvent::ReservationCreated { .. } => EventKind::ReservationCreated,
            ServerEvent::CustomNotification { .. } => EventKind::CustomNotification,
        }
    }

    /// The server-supplied human-readable message.
    pub fn message(&self) -> &str {
        match self {
            ServerEvent::NewOrder { message, .. }
            | ServerEvent::OrderReady { message, .. }
            | ServerEvent::OrderStatusChanged { message, .. }
            | ServerEvent::InventoryLow { message, .. }
            | ServerEvent::TableUpdated { message, .. }
            | ServerEvent::ReservationCreated { message, .. }
            | ServerEvent::CustomNotification { message, .. } => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_new_order_event() {
        let json = r#"{
            "type": "new_order",
            "order": {"id": 12, "status": "pending", "created_at": "2025-03-01T12:00:00Z"},
            "message": "New order #12 received",
            "timestamp": "2025-03-01T12:00:00Z"
        }"#;

        let event: ServerEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.kind(), EventKind::NewOrder);
        assert_eq!(event.message(), "New order #12 received");

        match event {
            ServerEvent::NewOrder { order, .. } => {
                assert_eq!(order.id, Some(12));
                assert_eq!(order.status.as_deref(), Some("pending"));
            }
            other => panic!("wrong variant: {:?}", other),
        }
    }

    #[test]
    fn decodes_inventory_low_with_severity() {
        let json = r#"{
            "type": "inventory_low",
            "inventory": {"item_name": "Tomatoes", "current_quantity": 2.5, "unit": "kg"},
            "message": "Low stock alert: Tomatoes (2.5 left)",
            "severity": "warning"
        }"#;

        let event: ServerEvent = serde_json::from_str(json).unwrap();
        match event {
            ServerEvent::InventoryLow {
                inventory,
                severity,
                ..
            } => {
                assert_eq!(inventory.item_name.as_deref(), Some("Tomatoes"));
                assert_eq!(severity, Some(EventSeverity::Warning));
            }
            other => panic!("wrong variant: {:?}", other),
        }
    }

    #[test]
    fn unknown_type_tag_fails_to_decode() {
        let json = r#"{"type": "order_item_updated", "message": "whatever"}"#;
        assert!(serde_json::from_str::<ServerEvent>(json).is_err());
    }

    #[test]
    fn missing_payload_fields_default_instead_of_failing() {
        // The server does not promise payload completeness.
        let json = r#"{"type": "table_updated"}"#;
        let event: ServerEvent = serde_json::from_str(json).unwrap();

        match event {
            ServerEvent::TableUpdated { table, message, .. } => {
                assert_eq!(table, TableSummary::default());
                assert!(message.is_empty());
            }
            other => panic!("wrong variant: {:?}", other),
        }
    }

    #[test]
    fn extra_payload_fields_are_ignored() {
        let json = r#"{
            "type": "reservation_created",
            "reservation": {"id": 3, "guest_count": 4, "table_preference": "window"},
            "message": "New reservation for 4 guests"
        }"#;

        let event: ServerEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.kind(), EventKind::ReservationCreated);
    }

    #[test]
    fn kind_wire_names_match_tags() {
        for kind in EventKind::ALL {
            let tag = serde_json::to_value(kind).unwrap();
            assert_eq!(tag, serde_json::Value::String(kind.as_str().to_string()));
        }
    }

    #[test]
    fn custom_notification_carries_optional_title() {
        let json = r#"{
            "type": "custom_notification",
            "title": "Shift change",
            "message": "Evening shift starts in 15 minutes",
            "severity": "info"
        }"#;

        let event: ServerEvent = serde_json::from_str(json).unwrap();
        match event {
            ServerEvent::CustomNotification { title, .. } => {
                assert_eq!(title.as_deref(), Some("Shift change"));
            }
            other => panic!("wrong variant: {:?}", other),
        }
    }
}
