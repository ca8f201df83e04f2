//! Realtime event taxonomy and wire protocol.

mod event;
mod protocol;

pub use event::{
    EventKind, EventSeverity, InventoryAlert, OrderSummary, ReservationSummary, ServerEvent,
    TableSummary,
};
pub use protocol::ClientMessage;
