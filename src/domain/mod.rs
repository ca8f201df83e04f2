//! Domain layer: value objects, the event taxonomy, and the notification log.

pub mod events;
pub mod foundation;
pub mod notifications;
