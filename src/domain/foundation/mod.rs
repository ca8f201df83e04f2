//! Foundation value objects shared across the realtime core.

mod errors;
mod identity;
mod ids;
mod role;
mod timestamp;

pub use errors::{DomainError, ErrorCode};
pub use identity::SessionIdentity;
pub use ids::{NotificationId, UserId};
pub use role::{Role, Room};
pub use timestamp::Timestamp;
