//! Application layer: the realtime core's moving parts.
//!
//! Everything stateful lives here, owned by [`RealtimeService`]: the
//! subscription registry, the notification store, the toast tray, the
//! dispatcher, the connection manager, and the polling/refetch machinery.

pub mod connection;
pub mod dispatcher;
pub mod notifications;
pub mod polling;
pub mod refetch;
pub mod registry;
pub mod service;
pub mod toasts;

pub use connection::{ConnectionManager, ConnectionStatus};
pub use dispatcher::EventRouter;
pub use notifications::NotificationStore;
pub use polling::{spawn_poll, PollHandle};
pub use refetch::{RefetchHandler, ScreenState, ViewState};
pub use registry::{Subscription, SubscriptionRegistry};
pub use service::RealtimeService;
pub use toasts::ToastTray;
