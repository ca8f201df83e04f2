//! Ports: trait seams between the realtime core and its collaborators.

mod event_handler;
mod session_store;
mod state_fetcher;
mod toast_sink;
mod transport;

pub use event_handler::EventHandler;
pub use session_store::{SessionStore, SessionStoreError, StoredSession};
pub use state_fetcher::{Fetch, StateFetcher};
pub use toast_sink::ToastSink;
pub use transport::{ConnectParams, Transport, TransportConnection, TransportError};
