//! Transport adapters: the production WebSocket and an in-memory double.

mod in_memory;
mod tungstenite;

pub use in_memory::InMemoryTransport;
pub use tungstenite::WebSocketTransport;
