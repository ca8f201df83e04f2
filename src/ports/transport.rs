//! Transport port - Interface for the realtime socket.
//!
//! The connection manager speaks to this seam, not to any concrete socket
//! library, so connection lifecycle logic is testable against an in-memory
//! transport and the production adapter stays thin.

use async_trait::async_trait;
use secrecy::SecretString;
use thiserror::Error;

use crate::domain::events::ClientMessage;

/// Errors surfaced by the transport.
///
/// None of these reach the user directly; the connection manager recovers
/// by reconnecting and only the status signal changes.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Could not establish the connection
    #[error("Connect failed: {0}")]
    Connect(String),

    /// An established connection failed mid-stream
    #[error("Connection lost: {0}")]
    Io(String),

    /// Outbound message could not be encoded
    #[error("Encode failed: {0}")]
    Encode(String),
}

/// Parameters for establishing a connection.
#[derive(Debug, Clone)]
pub struct ConnectParams {
    /// WebSocket endpoint to dial.
    pub url: String,
    /// Bearer token carried at connect time; not renegotiated per message.
    pub bearer: Option<SecretString>,
}

/// Factory for live connections.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Open a connection. Errors are expected and feed the retry loop.
    async fn connect(
        &self,
        params: &ConnectParams,
    ) -> Result<Box<dyn TransportConnection>, TransportError>;
}

/// One live, bidirectional connection.
#[async_trait]
pub trait TransportConnection: Send {
    /// Send a control message to the server.
    async fn send(&mut self, message: &ClientMessage) -> Result<(), TransportError>;

    /// Receive the next inbound text frame.
    ///
    /// `None` means the server closed the connection; the caller decides
    /// whether to reconnect.
    async fn recv(&mut self) -> Option<Result<String, TransportError>>;

    /// Close the connection gracefully. Errors are ignored by callers.
    async fn close(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_transport_object_safe(_: &dyn Transport) {}

    #[allow(dead_code)]
    fn assert_connection_object_safe(_: &dyn TransportConnection) {}

    #[test]
    fn transport_error_messages_name_the_phase() {
        let err = TransportError::Connect("refused".to_string());
        assert_eq!(format!("{}", err), "Connect failed: refused");
    }
}
