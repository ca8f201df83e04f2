//! In-memory transport for exercising the connection lifecycle in tests.
//!
//! Records every outbound control message, lets tests feed inbound
//! frames, and can simulate connection failures and mid-stream drops.
//! Not used in production.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::domain::events::ClientMessage;
use crate::ports::{ConnectParams, Transport, TransportConnection, TransportError};

struct State {
    sent: Vec<ClientMessage>,
    connects: usize,
    fail_remaining: usize,
    live: Option<mpsc::UnboundedSender<Result<String, TransportError>>>,
}

/// Scriptable transport backed by channels.
pub struct InMemoryTransport {
    inner: Arc<Mutex<State>>,
}

impl InMemoryTransport {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(State {
                sent: Vec::new(),
                connects: 0,
                fail_remaining: 0,
                live: None,
            })),
        }
    }

    /// Make the next `n` connect attempts fail.
    pub fn fail_next_connects(&self, n: usize) {
        self.lock().fail_remaining = n;
    }

    /// Feed an inbound text frame to the live connection. No-op when
    /// nothing is connected.
    pub fn emit(&self, frame: &str) {
        if let Some(tx) = self.lock().live.as_ref() {
            let _ = tx.send(Ok(frame.to_string()));
        }
    }

    /// Feed a stream error to the live connection.
    pub fn emit_error(&self, message: &str) {
        if let Some(tx) = self.lock().live.as_ref() {
            let _ = tx.send(Err(TransportError::Io(message.to_string())));
        }
    }

    /// Kill the live connection as if the server dropped it.
    pub fn drop_connection(&self) {
        self.lock().live = None;
    }

    /// Total connect attempts, failed ones included.
    pub fn connect_count(&self) -> usize {
        self.lock().connects
    }

    /// Every control message sent so far, in order.
    pub fn sent(&self) -> Vec<ClientMessage> {
        self.lock().sent.clone()
    }

    /// Join messages sent so far, in order.
    pub fn joins(&self) -> Vec<ClientMessage> {
        self.lock()
            .sent
            .iter()
            .filter(|m| matches!(m, ClientMessage::JoinRoom { .. }))
            .cloned()
            .collect()
    }

    pub fn join_count(&self) -> usize {
        self.joins().len()
    }

    pub fn leave_count(&self) -> usize {
        self.lock()
            .sent
            .iter()
            .filter(|m| matches!(m, ClientMessage::LeaveRoom { .. }))
            .count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.inner.lock().expect("InMemoryTransport: lock poisoned")
    }
}

impl Default for InMemoryTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for InMemoryTransport {
    async fn connect(
        &self,
        _params: &ConnectParams,
    ) -> Result<Box<dyn TransportConnection>, TransportError> {
        let mut state = self.lock();
        state.connects += 1;
        if state.fail_remaining > 0 {
            state.fail_remaining -= 1;
            return Err(TransportError::Connect("scripted failure".to_string()));
        }

        let (tx, rx) = mpsc::unbounded_channel();
        state.live = Some(tx);
        drop(state);

        Ok(Box::new(InMemoryConnection {
            inner: Arc::clone(&self.inner),
            rx,
        }))
    }
}

struct InMemoryConnection {
    inner: Arc<Mutex<State>>,
    rx: mpsc::UnboundedReceiver<Result<String, TransportError>>,
}

#[async_trait]
impl TransportConnection for InMemoryConnection {
    async fn send(&mut self, message: &ClientMessage) -> Result<(), TransportError> {
        self.inner
            .lock()
            .expect("InMemoryTransport: lock poisoned")
            .sent
            .push(message.clone());
        Ok(())
    }

    async fn recv(&mut self) -> Option<Result<String, TransportError>> {
        self.rx.recv().await
    }

    async fn close(&mut self) {
        self.rx.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Role, SessionIdentity, UserId};

    fn params() -> ConnectParams {
        ConnectParams {
            url: "ws://test/socket".to_string(),
            bearer: None,
        }
    }

    #[tokio::test]
    async fn records_sent_messages() {
        let transport = InMemoryTransport::new();
        let mut conn = transport.connect(&params()).await.unwrap();

        let identity = SessionIdentity::new(UserId::new(1), Role::Staff, "dana");
        conn.send(&ClientMessage::join_room(&identity)).await.unwrap();
        conn.send(&ClientMessage::leave_room(&identity)).await.unwrap();

        assert_eq!(transport.join_count(), 1);
        assert_eq!(transport.leave_count(), 1);
    }

    #[tokio::test]
    async fn emitted_frames_arrive_in_order() {
        let transport = InMemoryTransport::new();
        let mut conn = transport.connect(&params()).await.unwrap();

        transport.emit("one");
        transport.emit("two");

        assert_eq!(conn.recv().await.unwrap().unwrap(), "one");
        assert_eq!(conn.recv().await.unwrap().unwrap(), "two");
    }

    #[tokio::test]
    async fn drop_connection_closes_the_stream() {
        let transport = InMemoryTransport::new();
        let mut conn = transport.connect(&params()).await.unwrap();

        transport.drop_connection();
        assert!(conn.recv().await.is_none());
    }

    #[tokio::test]
    async fn scripted_failures_then_success() {
        let transport = InMemoryTransport::new();
        transport.fail_next_connects(2);

        assert!(transport.connect(&params()).await.is_err());
        assert!(transport.connect(&params()).await.is_err());
        assert!(transport.connect(&params()).await.is_ok());
        assert_eq!(transport.connect_count(), 3);
    }
}
