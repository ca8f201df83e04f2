//! Connection manager: one live realtime connection per session.
//!
//! Owns the socket lifecycle end to end: connect, join the role's room,
//! pump inbound frames into the dispatcher, and recover from drops with
//! an indefinite fixed-interval retry loop. Transport failures are never
//! surfaced as user-facing errors; the only externally observable state
//! is the status signal (disconnected -> connecting -> connected).
//!
//! There is no event replay: whatever was missed during a reconnect gap
//! is corrected by each screen's polling fallback, not by the socket.

use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

use crate::application::dispatcher::EventRouter;
use crate::domain::events::ClientMessage;
use crate::domain::foundation::SessionIdentity;
use crate::ports::{ConnectParams, Transport, TransportConnection};

/// Externally observable connection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Disconnected,
    Connecting,
    Connected,
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ConnectionStatus::Disconnected => "disconnected",
            ConnectionStatus::Connecting => "connecting",
            ConnectionStatus::Connected => "connected",
        };
        write!(f, "{}", s)
    }
}

struct Live {
    handle: JoinHandle<()>,
    shutdown_tx: watch::Sender<bool>,
}

/// Maintains at most one live connection tied to the current session.
pub struct ConnectionManager {
    transport: Arc<dyn Transport>,
    router: Arc<EventRouter>,
    url: String,
    reconnect_interval: Duration,
    status_tx: watch::Sender<ConnectionStatus>,
    live: Mutex<Option<Live>>,
}

impl ConnectionManager {
    pub fn new(
        transport: Arc<dyn Transport>,
        router: Arc<EventRouter>,
        url: impl Into<String>,
        reconnect_interval: Duration,
    ) -> Self {
        let (status_tx, _) = watch::channel(ConnectionStatus::Disconnected);
        Self {
            transport,
            router,
            url: url.into(),
            reconnect_interval,
            status_tx,
            live: Mutex::new(None),
        }
    }

    /// Watch the connection status (for live/offline indicators).
    pub fn status(&self) -> watch::Receiver<ConnectionStatus> {
        self.status_tx.subscribe()
    }

    /// The status right now.
    pub fn current_status(&self) -> ConnectionStatus {
        *self.status_tx.subscribe().borrow()
    }

    /// Start the connection loop for a session.
    ///
    /// No-op if a connection loop is already running: calling twice with
    /// an already-live session emits no second join. On transport open the
    /// loop emits a join-room message carrying the session identity, then
    /// pumps inbound frames into the dispatcher. Failures retry forever at
    /// the configured interval.
    pub async fn connect(&self, identity: &SessionIdentity, bearer: Option<SecretString>) {
        let mut live = self.live.lock().await;
        if let Some(existing) = live.as_ref() {
            if !existing.handle.is_finished() {
                tracing::debug!("Connection already live, ignoring connect");
                return;
            }
        }

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let params = ConnectParams {
            url: self.url.clone(),
            bearer,
        };
        let loop_ctx = ConnectionLoop {
            transport: Arc::clone(&self.transport),
            router: Arc::clone(&self.router),
            params,
            join: ClientMessage::join_room(identity),
            leave: ClientMessage::leave_room(identity),
            status_tx: self.status_tx.clone(),
            reconnect_interval: self.reconnect_interval,
        };

        tracing::info!(
            user_id = %identity.user_id,
            role = %identity.role,
            room = %identity.role.room(),
            "Starting realtime connection"
        );

        let handle = tokio::spawn(loop_ctx.run(shutdown_rx));
        *live = Some(Live {
            handle,
            shutdown_tx,
        });
    }

    /// Tear the connection down.
    ///
    /// Emits a leave-room message when connected, then closes the
    /// transport. Idempotent: calling twice, or without a prior connect,
    /// is safe.
    pub async fn disconnect(&self) {
        let taken = self.live.lock().await.take();
        let Some(live) = taken else {
            return;
        };

        let _ = live.shutdown_tx.send(true);
        let _ = live.handle.await;
        tracing::info!("Realtime connection torn down");
    }
}

/// Everything the spawned connection loop needs, moved into the task.
struct ConnectionLoop {
    transport: Arc<dyn Transport>,
    router: Arc<EventRouter>,
    params: ConnectParams,
    join: ClientMessage,
    leave: ClientMessage,
    status_tx: watch::Sender<ConnectionStatus>,
    reconnect_interval: Duration,
}

impl ConnectionLoop {
    async fn run(self, mut shutdown_rx: watch::Receiver<bool>) {
        loop {
            self.status_tx.send_replace(ConnectionStatus::Connecting);

            match self.transport.connect(&self.params).await {
                Ok(mut conn) => match conn.send(&self.join).await {
                    Ok(()) => {
                        self.status_tx.send_replace(ConnectionStatus::Connected);
                        tracing::info!("Realtime connection established");

                        let shut_down =
                            self.pump(conn.as_mut(), &mut shutdown_rx).await;
                        if shut_down {
                            let _ = conn.send(&self.leave).await;
                            conn.close().await;
                            self.status_tx.send_replace(ConnectionStatus::Disconnected);
                            return;
                        }
                    }
                    Err(error) => {
                        tracing::warn!(%error, "Join emission failed, will retry");
                        conn.close().await;
                    }
                },
                Err(error) => {
                    tracing::debug!(%error, "Connect attempt failed, will retry");
                }
            }

            self.status_tx.send_replace(ConnectionStatus::Disconnected);

            tokio::select! {
                _ = tokio::time::sleep(self.reconnect_interval) => {}
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        return;
                    }
                }
            }
        }
    }

    /// Pump inbound frames until the connection dies or shutdown is
    /// requested. Returns true on shutdown, false on connection loss.
    async fn pump(
        &self,
        conn: &mut dyn TransportConnection,
        shutdown_rx: &mut watch::Receiver<bool>,
    ) -> bool {
        loop {
            tokio::select! {
                inbound = conn.recv() => match inbound {
                    Some(Ok(frame)) => self.router.route_raw(&frame).await,
                    Some(Err(error)) => {
                        tracing::warn!(%error, "Realtime stream error");
                        return false;
                    }
                    None => {
                        tracing::info!("Realtime connection closed by server");
                        return false;
                    }
                },
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        return true;
                    }
                }
            }
        }
    }
}
