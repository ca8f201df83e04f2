//! Realtime service: the single owned object the rest of the client
//! talks to.
//!
//! Wires the subscription registry, notification store, toast tray,
//! dispatcher, and connection manager together, and exposes an explicit
//! lifecycle: `init` on startup or login, `teardown` on logout or exit.
//! Nothing here is global; the service is constructed once and handed
//! around by reference.

use std::sync::Arc;

use crate::application::connection::{ConnectionManager, ConnectionStatus};
use crate::application::dispatcher::EventRouter;
use crate::application::notifications::NotificationStore;
use crate::application::registry::{Subscription, SubscriptionRegistry};
use crate::application::toasts::ToastTray;
use crate::config::RealtimeConfig;
use crate::domain::events::EventKind;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{EventHandler, SessionStore, SessionStoreError, ToastSink, Transport};

/// Owns the realtime core end to end.
pub struct RealtimeService {
    registry: Arc<SubscriptionRegistry>,
    notifications: Arc<NotificationStore>,
    toasts: Arc<ToastTray>,
    connection: ConnectionManager,
}

impl RealtimeService {
    /// Build the service from a transport and realtime configuration.
    ///
    /// Construction wires everything but connects nothing; call
    /// [`init`](Self::init) to go live.
    pub fn new(transport: Arc<dyn Transport>, config: &RealtimeConfig) -> Self {
        let registry = Arc::new(SubscriptionRegistry::new());
        let notifications = Arc::new(NotificationStore::new(config.notification_cap));
        let toasts = Arc::new(ToastTray::new());

        let router = Arc::new(EventRouter::new(
            Arc::clone(&registry),
            Arc::clone(&notifications),
            Arc::clone(&toasts) as Arc<dyn ToastSink>,
            config.toast_ttl(),
        ));

        let connection = ConnectionManager::new(
            transport,
            router,
            config.url.clone(),
            config.reconnect_interval(),
        );

        Self {
            registry,
            notifications,
            toasts,
            connection,
        }
    }

    /// Bring the service up from persisted session state.
    ///
    /// Reads the session store once; with a logged-in session the
    /// connection loop starts and `Ok(true)` is returned. With no session
    /// the service stays offline and returns `Ok(false)`. Either way the
    /// service is usable afterwards: subscriptions and the notification
    /// log work offline, they just receive nothing until a connection
    /// exists.
    pub async fn init(&self, sessions: &dyn SessionStore) -> Result<bool, DomainError> {
        let session = match sessions.load().await {
            Ok(session) => session,
            Err(SessionStoreError::Storage(message)) => {
                return Err(DomainError::new(ErrorCode::StorageError, message));
            }
            Err(SessionStoreError::Corrupt(message)) => {
                tracing::warn!(%message, "Persisted session unreadable, staying offline");
                return Ok(false);
            }
        };

        match session {
            Some(session) => {
                self.connection
                    .connect(&session.identity, Some(session.access_token))
                    .await;
                Ok(true)
            }
            None => {
                tracing::info!("No persisted session, realtime stays offline");
                Ok(false)
            }
        }
    }

    /// Tear the realtime connection down.
    ///
    /// Leaves the room, closes the socket, and stops the reconnect loop.
    /// Idempotent; subscriptions and logged notifications survive so a
    /// later `init` resumes where the session left off.
    pub async fn teardown(&self) {
        self.connection.disconnect().await;
    }

    /// Register a handler for one event kind. Dropping the returned
    /// handle unregisters it.
    pub fn subscribe(&self, kind: EventKind, handler: Arc<dyn EventHandler>) -> Subscription {
        self.registry.subscribe(kind, handler)
    }

    /// Register the same handler for several kinds.
    pub fn subscribe_all(
        &self,
        kinds: &[EventKind],
        handler: Arc<dyn EventHandler>,
    ) -> Vec<Subscription> {
        self.registry.subscribe_all(kinds, handler)
    }

    /// The notification log (bell panel state).
    pub fn notifications(&self) -> &Arc<NotificationStore> {
        &self.notifications
    }

    /// The toast tray (ephemeral alerts).
    pub fn toasts(&self) -> &Arc<ToastTray> {
        &self.toasts
    }

    /// Watch the connection status.
    pub fn status(&self) -> tokio::sync::watch::Receiver<ConnectionStatus> {
        self.connection.status()
    }

    /// The connection status right now.
    pub fn current_status(&self) -> ConnectionStatus {
        self.connection.current_status()
    }
}
