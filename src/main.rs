//! Headless runner for the realtime core.
//!
//! Connects with the persisted session, polls the authoritative read
//! endpoints the way the dashboard screens do, and logs every event it
//! receives. Useful for watching a live backend without the dashboard
//! in front of it.

use std::sync::Arc;

use async_trait::async_trait;

use dinesync::adapters::rest::{ActiveOrders, ApiClient, LowStock, Tables};
use dinesync::adapters::session::FileSessionStore;
use dinesync::adapters::transport::WebSocketTransport;
use dinesync::application::{spawn_poll, RealtimeService, RefetchHandler, ScreenState};
use dinesync::config::AppConfig;
use dinesync::domain::events::{EventKind, ServerEvent};
use dinesync::domain::foundation::DomainError;
use dinesync::ports::{EventHandler, SessionStore, StateFetcher};

struct LoggingHandler;

#[async_trait]
impl EventHandler for LoggingHandler {
    async fn handle(&self, event: ServerEvent) -> Result<(), DomainError> {
        tracing::info!(kind = %event.kind(), message = event.message(), "Event received");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "LoggingHandler"
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load()?;
    config.validate()?;

    let service = RealtimeService::new(Arc::new(WebSocketTransport::new()), &config.realtime);
    let sessions = FileSessionStore::new(config.session.state_path.clone());

    let connected = service.init(&sessions).await?;
    if !connected {
        tracing::warn!(
            path = %config.session.state_path.display(),
            "No persisted session; log in first, then restart"
        );
    }

    let bearer = sessions.load().await?.map(|s| s.access_token);
    let api = Arc::new(ApiClient::new(&config.api, bearer)?);

    // Each screen: a guarded state, a poll loop, and an event-triggered
    // refetch for the kinds that affect it.
    let kitchen = Arc::new(ScreenState::new("kitchen", ActiveOrders(Arc::clone(&api))));
    let tables = Arc::new(ScreenState::new("tables", Tables(Arc::clone(&api))));
    let inventory = Arc::new(ScreenState::new("inventory", LowStock(Arc::clone(&api))));

    let _polls = [
        spawn_poll(
            Arc::clone(&kitchen) as Arc<dyn StateFetcher>,
            config.polling.kitchen_period(),
        ),
        spawn_poll(
            Arc::clone(&tables) as Arc<dyn StateFetcher>,
            config.polling.dashboard_period(),
        ),
        spawn_poll(
            Arc::clone(&inventory) as Arc<dyn StateFetcher>,
            config.polling.dashboard_period(),
        ),
    ];

    let mut subs = service.subscribe_all(
        &[
            EventKind::NewOrder,
            EventKind::OrderReady,
            EventKind::OrderStatusChanged,
        ],
        Arc::new(RefetchHandler::new(kitchen as Arc<dyn StateFetcher>)),
    );
    subs.push(service.subscribe(
        EventKind::TableUpdated,
        Arc::new(RefetchHandler::new(tables as Arc<dyn StateFetcher>)),
    ));
    subs.push(service.subscribe(
        EventKind::InventoryLow,
        Arc::new(RefetchHandler::new(inventory as Arc<dyn StateFetcher>)),
    ));
    subs.extend(service.subscribe_all(&EventKind::ALL, Arc::new(LoggingHandler)));

    tokio::signal::ctrl_c().await?;
    tracing::info!(
        unread = service.notifications().unread_count(),
        "Shutting down"
    );
    service.teardown().await;
    Ok(())
}
