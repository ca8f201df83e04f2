//! Event-triggered refetch with a staleness guard.
//!
//! When a realtime event lands, the interested screen re-fetches its
//! authoritative state over REST. Fetches race: a slow response from an
//! earlier fetch must never overwrite the result of a later one. Every
//! fetch takes a ticket before starting, and a response only applies if
//! its ticket is newer than the last one applied. Stale responses are
//! discarded, not retried; the newer fetch already carries fresher data.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::domain::events::ServerEvent;
use crate::domain::foundation::DomainError;
use crate::ports::{EventHandler, Fetch, StateFetcher};

struct Applied<T> {
    ticket: u64,
    value: Option<T>,
}

/// Holds one screen's fetched state behind a monotonic ticket guard.
pub struct ViewState<T> {
    issued: AtomicU64,
    inner: RwLock<Applied<T>>,
}

impl<T: Clone> ViewState<T> {
    pub fn new() -> Self {
        Self {
            issued: AtomicU64::new(0),
            inner: RwLock::new(Applied {
                ticket: 0,
                value: None,
            }),
        }
    }

    /// Take a ticket for a fetch that is about to start.
    ///
    /// Tickets are strictly increasing across all concurrent callers.
    pub fn begin(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Apply a fetched value if its ticket is still the newest.
    ///
    /// Returns false (and discards the value) when a later-ticketed fetch
    /// already applied.
    pub fn apply(&self, ticket: u64, value: T) -> bool {
        let mut inner = self.inner.write().expect("ViewState: lock poisoned");
        if ticket <= inner.ticket {
            return false;
        }
        inner.ticket = ticket;
        inner.value = Some(value);
        true
    }

    /// The last applied value, if any fetch has completed yet.
    pub fn get(&self) -> Option<T> {
        self.inner
            .read()
            .expect("ViewState: lock poisoned")
            .value
            .clone()
    }
}

impl<T: Clone> Default for ViewState<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// One screen's fetcher plus its guarded view state.
///
/// Implements [`StateFetcher`], so the same object serves both the poll
/// loop and event-triggered refetches; every path goes through the
/// ticket guard.
pub struct ScreenState<F: Fetch> {
    name: &'static str,
    fetcher: F,
    view: ViewState<F::Output>,
}

impl<F> ScreenState<F>
where
    F: Fetch,
    F::Output: Clone,
{
    pub fn new(name: &'static str, fetcher: F) -> Self {
        Self {
            name,
            fetcher,
            view: ViewState::new(),
        }
    }

    /// The last successfully fetched state.
    pub fn current(&self) -> Option<F::Output> {
        self.view.get()
    }
}

#[async_trait]
impl<F> StateFetcher for ScreenState<F>
where
    F: Fetch + Send + Sync,
    F::Output: Clone + Send + Sync,
{
    async fn refresh(&self) -> Result<(), DomainError> {
        let ticket = self.view.begin();
        let value = self.fetcher.fetch().await?;
        if !self.view.apply(ticket, value) {
            tracing::debug!(fetcher = self.name, ticket, "Discarded stale fetch response");
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

/// Bridges the event bus to a fetcher: any matching event triggers one
/// refresh of the screen it was registered for.
pub struct RefetchHandler {
    fetcher: Arc<dyn StateFetcher>,
}

impl RefetchHandler {
    pub fn new(fetcher: Arc<dyn StateFetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl EventHandler for RefetchHandler {
    async fn handle(&self, _event: ServerEvent) -> Result<(), DomainError> {
        self.fetcher.refresh().await
    }

    fn name(&self) -> &'static str {
        self.fetcher.name()
    }
}
