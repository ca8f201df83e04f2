//! Polling fallback scheduler.
//!
//! Each screen's state is refreshed on a fixed interval regardless of
//! socket health. Polling is the correctness backstop: realtime events
//! only make data fresh sooner, they are never the sole delivery path.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::ports::StateFetcher;

/// Handle to one running poll loop.
///
/// The loop stops when the handle is cancelled or dropped; a stopped
/// loop never fires again.
pub struct PollHandle {
    handle: Option<JoinHandle<()>>,
    name: &'static str,
}

impl PollHandle {
    /// Stop the poll loop now instead of waiting for drop.
    pub fn cancel(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            tracing::debug!(fetcher = self.name, "Poll loop stopped");
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Spawn a poll loop that refreshes a fetcher at a fixed period.
///
/// The first refresh happens immediately so a freshly mounted screen is
/// populated without waiting a full period. Refresh errors are logged
/// and swallowed; the loop always survives to the next tick.
pub fn spawn_poll(fetcher: Arc<dyn StateFetcher>, period: Duration) -> PollHandle {
    let name = fetcher.name();
    tracing::debug!(fetcher = name, period_secs = period.as_secs(), "Poll loop started");

    let handle = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            if let Err(error) = fetcher.refresh().await {
                tracing::warn!(fetcher = fetcher.name(), %error, "Poll refresh failed");
            }
        }
    });

    PollHandle {
        handle: Some(handle),
        name,
    }
}
