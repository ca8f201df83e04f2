//! EventHandler port - Interface for feature code reacting to events.
//!
//! Features register handlers against event kinds without knowing about
//! the transport. Handlers are invoked with the decoded event exactly once
//! per delivered event; no deduplication happens at this layer.

use async_trait::async_trait;

use crate::domain::events::ServerEvent;
use crate::domain::foundation::DomainError;

/// Handler for processing delivered events.
///
/// Implementations should be:
/// - **Idempotent** - Reconnects can redeliver or drop events, so a handler
///   must tolerate being invoked 0, 1, or more times for conceptually the
///   same change; the next poll converges either way.
/// - **Quick** - Typical handlers only trigger a feature-local refetch;
///   the event is a signal, not a source of truth.
/// - **Isolated** - Errors are logged by the dispatcher and never affect
///   other handlers.
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Process a delivered event.
    async fn handle(&self, event: ServerEvent) -> Result<(), DomainError>;

    /// Handler name for logging.
    fn name(&self) -> &'static str;
}
