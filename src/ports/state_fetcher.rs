//! Fetch ports - Interfaces for authoritative REST reads.
//!
//! The realtime stream only signals that something changed; the data itself
//! always comes from these reads (refetch-on-signal). Both the polling
//! scheduler and event-triggered refetches go through the same seam.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;

/// A typed authoritative read against the REST collaborator.
///
/// Implementations are full-state reads, not deltas, which is what makes
/// overlapping refetches safe to resolve by discarding stale responses.
#[async_trait]
pub trait Fetch: Send + Sync {
    type Output: Send;

    /// Fetch the current authoritative state.
    async fn fetch(&self) -> Result<Self::Output, DomainError>;
}

/// A refreshable screen state, type-erased for the scheduler.
///
/// One implementation exists per screen; the polling scheduler and the
/// event-triggered refetch handlers both drive the same `refresh`.
#[async_trait]
pub trait StateFetcher: Send + Sync {
    /// Re-fetch and apply authoritative state.
    ///
    /// Errors degrade to stale local state; they never propagate past the
    /// caller's log line, so one failed poll cannot block the next.
    async fn refresh(&self) -> Result<(), DomainError>;

    /// Screen name for logging.
    fn name(&self) -> &'static str;
}
