//! Event subscription registry.
//!
//! Lets independent features say "notify me about this kind" without
//! knowing about the transport or each other. Registration hands back a
//! [`Subscription`] that removes the handler when cancelled or dropped,
//! so an unmounted screen cannot leak a handler by forgetting to
//! unsubscribe.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::domain::events::EventKind;
use crate::ports::EventHandler;

struct Registered {
    token: u64,
    handler: Arc<dyn EventHandler>,
}

/// Registry of event handlers keyed by kind.
///
/// Multiple handlers per kind are allowed; delivery is in registration
/// order. The registry performs no deduplication: redelivery across
/// reconnects is the handler's problem (they are idempotent by contract).
pub struct SubscriptionRegistry {
    handlers: RwLock<HashMap<EventKind, Vec<Registered>>>,
    next_token: AtomicU64,
}

impl SubscriptionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
            next_token: AtomicU64::new(1),
        }
    }

    /// Register a handler for one event kind.
    ///
    /// Returns a disposable handle; dropping it (or calling
    /// [`Subscription::cancel`]) removes exactly this registration.
    pub fn subscribe(
        self: &Arc<Self>,
        kind: EventKind,
        handler: Arc<dyn EventHandler>,
    ) -> Subscription {
        let token = self.next_token.fetch_add(1, Ordering::Relaxed);
        self.handlers
            .write()
            .expect("SubscriptionRegistry: handlers lock poisoned")
            .entry(kind)
            .or_default()
            .push(Registered { token, handler });

        Subscription {
            registry: Arc::clone(self),
            kind,
            token,
            active: true,
        }
    }

    /// Register the same handler for several kinds at once.
    pub fn subscribe_all(
        self: &Arc<Self>,
        kinds: &[EventKind],
        handler: Arc<dyn EventHandler>,
    ) -> Vec<Subscription> {
        kinds
            .iter()
            .map(|kind| self.subscribe(*kind, Arc::clone(&handler)))
            .collect()
    }

    /// Handlers currently registered for a kind, in registration order.
    pub(crate) fn handlers_for(&self, kind: EventKind) -> Vec<Arc<dyn EventHandler>> {
        self.handlers
            .read()
            .expect("SubscriptionRegistry: handlers lock poisoned")
            .get(&kind)
            .map(|entries| entries.iter().map(|r| Arc::clone(&r.handler)).collect())
            .unwrap_or_default()
    }

    /// Count of handlers registered for a kind.
    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.handlers
            .read()
            .expect("SubscriptionRegistry: handlers lock poisoned")
            .get(&kind)
            .map(|entries| entries.len())
            .unwrap_or(0)
    }

    /// Remove a registration by token. No-op if already removed.
    fn unsubscribe(&self, kind: EventKind, token: u64) {
        let mut handlers = self
            .handlers
            .write()
            .expect("SubscriptionRegistry: handlers lock poisoned");
        if let Some(entries) = handlers.get_mut(&kind) {
            entries.retain(|r| r.token != token);
            if entries.is_empty() {
                handlers.remove(&kind);
            }
        }
    }
}

impl Default for SubscriptionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to one registration.
///
/// Removal happens on `cancel` or drop, whichever comes first; both are
/// safe to do after the handler was already removed.
pub struct Subscription {
    registry: Arc<SubscriptionRegistry>,
    kind: EventKind,
    token: u64,
    active: bool,
}

impl Subscription {
    /// The kind this subscription listens to.
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Remove the handler now instead of waiting for drop.
    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.active {
            self.active = false;
            self.registry.unsubscribe(self.kind, self.token);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;

    use crate::domain::events::{OrderSummary, ServerEvent};
    use crate::domain::foundation::DomainError;

    struct CountingHandler(Arc<AtomicUsize>);

    #[async_trait]
    impl EventHandler for CountingHandler {
        async fn handle(&self, _: ServerEvent) -> Result<(), DomainError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
        fn name(&self) -> &'static str {
            "CountingHandler"
        }
    }

    fn counting(counter: &Arc<AtomicUsize>) -> Arc<dyn EventHandler> {
        Arc::new(CountingHandler(Arc::clone(counter)))
    }

    fn new_order() -> ServerEvent {
        ServerEvent::NewOrder {
            order: OrderSummary::default(),
            message: "New order".to_string(),
            timestamp: None,
        }
    }

    #[test]
    fn subscribe_registers_handler() {
        let registry = Arc::new(SubscriptionRegistry::new());
        let counter = Arc::new(AtomicUsize::new(0));

        let _sub = registry.subscribe(EventKind::NewOrder, counting(&counter));

        assert_eq!(registry.handler_count(EventKind::NewOrder), 1);
        assert_eq!(registry.handler_count(EventKind::OrderReady), 0);
    }

    #[test]
    fn drop_removes_registration() {
        let registry = Arc::new(SubscriptionRegistry::new());
        let counter = Arc::new(AtomicUsize::new(0));

        {
            let _sub = registry.subscribe(EventKind::NewOrder, counting(&counter));
            assert_eq!(registry.handler_count(EventKind::NewOrder), 1);
        }

        assert_eq!(registry.handler_count(EventKind::NewOrder), 0);
    }

    #[test]
    fn cancel_removes_registration() {
        let registry = Arc::new(SubscriptionRegistry::new());
        let counter = Arc::new(AtomicUsize::new(0));

        let sub = registry.subscribe(EventKind::NewOrder, counting(&counter));
        sub.cancel();

        assert_eq!(registry.handler_count(EventKind::NewOrder), 0);
    }

    #[test]
    fn cancel_only_removes_its_own_registration() {
        let registry = Arc::new(SubscriptionRegistry::new());
        let counter = Arc::new(AtomicUsize::new(0));

        let first = registry.subscribe(EventKind::NewOrder, counting(&counter));
        let _second = registry.subscribe(EventKind::NewOrder, counting(&counter));

        first.cancel();
        assert_eq!(registry.handler_count(EventKind::NewOrder), 1);
    }

    #[test]
    fn interleaved_subscribe_cancel_matches_order_of_application() {
        let registry = Arc::new(SubscriptionRegistry::new());
        let counter = Arc::new(AtomicUsize::new(0));

        let a = registry.subscribe(EventKind::NewOrder, counting(&counter));
        let b = registry.subscribe(EventKind::NewOrder, counting(&counter));
        a.cancel();
        let _c = registry.subscribe(EventKind::NewOrder, counting(&counter));
        b.cancel();

        // Net state: only c remains.
        assert_eq!(registry.handler_count(EventKind::NewOrder), 1);
    }

    #[test]
    fn handlers_for_preserves_registration_order() {
        let registry = Arc::new(SubscriptionRegistry::new());

        struct Named(&'static str);
        #[async_trait]
        impl EventHandler for Named {
            async fn handle(&self, _: ServerEvent) -> Result<(), DomainError> {
                Ok(())
            }
            fn name(&self) -> &'static str {
                self.0
            }
        }

        let _a = registry.subscribe(EventKind::NewOrder, Arc::new(Named("first")));
        let _b = registry.subscribe(EventKind::NewOrder, Arc::new(Named("second")));
        let _c = registry.subscribe(EventKind::NewOrder, Arc::new(Named("third")));

        let names: Vec<&str> = registry
            .handlers_for(EventKind::NewOrder)
            .iter()
            .map(|h| h.name())
            .collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn subscribe_all_registers_each_kind() {
        let registry = Arc::new(SubscriptionRegistry::new());
        let counter = Arc::new(AtomicUsize::new(0));

        let subs = registry.subscribe_all(
            &[EventKind::NewOrder, EventKind::OrderReady],
            counting(&counter),
        );

        assert_eq!(subs.len(), 2);
        assert_eq!(registry.handler_count(EventKind::NewOrder), 1);
        assert_eq!(registry.handler_count(EventKind::OrderReady), 1);

        drop(subs);
        assert_eq!(registry.handler_count(EventKind::NewOrder), 0);
        assert_eq!(registry.handler_count(EventKind::OrderReady), 0);
    }

    #[tokio::test]
    async fn registered_handler_is_invocable() {
        let registry = Arc::new(SubscriptionRegistry::new());
        let counter = Arc::new(AtomicUsize::new(0));

        let _sub = registry.subscribe(EventKind::NewOrder, counting(&counter));

        for handler in registry.handlers_for(EventKind::NewOrder) {
            handler.handle(new_order()).await.unwrap();
        }
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
