//! Event normalizer and dispatcher.
//!
//! The single place every inbound realtime message goes through. Each raw
//! frame is decoded into the fixed taxonomy and fanned out three ways:
//!
//! ```text
//! raw frame ──decode──▶ ServerEvent
//!                          │
//!          ┌───────────────┼────────────────┐
//!          ▼               ▼                ▼
//!   NotificationStore  ToastSink   registered handlers
//!    (bell panel)      (ephemeral)  (refetch triggers)
//! ```
//!
//! Unknown or malformed frames are logged and dropped: no notification,
//! no toast, no handler invocation. A kind nobody subscribed to still
//! produces its notification and toast; the bell channel is independent
//! of per-feature interest.

use std::sync::Arc;
use std::time::Duration;

use crate::application::notifications::NotificationStore;
use crate::application::registry::SubscriptionRegistry;
use crate::domain::events::ServerEvent;
use crate::domain::notifications::Toast;
use crate::ports::ToastSink;

/// Routes decoded events into the notification log, the toast channel,
/// and subscribed handlers.
pub struct EventRouter {
    registry: Arc<SubscriptionRegistry>,
    notifications: Arc<NotificationStore>,
    toasts: Arc<dyn ToastSink>,
    toast_ttl: Duration,
}

impl EventRouter {
    pub fn new(
        registry: Arc<SubscriptionRegistry>,
        notifications: Arc<NotificationStore>,
        toasts: Arc<dyn ToastSink>,
        toast_ttl: Duration,
    ) -> Self {
        Self {
            registry,
            notifications,
            toasts,
            toast_ttl,
        }
    }

    /// Decode and route one inbound text frame.
    ///
    /// Decoding failure is forward compatibility at work, not an error
    /// condition: the dispatcher must never crash on a frame it does not
    /// recognize.
    pub async fn route_raw(&self, raw: &str) {
        match serde_json::from_str::<ServerEvent>(raw) {
            Ok(event) => self.route(event).await,
            Err(error) => {
                tracing::warn!(%error, frame = raw, "Dropping unrecognized realtime message");
            }
        }
    }

    /// Route one classified event.
    ///
    /// Produces exactly one notification and exactly one toast, then
    /// invokes handlers in registration order. Handler errors are logged
    /// and isolated; they never stop the remaining handlers.
    pub async fn route(&self, event: ServerEvent) {
        let kind = event.kind();

        self.notifications.add_for_event(&event);
        self.toasts.push(Toast::from_event(&event, self.toast_ttl));

        for handler in self.registry.handlers_for(kind) {
            if let Err(error) = handler.handle(event.clone()).await {
                tracing::warn!(
                    handler = handler.name(),
                    %kind,
                    %error,
                    "Event handler failed"
                );
            }
        }

        tracing::debug!(%kind, "Routed realtime event");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use crate::application::toasts::ToastTray;
    use crate::domain::events::EventKind;
    use crate::domain::foundation::{DomainError, ErrorCode};
    use crate::ports::EventHandler;

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

    struct FailingHandler;

    #[async_trait]
    impl EventHandler for FailingHandler {
        async fn handle(&self, _: ServerEvent) -> Result<(), DomainError> {
            Err(DomainError::new(ErrorCode::InternalError, "boom"))
        }
        fn name(&self) -> &'static str {
            "FailingHandler"
        }
    }

    /// Sink that records pushes instead of displaying them.
    struct RecordingSink(Mutex<Vec<Toast>>);

    impl RecordingSink {
        fn new() -> Self {
            Self(Mutex::new(Vec::new()))
        }
        fn count(&self) -> usize {
            self.0.lock().unwrap().len()
        }
    }

    impl ToastSink for RecordingSink {
        fn push(&self, toast: Toast) {
            self.0.lock().unwrap().push(toast);
        }
    }

    fn router_with(
        sink: Arc<RecordingSink>,
    ) -> (Arc<SubscriptionRegistry>, Arc<NotificationStore>, EventRouter) {
        let registry = Arc::new(SubscriptionRegistry::new());
        let notifications = Arc::new(NotificationStore::with_default_cap());
        let router = EventRouter::new(
            Arc::clone(&registry),
            Arc::clone(&notifications),
            sink,
            Duration::from_secs(5),
        );
        (registry, notifications, router)
    }

    const NEW_ORDER_FRAME: &str = r#"{
        "type": "new_order",
        "order": {"id": 7, "status": "pending"},
        "message": "New order #7 received"
    }"#;

    #[tokio::test]
    async fn new_order_produces_one_notification_one_toast_and_handler_calls() {
        let sink = Arc::new(RecordingSink::new());
        let (registry, notifications, router) = router_with(Arc::clone(&sink));

        let counter = Arc::new(AtomicUsize::new(0));
        let _a = registry.subscribe(
            EventKind::NewOrder,
            Arc::new(CountingHandler(Arc::clone(&counter))),
        );
        let _b = registry.subscribe(
            EventKind::NewOrder,
            Arc::new(CountingHandler(Arc::clone(&counter))),
        );

        router.route_raw(NEW_ORDER_FRAME).await;

        assert_eq!(notifications.len(), 1);
        assert_eq!(sink.count(), 1);
        // Each registered handler invoked exactly once.
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn unknown_kind_is_a_pure_drop() {
        let sink = Arc::new(RecordingSink::new());
        let (registry, notifications, router) = router_with(Arc::clone(&sink));

        let counter = Arc::new(AtomicUsize::new(0));
        let _sub = registry.subscribe(
            EventKind::NewOrder,
            Arc::new(CountingHandler(Arc::clone(&counter))),
        );

        router
            .route_raw(r#"{"type": "order_bumped", "message": "Order #2 bumped"}"#)
            .await;

        assert_eq!(notifications.len(), 0);
        assert_eq!(sink.count(), 0);
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn malformed_frame_is_dropped() {
        let sink = Arc::new(RecordingSink::new());
        let (_registry, notifications, router) = router_with(Arc::clone(&sink));

        router.route_raw("not json at all").await;

        assert_eq!(notifications.len(), 0);
        assert_eq!(sink.count(), 0);
    }

    #[tokio::test]
    async fn kind_without_handlers_still_notifies() {
        let sink = Arc::new(RecordingSink::new());
        let (_registry, notifications, router) = router_with(Arc::clone(&sink));

        router.route_raw(NEW_ORDER_FRAME).await;

        assert_eq!(notifications.len(), 1);
        assert_eq!(sink.count(), 1);
    }

    #[tokio::test]
    async fn failing_handler_does_not_block_the_next_one() {
        let sink = Arc::new(RecordingSink::new());
        let (registry, _notifications, router) = router_with(Arc::clone(&sink));

        let counter = Arc::new(AtomicUsize::new(0));
        let _fail = registry.subscribe(EventKind::NewOrder, Arc::new(FailingHandler));
        let _count = registry.subscribe(
            EventKind::NewOrder,
            Arc::new(CountingHandler(Arc::clone(&counter))),
        );

        router.route_raw(NEW_ORDER_FRAME).await;

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn handlers_only_fire_for_their_kind() {
        let sink = Arc::new(RecordingSink::new());
        let (registry, _notifications, router) = router_with(Arc::clone(&sink));

        let counter = Arc::new(AtomicUsize::new(0));
        let _sub = registry.subscribe(
            EventKind::TableUpdated,
            Arc::new(CountingHandler(Arc::clone(&counter))),
        );

        router.route_raw(NEW_ORDER_FRAME).await;

        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn tray_integration_produces_visible_toast() {
        let tray = Arc::new(ToastTray::new());
        let registry = Arc::new(SubscriptionRegistry::new());
        let notifications = Arc::new(NotificationStore::with_default_cap());
        let router = EventRouter::new(
            registry,
            notifications,
            Arc::clone(&tray) as Arc<dyn ToastSink>,
            Duration::from_secs(5),
        );

        router.route_raw(NEW_ORDER_FRAME).await;

        assert_eq!(tray.active().len(), 1);
    }
}
