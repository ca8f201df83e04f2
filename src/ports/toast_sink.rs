//! ToastSink port - Interface for the ephemeral alert channel.

use crate::domain::notifications::Toast;

/// Receiver for toasts produced by the dispatcher.
///
/// The sink must never block: a toast is fire-and-forget and losing one is
/// acceptable, so implementations queue or drop rather than wait.
pub trait ToastSink: Send + Sync {
    /// Accept a toast for display.
    fn push(&self, toast: Toast);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_sink_object_safe(_: &dyn ToastSink) {}
}
