//! Realtime transport configuration

use std::time::Duration;

use serde::Deserialize;

use super::error::ValidationError;

/// Configuration for the WebSocket connection to the event stream.
#[derive(Debug, Clone, Deserialize)]
pub struct RealtimeConfig {
    /// WebSocket endpoint, e.g. `ws://localhost:8000/socket`
    #[serde(default = "default_url")]
    pub url: String,

    /// Delay between reconnection attempts in milliseconds.
    ///
    /// Reconnection is indefinite by policy; this only controls pacing.
    #[serde(default = "default_reconnect_interval_ms")]
    pub reconnect_interval_ms: u64,

    /// Maximum entries retained in the notification log.
    #[serde(default = "default_notification_cap")]
    pub notification_cap: usize,

    /// How long a toast stays visible, in milliseconds.
    #[serde(default = "default_toast_ttl_ms")]
    pub toast_ttl_ms: u64,
}

impl RealtimeConfig {
    /// Delay between reconnection attempts.
    pub fn reconnect_interval(&self) -> Duration {
        Duration::from_millis(self.reconnect_interval_ms)
    }

    /// Toast lifetime.
    pub fn toast_ttl(&self) -> Duration {
        Duration::from_millis(self.toast_ttl_ms)
    }

    /// Validate realtime configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.url.starts_with("ws://") && !self.url.starts_with("wss://") {
            return Err(ValidationError::InvalidRealtimeUrl);
        }
        if self.reconnect_interval_ms == 0 {
            return Err(ValidationError::InvalidReconnectInterval);
        }
        if self.notification_cap == 0 {
            return Err(ValidationError::InvalidNotificationCap);
        }
        Ok(())
    }
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            reconnect_interval_ms: default_reconnect_interval_ms(),
            notification_cap: default_notification_cap(),
            toast_ttl_ms: default_toast_ttl_ms(),
        }
    }
}

fn default_url() -> String {
    "ws://localhost:8000/socket".to_string()
}

fn default_reconnect_interval_ms() -> u64 {
    3_000
}

fn default_notification_cap() -> usize {
    50
}

fn default_toast_ttl_ms() -> u64 {
    5_000
}
