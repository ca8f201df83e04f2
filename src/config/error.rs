//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid API base URL format")]
    InvalidApiBaseUrl,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid realtime URL format (expected ws:// or wss://)")]
    InvalidRealtimeUrl,

    #[error("Reconnect interval must be greater than zero")]
    InvalidReconnectInterval,

    #[error("Polling period must be greater than zero")]
    InvalidPollPeriod,

    #[error("Notification cap must be greater than zero")]
    InvalidNotificationCap,
}
