//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment
//! variables using the `config` and `dotenvy` crates. Configuration is loaded
//! with the `DINESYNC` prefix and nested values use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use dinesync::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Event stream at {}", config.realtime.url);
//! ```

mod api;
mod error;
mod polling;
mod realtime;
mod session;

pub use api::ApiConfig;
pub use error::{ConfigError, ValidationError};
pub use polling::PollingConfig;
pub use realtime::RealtimeConfig;
pub use session::SessionConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Contains all configuration sections for the DineSync realtime core.
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// REST API collaborator (base URL, timeouts)
    #[serde(default)]
    pub api: ApiConfig,

    /// Realtime transport (WebSocket URL, reconnect pacing, caps)
    #[serde(default)]
    pub realtime: RealtimeConfig,

    /// Polling fallback periods per screen
    #[serde(default)]
    pub polling: PollingConfig,

    /// Persisted client state location
    #[serde(default)]
    pub session: SessionConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `DINESYNC` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `DINESYNC__REALTIME__URL=wss://...` -> `realtime.url = wss://...`
    /// - `DINESYNC__POLLING__KITCHEN_SECS=5` -> `polling.kitchen_secs = 5`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("DINESYNC")
                    .separator("__"),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Validate every configuration section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.validate()?;
        self.realtime.validate()?;
        self.polling.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }
}
