//! Polling fallback configuration

use std::time::Duration;

use serde::Deserialize;

use super::error::ValidationError;

/// Per-screen polling periods for the fallback scheduler.
///
/// These timers run unconditionally, independent of socket health, so a
/// screen self-heals even if events were missed during a reconnect gap.
#[derive(Debug, Clone, Deserialize)]
pub struct PollingConfig {
    /// Kitchen display refresh period in seconds
    #[serde(default = "default_kitchen_secs")]
    pub kitchen_secs: u64,

    /// Messaging screens refresh period in seconds
    #[serde(default = "default_messages_secs")]
    pub messages_secs: u64,

    /// Dashboard/overview screens refresh period in seconds
    #[serde(default = "default_dashboard_secs")]
    pub dashboard_secs: u64,
}

impl PollingConfig {
    pub fn kitchen_period(&self) -> Duration {
        Duration::from_secs(self.kitchen_secs)
    }

    pub fn messages_period(&self) -> Duration {
        Duration::from_secs(self.messages_secs)
    }

    pub fn dashboard_period(&self) -> Duration {
        Duration::from_secs(self.dashboard_secs)
    }

    /// Validate polling configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.kitchen_secs == 0 || self.messages_secs == 0 || self.dashboard_secs == 0 {
            return Err(ValidationError::InvalidPollPeriod);
        }
        Ok(())
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            kitchen_secs: default_kitchen_secs(),
            messages_secs: default_messages_secs(),
            dashboard_secs: default_dashboard_secs(),
        }
    }
}

fn default_kitchen_secs() -> u64 {
    10
}

fn default_messages_secs() -> u64 {
    15
}

fn default_dashboard_secs() -> u64 {
    30
}
