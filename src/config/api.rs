//! REST API collaborator configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Configuration for the REST API the core triggers refetches against.
///
/// Every authoritative read (active orders, table board, low stock) goes
/// through this collaborator; the realtime stream is only a signal.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the backend, e.g. `http://localhost:8000`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl ApiConfig {
    /// Validate API configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidApiBaseUrl);
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_request_timeout() -> u64 {
    15
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(ApiConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_non_http_base_url() {
        let config = ApiConfig {
            base_url: "ftp://example.com".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidApiBaseUrl)
        ));
    }

    #[test]
    fn rejects_zero_timeout() {
        let config = ApiConfig {
            request_timeout_secs: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidTimeout)
        ));
    }
}
