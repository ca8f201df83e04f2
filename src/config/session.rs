//! Persisted client session configuration

use std::path::PathBuf;

use serde::Deserialize;

/// Location of the persisted client state (tokens + identity).
///
/// The connection manager reads this to decide whether to connect at all:
/// no stored session means no socket.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Path to the JSON file written at login
    #[serde(default = "default_state_path")]
    pub state_path: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            state_path: default_state_path(),
        }
    }
}

fn default_state_path() -> PathBuf {
    PathBuf::from(".dinesync/session.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_is_relative_dotfile() {
        let config = SessionConfig::default();
        assert!(config.state_path.ends_with("session.json"));
    }
}
