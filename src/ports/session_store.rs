//! SessionStore port - Interface for persisted client login state.
//!
//! Login writes tokens and the user identity to local persistent storage;
//! the realtime core only reads them to decide whether to connect at all
//! and with what identity.

use async_trait::async_trait;
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::foundation::SessionIdentity;

/// Errors that can occur reading persisted session state.
#[derive(Debug, Error)]
pub enum SessionStoreError {
    /// Storage could not be read
    #[error("Session storage error: {0}")]
    Storage(String),

    /// Stored state exists but could not be parsed
    #[error("Session state corrupt: {0}")]
    Corrupt(String),
}

/// Persisted login state: tokens plus identity.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredSession {
    pub access_token: SecretString,
    #[serde(default)]
    pub refresh_token: Option<SecretString>,
    #[serde(rename = "user")]
    pub identity: SessionIdentity,
}

/// Port for reading persisted client session state.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the stored session, if a user is logged in.
    ///
    /// `Ok(None)` means no session: the connection manager stays offline.
    async fn load(&self) -> Result<Option<StoredSession>, SessionStoreError>;
}
