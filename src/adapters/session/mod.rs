//! File-backed session store.
//!
//! Login persists tokens and identity as JSON on disk; this adapter
//! reads that file back. A missing file simply means nobody is logged
//! in.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::ports::{SessionStore, SessionStoreError, StoredSession};

/// Reads persisted session state from a JSON file.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<StoredSession>, SessionStoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SessionStoreError::Storage(e.to_string())),
        };

        let session = serde_json::from_slice(&bytes)
            .map_err(|e| SessionStoreError::Corrupt(e.to_string()))?;
        Ok(Some(session))
    }
}
