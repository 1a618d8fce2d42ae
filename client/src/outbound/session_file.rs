//! File-backed session slot.
//!
//! One JSON file holding the signed-in user record. A corrupt payload is
//! reported as [`SessionStoreError::Corrupt`]; policy for clearing it lives
//! in the session manager, not here.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::ports::{SessionStore, SessionStoreError};
use crate::domain::user::User;

/// Session store adapter persisting the slot as one JSON file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Use `path` as the durable slot. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<User>, SessionStoreError> {
        let payload = match tokio::fs::read_to_string(&self.path).await {
            Ok(payload) => payload,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(SessionStoreError::storage(error.to_string())),
        };
        serde_json::from_str(&payload)
            .map(Some)
            .map_err(|error| SessionStoreError::corrupt(error.to_string()))
    }

    async fn save(&self, user: &User) -> Result<(), SessionStoreError> {
        let payload = serde_json::to_string(user)
            .map_err(|error| SessionStoreError::storage(error.to_string()))?;
        tokio::fs::write(&self.path, payload)
            .await
            .map_err(|error| SessionStoreError::storage(error.to_string()))
    }

    async fn clear(&self) -> Result<(), SessionStoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(SessionStoreError::storage(error.to_string())),
        }
    }
}
