//! Driven port for the durable local session slot.
//!
//! One string-keyed slot holding the signed-in user record, read on process
//! start, written on login and profile self-edit, cleared on logout.

use async_trait::async_trait;

use crate::domain::user::User;

/// Errors surfaced while reading or writing the session slot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionStoreError {
    /// The backing storage could not be read or written.
    #[error("session storage failed: {message}")]
    Storage { message: String },
    /// The persisted payload was present but not a valid user record.
    #[error("persisted session is corrupt: {message}")]
    Corrupt { message: String },
}

impl SessionStoreError {
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::Corrupt {
            message: message.into(),
        }
    }
}

/// Port for persisting the current session across process restarts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read the persisted session, `None` when the slot is empty.
    ///
    /// # Errors
    ///
    /// Returns `Corrupt` for an undecodable payload and `Storage` for IO
    /// failures. The session manager clears the slot on either.
    async fn load(&self) -> Result<Option<User>, SessionStoreError>;

    /// Persist `user` as the current session.
    ///
    /// # Errors
    ///
    /// Returns `Storage` when the slot cannot be written.
    async fn save(&self, user: &User) -> Result<(), SessionStoreError>;

    /// Empty the slot. Clearing an already-empty slot succeeds.
    ///
    /// # Errors
    ///
    /// Returns `Storage` when the slot cannot be removed.
    async fn clear(&self) -> Result<(), SessionStoreError>;
}

/// Fixture implementation holding the slot in process memory.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    slot: std::sync::Mutex<Option<User>>,
}

#[cfg(any(test, feature = "test-support"))]
impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the slot without going through the port.
    pub fn stored(&self) -> Option<User> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<User>> {
        self.slot
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(any(test, feature = "test-support"))]
#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self) -> Result<Option<User>, SessionStoreError> {
        Ok(self.lock().clone())
    }

    async fn save(&self, user: &User) -> Result<(), SessionStoreError> {
        *self.lock() = Some(user.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionStoreError> {
        *self.lock() = None;
        Ok(())
    }
}
