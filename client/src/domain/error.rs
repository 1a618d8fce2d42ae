//! User-facing errors produced by actions.
//!
//! Nothing in this crate is fatal: store failures degrade to stale or default
//! data, and everything surfaced here is meant to be rendered as a message,
//! not to abort the process.

/// Error returned by login and by the cache-mutating actions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Input failed a business rule (missing field, blank reason, ...).
    #[error("{message}")]
    Validation { message: String },
    /// A new account reused an existing login name.
    #[error("username already taken: {username}")]
    DuplicateUsername { username: String },
    /// Login name matched no account.
    #[error("unknown user: {username}")]
    UnknownUser { username: String },
    /// Password did not match the stored credential.
    #[error("incorrect password")]
    IncorrectPassword,
    /// The store rejected or dropped a write; cached data was left untouched.
    #[error("store write failed: {message}")]
    StoreUnavailable { message: String },
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn duplicate_username(username: impl Into<String>) -> Self {
        Self::DuplicateUsername {
            username: username.into(),
        }
    }

    pub fn unknown_user(username: impl Into<String>) -> Self {
        Self::UnknownUser {
            username: username.into(),
        }
    }

    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
        }
    }
}
