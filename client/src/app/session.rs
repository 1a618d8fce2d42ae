//! Session lifecycle: login, restore, logout.
//!
//! The signed-in identity lives in the cache and in the durable session
//! slot so it survives a process restart. A corrupt slot is discarded, never
//! surfaced: restoration failure just means logging in again.

use std::sync::Arc;

use tracing::warn;

use crate::domain::error::Error;
use crate::domain::user::User;

use super::AppContext;

impl AppContext {
    /// Check credentials against the cached roster.
    ///
    /// Passwords are compared verbatim, matching the stored records.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownUser`] when no account carries the login name
    /// and [`Error::IncorrectPassword`] on a credential mismatch.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<User, Error> {
        let user = self
            .users()
            .into_iter()
            .find(|user| user.username == username)
            .ok_or_else(|| Error::unknown_user(username))?;
        if user.password != password {
            return Err(Error::IncorrectPassword);
        }
        Ok(user)
    }

    /// Establish a session for `user`: cache it, persist it to the durable
    /// slot, start the sync loop, and notify listeners.
    ///
    /// A failed slot write is logged and tolerated; the session simply will
    /// not survive a restart.
    pub async fn login(self: &Arc<Self>, user: User) {
        if let Err(error) = self.session_store.save(&user).await {
            warn!(%error, "session persist failed, session will not survive restart");
        }
        self.write().current_user = Some(user);
        self.start_sync();
        self.notify();
    }

    /// Restore a persisted session, if a structurally valid one exists.
    ///
    /// A malformed or unreadable slot is cleared and reported as "no
    /// session"; this never fails. Returns whether a session was restored.
    pub async fn restore_session(self: &Arc<Self>) -> bool {
        match self.session_store.load().await {
            Ok(Some(user)) => {
                self.write().current_user = Some(user);
                self.start_sync();
                self.notify();
                true
            }
            Ok(None) => false,
            Err(error) => {
                warn!(%error, "discarding unusable persisted session");
                if let Err(clear_error) = self.session_store.clear().await {
                    warn!(%clear_error, "failed to clear persisted session");
                }
                false
            }
        }
    }

    /// End the session: clear the cache entry and the durable slot, stop the
    /// sync loop, and notify listeners.
    pub async fn logout(&self) {
        if let Err(error) = self.session_store.clear().await {
            warn!(%error, "failed to clear persisted session");
        }
        self.write().current_user = None;
        self.stop_sync();
        self.notify();
    }
}
