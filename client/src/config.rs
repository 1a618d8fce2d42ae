//! Client tuning knobs.

use std::time::Duration;

/// Interval between sync-loop reloads while a session is active.
pub const DEFAULT_SYNC_INTERVAL: Duration = Duration::from_secs(30);

/// Tuning for one [`AppContext`](crate::app::AppContext).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientConfig {
    /// Polling interval of the sync loop.
    pub sync_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            sync_interval: DEFAULT_SYNC_INTERVAL,
        }
    }
}
