//! Polling sync loop.
//!
//! While a session is active, the cache is re-loaded from the store on a
//! fixed interval. Only one loop runs at a time no matter how often start is
//! requested, and stop is equally idempotent. A tick that lands after logout
//! finds no session and skips its reload; results of an in-flight reload at
//! stop time are discarded with the task.

use std::sync::Arc;

use tokio::time::MissedTickBehavior;
use tracing::debug;

use super::AppContext;

impl AppContext {
    /// Start the background sync loop. A second start while a loop is
    /// running is a no-op.
    pub fn start_sync(self: &Arc<Self>) {
        let mut guard = self.lock_sync_task();
        if guard.as_ref().is_some_and(|task| !task.is_finished()) {
            return;
        }

        // The task downgrades its reference so it cannot keep the context
        // alive on its own; a dropped context ends the loop at the next tick.
        let context = Arc::downgrade(self);
        let interval = self.config.sync_interval;
        *guard = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick of a fresh interval fires immediately; consume
            // it so the loop waits one full period before its first reload.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(context) = context.upgrade() else {
                    return;
                };
                if context.current_user().is_none() {
                    continue;
                }
                debug!("sync tick, reloading collections");
                context.refresh().await;
            }
        }));
    }

    /// Cancel the sync loop. Stopping an already-stopped loop is a no-op.
    pub fn stop_sync(&self) {
        if let Some(task) = self.lock_sync_task().take() {
            task.abort();
        }
    }

    /// Whether a sync loop task is currently alive.
    pub fn sync_running(&self) -> bool {
        self.lock_sync_task()
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }
}
