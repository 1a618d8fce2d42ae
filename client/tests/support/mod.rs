//! Shared fixtures for the integration tests.

// Each integration test binary compiles this module separately and uses a
// different subset of it.
#![allow(dead_code)]

use std::sync::Arc;

use canteen_client::config::ClientConfig;
use canteen_client::domain::ports::{InMemoryDocumentStore, InMemorySessionStore};
use canteen_client::AppContext;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

/// Clock pinned to one instant.
pub struct FixtureClock {
    now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.now
    }
}

pub fn fixture_clock() -> Arc<dyn Clock> {
    let now = Utc
        .with_ymd_and_hms(2026, 8, 30, 8, 0, 0)
        .single()
        .expect("valid fixture timestamp");
    Arc::new(FixtureClock { now })
}

/// Everything a test needs to drive one context.
pub struct Harness {
    pub context: Arc<AppContext>,
    pub store: Arc<InMemoryDocumentStore>,
    pub sessions: Arc<InMemorySessionStore>,
    pub clock: Arc<dyn Clock>,
}

/// Context over fresh in-memory adapters and a pinned clock.
pub fn harness() -> Harness {
    harness_with_config(ClientConfig::default())
}

pub fn harness_with_config(config: ClientConfig) -> Harness {
    let store = Arc::new(InMemoryDocumentStore::new());
    let sessions = Arc::new(InMemorySessionStore::new());
    let clock = fixture_clock();
    let document_store: Arc<dyn canteen_client::domain::ports::DocumentStore> = store.clone();
    let session_store: Arc<dyn canteen_client::domain::ports::SessionStore> = sessions.clone();
    let context = AppContext::new(document_store, session_store, Arc::clone(&clock), config);
    Harness {
        context,
        store,
        sessions,
        clock,
    }
}
