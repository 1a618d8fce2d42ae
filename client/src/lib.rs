//! Embedded client core for the internal leave-request and meal-count
//! tracker.
//!
//! Three roles (employee, manager, kitchen) share one remote document store;
//! this crate owns the state engine between them and the store: the typed
//! wire adapter, the repository loaders, the process cache with its polling
//! sync loop and subscribe/notify registry, the session lifecycle, and the
//! pure meal-eligibility rules. Rendering and navigation stay with the host
//! application, which consumes [`AppContext`] and the functions in
//! [`domain::eligibility`] and [`domain::reports`].
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use canteen_client::config::ClientConfig;
//! use canteen_client::outbound::{FileSessionStore, FirestoreHttpStore};
//! use canteen_client::AppContext;
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let store = FirestoreHttpStore::new(
//!     "https://firestore.googleapis.com/v1/projects/acme/databases/(default)/documents"
//!         .parse()?,
//! )?;
//! let sessions = FileSessionStore::new("session.json");
//! let context = AppContext::new(
//!     Arc::new(store),
//!     Arc::new(sessions),
//!     Arc::new(mockable::DefaultClock),
//!     ClientConfig::default(),
//! );
//! context.initialize().await;
//! if !context.restore_session().await {
//!     let user = context.authenticate("admin", "123456")?;
//!     context.login(user).await;
//! }
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod config;
pub mod domain;
pub mod outbound;
pub mod repo;

pub use app::{AppContext, CacheSnapshot, LeaveRequest, NewUser, Subscription};
pub use domain::Error;
