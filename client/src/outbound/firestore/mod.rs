//! Firestore REST adapter for the [`DocumentStore`] port.
//!
//! [`DocumentStore`]: crate::domain::ports::DocumentStore

mod dto;
mod http_store;
pub mod value;

pub use http_store::{FirestoreHttpStore, DEFAULT_REQUEST_TIMEOUT};
