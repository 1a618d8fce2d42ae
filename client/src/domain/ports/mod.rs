//! Domain ports for the hexagonal boundary.

mod document_store;
mod session_store;

#[cfg(any(test, feature = "test-support"))]
pub use document_store::InMemoryDocumentStore;
#[cfg(test)]
pub use document_store::MockDocumentStore;
pub use document_store::{Document, DocumentStore, DocumentStoreError, Fields};
#[cfg(any(test, feature = "test-support"))]
pub use session_store::InMemorySessionStore;
#[cfg(test)]
pub use session_store::MockSessionStore;
pub use session_store::{SessionStore, SessionStoreError};
