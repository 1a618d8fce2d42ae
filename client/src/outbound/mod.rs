//! Outbound adapters implementing the domain ports.

pub mod firestore;
pub mod session_file;

pub use firestore::FirestoreHttpStore;
pub use session_file::FileSessionStore;
