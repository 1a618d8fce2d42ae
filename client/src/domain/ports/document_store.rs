//! Driven port for the remote collection-oriented document store.
//!
//! The domain owns the contract; the Firestore REST adapter in `outbound`
//! implements it. Errors are typed here so adapters and tests can distinguish
//! timeouts from decode failures; the repository layer above decides what to
//! swallow.

use async_trait::async_trait;
use serde_json::Value;

/// Plain (untagged) field map of one document.
pub type Fields = serde_json::Map<String, Value>;

/// One stored document with its id.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Final path segment of the document name.
    pub id: String,
    /// Decoded field values.
    pub fields: Fields,
}

/// Errors surfaced while calling the document store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentStoreError {
    /// Network transport failed before a response arrived.
    #[error("store transport failed: {message}")]
    Transport { message: String },
    /// The request exceeded its timeout.
    #[error("store call timed out: {message}")]
    Timeout { message: String },
    /// The store answered with a non-success status.
    #[error("store returned status {status}: {message}")]
    Status { status: u16, message: String },
    /// The response body could not be decoded.
    #[error("store response decode failed: {message}")]
    Decode { message: String },
    /// The request could not be built (base URL cannot be extended, ...).
    #[error("store request invalid: {message}")]
    InvalidRequest { message: String },
}

impl DocumentStoreError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }
}

/// Port for create/read/update/delete calls against a remote collection.
///
/// Every call is bounded by the adapter's request timeout. Write calls are
/// keyed by the entity's natural id (user numeric id as string, leave via
/// store-generated id, meal override via its composite key).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch every document of `collection`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, timeout, non-success status, or
    /// an undecodable response body.
    async fn list(&self, collection: &str) -> Result<Vec<Document>, DocumentStoreError>;

    /// Create a document with a store-generated id and return that id.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, timeout, non-success status, or
    /// an undecodable response body.
    async fn create(&self, collection: &str, fields: &Fields) -> Result<String, DocumentStoreError>;

    /// Create or replace the document at `id` with the full field set.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, timeout, or non-success status.
    async fn upsert(
        &self,
        collection: &str,
        id: &str,
        fields: &Fields,
    ) -> Result<(), DocumentStoreError>;

    /// Update only the named fields of the document at `id`.
    ///
    /// The update mask is derived from the keys of `fields`; absent fields
    /// keep their stored values.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, timeout, or non-success status.
    async fn patch(
        &self,
        collection: &str,
        id: &str,
        fields: &Fields,
    ) -> Result<(), DocumentStoreError>;

    /// Delete the document at `id`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, timeout, or non-success status.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), DocumentStoreError>;
}

/// Fixture implementation backed by in-process maps.
///
/// Honours the port contract closely enough for integration tests: generated
/// ids are sequential, `patch` merges only the named fields, and listing
/// returns documents in key order. Failure injection flips every call into a
/// transport error so degrade paths can be exercised.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    state: std::sync::Mutex<InMemoryState>,
}

#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default)]
struct InMemoryState {
    collections: std::collections::BTreeMap<String, std::collections::BTreeMap<String, Fields>>,
    next_id: u64,
    failing: bool,
}

#[cfg(any(test, feature = "test-support"))]
impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with a transport error.
    pub fn set_failing(&self, failing: bool) {
        self.lock().failing = failing;
    }

    /// Number of documents currently held in `collection`.
    pub fn len(&self, collection: &str) -> usize {
        self.lock()
            .collections
            .get(collection)
            .map_or(0, std::collections::BTreeMap::len)
    }

    /// Fetch a single document's fields, when present.
    pub fn get(&self, collection: &str, id: &str) -> Option<Fields> {
        self.lock()
            .collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, InMemoryState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn check(&self) -> Result<(), DocumentStoreError> {
        if self.lock().failing {
            Err(DocumentStoreError::transport("injected failure"))
        } else {
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn list(&self, collection: &str) -> Result<Vec<Document>, DocumentStoreError> {
        self.check()?;
        Ok(self
            .lock()
            .collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, fields)| Document {
                        id: id.clone(),
                        fields: fields.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn create(
        &self,
        collection: &str,
        fields: &Fields,
    ) -> Result<String, DocumentStoreError> {
        self.check()?;
        let mut state = self.lock();
        state.next_id += 1;
        let id = format!("doc-{}", state.next_id);
        state
            .collections
            .entry(collection.to_owned())
            .or_default()
            .insert(id.clone(), fields.clone());
        Ok(id)
    }

    async fn upsert(
        &self,
        collection: &str,
        id: &str,
        fields: &Fields,
    ) -> Result<(), DocumentStoreError> {
        self.check()?;
        self.lock()
            .collections
            .entry(collection.to_owned())
            .or_default()
            .insert(id.to_owned(), fields.clone());
        Ok(())
    }

    async fn patch(
        &self,
        collection: &str,
        id: &str,
        fields: &Fields,
    ) -> Result<(), DocumentStoreError> {
        self.check()?;
        let mut state = self.lock();
        let doc = state
            .collections
            .entry(collection.to_owned())
            .or_default()
            .entry(id.to_owned())
            .or_default();
        for (key, value) in fields {
            doc.insert(key.clone(), value.clone());
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), DocumentStoreError> {
        self.check()?;
        if let Some(docs) = self.lock().collections.get_mut(collection) {
            docs.remove(id);
        }
        Ok(())
    }
}
