//! Reqwest-backed document store adapter.
//!
//! This adapter owns transport details only: URL construction (including the
//! repeated `updateMask.fieldPaths` query parameters for masked writes),
//! request timeout, HTTP error mapping, and tagged-value (de)serialisation
//! through the [`value`](super::value) codec.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode, Url};
use serde_json::Value;

use crate::domain::ports::{Document, DocumentStore, DocumentStoreError, Fields};

use super::dto::{document_id, CreateResponseDto, ListResponseDto};
use super::value::encode_document;

/// Default per-request timeout; a slower store degrades to empty results.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Document store adapter speaking the Firestore REST dialect.
pub struct FirestoreHttpStore {
    client: Client,
    base: Url,
}

impl FirestoreHttpStore {
    /// Build an adapter with the default request timeout.
    ///
    /// `base` points at the collection root, e.g.
    /// `https://firestore.googleapis.com/v1/projects/{id}/databases/(default)/documents`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url) -> Result<Self, reqwest::Error> {
        Self::with_timeout(base, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_timeout(base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base })
    }

    fn collection_url(&self, collection: &str) -> Result<Url, DocumentStoreError> {
        extend_path(&self.base, &[collection])
    }

    fn document_url(&self, collection: &str, id: &str) -> Result<Url, DocumentStoreError> {
        extend_path(&self.base, &[collection, id])
    }

    async fn execute(
        &self,
        method: Method,
        url: Url,
        body: Option<Value>,
    ) -> Result<Vec<u8>, DocumentStoreError> {
        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(&body);
        }
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(body.to_vec())
    }
}

#[async_trait]
impl DocumentStore for FirestoreHttpStore {
    async fn list(&self, collection: &str) -> Result<Vec<Document>, DocumentStoreError> {
        let url = self.collection_url(collection)?;
        let body = self.execute(Method::GET, url, None).await?;
        parse_list_body(&body)
    }

    async fn create(
        &self,
        collection: &str,
        fields: &Fields,
    ) -> Result<String, DocumentStoreError> {
        let url = self.collection_url(collection)?;
        let body = self
            .execute(Method::POST, url, Some(encode_document(fields)))
            .await?;
        parse_create_body(&body)
    }

    async fn upsert(
        &self,
        collection: &str,
        id: &str,
        fields: &Fields,
    ) -> Result<(), DocumentStoreError> {
        let url = self.document_url(collection, id)?;
        self.execute(Method::PATCH, url, Some(encode_document(fields)))
            .await?;
        Ok(())
    }

    async fn patch(
        &self,
        collection: &str,
        id: &str,
        fields: &Fields,
    ) -> Result<(), DocumentStoreError> {
        let url = masked_url(self.document_url(collection, id)?, fields);
        self.execute(Method::PATCH, url, Some(encode_document(fields)))
            .await?;
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), DocumentStoreError> {
        let url = self.document_url(collection, id)?;
        self.execute(Method::DELETE, url, None).await?;
        Ok(())
    }
}

fn extend_path(base: &Url, segments: &[&str]) -> Result<Url, DocumentStoreError> {
    let mut url = base.clone();
    {
        let mut path = url.path_segments_mut().map_err(|()| {
            DocumentStoreError::invalid_request("store base URL cannot carry path segments")
        })?;
        path.pop_if_empty();
        path.extend(segments);
    }
    Ok(url)
}

/// Append one `updateMask.fieldPaths` query parameter per updated field.
fn masked_url(mut url: Url, fields: &Fields) -> Url {
    {
        let mut query = url.query_pairs_mut();
        for field in fields.keys() {
            query.append_pair("updateMask.fieldPaths", field);
        }
    }
    url
}

fn parse_list_body(body: &[u8]) -> Result<Vec<Document>, DocumentStoreError> {
    let decoded: ListResponseDto = serde_json::from_slice(body)
        .map_err(|error| DocumentStoreError::decode(format!("invalid list payload: {error}")))?;
    decoded
        .documents
        .into_iter()
        .map(super::dto::DocumentDto::into_document)
        .collect()
}

fn parse_create_body(body: &[u8]) -> Result<String, DocumentStoreError> {
    let decoded: CreateResponseDto = serde_json::from_slice(body)
        .map_err(|error| DocumentStoreError::decode(format!("invalid create payload: {error}")))?;
    Ok(document_id(&decoded.name).to_owned())
}

fn map_transport_error(error: reqwest::Error) -> DocumentStoreError {
    if error.is_timeout() {
        DocumentStoreError::timeout(error.to_string())
    } else {
        DocumentStoreError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> DocumentStoreError {
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            DocumentStoreError::timeout(format!("status {}", status.as_u16()))
        }
        _ => DocumentStoreError::status(status.as_u16(), body_preview(body)),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
        format!("{preview}...")
    } else {
        compact
    }
}
