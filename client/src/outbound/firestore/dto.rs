//! Wire DTOs for the document store's REST responses.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::ports::{Document, DocumentStoreError};

use super::value::decode_fields;

/// `GET {base}/{collection}` response body.
#[derive(Debug, Deserialize)]
pub(super) struct ListResponseDto {
    #[serde(default)]
    pub documents: Vec<DocumentDto>,
}

/// One document as it appears in list and create responses.
#[derive(Debug, Deserialize)]
pub(super) struct DocumentDto {
    /// Full resource path; the final segment is the document id.
    pub name: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl DocumentDto {
    /// Decode the tagged fields and strip the id off the resource path.
    pub(super) fn into_document(self) -> Result<Document, DocumentStoreError> {
        let fields = decode_fields(&self.fields)
            .map_err(|error| DocumentStoreError::decode(error.to_string()))?;
        Ok(Document {
            id: document_id(&self.name).to_owned(),
            fields,
        })
    }
}

/// `POST {base}/{collection}` response body; echoes the generated name.
#[derive(Debug, Deserialize)]
pub(super) struct CreateResponseDto {
    pub name: String,
}

/// Final path segment of a document resource name.
pub(super) fn document_id(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_id_is_the_last_path_segment() {
        assert_eq!(
            document_id("projects/p/databases/(default)/documents/users/4"),
            "4"
        );
        assert_eq!(document_id("bare-id"), "bare-id");
    }

    #[test]
    fn list_response_without_documents_is_empty() {
        let decoded: ListResponseDto =
            serde_json::from_str("{}").expect("empty list body decodes");
        assert!(decoded.documents.is_empty());
    }

    #[test]
    fn document_dto_decodes_tagged_fields() {
        let dto: DocumentDto = serde_json::from_value(serde_json::json!({
            "name": "projects/p/databases/(default)/documents/users/4",
            "fields": {
                "id": { "integerValue": "4" },
                "username": { "stringValue": "nhabep" },
            },
            "createTime": "2026-08-30T00:00:00Z",
        }))
        .expect("document body decodes");

        let document = dto.into_document().expect("tagged fields decode");
        assert_eq!(document.id, "4");
        assert_eq!(document.fields.get("id"), Some(&serde_json::json!(4)));
        assert_eq!(
            document.fields.get("username"),
            Some(&serde_json::json!("nhabep"))
        );
    }
}
