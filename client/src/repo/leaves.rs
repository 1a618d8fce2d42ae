//! Leave list loading and persistence.

use std::sync::Arc;

use tracing::warn;

use crate::domain::leave::{Leave, LeaveUpdate};
use crate::domain::ports::DocumentStore;

use super::{decode_document, entity_fields, LEAVES_COLLECTION};

/// Loads and persists the `leaves` collection.
#[derive(Clone)]
pub struct LeaveRepository {
    store: Arc<dyn DocumentStore>,
}

impl LeaveRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Fetch all leaves, newest submission first.
    ///
    /// A load failure degrades to the empty list.
    pub async fn load(&self) -> Vec<Leave> {
        let documents = match self.store.list(LEAVES_COLLECTION).await {
            Ok(documents) => documents,
            Err(error) => {
                warn!(%error, collection = LEAVES_COLLECTION, "leave load failed");
                return Vec::new();
            }
        };

        let mut leaves: Vec<Leave> = documents
            .iter()
            .filter_map(|document| {
                decode_document::<Leave>(LEAVES_COLLECTION, document).map(|mut leave| {
                    leave.doc_id = Some(document.id.clone());
                    leave
                })
            })
            .collect();
        leaves.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        leaves
    }

    /// Create a leave document and return the record with its generated
    /// document id filled in, or `None` when the write was dropped.
    pub async fn add(&self, leave: Leave) -> Option<Leave> {
        let fields = entity_fields(&leave)?;
        match self.store.create(LEAVES_COLLECTION, &fields).await {
            Ok(doc_id) => Some(Leave {
                doc_id: Some(doc_id),
                ..leave
            }),
            Err(error) => {
                warn!(%error, leave_id = %leave.id, "leave create failed");
                None
            }
        }
    }

    /// Field-mask update of one leave document. Returns write success.
    pub async fn update(&self, doc_id: &str, update: &LeaveUpdate) -> bool {
        let fields = update.to_fields();
        if fields.is_empty() {
            return true;
        }
        match self.store.patch(LEAVES_COLLECTION, doc_id, &fields).await {
            Ok(()) => true,
            Err(error) => {
                warn!(%error, doc_id, "leave update failed");
                false
            }
        }
    }
}
