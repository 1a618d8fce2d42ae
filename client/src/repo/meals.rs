//! Meal override loading and persistence.

use std::sync::Arc;

use tracing::warn;

use crate::domain::meal::{MealOverride, MealOverrideMap};
use crate::domain::ports::DocumentStore;

use super::{decode_document, entity_fields, MEALS_COLLECTION};

/// Loads and persists the `meals` collection.
#[derive(Clone)]
pub struct MealRepository {
    store: Arc<dyn DocumentStore>,
}

impl MealRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Fetch all overrides, re-keyed by their `{userId}_{date}` document id.
    ///
    /// A load failure degrades to the empty map.
    pub async fn load(&self) -> MealOverrideMap {
        let documents = match self.store.list(MEALS_COLLECTION).await {
            Ok(documents) => documents,
            Err(error) => {
                warn!(%error, collection = MEALS_COLLECTION, "meal load failed");
                return MealOverrideMap::new();
            }
        };

        documents
            .iter()
            .filter_map(|document| {
                decode_document::<MealOverride>(MEALS_COLLECTION, document).map(|mut meal| {
                    meal.doc_id = Some(document.id.clone());
                    (document.id.clone(), meal)
                })
            })
            .collect()
    }

    /// Persist one override under its composite key. Returns write success.
    ///
    /// The key makes the write idempotent: re-saving the same `(user, date)`
    /// overwrites, never duplicates.
    pub async fn save(&self, meal: &MealOverride) -> bool {
        let Some(fields) = entity_fields(meal) else {
            return false;
        };
        match self.store.upsert(MEALS_COLLECTION, &meal.key(), &fields).await {
            Ok(()) => true,
            Err(error) => {
                warn!(%error, key = %meal.key(), "meal save failed");
                false
            }
        }
    }
}
