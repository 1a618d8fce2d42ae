//! Roster loading, seeding, and persistence.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::ports::DocumentStore;
use crate::domain::user::{default_kitchen_account, default_roster, Role, User};

use super::{decode_document, entity_fields, USERS_COLLECTION};

/// Loads and persists the `users` collection.
#[derive(Clone)]
pub struct UserRepository {
    store: Arc<dyn DocumentStore>,
}

impl UserRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Fetch the full roster.
    ///
    /// An empty collection is seeded with the default roster; a roster
    /// without a kitchen login gets the default kitchen account appended and
    /// persisted. A load failure degrades to the default roster so login
    /// stays possible against a flaky store.
    pub async fn load(&self) -> Vec<User> {
        let documents = match self.store.list(USERS_COLLECTION).await {
            Ok(documents) => documents,
            Err(error) => {
                warn!(%error, collection = USERS_COLLECTION, "user load failed, using default roster");
                return default_roster();
            }
        };

        let mut users: Vec<User> = documents
            .iter()
            .filter_map(|document| {
                decode_document::<User>(USERS_COLLECTION, document).map(|mut user| {
                    user.doc_id = Some(document.id.clone());
                    user
                })
            })
            .collect();

        if users.is_empty() {
            info!("empty user collection, seeding default roster");
            let mut roster = default_roster();
            for user in &mut roster {
                self.save(user).await;
                // The seeded record is stored under its numeric id, so the
                // returned roster matches what the next list will decode.
                user.doc_id = Some(user.id.to_string());
            }
            return roster;
        }

        if !users.iter().any(|user| user.role == Role::Kitchen) {
            info!("roster has no kitchen login, restoring the default one");
            let mut kitchen = default_kitchen_account();
            self.save(&kitchen).await;
            kitchen.doc_id = Some(kitchen.id.to_string());
            users.push(kitchen);
        }

        users
    }

    /// Persist one user, keyed by its numeric id. Returns write success.
    pub async fn save(&self, user: &User) -> bool {
        let Some(fields) = entity_fields(user) else {
            return false;
        };
        match self
            .store
            .upsert(USERS_COLLECTION, &user.id.to_string(), &fields)
            .await
        {
            Ok(()) => true,
            Err(error) => {
                warn!(%error, user_id = user.id, "user save failed");
                false
            }
        }
    }

    /// Delete one user by numeric id. Returns write success.
    pub async fn remove(&self, user_id: u32) -> bool {
        match self
            .store
            .delete(USERS_COLLECTION, &user_id.to_string())
            .await
        {
            Ok(()) => true,
            Err(error) => {
                warn!(%error, user_id, "user delete failed");
                false
            }
        }
    }
}
