//! Repository loaders over the [`DocumentStore`] port.
//!
//! Per-entity load/save built on the adapter. This layer owns the crate's
//! degrade-on-failure contract: every adapter error is logged and swallowed,
//! and callers receive an empty/default value or a `false`/`None` result
//! instead of an error. "No panic, possibly stale data" is the deal.
//!
//! [`DocumentStore`]: crate::domain::ports::DocumentStore

mod leaves;
mod meals;
mod users;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::domain::ports::{Document, Fields};

pub use leaves::LeaveRepository;
pub use meals::MealRepository;
pub use users::UserRepository;

/// `users` collection, keyed by numeric id as string.
pub const USERS_COLLECTION: &str = "users";
/// `leaves` collection, keyed by store-generated id.
pub const LEAVES_COLLECTION: &str = "leaves";
/// `meals` collection, keyed by `{userId}_{date}`.
pub const MEALS_COLLECTION: &str = "meals";

/// Serialise an entity into a document field map.
///
/// Our entities always serialise to objects; anything else is a programming
/// error reported as `None` and logged.
fn entity_fields<T: Serialize>(entity: &T) -> Option<Fields> {
    match serde_json::to_value(entity) {
        Ok(Value::Object(fields)) => Some(fields),
        Ok(other) => {
            debug!(kind = ?other, "entity did not serialise to an object");
            None
        }
        Err(error) => {
            debug!(%error, "entity serialisation failed");
            None
        }
    }
}

/// Decode one document into an entity, or skip it with a log line.
///
/// Rows that fail to decode never abort a load; the rest of the collection
/// still comes through.
fn decode_document<T: DeserializeOwned>(collection: &str, document: &Document) -> Option<T> {
    match serde_json::from_value(Value::Object(document.fields.clone())) {
        Ok(entity) => Some(entity),
        Err(error) => {
            debug!(
                %error,
                collection,
                document_id = %document.id,
                "skipping undecodable document"
            );
            None
        }
    }
}
