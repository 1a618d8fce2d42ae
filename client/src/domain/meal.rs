//! Per-day meal overrides.
//!
//! An override records an explicit employee action for one day, superseding
//! the default "present employees eat" assumption. The store document id is
//! the `{userId}_{date}` composite key, so re-saving the same day overwrites
//! instead of duplicating.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Explicit per-day meal decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealStatus {
    /// Employee re-registered for the day's meal.
    Eating,
    /// Employee cancelled the day's meal.
    Cancelled,
}

/// One `(user, date)` meal override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealOverride {
    /// Acting user's numeric id.
    pub user_id: u32,
    /// Display name captured at the time of the action.
    pub user_name: String,
    /// Day the override applies to.
    pub date: NaiveDate,
    /// The explicit decision.
    pub status: MealStatus,
    /// Optional free-text reason ("ăn ngoài", ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Store document id; equals [`MealOverride::key`] once persisted.
    #[serde(skip)]
    pub doc_id: Option<String>,
}

impl MealOverride {
    /// Composite store key for this override.
    pub fn key(&self) -> String {
        meal_key(self.user_id, self.date)
    }
}

/// Composite `{userId}_{date}` key for a meal override document.
pub fn meal_key(user_id: u32, date: NaiveDate) -> String {
    format!("{user_id}_{date}")
}

/// Cache-side view of the `meals` collection, keyed by composite key.
pub type MealOverrideMap = BTreeMap<String, MealOverride>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composite_key_is_user_id_underscore_iso_date() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 30).expect("valid date");
        assert_eq!(meal_key(12, date), "12_2026-08-30");
    }

    #[test]
    fn key_matches_free_function() {
        let meal = MealOverride {
            user_id: 3,
            user_name: "Trần Thị B".to_owned(),
            date: NaiveDate::from_ymd_opt(2026, 8, 30).expect("valid date"),
            status: MealStatus::Cancelled,
            reason: Some("ăn ngoài".to_owned()),
            doc_id: None,
        };
        assert_eq!(meal.key(), meal_key(meal.user_id, meal.date));
    }
}
