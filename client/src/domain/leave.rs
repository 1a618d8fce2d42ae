//! Leave records and partial leave updates.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Portion of the day a leave covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveSlot {
    /// Whole working day.
    Full,
    /// Morning only.
    Morning,
    /// Afternoon only.
    Afternoon,
}

/// Approval state of a leave.
///
/// Current policy auto-approves every submission, so only [`Approved`] is
/// ever written. `Pending` and `Rejected` stay in the model for forward
/// compatibility with an approval workflow.
///
/// [`Approved`]: LeaveStatus::Approved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

/// One leave request.
///
/// `user_name` and `department` are denormalised at submission time and not
/// kept in sync with later roster edits.
///
/// Invariants, established at submission and preserved by updates:
/// - `is_late` implies `cancel_meal == false` (late notice means the kitchen
///   could not be told in time);
/// - an on-time `Full` slot implies `cancel_meal == true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leave {
    /// Client-assigned identity (millisecond timestamp at submission).
    pub id: String,
    /// Submitting user's numeric id.
    pub user_id: u32,
    /// Display name captured at submission.
    pub user_name: String,
    /// Department captured at submission.
    pub department: String,
    /// Calendar day the leave covers.
    pub date: NaiveDate,
    /// Portion of the day covered.
    pub time: LeaveSlot,
    /// Free-text reason.
    pub reason: String,
    /// Approval state; always `Approved` under current policy.
    pub status: LeaveStatus,
    /// Whether the day's meal is cancelled along with the leave.
    pub cancel_meal: bool,
    /// Whether the submission arrived too late to inform the kitchen.
    pub is_late: bool,
    /// Submission timestamp; leave lists sort descending on it.
    pub created_at: DateTime<Utc>,
    /// Store document id; populated after a fetch, never serialised.
    #[serde(skip)]
    pub doc_id: Option<String>,
}

impl Leave {
    /// Whether this leave removes the employee from the meal count.
    ///
    /// A full-day leave always does; a partial leave only when the submitter
    /// cancelled the meal.
    pub fn suppresses_meal(&self) -> bool {
        self.time == LeaveSlot::Full || self.cancel_meal
    }

    /// Apply a partial update in place, mirroring a field-mask store write.
    pub fn apply(&mut self, update: &LeaveUpdate) {
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(time) = update.time {
            self.time = time;
        }
        if let Some(date) = update.date {
            self.date = date;
        }
        if let Some(reason) = &update.reason {
            self.reason = reason.clone();
        }
        if let Some(cancel_meal) = update.cancel_meal {
            self.cancel_meal = cancel_meal;
        }
    }
}

/// Field-mask update payload for a leave document.
///
/// Only set fields are written; everything else keeps its stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LeaveStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<LeaveSlot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_meal: Option<bool>,
}

impl LeaveUpdate {
    /// Whether the update carries no fields at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Serialise the set fields into a store field map.
    ///
    /// The map's keys double as the update mask.
    pub fn to_fields(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(fields)) => fields,
            _ => Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_leave() -> Leave {
        Leave {
            id: "1756500000000".to_owned(),
            user_id: 2,
            user_name: "Nguyễn Văn A".to_owned(),
            department: "Kỹ thuật".to_owned(),
            date: NaiveDate::from_ymd_opt(2026, 9, 1).expect("valid date"),
            time: LeaveSlot::Morning,
            reason: "khám bệnh".to_owned(),
            status: LeaveStatus::Approved,
            cancel_meal: false,
            is_late: false,
            created_at: DateTime::parse_from_rfc3339("2026-08-30T08:00:00Z")
                .expect("valid timestamp")
                .with_timezone(&Utc),
            doc_id: Some("abc123".to_owned()),
        }
    }

    #[test]
    fn update_fields_contain_only_set_entries() {
        let update = LeaveUpdate {
            reason: Some("đi công tác".to_owned()),
            ..LeaveUpdate::default()
        };

        let fields = update.to_fields();
        assert_eq!(fields.len(), 1, "only the set field may be written");
        assert_eq!(fields.get("reason"), Some(&serde_json::json!("đi công tác")));
    }

    #[test]
    fn apply_merges_set_fields_and_keeps_the_rest() {
        let mut leave = sample_leave();
        leave.apply(&LeaveUpdate {
            status: Some(LeaveStatus::Rejected),
            reason: Some("trùng lịch".to_owned()),
            ..LeaveUpdate::default()
        });

        assert_eq!(leave.status, LeaveStatus::Rejected);
        assert_eq!(leave.reason, "trùng lịch");
        assert_eq!(leave.time, LeaveSlot::Morning, "unset fields keep their value");
        assert!(!leave.cancel_meal, "unset fields keep their value");
    }

    #[test]
    fn wire_shape_uses_camel_case_date_strings() {
        let value = serde_json::to_value(sample_leave()).expect("leave serialises");
        let object = value.as_object().expect("leave is an object");
        assert_eq!(object.get("date"), Some(&serde_json::json!("2026-09-01")));
        assert_eq!(object.get("cancelMeal"), Some(&serde_json::json!(false)));
        assert_eq!(object.get("time"), Some(&serde_json::json!("morning")));
        assert!(!object.contains_key("docId"), "doc id stays out of fields");
    }
}
