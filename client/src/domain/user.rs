//! User identity and the default roster.
//!
//! Wire field names follow the store schema (`camelCase`); the store document
//! id rides alongside the record but never serialises into document fields.

use serde::{Deserialize, Serialize};

/// Role attached to every account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular employee: submits leaves, toggles daily meals.
    Employee,
    /// Manager: administers the roster and reviews reports.
    Manager,
    /// Kitchen staff: reads meal counts and leave lists.
    Kitchen,
}

/// One account in the roster.
///
/// Passwords are opaque strings compared verbatim; the store carries them in
/// the clear. That weakness is inherited from the deployed system and is
/// preserved here rather than silently upgraded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Numeric identity, unique in the active set, never reused.
    pub id: u32,
    /// Login name, unique in the active set.
    pub username: String,
    /// Opaque credential compared verbatim at login.
    pub password: String,
    /// Display name.
    pub name: String,
    /// Account role.
    pub role: Role,
    /// Free-text department label used for report grouping.
    pub department: String,
    /// External identity id, when the account was linked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zalo_id: Option<String>,
    /// Avatar reference, when the account was linked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Store document id; populated after a fetch, never serialised.
    #[serde(skip)]
    pub doc_id: Option<String>,
}

impl User {
    /// Whether this account participates in meal counts.
    pub fn is_employee(&self) -> bool {
        self.role == Role::Employee
    }
}

fn roster_entry(id: u32, username: &str, name: &str, role: Role, department: &str) -> User {
    User {
        id,
        username: username.to_owned(),
        password: "123456".to_owned(),
        name: name.to_owned(),
        role,
        department: department.to_owned(),
        zalo_id: None,
        avatar: None,
        doc_id: None,
    }
}

/// Fixed roster written to an empty store on first load.
///
/// Contains one manager, two employees, and the kitchen account every
/// deployment must have. Credentials are fixed and expected to be rotated by
/// the manager after first login.
pub fn default_roster() -> Vec<User> {
    vec![
        roster_entry(1, "admin", "Quản lý", Role::Manager, "Quản lý"),
        roster_entry(2, "nv1", "Nguyễn Văn A", Role::Employee, "Kỹ thuật"),
        roster_entry(3, "nv2", "Trần Thị B", Role::Employee, "Kế toán"),
        roster_entry(4, "nhabep", "Nhà Bếp", Role::Kitchen, "Nhà bếp"),
    ]
}

/// The kitchen entry of the default roster.
///
/// Synthesised into any roster that lost its kitchen login, so meal counts
/// always have a reader.
pub fn default_kitchen_account() -> User {
    roster_entry(4, "nhabep", "Nhà Bếp", Role::Kitchen, "Nhà bếp")
}
