//! Domain entities, ports, and pure derivation rules.
//!
//! Purpose: strongly typed records for the roster, leave, and meal
//! collections; the driven-port traits adapters implement; and the
//! eligibility/report functions views call against a cache snapshot.
//! Each type documents its invariants and serde contract in its own Rustdoc.

pub mod eligibility;
pub mod error;
pub mod leave;
pub mod meal;
pub mod ports;
pub mod reports;
pub mod user;

pub use self::error::Error;
pub use self::leave::{Leave, LeaveSlot, LeaveStatus, LeaveUpdate};
pub use self::meal::{meal_key, MealOverride, MealOverrideMap, MealStatus};
pub use self::user::{default_kitchen_account, default_roster, Role, User};
