//! Meal eligibility rules.
//!
//! Pure derivation over a cache snapshot plus a target date. Nothing here
//! mutates state; view code calls these to produce counts and lists, and the
//! submission path calls [`classify_submission`] to fix a leave's lateness
//! and meal default before it is written.

use chrono::NaiveDate;

use super::leave::{Leave, LeaveSlot, LeaveStatus};
use super::meal::{meal_key, MealOverrideMap, MealStatus};
use super::user::User;

/// Outcome of classifying a leave submission against today's date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionOutcome {
    /// Submission arrived on or after the leave day itself.
    ///
    /// Policy requires notice by the prior evening, so same-day counts as
    /// late.
    pub is_late: bool,
    /// Effective cancel-meal value to store with the leave.
    pub cancel_meal: bool,
}

/// Classify a leave submission and derive its effective cancel-meal value.
///
/// A late submission never cancels the meal: the kitchen has already cooked.
/// An on-time full-day leave always cancels it. An on-time partial leave
/// leaves the choice with the submitter.
pub fn classify_submission(
    leave_date: NaiveDate,
    today: NaiveDate,
    slot: LeaveSlot,
    requested_cancel: bool,
) -> SubmissionOutcome {
    let is_late = leave_date <= today;
    let cancel_meal = if is_late {
        false
    } else {
        slot == LeaveSlot::Full || requested_cancel
    };
    SubmissionOutcome {
        is_late,
        cancel_meal,
    }
}

/// Whether an employee is expected to eat on `date`.
///
/// Not eating as soon as any approved leave for the day suppresses the meal
/// (full-day slot or an explicit cancel) — a user can hold several partial
/// leaves on one day and one suppressing leave is enough. Otherwise not
/// eating when a `Cancelled` override exists for the day. Eating by default
/// in every other case: presence implies a meal.
pub fn is_employee_eating(
    employee: &User,
    date: NaiveDate,
    leaves: &[Leave],
    overrides: &MealOverrideMap,
) -> bool {
    let suppressed = leaves.iter().any(|l| {
        l.user_id == employee.id
            && l.date == date
            && l.status == LeaveStatus::Approved
            && l.suppresses_meal()
    });
    if suppressed {
        return false;
    }
    match overrides.get(&meal_key(employee.id, date)) {
        Some(meal) => meal.status != MealStatus::Cancelled,
        None => true,
    }
}

/// Number of employees expected to eat on `date`.
///
/// Only `Employee` accounts participate; managers and kitchen staff are not
/// part of the count.
pub fn meal_count(
    date: NaiveDate,
    users: &[User],
    leaves: &[Leave],
    overrides: &MealOverrideMap,
) -> usize {
    users
        .iter()
        .filter(|user| user.is_employee() && is_employee_eating(user, date, leaves, overrides))
        .count()
}
