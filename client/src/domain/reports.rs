//! Aggregate report folds for the kitchen and manager screens.
//!
//! Pure functions over cache snapshots; date-range and grouping behaviour for
//! the daily list, week/month statistics, and leave filters.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::eligibility::is_employee_eating;
use super::leave::{Leave, LeaveStatus};
use super::meal::MealOverrideMap;
use super::user::User;

/// Who eats and who cancelled on one day, employees only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayMealReport {
    pub eating: Vec<User>,
    pub cancelled: Vec<User>,
}

impl DayMealReport {
    /// Total employees the report covers.
    pub fn total(&self) -> usize {
        self.eating.len() + self.cancelled.len()
    }
}

/// Per-department meal totals over a date range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DepartmentMealStats {
    pub eating: usize,
    pub cancelled: usize,
}

/// Meal totals over a date range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MealRangeStats {
    /// Sum of daily eating headcounts.
    pub total_meals: usize,
    /// Sum of daily cancellation headcounts.
    pub total_cancelled: usize,
    /// Number of days folded in.
    pub days: usize,
    /// Totals grouped by department label.
    pub by_department: BTreeMap<String, DepartmentMealStats>,
}

/// Classify every employee for one day.
pub fn day_meal_report(
    date: NaiveDate,
    users: &[User],
    leaves: &[Leave],
    overrides: &MealOverrideMap,
) -> DayMealReport {
    let mut report = DayMealReport::default();
    for user in users.iter().filter(|u| u.is_employee()) {
        if is_employee_eating(user, date, leaves, overrides) {
            report.eating.push(user.clone());
        } else {
            report.cancelled.push(user.clone());
        }
    }
    report
}

/// Fold daily reports over `dates` into range totals.
pub fn range_meal_stats(
    dates: &[NaiveDate],
    users: &[User],
    leaves: &[Leave],
    overrides: &MealOverrideMap,
) -> MealRangeStats {
    let mut stats = MealRangeStats {
        days: dates.len(),
        ..MealRangeStats::default()
    };
    for &date in dates {
        let report = day_meal_report(date, users, leaves, overrides);
        stats.total_meals += report.eating.len();
        stats.total_cancelled += report.cancelled.len();
        for user in &report.eating {
            stats
                .by_department
                .entry(user.department.clone())
                .or_default()
                .eating += 1;
        }
        for user in &report.cancelled {
            stats
                .by_department
                .entry(user.department.clone())
                .or_default()
                .cancelled += 1;
        }
    }
    stats
}

/// Consecutive days ending at `until`, oldest first.
pub fn trailing_dates(until: NaiveDate, days: usize) -> Vec<NaiveDate> {
    (0..days)
        .rev()
        .filter_map(|offset| until.checked_sub_days(chrono::Days::new(offset as u64)))
        .collect()
}

/// Approved leaves covering `date`.
pub fn approved_leaves_on(date: NaiveDate, leaves: &[Leave]) -> Vec<Leave> {
    leaves
        .iter()
        .filter(|l| l.date == date && l.status == LeaveStatus::Approved)
        .cloned()
        .collect()
}

/// Leaves whose date falls in `from..=to`, preserving input order.
pub fn leaves_in_range(from: NaiveDate, to: NaiveDate, leaves: &[Leave]) -> Vec<Leave> {
    leaves
        .iter()
        .filter(|l| l.date >= from && l.date <= to)
        .cloned()
        .collect()
}

/// Leaves grouped by the department captured at submission.
pub fn leaves_by_department(leaves: &[Leave]) -> BTreeMap<String, Vec<Leave>> {
    let mut groups: BTreeMap<String, Vec<Leave>> = BTreeMap::new();
    for leave in leaves {
        groups
            .entry(leave.department.clone())
            .or_default()
            .push(leave.clone());
    }
    groups
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use super::*;
    use crate::domain::leave::LeaveSlot;
    use crate::domain::user::default_roster;

    fn date(s: &str) -> NaiveDate {
        s.parse().expect("valid test date")
    }

    fn full_day_leave(user: &User, day: NaiveDate) -> Leave {
        Leave {
            id: "1".to_owned(),
            user_id: user.id,
            user_name: user.name.clone(),
            department: user.department.clone(),
            date: day,
            time: LeaveSlot::Full,
            reason: "nghỉ phép".to_owned(),
            status: LeaveStatus::Approved,
            cancel_meal: true,
            is_late: false,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            doc_id: None,
        }
    }

    #[test]
    fn day_report_splits_employees_by_eligibility() {
        let users = default_roster();
        let day = date("2026-08-30");
        let on_leave = users.iter().find(|u| u.is_employee()).expect("employee");
        let leaves = vec![full_day_leave(on_leave, day)];

        let report = day_meal_report(day, &users, &leaves, &MealOverrideMap::new());
        assert_eq!(report.total(), 2, "both roster employees are covered");
        assert_eq!(report.cancelled.len(), 1);
        assert_eq!(report.cancelled.first().map(|u| u.id), Some(on_leave.id));
    }

    #[test]
    fn range_stats_accumulate_per_department() {
        let users = default_roster();
        let days = trailing_dates(date("2026-08-30"), 2);
        let on_leave = users.iter().find(|u| u.is_employee()).expect("employee");
        let leaves = vec![full_day_leave(on_leave, date("2026-08-30"))];

        let stats = range_meal_stats(&days, &users, &leaves, &MealOverrideMap::new());
        assert_eq!(stats.days, 2);
        // Two employees over two days, one meal lost to the leave.
        assert_eq!(stats.total_meals, 3);
        assert_eq!(stats.total_cancelled, 1);
        assert_eq!(
            stats.by_department.get(&on_leave.department),
            Some(&DepartmentMealStats {
                eating: 1,
                cancelled: 1
            })
        );
    }

    #[test]
    fn trailing_dates_are_oldest_first_and_inclusive() {
        let dates = trailing_dates(date("2026-08-30"), 3);
        assert_eq!(
            dates,
            vec![date("2026-08-28"), date("2026-08-29"), date("2026-08-30")]
        );
    }

    #[test]
    fn leaves_in_range_keeps_bounds_inclusive() {
        let users = default_roster();
        let emp = users.iter().find(|u| u.is_employee()).expect("employee");
        let leaves = vec![
            full_day_leave(emp, date("2026-08-28")),
            full_day_leave(emp, date("2026-08-30")),
            full_day_leave(emp, date("2026-09-02")),
        ];
        let in_range = leaves_in_range(date("2026-08-28"), date("2026-08-30"), &leaves);
        assert_eq!(in_range.len(), 2);
    }
}
