//! Leave submission, field-mask updates, meal overrides, and the meal count
//! as seen through the cache.

mod support;

use canteen_client::domain::eligibility::meal_count;
use canteen_client::domain::{LeaveSlot, LeaveStatus, LeaveUpdate, MealStatus, User};
use canteen_client::LeaveRequest;
use chrono::{Days, NaiveDate};

use support::{harness, Harness};

fn request(date: NaiveDate, time: LeaveSlot, cancel_meal: bool) -> LeaveRequest {
    LeaveRequest {
        date,
        time,
        reason: "về quê".to_owned(),
        cancel_meal,
    }
}

async fn initialized() -> (Harness, User, NaiveDate) {
    let h = harness();
    h.context.initialize().await;
    let employee = h
        .context
        .users()
        .into_iter()
        .find(User::is_employee)
        .expect("roster holds an employee");
    let today = h.context.today();
    (h, employee, today)
}

#[tokio::test]
async fn same_day_full_leave_is_late_and_keeps_the_meal() {
    let (h, employee, today) = initialized().await;

    let leave = h
        .context
        .submit_leave(&employee, request(today, LeaveSlot::Full, false))
        .await
        .expect("submission succeeds");

    assert!(leave.is_late, "same-day notice is late");
    assert!(!leave.cancel_meal, "late overrides the full-day default");
    assert_eq!(leave.status, LeaveStatus::Approved, "policy auto-approves");
    assert!(leave.doc_id.is_some(), "store id came back with the record");
}

#[tokio::test]
async fn future_full_leave_cancels_the_meal_by_default() {
    let (h, employee, today) = initialized().await;
    let future = today.checked_add_days(Days::new(3)).expect("valid date");

    let leave = h
        .context
        .submit_leave(&employee, request(future, LeaveSlot::Full, false))
        .await
        .expect("submission succeeds");

    assert!(!leave.is_late);
    assert!(leave.cancel_meal, "on-time full day forces the cancel");
}

#[tokio::test]
async fn future_partial_leave_keeps_the_submitters_choice() {
    let (h, employee, today) = initialized().await;
    let future = today.checked_add_days(Days::new(3)).expect("valid date");

    let leave = h
        .context
        .submit_leave(&employee, request(future, LeaveSlot::Morning, true))
        .await
        .expect("submission succeeds");

    assert!(!leave.is_late);
    assert!(leave.cancel_meal, "explicit choice is stored as made");
}

#[tokio::test]
async fn blank_reason_is_rejected_before_any_write() {
    let (h, employee, today) = initialized().await;
    let mut input = request(today, LeaveSlot::Full, false);
    input.reason = "  ".to_owned();

    h.context
        .submit_leave(&employee, input)
        .await
        .expect_err("blank reason must fail");
    assert_eq!(h.store.len("leaves"), 0);
}

#[tokio::test]
async fn submissions_are_cached_newest_first() {
    let (h, employee, today) = initialized().await;
    let future = today.checked_add_days(Days::new(1)).expect("valid date");

    h.context
        .submit_leave(&employee, request(today, LeaveSlot::Morning, false))
        .await
        .expect("submission succeeds");
    let second = h
        .context
        .submit_leave(&employee, request(future, LeaveSlot::Full, false))
        .await
        .expect("submission succeeds");

    let leaves = h.context.leaves();
    assert_eq!(leaves.len(), 2);
    assert_eq!(
        leaves.first().map(|l| l.doc_id.clone()),
        Some(second.doc_id),
        "the latest submission leads the list"
    );
}

#[tokio::test]
async fn masked_update_touches_only_the_named_field() {
    let (h, employee, today) = initialized().await;
    let future = today.checked_add_days(Days::new(3)).expect("valid date");

    let leave = h
        .context
        .submit_leave(&employee, request(future, LeaveSlot::Full, false))
        .await
        .expect("submission succeeds");
    let doc_id = leave.doc_id.clone().expect("store id present");

    h.context
        .modify_leave(
            &doc_id,
            LeaveUpdate {
                reason: Some("đi công tác".to_owned()),
                ..LeaveUpdate::default()
            },
        )
        .await
        .expect("update succeeds");

    let fields = h.store.get("leaves", &doc_id).expect("document exists");
    assert_eq!(fields.get("reason"), Some(&serde_json::json!("đi công tác")));
    assert_eq!(
        fields.get("status"),
        Some(&serde_json::json!("approved")),
        "unnamed fields keep their stored values"
    );
    assert_eq!(fields.get("cancelMeal"), Some(&serde_json::json!(true)));
    assert_eq!(
        fields.get("date"),
        Some(&serde_json::json!(future.to_string()))
    );

    let cached = h
        .context
        .leaves()
        .into_iter()
        .find(|l| l.doc_id.as_deref() == Some(doc_id.as_str()))
        .expect("leave stays cached");
    assert_eq!(cached.reason, "đi công tác");
    assert!(cached.cancel_meal, "cache merge honours the mask too");
}

#[tokio::test]
async fn meal_override_cancels_and_reregisters_idempotently() {
    let (h, employee, today) = initialized().await;
    let employees = h.context.users().iter().filter(|u| u.is_employee()).count();
    let snapshot = h.context.snapshot();
    assert_eq!(
        meal_count(today, &snapshot.users, &snapshot.leaves, &snapshot.meal_overrides),
        employees
    );

    h.context
        .set_meal_override(&employee, today, MealStatus::Cancelled, Some("ăn ngoài".to_owned()))
        .await
        .expect("override succeeds");
    // Saving the same day again overwrites the one document.
    h.context
        .set_meal_override(&employee, today, MealStatus::Cancelled, None)
        .await
        .expect("override succeeds");
    assert_eq!(h.store.len("meals"), 1, "composite key is idempotent");

    let snapshot = h.context.snapshot();
    assert_eq!(
        meal_count(today, &snapshot.users, &snapshot.leaves, &snapshot.meal_overrides),
        employees - 1
    );

    h.context
        .set_meal_override(&employee, today, MealStatus::Eating, None)
        .await
        .expect("re-registration succeeds");
    let snapshot = h.context.snapshot();
    assert_eq!(
        meal_count(today, &snapshot.users, &snapshot.leaves, &snapshot.meal_overrides),
        employees,
        "an eating override restores the default"
    );
}

#[tokio::test]
async fn overrides_survive_a_sync_refresh() {
    let (h, employee, today) = initialized().await;

    h.context
        .set_meal_override(&employee, today, MealStatus::Cancelled, None)
        .await
        .expect("override succeeds");
    h.context.refresh().await;

    let overrides = h.context.meal_overrides();
    assert_eq!(overrides.len(), 1);
    let key = format!("{}_{today}", employee.id);
    assert!(
        overrides.contains_key(&key),
        "the reloaded map is keyed by the composite id"
    );
}
