//! Cache-mutating actions.
//!
//! Each action follows the same shape: validate, write through the adapter,
//! merge the result into the cache, notify listeners. Validation failures
//! and dropped writes come back as [`Error`] values meant for direct display;
//! cached data is never mutated on a failed write.

use chrono::NaiveDate;

use crate::domain::eligibility::classify_submission;
use crate::domain::error::Error;
use crate::domain::leave::{Leave, LeaveSlot, LeaveStatus, LeaveUpdate};
use crate::domain::meal::{MealOverride, MealStatus};
use crate::domain::user::{Role, User};

use super::AppContext;

/// Input for [`AppContext::create_user`]; the numeric id is assigned here.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub name: String,
    pub role: Role,
    pub department: String,
}

/// Input for [`AppContext::submit_leave`].
#[derive(Debug, Clone)]
pub struct LeaveRequest {
    /// Calendar day the leave covers.
    pub date: NaiveDate,
    /// Portion of the day covered.
    pub time: LeaveSlot,
    /// Free-text reason; must not be blank.
    pub reason: String,
    /// Submitter's meal choice for an on-time partial leave. Ignored for
    /// full-day (forced on) and late (forced off) submissions.
    pub cancel_meal: bool,
}

fn require(value: &str, message: &str) -> Result<String, Error> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(message));
    }
    Ok(trimmed.to_owned())
}

impl AppContext {
    /// Create a roster account.
    ///
    /// The numeric id is `max(existing ids) + 1`, so ids of deleted accounts
    /// are never reused (unless the deleted id happened to be the maximum).
    ///
    /// # Errors
    ///
    /// Returns a validation error for blank required fields, a duplicate
    /// username error when the login name is taken, and a store error when
    /// the write was dropped.
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, Error> {
        let username = require(&new_user.username, "username must not be blank")?;
        let password = require(&new_user.password, "password must not be blank")?;
        let name = require(&new_user.name, "display name must not be blank")?;
        let department = require(&new_user.department, "department must not be blank")?;

        let users = self.users();
        if users.iter().any(|user| user.username == username) {
            return Err(Error::duplicate_username(username));
        }
        let id = users.iter().map(|user| user.id).max().unwrap_or(0) + 1;

        let user = User {
            id,
            username,
            password,
            name,
            role: new_user.role,
            department,
            zalo_id: None,
            avatar: None,
            doc_id: None,
        };
        if !self.users_repo.save(&user).await {
            return Err(Error::store_unavailable("user was not persisted"));
        }

        self.write().users.push(user.clone());
        self.notify();
        Ok(user)
    }

    /// Replace a roster account wholesale.
    ///
    /// When the edit targets the signed-in identity, the session object and
    /// its durable copy are refreshed too, so new credentials apply without
    /// re-login.
    ///
    /// # Errors
    ///
    /// Returns a validation error for blank required fields and a store
    /// error when the write was dropped.
    pub async fn edit_user(&self, user: User) -> Result<(), Error> {
        require(&user.username, "username must not be blank")?;
        require(&user.password, "password must not be blank")?;
        require(&user.name, "display name must not be blank")?;

        if !self.users_repo.save(&user).await {
            return Err(Error::store_unavailable("user edit was not persisted"));
        }

        let session_edit = {
            let mut cache = self.write();
            if let Some(slot) = cache.users.iter_mut().find(|u| u.id == user.id) {
                *slot = user.clone();
            }
            match &mut cache.current_user {
                Some(current) if current.id == user.id => {
                    *current = user.clone();
                    true
                }
                _ => false,
            }
        };
        if session_edit {
            if let Err(error) = self.session_store.save(&user).await {
                tracing::warn!(%error, "session refresh after self-edit failed");
            }
        }
        self.notify();
        Ok(())
    }

    /// Delete a roster account. The numeric id is retired, not recycled.
    ///
    /// # Errors
    ///
    /// Returns a store error when the delete was dropped.
    pub async fn remove_user(&self, user_id: u32) -> Result<(), Error> {
        if !self.users_repo.remove(user_id).await {
            return Err(Error::store_unavailable("user delete was not persisted"));
        }
        self.write().users.retain(|user| user.id != user_id);
        self.notify();
        Ok(())
    }

    /// Submit a leave for `user`.
    ///
    /// Lateness and the effective cancel-meal value are fixed here, against
    /// today's date, before the record is written; the submitter's meal
    /// choice only matters for an on-time partial leave. Current policy
    /// writes every submission as approved.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank reason and a store error when
    /// the write was dropped.
    pub async fn submit_leave(&self, user: &User, request: LeaveRequest) -> Result<Leave, Error> {
        let reason = require(&request.reason, "leave reason must not be blank")?;
        let outcome = classify_submission(
            request.date,
            self.today(),
            request.time,
            request.cancel_meal,
        );

        let now = self.clock.utc();
        let leave = Leave {
            id: now.timestamp_millis().to_string(),
            user_id: user.id,
            user_name: user.name.clone(),
            department: user.department.clone(),
            date: request.date,
            time: request.time,
            reason,
            status: LeaveStatus::Approved,
            cancel_meal: outcome.cancel_meal,
            is_late: outcome.is_late,
            created_at: now,
            doc_id: None,
        };

        let Some(stored) = self.leaves_repo.add(leave).await else {
            return Err(Error::store_unavailable("leave was not persisted"));
        };
        self.write().leaves.insert(0, stored.clone());
        self.notify();
        Ok(stored)
    }

    /// Field-mask update of one leave; only set fields are touched.
    ///
    /// # Errors
    ///
    /// Returns a store error when the patch was dropped.
    pub async fn modify_leave(&self, doc_id: &str, update: LeaveUpdate) -> Result<(), Error> {
        if update.is_empty() {
            return Ok(());
        }
        if !self.leaves_repo.update(doc_id, &update).await {
            return Err(Error::store_unavailable("leave update was not persisted"));
        }
        {
            let mut cache = self.write();
            if let Some(leave) = cache
                .leaves
                .iter_mut()
                .find(|leave| leave.doc_id.as_deref() == Some(doc_id))
            {
                leave.apply(&update);
            }
        }
        self.notify();
        Ok(())
    }

    /// Record an explicit meal decision for `user` on `date`.
    ///
    /// The composite `{userId}_{date}` key makes repeated decisions for the
    /// same day overwrite each other.
    ///
    /// # Errors
    ///
    /// Returns a store error when the write was dropped.
    pub async fn set_meal_override(
        &self,
        user: &User,
        date: NaiveDate,
        status: MealStatus,
        reason: Option<String>,
    ) -> Result<MealOverride, Error> {
        let meal = MealOverride {
            user_id: user.id,
            user_name: user.name.clone(),
            date,
            status,
            reason: reason.filter(|text| !text.trim().is_empty()),
            doc_id: None,
        };
        if !self.meals_repo.save(&meal).await {
            return Err(Error::store_unavailable("meal override was not persisted"));
        }
        let stored = MealOverride {
            doc_id: Some(meal.key()),
            ..meal
        };
        self.write()
            .meal_overrides
            .insert(stored.key(), stored.clone());
        self.notify();
        Ok(stored)
    }
}
