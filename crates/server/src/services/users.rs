//! User lifecycle operations.
//!
//! The service owns the [`UserStore`] behind a single mutex. Every operation
//! takes the lock once, so a lookup and the mutation that follows it are
//! never interleaved with another request.

use chrono::{Local, NaiveDate};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::instrument;

use user_registry_core::{
    MinimumAge, User, UserPatch, UserPayload, UserReplacement, Violation, validate_new_user,
};

use crate::store::UserStore;

/// Errors from user operations. All of them are caused by the request.
#[derive(Debug, Error)]
pub enum UserError {
    /// One or more field rules failed.
    #[error("{}", first_message(.0))]
    Validation(Vec<Violation>),

    /// The user is younger than the configured minimum age.
    #[error("User must be at least {min_age} years old")]
    AgeIneligible { min_age: MinimumAge },

    /// The search range starts after it ends.
    #[error("Invalid range: from ({from}) is after to ({to})")]
    InvalidRange { from: NaiveDate, to: NaiveDate },

    /// No user has the given email.
    #[error("User not found: {0}")]
    NotFound(String),
}

fn first_message(violations: &[Violation]) -> &'static str {
    violations.first().map_or("Validation failed", |v| v.message)
}

/// Source of the current date.
pub type Clock = fn() -> NaiveDate;

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Create, query, and modify users.
#[derive(Debug)]
pub struct UserService {
    store: Mutex<UserStore>,
    min_age: MinimumAge,
    clock: Clock,
}

impl UserService {
    /// Create a service with an empty store.
    #[must_use]
    pub fn new(min_age: MinimumAge) -> Self {
        Self {
            store: Mutex::new(UserStore::new()),
            min_age,
            clock: local_today,
        }
    }

    /// Replace the clock used for the past-date and age checks.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Validate `payload`, check the age rule, and append the new user.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::Validation`] if any field rule fails, then
    /// [`UserError::AgeIneligible`] if the user is too young.
    #[instrument(skip_all)]
    pub async fn create(&self, payload: UserPayload) -> Result<(), UserError> {
        let today = (self.clock)();

        let user = validate_new_user(payload, today).map_err(|violations| {
            tracing::debug!(count = violations.len(), "User rejected by validation");
            UserError::Validation(violations)
        })?;

        let admitted = user
            .birth_date
            .is_some_and(|birth_date| self.min_age.admits(birth_date, today));
        if !admitted {
            tracing::debug!(min_age = %self.min_age, "User rejected by age rule");
            return Err(UserError::AgeIneligible {
                min_age: self.min_age,
            });
        }

        tracing::info!(email = %user.email, "User created");
        self.store.lock().await.add(user);
        Ok(())
    }

    /// Returns `true` if any user has `email`, ignoring case.
    pub async fn exists(&self, email: &str) -> bool {
        self.store.lock().await.find_by_email(email).is_some()
    }

    /// Every stored user, in insertion order.
    pub async fn list(&self) -> Vec<User> {
        self.store.lock().await.all().to_vec()
    }

    /// Users born strictly between `from` and `to`.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::InvalidRange`] if `from` is after `to`.
    #[instrument(skip(self))]
    pub async fn search_by_birth_date(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<User>, UserError> {
        if from > to {
            return Err(UserError::InvalidRange { from, to });
        }

        let users = self.store.lock().await.range_by_birth_date(from, to);
        tracing::debug!(count = users.len(), "Birth date search");
        Ok(users)
    }

    /// Overwrite every field except the email of the first matching user.
    ///
    /// Field rules are not re-applied to the replacement values, and fields
    /// the replacement leaves out are cleared.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::NotFound`] if no user has `email`.
    #[instrument(skip(self, replacement))]
    pub async fn update(&self, email: &str, replacement: UserReplacement) -> Result<(), UserError> {
        let mut store = self.store.lock().await;
        let user = store
            .find_by_email_mut(email)
            .ok_or_else(|| UserError::NotFound(email.to_string()))?;

        user.replace_with(replacement);
        tracing::info!("User updated");
        Ok(())
    }

    /// Overwrite the provided fields of the first matching user.
    ///
    /// Field rules are not re-applied to the patched values.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::NotFound`] if no user has `email`.
    #[instrument(skip(self, patch))]
    pub async fn patch(&self, email: &str, patch: UserPatch) -> Result<(), UserError> {
        let mut store = self.store.lock().await;
        let user = store
            .find_by_email_mut(email)
            .ok_or_else(|| UserError::NotFound(email.to_string()))?;

        if patch.is_empty() {
            tracing::debug!("Empty patch, nothing to change");
        }
        user.apply_patch(patch);
        tracing::info!("User patched");
        Ok(())
    }

    /// Remove every user whose email matches.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::NotFound`] if nothing matched.
    #[instrument(skip(self))]
    pub async fn delete(&self, email: &str) -> Result<(), UserError> {
        if !self.store.lock().await.remove_by_email(email) {
            return Err(UserError::NotFound(email.to_string()));
        }

        tracing::info!("User deleted");
        Ok(())
    }
}
