//! In-memory user storage.
//!
//! The store keeps users in insertion order and never enforces email
//! uniqueness. It performs no validation and no locking of its own; the
//! [`UserService`](crate::services::UserService) owns it behind a mutex and
//! validates before inserting.

use chrono::NaiveDate;

use user_registry_core::User;

/// Ordered collection of users, looked up by case-insensitive email.
#[derive(Debug, Default)]
pub struct UserStore {
    users: Vec<User>,
}

impl UserStore {
    /// Create an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self { users: Vec::new() }
    }

    /// Append a user to the end of the store.
    pub fn add(&mut self, user: User) {
        self.users.push(user);
    }

    /// All users, in insertion order.
    #[must_use]
    pub fn all(&self) -> &[User] {
        &self.users
    }

    /// First user whose email matches, ignoring case.
    #[must_use]
    pub fn find_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|user| user.email.matches(email))
    }

    /// Mutable access to the first user whose email matches, ignoring case.
    pub fn find_by_email_mut(&mut self, email: &str) -> Option<&mut User> {
        self.users.iter_mut().find(|user| user.email.matches(email))
    }

    /// Remove every user whose email matches, ignoring case.
    ///
    /// Returns `true` if at least one user was removed.
    pub fn remove_by_email(&mut self, email: &str) -> bool {
        let before = self.users.len();
        self.users.retain(|user| !user.email.matches(email));
        self.users.len() != before
    }

    /// Users born strictly between `from` and `to`, in insertion order.
    ///
    /// Users without a birth date never match.
    #[must_use]
    pub fn range_by_birth_date(&self, from: NaiveDate, to: NaiveDate) -> Vec<User> {
        self.users
            .iter()
            .filter(|user| {
                user.birth_date
                    .is_some_and(|birth_date| birth_date > from && birth_date < to)
            })
            .cloned()
            .collect()
    }
}
