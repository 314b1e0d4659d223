//! User record and the payloads that create or change it.
//!
//! [`UserPayload`] is what a client submits to create a user; it only becomes
//! a [`User`] after passing [`validate_new_user`](crate::validate_new_user).
//! [`UserReplacement`] and [`UserPatch`] are applied to an existing record
//! without re-running the field rules, so a stored user may end up with a
//! blank name, a future birth date, or no birth date at all.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::types::Email;

/// A registered user.
///
/// `first_name`, `last_name` and `birth_date` are always set at creation.
/// They are optional here because a replacement may clear them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Email address, the logical identifier. Never changed after creation.
    pub email: Email,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}

impl User {
    /// Overwrite every field except the email with the values in `replacement`.
    ///
    /// Fields missing from the replacement are cleared.
    pub fn replace_with(&mut self, replacement: UserReplacement) {
        self.first_name = replacement.first_name;
        self.last_name = replacement.last_name;
        self.birth_date = replacement.birth_date;
        self.address = replacement.address;
        self.phone_number = replacement.phone_number;
    }

    /// Overwrite only the fields that `patch` carries.
    pub fn apply_patch(&mut self, patch: UserPatch) {
        if let Some(first_name) = patch.first_name {
            self.first_name = Some(first_name);
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = Some(last_name);
        }
        if let Some(birth_date) = patch.birth_date {
            self.birth_date = Some(birth_date);
        }
        if let Some(address) = patch.address {
            self.address = address;
        }
        if let Some(phone_number) = patch.phone_number {
            self.phone_number = phone_number;
        }
    }
}

/// Unvalidated input for creating a user.
///
/// Every field is optional at this stage so that a missing value is reported
/// as a rule violation rather than a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

/// Full replacement of a user's mutable fields.
///
/// Any email in the request body is ignored; the target is chosen by the
/// caller. A missing or `null` field replaces the stored value with nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserReplacement {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

/// Partial update of a user's mutable fields.
///
/// An omitted key leaves the field untouched. For the required fields an
/// explicit `null` is treated the same as an omitted key. For `address` and
/// `phoneNumber` an explicit `null` clears the stored value, which is why they
/// are double options: `None` is "not provided", `Some(None)` is "clear".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_present")]
    #[allow(clippy::option_option)] // Intentional: distinguish set-to-null from not-set
    pub address: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    #[allow(clippy::option_option)] // Intentional: distinguish set-to-null from not-set
    pub phone_number: Option<Option<String>>,
}

impl UserPatch {
    /// Returns `true` if the patch would not change anything.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.birth_date.is_none()
            && self.address.is_none()
            && self.phone_number.is_none()
    }
}

/// Wrap any value that is present in the input, including `null`, in `Some`.
///
/// Combined with `#[serde(default)]`, an absent key stays `None`.
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
