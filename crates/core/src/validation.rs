//! Field-level rules for new users.
//!
//! | Field         | Rule                               | Message                          |
//! |---------------|------------------------------------|----------------------------------|
//! | `email`       | non-blank                          | "Email is required"              |
//! | `email`       | valid syntax (when non-empty)      | "Invalid email format"           |
//! | `firstName`   | non-blank                          | "First name is required"         |
//! | `lastName`    | non-blank                          | "Last name is required"          |
//! | `birthDate`   | present                            | "Birth date is required"         |
//! | `birthDate`   | strictly before today              | "Birth date must be in the past" |
//! | `phoneNumber` | absent or `^\+?[0-9]{0,15}$`       | "Invalid phone number format"    |
//!
//! All rules are evaluated and every violation is reported, in the order above.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;

use crate::types::Email;
use crate::user::{User, UserPayload};

static PHONE_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{0,15}$").expect("Invalid regex"));

/// A single failed rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Wire name of the offending field (e.g. `firstName`).
    pub field: &'static str,
    /// Human-readable message.
    pub message: &'static str,
}

impl Violation {
    pub const EMAIL_REQUIRED: Self = Self::new("email", "Email is required");
    pub const EMAIL_INVALID: Self = Self::new("email", "Invalid email format");
    pub const FIRST_NAME_REQUIRED: Self = Self::new("firstName", "First name is required");
    pub const LAST_NAME_REQUIRED: Self = Self::new("lastName", "Last name is required");
    pub const BIRTH_DATE_REQUIRED: Self = Self::new("birthDate", "Birth date is required");
    pub const BIRTH_DATE_NOT_PAST: Self =
        Self::new("birthDate", "Birth date must be in the past");
    pub const PHONE_NUMBER_INVALID: Self =
        Self::new("phoneNumber", "Invalid phone number format");

    const fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Returns `true` if `phone_number` matches `^\+?[0-9]{0,15}$`.
#[must_use]
pub fn is_valid_phone_number(phone_number: &str) -> bool {
    PHONE_NUMBER_RE.is_match(phone_number)
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|s| s.trim().is_empty())
}

/// Check `payload` against every field rule, using `today` for the
/// past-date check.
///
/// # Errors
///
/// Returns all violations, in rule order, if any rule fails.
pub fn validate_new_user(payload: UserPayload, today: NaiveDate) -> Result<User, Vec<Violation>> {
    let mut violations = Vec::new();

    if is_blank(payload.email.as_deref()) {
        violations.push(Violation::EMAIL_REQUIRED);
    }
    // An empty email is reported only as missing, not as malformed.
    let email = match payload.email.as_deref() {
        Some("") | None => None,
        Some(raw) => match Email::parse(raw) {
            Ok(email) => Some(email),
            Err(_) => {
                violations.push(Violation::EMAIL_INVALID);
                None
            }
        },
    };

    if is_blank(payload.first_name.as_deref()) {
        violations.push(Violation::FIRST_NAME_REQUIRED);
    }
    if is_blank(payload.last_name.as_deref()) {
        violations.push(Violation::LAST_NAME_REQUIRED);
    }

    match payload.birth_date {
        None => violations.push(Violation::BIRTH_DATE_REQUIRED),
        Some(date) if date >= today => violations.push(Violation::BIRTH_DATE_NOT_PAST),
        Some(_) => {}
    }

    if payload
        .phone_number
        .as_deref()
        .is_some_and(|phone| !is_valid_phone_number(phone))
    {
        violations.push(Violation::PHONE_NUMBER_INVALID);
    }

    match (email, payload.first_name, payload.last_name, payload.birth_date) {
        (Some(email), Some(first_name), Some(last_name), Some(birth_date))
            if violations.is_empty() =>
        {
            Ok(User {
                email,
                first_name: Some(first_name),
                last_name: Some(last_name),
                birth_date: Some(birth_date),
                address: payload.address,
                phone_number: payload.phone_number,
            })
        }
        _ => Err(violations),
    }
}
