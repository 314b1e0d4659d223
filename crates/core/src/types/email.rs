//! Email address type.

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Dot-separated atoms of the local part (before the @).
static LOCAL_PART_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~\x{80}-\x{10FFFF}-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~\x{80}-\x{10FFFF}-]+)*$",
    )
    .expect("Invalid regex")
});

/// Dot-separated host labels, or a bracketed IPv4 literal.
static DOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:[A-Za-z0-9\x{80}-\x{10FFFF}]+(?:-+[A-Za-z0-9\x{80}-\x{10FFFF}]+)*(?:\.[A-Za-z0-9\x{80}-\x{10FFFF}]+(?:-+[A-Za-z0-9\x{80}-\x{10FFFF}]+)*)*|\[[0-9]{1,3}(?:\.[0-9]{1,3}){3}\])$",
    )
    .expect("Invalid regex")
});

/// Errors that can occur when parsing an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// The input string is empty.
    #[error("email cannot be empty")]
    Empty,
    /// The input does not contain an @ symbol.
    #[error("email must contain an @ symbol")]
    MissingAtSymbol,
    /// The local part (before @) is longer than allowed.
    #[error("email local part must be at most {max} characters")]
    LocalPartTooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The domain part (after @) is longer than allowed.
    #[error("email domain must be at most {max} characters")]
    DomainTooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The local part contains characters outside the allowed set.
    #[error("email local part is malformed")]
    InvalidLocalPart,
    /// The domain is neither a host name nor an IPv4 literal.
    #[error("email domain is malformed")]
    InvalidDomain,
}

/// An email address.
///
/// The address is the logical identifier of a user. It is stored exactly as
/// submitted; comparisons through [`Email::matches`] ignore case.
///
/// ## Constraints
///
/// - Must contain an @ symbol (the last one separates local part and domain)
/// - Local part: 1-64 characters, dot-separated atoms
/// - Domain: 1-255 characters, host labels or a bracketed IPv4 literal
///
/// ## Examples
///
/// ```
/// use user_registry_core::Email;
///
/// assert!(Email::parse("user@example.com").is_ok());
/// assert!(Email::parse("user.name+tag@domain.co.uk").is_ok());
/// assert!(Email::parse("admin@localhost").is_ok());
///
/// assert!(Email::parse("").is_err());
/// assert!(Email::parse("invalid_email").is_err());
/// assert!(Email::parse("user@").is_err());
/// assert!(Email::parse("a..b@example.com").is_err());
/// ```
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Maximum length of the local part (RFC 5321).
    pub const MAX_LOCAL_PART_LENGTH: usize = 64;

    /// Maximum length of the domain part.
    pub const MAX_DOMAIN_LENGTH: usize = 255;

    /// Parse an `Email` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, has no @ symbol, or if either
    /// side of the @ is too long or malformed.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        if s.is_empty() {
            return Err(EmailError::Empty);
        }

        let (local, domain) = s.rsplit_once('@').ok_or(EmailError::MissingAtSymbol)?;

        if local.chars().count() > Self::MAX_LOCAL_PART_LENGTH {
            return Err(EmailError::LocalPartTooLong {
                max: Self::MAX_LOCAL_PART_LENGTH,
            });
        }

        if domain.chars().count() > Self::MAX_DOMAIN_LENGTH {
            return Err(EmailError::DomainTooLong {
                max: Self::MAX_DOMAIN_LENGTH,
            });
        }

        if !LOCAL_PART_RE.is_match(local) {
            return Err(EmailError::InvalidLocalPart);
        }

        if !DOMAIN_RE.is_match(domain) {
            return Err(EmailError::InvalidDomain);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns `true` if `other` names the same address, ignoring case.
    #[must_use]
    pub fn matches(&self, other: &str) -> bool {
        self.0
            .chars()
            .flat_map(char::to_lowercase)
            .eq(other.chars().flat_map(char::to_lowercase))
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
