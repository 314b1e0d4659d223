//! Minimum eligibility age.

use core::fmt;

use chrono::{Months, NaiveDate};

/// Errors that can occur when constructing a [`MinimumAge`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MinimumAgeError {
    /// The age must be a positive number of years.
    #[error("minimum age must be a positive number of years")]
    Zero,
    /// The input is not a non-negative integer.
    #[error("minimum age must be a whole number of years: {0}")]
    NotANumber(String),
}

/// The minimum age, in whole years, a user must have reached to register.
///
/// ```
/// use chrono::NaiveDate;
/// use user_registry_core::MinimumAge;
///
/// let min_age = MinimumAge::new(18).unwrap();
/// let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
///
/// assert!(min_age.admits(NaiveDate::from_ymd_opt(2006, 6, 15).unwrap(), today));
/// assert!(!min_age.admits(NaiveDate::from_ymd_opt(2006, 6, 16).unwrap(), today));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MinimumAge(u32);

impl MinimumAge {
    /// The age used when nothing is configured.
    pub const DEFAULT: Self = Self(18);

    /// Create a minimum age of `years`.
    ///
    /// # Errors
    ///
    /// Returns [`MinimumAgeError::Zero`] if `years` is zero.
    pub const fn new(years: u32) -> Result<Self, MinimumAgeError> {
        if years == 0 {
            return Err(MinimumAgeError::Zero);
        }
        Ok(Self(years))
    }

    /// Get the number of years.
    #[must_use]
    pub const fn years(self) -> u32 {
        self.0
    }

    /// The latest birth date that is still old enough on `today`.
    ///
    /// A Feb 29 anniversary falls back to Feb 28 in non-leap years. Returns
    /// `None` when the subtraction leaves the representable date range.
    #[must_use]
    pub fn latest_eligible_birth_date(self, today: NaiveDate) -> Option<NaiveDate> {
        let months = self.years().checked_mul(12)?;
        today.checked_sub_months(Months::new(months))
    }

    /// Returns `true` if someone born on `birth_date` is old enough on `today`.
    #[must_use]
    pub fn admits(self, birth_date: NaiveDate, today: NaiveDate) -> bool {
        self.latest_eligible_birth_date(today)
            .is_some_and(|latest| birth_date <= latest)
    }
}

impl Default for MinimumAge {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for MinimumAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for MinimumAge {
    type Err = MinimumAgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let years = s
            .trim()
            .parse::<u32>()
            .map_err(|_| MinimumAgeError::NotANumber(s.to_string()))?;
        Self::new(years)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_rejects_zero() {
        assert_eq!(MinimumAge::new(0), Err(MinimumAgeError::Zero));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("21".parse::<MinimumAge>().unwrap().years(), 21);
        assert_eq!(" 18 ".parse::<MinimumAge>().unwrap().years(), 18);
        assert!(matches!(
            "-1".parse::<MinimumAge>(),
            Err(MinimumAgeError::NotANumber(_))
        ));
        assert!(matches!(
            "eighteen".parse::<MinimumAge>(),
            Err(MinimumAgeError::NotANumber(_))
        ));
        assert_eq!("0".parse::<MinimumAge>(), Err(MinimumAgeError::Zero));
    }

    #[test]
    fn test_default_is_eighteen() {
        assert_eq!(MinimumAge::default().years(), 18);
    }

    #[test]
    fn test_birthday_today_is_eligible() {
        let min_age = MinimumAge::new(18).unwrap();
        let today = date(2024, 3, 10);
        assert!(min_age.admits(date(2006, 3, 10), today));
        assert!(min_age.admits(date(1990, 1, 1), today));
    }

    #[test]
    fn test_one_day_short_is_ineligible() {
        let min_age = MinimumAge::new(18).unwrap();
        let today = date(2024, 3, 10);
        assert!(!min_age.admits(date(2006, 3, 11), today));
    }

    #[test]
    fn test_leap_day_anniversary_clamps() {
        let min_age = MinimumAge::new(1).unwrap();
        let today = date(2025, 2, 28);
        assert_eq!(
            min_age.latest_eligible_birth_date(date(2025, 2, 28)),
            Some(date(2024, 2, 28))
        );
        assert!(!min_age.admits(date(2024, 2, 29), today));

        let today = date(2024, 2, 29);
        assert_eq!(
            min_age.latest_eligible_birth_date(today),
            Some(date(2023, 2, 28))
        );
    }

    #[test]
    fn test_out_of_range_admits_nobody() {
        let min_age = MinimumAge::new(u32::MAX).unwrap();
        assert!(!min_age.admits(date(1900, 1, 1), date(2024, 1, 1)));
    }
}
