//! # Field Validation
//!
//! Checks applied to incoming values before an insert payload is built.
//! Each check returns the accepted value or a [`ValidationError`]; nothing
//! reaches the store until every check on a payload has passed.
//!
//! | Field | Rule |
//! |-------|------|
//! | `Camper.name` | non-empty |
//! | `Camper.age` | 8 ..= 18 |
//! | `Signup.time` | 0 ..= 23 (hour of day) |
//!
//! `Activity.difficulty` has no rule.

use std::ops::RangeInclusive;

use thiserror::Error;

/// Allowed camper ages.
pub const CAMPER_AGE_RANGE: RangeInclusive<i32> = 8..=18;

/// Allowed signup hours.
pub const SIGNUP_HOUR_RANGE: RangeInclusive<i32> = 0..=23;

/// A field failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("camper must have a name")]
    EmptyName,

    #[error("camper age {0} is outside 8..=18")]
    AgeOutOfRange(i32),

    #[error("signup time {0} is outside 0..=23")]
    TimeOutOfRange(i32),
}

pub fn validate_camper_name(name: &str) -> Result<&str, ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(name)
}

pub fn validate_camper_age(age: i32) -> Result<i32, ValidationError> {
    if CAMPER_AGE_RANGE.contains(&age) {
        Ok(age)
    } else {
        Err(ValidationError::AgeOutOfRange(age))
    }
}

pub fn validate_signup_time(time: i32) -> Result<i32, ValidationError> {
    if SIGNUP_HOUR_RANGE.contains(&time) {
        Ok(time)
    } else {
        Err(ValidationError::TimeOutOfRange(time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_must_not_be_empty() {
        assert_eq!(validate_camper_name(""), Err(ValidationError::EmptyName));
        assert_eq!(validate_camper_name("Alex"), Ok("Alex"));
        // Only the empty string is rejected
        assert_eq!(validate_camper_name(" "), Ok(" "));
    }

    #[test]
    fn test_age_bounds_are_inclusive() {
        assert_eq!(validate_camper_age(8), Ok(8));
        assert_eq!(validate_camper_age(18), Ok(18));
        assert_eq!(validate_camper_age(7), Err(ValidationError::AgeOutOfRange(7)));
        assert_eq!(validate_camper_age(19), Err(ValidationError::AgeOutOfRange(19)));
        assert_eq!(validate_camper_age(-3), Err(ValidationError::AgeOutOfRange(-3)));
    }

    #[test]
    fn test_time_bounds_are_inclusive() {
        assert_eq!(validate_signup_time(0), Ok(0));
        assert_eq!(validate_signup_time(23), Ok(23));
        assert_eq!(validate_signup_time(24), Err(ValidationError::TimeOutOfRange(24)));
        assert_eq!(validate_signup_time(-1), Err(ValidationError::TimeOutOfRange(-1)));
    }
}
