//! Common Validation Utilities
//!
//! Pure helpers shared by all validators. They never panic: invalid input
//! is reported as a [`ValidationError`].

use crate::errors::{ValidationError, ValidationResult};
use crate::traits::Validatable;

/// Reject NaN and infinity
#[inline]
pub fn check_valid(value: f64) -> ValidationResult<()> {
    if value.is_valid() {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue)
    }
}

/// Check that a value lies within `[min, max]`
#[inline]
pub fn check_range(value: f64, min: f64, max: f64) -> ValidationResult<()> {
    check_valid(value)?;
    if value < min || value > max {
        return Err(ValidationError::OutOfRange { value, min, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_is_inclusive() {
        assert!(check_range(0.0, 0.0, 10.0).is_ok());
        assert!(check_range(10.0, 0.0, 10.0).is_ok());
        assert!(matches!(
            check_range(10.1, 0.0, 10.0),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn nan_is_invalid() {
        assert_eq!(check_range(f64::NAN, 0.0, 1.0), Err(ValidationError::InvalidValue));
        assert_eq!(check_valid(f64::INFINITY), Err(ValidationError::InvalidValue));
    }
}
