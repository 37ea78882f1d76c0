//! Barometric Pressure Validation
//!
//! ## Physics Background
//!
//! Sea-level pressure rarely leaves 950-1050 hPa. The records are 870 hPa
//! (Typhoon Tip, 1979) and 1084 hPa (Siberian High, 1968). Station pressure
//! at moderate elevations sits lower, so the floor is set at 900 hPa.
//!
//! A 6 h tendency beyond ±50 hPa has never been observed outside tornado
//! cores; such a value indicates a sensor restart or a unit change.

use crate::constants::sensors::{PRESSURE_CHANGE_LIMIT_HPA, PRESSURE_MAX_HPA, PRESSURE_MIN_HPA};
use crate::errors::ValidationResult;
use crate::traits::{Validator, ValidatorConstraints};

use super::utils;

/// Validator for station pressure in hPa
#[derive(Debug, Clone)]
pub struct PressureValidator {
    min_hpa: f64,
    max_hpa: f64,
}

impl Default for PressureValidator {
    fn default() -> Self {
        Self {
            min_hpa: PRESSURE_MIN_HPA,
            max_hpa: PRESSURE_MAX_HPA,
        }
    }
}

impl PressureValidator {
    /// Create validator with custom limits
    pub fn new_with_limits(min_hpa: f64, max_hpa: f64) -> Self {
        Self { min_hpa, max_hpa }
    }
}

impl Validator for PressureValidator {
    type Value = f64;

    fn validate(&self, value: f64) -> ValidationResult<()> {
        utils::check_range(value, self.min_hpa, self.max_hpa)
    }

    fn constraints(&self) -> ValidatorConstraints {
        ValidatorConstraints {
            min_value: self.min_hpa,
            max_value: self.max_hpa,
        }
    }
}

/// Validator for the 6 h pressure change in hPa
#[derive(Debug, Clone)]
pub struct PressureChangeValidator {
    limit_hpa: f64,
}

impl Default for PressureChangeValidator {
    fn default() -> Self {
        Self { limit_hpa: PRESSURE_CHANGE_LIMIT_HPA }
    }
}

impl Validator for PressureChangeValidator {
    type Value = f64;

    fn validate(&self, value: f64) -> ValidationResult<()> {
        utils::check_range(value, -self.limit_hpa, self.limit_hpa)
    }

    fn constraints(&self) -> ValidatorConstraints {
        ValidatorConstraints {
            min_value: -self.limit_hpa,
            max_value: self.limit_hpa,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ValidationError;

    #[test]
    fn accepts_normal_pressure() {
        let v = PressureValidator::default();
        assert!(v.validate(1013.25).is_ok());
        assert!(v.validate(900.0).is_ok());
        assert!(v.validate(1100.0).is_ok());
    }

    #[test]
    fn rejects_negative_and_wrong_units() {
        let v = PressureValidator::default();
        assert!(matches!(v.validate(-5.0), Err(ValidationError::OutOfRange { .. })));
        assert!(v.validate(101325.0).is_err());
    }

    #[test]
    fn change_limits_are_symmetric() {
        let v = PressureChangeValidator::default();
        assert!(v.validate(-49.9).is_ok());
        assert!(v.validate(50.1).is_err());
        assert_eq!(v.constraints().min_value, -50.0);
    }
}
