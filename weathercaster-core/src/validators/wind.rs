//! Wind Validation
//!
//! Direction is a bearing in degrees where 0 and 360 both mean north.
//! Speed is capped at 300 km/h, which catches unit mix-ups without
//! rejecting real storms.

use crate::constants::sensors::{WIND_DIRECTION_MAX_DEG, WIND_DIRECTION_MIN_DEG, WIND_SPEED_MAX};
use crate::errors::ValidationResult;
use crate::traits::{Validator, ValidatorConstraints};

use super::utils;

/// Validator for wind bearing in degrees
#[derive(Debug, Clone, Default)]
pub struct WindDirectionValidator;

impl Validator for WindDirectionValidator {
    type Value = f64;

    fn validate(&self, value: f64) -> ValidationResult<()> {
        utils::check_range(value, WIND_DIRECTION_MIN_DEG, WIND_DIRECTION_MAX_DEG)
    }

    fn constraints(&self) -> ValidatorConstraints {
        ValidatorConstraints {
            min_value: WIND_DIRECTION_MIN_DEG,
            max_value: WIND_DIRECTION_MAX_DEG,
        }
    }
}

/// Validator for wind speed
#[derive(Debug, Clone)]
pub struct WindSpeedValidator {
    max_speed: f64,
}

impl Default for WindSpeedValidator {
    fn default() -> Self {
        Self { max_speed: WIND_SPEED_MAX }
    }
}

impl Validator for WindSpeedValidator {
    type Value = f64;

    fn validate(&self, value: f64) -> ValidationResult<()> {
        utils::check_range(value, 0.0, self.max_speed)
    }

    fn constraints(&self) -> ValidatorConstraints {
        ValidatorConstraints {
            min_value: 0.0,
            max_value: self.max_speed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_accepts_full_circle() {
        let v = WindDirectionValidator;
        assert!(v.validate(0.0).is_ok());
        assert!(v.validate(360.0).is_ok());
        assert!(v.validate(-1.0).is_err());
        assert!(v.validate(361.0).is_err());
    }

    #[test]
    fn speed_rejects_negative() {
        let v = WindSpeedValidator::default();
        assert!(v.validate(0.0).is_ok());
        assert!(v.validate(-0.5).is_err());
        assert!(v.validate(301.0).is_err());
    }
}
