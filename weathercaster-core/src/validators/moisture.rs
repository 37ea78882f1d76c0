//! Temperature and Moisture Validation
//!
//! ## Dew Point Consistency
//!
//! The dew point is the temperature at which the air would saturate, so it
//! can never exceed the air temperature. Cheap sensors lag each other by a
//! few minutes, which in fog can push the reported dew point slightly
//! above the air temperature; a 0.5 °C tolerance absorbs that.

use crate::constants::sensors::{
    DEW_POINT_TOLERANCE_C, HUMIDITY_MAX_PCT, TEMPERATURE_MAX_C, TEMPERATURE_MIN_C,
};
use crate::errors::{ValidationError, ValidationResult};
use crate::traits::{CrossValidator, Validator, ValidatorConstraints};

use super::utils;

/// Validator for outdoor air temperature in °C
#[derive(Debug, Clone)]
pub struct TemperatureValidator {
    min_c: f64,
    max_c: f64,
}

impl Default for TemperatureValidator {
    fn default() -> Self {
        Self {
            min_c: TEMPERATURE_MIN_C,
            max_c: TEMPERATURE_MAX_C,
        }
    }
}

impl Validator for TemperatureValidator {
    type Value = f64;

    fn validate(&self, value: f64) -> ValidationResult<()> {
        utils::check_range(value, self.min_c, self.max_c)
    }

    fn constraints(&self) -> ValidatorConstraints {
        ValidatorConstraints {
            min_value: self.min_c,
            max_value: self.max_c,
        }
    }
}

/// Validator for relative humidity in percent
#[derive(Debug, Clone, Default)]
pub struct HumidityValidator;

impl Validator for HumidityValidator {
    type Value = f64;

    fn validate(&self, value: f64) -> ValidationResult<()> {
        utils::check_range(value, 0.0, HUMIDITY_MAX_PCT)
    }

    fn constraints(&self) -> ValidatorConstraints {
        ValidatorConstraints {
            min_value: 0.0,
            max_value: HUMIDITY_MAX_PCT,
        }
    }
}

/// Validator for dew point, alone and against air temperature
#[derive(Debug, Clone)]
pub struct DewPointValidator {
    tolerance_c: f64,
}

impl Default for DewPointValidator {
    fn default() -> Self {
        Self { tolerance_c: DEW_POINT_TOLERANCE_C }
    }
}

impl Validator for DewPointValidator {
    type Value = f64;

    fn validate(&self, value: f64) -> ValidationResult<()> {
        utils::check_range(value, TEMPERATURE_MIN_C, TEMPERATURE_MAX_C)
    }

    fn constraints(&self) -> ValidatorConstraints {
        ValidatorConstraints {
            min_value: TEMPERATURE_MIN_C,
            max_value: TEMPERATURE_MAX_C,
        }
    }
}

impl CrossValidator for DewPointValidator {
    /// `(dew_point, air_temperature)` in °C
    type Input = (f64, f64);

    fn cross_validate(&self, (dew_point, temperature): (f64, f64)) -> ValidationResult<()> {
        if dew_point > temperature + self.tolerance_c {
            return Err(ValidationError::CrossValidationFailed {
                reason: "Dew point exceeds air temperature",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn humidity_bounds() {
        let v = HumidityValidator;
        assert!(v.validate(0.0).is_ok());
        assert!(v.validate(100.0).is_ok());
        assert!(v.validate(100.5).is_err());
    }

    #[test]
    fn dew_point_above_temperature_fails() {
        let v = DewPointValidator::default();
        assert!(v.cross_validate((12.0, 15.0)).is_ok());
        assert!(v.cross_validate((15.4, 15.0)).is_ok());
        assert!(matches!(
            v.cross_validate((17.0, 15.0)),
            Err(ValidationError::CrossValidationFailed { .. })
        ));
    }

    #[test]
    fn temperature_range() {
        let v = TemperatureValidator::default();
        assert!(v.validate(-40.0).is_ok());
        assert!(v.validate(75.0).is_err());
    }
}
