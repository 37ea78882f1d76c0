//! Cloud Sensor Validation
//!
//! Percent cover must lie in `[0, 100]`. Light sensors only need to be
//! non-negative and below what the sun can deliver at the surface:
//! roughly 1400 W/m² at extreme altitude, or about 160 klx.

use crate::constants::sensors::CLOUD_COVER_MAX_PCT;
use crate::errors::ValidationResult;
use crate::observation::CloudInput;
use crate::traits::{Validator, ValidatorConstraints};

use super::utils;

/// Upper bound for irradiance sensors, W/m²
const IRRADIANCE_MAX_W_M2: f64 = 1500.0;

/// Upper bound for illuminance sensors, lux
const ILLUMINANCE_MAX_LUX: f64 = 200_000.0;

/// Validator for percent cloud cover
#[derive(Debug, Clone, Default)]
pub struct CloudCoverValidator;

impl Validator for CloudCoverValidator {
    type Value = f64;

    fn validate(&self, value: f64) -> ValidationResult<()> {
        utils::check_range(value, 0.0, CLOUD_COVER_MAX_PCT)
    }

    fn constraints(&self) -> ValidatorConstraints {
        ValidatorConstraints {
            min_value: 0.0,
            max_value: CLOUD_COVER_MAX_PCT,
        }
    }
}

/// Validator for any [`CloudInput`], dispatching on its unit
#[derive(Debug, Clone, Default)]
pub struct IrradianceValidator;

impl Validator for IrradianceValidator {
    type Value = CloudInput;

    fn validate(&self, value: CloudInput) -> ValidationResult<()> {
        match value {
            CloudInput::Percent(pct) => CloudCoverValidator.validate(pct),
            CloudInput::Lux(lux) => utils::check_range(lux, 0.0, ILLUMINANCE_MAX_LUX),
            CloudInput::Irradiance(w) => utils::check_range(w, 0.0, IRRADIANCE_MAX_W_M2),
        }
    }

    fn constraints(&self) -> ValidatorConstraints {
        ValidatorConstraints {
            min_value: 0.0,
            max_value: ILLUMINANCE_MAX_LUX,
        }
    }
}
