//! Error Types for the Forecast Engine
//!
//! ## Design Philosophy
//!
//! Almost nothing in a forecast cycle is allowed to fail. Sensors drop out,
//! history gaps appear and external sources time out, and the engine is
//! expected to keep producing the best forecast it can from what is left.
//! Errors therefore come in two tiers:
//!
//! 1. **Field-level** (`ValidationError`): a single raw reading is rejected.
//!    The normalizer turns these into an `unavailable` input status and moves
//!    on. They never escape a cycle.
//!
//! 2. **Cycle-level** (`ForecastError`): the engine cannot produce a forecast
//!    at all, either because a required input (pressure, wind direction) is
//!    missing or because the configuration is unusable.
//!
//! Both enums are `Copy` and carry only `&'static str` context so they can be
//! stored in the retained engine state and logged cheaply.
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use weathercaster_core::{ForecastError, ForecastState};
//!
//! fn describe(state: &ForecastState) -> &'static str {
//!     match state {
//!         ForecastState::Fresh(_) => "forecast computed this cycle",
//!         ForecastState::Retained { .. } => "serving previous forecast",
//!         ForecastState::InsufficientData(ForecastError::InsufficientData { .. }) => {
//!             "waiting for sensors"
//!         }
//!         ForecastState::InsufficientData(_) => "not computed",
//!     }
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for per-field validation
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Result type for engine operations
pub type ForecastResultOf<T> = Result<T, ForecastError>;

/// Rejection of a single raw reading
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ValidationError {
    /// Value outside the plausible range for the field
    #[error("Value {value} outside range [{min}, {max}]")]
    OutOfRange {
        /// The reading that failed validation
        value: f64,
        /// Minimum accepted value
        min: f64,
        /// Maximum accepted value
        max: f64,
    },

    /// Two readings contradict each other (e.g. dew point above air temperature)
    #[error("Cross-validation failed: {reason}")]
    CrossValidationFailed {
        reason: &'static str,
    },

    /// Value makes no physical sense (NaN, infinity, unparsable text)
    #[error("Invalid value: not a valid number")]
    InvalidValue,
}

/// Failure of a whole forecast cycle or of engine construction
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ForecastError {
    /// A required input is missing or invalid, no forecast can be computed
    #[error("Insufficient data: {missing} unavailable")]
    InsufficientData {
        /// Name of the required input that is missing
        missing: &'static str,
    },

    /// Configuration rejected at construction time
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        reason: &'static str,
    },

    /// Configuration could not be parsed
    #[error("Configuration could not be parsed")]
    MalformedConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = ValidationError::OutOfRange { value: 1200.0, min: 900.0, max: 1100.0 };
        assert_eq!(err.to_string(), "Value 1200 outside range [900, 1100]");

        let err = ForecastError::InsufficientData { missing: "pressure" };
        assert_eq!(err.to_string(), "Insufficient data: pressure unavailable");
    }

    #[test]
    fn errors_are_copy() {
        let err = ForecastError::InvalidConfig { reason: "latitude" };
        let copy = err;
        assert_eq!(err, copy);
    }
}
