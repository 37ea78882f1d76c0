//! Per-Field Plausibility Validators
//!
//! ## Overview
//!
//! Every raw reading passes a validator before it becomes part of an
//! [`ObservationSet`](crate::observation::ObservationSet). A reading that
//! fails is not an error for the cycle: the normalizer marks the field
//! `unavailable` and the forecast degrades gracefully.
//!
//! ## Validation Layers
//!
//! ### 1. Numeric sanity
//! NaN and infinity are rejected before anything else.
//!
//! ### 2. Range validation
//! Limits are wide enough for any real weather and narrow enough to catch
//! unit mix-ups (a pressure sensor reporting inHg, a wind sensor in m/s
//! mislabelled as degrees):
//!
//! ```text
//! Field               Range
//! ------------------------------------
//! Pressure            900 .. 1100 hPa
//! Pressure change     -50 .. 50 hPa/6h
//! Wind direction        0 .. 360 °
//! Wind speed            0 .. 300
//! Cloud cover           0 .. 100 %
//! Humidity              0 .. 100 %
//! Temperature         -80 .. 60 °C
//! ```
//!
//! ### 3. Cross-field validation
//! Dew point cannot meaningfully exceed air temperature. When it does, the
//! dew point is dropped and the moisture model falls back to humidity.
//!
//! ## Usage Example
//!
//! ```rust
//! use weathercaster_core::validators::PressureValidator;
//! use weathercaster_core::traits::Validator;
//!
//! let validator = PressureValidator::default();
//! assert!(validator.validate(1013.2).is_ok());
//! assert!(validator.validate(29.92).is_err()); // inHg reported as hPa
//! ```

mod moisture;
mod pressure;
mod sky;
mod utils;
mod wind;

pub use moisture::{DewPointValidator, HumidityValidator, TemperatureValidator};
pub use pressure::{PressureChangeValidator, PressureValidator};
pub use sky::{CloudCoverValidator, IrradianceValidator};
pub use wind::{WindDirectionValidator, WindSpeedValidator};
