//! Constants for the Weathercaster Engine
//!
//! This module provides centralized, documented constants used throughout
//! the forecast engine. Thresholds that define the forecasting methods live
//! here rather than inline so that every band boundary has one home.
//!
//! ## Organization
//!
//! Constants are grouped by domain:
//! - **Physics**: Solar geometry, clear-sky irradiance and moisture models
//! - **Sensors**: Plausible ranges for raw readings
//! - **Forecast**: Sager and Zambretti band boundaries
//! - **Quality**: Confidence and reliability weights
//! - **Time**: Lookback windows and refresh cadences
//!
//! ## Usage Guidelines
//!
//! 1. Always use these constants instead of magic numbers
//! 2. Document the source of every empirical coefficient
//! 3. Use descriptive names that include units

/// Physical constants for solar position and clear-sky irradiance.
pub mod physics;

/// Plausible ranges for raw sensor readings.
pub mod sensors;

/// Band boundaries for the Sager and Zambretti methods.
pub mod forecast;

/// Confidence adjustments and reliability weights.
pub mod quality;

/// Lookback windows, refresh cadences and staleness limits.
pub mod time;

// Re-export commonly used constants for convenience
pub use physics::{SOLAR_CONSTANT_W_M2, LUMINOUS_EFFICACY_LM_PER_W, SEA_LEVEL_PRESSURE_HPA};

pub use sensors::{PRESSURE_MIN_HPA, PRESSURE_MAX_HPA, CALM_WIND_SPEED};

pub use time::{TREND_LOOKBACK_HOURS, VECTOR_AVERAGE_WINDOW_MINUTES};
