//! Plausible Ranges for Raw Sensor Readings
//!
//! A reading outside these ranges is treated as `unavailable` for the cycle.
//! The ranges are deliberately wide: they reject broken sensors and unit
//! mix-ups, not unusual weather.

/// Minimum accepted station pressure in hPa.
///
/// Below the lowest sea-level pressure ever recorded (870 hPa) with margin
/// for moderate station elevation.
pub const PRESSURE_MIN_HPA: f64 = 900.0;

/// Maximum accepted station pressure in hPa.
///
/// Highest recorded: 1084 hPa (Agata, Siberia, 1968).
pub const PRESSURE_MAX_HPA: f64 = 1100.0;

/// Maximum magnitude of a 6 h pressure change in hPa.
pub const PRESSURE_CHANGE_LIMIT_HPA: f64 = 50.0;

/// Wind direction range in degrees.
pub const WIND_DIRECTION_MIN_DEG: f64 = 0.0;
/// See [`WIND_DIRECTION_MIN_DEG`]. 360 is accepted and folded to 0.
pub const WIND_DIRECTION_MAX_DEG: f64 = 360.0;

/// Maximum accepted wind speed (km/h).
pub const WIND_SPEED_MAX: f64 = 300.0;

/// Wind speed at or below which the air counts as calm.
pub const CALM_WIND_SPEED: f64 = 1.0;

/// Cloud cover range in percent.
pub const CLOUD_COVER_MAX_PCT: f64 = 100.0;

/// Relative humidity range in percent.
pub const HUMIDITY_MAX_PCT: f64 = 100.0;

/// Minimum accepted air temperature in °C.
pub const TEMPERATURE_MIN_C: f64 = -80.0;

/// Maximum accepted air temperature in °C.
pub const TEMPERATURE_MAX_C: f64 = 60.0;

/// Tolerance (°C) by which dew point may exceed air temperature.
///
/// Covers sensor lag during fog and the rounding of cheap sensors.
pub const DEW_POINT_TOLERANCE_C: f64 = 0.5;

/// Rain rate (mm/h) at or above which rain counts as pouring.
pub const RAIN_POURING_MM_H: f64 = 7.5;

/// Rain rate (mm/h) at or above which it counts as raining.
pub const RAIN_RAINY_MM_H: f64 = 0.1;
