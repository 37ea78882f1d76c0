//! Lookback Windows and Refresh Cadences

/// Hours between the current reading and the trend reference reading.
pub const TREND_LOOKBACK_HOURS: i64 = 6;

/// Window (minutes) of the wind vector average.
pub const VECTOR_AVERAGE_WINDOW_MINUTES: i64 = 10;

/// Default engine cycle interval in minutes.
pub const DEFAULT_UPDATE_INTERVAL_MINUTES: u32 = 10;

/// Default external source refresh interval in minutes.
pub const DEFAULT_EXTERNAL_REFRESH_MINUTES: u32 = 30;

/// Default age (minutes) after which an external snapshot is stale.
pub const DEFAULT_EXTERNAL_STALE_MINUTES: u32 = 120;

/// Number of hourly slots the engine always produces.
pub const HOURLY_SLOTS: usize = 48;

/// Number of daily slots the engine produces.
pub const DAILY_SLOTS: usize = 7;

/// Local solar hour of the diurnal temperature peak.
pub const DIURNAL_PEAK_HOUR: f64 = 14.0;

/// Half-range of the synthetic diurnal temperature swing (°C).
pub const DIURNAL_AMPLITUDE_C: f64 = 3.0;
