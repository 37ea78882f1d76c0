//! Band Boundaries for the Sager and Zambretti Methods
//!
//! ## Sager
//!
//! The Sager Weathercaster (1942) reduces the sky to four observations and
//! reads the forecast from a printed dial. The bands below reproduce the
//! dial's scales in hPa and percent.
//!
//! ## Zambretti
//!
//! The Negretti & Zambra "Zambretti" forecaster (1915) maps sea-level
//! pressure and its 3 h tendency onto 26 lettered forecasts. The linear
//! coefficients are the commonly published digital approximation of the
//! original slide rule.

// ===== SAGER PRESSURE LEVELS =====

/// Lower bounds (inclusive, hPa) of pressure levels 1 to 7. Anything lower is level 8.
pub const SAGER_PRESSURE_LEVELS_HPA: [f64; 7] = [
    1029.46, // 1: very high
    1019.30, // 2: high
    1012.53, // 3: above normal
    1005.76, // 4: normal
    999.00,  // 5: below normal
    988.80,  // 6: low
    975.28,  // 7: very low
];

// ===== SAGER PRESSURE TREND (6 h delta) =====

/// Change (hPa/6h) above which pressure is rising rapidly.
pub const TREND_RISING_RAPIDLY_HPA: f64 = 2.8;

/// Change (hPa/6h) above which pressure is rising.
pub const TREND_RISING_HPA: f64 = 1.36;

/// Change (hPa/6h) at or above which pressure is steady.
pub const TREND_STEADY_MIN_HPA: f64 = -1.36;

/// Change (hPa/6h) at or above which pressure is falling (below: falling rapidly).
pub const TREND_FALLING_MIN_HPA: f64 = -2.8;

// ===== SAGER WIND TREND =====

/// Angular shift (degrees) below which the wind is steady.
pub const WIND_STEADY_BAND_DEG: f64 = 10.0;

// ===== SAGER CLOUD LEVELS =====

/// Cloud cover (%) above which the sky is overcast.
pub const CLOUD_OVERCAST_PCT: f64 = 80.0;

/// Cloud cover (%) above which the sky is mostly cloudy.
pub const CLOUD_MOSTLY_CLOUDY_PCT: f64 = 50.0;

/// Cloud cover (%) above which the sky is partly cloudy.
pub const CLOUD_PARTLY_CLOUDY_PCT: f64 = 20.0;

// ===== SAGER CONFIDENCE =====

/// Confidence of an exact table hit.
pub const SAGER_HIT_CONFIDENCE: u8 = 95;

/// Confidence of the default entry used on a table miss.
pub const SAGER_MISS_CONFIDENCE: u8 = 60;

/// Confidence lost for each trend that defaulted for lack of history.
pub const SAGER_DEFAULTED_TREND_PENALTY: u8 = 10;

/// Temperature (°C) below which showers become flurries.
pub const FLURRY_TEMPERATURE_C: f64 = 2.0;

// ===== LATITUDE ZONES =====

/// Latitude of the polar circles in degrees.
pub const POLAR_CIRCLE_DEG: f64 = 66.56;

/// Latitude of the tropics in degrees.
pub const TROPIC_DEG: f64 = 23.44;

// ===== ZAMBRETTI =====

/// 3 h pressure change (hPa) beyond which the tendency is rising or falling.
pub const ZAMBRETTI_TREND_THRESHOLD_HPA: f64 = 1.6;

/// Falling: `Z = 127 - 0.12 · P`.
pub const ZAMBRETTI_FALLING_CONSTANT: f64 = 127.0;
/// See [`ZAMBRETTI_FALLING_CONSTANT`].
pub const ZAMBRETTI_FALLING_FACTOR: f64 = 0.12;

/// Steady: `Z = 144 - 0.13 · P`.
pub const ZAMBRETTI_STEADY_CONSTANT: f64 = 144.0;
/// See [`ZAMBRETTI_STEADY_CONSTANT`].
pub const ZAMBRETTI_STEADY_FACTOR: f64 = 0.13;

/// Rising: `Z = 185 - 0.16 · P`.
pub const ZAMBRETTI_RISING_CONSTANT: f64 = 185.0;
/// See [`ZAMBRETTI_RISING_CONSTANT`].
pub const ZAMBRETTI_RISING_FACTOR: f64 = 0.16;

// ===== BLENDING =====

/// Daily high shift (°C) for a "warmer" or "cooler" forecast letter.
pub const DAILY_TENDENCY_STEP_C: f64 = 3.0;

/// Synthetic daily range: low = high - 5 °C.
pub const SYNTHETIC_DAILY_RANGE_C: f64 = 5.0;

/// Share of the gap to an absolute wind target closed within 24 h.
pub const WIND_TARGET_MAX_FRACTION: f64 = 0.7;

/// Hours over which cloud and humidity ease toward the day 1 target.
pub const SKY_TRANSITION_HOURS: f64 = 12.0;
