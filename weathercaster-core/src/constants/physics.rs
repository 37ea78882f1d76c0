//! Physical Constants for Solar Geometry and Clear-Sky Irradiance
//!
//! Values are taken from the published models they belong to. Where a
//! model has several published coefficient sets, the one used by the
//! Ineichen-Perez (2002) clear-sky formulation is chosen.

// ===== ATMOSPHERE =====

/// Standard sea-level atmospheric pressure in hPa.
///
/// Source: International Standard Atmosphere (ISO 2533:1975)
///
/// Used to scale relative air mass by live station pressure.
pub const SEA_LEVEL_PRESSURE_HPA: f64 = 1013.25;

/// Offset between Celsius and Kelvin.
pub const CELSIUS_TO_KELVIN: f64 = 273.15;

// ===== SOLAR GEOMETRY =====

/// Axial tilt of the Earth in degrees.
///
/// Amplitude of the declination sinusoid and the latitude of the tropics.
pub const EARTH_AXIAL_TILT_DEG: f64 = 23.44;

/// Day-of-year offset in Cooper's declination formula.
///
/// Source: Cooper (1969), `δ = 23.44 · sin(2π · (284 + n) / 365)`
pub const DECLINATION_DAY_OFFSET: f64 = 284.0;

/// Amplitude of the Earth-Sun distance correction.
///
/// ```text
/// E0 = 1 + 0.033 · cos(2π · n / 365)
/// ```
pub const ECCENTRICITY_AMPLITUDE: f64 = 0.033;

/// Days per year used by the annual sinusoids.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Sun elevation (degrees) at or below which irradiance is not usable.
///
/// Below 5° the air mass exceeds ~10 and sensor cosine error dominates,
/// so the physical model is bypassed.
pub const TWILIGHT_ELEVATION_DEG: f64 = 5.0;

// ===== CLEAR-SKY IRRADIANCE =====

/// Solar constant in W/m².
///
/// Source: Kopp & Lean (2011), total solar irradiance at 1 AU
pub const SOLAR_CONSTANT_W_M2: f64 = 1361.0;

/// Luminous efficacy of daylight in lumens per watt.
///
/// Converts a W/m² baseline to lux for illuminance sensors.
pub const LUMINOUS_EFFICACY_LM_PER_W: f64 = 120.0;

/// Kasten-Young (1989) air-mass coefficients.
///
/// ```text
/// AM = 1 / (sin h + a · (h + b)^-c)
/// ```
pub const KASTEN_YOUNG_A: f64 = 0.50572;
/// See [`KASTEN_YOUNG_A`].
pub const KASTEN_YOUNG_B: f64 = 6.07995;
/// See [`KASTEN_YOUNG_A`].
pub const KASTEN_YOUNG_C: f64 = 1.6364;

/// Scale height (m) of the first Ineichen altitude factor `fh1 = exp(-z/8000)`.
pub const INEICHEN_FH1_SCALE_M: f64 = 8000.0;

/// Scale height (m) of the second Ineichen altitude factor `fh2 = exp(-z/1250)`.
pub const INEICHEN_FH2_SCALE_M: f64 = 1250.0;

/// Ineichen `cg1 = 5.09e-5 · z + 0.868`.
pub const INEICHEN_CG1_SLOPE: f64 = 5.09e-5;
/// See [`INEICHEN_CG1_SLOPE`].
pub const INEICHEN_CG1_BASE: f64 = 0.868;

/// Ineichen `cg2 = 3.92e-5 · z + 0.0387`.
pub const INEICHEN_CG2_SLOPE: f64 = 3.92e-5;
/// See [`INEICHEN_CG2_SLOPE`].
pub const INEICHEN_CG2_BASE: f64 = 0.0387;

/// Linke turbidity used when no moisture data is available.
///
/// Typical of a rural mid-latitude site.
pub const DEFAULT_LINKE_TURBIDITY: f64 = 3.0;

/// Lower bound for the derived Linke turbidity.
pub const LINKE_TURBIDITY_MIN: f64 = 2.0;

/// Upper bound for the derived Linke turbidity.
pub const LINKE_TURBIDITY_MAX: f64 = 7.0;

/// Growth of Linke turbidity per cm of precipitable water.
///
/// Source: Kasten (1980) approximation `TL ≈ 2 + 0.5 · w`
pub const LINKE_PER_CM_WATER: f64 = 0.5;

/// Precipitable water coefficient, `w = 49.3 · e / T` (cm, e in hPa, T in K).
///
/// Source: Leckner (1978), `w = 0.493 · e / T` with e in Pa
pub const PRECIPITABLE_WATER_COEFF: f64 = 49.3;

// ===== MOISTURE =====

/// Alduchov-Eskridge (1996) saturation vapor pressure coefficients.
///
/// ```text
/// es(T) = 6.1094 · exp(17.625 · T / (T + 243.04))   [hPa, °C]
/// ```
pub const MAGNUS_A_HPA: f64 = 6.1094;
/// See [`MAGNUS_A_HPA`].
pub const MAGNUS_B: f64 = 17.625;
/// See [`MAGNUS_A_HPA`].
pub const MAGNUS_C_DEG: f64 = 243.04;

/// Air temperature assumed when only relative humidity is known.
pub const HUMIDITY_ONLY_ASSUMED_TEMP_C: f64 = 15.0;

/// Maximum attenuation of the Hänel aerosol growth correction.
///
/// A saturated atmosphere dims the clear-sky baseline by at most 40%.
pub const AEROSOL_MAX_ATTENUATION: f64 = 0.40;

/// Vapor pressure (hPa) scale of the aerosol growth curve.
pub const AEROSOL_VAPOR_SCALE_HPA: f64 = 15.0;

/// Lower bound of the turbidity factor.
pub const TURBIDITY_FACTOR_MIN: f64 = 0.60;

/// Upper bound of the turbidity factor.
pub const TURBIDITY_FACTOR_MAX: f64 = 1.0;

// ===== CALIBRATION =====

/// Smoothing factor of the site calibration EMA.
pub const CALIBRATION_ALPHA: f64 = 0.15;

/// Lower bound of the site calibration factor.
pub const CALIBRATION_MIN: f64 = 0.4;

/// Upper bound of the site calibration factor.
pub const CALIBRATION_MAX: f64 = 1.4;

/// External cloud cover (%) at or below which the sky counts as clear.
pub const CALIBRATION_CLEAR_SKY_MAX_CLOUD: f64 = 5.0;

/// Minimum sun elevation (degrees) for a calibration sample.
pub const CALIBRATION_MIN_ELEVATION_DEG: f64 = 10.0;

/// Fraction of the solar-noon elevation required for a calibration sample.
pub const CALIBRATION_NOON_FRACTION: f64 = 0.75;

/// Cloud cover reported when the sun is down and no external value exists.
pub const NIGHT_FALLBACK_CLOUD_PCT: f64 = 50.0;
