//! Sager Weathercaster Engine
//!
//! ## Overview
//!
//! The Sager Weathercaster (1942) encodes five observations into a four
//! character key and reads the forecast from a fixed table:
//!
//! ```text
//!   wind direction ─┐
//!   wind trend (6h) ┴─► letter A..X (Z calm)
//!   pressure        ───► level 1..8
//!   pressure Δ 6h   ───► trend 1..5
//!   cloud / rain    ───► level 1..5
//!                              │
//!                       key "N331" ──► table ──► "aU6"
//! ```
//!
//! ## Wind letter
//!
//! The observed direction is bucketed to 8 points and located in the
//! latitude zone's direction table (see [`crate::zone`]). With the table
//! position `pos` and the wind trend `t` (steady 0, veering 1, backing 2):
//!
//! ```text
//! letter = 'A' + 3·pos + t
//! ```
//!
//! Veering means the wind turned clockwise over the last six hours in the
//! northern zones and anticlockwise in the southern ones. Shifts smaller
//! than 10° count as steady.
//!
//! ## Degradation
//!
//! - Pressure and wind direction are required; without them no key exists.
//! - A missing 6 h history defaults that trend to steady and costs 10
//!   confidence points.
//! - Unknown wind speed is treated as not calm.
//! - A key absent from the table yields the default entry (unsettled, no
//!   significant wind change) at confidence 60.
//!
//! ## Temperature refinement
//!
//! Shower forecasts carry a `1` suffix. Below 2 °C the suffix becomes `2`
//! (flurries). This is a string rewrite after lookup.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::angles::{signed_difference, Cardinal};
use crate::condition::Condition;
use crate::constants::forecast::{
    CLOUD_MOSTLY_CLOUDY_PCT, CLOUD_OVERCAST_PCT, CLOUD_PARTLY_CLOUDY_PCT, FLURRY_TEMPERATURE_C,
    SAGER_DEFAULTED_TREND_PENALTY, SAGER_HIT_CONFIDENCE, SAGER_MISS_CONFIDENCE,
    SAGER_PRESSURE_LEVELS_HPA, TREND_FALLING_MIN_HPA, TREND_RISING_HPA, TREND_RISING_RAPIDLY_HPA,
    TREND_STEADY_MIN_HPA, WIND_STEADY_BAND_DEG,
};
use crate::constants::sensors::CALM_WIND_SPEED;
use crate::errors::{ForecastError, ForecastResultOf};
use crate::lookup::{self, SagerCode, Velocity};
use crate::observation::{ObservationSet, RainState};
use crate::zone::LatitudeZone;

/// Rotation of the wind over the lookback window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindTrend {
    Steady,
    Veering,
    Backing,
}

impl WindTrend {
    /// Classify the rotation from `historic` to `current`
    pub fn classify(current: f64, historic: f64, zone: LatitudeZone) -> Self {
        let diff = signed_difference(current, historic);
        if diff.abs() < WIND_STEADY_BAND_DEG {
            return WindTrend::Steady;
        }
        let clockwise = diff > 0.0;
        if clockwise != zone.is_southern() {
            WindTrend::Veering
        } else {
            WindTrend::Backing
        }
    }

    fn letter_offset(self) -> u8 {
        match self {
            WindTrend::Steady => 0,
            WindTrend::Veering => 1,
            WindTrend::Backing => 2,
        }
    }
}

/// Six hour barometric tendency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PressureTrend {
    RisingRapidly,
    Rising,
    Steady,
    Falling,
    FallingRapidly,
}

impl PressureTrend {
    pub fn classify(change_6h: f64) -> Self {
        if change_6h > TREND_RISING_RAPIDLY_HPA {
            PressureTrend::RisingRapidly
        } else if change_6h > TREND_RISING_HPA {
            PressureTrend::Rising
        } else if change_6h >= TREND_STEADY_MIN_HPA {
            PressureTrend::Steady
        } else if change_6h >= TREND_FALLING_MIN_HPA {
            PressureTrend::Falling
        } else {
            PressureTrend::FallingRapidly
        }
    }

    /// Key digit 1..=5
    pub fn digit(self) -> u8 {
        self as u8 + 1
    }
}

/// Sky state bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloudLevel {
    Clear,
    PartlyCloudy,
    MostlyCloudy,
    Overcast,
    Raining,
}

impl CloudLevel {
    /// Bucket cloud cover; rain overrides any cover value
    pub fn classify(cover_pct: Option<f64>, raining: bool) -> Self {
        if raining {
            return CloudLevel::Raining;
        }
        match cover_pct {
            Some(c) if c > CLOUD_OVERCAST_PCT => CloudLevel::Overcast,
            Some(c) if c > CLOUD_MOSTLY_CLOUDY_PCT => CloudLevel::MostlyCloudy,
            Some(c) if c > CLOUD_PARTLY_CLOUDY_PCT => CloudLevel::PartlyCloudy,
            _ => CloudLevel::Clear,
        }
    }

    /// Key digit 1..=5
    pub fn digit(self) -> u8 {
        self as u8 + 1
    }
}

/// Pressure level 1 (very high) to 8 (extremely low)
pub fn pressure_level(pressure_hpa: f64) -> u8 {
    SAGER_PRESSURE_LEVELS_HPA
        .iter()
        .position(|threshold| pressure_hpa >= *threshold)
        .map(|i| i as u8 + 1)
        .unwrap_or(8)
}

/// Four character table key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SagerKey {
    pub wind_letter: char,
    pub pressure_level: u8,
    pub pressure_trend: u8,
    pub cloud_level: u8,
}

impl fmt::Display for SagerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            self.wind_letter, self.pressure_level, self.pressure_trend, self.cloud_level
        )
    }
}

/// Entry used when a key is missing from the table
pub const DEFAULT_CODE: SagerCode = SagerCode {
    forecast: 'd',
    shower: false,
    velocity: Velocity::NoSignificantChange,
    direction: 8,
};

/// Rewrite a shower suffix to flurries below the freezing margin
pub fn refine_for_temperature(forecast_code: &str, temperature_c: Option<f64>) -> String {
    match (forecast_code.strip_suffix('1'), temperature_c) {
        (Some(stem), Some(t)) if t < FLURRY_TEMPERATURE_C => format!("{}2", stem),
        _ => forecast_code.to_string(),
    }
}

/// Presentation condition of a (refined) forecast code
pub fn condition_for(forecast_code: &str, velocity: Velocity) -> Condition {
    let mut chars = forecast_code.chars();
    let letter = chars.next().unwrap_or('d');
    let flurries = chars.next() == Some('2');

    let base = match letter {
        'a' | 'b' | 'c' => Condition::Sunny,
        'd' | 'e' | 'f' | 'x' | 'y' => Condition::PartlyCloudy,
        'g' | 'h' => Condition::Cloudy,
        _ if flurries => Condition::Snowy,
        _ => Condition::Rainy,
    };
    match base {
        Condition::Rainy | Condition::Snowy if velocity.is_gale_or_worse() => {
            Condition::LightningRainy
        }
        other => other,
    }
}

/// Outcome of one Sager evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct SagerForecast {
    pub key: SagerKey,
    /// Entry used, the default entry on a table miss
    pub code: SagerCode,
    pub table_hit: bool,
    /// Forecast letter with refined shower/flurry suffix
    pub forecast_code: String,
    pub condition: Condition,
    /// `None` when calm
    pub wind_cardinal: Option<Cardinal>,
    pub wind_trend: WindTrend,
    pub pressure_trend: PressureTrend,
    pub cloud_level: CloudLevel,
    /// Forecast wind direction, e.g. `"sw_or_w"`
    pub direction_key: String,
    /// Number of trends that defaulted to steady
    pub defaulted_trends: u8,
    pub confidence: u8,
}

impl SagerForecast {
    pub fn velocity(&self) -> Velocity {
        self.code.velocity
    }
}

struct Encoded {
    key: SagerKey,
    wind_cardinal: Option<Cardinal>,
    wind_trend: WindTrend,
    pressure_trend: PressureTrend,
    cloud_level: CloudLevel,
    defaulted_trends: u8,
}

/// Sager evaluator bound to a latitude zone
#[derive(Debug, Clone, Copy)]
pub struct SagerEngine {
    zone: LatitudeZone,
}

impl SagerEngine {
    pub fn new(zone: LatitudeZone) -> Self {
        Self { zone }
    }

    pub fn zone(&self) -> LatitudeZone {
        self.zone
    }

    /// Build the table key for an observation set
    pub fn key(&self, obs: &ObservationSet, cloud_pct: Option<f64>) -> ForecastResultOf<SagerKey> {
        self.encode(obs, cloud_pct).map(|encoded| encoded.key)
    }

    fn encode(&self, obs: &ObservationSet, cloud_pct: Option<f64>) -> ForecastResultOf<Encoded> {
        let pressure = obs
            .pressure
            .value()
            .ok_or(ForecastError::InsufficientData { missing: "pressure" })?;
        let direction = obs
            .wind_direction
            .value()
            .ok_or(ForecastError::InsufficientData { missing: "wind direction" })?;

        let mut defaulted = 0u8;
        let wind_trend = match obs.wind_direction_6h.value() {
            Some(historic) => WindTrend::classify(direction, historic, self.zone),
            None => {
                defaulted += 1;
                WindTrend::Steady
            }
        };
        let pressure_trend = match obs.pressure_change_6h.value() {
            Some(change) => PressureTrend::classify(change),
            None => {
                defaulted += 1;
                PressureTrend::Steady
            }
        };
        let cloud_level = CloudLevel::classify(cloud_pct, obs.is_raining());

        let calm = obs
            .wind_speed
            .value()
            .map(|speed| speed <= CALM_WIND_SPEED)
            .unwrap_or(false);
        let (wind_letter, cardinal) = if calm {
            ('Z', None)
        } else {
            let cardinal = Cardinal::from_degrees(direction);
            let position = self.zone.position(cardinal) as u8;
            ((b'A' + position * 3 + wind_trend.letter_offset()) as char, Some(cardinal))
        };

        let key = SagerKey {
            wind_letter,
            pressure_level: pressure_level(pressure),
            pressure_trend: pressure_trend.digit(),
            cloud_level: cloud_level.digit(),
        };
        Ok(Encoded {
            key,
            wind_cardinal: cardinal,
            wind_trend,
            pressure_trend,
            cloud_level,
            defaulted_trends: defaulted,
        })
    }

    /// Evaluate the forecast for an observation set
    ///
    /// `cloud_pct` is the cover estimate for this cycle, if any.
    pub fn forecast(
        &self,
        obs: &ObservationSet,
        cloud_pct: Option<f64>,
    ) -> ForecastResultOf<SagerForecast> {
        let Encoded {
            key,
            wind_cardinal,
            wind_trend,
            pressure_trend,
            cloud_level,
            defaulted_trends,
        } = self.encode(obs, cloud_pct)?;
        let key_text = key.to_string();

        let (code, table_hit, confidence) = match lookup::lookup(&key_text) {
            Some(code) => {
                let penalty = SAGER_DEFAULTED_TREND_PENALTY.saturating_mul(defaulted_trends);
                let confidence = SAGER_HIT_CONFIDENCE
                    .saturating_sub(penalty)
                    .max(SAGER_MISS_CONFIDENCE);
                (*code, true, confidence)
            }
            None => {
                log::warn!("Forecast table has no entry for {}, using default", key_text);
                (DEFAULT_CODE, false, SAGER_MISS_CONFIDENCE)
            }
        };

        let forecast_code = refine_for_temperature(&code.forecast_code(), obs.temperature.value());
        let mut condition = condition_for(&forecast_code, code.velocity);
        if condition == Condition::Rainy && obs.rain.value() == Some(RainState::Pouring) {
            condition = Condition::Pouring;
        }

        Ok(SagerForecast {
            key,
            code,
            table_hit,
            condition,
            forecast_code,
            wind_cardinal,
            wind_trend,
            pressure_trend,
            cloud_level,
            direction_key: self.direction_key(code.direction),
            defaulted_trends,
            confidence,
        })
    }

    /// Direction category for a table direction digit
    pub fn direction_key(&self, digit: u8) -> String {
        let position = (digit.clamp(1, 8) - 1) as usize;
        format!(
            "{}_or_{}",
            self.zone.cardinal_at(position).key(),
            self.zone.cardinal_at(position + 1).key()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observation::{RainState, Reading};

    fn obs(pressure: f64, direction: f64, historic: f64, change: f64) -> ObservationSet {
        ObservationSet {
            pressure: Reading::Ok(pressure),
            wind_direction: Reading::Ok(direction),
            wind_speed: Reading::Ok(12.0),
            wind_direction_6h: Reading::Ok(historic),
            pressure_change_6h: Reading::Ok(change),
            ..ObservationSet::empty()
        }
    }

    #[test]
    fn pressure_levels() {
        assert_eq!(pressure_level(1035.0), 1);
        assert_eq!(pressure_level(1029.46), 1);
        assert_eq!(pressure_level(1013.0), 3);
        assert_eq!(pressure_level(1012.0), 4);
        assert_eq!(pressure_level(980.0), 7);
        assert_eq!(pressure_level(960.0), 8);
    }

    #[test]
    fn pressure_trends() {
        assert_eq!(PressureTrend::classify(3.0), PressureTrend::RisingRapidly);
        assert_eq!(PressureTrend::classify(2.0), PressureTrend::Rising);
        assert_eq!(PressureTrend::classify(-1.0), PressureTrend::Steady);
        assert_eq!(PressureTrend::classify(-1.36), PressureTrend::Steady);
        assert_eq!(PressureTrend::classify(-2.0), PressureTrend::Falling);
        assert_eq!(PressureTrend::classify(-4.0), PressureTrend::FallingRapidly);
    }

    #[test]
    fn wind_trend_wraps_and_flips() {
        let north = LatitudeZone::NorthernTemperate;
        let south = LatitudeZone::SouthernTemperate;
        assert_eq!(WindTrend::classify(10.0, 340.0, north), WindTrend::Veering);
        assert_eq!(WindTrend::classify(340.0, 10.0, north), WindTrend::Backing);
        assert_eq!(WindTrend::classify(10.0, 340.0, south), WindTrend::Backing);
        assert_eq!(WindTrend::classify(185.0, 180.0, north), WindTrend::Steady);
    }

    #[test]
    fn cloud_levels() {
        assert_eq!(CloudLevel::classify(Some(20.0), false), CloudLevel::Clear);
        assert_eq!(CloudLevel::classify(Some(20.1), false), CloudLevel::PartlyCloudy);
        assert_eq!(CloudLevel::classify(Some(60.0), false), CloudLevel::MostlyCloudy);
        assert_eq!(CloudLevel::classify(Some(95.0), false), CloudLevel::Overcast);
        assert_eq!(CloudLevel::classify(Some(0.0), true), CloudLevel::Raining);
        assert_eq!(CloudLevel::classify(None, false), CloudLevel::Clear);
    }

    #[test]
    fn fair_scenario_key() {
        let engine = SagerEngine::new(LatitudeZone::NorthernTemperate);
        let result = engine.forecast(&obs(1013.0, 190.0, 180.0, -1.0), Some(20.0)).unwrap();
        assert_eq!(result.key.to_string(), "N331");
        assert!(result.table_hit);
        assert_eq!(result.code.table_code(), "aU6");
        assert_eq!(result.forecast_code, "a");
        assert_eq!(result.condition, Condition::Sunny);
        assert_eq!(result.direction_key, "sw_or_w");
        assert_eq!(result.confidence, 95);
    }

    #[test]
    fn calm_forces_z() {
        let engine = SagerEngine::new(LatitudeZone::NorthernTemperate);
        let mut o = obs(1013.0, 90.0, 90.0, 0.0);
        o.wind_speed = Reading::Ok(0.5);
        let result = engine.forecast(&o, None).unwrap();
        assert_eq!(result.key.wind_letter, 'Z');
        assert_eq!(result.wind_cardinal, None);
    }

    #[test]
    fn rain_forces_cloud_level_five() {
        let engine = SagerEngine::new(LatitudeZone::NorthernTemperate);
        let mut o = obs(1000.0, 90.0, 90.0, -2.0);
        o.rain = Reading::Ok(RainState::Rainy);
        let result = engine.forecast(&o, Some(0.0)).unwrap();
        assert_eq!(result.key.cloud_level, 5);
    }

    #[test]
    fn heavy_rain_reads_as_pouring() {
        let engine = SagerEngine::new(LatitudeZone::NorthernTemperate);
        let mut o = obs(1000.0, 90.0, 90.0, -2.0);
        o.rain = Reading::Ok(RainState::Rainy);
        let light = engine.forecast(&o, None).unwrap();
        assert_eq!(light.condition, Condition::Rainy);

        o.rain = Reading::Ok(RainState::Pouring);
        let heavy = engine.forecast(&o, None).unwrap();
        assert_eq!(heavy.condition, Condition::Pouring);
        assert_eq!(heavy.forecast_code, light.forecast_code);
    }

    #[test]
    fn missing_history_defaults_and_penalises() {
        let engine = SagerEngine::new(LatitudeZone::NorthernTemperate);
        let mut o = obs(1013.0, 190.0, 180.0, -1.0);
        o.wind_direction_6h = Reading::Unavailable;
        o.pressure_change_6h = Reading::NotConfigured;
        let result = engine.forecast(&o, Some(20.0)).unwrap();
        assert_eq!(result.wind_trend, WindTrend::Steady);
        assert_eq!(result.defaulted_trends, 2);
        assert_eq!(result.confidence, 75);
    }

    #[test]
    fn table_miss_uses_default() {
        let engine = SagerEngine::new(LatitudeZone::NorthernTemperate);
        let mut o = obs(960.0, 0.0, 0.0, -5.0);
        o.wind_speed = Reading::Ok(0.0);
        let result = engine.forecast(&o, None).unwrap();
        assert_eq!(result.key.to_string(), "Z851");
        assert!(!result.table_hit);
        assert_eq!(result.code, DEFAULT_CODE);
        assert_eq!(result.confidence, 60);
        assert_eq!(result.direction_key, "nw_or_n");
    }

    #[test]
    fn required_inputs() {
        let engine = SagerEngine::new(LatitudeZone::NorthernTemperate);
        let mut o = obs(1013.0, 190.0, 180.0, -1.0);
        o.pressure = Reading::Unavailable;
        assert_eq!(
            engine.forecast(&o, None),
            Err(ForecastError::InsufficientData { missing: "pressure" })
        );
    }

    #[test]
    fn flurry_threshold() {
        assert_eq!(refine_for_temperature("j1", Some(1.9)), "j2");
        assert_eq!(refine_for_temperature("j1", Some(2.0)), "j1");
        assert_eq!(refine_for_temperature("j1", None), "j1");
        assert_eq!(refine_for_temperature("a", Some(-5.0)), "a");
    }

    #[test]
    fn southern_zone_reads_the_mirror_letter() {
        let north = SagerEngine::new(LatitudeZone::NorthernTemperate);
        let south = SagerEngine::new(LatitudeZone::SouthernTemperate);
        let o = obs(1013.0, 190.0, 180.0, -1.0);
        let n = north.forecast(&o, Some(20.0)).unwrap();
        let s = south.forecast(&o, Some(20.0)).unwrap();
        assert_eq!(n.wind_trend, WindTrend::Veering);
        assert_eq!(s.wind_trend, WindTrend::Backing);
        // S is position 4 in the north, 0 in the south
        assert_eq!(s.key.wind_letter, 'C');
    }
}
