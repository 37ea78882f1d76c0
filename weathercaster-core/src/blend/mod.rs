//! Forecast Blending
//!
//! ## Overview
//!
//! The blender turns one Sager evaluation, the current readings and an
//! optional external forecast into a 7 day daily series and an hourly
//! series of at least 48 slots. The Sager forecast is authoritative for the
//! first two days, the external source for everything it can measure that
//! a barometer cannot.
//!
//! ## Precedence
//!
//! ```text
//!             condition                      numeric fields
//! -------------------------------------------------------------------------
//! day 1       Sager                          external, else extrapolated
//! day 2       Sager, evolved                 external, else extrapolated
//! day 3       vote 40 Sager / 60 external    external
//! day 4-7     external                       external
//!             (Sager continuation if none)   (last temperature held)
//!
//! hour 0-23   Sager day 1                    external per hour, else synthetic
//! hour 24-47  Sager day 2                    external per hour, else synthetic
//! hour 48+    external                       external
//! ```
//!
//! The day 3 vote and the synthetic hourly series are described in
//! [`daily`] and [`hourly`].

pub mod daily;
pub mod evolution;
pub mod hourly;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::condition::Condition;
use crate::config::Site;
use crate::external::ExternalView;
use crate::sager::SagerForecast;

pub use daily::{build_daily, vote};
pub use evolution::{evolve_code, evolve_letter};
pub use hourly::build_hourly;

/// Where a daily slot's condition came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DaySource {
    Sager,
    Blended,
    External,
    SagerContinuation,
}

/// Where an hourly slot's values came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HourSource {
    /// Sager condition, synthetic numeric fields
    Synthetic,
    /// Sager condition, numeric fields from the external source
    Overlaid,
    /// Entirely external
    External,
}

/// One day of the blended forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub condition: Condition,
    pub source: DaySource,
    /// Sager forecast code behind the condition, when there is one
    pub forecast_code: Option<String>,
    pub temperature_high: Option<f64>,
    pub temperature_low: Option<f64>,
    pub precipitation: Option<f64>,
    pub precipitation_probability: Option<u8>,
    pub wind_speed: Option<f64>,
    pub wind_bearing: Option<f64>,
    pub cloud_cover: Option<f64>,
    pub uv_index: Option<f64>,
}

/// One hour of the blended forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecast {
    pub time: DateTime<Utc>,
    pub condition: Condition,
    pub source: HourSource,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub dew_point: Option<f64>,
    pub cloud_cover: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_bearing: Option<f64>,
    pub precipitation: Option<f64>,
    pub precipitation_probability: Option<u8>,
    pub uv_index: Option<f64>,
    pub is_day: bool,
}

/// Current values the synthetic series start from
///
/// Each field is the live reading, or the last value seen in an earlier
/// cycle when the sensor is silent now.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub cloud_cover: Option<f64>,
    /// Wind speed in km/h
    pub wind_speed: Option<f64>,
    pub wind_bearing: Option<f64>,
}

/// Everything the blender reads for one cycle
#[derive(Debug, Clone, Copy)]
pub struct BlendInput<'a> {
    pub now: DateTime<Utc>,
    pub site: Site,
    pub sager: &'a SagerForecast,
    pub current: CurrentConditions,
    pub external: Option<ExternalView<'a>>,
}

/// Build both series
pub fn blend(input: &BlendInput<'_>) -> (Vec<DailyForecast>, Vec<HourlyForecast>) {
    let daily = build_daily(input);
    let hourly = build_hourly(input, &daily);
    (daily, hourly)
}
