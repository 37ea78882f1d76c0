//! Zambretti Forecaster
//!
//! ## Overview
//!
//! The Negretti & Zambra "Zambretti" forecaster (1915) is a pocket
//! calculator for barometer readings. It is independent of the Sager
//! table, which makes it a useful second opinion.
//!
//! ## Algorithm
//!
//! The three hour tendency (estimated as half the six hour change) selects
//! one of three linear scales:
//!
//! ```text
//! falling  (Δ3h < -1.6)   Z = 127 - 0.12·P    clamped to 1..=9
//! steady                  Z = 144 - 0.13·P    clamped to 10..=19
//! rising   (Δ3h > +1.6)   Z = 185 - 0.16·P    clamped to 20..=32
//! ```
//!
//! Wind from the southern quadrant (135°-225°) adds 2, from the east or
//! west quadrants adds 1, never beyond the end of the scale. Summer with a
//! rising barometer subtracts 1, winter with a falling one adds 1.
//!
//! Each index maps to a forecast letter A (settled fine) to Z (stormy).

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::condition::Condition;
use crate::constants::forecast::{
    ZAMBRETTI_FALLING_CONSTANT, ZAMBRETTI_FALLING_FACTOR, ZAMBRETTI_RISING_CONSTANT,
    ZAMBRETTI_RISING_FACTOR, ZAMBRETTI_STEADY_CONSTANT, ZAMBRETTI_STEADY_FACTOR,
    ZAMBRETTI_TREND_THRESHOLD_HPA,
};
use crate::zone::LatitudeZone;

/// Zambretti barometric tendency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZambrettiTrend {
    Falling,
    Steady,
    Rising,
}

impl ZambrettiTrend {
    /// Classify a six hour change through its three hour equivalent
    pub fn from_change_6h(change_6h: f64) -> Self {
        let change_3h = change_6h / 2.0;
        if change_3h < -ZAMBRETTI_TREND_THRESHOLD_HPA {
            ZambrettiTrend::Falling
        } else if change_3h > ZAMBRETTI_TREND_THRESHOLD_HPA {
            ZambrettiTrend::Rising
        } else {
            ZambrettiTrend::Steady
        }
    }

    fn range(self) -> (i32, i32) {
        match self {
            ZambrettiTrend::Falling => (1, 9),
            ZambrettiTrend::Steady => (10, 19),
            ZambrettiTrend::Rising => (20, 32),
        }
    }

    fn letters(self) -> &'static [u8] {
        match self {
            ZambrettiTrend::Falling => b"ABDHORUXZ",
            ZambrettiTrend::Steady => b"ABEKNPSWXZ",
            ZambrettiTrend::Rising => b"ABCFGIJLMQTYZ",
        }
    }
}

/// Text and condition of each Zambretti letter
fn describe(letter: char) -> (&'static str, Condition) {
    match letter {
        'A' => ("Settled fine", Condition::Sunny),
        'B' => ("Fine weather", Condition::Sunny),
        'C' => ("Becoming fine", Condition::PartlyCloudy),
        'D' => ("Fine, becoming less settled", Condition::PartlyCloudy),
        'E' => ("Fine, possible showers", Condition::PartlyCloudy),
        'F' => ("Fairly fine, improving", Condition::PartlyCloudy),
        'G' => ("Fairly fine, possible showers early", Condition::PartlyCloudy),
        'H' => ("Fairly fine, showery later", Condition::Cloudy),
        'I' => ("Showery early, improving", Condition::Rainy),
        'J' => ("Changeable, mending", Condition::Cloudy),
        'K' => ("Fairly fine, showers likely", Condition::Cloudy),
        'L' => ("Rather unsettled, clearing later", Condition::Cloudy),
        'M' => ("Unsettled, probably improving", Condition::Cloudy),
        'N' => ("Showery, bright intervals", Condition::Rainy),
        'O' => ("Showery, becoming less settled", Condition::Rainy),
        'P' => ("Changeable, some rain", Condition::Rainy),
        'Q' => ("Unsettled, short fine intervals", Condition::Rainy),
        'R' => ("Unsettled, rain later", Condition::Rainy),
        'S' => ("Unsettled, some rain", Condition::Rainy),
        'T' => ("Mostly very unsettled", Condition::Rainy),
        'U' => ("Occasional rain, worsening", Condition::Rainy),
        'V' => ("Rain at times, very unsettled", Condition::Rainy),
        'W' => ("Rain at frequent intervals", Condition::Rainy),
        'X' => ("Rain, very unsettled", Condition::Pouring),
        'Y' => ("Stormy, may improve", Condition::LightningRainy),
        _ => ("Stormy, much rain", Condition::LightningRainy),
    }
}

/// Result of one Zambretti evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZambrettiForecast {
    pub trend: ZambrettiTrend,
    /// Scale index 1..=32
    pub index: u8,
    /// Forecast letter A..Z
    pub letter: char,
    pub text: &'static str,
    pub condition: Condition,
}

fn is_summer(zone: LatitudeZone, now: DateTime<Utc>) -> bool {
    let northern_summer = (4..=9).contains(&now.month());
    northern_summer != zone.is_southern()
}

/// Evaluate the Zambretti forecast
///
/// A missing pressure change is treated as steady.
pub fn forecast(
    pressure_hpa: f64,
    change_6h: Option<f64>,
    wind_direction: Option<f64>,
    zone: LatitudeZone,
    now: DateTime<Utc>,
) -> ZambrettiForecast {
    let trend = change_6h
        .map(ZambrettiTrend::from_change_6h)
        .unwrap_or(ZambrettiTrend::Steady);
    let (min, max) = trend.range();

    let raw = match trend {
        ZambrettiTrend::Falling => ZAMBRETTI_FALLING_CONSTANT - ZAMBRETTI_FALLING_FACTOR * pressure_hpa,
        ZambrettiTrend::Steady => ZAMBRETTI_STEADY_CONSTANT - ZAMBRETTI_STEADY_FACTOR * pressure_hpa,
        ZambrettiTrend::Rising => ZAMBRETTI_RISING_CONSTANT - ZAMBRETTI_RISING_FACTOR * pressure_hpa,
    };
    let mut index = (raw.floor() as i32).clamp(min, max);

    if let Some(direction) = wind_direction {
        let adjustment = if (135.0..=225.0).contains(&direction) {
            2
        } else if (45.0..135.0).contains(&direction) || (direction > 225.0 && direction <= 315.0) {
            1
        } else {
            0
        };
        index = (index + adjustment).min(max);
    }

    let summer = is_summer(zone, now);
    index = match trend {
        ZambrettiTrend::Rising if summer => index - 1,
        ZambrettiTrend::Falling if !summer => index + 1,
        _ => index,
    }
    .clamp(min, max);

    let letters = trend.letters();
    let offset = ((index - min) as usize).min(letters.len() - 1);
    let letter = letters[offset] as char;
    let (text, condition) = describe(letter);

    ZambrettiForecast {
        trend,
        index: index as u8,
        letter,
        text,
        condition,
    }
}
