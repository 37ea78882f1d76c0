//! Weather Condition Vocabulary
//!
//! Two levels of detail:
//!
//! - [`Condition`]: the presentation vocabulary (`sunny`, `rainy`,
//!   `lightning-rainy`, ...) shared by the Sager and Zambretti engines, the
//!   external source and the blended series.
//! - [`CoarseCondition`]: an ordinal five-step severity scale used to
//!   compare two independently coded forecasts and to vote between them.
//!
//! ```text
//! Clear (0) < PartlyCloudy (1) < Cloudy (2) < Rain (3) < Storm (4)
//! ```

use core::fmt;

use serde::{Deserialize, Serialize};

/// Presentation weather condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    #[serde(rename = "sunny")]
    Sunny,
    #[serde(rename = "clear-night")]
    ClearNight,
    #[serde(rename = "partlycloudy")]
    PartlyCloudy,
    #[serde(rename = "cloudy")]
    Cloudy,
    #[serde(rename = "fog")]
    Fog,
    #[serde(rename = "rainy")]
    Rainy,
    #[serde(rename = "pouring")]
    Pouring,
    #[serde(rename = "snowy")]
    Snowy,
    #[serde(rename = "snowy-rainy")]
    SnowyRainy,
    #[serde(rename = "lightning")]
    Lightning,
    #[serde(rename = "lightning-rainy")]
    LightningRainy,
    #[serde(rename = "hail")]
    Hail,
    #[serde(rename = "windy")]
    Windy,
    #[serde(rename = "exceptional")]
    Exceptional,
}

impl Condition {
    pub fn as_str(self) -> &'static str {
        match self {
            Condition::Sunny => "sunny",
            Condition::ClearNight => "clear-night",
            Condition::PartlyCloudy => "partlycloudy",
            Condition::Cloudy => "cloudy",
            Condition::Fog => "fog",
            Condition::Rainy => "rainy",
            Condition::Pouring => "pouring",
            Condition::Snowy => "snowy",
            Condition::SnowyRainy => "snowy-rainy",
            Condition::Lightning => "lightning",
            Condition::LightningRainy => "lightning-rainy",
            Condition::Hail => "hail",
            Condition::Windy => "windy",
            Condition::Exceptional => "exceptional",
        }
    }

    /// Severity bucket
    pub fn coarse(self) -> CoarseCondition {
        match self {
            Condition::Sunny | Condition::ClearNight => CoarseCondition::Clear,
            Condition::PartlyCloudy | Condition::Windy => CoarseCondition::PartlyCloudy,
            Condition::Cloudy | Condition::Fog => CoarseCondition::Cloudy,
            Condition::Rainy | Condition::Snowy | Condition::SnowyRainy => CoarseCondition::Rain,
            Condition::Pouring
            | Condition::Lightning
            | Condition::LightningRainy
            | Condition::Hail
            | Condition::Exceptional => CoarseCondition::Storm,
        }
    }

    /// Swap sunny for clear-night when the sun is down
    pub fn for_daylight(self, daylight: bool) -> Self {
        match (self, daylight) {
            (Condition::Sunny, false) => Condition::ClearNight,
            (Condition::ClearNight, true) => Condition::Sunny,
            (c, _) => c,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordinal severity scale shared by all forecast sources
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoarseCondition {
    Clear = 0,
    PartlyCloudy = 1,
    Cloudy = 2,
    Rain = 3,
    Storm = 4,
}

impl CoarseCondition {
    pub const ALL: [CoarseCondition; 5] = [
        CoarseCondition::Clear,
        CoarseCondition::PartlyCloudy,
        CoarseCondition::Cloudy,
        CoarseCondition::Rain,
        CoarseCondition::Storm,
    ];

    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Steps between two buckets on the severity scale
    pub fn distance(self, other: CoarseCondition) -> usize {
        self.ordinal().abs_diff(other.ordinal())
    }

    /// Typical presentation condition for the bucket
    pub fn representative(self) -> Condition {
        match self {
            CoarseCondition::Clear => Condition::Sunny,
            CoarseCondition::PartlyCloudy => Condition::PartlyCloudy,
            CoarseCondition::Cloudy => Condition::Cloudy,
            CoarseCondition::Rain => Condition::Rainy,
            CoarseCondition::Storm => Condition::LightningRainy,
        }
    }

    /// Typical cloud cover (%) and relative humidity (%) for the bucket
    pub fn sky_targets(self) -> (f64, f64) {
        match self {
            CoarseCondition::Clear => (10.0, 55.0),
            CoarseCondition::PartlyCloudy => (40.0, 65.0),
            CoarseCondition::Cloudy => (75.0, 75.0),
            CoarseCondition::Rain => (90.0, 90.0),
            CoarseCondition::Storm => (95.0, 92.0),
        }
    }

    /// Precipitation probability (%) implied by the bucket
    pub fn precipitation_probability(self) -> u8 {
        match self {
            CoarseCondition::Clear => 0,
            CoarseCondition::PartlyCloudy => 10,
            CoarseCondition::Cloudy => 30,
            CoarseCondition::Rain => 70,
            CoarseCondition::Storm => 90,
        }
    }
}
