//! Raw and Normalized Observations
//!
//! ## Raw states
//!
//! Host frameworks report entity states loosely: a number, an `on`/`off`
//! flag, a free-text string such as `"unavailable"`, and an optional unit
//! tag. [`RawState`] captures exactly that and nothing more.
//!
//! ## Normalized readings
//!
//! After normalization every field is a [`Reading`]: a valid value, or an
//! explicit reason why there is none. A missing sensor never turns into a
//! zero. The distinction between `Unavailable` (configured but silent or
//! implausible) and `NotConfigured` (never set up) matters for the
//! reliability score and for diagnostics.
//!
//! ## Cloud input
//!
//! A cloud sensor may report percent cover, illuminance (lux) or irradiance
//! (W/m²). The unit tag is inspected once, here, and turned into a
//! [`CloudInput`] variant that downstream code matches on.

use serde::{Deserialize, Serialize};

use crate::constants::sensors::{RAIN_POURING_MM_H, RAIN_RAINY_MM_H};

/// Value part of a host entity state
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Number(f64),
    Flag(bool),
    Text(String),
    Unavailable,
}

impl RawValue {
    /// Numeric interpretation, parsing numeric text
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawValue::Number(v) => Some(*v),
            RawValue::Text(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Boolean interpretation of flags and flag-like text
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            RawValue::Flag(b) => Some(*b),
            RawValue::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "on" | "true" | "wet" | "raining" | "yes" => Some(true),
                "off" | "false" | "dry" | "no" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Whether the host marked the entity as having no value
    pub fn is_unavailable(&self) -> bool {
        match self {
            RawValue::Unavailable => true,
            RawValue::Text(s) => matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "unavailable" | "unknown" | "none" | ""
            ),
            _ => false,
        }
    }
}

/// State of a host entity: a value plus an optional unit tag
#[derive(Debug, Clone, PartialEq)]
pub struct RawState {
    pub value: RawValue,
    pub unit: Option<String>,
}

impl RawState {
    pub fn number(value: f64) -> Self {
        Self { value: RawValue::Number(value), unit: None }
    }

    pub fn flag(value: bool) -> Self {
        Self { value: RawValue::Flag(value), unit: None }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self { value: RawValue::Text(value.into()), unit: None }
    }

    pub fn unavailable() -> Self {
        Self { value: RawValue::Unavailable, unit: None }
    }

    /// Attach a unit tag
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}

/// Availability of a single input for one cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputStatus {
    Ok,
    Unavailable,
    NotConfigured,
}

/// A normalized field: a valid value or the reason there is none
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading<T> {
    Ok(T),
    Unavailable,
    NotConfigured,
}

impl<T: Copy> Reading<T> {
    /// The value, if valid
    pub fn value(&self) -> Option<T> {
        match self {
            Reading::Ok(v) => Some(*v),
            _ => None,
        }
    }

    pub fn status(&self) -> InputStatus {
        match self {
            Reading::Ok(_) => InputStatus::Ok,
            Reading::Unavailable => InputStatus::Unavailable,
            Reading::NotConfigured => InputStatus::NotConfigured,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Reading::Ok(_))
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Reading<U> {
        match self {
            Reading::Ok(v) => Reading::Ok(f(v)),
            Reading::Unavailable => Reading::Unavailable,
            Reading::NotConfigured => Reading::NotConfigured,
        }
    }

    /// Keep a valid reading, otherwise try `other`
    ///
    /// When both are missing, `Unavailable` wins over `NotConfigured`: a
    /// configured but silent source is the more useful diagnosis.
    pub fn or_else<F: FnOnce() -> Reading<T>>(self, other: F) -> Reading<T> {
        match self {
            Reading::Ok(_) => self,
            Reading::NotConfigured => other(),
            Reading::Unavailable => match other() {
                Reading::Ok(v) => Reading::Ok(v),
                _ => Reading::Unavailable,
            },
        }
    }
}

/// Precipitation state derived from a rain sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RainState {
    Dry,
    Rainy,
    Pouring,
}

impl RainState {
    /// Classify a rain rate in mm/h
    pub fn from_rate(mm_per_hour: f64) -> Self {
        if mm_per_hour >= RAIN_POURING_MM_H {
            RainState::Pouring
        } else if mm_per_hour >= RAIN_RAINY_MM_H {
            RainState::Rainy
        } else {
            RainState::Dry
        }
    }

    /// Classify a binary rain detector
    pub fn from_flag(raining: bool) -> Self {
        if raining {
            RainState::Rainy
        } else {
            RainState::Dry
        }
    }

    pub fn is_wet(self) -> bool {
        !matches!(self, RainState::Dry)
    }
}

/// Unit of a cloud sensor, classified from its unit tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudUnit {
    Percent,
    Lux,
    Irradiance,
}

impl CloudUnit {
    /// Classify a unit tag; unknown tags yield `None`
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim().to_ascii_lowercase();
        match tag.as_str() {
            "%" | "percent" | "pct" => Some(CloudUnit::Percent),
            "lx" | "lux" => Some(CloudUnit::Lux),
            "w/m²" | "w/m2" | "w/m^2" | "w m-2" => Some(CloudUnit::Irradiance),
            _ => None,
        }
    }
}

/// Cloud sensor reading tagged with its unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CloudInput {
    /// Direct cloud cover in percent
    Percent(f64),
    /// Illuminance in lux
    Lux(f64),
    /// Global horizontal irradiance in W/m²
    Irradiance(f64),
}

impl CloudInput {
    pub fn new(unit: CloudUnit, value: f64) -> Self {
        match unit {
            CloudUnit::Percent => CloudInput::Percent(value),
            CloudUnit::Lux => CloudInput::Lux(value),
            CloudUnit::Irradiance => CloudInput::Irradiance(value),
        }
    }
}

/// Normalized inputs of one forecast cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObservationSet {
    /// Station pressure in hPa, always > 0 when valid
    pub pressure: Reading<f64>,
    /// Wind direction in `[0, 360)`, vector averaged
    pub wind_direction: Reading<f64>,
    /// Wind speed, scalar averaged
    pub wind_speed: Reading<f64>,
    pub cloud: Reading<CloudInput>,
    pub rain: Reading<RainState>,
    pub temperature: Reading<f64>,
    pub humidity: Reading<f64>,
    pub dew_point: Reading<f64>,
    /// Wind direction six hours ago
    pub wind_direction_6h: Reading<f64>,
    /// Pressure change over the last six hours in hPa
    pub pressure_change_6h: Reading<f64>,
}

impl ObservationSet {
    /// An observation set where nothing is configured
    pub fn empty() -> Self {
        Self {
            pressure: Reading::NotConfigured,
            wind_direction: Reading::NotConfigured,
            wind_speed: Reading::NotConfigured,
            cloud: Reading::NotConfigured,
            rain: Reading::NotConfigured,
            temperature: Reading::NotConfigured,
            humidity: Reading::NotConfigured,
            dew_point: Reading::NotConfigured,
            wind_direction_6h: Reading::NotConfigured,
            pressure_change_6h: Reading::NotConfigured,
        }
    }

    /// Whether the rain sensor reports precipitation
    pub fn is_raining(&self) -> bool {
        self.rain.value().map(RainState::is_wet).unwrap_or(false)
    }
}

impl Default for ObservationSet {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rain_rate_bands() {
        assert_eq!(RainState::from_rate(0.0), RainState::Dry);
        assert_eq!(RainState::from_rate(0.09), RainState::Dry);
        assert_eq!(RainState::from_rate(0.1), RainState::Rainy);
        assert_eq!(RainState::from_rate(7.49), RainState::Rainy);
        assert_eq!(RainState::from_rate(7.5), RainState::Pouring);
        assert_eq!(RainState::from_flag(true), RainState::Rainy);
        assert_eq!(RainState::from_flag(false), RainState::Dry);
    }

    #[test]
    fn cloud_unit_tags() {
        assert_eq!(CloudUnit::from_tag("%"), Some(CloudUnit::Percent));
        assert_eq!(CloudUnit::from_tag("lx"), Some(CloudUnit::Lux));
        assert_eq!(CloudUnit::from_tag("W/m²"), Some(CloudUnit::Irradiance));
        assert_eq!(CloudUnit::from_tag("W/m2"), Some(CloudUnit::Irradiance));
        assert_eq!(CloudUnit::from_tag("okta"), None);
    }

    #[test]
    fn raw_value_interpretation() {
        assert_eq!(RawValue::Text(" 1013.2 ".into()).as_number(), Some(1013.2));
        assert_eq!(RawValue::Text("on".into()).as_flag(), Some(true));
        assert_eq!(RawValue::Number(3.0).as_flag(), None);
        assert!(RawValue::Text("unknown".into()).is_unavailable());
        assert!(!RawValue::Number(0.0).is_unavailable());
    }

    #[test]
    fn reading_or_else_prefers_unavailable() {
        let silent: Reading<f64> = Reading::Unavailable;
        assert_eq!(silent.or_else(|| Reading::Ok(2.0)), Reading::Ok(2.0));
        assert_eq!(silent.or_else(|| Reading::NotConfigured), Reading::Unavailable);
        assert_eq!(Reading::Ok(1.0).or_else(|| Reading::Ok(2.0)), Reading::Ok(1.0));

        let absent: Reading<f64> = Reading::NotConfigured;
        assert_eq!(absent.or_else(|| Reading::Unavailable), Reading::Unavailable);
        assert_eq!(absent.or_else(|| Reading::NotConfigured), Reading::NotConfigured);
    }
}
