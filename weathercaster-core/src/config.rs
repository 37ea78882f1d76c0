//! Engine Configuration
//!
//! The configuration names the site and the host entities that feed the
//! engine. Everything except the site coordinates and the two required
//! entities (pressure and wind direction) is optional; each missing entity
//! lowers the reliability score instead of failing.
//!
//! Configuration is plain data: it deserializes from JSON and can be built
//! in code with chained setters.
//!
//! ```rust
//! use weathercaster_core::config::EngineConfig;
//!
//! let config = EngineConfig::new(45.46, 9.19)
//!     .elevation_m(122.0)
//!     .pressure_entity("sensor.pressure")
//!     .wind_direction_entity("sensor.wind_bearing")
//!     .wind_speed_entity("sensor.wind_speed");
//! assert!(config.validate().is_ok());
//!
//! let parsed = EngineConfig::from_json(r#"{
//!     "site": { "latitude": -33.9, "longitude": 18.4 },
//!     "entities": { "pressure": "sensor.p", "wind_direction": "sensor.wd" }
//! }"#).unwrap();
//! assert_eq!(parsed.update_interval_minutes, 10);
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::time::{
    DEFAULT_EXTERNAL_REFRESH_MINUTES, DEFAULT_EXTERNAL_STALE_MINUTES,
    DEFAULT_UPDATE_INTERVAL_MINUTES,
};
use crate::errors::ForecastError;

/// Geographic position of the station
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Site {
    /// Degrees north, negative south
    pub latitude: f64,
    /// Degrees east, negative west
    pub longitude: f64,
    /// Station elevation in metres
    pub elevation_m: f64,
}

/// Host entity ids for each input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EntityMap {
    pub pressure: Option<String>,
    pub wind_direction: Option<String>,
    pub wind_speed: Option<String>,
    /// Wind direction six hours ago, if the host computes it
    pub wind_direction_historic: Option<String>,
    /// Pressure change over six hours, if the host computes it
    pub pressure_change: Option<String>,
    /// Cloud cover (%), illuminance (lx) or irradiance (W/m²)
    pub cloud_cover: Option<String>,
    /// Rain rate (mm/h) or binary rain detector
    pub rain: Option<String>,
    pub temperature: Option<String>,
    pub humidity: Option<String>,
    pub dew_point: Option<String>,
}

/// External forecast source scheduling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalConfig {
    pub enabled: bool,
    pub refresh_interval_minutes: u32,
    /// Age after which a snapshot is served as stale
    pub stale_after_minutes: u32,
}

impl Default for ExternalConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            refresh_interval_minutes: DEFAULT_EXTERNAL_REFRESH_MINUTES,
            stale_after_minutes: DEFAULT_EXTERNAL_STALE_MINUTES,
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub site: Site,
    pub entities: EntityMap,
    /// One-time seed for the calibration factor, applied before any persisted value
    pub calibration_override: Option<f64>,
    pub update_interval_minutes: u32,
    pub external: ExternalConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            site: Site::default(),
            entities: EntityMap::default(),
            calibration_override: None,
            update_interval_minutes: DEFAULT_UPDATE_INTERVAL_MINUTES,
            external: ExternalConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Create configuration for a site
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            site: Site {
                latitude,
                longitude,
                elevation_m: 0.0,
            },
            ..Self::default()
        }
    }

    /// Parse configuration from JSON
    pub fn from_json(json: &str) -> Result<Self, ForecastError> {
        let config: Self = serde_json::from_str(json).map_err(|err| {
            log::error!("Configuration parse error: {}", err);
            ForecastError::MalformedConfig
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn elevation_m(mut self, elevation_m: f64) -> Self {
        self.site.elevation_m = elevation_m;
        self
    }

    pub fn pressure_entity(mut self, id: impl Into<String>) -> Self {
        self.entities.pressure = Some(id.into());
        self
    }

    pub fn wind_direction_entity(mut self, id: impl Into<String>) -> Self {
        self.entities.wind_direction = Some(id.into());
        self
    }

    pub fn wind_speed_entity(mut self, id: impl Into<String>) -> Self {
        self.entities.wind_speed = Some(id.into());
        self
    }

    pub fn wind_direction_historic_entity(mut self, id: impl Into<String>) -> Self {
        self.entities.wind_direction_historic = Some(id.into());
        self
    }

    pub fn pressure_change_entity(mut self, id: impl Into<String>) -> Self {
        self.entities.pressure_change = Some(id.into());
        self
    }

    pub fn cloud_cover_entity(mut self, id: impl Into<String>) -> Self {
        self.entities.cloud_cover = Some(id.into());
        self
    }

    pub fn rain_entity(mut self, id: impl Into<String>) -> Self {
        self.entities.rain = Some(id.into());
        self
    }

    pub fn temperature_entity(mut self, id: impl Into<String>) -> Self {
        self.entities.temperature = Some(id.into());
        self
    }

    pub fn humidity_entity(mut self, id: impl Into<String>) -> Self {
        self.entities.humidity = Some(id.into());
        self
    }

    pub fn dew_point_entity(mut self, id: impl Into<String>) -> Self {
        self.entities.dew_point = Some(id.into());
        self
    }

    /// Seed the calibration factor once at startup
    pub fn calibration_override(mut self, factor: f64) -> Self {
        self.calibration_override = Some(factor);
        self
    }

    /// Disable the external forecast source
    pub fn without_external(mut self) -> Self {
        self.external.enabled = false;
        self
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> Result<(), ForecastError> {
        let site = &self.site;
        if !site.latitude.is_finite() || !(-90.0..=90.0).contains(&site.latitude) {
            return Err(ForecastError::InvalidConfig { reason: "latitude outside [-90, 90]" });
        }
        if !site.longitude.is_finite() || !(-180.0..=180.0).contains(&site.longitude) {
            return Err(ForecastError::InvalidConfig { reason: "longitude outside [-180, 180]" });
        }
        if !site.elevation_m.is_finite() {
            return Err(ForecastError::InvalidConfig { reason: "elevation is not a number" });
        }
        if self.entities.pressure.is_none() {
            return Err(ForecastError::InvalidConfig { reason: "pressure entity is required" });
        }
        if self.entities.wind_direction.is_none() {
            return Err(ForecastError::InvalidConfig {
                reason: "wind direction entity is required",
            });
        }
        if self.update_interval_minutes == 0 {
            return Err(ForecastError::InvalidConfig { reason: "update interval must be positive" });
        }
        if let Some(factor) = self.calibration_override {
            if !factor.is_finite() || factor <= 0.0 {
                return Err(ForecastError::InvalidConfig {
                    reason: "calibration override must be positive",
                });
            }
        }
        Ok(())
    }
}
