//! Shared fixtures for integration tests
//!
//! Builds in-memory stations with a six hour history so every trend input
//! is available, plus engine configurations for a few reference sites.

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};

use weathercaster_core::config::EngineConfig;
use weathercaster_core::memory::MemoryDataSource;
use weathercaster_core::observation::RawState;

pub const PRESSURE: &str = "sensor.pressure";
pub const WIND_DIRECTION: &str = "sensor.wind_bearing";
pub const WIND_SPEED: &str = "sensor.wind_speed";
pub const CLOUD: &str = "sensor.cloud";
pub const TEMPERATURE: &str = "sensor.temperature";
pub const HUMIDITY: &str = "sensor.humidity";
pub const RAIN: &str = "sensor.rain";

/// Milan, northern temperate
pub const MILAN: (f64, f64) = (45.46, 9.19);
/// Cape Town, southern temperate
pub const CAPE_TOWN: (f64, f64) = (-33.92, 18.42);

/// Late morning, early June
pub fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 9, 20, 0).unwrap()
}

/// Readings for one station, six hours apart
#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    pub pressure_6h: f64,
    pub pressure: f64,
    pub wind_direction_6h: f64,
    pub wind_direction: f64,
    pub wind_speed: f64,
    pub cloud_pct: Option<f64>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
}

impl Scenario {
    /// 1013 hPa, -1 hPa in 6 h, wind 180° -> 190°, 20 % cloud
    pub fn reference() -> Self {
        Self {
            pressure_6h: 1014.0,
            pressure: 1013.0,
            wind_direction_6h: 180.0,
            wind_direction: 190.0,
            wind_speed: 12.0,
            cloud_pct: Some(20.0),
            temperature: Some(18.0),
            humidity: Some(60.0),
        }
    }

    /// Populate a data source with this scenario ending at `now`
    pub fn source(&self, now: DateTime<Utc>) -> MemoryDataSource {
        let mut source = MemoryDataSource::new();
        let then = now - Duration::hours(6);

        source.record(PRESSURE, self.pressure_6h, then);
        source.record(PRESSURE, self.pressure, now);
        source.record(WIND_DIRECTION, self.wind_direction_6h, then);
        source.record(WIND_DIRECTION, self.wind_direction, now);
        source.record(WIND_SPEED, self.wind_speed, now);
        if let Some(cloud) = self.cloud_pct {
            source.set_state(CLOUD, RawState::number(cloud).with_unit("%"));
        }
        if let Some(t) = self.temperature {
            source.record(TEMPERATURE, t, now);
        }
        if let Some(rh) = self.humidity {
            source.record(HUMIDITY, rh, now);
        }
        source
    }
}

/// Configuration with every scenario entity wired, no external source
pub fn config_at((latitude, longitude): (f64, f64)) -> EngineConfig {
    EngineConfig::new(latitude, longitude)
        .pressure_entity(PRESSURE)
        .wind_direction_entity(WIND_DIRECTION)
        .wind_speed_entity(WIND_SPEED)
        .cloud_cover_entity(CLOUD)
        .temperature_entity(TEMPERATURE)
        .humidity_entity(HUMIDITY)
        .without_external()
}
