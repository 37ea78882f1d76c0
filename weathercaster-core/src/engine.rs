//! Forecast Engine
//!
//! ## Overview
//!
//! [`ForecastEngine`] runs one forecast cycle at a time. It owns every piece
//! of cross-cycle state: the calibration factor, the cached external
//! snapshot, the last known sensor values and the last good output.
//!
//! ```text
//! DataSource ─► SensorNormalizer ─► ObservationSet
//!                                        │
//!              ┌──────────── CloudModel ◄┤ (light sensors, calibration)
//!              ▼                         │
//!         SagerEngine ───────┐           ├─► Zambretti
//!              │             ▼           ▼
//!              │         cross-validation, reliability
//!              ▼
//!           blender ◄── ExternalCache
//!              │
//!              ▼
//!        ForecastState
//! ```
//!
//! ## Failure model
//!
//! Only the two required inputs (pressure and wind direction) can stop a
//! cycle. When they are missing the previous output is returned as
//! [`ForecastState::Retained`]; before the first good cycle the engine
//! reports [`ForecastState::InsufficientData`]. The first failing cycle logs
//! a warning, the first good cycle after that logs the recovery.
//!
//! ## External data
//!
//! The engine never performs I/O. A scheduler asks [`ForecastEngine::external_due`],
//! fetches, and hands the outcome to [`ForecastEngine::record_external`] or
//! [`ForecastEngine::record_external_failure`]. A failed refresh keeps the
//! previous snapshot.
//!
//! ## Example
//!
//! ```rust
//! use chrono::{Duration, TimeZone, Utc};
//! use weathercaster_core::config::EngineConfig;
//! use weathercaster_core::engine::ForecastEngine;
//! use weathercaster_core::memory::MemoryDataSource;
//!
//! let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
//! let config = EngineConfig::new(48.1, 11.6)
//!     .pressure_entity("sensor.pressure")
//!     .wind_direction_entity("sensor.wind_bearing")
//!     .without_external();
//! let mut engine = ForecastEngine::new(config).unwrap();
//!
//! let mut source = MemoryDataSource::new();
//! source.record("sensor.pressure", 1016.0, now - Duration::hours(6));
//! source.record("sensor.pressure", 1020.0, now);
//! source.record("sensor.wind_bearing", 300.0, now);
//!
//! let state = engine.compute(&source, now);
//! let output = state.output().unwrap();
//! assert_eq!(output.hourly.len(), 48);
//! assert_eq!(output.daily.len(), 7);
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::blend::{blend, BlendInput, CurrentConditions, DailyForecast, HourlyForecast};
use crate::cloud::{CalibrationState, CloudModel, CloudSource};
use crate::condition::Condition;
use crate::config::EngineConfig;
use crate::errors::{ForecastError, ForecastResultOf};
use crate::external::{ExternalCache, ExternalSeries, Freshness};
use crate::lookup::{forecast_text, Velocity};
use crate::normalizer::SensorNormalizer;
use crate::observation::ObservationSet;
use crate::sager::{CloudLevel, PressureTrend, SagerEngine, WindTrend};
use crate::scoring::{cross_validate, Agreement, Confidence, Reliability};
use crate::traits::{CalibrationStore, DataSource};
use crate::winds::named_wind;
use crate::zambretti;
use crate::zone::LatitudeZone;

/// Headline forecast of one cycle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastResult {
    /// Four character table key, e.g. `N331`
    pub key: String,
    /// Forecast letter with shower/flurry suffix
    pub forecast_code: String,
    pub forecast_text: Option<String>,
    /// Table entry used, e.g. `aU6`
    pub table_code: String,
    pub table_hit: bool,
    pub condition: Condition,
    pub wind_velocity: Velocity,
    /// Forecast wind direction category, e.g. `sw_or_w`
    pub wind_direction: String,
    pub wind_trend: WindTrend,
    pub pressure_level: u8,
    pub pressure_trend: PressureTrend,
    pub cloud_level: CloudLevel,
    pub confidence: Confidence,
    pub cross_validation: Agreement,
    pub zambretti_condition: Condition,
    /// Zambretti letter A..Z
    pub zambretti_code: char,
    pub zambretti_text: String,
    pub latitude_zone: LatitudeZone,
    /// Traditional name of the current wind, `None` when calm
    pub named_wind: Option<String>,
}

/// Cloud cover used for this cycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CloudReport {
    pub cover_pct: f64,
    /// `None` when the value came from the external source's current cover
    pub source: Option<CloudSource>,
}

/// Calibration state after this cycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalibrationReport {
    pub factor: f64,
    pub updates: u32,
    /// Whether this cycle changed the factor (the caller should persist it)
    pub updated_this_cycle: bool,
}

/// Everything one good cycle produces
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastOutput {
    pub computed_at: DateTime<Utc>,
    pub result: ForecastResult,
    pub daily: Vec<DailyForecast>,
    pub hourly: Vec<HourlyForecast>,
    pub reliability: Reliability,
    pub cloud: Option<CloudReport>,
    pub calibration: CalibrationReport,
    /// Freshness of the external snapshot used, `None` without one
    pub external: Option<Freshness>,
}

/// Outcome of a cycle
#[derive(Debug, Clone, PartialEq)]
pub enum ForecastState {
    /// Computed this cycle
    Fresh(ForecastOutput),
    /// Required input missing, previous output served
    Retained {
        output: ForecastOutput,
        reason: ForecastError,
    },
    /// Required input missing and nothing to fall back on
    InsufficientData(ForecastError),
}

impl ForecastState {
    /// Output to present, fresh or retained
    pub fn output(&self) -> Option<&ForecastOutput> {
        match self {
            ForecastState::Fresh(output) | ForecastState::Retained { output, .. } => Some(output),
            ForecastState::InsufficientData(_) => None,
        }
    }

    pub fn is_fresh(&self) -> bool {
        matches!(self, ForecastState::Fresh(_))
    }
}

/// Stateful forecast engine for one site
#[derive(Debug, Clone)]
pub struct ForecastEngine {
    config: EngineConfig,
    normalizer: SensorNormalizer,
    clouds: CloudModel,
    sager: SagerEngine,
    external: ExternalCache,
    last_known: CurrentConditions,
    last_output: Option<ForecastOutput>,
    failing: bool,
}

impl ForecastEngine {
    /// Engine with the configured calibration override, or 1.0
    pub fn new(config: EngineConfig) -> ForecastResultOf<Self> {
        let calibration = CalibrationState::restore(None, config.calibration_override);
        Self::with_calibration(config, calibration)
    }

    /// Engine seeded from a calibration store
    ///
    /// A persisted factor wins over the configured override. A store that
    /// fails to load is logged and treated as empty.
    pub fn with_store<C: CalibrationStore>(config: EngineConfig, store: &C) -> ForecastResultOf<Self> {
        let persisted = match store.load() {
            Ok(factor) => factor,
            Err(err) => {
                log::warn!("Could not load calibration, starting fresh: {}", err);
                None
            }
        };
        let calibration = CalibrationState::restore(persisted, config.calibration_override);
        Self::with_calibration(config, calibration)
    }

    fn with_calibration(config: EngineConfig, calibration: CalibrationState) -> ForecastResultOf<Self> {
        config.validate()?;
        let zone = LatitudeZone::from_latitude(config.site.latitude);
        log::info!(
            "Forecast engine for {:.2}, {:.2} in zone {} (calibration {:.3})",
            config.site.latitude,
            config.site.longitude,
            zone.name(),
            calibration.factor()
        );
        Ok(Self {
            normalizer: SensorNormalizer::new(),
            clouds: CloudModel::with_calibration(config.site, calibration),
            sager: SagerEngine::new(zone),
            external: ExternalCache::new(&config.external),
            last_known: CurrentConditions::default(),
            last_output: None,
            failing: false,
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn zone(&self) -> LatitudeZone {
        self.sager.zone()
    }

    pub fn calibration(&self) -> CalibrationState {
        self.clouds.calibration()
    }

    pub fn last_output(&self) -> Option<&ForecastOutput> {
        self.last_output.as_ref()
    }

    pub fn external_cache(&self) -> &ExternalCache {
        &self.external
    }

    /// Whether the external source should be fetched now
    pub fn external_due(&self, now: DateTime<Utc>) -> bool {
        self.config.external.enabled && self.external.needs_refresh(now)
    }

    /// Store a fetched external snapshot
    pub fn record_external(&mut self, series: ExternalSeries, now: DateTime<Utc>) {
        self.external.record_success(series, now);
    }

    /// Count a failed external refresh; returns the consecutive failure count
    pub fn record_external_failure(&mut self) -> u32 {
        let failures = self.external.record_failure();
        log::warn!("External forecast refresh failed (attempt {})", failures);
        failures
    }

    /// Run one forecast cycle
    pub fn compute<S: DataSource + ?Sized>(&mut self, source: &S, now: DateTime<Utc>) -> ForecastState {
        match self.evaluate(source, now) {
            Ok(output) => {
                if self.failing {
                    log::info!("Required sensors back online, forecast resumed");
                    self.failing = false;
                }
                self.last_output = Some(output.clone());
                ForecastState::Fresh(output)
            }
            Err(reason) => {
                if !self.failing {
                    log::warn!("Forecast not computed: {}", reason);
                    self.failing = true;
                }
                match &self.last_output {
                    Some(output) => ForecastState::Retained {
                        output: output.clone(),
                        reason,
                    },
                    None => ForecastState::InsufficientData(reason),
                }
            }
        }
    }

    fn evaluate<S: DataSource + ?Sized>(
        &mut self,
        source: &S,
        now: DateTime<Utc>,
    ) -> ForecastResultOf<ForecastOutput> {
        let obs = self.normalizer.collect(&self.config.entities, source, now);
        // Required inputs are checked before the cloud model can touch calibration
        let pressure = obs
            .pressure
            .value()
            .ok_or(ForecastError::InsufficientData { missing: "pressure" })?;
        if obs.wind_direction.value().is_none() {
            return Err(ForecastError::InsufficientData { missing: "wind direction" });
        }
        let site = self.config.site;
        let external = if self.config.external.enabled {
            self.external.view(now)
        } else {
            None
        };
        let external_cloud = external.and_then(|v| v.series.current_cloud_cover);

        let mut calibration_updated = false;
        let cloud = match obs.cloud.value() {
            Some(input) => {
                let estimate = self.clouds.estimate(input, &obs, external_cloud, now);
                calibration_updated = estimate.calibration_updated;
                Some(CloudReport {
                    cover_pct: estimate.cover_pct,
                    source: Some(estimate.source),
                })
            }
            None => external_cloud.map(|cover| CloudReport {
                cover_pct: cover.clamp(0.0, 100.0),
                source: None,
            }),
        };
        let cloud_pct = cloud.map(|c| c.cover_pct);

        let sager = self.sager.forecast(&obs, cloud_pct)?;
        let zambretti = zambretti::forecast(
            pressure,
            obs.pressure_change_6h.value(),
            obs.wind_direction.value(),
            self.sager.zone(),
            now,
        );
        let validation = cross_validate(sager.condition, zambretti.condition, sager.confidence);
        log::debug!(
            "Sager {} -> {} ({}), Zambretti {} ({}), {}",
            sager.key,
            sager.code.table_code(),
            sager.condition,
            zambretti.letter,
            zambretti.condition,
            validation.agreement.as_str()
        );

        remember(&mut self.last_known, &obs, cloud_pct);

        let (daily, hourly) = blend(&BlendInput {
            now,
            site,
            sager: &sager,
            current: self.last_known,
            external,
        });

        let calibration = self.clouds.calibration();
        let result = ForecastResult {
            key: sager.key.to_string(),
            forecast_text: sager
                .forecast_code
                .chars()
                .next()
                .and_then(forecast_text)
                .map(str::to_string),
            forecast_code: sager.forecast_code.clone(),
            table_code: sager.code.table_code(),
            table_hit: sager.table_hit,
            condition: sager.condition,
            wind_velocity: sager.velocity(),
            wind_direction: sager.direction_key.clone(),
            wind_trend: sager.wind_trend,
            pressure_level: sager.key.pressure_level,
            pressure_trend: sager.pressure_trend,
            cloud_level: sager.cloud_level,
            confidence: validation.confidence,
            cross_validation: validation.agreement,
            zambretti_condition: zambretti.condition,
            zambretti_code: zambretti.letter,
            zambretti_text: zambretti.text.to_string(),
            latitude_zone: self.sager.zone(),
            named_wind: sager
                .wind_cardinal
                .map(|cardinal| named_wind(site.latitude, site.longitude, cardinal)),
        };

        Ok(ForecastOutput {
            computed_at: now,
            result,
            daily,
            hourly,
            reliability: Reliability::from_observations(&obs),
            cloud,
            calibration: CalibrationReport {
                factor: calibration.factor(),
                updates: calibration.updates(),
                updated_this_cycle: calibration_updated,
            },
            external: external.map(|v| v.freshness),
        })
    }
}

/// Carry live values forward for cycles where a sensor is silent
fn remember(known: &mut CurrentConditions, obs: &ObservationSet, cloud_pct: Option<f64>) {
    known.temperature = obs.temperature.value().or(known.temperature);
    known.humidity = obs.humidity.value().or(known.humidity);
    known.cloud_cover = cloud_pct.or(known.cloud_cover);
    known.wind_speed = obs.wind_speed.value().or(known.wind_speed);
    known.wind_bearing = obs.wind_direction.value().or(known.wind_bearing);
}
