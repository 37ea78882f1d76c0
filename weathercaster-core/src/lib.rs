//! Core forecast engine for Weathercaster
//!
//! Turns a handful of local sensor readings into a short-range forecast
//! with the Sager weathercaster method, cross-checked by Zambretti and
//! enriched with a physical cloud-cover model.
//!
//! Key properties:
//! - Missing sensors degrade the forecast, they never fail it (except
//!   pressure and wind direction)
//! - All tables are static and loaded once
//! - No I/O: readings come through [`DataSource`], calibration persistence
//!   through [`CalibrationStore`]
//!
//! ```no_run
//! use chrono::Utc;
//! use weathercaster_core::{EngineConfig, ForecastEngine, ForecastState};
//! use weathercaster_core::memory::MemoryDataSource;
//!
//! let config = EngineConfig::new(51.5, -0.1)
//!     .pressure_entity("sensor.pressure")
//!     .wind_direction_entity("sensor.wind_bearing");
//! let mut engine = ForecastEngine::new(config).unwrap();
//! let source = MemoryDataSource::new();
//!
//! match engine.compute(&source, Utc::now()) {
//!     ForecastState::Fresh(output) => println!("{}", output.result.forecast_code),
//!     ForecastState::Retained { reason, .. } => println!("stale: {}", reason),
//!     ForecastState::InsufficientData(reason) => println!("no forecast: {}", reason),
//! }
//! ```

#![deny(unsafe_code)]

pub mod angles;
pub mod blend;
pub mod buffer;
pub mod cloud;
pub mod condition;
pub mod config;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod external;
pub mod lookup;
#[cfg(feature = "memory-source")]
pub mod memory;
pub mod normalizer;
pub mod observation;
pub mod sager;
pub mod scoring;
pub mod solar;
pub mod time;
pub mod traits;
pub mod validators;
pub mod winds;
pub mod zambretti;
pub mod zone;

// Public API
pub use condition::{CoarseCondition, Condition};
pub use config::{EngineConfig, EntityMap, ExternalConfig, Site};
pub use engine::{ForecastEngine, ForecastOutput, ForecastResult, ForecastState};
pub use errors::{ForecastError, ValidationError, ValidationResult};
pub use external::{DailyEntry, ExternalSeries, Freshness, HourlyEntry};
pub use observation::{ObservationSet, RawState, RawValue, Reading};
pub use traits::{CalibrationStore, DataSource};
pub use zone::LatitudeZone;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
