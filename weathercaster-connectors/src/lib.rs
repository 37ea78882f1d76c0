//! I/O Edge for the Weathercaster Engine
//!
//! ## Overview
//!
//! The core engine is synchronous and never touches the network or the
//! filesystem. This crate supplies the collaborators it needs at run time:
//!
//! - **External forecast sources** behind the [`ExternalSource`] trait, with
//!   an Open-Meteo client (feature `http`).
//! - **Calibration persistence** through [`store::JsonFileStore`], an
//!   implementation of the core `CalibrationStore` trait.
//! - **Scheduling** through [`coordinator::Coordinator`], which ticks the
//!   engine on its cadence, refreshes the external source on a slower one
//!   and hands calibration saves to a blocking task.
//!
//! ## Failure Handling
//!
//! ```text
//! fetch ok     ─► snapshot replaced, failure count reset
//! fetch failed ─► previous snapshot kept (stale after 2 h), retried next cycle
//! save failed  ─► logged, the in-memory factor stays authoritative
//! ```
//!
//! Retries inside a single fetch use exponential backoff:
//! ```text
//! retry_delay = base * 2^attempt
//! ```
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use tokio::sync::{watch, RwLock};
//! use weathercaster_connectors::coordinator::Coordinator;
//! use weathercaster_connectors::open_meteo::{OpenMeteoClient, OpenMeteoConfig};
//! use weathercaster_connectors::store::JsonFileStore;
//! use weathercaster_core::memory::MemoryDataSource;
//! use weathercaster_core::time::SystemTime;
//! use weathercaster_core::{EngineConfig, ForecastEngine};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = EngineConfig::new(45.46, 9.19)
//!     .pressure_entity("sensor.pressure")
//!     .wind_direction_entity("sensor.wind_bearing");
//! let store = JsonFileStore::new("/var/lib/weathercaster/calibration.json");
//! let engine = ForecastEngine::with_store(config, &store)?;
//! let client = OpenMeteoClient::new(OpenMeteoConfig::new(45.46, 9.19))?;
//!
//! let source = Arc::new(RwLock::new(MemoryDataSource::new()));
//! let (tx, mut rx) = watch::channel(None);
//! let coordinator = Coordinator::new(engine, Some(client), Some(store));
//! tokio::spawn(coordinator.run(source, SystemTime, tx));
//!
//! while rx.changed().await.is_ok() {
//!     if let Some(state) = rx.borrow().as_ref() {
//!         println!("{:?}", state.output().map(|o| &o.result.forecast_code));
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod coordinator;
pub mod open_meteo;
pub mod store;

use thiserror::Error;
use weathercaster_core::ExternalSeries;

pub use coordinator::Coordinator;
#[cfg(feature = "http")]
pub use open_meteo::OpenMeteoClient;
pub use open_meteo::{parse_response, wmo_condition, OpenMeteoConfig};
pub use store::JsonFileStore;

/// Common connector errors
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// Network or transport failure
    #[error("Request failed: {0}")]
    Request(String),

    /// Server answered with an error status
    #[error("Server error {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body could not be understood
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Timeout")]
    Timeout,

    /// Calibration file could not be read or written
    #[error("Store error: {0}")]
    Store(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Provider of external forecast snapshots
#[async_trait::async_trait]
pub trait ExternalSource: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &str;

    /// Fetch a complete snapshot
    async fn fetch(&self) -> Result<ExternalSeries, ConnectorError>;
}

/// Refresh statistics of an external source
#[derive(Debug, Default, Clone)]
pub struct FetchStats {
    /// Successful fetches
    pub fetched: u64,
    /// Failed fetches
    pub failed: u64,
    /// Last error message
    pub last_error: Option<String>,
}
