//! Refresh Coordinator
//!
//! Drives a [`ForecastEngine`] on its update cadence:
//!
//! ```text
//! tick ─► external due? ─► fetch ─► record success / failure
//!      └► read lock on data source ─► engine.compute ─► publish
//!                                                   └► calibration changed? ─► save (blocking task)
//! ```
//!
//! The data source lock is only held for the synchronous compute, never
//! across a network fetch.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use weathercaster_core::time::TimeSource;
use weathercaster_core::{CalibrationStore, DataSource, ForecastEngine, ForecastState};

use crate::{ExternalSource, FetchStats};

/// Schedules forecast cycles, external refreshes and calibration saves
pub struct Coordinator<E, C> {
    engine: ForecastEngine,
    external: Option<E>,
    store: Option<C>,
    stats: FetchStats,
    pending_save: Option<JoinHandle<()>>,
}

impl<E, C> Coordinator<E, C>
where
    E: ExternalSource,
    C: CalibrationStore + Clone + Send + 'static,
{
    pub fn new(engine: ForecastEngine, external: Option<E>, store: Option<C>) -> Self {
        Self {
            engine,
            external,
            store,
            stats: FetchStats::default(),
            pending_save: None,
        }
    }

    pub fn engine(&self) -> &ForecastEngine {
        &self.engine
    }

    pub fn stats(&self) -> &FetchStats {
        &self.stats
    }

    /// Fetch the external forecast if it is due
    ///
    /// Returns whether a fetch was attempted. Failures are absorbed: the
    /// previous snapshot stays in the engine and ages towards stale.
    pub async fn refresh_external(&mut self, now: DateTime<Utc>) -> bool {
        let Some(source) = self.external.as_ref() else {
            return false;
        };
        if !self.engine.external_due(now) {
            return false;
        }

        match source.fetch().await {
            Ok(series) => {
                self.stats.fetched += 1;
                self.engine.record_external(series, now);
            }
            Err(err) => {
                self.stats.failed += 1;
                log::debug!("{} fetch failed: {}", source.name(), err);
                self.stats.last_error = Some(err.to_string());
                self.engine.record_external_failure();
            }
        }
        true
    }

    /// Run the engine once and persist a changed calibration factor
    ///
    /// Inside a Tokio runtime the save runs on a blocking task; outside one
    /// it runs inline.
    pub fn compute<S: DataSource + ?Sized>(&mut self, source: &S, now: DateTime<Utc>) -> ForecastState {
        let state = self.engine.compute(source, now);
        if let ForecastState::Fresh(output) = &state {
            if output.calibration.updated_this_cycle {
                self.persist(output.calibration.factor);
            }
        }
        state
    }

    /// Refresh then compute
    pub async fn cycle<S: DataSource + Sync + ?Sized>(&mut self, source: &S, now: DateTime<Utc>) -> ForecastState {
        self.refresh_external(now).await;
        self.compute(source, now)
    }

    /// Wait for an outstanding calibration save
    pub async fn flush(&mut self) {
        if let Some(handle) = self.pending_save.take() {
            if let Err(err) = handle.await {
                log::warn!("Calibration save task failed: {}", err);
            }
        }
    }

    fn persist(&mut self, factor: f64) {
        let Some(store) = self.store.clone() else {
            return;
        };
        if tokio::runtime::Handle::try_current().is_err() {
            if let Err(err) = store.save(factor) {
                log::warn!("Could not save calibration factor {:.4}: {}", factor, err);
            }
            return;
        }
        // Saves are ordered: a newer factor never lands before an older one
        let previous = self.pending_save.take();
        self.pending_save = Some(tokio::spawn(async move {
            if let Some(handle) = previous {
                if let Err(err) = handle.await {
                    log::warn!("Previous calibration save task failed: {}", err);
                }
            }
            let outcome = tokio::task::spawn_blocking(move || {
                store.save(factor).map_err(|err| err.to_string())
            })
            .await;
            match outcome {
                Ok(Ok(())) => {}
                Ok(Err(err)) => log::warn!("Could not save calibration factor {:.4}: {}", factor, err),
                Err(err) => log::warn!("Calibration save task failed: {}", err),
            }
        }));
    }

    /// Tick forever, publishing every cycle's state
    ///
    /// Stops once every receiver of `updates` has been dropped.
    pub async fn run<S, T>(
        mut self,
        source: Arc<RwLock<S>>,
        clock: T,
        updates: watch::Sender<Option<ForecastState>>,
    ) where
        S: DataSource + Send + Sync + 'static,
        T: TimeSource + Send + Sync,
    {
        let minutes = u64::from(self.engine.config().update_interval_minutes.max(1));
        let mut ticker = tokio::time::interval(Duration::from_secs(minutes * 60));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let now = clock.now();
            self.refresh_external(now).await;

            let state = {
                let guard = source.read().await;
                self.compute(&*guard, now)
            };

            if updates.send(Some(state)).is_err() {
                log::info!("No forecast subscribers left, coordinator stopping");
                break;
            }
        }

        self.flush().await;
    }
}
