//! In-Memory Data Source
//!
//! ## Overview
//!
//! [`MemoryDataSource`] keeps the current state and a bounded sample
//! history for each entity in process memory. It is the reference
//! implementation of [`DataSource`]. Embedders that receive readings by
//! push (MQTT, a serial link, a test fixture) record them here and hand the
//! source to the engine.
//!
//! ## History Semantics
//!
//! - `history_at(entity, 6h, now)` returns the newest sample taken at or
//!   before `now - 6h`. A history that starts later than that returns `None`,
//!   which the engine reports as a missing trend.
//! - `vector_average` uses direction samples inside `[now - window, now]`.
//!   Each direction is weighted by the wind speed recorded at or before it,
//!   when a speed entity is given. If every weight is zero (dead calm for the
//!   whole window) the directions are averaged with unit weight instead.
//!
//! ## Example
//!
//! ```rust
//! use chrono::{Duration, TimeZone, Utc};
//! use weathercaster_core::memory::MemoryDataSource;
//! use weathercaster_core::traits::DataSource;
//!
//! let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
//! let mut source = MemoryDataSource::new();
//! source.record("sensor.wind_dir", 350.0, now - Duration::minutes(5));
//! source.record("sensor.wind_dir", 10.0, now);
//!
//! let avg = source
//!     .vector_average("sensor.wind_dir", None, Duration::minutes(10), now)
//!     .unwrap();
//! assert!(avg.direction < 0.5 || avg.direction > 359.5);
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::angles::{circular_mean, VectorAverage};
use crate::buffer::CircularBuffer;
use crate::observation::{RawState, RawValue};
use crate::traits::{DataSource, Sample};

/// Samples retained per entity
pub const HISTORY_CAPACITY: usize = 512;

#[derive(Clone)]
struct EntityRecord {
    state: RawState,
    samples: CircularBuffer<HISTORY_CAPACITY>,
}

impl EntityRecord {
    fn new(state: RawState) -> Self {
        Self {
            state,
            samples: CircularBuffer::new(),
        }
    }
}

/// Data source backed by in-memory entity records
#[derive(Clone, Default)]
pub struct MemoryDataSource {
    entities: HashMap<String, EntityRecord>,
}

impl MemoryDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current state of an entity without recording history
    ///
    /// Use this for non-numeric states (`on`/`off`, `unavailable`) and for
    /// setting the unit tag.
    pub fn set_state(&mut self, entity: &str, state: RawState) {
        match self.entities.get_mut(entity) {
            Some(record) => record.state = state,
            None => {
                self.entities.insert(entity.to_string(), EntityRecord::new(state));
            }
        }
    }

    /// Record a numeric sample and make it the current state
    ///
    /// The entity's unit tag, if any, is kept.
    pub fn record(&mut self, entity: &str, value: f64, timestamp: DateTime<Utc>) {
        let record = self
            .entities
            .entry(entity.to_string())
            .or_insert_with(|| EntityRecord::new(RawState::number(value)));
        record.state.value = RawValue::Number(value);
        record.samples.push(Sample { value, timestamp });
    }

    /// Forget an entity entirely
    pub fn remove(&mut self, entity: &str) {
        self.entities.remove(entity);
    }

    /// Number of history samples held for an entity
    pub fn sample_count(&self, entity: &str) -> usize {
        self.entities.get(entity).map(|r| r.samples.len()).unwrap_or(0)
    }
}

impl DataSource for MemoryDataSource {
    fn read(&self, entity: &str) -> Option<RawState> {
        self.entities.get(entity).map(|r| r.state.clone())
    }

    fn history_at(&self, entity: &str, lookback: Duration, now: DateTime<Utc>) -> Option<f64> {
        self.entities
            .get(entity)?
            .samples
            .at_or_before(now - lookback)
            .map(|s| s.value)
    }

    fn vector_average(
        &self,
        direction_entity: &str,
        speed_entity: Option<&str>,
        window: Duration,
        now: DateTime<Utc>,
    ) -> Option<VectorAverage> {
        let since = now - window;
        let directions: Vec<&Sample> = self
            .entities
            .get(direction_entity)?
            .samples
            .window(since, now)
            .collect();
        if directions.is_empty() {
            return None;
        }

        let speeds = speed_entity.and_then(|id| self.entities.get(id));

        let weights: Vec<f64> = directions
            .iter()
            .map(|d| {
                speeds
                    .and_then(|r| r.samples.at_or_before(d.timestamp))
                    .map(|s| s.value.max(0.0))
                    .unwrap_or(1.0)
            })
            .collect();
        let all_calm = weights.iter().all(|w| *w == 0.0);

        let direction = circular_mean(
            directions
                .iter()
                .zip(weights.iter())
                .map(|(d, w)| (d.value, if all_calm { 1.0 } else { *w })),
        )?;

        let speed = speeds.and_then(|r| {
            let window: Vec<f64> = r.samples.window(since, now).map(|s| s.value).collect();
            if window.is_empty() {
                None
            } else {
                Some(window.iter().sum::<f64>() / window.len() as f64)
            }
        });

        Some(VectorAverage { direction, speed })
    }
}
