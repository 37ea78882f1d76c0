//! Core traits for the forecast engine
//!
//! These traits are the seams between the engine and its host: where
//! readings come from, where calibration is stored, and how individual
//! readings are judged plausible. Keep them small. The host framework's
//! entity model never leaks past them.

use chrono::{DateTime, Duration, Utc};

use crate::angles::VectorAverage;
use crate::errors::ValidationResult;
use crate::observation::RawState;

/// Single reading with timestamp
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub value: f64,
    pub timestamp: DateTime<Utc>,
}

/// Read access to the host's sensor entities
///
/// Entities are referenced by the opaque ids given in the configuration.
/// Implementations answer from cached host state: the engine calls these
/// methods synchronously inside a cycle.
pub trait DataSource {
    /// Current state of an entity, or `None` if the entity does not exist
    fn read(&self, entity: &str) -> Option<RawState>;

    /// Most recent numeric value recorded at or before `now - lookback`
    fn history_at(&self, entity: &str, lookback: Duration, now: DateTime<Utc>) -> Option<f64>;

    /// Circular mean direction and scalar mean speed over `window` ending at `now`
    ///
    /// `speed_entity` is optional; without it every direction sample gets
    /// unit weight and the mean speed is `None`.
    fn vector_average(
        &self,
        direction_entity: &str,
        speed_entity: Option<&str>,
        window: Duration,
        now: DateTime<Utc>,
    ) -> Option<VectorAverage>;
}

/// Persistence of the site calibration factor across restarts
pub trait CalibrationStore {
    /// Error raised by the backing store
    type Error: core::fmt::Display;

    /// Load the persisted factor, `None` if nothing was ever saved
    fn load(&self) -> Result<Option<f64>, Self::Error>;

    /// Persist a new factor
    fn save(&self, factor: f64) -> Result<(), Self::Error>;
}

/// Core validator trait - implement this for each reading type
pub trait Validator {
    /// The type of value this validator handles
    type Value;

    /// Validate a single reading
    fn validate(&self, value: Self::Value) -> ValidationResult<()>;

    /// Plausible range for this validator
    fn constraints(&self) -> ValidatorConstraints;
}

/// Plausible range for a validator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatorConstraints {
    /// Minimum accepted value
    pub min_value: f64,
    /// Maximum accepted value
    pub max_value: f64,
}

/// Cross-validator for readings that constrain each other
pub trait CrossValidator {
    /// Input type (usually a tuple of readings)
    type Input;

    /// Validate readings from multiple sensors
    fn cross_validate(&self, inputs: Self::Input) -> ValidationResult<()>;
}

/// Trait for values that can be validated
pub trait Validatable {
    /// Check if the value is a usable number (not NaN or infinite)
    fn is_valid(&self) -> bool;
}

impl Validatable for f64 {
    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}
