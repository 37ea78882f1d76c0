//! Time management for the forecast engine
//!
//! The engine never reads the wall clock itself. Every cycle receives `now`
//! explicitly, which keeps cycles reproducible in tests. Schedulers obtain
//! `now` from a [`TimeSource`]:
//! - System clock for production
//! - Fixed clock that tests advance by hand

use chrono::{DateTime, Duration, Utc};

/// Source of wall-clock time
pub trait TimeSource {
    /// Current instant in UTC
    fn now(&self) -> DateTime<Utc>;
}

/// System wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTime;

impl TimeSource for SystemTime {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fixed time source for testing
#[derive(Debug, Clone)]
pub struct FixedTime {
    instant: DateTime<Utc>,
}

impl FixedTime {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }

    pub fn set(&mut self, instant: DateTime<Utc>) {
        self.instant = instant;
    }

    pub fn advance(&mut self, by: Duration) {
        self.instant += by;
    }
}

impl TimeSource for FixedTime {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }
}

/// Truncate an instant to the start of its UTC hour
pub fn floor_to_hour(instant: DateTime<Utc>) -> DateTime<Utc> {
    let secs = instant.timestamp();
    DateTime::from_timestamp(secs - secs.rem_euclid(3600), 0).unwrap_or(instant)
}
