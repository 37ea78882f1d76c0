//! External Forecast Series and Cache
//!
//! ## Overview
//!
//! An external numerical forecast (Open-Meteo or similar) supplies the
//! fields a barometer cannot: temperatures, hourly humidity, UV, and
//! anything beyond two days. The core never fetches it. A connector hands
//! over typed [`ExternalSeries`] snapshots and the [`ExternalCache`]
//! decides when the next refresh is due and how fresh the data is.
//!
//! ## Freshness
//!
//! ```text
//! age since last success   freshness
//! ------------------------------------
//! < stale_after            Fresh
//! ≥ stale_after            Stale  (still served, non-authoritative)
//! no success yet           none
//! ```
//!
//! A failed refresh never discards the last good snapshot. Failures are
//! counted until the next success, and a new attempt is due on every cycle
//! until then.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::condition::Condition;
use crate::config::ExternalConfig;

/// One hour of external forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyEntry {
    pub time: DateTime<Utc>,
    pub condition: Option<Condition>,
    pub temperature: Option<f64>,
    pub apparent_temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub dew_point: Option<f64>,
    pub cloud_cover: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_bearing: Option<f64>,
    pub wind_gust: Option<f64>,
    pub precipitation: Option<f64>,
    pub precipitation_probability: Option<u8>,
    pub uv_index: Option<f64>,
    pub is_day: Option<bool>,
}

impl HourlyEntry {
    /// Entry with only a timestamp
    pub fn at(time: DateTime<Utc>) -> Self {
        Self {
            time,
            condition: None,
            temperature: None,
            apparent_temperature: None,
            humidity: None,
            dew_point: None,
            cloud_cover: None,
            wind_speed: None,
            wind_bearing: None,
            wind_gust: None,
            precipitation: None,
            precipitation_probability: None,
            uv_index: None,
            is_day: None,
        }
    }
}

/// One day of external forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEntry {
    pub date: NaiveDate,
    pub condition: Option<Condition>,
    pub temperature_high: Option<f64>,
    pub temperature_low: Option<f64>,
    pub precipitation: Option<f64>,
    pub precipitation_probability: Option<u8>,
    pub wind_speed: Option<f64>,
    pub wind_bearing: Option<f64>,
    pub cloud_cover: Option<f64>,
    pub uv_index: Option<f64>,
}

impl DailyEntry {
    pub fn on(date: NaiveDate) -> Self {
        Self {
            date,
            condition: None,
            temperature_high: None,
            temperature_low: None,
            precipitation: None,
            precipitation_probability: None,
            wind_speed: None,
            wind_bearing: None,
            cloud_cover: None,
            uv_index: None,
        }
    }
}

/// A complete external forecast snapshot
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExternalSeries {
    pub current_cloud_cover: Option<f64>,
    /// Ordered by time
    pub hourly: Vec<HourlyEntry>,
    /// Ordered by date
    pub daily: Vec<DailyEntry>,
}

impl ExternalSeries {
    /// Hourly entry for the hour starting at `time`
    pub fn hour(&self, time: DateTime<Utc>) -> Option<&HourlyEntry> {
        self.hourly.iter().find(|h| h.time == time)
    }

    /// Daily entry for a calendar date
    pub fn day(&self, date: NaiveDate) -> Option<&DailyEntry> {
        self.daily.iter().find(|d| d.date == date)
    }
}

/// Age class of the cached snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Freshness {
    Fresh,
    Stale,
}

/// Borrowed view of the cached snapshot for one cycle
#[derive(Debug, Clone, Copy)]
pub struct ExternalView<'a> {
    pub series: &'a ExternalSeries,
    pub freshness: Freshness,
    pub fetched_at: DateTime<Utc>,
}

impl ExternalView<'_> {
    pub fn is_stale(&self) -> bool {
        self.freshness == Freshness::Stale
    }
}

/// Last successful external snapshot plus refresh bookkeeping
#[derive(Debug, Clone)]
pub struct ExternalCache {
    refresh_interval: Duration,
    stale_after: Duration,
    snapshot: Option<(ExternalSeries, DateTime<Utc>)>,
    consecutive_failures: u32,
}

impl ExternalCache {
    pub fn new(config: &ExternalConfig) -> Self {
        Self {
            refresh_interval: Duration::minutes(config.refresh_interval_minutes as i64),
            stale_after: Duration::minutes(config.stale_after_minutes as i64),
            snapshot: None,
            consecutive_failures: 0,
        }
    }

    /// Whether a refresh should be attempted now
    pub fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        match &self.snapshot {
            Some((_, fetched_at)) => {
                self.consecutive_failures > 0 || now - *fetched_at >= self.refresh_interval
            }
            None => true,
        }
    }

    /// Store a fresh snapshot
    pub fn record_success(&mut self, series: ExternalSeries, now: DateTime<Utc>) {
        if self.consecutive_failures > 0 {
            log::info!(
                "External forecast back online after {} failed attempts",
                self.consecutive_failures
            );
        }
        log::debug!(
            "External forecast refreshed: {} hourly, {} daily entries",
            series.hourly.len(),
            series.daily.len()
        );
        self.snapshot = Some((series, now));
        self.consecutive_failures = 0;
    }

    /// Count a failed refresh, keeping the previous snapshot
    pub fn record_failure(&mut self) -> u32 {
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        self.consecutive_failures
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    pub fn last_success(&self) -> Option<DateTime<Utc>> {
        self.snapshot.as_ref().map(|(_, t)| *t)
    }

    pub fn freshness(&self, now: DateTime<Utc>) -> Option<Freshness> {
        self.last_success().map(|fetched_at| {
            if now - fetched_at >= self.stale_after {
                Freshness::Stale
            } else {
                Freshness::Fresh
            }
        })
    }

    /// The cached snapshot with its freshness at `now`
    pub fn view(&self, now: DateTime<Utc>) -> Option<ExternalView<'_>> {
        let (series, fetched_at) = self.snapshot.as_ref()?;
        Some(ExternalView {
            series,
            freshness: self.freshness(now)?,
            fetched_at: *fetched_at,
        })
    }
}
