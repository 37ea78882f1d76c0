//! Open-Meteo External Source
//!
//! ## Overview
//!
//! Open-Meteo serves free hourly and daily numerical forecasts as columnar
//! JSON: one array per variable, aligned with a `time` array.
//!
//! ```json
//! {
//!   "utc_offset_seconds": 0,
//!   "current": { "cloud_cover": 37 },
//!   "hourly": { "time": ["2024-06-01T00:00", ...], "temperature_2m": [14.2, ...] },
//!   "daily":  { "time": ["2024-06-01", ...], "weather_code": [3, ...] }
//! }
//! ```
//!
//! Parsing is separate from fetching so that it works (and is tested)
//! without the `http` feature. Missing arrays, short arrays and `null`
//! slots all become `None` on the entry; only a missing or malformed
//! `time` value is an error.
//!
//! ## Weather codes
//!
//! WMO code groups are mapped onto the condition vocabulary:
//!
//! | WMO          | Condition         |
//! |--------------|-------------------|
//! | 0            | sunny             |
//! | 1, 2         | partlycloudy      |
//! | 3            | cloudy            |
//! | 45, 48       | fog               |
//! | 51-63, 80-81 | rainy             |
//! | 65, 82       | pouring           |
//! | 56, 57, 66, 67 | snowy-rainy     |
//! | 71-77, 85, 86 | snowy            |
//! | 95           | lightning-rainy   |
//! | 96, 99       | hail              |

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;

use weathercaster_core::external::{DailyEntry, ExternalSeries, HourlyEntry};
use weathercaster_core::Condition;

use crate::ConnectorError;

/// Forecast endpoint
pub const OPEN_METEO_API_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Hourly variables requested
pub const HOURLY_PARAMS: &[&str] = &[
    "temperature_2m",
    "relative_humidity_2m",
    "dew_point_2m",
    "apparent_temperature",
    "precipitation_probability",
    "precipitation",
    "weather_code",
    "cloud_cover",
    "wind_speed_10m",
    "wind_direction_10m",
    "wind_gusts_10m",
    "uv_index",
    "is_day",
];

/// Daily variables requested
pub const DAILY_PARAMS: &[&str] = &[
    "weather_code",
    "temperature_2m_max",
    "temperature_2m_min",
    "precipitation_sum",
    "precipitation_probability_max",
    "wind_speed_10m_max",
    "wind_direction_10m_dominant",
    "cloud_cover_mean",
    "uv_index_max",
];

/// Condition for a WMO weather code
pub fn wmo_condition(code: u8) -> Option<Condition> {
    Some(match code {
        0 => Condition::Sunny,
        1 | 2 => Condition::PartlyCloudy,
        3 => Condition::Cloudy,
        45 | 48 => Condition::Fog,
        51 | 53 | 55 | 61 | 63 | 80 | 81 => Condition::Rainy,
        65 | 82 => Condition::Pouring,
        56 | 57 | 66 | 67 => Condition::SnowyRainy,
        71 | 73 | 75 | 77 | 85 | 86 => Condition::Snowy,
        95 => Condition::LightningRainy,
        96 | 99 => Condition::Hail,
        _ => return None,
    })
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct OpenMeteoConfig {
    pub latitude: f64,
    pub longitude: f64,
    pub base_url: String,
    pub timeout: std::time::Duration,
    /// Retries after the first attempt
    pub max_retries: u32,
    pub forecast_days: u8,
    /// Delay before the first retry, doubled on each further retry
    pub backoff_base: std::time::Duration,
}

impl OpenMeteoConfig {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            base_url: OPEN_METEO_API_URL.to_string(),
            timeout: std::time::Duration::from_secs(10),
            max_retries: 2,
            forecast_days: 7,
            backoff_base: std::time::Duration::from_millis(500),
        }
    }

    /// Point the client at another server (mirrors, tests)
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = std::time::Duration::from_secs(secs);
        self
    }

    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    pub fn forecast_days(mut self, days: u8) -> Self {
        self.forecast_days = days;
        self
    }

    pub fn backoff_base_ms(mut self, millis: u64) -> Self {
        self.backoff_base = std::time::Duration::from_millis(millis);
        self
    }

    /// Query string parameters for one request
    pub fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("latitude", self.latitude.to_string()),
            ("longitude", self.longitude.to_string()),
            ("hourly", HOURLY_PARAMS.join(",")),
            ("daily", DAILY_PARAMS.join(",")),
            ("current", "cloud_cover".to_string()),
            ("timezone", "GMT".to_string()),
            ("wind_speed_unit", "kmh".to_string()),
            ("forecast_days", self.forecast_days.to_string()),
        ]
    }

    /// Delay before retry number `attempt` (1-based)
    pub fn backoff(&self, attempt: u32) -> std::time::Duration {
        self.backoff_base * (1u32 << attempt.saturating_sub(1).min(10))
    }
}

#[derive(Debug, Deserialize)]
struct RawResponse {
    #[serde(default)]
    utc_offset_seconds: i64,
    #[serde(default)]
    current: Option<RawCurrent>,
    #[serde(default)]
    hourly: Option<RawHourly>,
    #[serde(default)]
    daily: Option<RawDaily>,
}

#[derive(Debug, Deserialize)]
struct RawCurrent {
    #[serde(default)]
    cloud_cover: Option<f64>,
}

type Column = Vec<Option<f64>>;

#[derive(Debug, Deserialize)]
struct RawHourly {
    time: Vec<String>,
    #[serde(default)]
    temperature_2m: Column,
    #[serde(default)]
    relative_humidity_2m: Column,
    #[serde(default)]
    dew_point_2m: Column,
    #[serde(default)]
    apparent_temperature: Column,
    #[serde(default)]
    precipitation_probability: Column,
    #[serde(default)]
    precipitation: Column,
    #[serde(default)]
    weather_code: Column,
    #[serde(default)]
    cloud_cover: Column,
    #[serde(default)]
    wind_speed_10m: Column,
    #[serde(default)]
    wind_direction_10m: Column,
    #[serde(default)]
    wind_gusts_10m: Column,
    #[serde(default)]
    uv_index: Column,
    #[serde(default)]
    is_day: Column,
}

#[derive(Debug, Deserialize)]
struct RawDaily {
    time: Vec<String>,
    #[serde(default)]
    weather_code: Column,
    #[serde(default)]
    temperature_2m_max: Column,
    #[serde(default)]
    temperature_2m_min: Column,
    #[serde(default)]
    precipitation_sum: Column,
    #[serde(default)]
    precipitation_probability_max: Column,
    #[serde(default)]
    wind_speed_10m_max: Column,
    #[serde(default)]
    wind_direction_10m_dominant: Column,
    #[serde(default)]
    cloud_cover_mean: Column,
    #[serde(default)]
    uv_index_max: Column,
}

fn at(column: &[Option<f64>], index: usize) -> Option<f64> {
    column.get(index).copied().flatten().filter(|v| v.is_finite())
}

fn percent_at(column: &[Option<f64>], index: usize) -> Option<u8> {
    at(column, index).map(|v| v.round().clamp(0.0, 100.0) as u8)
}

fn condition_at(column: &[Option<f64>], index: usize) -> Option<Condition> {
    at(column, index)
        .filter(|code| (0.0..=255.0).contains(code))
        .and_then(|code| wmo_condition(code as u8))
}

fn parse_time(text: &str, utc_offset: Duration) -> Result<DateTime<Utc>, ConnectorError> {
    let local = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M")
        .map_err(|err| ConnectorError::Parse(format!("hourly time {:?}: {}", text, err)))?;
    Ok((local - utc_offset).and_utc())
}

fn parse_date(text: &str) -> Result<NaiveDate, ConnectorError> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|err| ConnectorError::Parse(format!("daily date {:?}: {}", text, err)))
}

/// Parse an Open-Meteo forecast response
pub fn parse_response(body: &str) -> Result<ExternalSeries, ConnectorError> {
    let raw: RawResponse =
        serde_json::from_str(body).map_err(|err| ConnectorError::Parse(err.to_string()))?;
    let offset = Duration::seconds(raw.utc_offset_seconds);

    let mut series = ExternalSeries {
        current_cloud_cover: raw
            .current
            .and_then(|c| c.cloud_cover)
            .map(|c| c.clamp(0.0, 100.0)),
        ..ExternalSeries::default()
    };

    if let Some(h) = raw.hourly {
        series.hourly.reserve(h.time.len());
        for (i, time) in h.time.iter().enumerate() {
            let mut entry = HourlyEntry::at(parse_time(time, offset)?);
            entry.condition = condition_at(&h.weather_code, i);
            entry.temperature = at(&h.temperature_2m, i);
            entry.apparent_temperature = at(&h.apparent_temperature, i);
            entry.humidity = at(&h.relative_humidity_2m, i);
            entry.dew_point = at(&h.dew_point_2m, i);
            entry.cloud_cover = at(&h.cloud_cover, i);
            entry.wind_speed = at(&h.wind_speed_10m, i);
            entry.wind_bearing = at(&h.wind_direction_10m, i);
            entry.wind_gust = at(&h.wind_gusts_10m, i);
            entry.precipitation = at(&h.precipitation, i);
            entry.precipitation_probability = percent_at(&h.precipitation_probability, i);
            entry.uv_index = at(&h.uv_index, i);
            entry.is_day = at(&h.is_day, i).map(|v| v >= 0.5);
            series.hourly.push(entry);
        }
    }

    if let Some(d) = raw.daily {
        series.daily.reserve(d.time.len());
        for (i, date) in d.time.iter().enumerate() {
            let mut entry = DailyEntry::on(parse_date(date)?);
            entry.condition = condition_at(&d.weather_code, i);
            entry.temperature_high = at(&d.temperature_2m_max, i);
            entry.temperature_low = at(&d.temperature_2m_min, i);
            entry.precipitation = at(&d.precipitation_sum, i);
            entry.precipitation_probability = percent_at(&d.precipitation_probability_max, i);
            entry.wind_speed = at(&d.wind_speed_10m_max, i);
            entry.wind_bearing = at(&d.wind_direction_10m_dominant, i);
            entry.cloud_cover = at(&d.cloud_cover_mean, i);
            entry.uv_index = at(&d.uv_index_max, i);
            series.daily.push(entry);
        }
    }

    Ok(series)
}

#[cfg(feature = "http")]
pub use client::OpenMeteoClient;

#[cfg(feature = "http")]
mod client {
    use super::*;
    use crate::ExternalSource;

    /// Open-Meteo client on the lightweight ureq agent
    pub struct OpenMeteoClient {
        config: OpenMeteoConfig,
        agent: ureq::Agent,
    }

    impl OpenMeteoClient {
        pub fn new(config: OpenMeteoConfig) -> Result<Self, ConnectorError> {
            if !config.base_url.starts_with("http://") && !config.base_url.starts_with("https://") {
                return Err(ConnectorError::Config(
                    "Base URL must start with http:// or https://".into(),
                ));
            }
            if !(-90.0..=90.0).contains(&config.latitude)
                || !(-180.0..=180.0).contains(&config.longitude)
            {
                return Err(ConnectorError::Config("coordinates out of range".into()));
            }

            let agent = ureq::AgentBuilder::new()
                .timeout(config.timeout)
                .user_agent(&format!("weathercaster/{}", env!("CARGO_PKG_VERSION")))
                .build();
            Ok(Self { config, agent })
        }

        pub fn config(&self) -> &OpenMeteoConfig {
            &self.config
        }

        fn request_once(agent: &ureq::Agent, config: &OpenMeteoConfig) -> Result<String, ConnectorError> {
            let mut request = agent.get(&config.base_url);
            for (name, value) in config.query() {
                request = request.query(name, &value);
            }
            match request.call() {
                Ok(response) => response
                    .into_string()
                    .map_err(|err| ConnectorError::Request(err.to_string())),
                Err(ureq::Error::Status(status, response)) => {
                    let mut message = response.into_string().unwrap_or_default();
                    message.truncate(200);
                    Err(ConnectorError::Status { status, message })
                }
                Err(ureq::Error::Transport(err)) => match err.kind() {
                    ureq::ErrorKind::Io if err.to_string().contains("timed out") => {
                        Err(ConnectorError::Timeout)
                    }
                    _ => Err(ConnectorError::Request(err.to_string())),
                },
            }
        }

        fn retryable(err: &ConnectorError) -> bool {
            match err {
                ConnectorError::Status { status, .. } => *status >= 500 || *status == 429,
                ConnectorError::Request(_) | ConnectorError::Timeout => true,
                _ => false,
            }
        }
    }

    #[async_trait::async_trait]
    impl ExternalSource for OpenMeteoClient {
        fn name(&self) -> &str {
            "open-meteo"
        }

        async fn fetch(&self) -> Result<ExternalSeries, ConnectorError> {
            let mut last_error = None;

            for attempt in 0..=self.config.max_retries {
                if attempt > 0 {
                    tokio::time::sleep(self.config.backoff(attempt)).await;
                }

                let agent = self.agent.clone();
                let config = self.config.clone();
                let outcome = tokio::task::spawn_blocking(move || Self::request_once(&agent, &config))
                    .await
                    .map_err(|err| ConnectorError::Request(err.to_string()))?;

                match outcome {
                    Ok(body) => return parse_response(&body),
                    Err(err) if Self::retryable(&err) => {
                        log::debug!("Open-Meteo attempt {} failed: {}", attempt + 1, err);
                        last_error = Some(err);
                    }
                    Err(err) => return Err(err),
                }
            }

            Err(last_error.unwrap_or(ConnectorError::Timeout))
        }
    }
}
