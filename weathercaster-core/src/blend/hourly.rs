//! Hourly Series
//!
//! The first 48 hours are always present. Each slot starts synthetic and
//! is overlaid field by field with the external hour for the same time,
//! when there is one. External hours beyond the 48 h horizon are appended
//! as they are.
//!
//! ## Synthetic fields
//!
//! ```text
//! temperature(i) = T0 + (T2 - T0) · min(i, 24) / 24 + diurnal(i) - diurnal(0)
//! diurnal(i)     = 3 · cos(2π (solar_hour(i) - 14) / 24)
//!
//! wind(i)        = W0 + (target - W0) · 0.7 · min(i / 24, 1)   Beaufort targets
//!                = W0 · (1 + r · min(i / 24, 1))              increasing / diminishing
//!
//! cloud(i), rh(i): current -> day 1 target over 12 h (smoothstep),
//!                  day 1 -> day 2 target over the next 12 h
//! ```
//!
//! `T2` is the day 2 high. Slot 0 reproduces the current readings exactly.

use std::f64::consts::PI;

use chrono::{DateTime, Duration, Utc};

use crate::blend::{BlendInput, DailyForecast, HourSource, HourlyForecast};
use crate::cloud::turbidity::dew_point;
use crate::condition::Condition;
use crate::config::Site;
use crate::constants::forecast::{SKY_TRANSITION_HOURS, WIND_TARGET_MAX_FRACTION};
use crate::constants::time::{DIURNAL_AMPLITUDE_C, DIURNAL_PEAK_HOUR, HOURLY_SLOTS};
use crate::external::HourlyEntry;
use crate::lookup::Velocity;
use crate::solar::{is_daylight, local_solar_hour};
use crate::time::floor_to_hour;

const HOURS_PER_DAY: f64 = 24.0;

fn smoothstep(x: f64) -> f64 {
    let x = x.clamp(0.0, 1.0);
    x * x * (3.0 - 2.0 * x)
}

fn diurnal(longitude: f64, time: DateTime<Utc>) -> f64 {
    let hour = local_solar_hour(longitude, time);
    DIURNAL_AMPLITUDE_C * (2.0 * PI * (hour - DIURNAL_PEAK_HOUR) / HOURS_PER_DAY).cos()
}

/// Two stage eased transition from the current value
fn eased(current: Option<f64>, day1: f64, day2: f64, slot: usize) -> f64 {
    let start = current.unwrap_or(day1);
    let i = slot as f64;
    if i <= SKY_TRANSITION_HOURS {
        start + (day1 - start) * smoothstep(i / SKY_TRANSITION_HOURS)
    } else {
        day1 + (day2 - day1) * smoothstep((i - SKY_TRANSITION_HOURS) / SKY_TRANSITION_HOURS)
    }
}

fn wind_speed(current: Option<f64>, velocity: Velocity, slot: usize) -> Option<f64> {
    let progress = (slot as f64 / HOURS_PER_DAY).min(1.0);
    match velocity.target_kmh() {
        Some(target) => {
            let start = current.unwrap_or(target);
            Some(start + (target - start) * WIND_TARGET_MAX_FRACTION * progress)
        }
        None => current.map(|w| (w * (1.0 + velocity.relative_change() * progress)).max(0.0)),
    }
}

/// Condition for an external hour that carries none
fn condition_from_fields(entry: &HourlyEntry) -> Condition {
    if entry.precipitation.map(|p| p > 0.0).unwrap_or(false) {
        return Condition::Rainy;
    }
    match entry.cloud_cover {
        Some(c) if c < 20.0 => Condition::Sunny,
        Some(c) if c < 50.0 => Condition::PartlyCloudy,
        _ => Condition::Cloudy,
    }
}

struct Synthesizer<'a> {
    input: &'a BlendInput<'a>,
    start: DateTime<Utc>,
    day1: Condition,
    day2: Condition,
    temperature_target: Option<f64>,
    diurnal_origin: f64,
}

impl<'a> Synthesizer<'a> {
    fn new(input: &'a BlendInput<'a>, daily: &[DailyForecast], start: DateTime<Utc>) -> Self {
        let day1 = input.sager.condition;
        let day2 = daily.get(1).map(|d| d.condition).unwrap_or(day1);
        let temperature_target = daily
            .get(1)
            .and_then(|d| d.temperature_high)
            .or(input.current.temperature);
        Self {
            input,
            start,
            day1,
            day2,
            temperature_target,
            diurnal_origin: diurnal(input.site.longitude, start),
        }
    }

    fn slot(&self, i: usize) -> HourlyForecast {
        let site: Site = self.input.site;
        let current = self.input.current;
        let time = self.start + Duration::hours(i as i64);
        let is_day = is_daylight(site.latitude, site.longitude, time);
        let condition = if i < 24 { self.day1 } else { self.day2 }.for_daylight(is_day);

        let progress = (i as f64).min(HOURS_PER_DAY) / HOURS_PER_DAY;
        let temperature = current.temperature.map(|t0| {
            let t2 = self.temperature_target.unwrap_or(t0);
            t0 + (t2 - t0) * progress + diurnal(site.longitude, time) - self.diurnal_origin
        });

        let (cloud1, rh1) = self.day1.coarse().sky_targets();
        let (cloud2, rh2) = self.day2.coarse().sky_targets();
        let cloud_cover = eased(current.cloud_cover, cloud1, cloud2, i);
        let humidity = eased(current.humidity, rh1, rh2, i);

        HourlyForecast {
            time,
            condition,
            source: HourSource::Synthetic,
            temperature,
            humidity: Some(humidity),
            dew_point: temperature.and_then(|t| dew_point(t, humidity)),
            cloud_cover: Some(cloud_cover),
            wind_speed: wind_speed(current.wind_speed, self.input.sager.velocity(), i),
            wind_bearing: current.wind_bearing,
            precipitation: None,
            precipitation_probability: Some(condition.coarse().precipitation_probability()),
            uv_index: None,
            is_day,
        }
    }
}

fn overlay(slot: &mut HourlyForecast, entry: &HourlyEntry) {
    slot.source = HourSource::Overlaid;
    slot.temperature = entry.temperature.or(slot.temperature);
    slot.humidity = entry.humidity.or(slot.humidity);
    slot.cloud_cover = entry.cloud_cover.or(slot.cloud_cover);
    slot.wind_speed = entry.wind_speed.or(slot.wind_speed);
    slot.wind_bearing = entry.wind_bearing.or(slot.wind_bearing);
    slot.precipitation = entry.precipitation.or(slot.precipitation);
    slot.precipitation_probability = entry
        .precipitation_probability
        .or(slot.precipitation_probability);
    slot.uv_index = entry.uv_index.or(slot.uv_index);
    slot.dew_point = entry.dew_point.or_else(|| match (slot.temperature, slot.humidity) {
        (Some(t), Some(rh)) => dew_point(t, rh),
        _ => slot.dew_point,
    });
}

fn from_external(entry: &HourlyEntry, site: &Site) -> HourlyForecast {
    let is_day = entry
        .is_day
        .unwrap_or_else(|| is_daylight(site.latitude, site.longitude, entry.time));
    let condition = entry
        .condition
        .unwrap_or_else(|| condition_from_fields(entry))
        .for_daylight(is_day);
    HourlyForecast {
        time: entry.time,
        condition,
        source: HourSource::External,
        temperature: entry.temperature,
        humidity: entry.humidity,
        dew_point: entry.dew_point,
        cloud_cover: entry.cloud_cover,
        wind_speed: entry.wind_speed,
        wind_bearing: entry.wind_bearing,
        precipitation: entry.precipitation,
        precipitation_probability: entry.precipitation_probability,
        uv_index: entry.uv_index,
        is_day,
    }
}

/// Build the hourly series from the current hour on
pub fn build_hourly(input: &BlendInput<'_>, daily: &[DailyForecast]) -> Vec<HourlyForecast> {
    let start = floor_to_hour(input.now);
    let synthesizer = Synthesizer::new(input, daily, start);

    let mut hours: Vec<HourlyForecast> = (0..HOURLY_SLOTS)
        .map(|i| {
            let mut slot = synthesizer.slot(i);
            if let Some(entry) = input.external.and_then(|v| v.series.hour(slot.time)) {
                overlay(&mut slot, entry);
            }
            slot
        })
        .collect();

    if let Some(view) = input.external {
        let horizon = start + Duration::hours(HOURLY_SLOTS as i64);
        hours.extend(
            view.series
                .hourly
                .iter()
                .filter(|entry| entry.time >= horizon)
                .map(|entry| from_external(entry, &input.site)),
        );
    }
    hours
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blend::{build_daily, CurrentConditions};
    use crate::external::{ExternalSeries, ExternalView, Freshness};
    use crate::lookup::SagerCode;
    use crate::sager::{condition_for, CloudLevel, PressureTrend, SagerForecast, SagerKey, WindTrend};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 9, 30, 0).unwrap()
    }

    fn sager(table_code: &str) -> SagerForecast {
        let code = SagerCode::parse(table_code).unwrap();
        let forecast_code = code.forecast_code();
        SagerForecast {
            key: SagerKey { wind_letter: 'N', pressure_level: 3, pressure_trend: 3, cloud_level: 1 },
            code,
            table_hit: true,
            condition: condition_for(&forecast_code, code.velocity),
            forecast_code,
            wind_cardinal: None,
            wind_trend: WindTrend::Steady,
            pressure_trend: PressureTrend::Steady,
            cloud_level: CloudLevel::Clear,
            direction_key: "sw_or_w".into(),
            defaulted_trends: 0,
            confidence: 95,
        }
    }

    fn input<'a>(sager: &'a SagerForecast, external: Option<ExternalView<'a>>) -> BlendInput<'a> {
        BlendInput {
            now: now(),
            site: Site { latitude: 45.0, longitude: 9.0, elevation_m: 0.0 },
            sager,
            current: CurrentConditions {
                temperature: Some(18.0),
                humidity: Some(60.0),
                cloud_cover: Some(20.0),
                wind_speed: Some(10.0),
                wind_bearing: Some(190.0),
            },
            external,
        }
    }

    fn hourly(input: &BlendInput<'_>) -> Vec<HourlyForecast> {
        build_hourly(input, &build_daily(input))
    }

    #[test]
    fn forty_eight_slots_from_the_current_hour() {
        let s = sager("aU6");
        let hours = hourly(&input(&s, None));
        assert_eq!(hours.len(), 48);
        assert_eq!(hours[0].time, Utc.with_ymd_and_hms(2024, 5, 10, 9, 0, 0).unwrap());
        assert_eq!(hours[47].time - hours[0].time, Duration::hours(47));
        assert!(hours.iter().all(|h| h.source == HourSource::Synthetic));
    }

    #[test]
    fn slot_zero_matches_current_readings() {
        let s = sager("aU6");
        let hours = hourly(&input(&s, None));
        let first = &hours[0];
        assert!((first.temperature.unwrap() - 18.0).abs() < 1e-9);
        assert!((first.cloud_cover.unwrap() - 20.0).abs() < 1e-9);
        assert!((first.humidity.unwrap() - 60.0).abs() < 1e-9);
        assert_eq!(first.wind_speed, Some(10.0));
        assert_eq!(first.wind_bearing, Some(190.0));
        assert!(first.dew_point.is_some());
    }

    #[test]
    fn sky_reaches_day_targets() {
        let s = sager("aU6");
        let hours = hourly(&input(&s, None));
        let (cloud, rh) = Condition::Sunny.coarse().sky_targets();
        assert!((hours[12].cloud_cover.unwrap() - cloud).abs() < 1e-9);
        assert!((hours[30].humidity.unwrap() - rh).abs() < 1e-9);
    }

    #[test]
    fn wind_moves_toward_beaufort_target() {
        let s = sager("aS6");
        let hours = hourly(&input(&s, None));
        let expected = 10.0 + (51.0 - 10.0) * 0.7;
        assert!((hours[24].wind_speed.unwrap() - expected).abs() < 1e-9);
        assert!((hours[40].wind_speed.unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn diminishing_wind_halves_over_a_day() {
        let s = sager("aD6");
        let hours = hourly(&input(&s, None));
        assert!((hours[24].wind_speed.unwrap() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn external_hours_overlay_and_extend() {
        let s = sager("aU6");
        let start = floor_to_hour(now());
        let mut series = ExternalSeries::default();
        let mut overlaid = HourlyEntry::at(start + Duration::hours(3));
        overlaid.temperature = Some(25.0);
        series.hourly.push(overlaid);
        for h in 48..60 {
            let mut entry = HourlyEntry::at(start + Duration::hours(h));
            entry.cloud_cover = Some(90.0);
            series.hourly.push(entry);
        }
        let view = ExternalView { series: &series, freshness: Freshness::Fresh, fetched_at: now() };
        let hours = hourly(&input(&s, Some(view)));

        assert_eq!(hours.len(), 60);
        assert_eq!(hours[3].source, HourSource::Overlaid);
        assert_eq!(hours[3].temperature, Some(25.0));
        assert_eq!(hours[3].wind_bearing, Some(190.0));
        assert_eq!(hours[48].source, HourSource::External);
        assert_eq!(hours[48].condition.coarse(), Condition::Cloudy.coarse());
    }
}
