//! Daily Series
//!
//! ## Day 3 vote
//!
//! On day 3 the Sager continuation and the external forecast each cast a
//! vote over the coarse severity scale. A source puts full weight on its
//! own bucket and half weight on the neighbouring buckets:
//!
//! ```text
//! score(b) = w_sager · k(b, sager) + w_external · k(b, external)
//!
//! k(b, c) = 1.0 if b = c, 0.5 if |b - c| = 1, else 0
//! w_sager = 0.4, w_external = 0.6      (swapped when the external data is stale)
//! ```
//!
//! The highest score wins and ties go to the more severe bucket. If the
//! winner is one of the two sources' buckets that source's own condition
//! is used, otherwise the bucket's representative condition.
//!
//! ## Temperatures without an external source
//!
//! The high starts at the current temperature and moves 3 °C per day for
//! "warmer" and "cooler" letters over the first three days, then holds.
//! The low is 5 °C below the high.

use chrono::Duration;

use crate::blend::evolution::evolve_code;
use crate::blend::{BlendInput, DailyForecast, DaySource};
use crate::condition::{CoarseCondition, Condition};
use crate::constants::forecast::{DAILY_TENDENCY_STEP_C, SYNTHETIC_DAILY_RANGE_C};
use crate::constants::quality::{DAY3_EXTERNAL_WEIGHT, DAY3_SAGER_WEIGHT, VOTE_NEIGHBOUR_SHARE};
use crate::constants::time::DAILY_SLOTS;
use crate::external::DailyEntry;
use crate::lookup::{tendency, Tendency};
use crate::sager::{condition_for, refine_for_temperature};

/// Days whose synthetic high follows the forecast tendency
const TENDENCY_DAYS: usize = 3;

fn kernel(bucket: CoarseCondition, vote: CoarseCondition) -> f64 {
    match bucket.distance(vote) {
        0 => 1.0,
        1 => VOTE_NEIGHBOUR_SHARE,
        _ => 0.0,
    }
}

/// Weighted vote between the Sager and external buckets
pub fn vote(sager: CoarseCondition, external: CoarseCondition, external_stale: bool) -> CoarseCondition {
    let (w_sager, w_external) = if external_stale {
        (DAY3_EXTERNAL_WEIGHT, DAY3_SAGER_WEIGHT)
    } else {
        (DAY3_SAGER_WEIGHT, DAY3_EXTERNAL_WEIGHT)
    };

    let mut winner = CoarseCondition::Clear;
    let mut best = f64::MIN;
    for bucket in CoarseCondition::ALL {
        let score = w_sager * kernel(bucket, sager) + w_external * kernel(bucket, external);
        // Ascending severity: ties resolve upward
        if score >= best - 1e-12 {
            best = score.max(best);
            winner = bucket;
        }
    }
    winner
}

fn tendency_step(code: &str) -> f64 {
    match code.chars().next().map(tendency) {
        Some(Tendency::Warmer) => DAILY_TENDENCY_STEP_C,
        Some(Tendency::Cooler) => -DAILY_TENDENCY_STEP_C,
        _ => 0.0,
    }
}

fn day3_condition(sager: Condition, external: Condition, stale: bool) -> Condition {
    let winner = vote(sager.coarse(), external.coarse(), stale);
    if winner == sager.coarse() {
        sager
    } else if winner == external.coarse() {
        external
    } else {
        winner.representative()
    }
}

/// Build the 7 day series
pub fn build_daily(input: &BlendInput<'_>) -> Vec<DailyForecast> {
    let today = input.now.date_naive();
    let velocity = input.sager.velocity();
    let stale = input.external.map(|v| v.is_stale()).unwrap_or(false);
    let current = input.current;

    let mut days = Vec::with_capacity(DAILY_SLOTS);
    let mut code = input.sager.forecast_code.clone();
    let mut synthetic_high = current.temperature;

    for offset in 0..DAILY_SLOTS {
        let date = today + Duration::days(offset as i64);
        let external: Option<&DailyEntry> = input.external.and_then(|v| v.series.day(date));
        let external_condition = external.and_then(|d| d.condition);

        if offset > 0 {
            code = refine_for_temperature(&evolve_code(&code), current.temperature);
        }
        if offset < TENDENCY_DAYS {
            let step = tendency_step(&code);
            synthetic_high = synthetic_high.map(|t| t + step);
        }
        let sager_condition = if offset == 0 {
            input.sager.condition
        } else {
            condition_for(&code, velocity)
        };

        let (condition, source, forecast_code) = match (offset, external_condition) {
            (0 | 1, _) => (sager_condition, DaySource::Sager, Some(code.clone())),
            (2, Some(ext)) => (
                day3_condition(sager_condition, ext, stale),
                DaySource::Blended,
                Some(code.clone()),
            ),
            (_, Some(ext)) => (ext, DaySource::External, None),
            (_, None) => (sager_condition, DaySource::SagerContinuation, Some(code.clone())),
        };

        let coarse = condition.coarse();
        let near_term = offset < 2;
        let temperature_high = external.and_then(|d| d.temperature_high).or(synthetic_high);
        let temperature_low = external
            .and_then(|d| d.temperature_low)
            .or(synthetic_high.map(|t| t - SYNTHETIC_DAILY_RANGE_C));

        days.push(DailyForecast {
            date,
            condition,
            source,
            forecast_code,
            temperature_high,
            temperature_low,
            precipitation: external.and_then(|d| d.precipitation),
            precipitation_probability: external
                .and_then(|d| d.precipitation_probability)
                .or(Some(coarse.precipitation_probability())),
            wind_speed: external.and_then(|d| d.wind_speed).or_else(|| {
                near_term
                    .then(|| velocity.target_kmh().or(current.wind_speed))
                    .flatten()
            }),
            wind_bearing: external
                .and_then(|d| d.wind_bearing)
                .or_else(|| near_term.then_some(current.wind_bearing).flatten()),
            cloud_cover: external
                .and_then(|d| d.cloud_cover)
                .or(Some(coarse.sky_targets().0)),
            uv_index: external.and_then(|d| d.uv_index),
        });
    }
    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blend::CurrentConditions;
    use crate::config::Site;
    use crate::external::{ExternalSeries, ExternalView, Freshness};
    use crate::lookup::{SagerCode, Velocity};
    use crate::sager::{CloudLevel, PressureTrend, SagerForecast, SagerKey, WindTrend};
    use chrono::{DateTime, TimeZone, Utc};
    use CoarseCondition::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 9, 30, 0).unwrap()
    }

    fn sager(forecast_code: &str) -> SagerForecast {
        let code = SagerCode::parse(&format!("{}U6", forecast_code)).unwrap();
        SagerForecast {
            key: SagerKey { wind_letter: 'N', pressure_level: 3, pressure_trend: 3, cloud_level: 1 },
            code,
            table_hit: true,
            forecast_code: forecast_code.to_string(),
            condition: condition_for(forecast_code, Velocity::NoSignificantChange),
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

    #[test]
    fn vote_weights_external_more() {
        assert_eq!(vote(Clear, Rain, false), Rain);
        assert_eq!(vote(Clear, Cloudy, false), Cloudy);
        assert_eq!(vote(Clear, PartlyCloudy, false), PartlyCloudy);
    }

    #[test]
    fn stale_external_loses_weight() {
        assert_eq!(vote(Clear, PartlyCloudy, true), Clear);
    }

    #[test]
    fn agreement_keeps_the_shared_bucket() {
        assert_eq!(vote(Rain, Rain, false), Rain);
        assert_eq!(vote(Cloudy, Clear, true), Cloudy);
        assert_eq!(vote(Storm, Clear, false), Clear);
    }

    #[test]
    fn seven_days_without_external() {
        let s = sager("b");
        let days = build_daily(&input(&s, None));
        assert_eq!(days.len(), 7);
        assert_eq!(days[0].source, DaySource::Sager);
        assert_eq!(days[0].forecast_code.as_deref(), Some("b"));
        assert_eq!(days[0].temperature_high, Some(21.0));
        assert_eq!(days[0].temperature_low, Some(16.0));
        // b evolves to a (steady), held from day 3 on
        assert_eq!(days[1].temperature_high, Some(21.0));
        assert_eq!(days[6].temperature_high, Some(21.0));
        assert!(days[2..].iter().all(|d| d.source == DaySource::SagerContinuation));
        assert_eq!(days[6].date, now().date_naive() + Duration::days(6));
    }

    #[test]
    fn external_drives_later_days() {
        let s = sager("a");
        let today = now().date_naive();
        let mut series = ExternalSeries::default();
        for offset in 0..7 {
            let mut day = DailyEntry::on(today + Duration::days(offset));
            day.condition = Some(Condition::Rainy);
            day.temperature_high = Some(12.0);
            day.temperature_low = Some(4.0);
            series.daily.push(day);
        }
        let view = ExternalView { series: &series, freshness: Freshness::Fresh, fetched_at: now() };
        let days = build_daily(&input(&s, Some(view)));

        assert_eq!(days[0].condition, Condition::Sunny);
        assert_eq!(days[0].temperature_high, Some(12.0));
        assert_eq!(days[2].source, DaySource::Blended);
        assert_eq!(days[2].condition, Condition::Rainy);
        assert_eq!(days[3].source, DaySource::External);
        assert_eq!(days[3].forecast_code, None);
    }
}
