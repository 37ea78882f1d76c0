//! End-to-end forecast cycles through the public API

mod common;

use chrono::Duration;

use common::*;
use weathercaster_core::blend::{DaySource, HourSource};
use weathercaster_core::condition::Condition;
use weathercaster_core::config::ExternalConfig;
use weathercaster_core::engine::ForecastEngine;
use weathercaster_core::external::{DailyEntry, ExternalSeries, Freshness, HourlyEntry};
use weathercaster_core::lookup::Velocity;
use weathercaster_core::observation::{InputStatus, RawState};
use weathercaster_core::sager::{CloudLevel, PressureTrend, WindTrend};
use weathercaster_core::scoring::Agreement;
use weathercaster_core::time::floor_to_hour;
use weathercaster_core::{ForecastError, ForecastState, LatitudeZone};

#[test]
fn reference_scenario() {
    let now = start();
    let mut engine = ForecastEngine::new(config_at(MILAN)).unwrap();
    let state = engine.compute(&Scenario::reference().source(now), now);

    let output = state.output().expect("forecast computed");
    let result = &output.result;
    assert_eq!(result.key, "N331");
    assert_eq!(result.table_code, "aU6");
    assert_eq!(result.forecast_code, "a");
    assert!(result.table_hit);
    assert_eq!(result.condition, Condition::Sunny);
    assert_eq!(result.wind_velocity, Velocity::NoSignificantChange);
    assert_eq!(result.wind_direction, "sw_or_w");
    assert_eq!(result.wind_trend, WindTrend::Veering);
    assert_eq!(result.pressure_level, 3);
    assert_eq!(result.pressure_trend, PressureTrend::Steady);
    assert_eq!(result.cloud_level, CloudLevel::Clear);
    assert_eq!(result.latitude_zone, LatitudeZone::NorthernTemperate);
    assert!(result.named_wind.is_some());

    assert_eq!(result.zambretti_code, 'N');
    assert_eq!(result.cross_validation, Agreement::Conflict);
    assert_eq!(result.confidence.value(), 75);

    assert_eq!(output.reliability.score, 100);
    assert_eq!(output.daily.len(), 7);
    assert_eq!(output.hourly.len(), 48);
    assert_eq!(output.external, None);
}

#[test]
fn identical_inputs_give_identical_output() {
    let now = start();
    let source = Scenario::reference().source(now);
    let mut engine = ForecastEngine::new(config_at(MILAN)).unwrap();

    let first = engine.compute(&source, now);
    let second = engine.compute(&source, now);
    assert_eq!(first, second);
}

#[test]
fn missing_history_defaults_to_steady() {
    let now = start();
    let mut source = Scenario::reference().source(now);
    source.remove(PRESSURE);
    source.record(PRESSURE, 1013.0, now);

    let mut engine = ForecastEngine::new(config_at(MILAN)).unwrap();
    let output = engine.compute(&source, now).output().cloned().unwrap();
    assert_eq!(output.result.pressure_trend, PressureTrend::Steady);
    assert_eq!(output.reliability.inputs.pressure_history, InputStatus::Unavailable);
    assert_eq!(output.reliability.score, 80);
}

#[test]
fn required_inputs_gate_the_cycle() {
    let now = start();
    let mut engine = ForecastEngine::new(config_at(MILAN)).unwrap();

    let mut source = Scenario::reference().source(now);
    source.remove(WIND_DIRECTION);
    assert_eq!(
        engine.compute(&source, now),
        ForecastState::InsufficientData(ForecastError::InsufficientData {
            missing: "wind direction"
        })
    );

    let good = Scenario::reference().source(now);
    assert!(engine.compute(&good, now).is_fresh());

    let later = now + Duration::minutes(10);
    let mut silent = Scenario::reference().source(later);
    silent.set_state(PRESSURE, RawState::text("unavailable"));
    match engine.compute(&silent, later) {
        ForecastState::Retained { output, .. } => assert_eq!(output.computed_at, now),
        other => panic!("expected retained output, got {:?}", other),
    }
}

#[test]
fn out_of_range_pressure_is_unavailable_not_zero() {
    let now = start();
    let mut source = Scenario::reference().source(now);
    source.record(PRESSURE, -5.0, now);

    let mut engine = ForecastEngine::new(config_at(MILAN)).unwrap();
    assert!(matches!(
        engine.compute(&source, now),
        ForecastState::InsufficientData(ForecastError::InsufficientData { missing: "pressure" })
    ));
}

#[test]
fn southern_zone_flips_wind_trend() {
    let now = start();
    let source = Scenario::reference().source(now);

    let mut north = ForecastEngine::new(config_at(MILAN)).unwrap();
    let mut south = ForecastEngine::new(config_at(CAPE_TOWN)).unwrap();
    let north = north.compute(&source, now).output().cloned().unwrap();
    let south = south.compute(&source, now).output().cloned().unwrap();

    assert_eq!(north.result.wind_trend, WindTrend::Veering);
    assert_eq!(south.result.wind_trend, WindTrend::Backing);
    assert_eq!(south.result.latitude_zone, LatitudeZone::SouthernTemperate);
    assert_ne!(north.result.key, south.result.key);
}

#[test]
fn rain_sensor_forces_cloud_level() {
    let now = start();
    let mut source = Scenario::reference().source(now);
    source.set_state(RAIN, RawState::flag(true));

    let config = config_at(MILAN).rain_entity(RAIN);
    let mut engine = ForecastEngine::new(config).unwrap();
    let output = engine.compute(&source, now).output().cloned().unwrap();
    assert_eq!(output.result.cloud_level, CloudLevel::Raining);
    assert!(output.result.key.ends_with('5'));
}

#[test]
fn flurries_below_two_degrees() {
    let now = start();
    let scenario = Scenario {
        pressure_6h: 1000.0,
        pressure: 994.0,
        cloud_pct: Some(95.0),
        temperature: Some(1.9),
        ..Scenario::reference()
    };
    let mut engine = ForecastEngine::new(config_at(MILAN)).unwrap();
    let output = engine.compute(&scenario.source(now), now).output().cloned().unwrap();
    let result = &output.result;
    assert!(!result.forecast_code.ends_with('1'));
    if result.table_code.contains('1') {
        assert!(result.forecast_code.ends_with('2'));
    }
}

#[test]
fn synthetic_hourly_series_is_complete() {
    let now = start();
    let mut engine = ForecastEngine::new(config_at(MILAN)).unwrap();
    let output = engine
        .compute(&Scenario::reference().source(now), now)
        .output()
        .cloned()
        .unwrap();

    let first = floor_to_hour(now);
    for (i, hour) in output.hourly.iter().enumerate() {
        assert_eq!(hour.time, first + Duration::hours(i as i64));
        assert_eq!(hour.source, HourSource::Synthetic);
        assert!(hour.temperature.is_some());
        assert!(hour.cloud_cover.is_some());
        assert!(hour.humidity.is_some());
        assert!(hour.wind_speed.is_some());
        assert!(hour.precipitation_probability.is_some());
    }
    assert!((output.hourly[0].temperature.unwrap() - 18.0).abs() < 1e-9);
    assert!((output.hourly[0].cloud_cover.unwrap() - 20.0).abs() < 1e-9);
    assert!(output.daily.iter().skip(2).all(|d| d.source == DaySource::SagerContinuation));
}

#[test]
fn external_source_extends_and_blends() {
    let now = start();
    let mut config = config_at(MILAN);
    config.external = ExternalConfig::default();
    let mut engine = ForecastEngine::new(config).unwrap();

    let first = floor_to_hour(now);
    let mut series = ExternalSeries { current_cloud_cover: Some(15.0), ..Default::default() };
    for h in 0..96 {
        let mut entry = HourlyEntry::at(first + Duration::hours(h));
        entry.temperature = Some(20.0);
        entry.cloud_cover = Some(30.0);
        series.hourly.push(entry);
    }
    for d in 0..7 {
        let mut day = DailyEntry::on(now.date_naive() + Duration::days(d));
        day.condition = Some(Condition::Rainy);
        day.temperature_high = Some(22.0);
        day.temperature_low = Some(12.0);
        series.daily.push(day);
    }
    engine.record_external(series, now);

    let output = engine
        .compute(&Scenario::reference().source(now), now)
        .output()
        .cloned()
        .unwrap();
    assert_eq!(output.external, Some(Freshness::Fresh));
    assert_eq!(output.hourly.len(), 96);
    assert_eq!(output.hourly[0].source, HourSource::Overlaid);
    assert_eq!(output.hourly[0].temperature, Some(20.0));
    assert_eq!(output.hourly[60].source, HourSource::External);
    assert_eq!(output.daily[0].condition, Condition::Sunny);
    assert_eq!(output.daily[2].source, DaySource::Blended);
    assert_eq!(output.daily[5].source, DaySource::External);
    assert_eq!(output.daily[5].condition, Condition::Rainy);
}

#[test]
fn stale_snapshot_is_still_served() {
    let now = start();
    let mut config = config_at(MILAN);
    config.external = ExternalConfig::default();
    let mut engine = ForecastEngine::new(config).unwrap();
    engine.record_external(ExternalSeries::default(), now);

    let later = now + Duration::hours(3);
    assert!(engine.external_due(later));
    assert_eq!(engine.record_external_failure(), 1);

    let output = engine
        .compute(&Scenario::reference().source(later), later)
        .output()
        .cloned()
        .unwrap();
    assert_eq!(output.external, Some(Freshness::Stale));
}

#[test]
fn clear_sky_noon_updates_calibration() {
    // Solar noon in Milan is close to 11:20 UTC in early June
    let noon = start() + Duration::hours(2);
    let scenario = Scenario { cloud_pct: None, ..Scenario::reference() };
    let mut source = scenario.source(noon);
    source.set_state(CLOUD, RawState::number(400.0).with_unit("W/m²"));

    let mut config = config_at(MILAN);
    config.external = ExternalConfig::default();
    let mut engine = ForecastEngine::new(config).unwrap();
    engine.record_external(
        ExternalSeries { current_cloud_cover: Some(0.0), ..Default::default() },
        noon,
    );

    let output = engine.compute(&source, noon).output().cloned().unwrap();
    assert!(output.calibration.updated_this_cycle);
    assert_eq!(output.calibration.updates, 1);
    assert!(output.calibration.factor < 1.0);
    assert!(output.calibration.factor >= 0.4);
    assert!((engine.calibration().factor() - output.calibration.factor).abs() < 1e-12);
}

#[test]
fn night_light_sensor_uses_external_cover() {
    let midnight = start() - Duration::hours(9);
    let scenario = Scenario { cloud_pct: None, ..Scenario::reference() };
    let mut source = scenario.source(midnight);
    source.set_state(CLOUD, RawState::number(0.0).with_unit("lx"));

    let mut config = config_at(MILAN);
    config.external = ExternalConfig::default();
    let mut engine = ForecastEngine::new(config).unwrap();
    engine.record_external(
        ExternalSeries { current_cloud_cover: Some(70.0), ..Default::default() },
        midnight,
    );

    let output = engine.compute(&source, midnight).output().cloned().unwrap();
    let cloud = output.cloud.unwrap();
    assert_eq!(cloud.cover_pct, 70.0);
    assert!(!output.calibration.updated_this_cycle);
    assert_eq!(output.result.cloud_level, CloudLevel::MostlyCloudy);
}
