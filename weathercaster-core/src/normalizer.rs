//! Sensor Normalizer
//!
//! ## Overview
//!
//! Turns loosely typed host entity states into an [`ObservationSet`]. For
//! every field the normalizer answers one question: is there a valid value
//! this cycle, and if not, was the sensor never configured or is it silent?
//!
//! ```text
//! entity id ──► DataSource::read ──► RawState ──► validator ──► Reading<T>
//!     │                                                 │
//!     └─ None in config ──► NotConfigured      failure ─┴─► Unavailable
//! ```
//!
//! ## Derived fields
//!
//! - **Wind direction and speed** come from the 10 minute vector average
//!   when the host can supply one, falling back to the instantaneous state.
//! - **Wind direction 6 h ago** comes from a dedicated entity if configured,
//!   otherwise from a history query on the wind direction entity.
//! - **Pressure change 6 h** likewise comes from a dedicated entity or from
//!   `current - history_at(pressure, 6h)`.
//!
//! A missing history sample leaves the derived field `Unavailable`. The
//! forecast methods then assume a steady trend and the reliability score
//! reflects the gap.
//!
//! ## Polymorphic rain
//!
//! A rain entity may be a rate gauge (mm/h) or a binary detector. Numeric
//! states are classified by rate; flag-like states (`on`, `off`, `true`) by
//! value.

use chrono::{DateTime, Duration, Utc};

use crate::angles::normalize_degrees;
use crate::config::EntityMap;
use crate::constants::time::{TREND_LOOKBACK_HOURS, VECTOR_AVERAGE_WINDOW_MINUTES};
use crate::observation::{CloudInput, CloudUnit, ObservationSet, RainState, RawState, Reading};
use crate::traits::{CrossValidator, DataSource, Validator};
use crate::validators::{
    DewPointValidator, HumidityValidator, IrradianceValidator, PressureChangeValidator,
    PressureValidator, TemperatureValidator, WindDirectionValidator, WindSpeedValidator,
};

/// Builds an [`ObservationSet`] from a [`DataSource`]
#[derive(Debug, Clone, Default)]
pub struct SensorNormalizer {
    pressure: PressureValidator,
    pressure_change: PressureChangeValidator,
    wind_direction: WindDirectionValidator,
    wind_speed: WindSpeedValidator,
    cloud: IrradianceValidator,
    temperature: TemperatureValidator,
    humidity: HumidityValidator,
    dew_point: DewPointValidator,
}

impl SensorNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and classify every configured input
    pub fn collect<S: DataSource + ?Sized>(
        &self,
        entities: &EntityMap,
        source: &S,
        now: DateTime<Utc>,
    ) -> ObservationSet {
        let lookback = Duration::hours(TREND_LOOKBACK_HOURS);

        let pressure = self.numeric(source, entities.pressure.as_deref(), &self.pressure);
        let (wind_direction, wind_speed) = self.wind(source, entities, now);
        let temperature = self.numeric(source, entities.temperature.as_deref(), &self.temperature);
        let humidity = self.numeric(source, entities.humidity.as_deref(), &self.humidity);
        let dew_point = self.dew_point(source, entities.dew_point.as_deref(), temperature);

        let wind_direction_6h = self
            .numeric(
                source,
                entities.wind_direction_historic.as_deref(),
                &self.wind_direction,
            )
            .map(normalize_degrees)
            .or_else(|| {
                self.history(source, entities.wind_direction.as_deref(), lookback, now, &self.wind_direction)
                    .map(normalize_degrees)
            });

        let pressure_change_6h = self
            .numeric(source, entities.pressure_change.as_deref(), &self.pressure_change)
            .or_else(|| self.derived_pressure_change(source, entities, pressure, lookback, now));

        ObservationSet {
            pressure,
            wind_direction,
            wind_speed,
            cloud: self.cloud(source, entities.cloud_cover.as_deref()),
            rain: self.rain(source, entities.rain.as_deref()),
            temperature,
            humidity,
            dew_point,
            wind_direction_6h,
            pressure_change_6h,
        }
    }

    fn numeric<S, V>(&self, source: &S, entity: Option<&str>, validator: &V) -> Reading<f64>
    where
        S: DataSource + ?Sized,
        V: Validator<Value = f64>,
    {
        let Some(entity) = entity else {
            return Reading::NotConfigured;
        };
        let Some(state) = source.read(entity) else {
            return Reading::Unavailable;
        };
        if state.value.is_unavailable() {
            return Reading::Unavailable;
        }
        match state.value.as_number() {
            Some(value) => accept(entity, value, validator),
            None => Reading::Unavailable,
        }
    }

    fn history<S, V>(
        &self,
        source: &S,
        entity: Option<&str>,
        lookback: Duration,
        now: DateTime<Utc>,
        validator: &V,
    ) -> Reading<f64>
    where
        S: DataSource + ?Sized,
        V: Validator<Value = f64>,
    {
        let Some(entity) = entity else {
            return Reading::NotConfigured;
        };
        match source.history_at(entity, lookback, now) {
            Some(value) => accept(entity, value, validator),
            None => {
                log::debug!("No {}h history for {}", lookback.num_hours(), entity);
                Reading::Unavailable
            }
        }
    }

    fn wind<S: DataSource + ?Sized>(
        &self,
        source: &S,
        entities: &EntityMap,
        now: DateTime<Utc>,
    ) -> (Reading<f64>, Reading<f64>) {
        let speed_entity = entities.wind_speed.as_deref();
        let averaged = entities.wind_direction.as_deref().and_then(|dir| {
            source.vector_average(
                dir,
                speed_entity,
                Duration::minutes(VECTOR_AVERAGE_WINDOW_MINUTES),
                now,
            )
        });

        let direction = match averaged {
            Some(avg) => Reading::Ok(normalize_degrees(avg.direction)),
            None => self
                .numeric(source, entities.wind_direction.as_deref(), &self.wind_direction)
                .map(normalize_degrees),
        };

        let speed = match averaged.and_then(|avg| avg.speed) {
            Some(value) if self.wind_speed.validate(value).is_ok() => Reading::Ok(value),
            _ => self.numeric(source, speed_entity, &self.wind_speed),
        };

        (direction, speed)
    }

    fn derived_pressure_change<S: DataSource + ?Sized>(
        &self,
        source: &S,
        entities: &EntityMap,
        pressure: Reading<f64>,
        lookback: Duration,
        now: DateTime<Utc>,
    ) -> Reading<f64> {
        let Some(current) = pressure.value() else {
            return pressure;
        };
        match self.history(source, entities.pressure.as_deref(), lookback, now, &self.pressure) {
            Reading::Ok(past) => {
                let entity = entities.pressure.as_deref().unwrap_or("pressure");
                accept(entity, current - past, &self.pressure_change)
            }
            missing => missing,
        }
    }

    fn dew_point<S: DataSource + ?Sized>(
        &self,
        source: &S,
        entity: Option<&str>,
        temperature: Reading<f64>,
    ) -> Reading<f64> {
        let dew_point = self.numeric(source, entity, &self.dew_point);
        match (dew_point, temperature.value()) {
            (Reading::Ok(dp), Some(t)) => match self.dew_point.cross_validate((dp, t)) {
                Ok(()) => dew_point,
                Err(err) => {
                    log::warn!("Dew point {} dropped: {}", dp, err);
                    Reading::Unavailable
                }
            },
            _ => dew_point,
        }
    }

    fn cloud<S: DataSource + ?Sized>(&self, source: &S, entity: Option<&str>) -> Reading<CloudInput> {
        let Some(entity) = entity else {
            return Reading::NotConfigured;
        };
        let Some(state) = source.read(entity) else {
            return Reading::Unavailable;
        };
        let Some(value) = state.value.as_number() else {
            return Reading::Unavailable;
        };
        let Some(unit) = cloud_unit(&state) else {
            log::warn!("Cloud sensor {} has unsupported unit {:?}", entity, state.unit);
            return Reading::Unavailable;
        };

        let input = CloudInput::new(unit, value);
        match self.cloud.validate(input) {
            Ok(()) => Reading::Ok(input),
            Err(err) => {
                log::warn!("Cloud sensor {} rejected: {}", entity, err);
                Reading::Unavailable
            }
        }
    }

    fn rain<S: DataSource + ?Sized>(&self, source: &S, entity: Option<&str>) -> Reading<RainState> {
        let Some(entity) = entity else {
            return Reading::NotConfigured;
        };
        let Some(state) = source.read(entity) else {
            return Reading::Unavailable;
        };
        if state.value.is_unavailable() {
            return Reading::Unavailable;
        }
        if let Some(rate) = state.value.as_number() {
            if rate.is_finite() && rate >= 0.0 {
                return Reading::Ok(RainState::from_rate(rate));
            }
            log::warn!("Rain sensor {} reported invalid rate {}", entity, rate);
            return Reading::Unavailable;
        }
        match state.value.as_flag() {
            Some(flag) => Reading::Ok(RainState::from_flag(flag)),
            None => Reading::Unavailable,
        }
    }
}

/// Cloud unit from the state's tag; an untagged state is taken as percent
fn cloud_unit(state: &RawState) -> Option<CloudUnit> {
    match state.unit.as_deref() {
        None => Some(CloudUnit::Percent),
        Some(tag) => CloudUnit::from_tag(tag),
    }
}

fn accept<V: Validator<Value = f64>>(entity: &str, value: f64, validator: &V) -> Reading<f64> {
    match validator.validate(value) {
        Ok(()) => Reading::Ok(value),
        Err(err) => {
            log::warn!("{} rejected: {}", entity, err);
            Reading::Unavailable
        }
    }
}
