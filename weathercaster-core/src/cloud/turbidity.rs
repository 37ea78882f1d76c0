//! Atmospheric Moisture and Turbidity Correction
//!
//! ## Vapor pressure
//!
//! Saturation vapor pressure follows Alduchov & Eskridge (1996):
//!
//! ```text
//! es(T) = 6.1094 · exp(17.625 · T / (T + 243.04))     [hPa, °C]
//! ```
//!
//! Actual vapor pressure is taken from the best moisture data available:
//!
//! 1. Dew point: `e = es(Td)`
//! 2. Temperature and relative humidity: `e = RH/100 · es(T)`
//! 3. Humidity only: `e = RH/100 · es(15 °C)`
//! 4. Nothing: no correction
//!
//! ## Hänel aerosol growth
//!
//! Hygroscopic aerosols swell in moist air and scatter more light. The
//! correction saturates smoothly with vapor pressure:
//!
//! ```text
//! factor = clamp(1 - 0.40 · (1 - exp(-e / 15)), 0.60, 1.0)
//! ```
//!
//! The factor is monotonically decreasing in `e` and multiplies the
//! clear-sky baseline.

use crate::constants::physics::{
    AEROSOL_MAX_ATTENUATION, AEROSOL_VAPOR_SCALE_HPA, HUMIDITY_ONLY_ASSUMED_TEMP_C, MAGNUS_A_HPA,
    MAGNUS_B, MAGNUS_C_DEG, TURBIDITY_FACTOR_MAX, TURBIDITY_FACTOR_MIN,
};
use crate::observation::ObservationSet;

/// Saturation vapor pressure in hPa
pub fn saturation_vapor_pressure(temperature_c: f64) -> f64 {
    MAGNUS_A_HPA * (MAGNUS_B * temperature_c / (temperature_c + MAGNUS_C_DEG)).exp()
}

/// Dew point (°C) from air temperature and relative humidity
pub fn dew_point(temperature_c: f64, humidity_pct: f64) -> Option<f64> {
    if humidity_pct <= 0.0 {
        return None;
    }
    let gamma = (humidity_pct.min(100.0) / 100.0).ln()
        + MAGNUS_B * temperature_c / (MAGNUS_C_DEG + temperature_c);
    Some(MAGNUS_C_DEG * gamma / (MAGNUS_B - gamma))
}

/// Actual vapor pressure (hPa) from the best available moisture data
pub fn vapor_pressure(obs: &ObservationSet) -> Option<f64> {
    if let Some(td) = obs.dew_point.value() {
        return Some(saturation_vapor_pressure(td));
    }
    let rh = obs.humidity.value()?;
    let t = obs.temperature.value().unwrap_or(HUMIDITY_ONLY_ASSUMED_TEMP_C);
    Some(rh / 100.0 * saturation_vapor_pressure(t))
}

/// Multiplicative clear-sky correction for aerosol swelling
pub fn turbidity_factor(vapor_pressure_hpa: Option<f64>) -> f64 {
    match vapor_pressure_hpa {
        Some(e) => {
            let attenuation =
                AEROSOL_MAX_ATTENUATION * (1.0 - (-e.max(0.0) / AEROSOL_VAPOR_SCALE_HPA).exp());
            (1.0 - attenuation).clamp(TURBIDITY_FACTOR_MIN, TURBIDITY_FACTOR_MAX)
        }
        None => TURBIDITY_FACTOR_MAX,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observation::Reading;

    #[test]
    fn saturation_at_known_points() {
        assert!((saturation_vapor_pressure(0.0) - 6.11).abs() < 0.01);
        assert!((saturation_vapor_pressure(20.0) - 23.37).abs() < 0.1);
    }

    #[test]
    fn dew_point_round_trips_saturation() {
        let td = dew_point(20.0, 60.0).unwrap();
        assert!((td - 12.0).abs() < 0.2, "{td}");
        assert!((dew_point(15.0, 100.0).unwrap() - 15.0).abs() < 1e-9);
        assert!(dew_point(15.0, 0.0).is_none());
    }

    #[test]
    fn moisture_priority() {
        let mut obs = ObservationSet::empty();
        assert_eq!(vapor_pressure(&obs), None);

        obs.humidity = Reading::Ok(50.0);
        let humidity_only = vapor_pressure(&obs).unwrap();
        assert!((humidity_only - 0.5 * saturation_vapor_pressure(15.0)).abs() < 1e-9);

        obs.temperature = Reading::Ok(25.0);
        let with_temp = vapor_pressure(&obs).unwrap();
        assert!(with_temp > humidity_only);

        obs.dew_point = Reading::Ok(5.0);
        assert!((vapor_pressure(&obs).unwrap() - saturation_vapor_pressure(5.0)).abs() < 1e-9);
    }

    #[test]
    fn factor_decreases_with_moisture() {
        assert_eq!(turbidity_factor(None), 1.0);
        assert_eq!(turbidity_factor(Some(0.0)), 1.0);
        let mid = turbidity_factor(Some(10.0));
        let wet = turbidity_factor(Some(30.0));
        assert!(wet < mid && mid < 1.0);
        assert!(turbidity_factor(Some(1000.0)) >= 0.60);
    }
}
