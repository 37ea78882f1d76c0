//! Ineichen-Perez Clear-Sky Irradiance
//!
//! ## Formulation
//!
//! Global horizontal irradiance under a cloudless sky (Ineichen & Perez,
//! 2002):
//!
//! ```text
//! GHI = cg1 · I0 · sin h · exp(-cg2 · AM · (fh1 + fh2 · (TL - 1))) · exp(0.01 · AM^1.8)
//!
//! fh1 = exp(-z / 8000)          fh2 = exp(-z / 1250)
//! cg1 = 5.09e-5 · z + 0.868     cg2 = 3.92e-5 · z + 0.0387
//! I0  = 1361 · E0               (extraterrestrial, distance corrected)
//! AM  = AM_rel · P / 1013.25    (pressure-corrected air mass)
//! ```
//!
//! with `z` the station elevation in metres, `h` the sun elevation and `TL`
//! the Linke turbidity.
//!
//! ## Air mass
//!
//! Kasten & Young (1989) stay finite down to the horizon, unlike `1/sin h`:
//!
//! ```text
//! AM_rel = 1 / (sin h + 0.50572 · (h + 6.07995)^-1.6364)
//! ```
//!
//! ## Linke turbidity
//!
//! Water vapour is the dominant variable absorber. Precipitable water from
//! surface vapour pressure (Leckner, 1978) feeds the Kasten (1980)
//! approximation:
//!
//! ```text
//! w  = 49.3 · e / T                 [cm]
//! TL = clamp(2 + 0.5 · w, 2, 7)
//! ```

use crate::constants::physics::{
    CELSIUS_TO_KELVIN, DEFAULT_LINKE_TURBIDITY, INEICHEN_CG1_BASE, INEICHEN_CG1_SLOPE,
    INEICHEN_CG2_BASE, INEICHEN_CG2_SLOPE, INEICHEN_FH1_SCALE_M, INEICHEN_FH2_SCALE_M,
    KASTEN_YOUNG_A, KASTEN_YOUNG_B, KASTEN_YOUNG_C, LINKE_PER_CM_WATER, LINKE_TURBIDITY_MAX,
    LINKE_TURBIDITY_MIN, PRECIPITABLE_WATER_COEFF, SEA_LEVEL_PRESSURE_HPA, SOLAR_CONSTANT_W_M2,
};
use crate::solar::earth_sun_factor;

/// Pressure-corrected Kasten-Young air mass
pub fn air_mass(elevation_deg: f64, pressure_hpa: Option<f64>) -> f64 {
    let h = elevation_deg.max(0.0);
    let relative = 1.0
        / (h.to_radians().sin() + KASTEN_YOUNG_A * (h + KASTEN_YOUNG_B).powf(-KASTEN_YOUNG_C));
    let pressure_ratio = pressure_hpa
        .filter(|p| *p > 0.0)
        .map(|p| p / SEA_LEVEL_PRESSURE_HPA)
        .unwrap_or(1.0);
    relative * pressure_ratio
}

/// Linke turbidity from vapor pressure (hPa) and air temperature (°C)
///
/// Without moisture data a typical rural value is used.
pub fn linke_turbidity(vapor_pressure_hpa: Option<f64>, temperature_c: f64) -> f64 {
    match vapor_pressure_hpa {
        Some(e) => {
            let t_kelvin = temperature_c + CELSIUS_TO_KELVIN;
            let water_cm = PRECIPITABLE_WATER_COEFF * e / t_kelvin;
            (LINKE_TURBIDITY_MIN + LINKE_PER_CM_WATER * water_cm)
                .clamp(LINKE_TURBIDITY_MIN, LINKE_TURBIDITY_MAX)
        }
        None => DEFAULT_LINKE_TURBIDITY,
    }
}

/// Inputs of a clear-sky evaluation
#[derive(Debug, Clone, Copy)]
pub struct ClearSkyInput {
    pub elevation_deg: f64,
    pub day_of_year: u32,
    pub altitude_m: f64,
    pub pressure_hpa: Option<f64>,
    pub linke_turbidity: f64,
}

/// Clear-sky global horizontal irradiance in W/m²
pub fn ghi_w_m2(input: &ClearSkyInput) -> f64 {
    if input.elevation_deg <= 0.0 {
        return 0.0;
    }
    let z = input.altitude_m.max(0.0);
    let fh1 = (-z / INEICHEN_FH1_SCALE_M).exp();
    let fh2 = (-z / INEICHEN_FH2_SCALE_M).exp();
    let cg1 = INEICHEN_CG1_SLOPE * z + INEICHEN_CG1_BASE;
    let cg2 = INEICHEN_CG2_SLOPE * z + INEICHEN_CG2_BASE;

    let am = air_mass(input.elevation_deg, input.pressure_hpa);
    let i0 = SOLAR_CONSTANT_W_M2 * earth_sun_factor(input.day_of_year);
    let sin_h = input.elevation_deg.to_radians().sin();

    cg1 * i0
        * sin_h
        * (-cg2 * am * (fh1 + fh2 * (input.linke_turbidity - 1.0))).exp()
        * (0.01 * am.powf(1.8)).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(elevation_deg: f64) -> ClearSkyInput {
        ClearSkyInput {
            elevation_deg,
            day_of_year: 172,
            altitude_m: 0.0,
            pressure_hpa: Some(1013.25),
            linke_turbidity: 3.0,
        }
    }

    #[test]
    fn air_mass_at_zenith_is_one() {
        assert!((air_mass(90.0, None) - 1.0).abs() < 0.01);
        assert!(air_mass(10.0, None) > 5.0);
        assert!(air_mass(0.0, None) < 40.0);
    }

    #[test]
    fn low_pressure_thins_the_air_column() {
        assert!(air_mass(45.0, Some(850.0)) < air_mass(45.0, Some(1013.25)));
    }

    #[test]
    fn ghi_is_realistic_at_high_sun() {
        let ghi = ghi_w_m2(&input(60.0));
        assert!(ghi > 800.0 && ghi < 1000.0, "{ghi}");
    }

    #[test]
    fn ghi_grows_with_elevation() {
        assert!(ghi_w_m2(&input(20.0)) < ghi_w_m2(&input(40.0)));
        assert_eq!(ghi_w_m2(&input(-3.0)), 0.0);
    }

    #[test]
    fn turbidity_dims_the_sky() {
        let clean = ghi_w_m2(&ClearSkyInput { linke_turbidity: 2.0, ..input(50.0) });
        let hazy = ghi_w_m2(&ClearSkyInput { linke_turbidity: 6.0, ..input(50.0) });
        assert!(hazy < clean);
    }

    #[test]
    fn linke_turbidity_bounds() {
        assert_eq!(linke_turbidity(None, 20.0), 3.0);
        assert_eq!(linke_turbidity(Some(0.0), 20.0), 2.0);
        let humid = linke_turbidity(Some(25.0), 25.0);
        assert!(humid > 3.5 && humid <= 7.0, "{humid}");
    }
}
