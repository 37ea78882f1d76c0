//! Solar Position Approximation
//!
//! ## Physics Background
//!
//! The cloud-cover model needs to know how much sunlight a cloudless sky
//! would deliver right now, which depends on how high the sun stands. A
//! full ephemeris (NREL SPA) is accurate to 0.0003° but overkill: the
//! clear-sky models downstream carry a few percent of uncertainty anyway.
//! The approximations below are accurate to about 0.5° of elevation.
//!
//! ### Declination (Cooper, 1969)
//!
//! ```text
//! δ = 23.44° · sin(2π · (284 + n) / 365)
//! ```
//!
//! ### Equation of time (Spencer-style fit)
//!
//! ```text
//! B   = 2π · (n - 81) / 364
//! EoT = 9.87 · sin 2B - 7.53 · cos B - 1.5 · sin B    [minutes]
//! ```
//!
//! ### Elevation
//!
//! ```text
//! LST = UTC + λ/15 + EoT/60            (local solar time, hours)
//! H   = 15° · (LST - 12)               (hour angle)
//! sin h = sin φ · sin δ + cos φ · cos δ · cos H
//! ```
//!
//! ### Earth-Sun distance
//!
//! The orbit's eccentricity changes extraterrestrial irradiance by ±3.3%
//! over the year:
//!
//! ```text
//! E0 = 1 + 0.033 · cos(2π · n / 365)
//! ```

use std::f64::consts::PI;

use chrono::{DateTime, Datelike, Timelike, Utc};

use crate::constants::physics::{
    DAYS_PER_YEAR, DECLINATION_DAY_OFFSET, EARTH_AXIAL_TILT_DEG, ECCENTRICITY_AMPLITUDE,
};

/// Day of year, 1 for January 1st
pub fn day_of_year(instant: DateTime<Utc>) -> u32 {
    instant.ordinal()
}

/// Solar declination in degrees for a day of year
pub fn declination_deg(day_of_year: u32) -> f64 {
    EARTH_AXIAL_TILT_DEG
        * (2.0 * PI * (DECLINATION_DAY_OFFSET + day_of_year as f64) / DAYS_PER_YEAR).sin()
}

/// Earth-Sun distance correction factor `E0`
pub fn earth_sun_factor(day_of_year: u32) -> f64 {
    1.0 + ECCENTRICITY_AMPLITUDE * (2.0 * PI * day_of_year as f64 / DAYS_PER_YEAR).cos()
}

/// Equation of time in minutes
pub fn equation_of_time_minutes(day_of_year: u32) -> f64 {
    let b = 2.0 * PI * (day_of_year as f64 - 81.0) / 364.0;
    9.87 * (2.0 * b).sin() - 7.53 * b.cos() - 1.5 * b.sin()
}

/// Local apparent solar hour in `[0, 24)`
pub fn local_solar_hour(longitude: f64, instant: DateTime<Utc>) -> f64 {
    let utc_hours =
        instant.hour() as f64 + instant.minute() as f64 / 60.0 + instant.second() as f64 / 3600.0;
    let eot_hours = equation_of_time_minutes(day_of_year(instant)) / 60.0;
    (utc_hours + longitude / 15.0 + eot_hours).rem_euclid(24.0)
}

/// Sun elevation above the horizon in degrees
pub fn elevation_deg(latitude: f64, longitude: f64, instant: DateTime<Utc>) -> f64 {
    let declination = declination_deg(day_of_year(instant)).to_radians();
    let hour_angle = (15.0 * (local_solar_hour(longitude, instant) - 12.0)).to_radians();
    let phi = latitude.to_radians();

    let sin_h = phi.sin() * declination.sin() + phi.cos() * declination.cos() * hour_angle.cos();
    sin_h.clamp(-1.0, 1.0).asin().to_degrees()
}

/// Theoretical elevation of the sun at solar noon
pub fn noon_elevation_deg(latitude: f64, day_of_year: u32) -> f64 {
    90.0 - (latitude - declination_deg(day_of_year)).abs()
}

/// Whether the sun's upper limb is above the horizon
///
/// Uses the conventional -0.833° that accounts for refraction and the
/// solar disc radius.
pub fn is_daylight(latitude: f64, longitude: f64, instant: DateTime<Utc>) -> bool {
    elevation_deg(latitude, longitude, instant) > -0.833
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn declination_at_solstices() {
        // June 21 = day 172, December 21 = day 355
        assert!((declination_deg(172) - 23.44).abs() < 0.5);
        assert!((declination_deg(355) + 23.44).abs() < 0.5);
    }

    #[test]
    fn earth_sun_factor_peaks_in_january() {
        assert!(earth_sun_factor(1) > 1.03);
        assert!(earth_sun_factor(183) < 0.97);
    }

    #[test]
    fn noon_elevation_mid_latitude_summer() {
        let e = noon_elevation_deg(45.0, 172);
        assert!((e - 68.44).abs() < 0.5, "{e}");
    }

    #[test]
    fn elevation_follows_the_day() {
        // Greenwich, summer solstice
        let noon = Utc.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap();
        let midnight = Utc.with_ymd_and_hms(2024, 6, 21, 0, 0, 0).unwrap();
        let e_noon = elevation_deg(51.48, 0.0, noon);
        let e_midnight = elevation_deg(51.48, 0.0, midnight);

        assert!((e_noon - 62.0).abs() < 1.0, "{e_noon}");
        assert!(e_midnight < 0.0);
        assert!(is_daylight(51.48, 0.0, noon));
        assert!(!is_daylight(51.48, 0.0, midnight));
    }

    #[test]
    fn longitude_shifts_solar_time() {
        let t = Utc.with_ymd_and_hms(2024, 4, 15, 12, 0, 0).unwrap();
        let greenwich = local_solar_hour(0.0, t);
        let east = local_solar_hour(90.0, t);
        assert!(((east - greenwich) - 6.0).abs() < 1e-9);
    }
}
