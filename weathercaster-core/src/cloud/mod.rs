//! Cloud-Cover Physical Model
//!
//! ## Overview
//!
//! Few weather stations have a sky camera or ceilometer, but most have a
//! light sensor. This module turns an illuminance (lux) or irradiance
//! (W/m²) reading into an estimated cloud cover by comparing it with what a
//! cloudless sky would deliver at this place and time.
//!
//! ## Pipeline
//!
//! ```text
//! measured ─────────────────────────────────────────────┐
//!                                                       ▼
//! sun elevation ──► Ineichen-Perez GHI ──► × 120 lm/W ──► × turbidity ──► × calibration ──► ln ratio ──► cover %
//!                     (air mass, TL)       (lux only)    (Hänel)          (site EMA)
//! ```
//!
//! 1. **Night bypass**: at or below 5° elevation a light sensor says
//!    nothing about clouds. The external source's cloud cover is used if
//!    there is one, otherwise 50%.
//! 2. **Clear-sky baseline**: see [`clear_sky`].
//! 3. **Turbidity**: see [`turbidity`].
//! 4. **Calibration**: see [`calibration`].
//! 5. **Inversion**: Beer-Lambert style attenuation through cloud gives
//!
//! ```text
//! cover = clamp(ln(clear_calibrated / measured) · 100, 0, 100)
//! ```
//!
//! A reading at or above the calibrated clear-sky value yields 0%.
//!
//! ## Calibration side effect
//!
//! When the external source confirms a clear sky near solar noon, the ratio
//! `measured / clear_uncalibrated` is folded into the site factor. The cover
//! returned for that cycle is still computed with the factor as it was
//! before the update.
//!
//! ## Usage Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use weathercaster_core::cloud::CloudModel;
//! use weathercaster_core::config::Site;
//! use weathercaster_core::observation::{CloudInput, ObservationSet};
//!
//! let site = Site { latitude: 45.0, longitude: 0.0, elevation_m: 0.0 };
//! let mut model = CloudModel::new(site, 1.0);
//! let noon = Utc.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap();
//!
//! let estimate = model.estimate(CloudInput::Irradiance(200.0), &ObservationSet::empty(), None, noon);
//! assert!(estimate.cover_pct > 80.0);
//! ```

pub mod calibration;
pub mod clear_sky;
pub mod turbidity;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Site;
use crate::constants::physics::{
    HUMIDITY_ONLY_ASSUMED_TEMP_C, LUMINOUS_EFFICACY_LM_PER_W, NIGHT_FALLBACK_CLOUD_PCT,
    TWILIGHT_ELEVATION_DEG,
};
use crate::observation::{CloudInput, ObservationSet};
use crate::solar::{day_of_year, elevation_deg, noon_elevation_deg};

pub use calibration::CalibrationState;
use clear_sky::ClearSkyInput;

/// Where a cloud-cover estimate came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloudSource {
    /// Sensor reports cover directly
    Sensor,
    /// Derived from light level through the clear-sky model
    Physical,
    /// Sun too low, external source's cover used
    NightExternal,
    /// Sun too low and no external cover
    NightDefault,
}

/// Result of one cloud-cover estimate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloudEstimate {
    pub cover_pct: f64,
    pub source: CloudSource,
    pub elevation_deg: f64,
    /// Whether this estimate also updated the calibration factor
    pub calibration_updated: bool,
}

/// Physical cloud-cover estimator with site calibration
#[derive(Debug, Clone)]
pub struct CloudModel {
    site: Site,
    calibration: CalibrationState,
}

impl CloudModel {
    /// Model for a site with an initial calibration factor
    pub fn new(site: Site, calibration_factor: f64) -> Self {
        Self::with_calibration(site, CalibrationState::with_factor(calibration_factor))
    }

    pub fn with_calibration(site: Site, calibration: CalibrationState) -> Self {
        Self { site, calibration }
    }

    pub fn calibration(&self) -> CalibrationState {
        self.calibration
    }

    /// Estimate cloud cover from a sensor reading
    ///
    /// `external_cloud_pct` is the external source's current cover, used
    /// at night and as the clear-sky confirmation for calibration.
    pub fn estimate(
        &mut self,
        input: CloudInput,
        obs: &ObservationSet,
        external_cloud_pct: Option<f64>,
        now: DateTime<Utc>,
    ) -> CloudEstimate {
        let elevation = elevation_deg(self.site.latitude, self.site.longitude, now);

        let (measured, efficacy) = match input {
            CloudInput::Percent(pct) => {
                return CloudEstimate {
                    cover_pct: pct.clamp(0.0, 100.0),
                    source: CloudSource::Sensor,
                    elevation_deg: elevation,
                    calibration_updated: false,
                };
            }
            CloudInput::Lux(lux) => (lux, LUMINOUS_EFFICACY_LM_PER_W),
            CloudInput::Irradiance(w) => (w, 1.0),
        };

        if elevation <= TWILIGHT_ELEVATION_DEG {
            let (cover_pct, source) = match external_cloud_pct {
                Some(cover) => (cover.clamp(0.0, 100.0), CloudSource::NightExternal),
                None => (NIGHT_FALLBACK_CLOUD_PCT, CloudSource::NightDefault),
            };
            return CloudEstimate {
                cover_pct,
                source,
                elevation_deg: elevation,
                calibration_updated: false,
            };
        }

        let doy = day_of_year(now);
        let vapor = turbidity::vapor_pressure(obs);
        let temperature = obs.temperature.value().unwrap_or(HUMIDITY_ONLY_ASSUMED_TEMP_C);
        let clear = clear_sky::ghi_w_m2(&ClearSkyInput {
            elevation_deg: elevation,
            day_of_year: doy,
            altitude_m: self.site.elevation_m,
            pressure_hpa: obs.pressure.value(),
            linke_turbidity: clear_sky::linke_turbidity(vapor, temperature),
        }) * efficacy;
        let clear_uncalibrated = clear * turbidity::turbidity_factor(vapor);

        let cover_pct = cover_from_ratio(clear_uncalibrated * self.calibration.factor(), measured);

        let mut calibration_updated = false;
        if calibration::qualifies(
            external_cloud_pct,
            elevation,
            noon_elevation_deg(self.site.latitude, doy),
        ) && clear_uncalibrated > 0.0
        {
            let previous = self.calibration.factor();
            let factor = self.calibration.apply_sample(measured / clear_uncalibrated);
            calibration_updated = true;
            log::debug!(
                "Calibration updated {:.3} -> {:.3} (elevation {:.1}°)",
                previous,
                factor,
                elevation
            );
        }

        CloudEstimate {
            cover_pct,
            source: CloudSource::Physical,
            elevation_deg: elevation,
            calibration_updated,
        }
    }
}

/// Invert measured light against the calibrated clear-sky value
pub fn cover_from_ratio(clear_calibrated: f64, measured: f64) -> f64 {
    if clear_calibrated <= 0.0 {
        return 0.0;
    }
    if measured <= 0.0 {
        return 100.0;
    }
    if measured >= clear_calibrated {
        return 0.0;
    }
    ((clear_calibrated / measured).ln() * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn site() -> Site {
        Site { latitude: 45.0, longitude: 0.0, elevation_m: 100.0 }
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap()
    }

    #[test]
    fn percent_passes_through_clamped() {
        let mut model = CloudModel::new(site(), 1.0);
        let obs = ObservationSet::empty();
        let e = model.estimate(CloudInput::Percent(120.0), &obs, None, noon());
        assert_eq!(e.cover_pct, 100.0);
        assert_eq!(e.source, CloudSource::Sensor);
    }

    #[test]
    fn ratio_inversion() {
        assert_eq!(cover_from_ratio(800.0, 800.0), 0.0);
        assert_eq!(cover_from_ratio(800.0, 900.0), 0.0);
        assert_eq!(cover_from_ratio(800.0, 0.0), 100.0);
        let half = cover_from_ratio(800.0, 400.0);
        assert!((half - 69.31).abs() < 0.01, "{half}");
    }

    #[test]
    fn brighter_means_fewer_clouds() {
        let mut model = CloudModel::new(site(), 1.0);
        let obs = ObservationSet::empty();
        let dim = model.estimate(CloudInput::Irradiance(300.0), &obs, None, noon());
        let bright = model.estimate(CloudInput::Irradiance(700.0), &obs, None, noon());
        assert!(bright.cover_pct < dim.cover_pct);
        assert_eq!(bright.source, CloudSource::Physical);
    }

    #[test]
    fn lux_and_irradiance_agree() {
        let mut model = CloudModel::new(site(), 1.0);
        let obs = ObservationSet::empty();
        let w = model.estimate(CloudInput::Irradiance(500.0), &obs, None, noon());
        let lx = model.estimate(CloudInput::Lux(500.0 * 120.0), &obs, None, noon());
        assert!((w.cover_pct - lx.cover_pct).abs() < 1e-9);
    }

    #[test]
    fn night_bypasses_the_model() {
        let mut model = CloudModel::new(site(), 1.0);
        let obs = ObservationSet::empty();
        let midnight = Utc.with_ymd_and_hms(2024, 6, 21, 0, 0, 0).unwrap();

        let e = model.estimate(CloudInput::Lux(0.0), &obs, Some(30.0), midnight);
        assert_eq!((e.cover_pct, e.source), (30.0, CloudSource::NightExternal));

        let e = model.estimate(CloudInput::Lux(0.0), &obs, None, midnight);
        assert_eq!((e.cover_pct, e.source), (50.0, CloudSource::NightDefault));
    }

    #[test]
    fn clear_sky_near_noon_calibrates() {
        let mut model = CloudModel::new(site(), 1.0);
        let obs = ObservationSet::empty();
        let first = model.estimate(CloudInput::Irradiance(600.0), &obs, Some(0.0), noon());
        assert!(first.calibration_updated);
        assert!(model.calibration().factor() < 1.0);

        // Cover is computed with the factor before the update
        let mut fresh = CloudModel::new(site(), 1.0);
        let uncalibrated = fresh.estimate(CloudInput::Irradiance(600.0), &obs, None, noon());
        assert_eq!(first.cover_pct, uncalibrated.cover_pct);

        // Cloudy external report does not calibrate
        let before = model.calibration();
        let e = model.estimate(CloudInput::Irradiance(600.0), &obs, Some(40.0), noon());
        assert!(!e.calibration_updated);
        assert_eq!(model.calibration(), before);
    }
}
