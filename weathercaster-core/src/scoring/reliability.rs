//! Input Reliability Score
//!
//! ```text
//! Input              Weight
//! -------------------------
//! Pressure             20
//! Wind history (6 h)   20
//! Pressure history     20
//! Wind direction       15
//! Cloud cover          15
//! Wind speed           10
//! -------------------------
//! Total               100
//! ```
//!
//! An input counts fully when its status is `ok` and not at all otherwise.

use serde::{Deserialize, Serialize};

use crate::constants::quality::{
    WEIGHT_CLOUD_COVER, WEIGHT_PRESSURE, WEIGHT_PRESSURE_HISTORY, WEIGHT_WIND_DIRECTION,
    WEIGHT_WIND_HISTORY, WEIGHT_WIND_SPEED,
};
use crate::observation::{InputStatus, ObservationSet};

/// Status of each scored input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputBreakdown {
    pub pressure: InputStatus,
    pub wind_direction: InputStatus,
    pub wind_speed: InputStatus,
    pub wind_history: InputStatus,
    pub pressure_history: InputStatus,
    pub cloud_cover: InputStatus,
}

impl InputBreakdown {
    /// Statuses of an observation set
    pub fn from_observations(obs: &ObservationSet) -> Self {
        Self {
            pressure: obs.pressure.status(),
            wind_direction: obs.wind_direction.status(),
            wind_speed: obs.wind_speed.status(),
            wind_history: obs.wind_direction_6h.status(),
            pressure_history: obs.pressure_change_6h.status(),
            cloud_cover: obs.cloud.status(),
        }
    }

    fn weighted(&self) -> [(InputStatus, u8); 6] {
        [
            (self.pressure, WEIGHT_PRESSURE),
            (self.wind_history, WEIGHT_WIND_HISTORY),
            (self.pressure_history, WEIGHT_PRESSURE_HISTORY),
            (self.wind_direction, WEIGHT_WIND_DIRECTION),
            (self.cloud_cover, WEIGHT_CLOUD_COVER),
            (self.wind_speed, WEIGHT_WIND_SPEED),
        ]
    }
}

/// Weighted completeness of the inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reliability {
    /// Percentage 0..=100
    pub score: u8,
    pub inputs: InputBreakdown,
}

/// Score an input breakdown
pub fn score_inputs(inputs: InputBreakdown) -> Reliability {
    let score = inputs
        .weighted()
        .iter()
        .filter(|(status, _)| *status == InputStatus::Ok)
        .map(|(_, weight)| *weight)
        .sum::<u8>()
        .min(100);
    Reliability { score, inputs }
}

impl Reliability {
    pub fn from_observations(obs: &ObservationSet) -> Self {
        score_inputs(InputBreakdown::from_observations(obs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observation::{CloudInput, Reading};

    fn all_ok() -> ObservationSet {
        ObservationSet {
            pressure: Reading::Ok(1013.0),
            wind_direction: Reading::Ok(180.0),
            wind_speed: Reading::Ok(10.0),
            cloud: Reading::Ok(CloudInput::Percent(20.0)),
            wind_direction_6h: Reading::Ok(170.0),
            pressure_change_6h: Reading::Ok(-1.0),
            ..ObservationSet::empty()
        }
    }

    #[test]
    fn full_inputs_score_100() {
        assert_eq!(Reliability::from_observations(&all_ok()).score, 100);
    }

    #[test]
    fn pressure_only_scores_20() {
        let obs = ObservationSet {
            pressure: Reading::Ok(1013.0),
            ..ObservationSet::empty()
        };
        assert_eq!(Reliability::from_observations(&obs).score, 20);
    }

    #[test]
    fn nothing_configured_scores_zero() {
        let report = Reliability::from_observations(&ObservationSet::empty());
        assert_eq!(report.score, 0);
        assert_eq!(report.inputs.cloud_cover, InputStatus::NotConfigured);
    }

    #[test]
    fn unavailable_gets_no_partial_credit() {
        let mut obs = all_ok();
        obs.wind_direction_6h = Reading::Unavailable;
        let report = Reliability::from_observations(&obs);
        assert_eq!(report.score, 80);
        assert_eq!(report.inputs.wind_history, InputStatus::Unavailable);
    }
}
