//! Angle Math for Wind Directions
//!
//! ## The Wraparound Problem
//!
//! Wind direction is a circular quantity. The arithmetic mean of 350° and
//! 10° is 180°, the exact opposite of the true mean (0°). Every operation on
//! directions in this crate therefore goes through unit vectors:
//!
//! ```text
//! x̄ = Σ wᵢ · sin θᵢ        ȳ = Σ wᵢ · cos θᵢ
//! θ̄ = atan2(x̄, ȳ)  (mod 360)
//! ```
//!
//! Weighting each sample by its wind speed gives the direction the air mass
//! actually travelled, so a gust from one side outweighs a lull from the other.
//! If the weighted vectors cancel out (two equal opposite winds) there is no
//! meaningful mean and `None` is returned.
//!
//! ## Signed Differences
//!
//! Veering and backing are judged from the shortest signed rotation between
//! two directions, always in `(-180, 180]`:
//!
//! ```text
//! diff = ((current - reference + 180) mod 360) - 180
//! ```

use serde::{Deserialize, Serialize};

/// Vectors shorter than this are treated as cancelled out
const MIN_RESULTANT: f64 = 1e-9;

/// Result of a vector average over a window of wind samples
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorAverage {
    /// Circular mean direction in `[0, 360)`
    pub direction: f64,
    /// Scalar mean speed, `None` when no speed series was available
    pub speed: Option<f64>,
}

/// Fold any angle into `[0, 360)`
pub fn normalize_degrees(degrees: f64) -> f64 {
    let folded = degrees.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs due to rounding
    if folded >= 360.0 {
        0.0
    } else {
        folded
    }
}

/// Shortest signed rotation from `reference` to `current`, in `(-180, 180]`
///
/// Positive values are clockwise.
pub fn signed_difference(current: f64, reference: f64) -> f64 {
    let diff = (current - reference + 180.0).rem_euclid(360.0) - 180.0;
    if diff == -180.0 {
        180.0
    } else {
        diff
    }
}

/// Weighted circular mean of `(direction, weight)` pairs
///
/// Returns `None` for an empty input or when the vectors cancel out.
pub fn circular_mean<I>(samples: I) -> Option<f64>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let (mut x, mut y) = (0.0_f64, 0.0_f64);
    for (direction, weight) in samples {
        let rad = direction.to_radians();
        x += weight * rad.sin();
        y += weight * rad.cos();
    }

    if x.hypot(y) < MIN_RESULTANT {
        return None;
    }
    Some(normalize_degrees(x.atan2(y).to_degrees()))
}

/// 8-point compass direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Cardinal {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Cardinal {
    /// All cardinals clockwise from north
    pub const ALL: [Cardinal; 8] = [
        Cardinal::N,
        Cardinal::NE,
        Cardinal::E,
        Cardinal::SE,
        Cardinal::S,
        Cardinal::SW,
        Cardinal::W,
        Cardinal::NW,
    ];

    /// Bucket a bearing into its 45° sector, centred on each cardinal
    pub fn from_degrees(degrees: f64) -> Self {
        let index = ((normalize_degrees(degrees) + 22.5) / 45.0) as usize % 8;
        Self::ALL[index]
    }

    /// Position clockwise from north, 0..8
    pub fn index(self) -> usize {
        self as usize
    }

    /// Cardinal `steps` positions clockwise (negative for anticlockwise)
    pub fn rotate(self, steps: i32) -> Self {
        Self::ALL[(self.index() as i32 + steps).rem_euclid(8) as usize]
    }

    /// Lowercase abbreviation, e.g. `"ne"`
    pub fn key(self) -> &'static str {
        match self {
            Cardinal::N => "n",
            Cardinal::NE => "ne",
            Cardinal::E => "e",
            Cardinal::SE => "se",
            Cardinal::S => "s",
            Cardinal::SW => "sw",
            Cardinal::W => "w",
            Cardinal::NW => "nw",
        }
    }

    /// Full English name, e.g. `"Northeast"`
    pub fn name(self) -> &'static str {
        match self {
            Cardinal::N => "North",
            Cardinal::NE => "Northeast",
            Cardinal::E => "East",
            Cardinal::SE => "Southeast",
            Cardinal::S => "South",
            Cardinal::SW => "Southwest",
            Cardinal::W => "West",
            Cardinal::NW => "Northwest",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        let d = signed_difference(a, b).abs();
        assert!(d < 1e-6, "{a} vs {b}");
    }

    #[test]
    fn mean_across_north_is_north() {
        let mean = circular_mean([(350.0, 1.0), (10.0, 1.0)]).unwrap();
        assert_close(mean, 0.0);
    }

    #[test]
    fn mean_is_weighted_by_speed() {
        let mean = circular_mean([(90.0, 3.0), (180.0, 1.0)]).unwrap();
        assert!(mean > 90.0 && mean < 135.0, "{mean}");
    }

    #[test]
    fn opposite_winds_cancel() {
        assert!(circular_mean([(0.0, 1.0), (180.0, 1.0)]).is_none());
        assert!(circular_mean(std::iter::empty()).is_none());
    }

    #[test]
    fn signed_difference_takes_short_way() {
        assert_eq!(signed_difference(10.0, 350.0), 20.0);
        assert_eq!(signed_difference(350.0, 10.0), -20.0);
        assert_eq!(signed_difference(190.0, 180.0), 10.0);
        assert_eq!(signed_difference(0.0, 180.0), 180.0);
    }

    #[test]
    fn cardinal_buckets() {
        assert_eq!(Cardinal::from_degrees(0.0), Cardinal::N);
        assert_eq!(Cardinal::from_degrees(22.4), Cardinal::N);
        assert_eq!(Cardinal::from_degrees(22.5), Cardinal::NE);
        assert_eq!(Cardinal::from_degrees(180.0), Cardinal::S);
        assert_eq!(Cardinal::from_degrees(337.5), Cardinal::N);
        assert_eq!(Cardinal::from_degrees(360.0), Cardinal::N);
        assert_eq!(Cardinal::NW.rotate(1), Cardinal::N);
        assert_eq!(Cardinal::N.rotate(-1), Cardinal::NW);
    }

    #[test]
    fn normalize_folds_negative_angles() {
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(725.0), 5.0);
    }
}
