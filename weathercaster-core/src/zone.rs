//! Latitude Zones
//!
//! The Sager tables were drawn up for the northern temperate belt, where
//! weather systems travel west to east and a backing wind ahead of a low
//! means deterioration. Elsewhere the same physics shows up with a rotated
//! or mirrored compass:
//!
//! ```text
//! Zone                 Latitude           Direction table (temperate frame order)
//! ---------------------------------------------------------------------------
//! Northern Polar       ≥ 66.56            S  SW W  NW N  NE E  SE
//! Northern Temperate   [23.44, 66.56)     N  NE E  SE S  SW W  NW
//! Northern Tropical    [0, 23.44)         S  SW W  NW N  NE E  SE
//! Southern Tropical    (-23.44, 0)        N  NW W  SW S  SE E  NE
//! Southern Temperate   (-66.56, -23.44]   S  SE E  NE N  NW W  SW
//! Southern Polar       ≤ -66.56           N  NW W  SW S  SE E  NE
//! ```
//!
//! The position of the observed cardinal in its zone's table is the index
//! the Sager letters are built from. In the southern zones the rotational
//! sense of veering is reversed as well.

use serde::{Deserialize, Serialize};

use crate::angles::Cardinal;
use crate::constants::forecast::{POLAR_CIRCLE_DEG, TROPIC_DEG};

use Cardinal::{E, N, NE, NW, S, SE, SW, W};

const NORTHERN_TEMPERATE: [Cardinal; 8] = [N, NE, E, SE, S, SW, W, NW];
const NORTHERN_ROTATED: [Cardinal; 8] = [S, SW, W, NW, N, NE, E, SE];
const SOUTHERN_TEMPERATE: [Cardinal; 8] = [S, SE, E, NE, N, NW, W, SW];
const SOUTHERN_ROTATED: [Cardinal; 8] = [N, NW, W, SW, S, SE, E, NE];

/// Climate zone of the station, fixed for the engine's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LatitudeZone {
    NorthernPolar,
    NorthernTemperate,
    NorthernTropical,
    SouthernTropical,
    SouthernTemperate,
    SouthernPolar,
}

impl LatitudeZone {
    pub fn from_latitude(latitude: f64) -> Self {
        if latitude >= POLAR_CIRCLE_DEG {
            LatitudeZone::NorthernPolar
        } else if latitude >= TROPIC_DEG {
            LatitudeZone::NorthernTemperate
        } else if latitude >= 0.0 {
            LatitudeZone::NorthernTropical
        } else if latitude > -TROPIC_DEG {
            LatitudeZone::SouthernTropical
        } else if latitude > -POLAR_CIRCLE_DEG {
            LatitudeZone::SouthernTemperate
        } else {
            LatitudeZone::SouthernPolar
        }
    }

    pub fn is_southern(self) -> bool {
        matches!(
            self,
            LatitudeZone::SouthernTropical
                | LatitudeZone::SouthernTemperate
                | LatitudeZone::SouthernPolar
        )
    }

    /// Real cardinals in the order of the temperate-frame table
    pub fn directions(self) -> &'static [Cardinal; 8] {
        match self {
            LatitudeZone::NorthernTemperate => &NORTHERN_TEMPERATE,
            LatitudeZone::NorthernPolar | LatitudeZone::NorthernTropical => &NORTHERN_ROTATED,
            LatitudeZone::SouthernTemperate => &SOUTHERN_TEMPERATE,
            LatitudeZone::SouthernPolar | LatitudeZone::SouthernTropical => &SOUTHERN_ROTATED,
        }
    }

    /// Table position of an observed cardinal, 0..8
    pub fn position(self, cardinal: Cardinal) -> usize {
        self.directions()
            .iter()
            .position(|c| *c == cardinal)
            .unwrap_or(cardinal.index())
    }

    /// Real cardinal at a table position (wrapping)
    pub fn cardinal_at(self, position: usize) -> Cardinal {
        self.directions()[position % 8]
    }

    /// Human-readable name
    pub fn name(self) -> &'static str {
        match self {
            LatitudeZone::NorthernPolar => "Northern Polar",
            LatitudeZone::NorthernTemperate => "Northern Temperate",
            LatitudeZone::NorthernTropical => "Northern Tropical",
            LatitudeZone::SouthernTropical => "Southern Tropical",
            LatitudeZone::SouthernTemperate => "Southern Temperate",
            LatitudeZone::SouthernPolar => "Southern Polar",
        }
    }
}
