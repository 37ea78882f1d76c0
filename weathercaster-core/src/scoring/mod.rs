//! Confidence and Reliability Scoring
//!
//! ## Overview
//!
//! Two numbers describe how far a forecast can be trusted, and they answer
//! different questions:
//!
//! - **Confidence** (30-99): how sure the forecast methods are. Starts from
//!   the Sager lookup (exact table hit or default entry, defaulted trends)
//!   and is adjusted by agreement with the independent Zambretti method.
//! - **Reliability** (0-100): how complete the inputs were. A weighted sum
//!   over the six inputs that matter most to the Sager method.
//!
//! ```text
//! Sager lookup ──► base confidence ──┐
//!                                    ├──► cross-validation ──► Confidence
//! Zambretti ─────► condition ────────┘
//!
//! ObservationSet ──► per-input status ──► weighted sum ──► Reliability
//! ```

pub mod cross_validation;
pub mod reliability;

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::quality::{CONFIDENCE_MAX, CONFIDENCE_MIN};

pub use cross_validation::{cross_validate, Agreement, CrossValidation};
pub use reliability::{score_inputs, InputBreakdown, Reliability};

/// Forecast confidence in percent, always within `[30, 99]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Confidence(u8);

impl Confidence {
    /// Lowest reportable confidence
    pub const MIN: Self = Self(CONFIDENCE_MIN);

    /// Highest reportable confidence; a forecast is never certain
    pub const MAX: Self = Self(CONFIDENCE_MAX);

    /// Create, clamping into range
    pub fn new(percent: u8) -> Self {
        Self(percent.clamp(CONFIDENCE_MIN, CONFIDENCE_MAX))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
