//! Sager / Zambretti Cross-Validation
//!
//! Both conditions are reduced to the coarse severity scale and compared
//! by ordinal distance:
//!
//! ```text
//! distance  label     adjustment
//! --------------------------------------
//! 0         agree     +10, at most 99
//! 1         close      0
//! 2         diverge   -10, not below 40
//! ≥ 3       conflict  -20, not below 30
//! ```
//!
//! The adjusted value is finally clamped to the reportable range.

use serde::{Deserialize, Serialize};

use crate::condition::{CoarseCondition, Condition};
use crate::constants::quality::{
    AGREE_BONUS, CONFIDENCE_MAX, CONFIDENCE_MIN, CONFLICT_PENALTY, DIVERGE_FLOOR, DIVERGE_PENALTY,
};
use crate::scoring::Confidence;

/// How well two forecast methods agree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Agreement {
    Agree,
    Close,
    Diverge,
    Conflict,
}

impl Agreement {
    pub fn from_distance(distance: usize) -> Self {
        match distance {
            0 => Agreement::Agree,
            1 => Agreement::Close,
            2 => Agreement::Diverge,
            _ => Agreement::Conflict,
        }
    }

    /// Adjust a base confidence for this level of agreement
    pub fn adjust(self, base: u8) -> Confidence {
        let adjusted = match self {
            Agreement::Agree => base.saturating_add(AGREE_BONUS).min(CONFIDENCE_MAX),
            Agreement::Close => base,
            Agreement::Diverge => base.saturating_sub(DIVERGE_PENALTY).max(DIVERGE_FLOOR),
            Agreement::Conflict => base.saturating_sub(CONFLICT_PENALTY).max(CONFIDENCE_MIN),
        };
        Confidence::new(adjusted)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Agreement::Agree => "agree",
            Agreement::Close => "close",
            Agreement::Diverge => "diverge",
            Agreement::Conflict => "conflict",
        }
    }
}

/// Outcome of comparing the two methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossValidation {
    pub agreement: Agreement,
    pub confidence: Confidence,
    pub sager: CoarseCondition,
    pub zambretti: CoarseCondition,
}

/// Compare the Sager and Zambretti conditions and adjust confidence
pub fn cross_validate(sager: Condition, zambretti: Condition, base_confidence: u8) -> CrossValidation {
    let (sager, zambretti) = (sager.coarse(), zambretti.coarse());
    let agreement = Agreement::from_distance(sager.distance(zambretti));
    CrossValidation {
        agreement,
        confidence: agreement.adjust(base_confidence),
        sager,
        zambretti,
    }
}
