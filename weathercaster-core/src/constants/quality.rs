//! Confidence Adjustments and Reliability Weights
//!
//! Confidence describes how much the forecast itself can be trusted;
//! reliability describes how complete the inputs behind it were. They are
//! reported separately and never combined.

// ===== CROSS-VALIDATION =====

/// Confidence bonus when Sager and Zambretti land in the same bucket.
pub const AGREE_BONUS: u8 = 10;

/// Confidence penalty for non-adjacent buckets.
pub const DIVERGE_PENALTY: u8 = 10;

/// Confidence penalty for buckets three or more steps apart.
pub const CONFLICT_PENALTY: u8 = 20;

/// Floor applied after a divergence penalty.
pub const DIVERGE_FLOOR: u8 = 40;

/// Absolute confidence floor.
pub const CONFIDENCE_MIN: u8 = 30;

/// Absolute confidence ceiling.
pub const CONFIDENCE_MAX: u8 = 99;

// ===== RELIABILITY WEIGHTS (sum to 100) =====

/// Weight of the current pressure reading.
pub const WEIGHT_PRESSURE: u8 = 20;

/// Weight of the 6 h wind direction history.
pub const WEIGHT_WIND_HISTORY: u8 = 20;

/// Weight of the 6 h pressure history.
pub const WEIGHT_PRESSURE_HISTORY: u8 = 20;

/// Weight of the current wind direction.
pub const WEIGHT_WIND_DIRECTION: u8 = 15;

/// Weight of the cloud cover input.
pub const WEIGHT_CLOUD_COVER: u8 = 15;

/// Weight of the wind speed reading.
pub const WEIGHT_WIND_SPEED: u8 = 10;

// ===== DAY-3 BLEND =====

/// Weight of the Sager vote on day 3 with a fresh external source.
pub const DAY3_SAGER_WEIGHT: f64 = 0.4;

/// Weight of the external vote on day 3 with a fresh external source.
pub const DAY3_EXTERNAL_WEIGHT: f64 = 0.6;

/// Share of a vote given to each neighbouring bucket.
pub const VOTE_NEIGHBOUR_SHARE: f64 = 0.5;
