//! Matchup prediction engine.
//!
//! Game + team profiles → situational factors → {strength, score,
//! confidence, factor narration} → forecast record.

pub mod confidence;
pub mod factors;
pub mod predictor;
pub mod score;
pub mod situational;
pub mod strength;

pub use predictor::{AdjustmentPolicy, AdjustmentSummary, ModelConfig, PredictionEngine};
pub use situational::SituationalFactors;

/// Round half up (`2.5 → 3`, `-2.5 → -2`), as the published figures do.
pub(crate) fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}
