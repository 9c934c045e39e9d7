//! Explainable matchup prediction engine for pro football.
//!
//! Given two teams and game context, produces a win-probability split, a
//! projected score, a confidence figure and ranked contributing factors.

pub mod config;
pub mod engine;
pub mod error;
pub mod store;

pub use engine::{AdjustmentPolicy, AdjustmentSummary, ModelConfig, PredictionEngine, SituationalFactors};
pub use error::{PredictionError, ProfileLoadError};
pub use store::models::{ForecastRecord, GameRecord, GameStatus, ProjectedScore, TeamProfile, TeamRef};
pub use store::TeamProfileStore;
