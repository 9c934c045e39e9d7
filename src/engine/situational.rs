use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::store::is_rivalry;
use crate::store::models::GameRecord;

/// Kickoff hours that count as prime time.
pub const PRIME_TIME_HOURS: [u32; 2] = [19, 20];

/// Per-matchup contextual modifiers, derived once per prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SituationalFactors {
    /// −10 (awful) .. +10 (ideal)
    pub weather_impact: f64,
    pub rest_days: u32,
    pub rivalry: bool,
    pub playoff: bool,
    pub prime_time: bool,
    /// Miles
    pub travel_distance: f64,
}

impl SituationalFactors {
    /// Neutral context: no weather effect, normal rest, nothing special.
    pub fn neutral() -> Self {
        SituationalFactors {
            weather_impact: 0.0,
            rest_days: 7,
            rivalry: false,
            playoff: false,
            prime_time: false,
            travel_distance: 500.0,
        }
    }

    pub fn is_bad_weather(&self) -> bool {
        self.weather_impact < -5.0
    }

    pub fn is_good_weather(&self) -> bool {
        self.weather_impact > 5.0
    }
}

/// Derive the situational bundle for `game`.
///
/// Rivalry, playoff and prime-time flags come from the record. Weather,
/// rest and travel have no live feed and are sampled from `rng`.
pub fn analyze(game: &GameRecord, regular_season_weeks: u32, rng: &mut impl Rng) -> SituationalFactors {
    SituationalFactors {
        weather_impact: rng.gen_range(-10.0..10.0),
        rest_days: rng.gen_range(4..=10),
        rivalry: is_rivalry(&game.home_team.id, &game.away_team.id),
        playoff: game.week > regular_season_weeks,
        prime_time: game
            .kickoff_hour()
            .is_some_and(|h| PRIME_TIME_HOURS.contains(&h)),
        travel_distance: rng.gen_range(500.0..1500.0),
    }
}
