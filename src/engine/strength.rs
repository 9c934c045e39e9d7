//! Single-scalar team strength for one side of a matchup.
//!
//! Strength is only meaningful relative to the opponent's strength in the
//! same game; the two are normalized into a win-probability split.

use super::situational::SituationalFactors;
use crate::store::models::TeamProfile;

/// No team is ever rated below this, so the probability ratio stays defined.
pub const MIN_STRENGTH: f64 = 30.0;

const HOME_ADVANTAGE_WEIGHT: f64 = 0.3;
const RECENT_FORM_WEIGHT: f64 = 0.2;
const TURNOVER_WEIGHT: f64 = 0.5;
/// Bonus per point of bad weather for defense-leaning teams.
const BAD_WEATHER_DEFENSE_WEIGHT: f64 = 0.2;
/// Extra weight on current form in win-or-go-home games.
const PLAYOFF_FORM_WEIGHT: f64 = 0.1;
const RIVALRY_BONUS: f64 = 3.0;

/// Strength of one side, never below [`MIN_STRENGTH`].
pub fn team_strength(profile: &TeamProfile, is_home: bool, factors: &SituationalFactors) -> f64 {
    let mut strength = (profile.offensive_rating + profile.defensive_rating) / 2.0;

    if is_home {
        strength += profile.home_advantage * HOME_ADVANTAGE_WEIGHT;
    }

    strength += profile.recent_form * RECENT_FORM_WEIGHT;
    strength += profile.turnover_differential as f64 * TURNOVER_WEIGHT;
    strength += profile.injury_impact;

    // Bad weather favours defense-first teams
    if factors.weather_impact < 0.0 && profile.is_defense_leaning() {
        strength += factors.weather_impact.abs() * BAD_WEATHER_DEFENSE_WEIGHT;
    }

    if factors.playoff {
        strength += profile.recent_form * PLAYOFF_FORM_WEIGHT;
    }

    // Applied to each side independently, which pulls the split toward 50/50
    if factors.rivalry {
        strength += RIVALRY_BONUS;
    }

    strength.max(MIN_STRENGTH)
}

/// Normalize two strengths into whole percentages summing to 100.
pub fn win_probability_split(home_strength: f64, away_strength: f64) -> (u8, u8) {
    let home = super::round_half_up(100.0 * home_strength / (home_strength + away_strength))
        .clamp(0.0, 100.0) as u8;
    (home, 100 - home)
}
