use rand::Rng;

use super::round_half_up;
use super::situational::SituationalFactors;
use crate::store::models::{ProjectedScore, TeamProfile};

/// Points an average offense scores against an average defense.
const BASELINE_POINTS: f64 = 20.0;
/// Points per rating point of offense-over-defense edge.
const MATCHUP_WEIGHT: f64 = 0.15;
const HOME_FIELD_POINTS: f64 = 2.5;
const BAD_WEATHER_PENALTY: f64 = 3.0;
const PLAYOFF_PENALTY: f64 = 2.0;
const TURNOVER_POINTS: f64 = 0.3;
/// Each side's jitter is drawn from [−JITTER, JITTER).
pub const JITTER: f64 = 4.0;
pub const MIN_PROJECTED_POINTS: u32 = 10;

/// Project the final score, each side floored at [`MIN_PROJECTED_POINTS`].
pub fn project_score(
    home: &TeamProfile,
    away: &TeamProfile,
    factors: &SituationalFactors,
    rng: &mut impl Rng,
) -> ProjectedScore {
    let (home_raw, away_raw) = expected_points(home, away, factors);
    let home_points = home_raw + rng.gen_range(-JITTER..JITTER);
    let away_points = away_raw + rng.gen_range(-JITTER..JITTER);
    ProjectedScore {
        home: finalize(home_points),
        away: finalize(away_points),
    }
}

/// Expected points before jitter, rounding and flooring.
pub fn expected_points(
    home: &TeamProfile,
    away: &TeamProfile,
    factors: &SituationalFactors,
) -> (f64, f64) {
    let mut home_points =
        BASELINE_POINTS + (home.offensive_rating - away.defensive_rating) * MATCHUP_WEIGHT;
    let mut away_points =
        BASELINE_POINTS + (away.offensive_rating - home.defensive_rating) * MATCHUP_WEIGHT;

    home_points += HOME_FIELD_POINTS;

    if factors.is_bad_weather() {
        home_points -= BAD_WEATHER_PENALTY;
        away_points -= BAD_WEATHER_PENALTY;
    }

    // Tighter, lower-scoring games
    if factors.playoff {
        home_points -= PLAYOFF_PENALTY;
        away_points -= PLAYOFF_PENALTY;
    }

    home_points += home.turnover_differential as f64 * TURNOVER_POINTS;
    away_points += away.turnover_differential as f64 * TURNOVER_POINTS;

    (home_points, away_points)
}

fn finalize(points: f64) -> u32 {
    let rounded = round_half_up(points);
    if rounded.is_finite() && rounded > MIN_PROJECTED_POINTS as f64 {
        rounded as u32
    } else {
        MIN_PROJECTED_POINTS
    }
}
