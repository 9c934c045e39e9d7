use super::round_half_up;
use super::situational::SituationalFactors;
use crate::store::models::TeamProfile;

pub const MIN_CONFIDENCE: u8 = 55;
pub const MAX_CONFIDENCE: u8 = 95;

const BASE_CONFIDENCE: f64 = 50.0;
/// Confidence points per point of combined-rating gap.
const GAP_WEIGHT: f64 = 0.8;
const RIVALRY_PENALTY: f64 = 10.0;
const PLAYOFF_PENALTY: f64 = 5.0;
const WEATHER_PENALTY: f64 = 8.0;
/// |weather impact| above this counts as volatile.
const VOLATILE_WEATHER: f64 = 5.0;

/// Confidence in the forecast, in [`MIN_CONFIDENCE`, `MAX_CONFIDENCE`].
///
/// Grows with the talent gap and shrinks for rivalries, playoffs and
/// extreme weather in either direction.
pub fn estimate_confidence(
    home: &TeamProfile,
    away: &TeamProfile,
    factors: &SituationalFactors,
) -> u8 {
    let gap = (home.combined_rating() - away.combined_rating()).abs();
    let mut confidence = BASE_CONFIDENCE + gap * GAP_WEIGHT;

    if factors.rivalry {
        confidence -= RIVALRY_PENALTY;
    }
    if factors.playoff {
        confidence -= PLAYOFF_PENALTY;
    }
    if factors.weather_impact.abs() > VOLATILE_WEATHER {
        confidence -= WEATHER_PENALTY;
    }

    let rounded = round_half_up(confidence);
    if rounded.is_nan() {
        return MIN_CONFIDENCE;
    }
    rounded.clamp(MIN_CONFIDENCE as f64, MAX_CONFIDENCE as f64) as u8
}
