//! Human-readable explanations attached to each forecast.
//!
//! Triggers are checked in a fixed priority order and the first
//! [`MAX_FACTORS`] that fire are kept. Fewer firing means a shorter list.

use super::situational::SituationalFactors;
use crate::store::models::{GameRecord, TeamProfile};

pub const MAX_FACTORS: usize = 4;

/// Home-advantage rating above which home field is called out.
const STRONG_HOME_FIELD: f64 = 75.0;
const FORM_GAP: f64 = 10.0;
const TURNOVER_GAP: i64 = 5;
/// Injury impact below this counts as significant.
const INJURY_THRESHOLD: f64 = -5.0;
const ELITE_DEFENSE: f64 = 80.0;
const STRUGGLING_OFFENSE: f64 = 75.0;

/// Up to [`MAX_FACTORS`] explanations for the matchup, highest priority first.
pub fn narrate(
    game: &GameRecord,
    home: &TeamProfile,
    away: &TeamProfile,
    factors: &SituationalFactors,
) -> Vec<String> {
    let home_name = game.home_team.display_name();
    let away_name = game.away_team.display_name();
    let mut out = Vec::with_capacity(MAX_FACTORS);

    if home.home_advantage > STRONG_HOME_FIELD {
        out.push(format!("{home_name}'s strong home field advantage"));
    }

    if home.recent_form > away.recent_form + FORM_GAP {
        out.push(format!("{home_name}'s superior recent form"));
    } else if away.recent_form > home.recent_form + FORM_GAP {
        out.push(format!("{away_name}'s momentum advantage"));
    }

    let home_turnovers = i64::from(home.turnover_differential);
    let away_turnovers = i64::from(away.turnover_differential);
    if home_turnovers > away_turnovers + TURNOVER_GAP {
        out.push(format!("{home_name}'s ball security advantage"));
    } else if away_turnovers > home_turnovers + TURNOVER_GAP {
        out.push(format!("{away_name}'s turnover advantage"));
    }

    if factors.is_bad_weather() {
        out.push("Poor weather conditions favor ground game".to_string());
    } else if factors.is_good_weather() {
        out.push("Good weather conditions favor passing offense".to_string());
    }

    if factors.playoff {
        out.push("Playoff experience and pressure factor".to_string());
    }

    if home.injury_impact < INJURY_THRESHOLD {
        out.push(format!("{home_name} dealing with key injuries"));
    }
    if away.injury_impact < INJURY_THRESHOLD {
        out.push(format!("{away_name} missing important players"));
    }

    if factors.rivalry {
        out.push("Divisional rivalry adds unpredictability".to_string());
    }

    if home.defensive_rating > ELITE_DEFENSE && away.offensive_rating < STRUGGLING_OFFENSE {
        out.push(format!("{home_name}'s defense vs struggling offense"));
    }

    out.truncate(MAX_FACTORS);
    out
}
