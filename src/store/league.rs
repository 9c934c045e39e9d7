//! Static league data: the season-start profile table and the rivalry pairs.

use super::models::TeamProfile;

const fn profile(
    offensive_rating: f64,
    defensive_rating: f64,
    home_advantage: f64,
    recent_form: f64,
    turnover_differential: i32,
    injury_impact: f64,
) -> TeamProfile {
    TeamProfile {
        offensive_rating,
        defensive_rating,
        home_advantage,
        recent_form,
        turnover_differential,
        injury_impact,
    }
}

/// Season-start profiles for all 32 teams, keyed by lower-case team id.
pub const LEAGUE_PROFILES: [(&str, TeamProfile); 32] = [
    ("kc", profile(95.0, 78.0, 85.0, 92.0, 8, -2.0)),
    ("buf", profile(88.0, 82.0, 72.0, 85.0, 5, -5.0)),
    ("phi", profile(91.0, 75.0, 78.0, 88.0, 12, -1.0)),
    ("sf", profile(89.0, 85.0, 74.0, 82.0, 7, -8.0)),
    ("bal", profile(93.0, 73.0, 76.0, 90.0, 15, -3.0)),
    ("det", profile(94.0, 68.0, 81.0, 89.0, 9, -1.0)),
    ("dal", profile(85.0, 71.0, 79.0, 78.0, 2, -4.0)),
    ("mia", profile(82.0, 77.0, 69.0, 75.0, -3, -6.0)),
    ("cle", profile(79.0, 83.0, 73.0, 81.0, 1, -7.0)),
    ("hou", profile(86.0, 74.0, 71.0, 83.0, 6, -2.0)),
    ("lac", profile(87.0, 69.0, 68.0, 79.0, 4, -5.0)),
    ("pit", profile(81.0, 86.0, 82.0, 77.0, 3, -3.0)),
    ("gb", profile(84.0, 72.0, 83.0, 76.0, -1, -4.0)),
    ("min", profile(83.0, 70.0, 75.0, 74.0, -2, -6.0)),
    ("lar", profile(88.0, 67.0, 70.0, 80.0, 0, -5.0)),
    ("tb", profile(80.0, 76.0, 77.0, 73.0, -4, -3.0)),
    ("no", profile(78.0, 79.0, 80.0, 72.0, -5, -8.0)),
    ("ind", profile(76.0, 74.0, 72.0, 71.0, -6, -4.0)),
    ("sea", profile(77.0, 73.0, 84.0, 69.0, -3, -5.0)),
    ("den", profile(75.0, 81.0, 78.0, 68.0, 2, -2.0)),
    ("atl", profile(74.0, 68.0, 69.0, 67.0, -8, -6.0)),
    ("cin", profile(90.0, 64.0, 67.0, 66.0, -2, -9.0)),
    ("nyj", profile(72.0, 78.0, 68.0, 65.0, -7, -10.0)),
    ("chi", profile(71.0, 75.0, 74.0, 64.0, -9, -5.0)),
    ("was", profile(73.0, 66.0, 71.0, 63.0, -11, -7.0)),
    ("nyg", profile(69.0, 71.0, 73.0, 62.0, -12, -8.0)),
    ("ten", profile(68.0, 69.0, 70.0, 61.0, -14, -9.0)),
    ("ari", profile(70.0, 65.0, 66.0, 60.0, -13, -6.0)),
    ("ne", profile(67.0, 70.0, 75.0, 59.0, -15, -7.0)),
    ("lv", profile(66.0, 63.0, 65.0, 58.0, -16, -10.0)),
    ("car", profile(64.0, 62.0, 64.0, 57.0, -18, -11.0)),
    ("jax", profile(63.0, 61.0, 63.0, 56.0, -20, -12.0)),
];

/// Divisional rivalries; membership is order-independent.
pub const RIVALRIES: [(&str, &str); 18] = [
    ("kc", "den"),
    ("kc", "lv"),
    ("kc", "lac"),
    ("buf", "mia"),
    ("buf", "ne"),
    ("buf", "nyj"),
    ("dal", "nyg"),
    ("dal", "phi"),
    ("dal", "was"),
    ("gb", "chi"),
    ("gb", "det"),
    ("gb", "min"),
    ("pit", "bal"),
    ("pit", "cle"),
    ("pit", "cin"),
    ("sf", "sea"),
    ("sf", "lar"),
    ("sf", "ari"),
];

/// Whether the two teams form a rivalry pair, in either home/away order.
pub fn is_rivalry(home_id: &str, away_id: &str) -> bool {
    let home = normalize_team_id(home_id);
    let away = normalize_team_id(away_id);
    RIVALRIES
        .iter()
        .any(|(a, b)| (*a == home && *b == away) || (*a == away && *b == home))
}

pub fn normalize_team_id(id: &str) -> String {
    id.trim().to_lowercase()
}
