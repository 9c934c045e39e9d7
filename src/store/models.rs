use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Statistical profile of one team, the input to every calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamProfile {
    /// Offensive strength (roughly 0–100)
    pub offensive_rating: f64,
    /// Defensive strength (roughly 0–100)
    pub defensive_rating: f64,
    /// How much the team gains from playing at home (roughly 0–100)
    pub home_advantage: f64,
    /// Current performance trend (30–100); the only field nudged by model adjustment
    pub recent_form: f64,
    /// Season turnover differential (takeaways − giveaways)
    pub turnover_differential: i32,
    /// Strength penalty from injuries, never positive
    pub injury_impact: f64,
}

impl TeamProfile {
    /// Profile substituted for any team id the store cannot resolve.
    pub const DEFAULT: TeamProfile = TeamProfile {
        offensive_rating: 75.0,
        defensive_rating: 75.0,
        home_advantage: 75.0,
        recent_form: 75.0,
        turnover_differential: 0,
        injury_impact: -5.0,
    };

    /// Offensive plus defensive rating.
    pub fn combined_rating(&self) -> f64 {
        self.offensive_rating + self.defensive_rating
    }

    /// A team whose defense rates higher than its offense.
    pub fn is_defense_leaning(&self) -> bool {
        self.defensive_rating > self.offensive_rating
    }

    /// Returns the first field that is not a finite number, if any.
    pub fn non_finite_field(&self) -> Option<&'static str> {
        [
            ("offensiveRating", self.offensive_rating),
            ("defensiveRating", self.defensive_rating),
            ("homeAdvantage", self.home_advantage),
            ("recentForm", self.recent_form),
            ("injuryImpact", self.injury_impact),
        ]
        .into_iter()
        .find(|(_, v)| !v.is_finite())
        .map(|(name, _)| name)
    }
}

impl Default for TeamProfile {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Reference to a team as it appears on a game record.
///
/// The data layer sends full team objects; everything but `id` and `city`
/// is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl TeamRef {
    pub fn new(id: impl Into<String>, city: impl Into<String>) -> Self {
        TeamRef {
            id: id.into(),
            city: Some(city.into()),
        }
    }

    /// Name used in factor text: the city, or the upper-cased id.
    pub fn display_name(&self) -> String {
        match self.city.as_deref().map(str::trim) {
            Some(city) if !city.is_empty() => city.to_string(),
            _ => self.id.trim().to_uppercase(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    Scheduled,
    Live,
    Completed,
    Postponed,
    Cancelled,
}

/// A scheduled or completed game, owned by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub id: String,
    pub home_team: TeamRef,
    pub away_team: TeamRef,
    /// Season week; weeks past the regular season are playoff games
    pub week: u32,
    /// Local kickoff time, "HH:MM"
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub status: GameStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub away_score: Option<u32>,
}

impl GameRecord {
    pub fn scheduled(
        id: impl Into<String>,
        home_team: TeamRef,
        away_team: TeamRef,
        week: u32,
        time: impl Into<String>,
    ) -> Self {
        GameRecord {
            id: id.into(),
            home_team,
            away_team,
            week,
            time: time.into(),
            status: GameStatus::Scheduled,
            home_score: None,
            away_score: None,
        }
    }

    /// Marks the game completed with the given final score.
    pub fn with_final_score(mut self, home: u32, away: u32) -> Self {
        self.status = GameStatus::Completed;
        self.home_score = Some(home);
        self.away_score = Some(away);
        self
    }

    /// Kickoff hour (0–23), if the time string can be read.
    pub fn kickoff_hour(&self) -> Option<u32> {
        let time = self.time.trim();
        if let Ok(t) = NaiveTime::parse_from_str(time, "%H:%M") {
            return Some(t.hour());
        }
        if let Ok(t) = NaiveTime::parse_from_str(time, "%H:%M:%S") {
            return Some(t.hour());
        }
        let digits: String = time.chars().take_while(|c| c.is_ascii_digit()).collect();
        digits.parse::<u32>().ok().filter(|h| *h < 24)
    }

    /// Final score as (home, away) when the game is completed and both are known.
    pub fn final_score(&self) -> Option<(u32, u32)> {
        if self.status != GameStatus::Completed {
            return None;
        }
        Some((self.home_score?, self.away_score?))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectedScore {
    pub home: u32,
    pub away: u32,
}

/// The complete output of one prediction call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRecord {
    pub game_id: String,
    /// Percent, sums to 100 with `away_win_probability`
    pub home_win_probability: u8,
    pub away_win_probability: u8,
    pub predicted_score: ProjectedScore,
    /// Percent in [55, 95]
    pub confidence: u8,
    /// At most four explanations, highest priority first
    pub factors: Vec<String>,
}
