use thiserror::Error;

/// Faults that keep a single game from being predicted.
///
/// Unknown team ids are not faults: they resolve to the default profile.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PredictionError {
    #[error("game {game_id} has no {side} team id")]
    MissingTeamId { game_id: String, side: &'static str },

    #[error("game {game_id}: profile for team {team_id} has a non-finite {field}")]
    NonFiniteProfile {
        game_id: String,
        team_id: String,
        field: &'static str,
    },
}

/// Failures while loading a team profile table from disk.
#[derive(Debug, Error)]
pub enum ProfileLoadError {
    #[error("failed to read profile table {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse profile table: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("profile for team {team_id} is invalid: {reason}")]
    InvalidProfile { team_id: String, reason: String },
}
