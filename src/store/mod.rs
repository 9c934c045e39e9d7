//! In-memory team profile store.
//!
//! Populated once at startup, read by every prediction and written only by
//! model adjustment. Clones share the same underlying table, so a host can
//! hand one store to several engines and choose its own threading.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::error::ProfileLoadError;

pub mod league;
pub mod models;

pub use league::{is_rivalry, normalize_team_id};
use models::TeamProfile;

/// Floor and ceiling for the recent-form index under adjustment.
pub const MIN_RECENT_FORM: f64 = 30.0;
pub const MAX_RECENT_FORM: f64 = 100.0;
/// Largest season turnover differential a loaded profile may carry.
pub const MAX_TURNOVER_DIFFERENTIAL: i32 = 100;

/// Thread-safe, shared team profile table.
#[derive(Clone, Default)]
pub struct TeamProfileStore {
    inner: Arc<RwLock<StoreInner>>,
}

#[derive(Default)]
struct StoreInner {
    /// normalized team id → profile
    profiles: HashMap<String, TeamProfile>,
    /// completed game ids already folded into the profiles
    applied_games: HashSet<String>,
}

impl TeamProfileStore {
    /// Store seeded with the built-in 32-team league table.
    pub fn with_league_defaults() -> Self {
        Self::from_profiles(
            league::LEAGUE_PROFILES
                .iter()
                .map(|(id, profile)| (id.to_string(), *profile)),
        )
    }

    pub fn from_profiles<I, S>(profiles: I) -> Self
    where
        I: IntoIterator<Item = (S, TeamProfile)>,
        S: AsRef<str>,
    {
        let profiles = profiles
            .into_iter()
            .map(|(id, p)| (normalize_team_id(id.as_ref()), p))
            .collect();
        TeamProfileStore {
            inner: Arc::new(RwLock::new(StoreInner {
                profiles,
                applied_games: HashSet::new(),
            })),
        }
    }

    /// Parse a JSON object of `team id → profile`.
    pub fn from_json(raw: &str) -> Result<Self, ProfileLoadError> {
        let table: HashMap<String, TeamProfile> = serde_json::from_str(raw)?;
        for (id, profile) in &table {
            if id.trim().is_empty() {
                return Err(ProfileLoadError::InvalidProfile {
                    team_id: id.clone(),
                    reason: "empty team id".into(),
                });
            }
            if let Some(field) = profile.non_finite_field() {
                return Err(ProfileLoadError::InvalidProfile {
                    team_id: id.clone(),
                    reason: format!("{field} is not a finite number"),
                });
            }
            if profile.turnover_differential.unsigned_abs() > MAX_TURNOVER_DIFFERENTIAL as u32 {
                return Err(ProfileLoadError::InvalidProfile {
                    team_id: id.clone(),
                    reason: format!(
                        "turnoverDifferential {} is outside ±{}",
                        profile.turnover_differential, MAX_TURNOVER_DIFFERENTIAL
                    ),
                });
            }
            if profile.injury_impact > 0.0 {
                return Err(ProfileLoadError::InvalidProfile {
                    team_id: id.clone(),
                    reason: "injuryImpact must not be positive".into(),
                });
            }
        }
        Ok(Self::from_profiles(table))
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ProfileLoadError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ProfileLoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, team_id: &str) -> Option<TeamProfile> {
        self.read().profiles.get(&normalize_team_id(team_id)).copied()
    }

    /// Profile for `team_id`, or [`TeamProfile::DEFAULT`] when unknown.
    pub fn resolve(&self, team_id: &str) -> TeamProfile {
        match self.get(team_id) {
            Some(profile) => profile,
            None => {
                debug!("No profile for team '{}', using default profile", team_id);
                TeamProfile::DEFAULT
            }
        }
    }

    pub fn contains(&self, team_id: &str) -> bool {
        self.read().profiles.contains_key(&normalize_team_id(team_id))
    }

    pub fn len(&self) -> usize {
        self.read().profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().profiles.is_empty()
    }

    /// Moves the winner's recent form up and the loser's down by `delta`,
    /// clamped to [`MAX_RECENT_FORM`] and [`MIN_RECENT_FORM`].
    ///
    /// Returns false, touching nothing, unless both teams are known.
    pub(crate) fn nudge_recent_form(&self, winner_id: &str, loser_id: &str, delta: f64) -> bool {
        let winner_key = normalize_team_id(winner_id);
        let loser_key = normalize_team_id(loser_id);
        let mut inner = self.write();
        if !inner.profiles.contains_key(&winner_key) || !inner.profiles.contains_key(&loser_key) {
            return false;
        }
        if let Some(winner) = inner.profiles.get_mut(&winner_key) {
            winner.recent_form = (winner.recent_form + delta).min(MAX_RECENT_FORM);
            debug!("Recent form for '{}' now {:.2}", winner_key, winner.recent_form);
        }
        if let Some(loser) = inner.profiles.get_mut(&loser_key) {
            loser.recent_form = (loser.recent_form - delta).max(MIN_RECENT_FORM);
            debug!("Recent form for '{}' now {:.2}", loser_key, loser.recent_form);
        }
        true
    }

    /// Records a completed game as applied. Returns false if it already was.
    pub(crate) fn mark_game_applied(&self, game_id: &str) -> bool {
        self.write().applied_games.insert(game_id.to_string())
    }

    pub(crate) fn unmark_game_applied(&self, game_id: &str) {
        self.write().applied_games.remove(game_id);
    }

    pub fn is_game_applied(&self, game_id: &str) -> bool {
        self.read().applied_games.contains(game_id)
    }
}
