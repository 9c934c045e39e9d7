use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::confidence::estimate_confidence;
use super::factors::narrate;
use super::score::project_score;
use super::situational::{analyze, SituationalFactors};
use super::strength::{team_strength, win_probability_split};
use crate::error::PredictionError;
use crate::store::models::{ForecastRecord, GameRecord, TeamRef};
use crate::store::TeamProfileStore;

/// Recent-form points moved per point of final margin.
const FORM_NUDGE_PER_POINT: f64 = 0.1;
/// Largest recent-form move a single game can cause.
const MAX_FORM_NUDGE: f64 = 2.0;

/// How [`PredictionEngine::adjust_model`] treats a completed game it has
/// already seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdjustmentPolicy {
    /// Every call re-applies every completed game it is given.
    #[default]
    Cumulative,
    /// A game id is applied at most once per store.
    OncePerGame,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelConfig {
    /// Weeks after this are playoff games
    pub regular_season_weeks: u32,
    pub adjustment_policy: AdjustmentPolicy,
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            regular_season_weeks: 18,
            adjustment_policy: AdjustmentPolicy::Cumulative,
        }
    }
}

/// What one `adjust_model` call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AdjustmentSummary {
    pub applied: usize,
    /// Not completed, or a final score is missing
    pub skipped_incomplete: usize,
    /// One or both teams have no stored profile
    pub skipped_unknown_team: usize,
    /// Already applied under [`AdjustmentPolicy::OncePerGame`]
    pub skipped_duplicate: usize,
}

/// Public entry point: turns game records into forecast records.
///
/// The random source drives situational sampling and score jitter; seed it
/// for reproducible output.
pub struct PredictionEngine<R = StdRng> {
    store: TeamProfileStore,
    config: ModelConfig,
    rng: R,
}

impl PredictionEngine<StdRng> {
    pub fn new(store: TeamProfileStore, config: ModelConfig) -> Self {
        Self::with_rng(store, config, StdRng::from_entropy())
    }

    pub fn seeded(store: TeamProfileStore, config: ModelConfig, seed: u64) -> Self {
        Self::with_rng(store, config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> PredictionEngine<R> {
    pub fn with_rng(store: TeamProfileStore, config: ModelConfig, rng: R) -> Self {
        PredictionEngine { store, config, rng }
    }

    pub fn store(&self) -> &TeamProfileStore {
        &self.store
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Forecast one game. Unknown team ids fall back to the default profile;
    /// only a blank team id or a non-finite profile is an error.
    pub fn predict(&mut self, game: &GameRecord) -> Result<ForecastRecord, PredictionError> {
        let situation = analyze(game, self.config.regular_season_weeks, &mut self.rng);
        self.predict_with_situation(game, &situation)
    }

    /// Forecast one game under a caller-supplied situational bundle.
    pub fn predict_with_situation(
        &mut self,
        game: &GameRecord,
        situation: &SituationalFactors,
    ) -> Result<ForecastRecord, PredictionError> {
        check_team_id(game, &game.home_team, "home")?;
        check_team_id(game, &game.away_team, "away")?;

        let home = self.store.resolve(&game.home_team.id);
        let away = self.store.resolve(&game.away_team.id);
        for (team, profile) in [(&game.home_team, &home), (&game.away_team, &away)] {
            if let Some(field) = profile.non_finite_field() {
                return Err(PredictionError::NonFiniteProfile {
                    game_id: game.id.clone(),
                    team_id: team.id.clone(),
                    field,
                });
            }
        }

        let home_strength = team_strength(&home, true, situation);
        let away_strength = team_strength(&away, false, situation);
        let (home_win_probability, away_win_probability) =
            win_probability_split(home_strength, away_strength);

        let predicted_score = project_score(&home, &away, situation, &mut self.rng);
        let confidence = estimate_confidence(&home, &away, situation);
        let factors = narrate(game, &home, &away, situation);

        debug!(
            "Forecast {}: {} {}% vs {} {}% (strength {:.1}/{:.1}, confidence {})",
            game.id,
            game.home_team.id,
            home_win_probability,
            game.away_team.id,
            away_win_probability,
            home_strength,
            away_strength,
            confidence
        );

        Ok(ForecastRecord {
            game_id: game.id.clone(),
            home_win_probability,
            away_win_probability,
            predicted_score,
            confidence,
            factors,
        })
    }

    /// Forecast each game in order. Games that fail are logged and left
    /// out; the rest keep their relative order.
    pub fn predict_batch(&mut self, games: &[GameRecord]) -> Vec<ForecastRecord> {
        let mut forecasts = Vec::with_capacity(games.len());
        for game in games {
            match self.predict(game) {
                Ok(forecast) => forecasts.push(forecast),
                Err(e) => warn!("Skipping game {}: {}", game.id, e),
            }
        }
        info!(
            "Predicted {} of {} game(s)",
            forecasts.len(),
            games.len()
        );
        forecasts
    }

    /// Nudge recent form from completed results: the winner gains and the
    /// loser drops `min(|margin| × 0.1, 2)`. Ties move nothing.
    ///
    /// Teams are adjusted independently with no rollback.
    pub fn adjust_model(&self, completed_games: &[GameRecord]) -> AdjustmentSummary {
        info!("Updating model with {} game(s)", completed_games.len());
        let mut summary = AdjustmentSummary::default();

        for game in completed_games {
            let Some((home_score, away_score)) = game.final_score() else {
                summary.skipped_incomplete += 1;
                continue;
            };

            let once = self.config.adjustment_policy == AdjustmentPolicy::OncePerGame;
            if once && !self.store.mark_game_applied(&game.id) {
                debug!("Game {} already applied, skipping", game.id);
                summary.skipped_duplicate += 1;
                continue;
            }

            let delta = form_nudge(home_score, away_score);
            let (winner, loser) = if home_score > away_score {
                (&game.home_team.id, &game.away_team.id)
            } else {
                (&game.away_team.id, &game.home_team.id)
            };
            // A tie has zero margin, so only team existence is checked
            if self.store.nudge_recent_form(winner, loser, delta) {
                summary.applied += 1;
            } else {
                debug!(
                    "Game {}: no stored profile for '{}' or '{}', skipping",
                    game.id, game.home_team.id, game.away_team.id
                );
                if once {
                    self.store.unmark_game_applied(&game.id);
                }
                summary.skipped_unknown_team += 1;
            }
        }

        info!(
            "Model updated: {} applied, {} incomplete, {} unknown team, {} duplicate",
            summary.applied,
            summary.skipped_incomplete,
            summary.skipped_unknown_team,
            summary.skipped_duplicate
        );
        summary
    }
}

fn form_nudge(home_score: u32, away_score: u32) -> f64 {
    (home_score.abs_diff(away_score) as f64 * FORM_NUDGE_PER_POINT).min(MAX_FORM_NUDGE)
}

fn check_team_id(
    game: &GameRecord,
    team: &TeamRef,
    side: &'static str,
) -> Result<(), PredictionError> {
    if team.id.trim().is_empty() {
        return Err(PredictionError::MissingTeamId {
            game_id: game.id.clone(),
            side,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::models::{GameStatus, TeamProfile};
    use approx::assert_relative_eq;

    fn engine() -> PredictionEngine {
        PredictionEngine::seeded(
            TeamProfileStore::with_league_defaults(),
            ModelConfig::default(),
            42,
        )
    }

    fn game(id: &str, home: &str, away: &str) -> GameRecord {
        GameRecord::scheduled(
            id,
            TeamRef { id: home.into(), city: None },
            TeamRef { id: away.into(), city: None },
            4,
            "13:00",
        )
    }

    #[test]
    fn favourite_at_home_is_clear_pick() {
        let mut engine = engine();
        let g = GameRecord::scheduled(
            "week4_game1",
            TeamRef::new("kc", "Kansas City"),
            TeamRef::new("mia", "Miami"),
            4,
            "13:00",
        );
        let f = engine
            .predict_with_situation(&g, &SituationalFactors::neutral())
            .expect("forecast");
        assert_eq!(f.game_id, "week4_game1");
        assert_eq!((f.home_win_probability, f.away_win_probability), (60, 40));
        assert_eq!(f.confidence, 61);
        assert!(f.factors.iter().any(|s| s.contains("recent form") || s.contains("home field")));
        assert!((24..=32).contains(&f.predicted_score.home));
        assert!((16..=24).contains(&f.predicted_score.away));
    }

    #[test]
    fn identical_teams_only_home_field_separates_them() {
        let mut engine = PredictionEngine::seeded(TeamProfileStore::default(), ModelConfig::default(), 1);
        let f = engine
            .predict_with_situation(&game("g", "x", "y"), &SituationalFactors::neutral())
            .expect("forecast");
        assert_eq!(f.home_win_probability, 56);
        assert_eq!(f.confidence, 55);
    }

    #[test]
    fn unknown_teams_still_forecast() {
        let mut engine = engine();
        for g in [game("g1", "kc", "nope"), game("g2", "nope", "kc"), game("g3", "a", "b")] {
            let f = engine.predict(&g).expect("unknown ids fall back to default profile");
            assert_eq!(f.home_win_probability as u32 + f.away_win_probability as u32, 100);
            assert!((55..=95).contains(&f.confidence));
        }
    }

    #[test]
    fn blank_team_id_is_rejected() {
        let mut engine = engine();
        let err = engine.predict(&game("bad", "  ", "kc")).unwrap_err();
        assert_eq!(
            err,
            PredictionError::MissingTeamId { game_id: "bad".into(), side: "home" }
        );
        let err = engine.predict(&game("bad2", "kc", "")).unwrap_err();
        assert!(matches!(err, PredictionError::MissingTeamId { side: "away", .. }));
    }

    #[test]
    fn non_finite_profile_is_rejected() {
        let store = TeamProfileStore::from_profiles([(
            "broken",
            TeamProfile { offensive_rating: f64::NAN, ..TeamProfile::DEFAULT },
        )]);
        let mut engine = PredictionEngine::seeded(store, ModelConfig::default(), 3);
        let err = engine.predict(&game("g", "broken", "kc")).unwrap_err();
        assert_eq!(
            err,
            PredictionError::NonFiniteProfile {
                game_id: "g".into(),
                team_id: "broken".into(),
                field: "offensiveRating",
            }
        );
    }

    #[test]
    fn batch_skips_failures_and_keeps_order() {
        let mut engine = engine();
        let games = vec![
            game("g1", "kc", "buf"),
            game("g2", "", "buf"),
            game("g3", "sf", "lar"),
            game("g4", "det", " "),
            game("g5", "unknown", "phi"),
        ];
        let ids: Vec<String> = engine
            .predict_batch(&games)
            .into_iter()
            .map(|f| f.game_id)
            .collect();
        assert_eq!(ids, vec!["g1", "g3", "g5"]);
    }

    #[test]
    fn seeded_engines_agree() {
        let games = vec![game("g1", "kc", "buf"), game("g2", "sf", "lar")];
        let a = engine().predict_batch(&games);
        let b = engine().predict_batch(&games);
        assert_eq!(a, b);
    }

    #[test]
    fn playoff_week_follows_config() {
        let quiet = TeamProfile {
            home_advantage: 70.0,
            injury_impact: 0.0,
            ..TeamProfile::DEFAULT
        };
        let store = TeamProfileStore::from_profiles([("a", quiet), ("b", quiet)]);
        let mut g = game("g", "a", "b");
        g.week = 18;

        let mut regular = PredictionEngine::seeded(store.clone(), ModelConfig::default(), 5);
        let f = regular.predict(&g).expect("forecast");
        assert!(!f.factors.iter().any(|s| s.starts_with("Playoff")));

        let mut short_season = PredictionEngine::seeded(
            store,
            ModelConfig { regular_season_weeks: 17, ..ModelConfig::default() },
            5,
        );
        let f = short_season.predict(&g).expect("forecast");
        assert!(f.factors.iter().any(|s| s == "Playoff experience and pressure factor"));
    }

    #[test]
    fn adjust_moves_winner_up_and_loser_down() {
        let engine = engine();
        let result = game("w3", "bal", "cin").with_final_score(28, 21);
        let summary = engine.adjust_model(&[result]);
        assert_eq!(summary.applied, 1);
        assert_relative_eq!(engine.store().resolve("bal").recent_form, 90.7, epsilon = 1e-9);
        assert_relative_eq!(engine.store().resolve("cin").recent_form, 65.3, epsilon = 1e-9);
    }

    #[test]
    fn adjust_caps_nudge_and_handles_away_wins() {
        let engine = engine();
        let blowout = game("w3", "ne", "buf").with_final_score(3, 45);
        engine.adjust_model(&[blowout]);
        assert_relative_eq!(engine.store().resolve("buf").recent_form, 87.0, epsilon = 1e-9);
        assert_relative_eq!(engine.store().resolve("ne").recent_form, 57.0, epsilon = 1e-9);
    }

    #[test]
    fn adjust_ignores_ties_incomplete_and_unknown() {
        let engine = engine();
        let tie = game("t", "kc", "den").with_final_score(20, 20);
        let scheduled = game("s", "kc", "den");
        let mut live = game("l", "kc", "den");
        live.status = GameStatus::Live;
        live.home_score = Some(14);
        live.away_score = Some(0);
        let mut missing_score = game("m", "kc", "den").with_final_score(14, 0);
        missing_score.away_score = None;
        let unknown = game("u", "kc", "nowhere").with_final_score(30, 0);

        let summary = engine.adjust_model(&[tie, scheduled, live, missing_score, unknown]);
        assert_eq!(
            summary,
            AdjustmentSummary {
                applied: 1,
                skipped_incomplete: 3,
                skipped_unknown_team: 1,
                skipped_duplicate: 0,
            }
        );
        assert_relative_eq!(engine.store().resolve("kc").recent_form, 92.0);
        assert_relative_eq!(engine.store().resolve("den").recent_form, 68.0);
        assert!(!engine.store().contains("nowhere"));
    }

    #[test]
    fn cumulative_policy_reapplies() {
        let engine = engine();
        let result = game("w3", "sf", "ari").with_final_score(24, 17);
        engine.adjust_model(&[result.clone()]);
        engine.adjust_model(&[result]);
        assert_relative_eq!(engine.store().resolve("sf").recent_form, 83.4, epsilon = 1e-9);
    }

    #[test]
    fn once_per_game_policy_applies_once() {
        let engine = PredictionEngine::seeded(
            TeamProfileStore::with_league_defaults(),
            ModelConfig { adjustment_policy: AdjustmentPolicy::OncePerGame, ..ModelConfig::default() },
            0,
        );
        let result = game("w3", "sf", "ari").with_final_score(24, 17);
        let first = engine.adjust_model(&[result.clone(), result.clone()]);
        assert_eq!((first.applied, first.skipped_duplicate), (1, 1));
        let second = engine.adjust_model(&[result]);
        assert_eq!((second.applied, second.skipped_duplicate), (0, 1));
        assert_relative_eq!(engine.store().resolve("sf").recent_form, 82.7, epsilon = 1e-9);
        assert!(engine.store().is_game_applied("w3"));
    }

    #[test]
    fn once_per_game_does_not_burn_ids_of_unknown_teams() {
        let engine = PredictionEngine::seeded(
            TeamProfileStore::with_league_defaults(),
            ModelConfig { adjustment_policy: AdjustmentPolicy::OncePerGame, ..ModelConfig::default() },
            0,
        );
        let result = game("x", "kc", "nowhere").with_final_score(10, 3);
        engine.adjust_model(&[result]);
        assert!(!engine.store().is_game_applied("x"));
    }

    #[test]
    fn form_nudge_scales_with_margin() {
        assert_relative_eq!(form_nudge(28, 21), 0.7, epsilon = 1e-9);
        assert_relative_eq!(form_nudge(3, 45), 2.0);
        assert_relative_eq!(form_nudge(10, 10), 0.0);
        assert_relative_eq!(form_nudge(u32::MAX, 0), 2.0);
        assert_relative_eq!(form_nudge(0, u32::MAX), 2.0);
    }

    #[test]
    fn extreme_scores_keep_form_in_bounds() {
        let engine = engine();
        let absurd = game("x", "kc", "den").with_final_score(u32::MAX, 0);
        let summary = engine.adjust_model(&[absurd]);
        assert_eq!(summary.applied, 1);
        assert_relative_eq!(engine.store().resolve("kc").recent_form, 94.0, epsilon = 1e-9);
        assert_relative_eq!(engine.store().resolve("den").recent_form, 66.0, epsilon = 1e-9);

        let upset = game("y", "kc", "den").with_final_score(0, u32::MAX);
        engine.adjust_model(&[upset]);
        assert_relative_eq!(engine.store().resolve("den").recent_form, 68.0, epsilon = 1e-9);
        assert_relative_eq!(engine.store().resolve("kc").recent_form, 92.0, epsilon = 1e-9);
    }

    #[test]
    fn huge_turnover_differential_does_not_abort_batch() {
        let store = TeamProfileStore::from_profiles([
            ("kc", TeamProfile { turnover_differential: i32::MAX, ..TeamProfile::DEFAULT }),
            ("den", TeamProfile { turnover_differential: i32::MIN, ..TeamProfile::DEFAULT }),
        ]);
        let mut engine = PredictionEngine::seeded(store, ModelConfig::default(), 9);
        let forecasts = engine.predict_batch(&[game("a", "kc", "den"), game("b", "den", "kc")]);
        assert_eq!(forecasts.len(), 2);
        for f in &forecasts {
            assert_eq!(f.home_win_probability as u32 + f.away_win_probability as u32, 100);
        }
    }
}
