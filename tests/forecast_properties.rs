use gridiron_forecast::store::league::LEAGUE_PROFILES;
use gridiron_forecast::{
    ForecastRecord, GameRecord, ModelConfig, PredictionEngine, SituationalFactors, TeamProfile,
    TeamProfileStore, TeamRef,
};

fn team(id: &str) -> TeamRef {
    TeamRef { id: id.to_string(), city: None }
}

fn game(id: &str, home: &str, away: &str, week: u32, time: &str) -> GameRecord {
    GameRecord::scheduled(id, team(home), team(away), week, time)
}

fn assert_well_formed(f: &ForecastRecord) {
    assert_eq!(
        f.home_win_probability as u32 + f.away_win_probability as u32,
        100,
        "{}: probabilities must sum to 100",
        f.game_id
    );
    assert!((55..=95).contains(&f.confidence), "{}: confidence {}", f.game_id, f.confidence);
    assert!(f.predicted_score.home >= 10, "{}: home score {}", f.game_id, f.predicted_score.home);
    assert!(f.predicted_score.away >= 10, "{}: away score {}", f.game_id, f.predicted_score.away);
    assert!(f.factors.len() <= 4, "{}: {} factors", f.game_id, f.factors.len());
}

#[test]
fn every_league_pairing_yields_valid_forecasts() {
    let mut engine = PredictionEngine::seeded(
        TeamProfileStore::with_league_defaults(),
        ModelConfig::default(),
        2025,
    );
    let mut games = Vec::new();
    for (week, (home, _)) in LEAGUE_PROFILES.iter().enumerate() {
        for (away, _) in LEAGUE_PROFILES.iter() {
            if home == away {
                continue;
            }
            let week = (week as u32 % 22) + 1;
            let time = if week % 3 == 0 { "20:15" } else { "13:00" };
            games.push(game(&format!("{home}-{away}"), home, away, week, time));
        }
    }
    let forecasts = engine.predict_batch(&games);
    assert_eq!(forecasts.len(), games.len());
    for f in &forecasts {
        assert_well_formed(f);
    }
}

#[test]
fn unresolvable_teams_still_produce_forecasts() {
    let mut engine = PredictionEngine::seeded(
        TeamProfileStore::with_league_defaults(),
        ModelConfig::default(),
        11,
    );
    for g in [
        game("a", "kc", "expansion", 4, "13:00"),
        game("b", "expansion", "kc", 4, "13:00"),
        game("c", "foo", "bar", 20, "20:00"),
    ] {
        let f = engine.predict(&g).expect("default profile substitution");
        assert_well_formed(&f);
    }
}

#[test]
fn batch_drops_only_faulty_games_in_order() {
    let mut engine = PredictionEngine::seeded(
        TeamProfileStore::with_league_defaults(),
        ModelConfig::default(),
        12,
    );
    let games = vec![
        game("1", "kc", "lac", 4, "13:00"),
        game("2", "", "sea", 4, "13:00"),
        game("3", "phi", "dal", 4, "16:25"),
        game("4", "sf", "", 4, "20:20"),
        game("5", "det", "sea", 4, "13:00"),
        game("6", " ", " ", 4, "13:00"),
    ];
    let ids: Vec<_> = engine.predict_batch(&games).into_iter().map(|f| f.game_id).collect();
    assert_eq!(ids, vec!["1", "3", "5"]);
}

#[test]
fn repeated_predictions_keep_shape() {
    let mut engine = PredictionEngine::seeded(
        TeamProfileStore::with_league_defaults(),
        ModelConfig::default(),
        13,
    );
    let g = game("rep", "buf", "mia", 12, "20:15");
    for _ in 0..50 {
        assert_well_formed(&engine.predict(&g).expect("forecast"));
    }
}

#[test]
fn home_field_breaks_a_tie_between_equal_teams() {
    let profile = TeamProfile::DEFAULT;
    let store = TeamProfileStore::from_profiles([("east", profile), ("west", profile)]);
    let mut engine = PredictionEngine::seeded(store, ModelConfig::default(), 14);
    let f = engine
        .predict_with_situation(&game("eq", "east", "west", 4, "13:00"), &SituationalFactors::neutral())
        .expect("forecast");
    assert!(f.home_win_probability > 50);
    assert!(f.home_win_probability < 60);
    assert_eq!(f.confidence, 55);
}

#[test]
fn strong_home_favourite_is_explained() {
    let mut engine = PredictionEngine::seeded(
        TeamProfileStore::with_league_defaults(),
        ModelConfig::default(),
        15,
    );
    let g = GameRecord::scheduled(
        "kc-mia",
        TeamRef::new("kc", "Kansas City"),
        TeamRef::new("mia", "Miami"),
        4,
        "13:00",
    );
    let f = engine
        .predict_with_situation(&g, &SituationalFactors::neutral())
        .expect("forecast");
    assert!(f.home_win_probability >= 58);
    assert!(f.confidence > 55);
    assert!(f
        .factors
        .iter()
        .any(|s| s.contains("recent form") || s.contains("home field")));
}

#[test]
fn results_shift_later_forecasts() {
    let store = TeamProfileStore::with_league_defaults();
    let engine = PredictionEngine::seeded(store.clone(), ModelConfig::default(), 16);
    let before = store.resolve("ne").recent_form;
    let results: Vec<GameRecord> = (0..5)
        .map(|i| game(&format!("r{i}"), "buf", "ne", 3, "13:00").with_final_score(31, 14))
        .collect();
    let summary = engine.adjust_model(&results);
    assert_eq!(summary.applied, 5);
    assert!(store.resolve("ne").recent_form < before);
    assert!(store.resolve("buf").recent_form <= 100.0);
}

#[test]
fn demo_data_files_parse() {
    let games: Vec<GameRecord> =
        serde_json::from_str(include_str!("../data/week4_games.json")).expect("games parse");
    assert_eq!(games.len(), 4);
    let results: Vec<GameRecord> =
        serde_json::from_str(include_str!("../data/week3_results.json")).expect("results parse");
    assert!(results.iter().all(|g| g.final_score().is_some()));
}
