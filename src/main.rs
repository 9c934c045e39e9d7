use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use gridiron_forecast::config::{Config, OutputFormat};
use gridiron_forecast::{ForecastRecord, GameRecord, ModelConfig, PredictionEngine, TeamProfileStore};

fn main() -> Result<()> {
    let config = Config::parse();

    // Logs go to stderr; stdout carries only forecasts
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    if config.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    config.validate()?;

    let store = match &config.profiles {
        Some(path) => TeamProfileStore::load_json(path)
            .with_context(|| format!("Failed to load team profiles from {path}"))?,
        None => TeamProfileStore::with_league_defaults(),
    };
    info!("Team profile store ready: {} team(s)", store.len());

    let model = ModelConfig::from(&config);
    let mut engine = match config.seed {
        Some(seed) => {
            info!("Using fixed seed {}", seed);
            PredictionEngine::seeded(store, model, seed)
        }
        None => PredictionEngine::new(store, model),
    };

    if let Some(path) = &config.results {
        let results = read_games(path)?;
        engine.adjust_model(&results);
    }

    let games = read_games(&config.games)?;
    let forecasts = engine.predict_batch(&games);

    match config.format {
        OutputFormat::Json => {
            let out = serde_json::to_string_pretty(&forecasts)
                .context("Failed to serialize forecasts")?;
            println!("{out}");
        }
        OutputFormat::Text => {
            for (forecast, game) in pair_with_games(&games, &forecasts) {
                print!("{}", render_text(forecast, game));
            }
        }
    }

    Ok(())
}

fn read_games(path: &str) -> Result<Vec<GameRecord>> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse games in {path}"))
}

/// The game each forecast was computed for. Forecasts keep the input order
/// of the games they came from, so matching walks forward and repeated ids
/// pair up in sequence.
fn pair_with_games<'a>(
    games: &'a [GameRecord],
    forecasts: &'a [ForecastRecord],
) -> Vec<(&'a ForecastRecord, Option<&'a GameRecord>)> {
    let mut remaining = games.iter();
    forecasts
        .iter()
        .map(|f| (f, remaining.find(|g| g.id == f.game_id)))
        .collect()
}

fn render_text(forecast: &ForecastRecord, game: Option<&GameRecord>) -> String {
    let (home, away) = match game {
        Some(g) => (g.home_team.display_name(), g.away_team.display_name()),
        None => ("Home".to_string(), "Away".to_string()),
    };
    let mut out = format!(
        "{}: {} {}% - {} {}%  projected {}-{}  confidence {}%\n",
        forecast.game_id,
        home,
        forecast.home_win_probability,
        away,
        forecast.away_win_probability,
        forecast.predicted_score.home,
        forecast.predicted_score.away,
        forecast.confidence
    );
    for factor in &forecast.factors {
        out.push_str(&format!("  - {factor}\n"));
    }
    out
}
