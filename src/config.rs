use clap::{Parser, ValueEnum};

use crate::engine::{AdjustmentPolicy, ModelConfig};

/// Matchup forecasts for a slate of pro football games
#[derive(Parser, Debug, Clone)]
#[command(name = "gridiron-forecast", version, about)]
pub struct Config {
    /// JSON array of games to forecast
    #[arg(long, env = "GAMES_PATH")]
    pub games: String,

    /// JSON object of team id → profile, replacing the built-in league table
    #[arg(long, env = "PROFILES_PATH")]
    pub profiles: Option<String>,

    /// JSON array of completed games folded into recent form before forecasting
    #[arg(long, env = "RESULTS_PATH")]
    pub results: Option<String>,

    /// Seed for situational sampling and score jitter (reproducible output)
    #[arg(long, env = "FORECAST_SEED")]
    pub seed: Option<u64>,

    /// Whether re-submitted results are applied again
    #[arg(long, env = "ADJUSTMENT_POLICY", value_enum, default_value_t = PolicyArg::Cumulative)]
    pub adjustment_policy: PolicyArg,

    /// Weeks in the regular season; later weeks are playoff games
    #[arg(long, env = "REGULAR_SEASON_WEEKS", default_value = "18")]
    pub regular_season_weeks: u32,

    /// Output format for forecasts on stdout
    #[arg(long, env = "OUTPUT_FORMAT", value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Emit logs as JSON lines
    #[arg(long, env = "LOG_JSON", default_value = "false")]
    pub log_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    Cumulative,
    OncePerGame,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if !(1..=30).contains(&self.regular_season_weeks) {
            anyhow::bail!("regular_season_weeks must be between 1 and 30");
        }
        if self.games.trim().is_empty() {
            anyhow::bail!("games path must not be empty");
        }
        Ok(())
    }
}

impl From<&Config> for ModelConfig {
    fn from(config: &Config) -> Self {
        ModelConfig {
            regular_season_weeks: config.regular_season_weeks,
            adjustment_policy: match config.adjustment_policy {
                PolicyArg::Cumulative => AdjustmentPolicy::Cumulative,
                PolicyArg::OncePerGame => AdjustmentPolicy::OncePerGame,
            },
        }
    }
}
