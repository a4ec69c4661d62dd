//! Configuration types for bet-adviser

use crate::model::MAX_GOAL_CAP;
use crate::telemetry::LogFormat;
use anyhow::Context;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub staking: StakingConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Goal-rate and outcome model configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    /// Multiplier applied to the home side's average form points
    #[serde(default = "default_home_coefficient")]
    pub home_coefficient: f64,

    /// Multiplier applied to the away side's average form points
    #[serde(default = "default_away_coefficient")]
    pub away_coefficient: f64,

    /// Goal counts per side are summed over `0..goal_cap`
    #[serde(default = "default_goal_cap")]
    pub goal_cap: u32,

    /// Rescale the truncated distribution so it sums to exactly 1
    #[serde(default)]
    pub renormalize: bool,

    /// Form used when a side's record is missing or empty
    #[serde(default = "default_form")]
    pub default_form: String,
}

fn default_home_coefficient() -> f64 {
    0.7
}
fn default_away_coefficient() -> f64 {
    0.6
}
fn default_goal_cap() -> u32 {
    7
}
fn default_form() -> String {
    // Five draws: one point per match, i.e. an average side
    "DDDDD".to_string()
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            home_coefficient: default_home_coefficient(),
            away_coefficient: default_away_coefficient(),
            goal_cap: default_goal_cap(),
            renormalize: false,
            default_form: default_form(),
        }
    }
}

/// Stake sizing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StakingConfig {
    /// Full Kelly fraction is divided by this (2.0 = half Kelly)
    #[serde(default = "default_kelly_divisor")]
    pub kelly_divisor: f64,

    /// Edge that must be exceeded before an outcome is flagged as a bet
    #[serde(default = "default_bet_threshold")]
    pub bet_threshold: f64,

    /// Bankroll used when the caller does not supply one
    #[serde(default = "default_bankroll", with = "rust_decimal::serde::float")]
    pub default_bankroll: Decimal,
}

fn default_kelly_divisor() -> f64 {
    2.0
}
fn default_bet_threshold() -> f64 {
    0.05
}
fn default_bankroll() -> Decimal {
    Decimal::new(1000, 0)
}

impl Default for StakingConfig {
    fn default() -> Self {
        Self {
            kelly_divisor: default_kelly_divisor(),
            bet_threshold: default_bet_threshold(),
            default_bankroll: default_bankroll(),
        }
    }
}

/// Odds feed configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedConfig {
    /// JSON snapshot of a head-to-head odds feed
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,

    /// Interval between background refreshes (seconds)
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,

    /// A refresh is skipped if the last good fetch is younger than this (seconds)
    #[serde(default = "default_min_staleness")]
    pub min_staleness_secs: u64,
}

fn default_refresh_interval() -> u64 {
    300
}
fn default_min_staleness() -> u64 {
    300
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            snapshot_path: None,
            refresh_interval_secs: default_refresh_interval(),
            min_staleness_secs: default_min_staleness(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject parameter values the model and staking rule cannot work with
    pub fn validate(&self) -> anyhow::Result<()> {
        let model = &self.model;
        if !(model.home_coefficient.is_finite() && model.home_coefficient >= 0.0) {
            anyhow::bail!("model.home_coefficient must be >= 0, got {}", model.home_coefficient);
        }
        if !(model.away_coefficient.is_finite() && model.away_coefficient >= 0.0) {
            anyhow::bail!("model.away_coefficient must be >= 0, got {}", model.away_coefficient);
        }
        if model.goal_cap == 0 || model.goal_cap > MAX_GOAL_CAP {
            anyhow::bail!(
                "model.goal_cap must be between 1 and {}, got {}",
                MAX_GOAL_CAP,
                model.goal_cap
            );
        }

        let staking = &self.staking;
        if !(staking.kelly_divisor.is_finite() && staking.kelly_divisor > 0.0) {
            anyhow::bail!("staking.kelly_divisor must be > 0, got {}", staking.kelly_divisor);
        }
        if !staking.bet_threshold.is_finite() {
            anyhow::bail!("staking.bet_threshold must be finite");
        }
        if staking.default_bankroll <= Decimal::ZERO {
            anyhow::bail!(
                "staking.default_bankroll must be > 0, got {}",
                staking.default_bankroll
            );
        }
        Ok(())
    }
}
