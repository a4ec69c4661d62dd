//! Advise command implementation

use super::OutputFormat;
use crate::advice::{Advice, AdviceRequest, Adviser};
use crate::config::Config;
use crate::quote::{MarketQuote, QuoteSource, SnapshotQuoteSource};
use anyhow::Context;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct AdviseArgs {
    /// Home side recent form, oldest first (e.g. WWDLW)
    #[arg(long)]
    pub home_form: Option<String>,

    /// Away side recent form, oldest first
    #[arg(long)]
    pub away_form: Option<String>,

    /// Decimal odds for home win, draw and away win
    #[arg(long, num_args = 3, value_names = ["HOME", "DRAW", "AWAY"])]
    pub odds: Option<Vec<Decimal>>,

    /// Home team name (report label and snapshot lookup)
    #[arg(long)]
    pub home: Option<String>,

    /// Away team name (report label and snapshot lookup)
    #[arg(long)]
    pub away: Option<String>,

    /// Odds feed snapshot to look the quote up in when --odds is absent
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Bankroll (defaults to staking.default_bankroll)
    #[arg(long)]
    pub bankroll: Option<Decimal>,

    /// Kelly divisor (defaults to staking.kelly_divisor)
    #[arg(long)]
    pub kelly_divisor: Option<f64>,

    /// Bet threshold as a fraction (defaults to staking.bet_threshold)
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// Advice plus the match it was computed for
#[derive(Debug, Serialize)]
pub struct AdviceReport<'a> {
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub fixture: Option<String>,
    #[serde(flatten)]
    pub advice: &'a Advice,
}

impl AdviseArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let adviser = Adviser::from_config(config)?;
        let quote = self.resolve_quote(config).await?;

        let request = AdviceRequest {
            home_form: self.home_form.clone(),
            away_form: self.away_form.clone(),
            quote,
            bankroll: self.bankroll,
            kelly_divisor: self.kelly_divisor,
            bet_threshold: self.threshold,
        };
        let advice = adviser.advise(&request)?;

        let report = AdviceReport {
            fixture: self.label(),
            advice: &advice,
        };
        tracing::info!(
            fixture = report.fixture.as_deref().unwrap_or("-"),
            bets = advice.recommendation.bets().count(),
            "Advice ready"
        );

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Table => {
                if let Some(label) = &report.fixture {
                    println!("{label}");
                }
                println!(
                    "expected goals {:.2} - {:.2}, bankroll {}",
                    advice.rates.home, advice.rates.away, advice.bankroll
                );
                print!("{}", advice.recommendation);
            }
        }
        Ok(())
    }

    fn label(&self) -> Option<String> {
        match (&self.home, &self.away) {
            (Some(home), Some(away)) => Some(format!("{home} vs {away}")),
            _ => None,
        }
    }

    async fn resolve_quote(&self, config: &Config) -> anyhow::Result<MarketQuote> {
        if let Some(odds) = &self.odds {
            let [home, draw, away] = odds.as_slice() else {
                anyhow::bail!("--odds takes exactly three values");
            };
            return Ok(MarketQuote::new(*home, *draw, *away));
        }

        let (Some(home), Some(away)) = (&self.home, &self.away) else {
            anyhow::bail!("either --odds or both --home and --away are required");
        };
        let path = self
            .snapshot
            .clone()
            .or_else(|| config.feed.snapshot_path.clone())
            .context("no --snapshot given and feed.snapshot_path is not set")?;

        SnapshotQuoteSource::new(path)
            .quote_for(home, away)
            .await?
            .with_context(|| format!("no priced fixture {home} vs {away} in snapshot"))
    }
}
