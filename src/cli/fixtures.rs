//! Fixtures command implementation

use super::OutputFormat;
use crate::advice::{AdviceRequest, Adviser};
use crate::config::Config;
use crate::quote::{CachedQuoteSource, Fixture, QuoteSource, SnapshotQuoteSource};
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Args, Debug)]
pub struct FixturesArgs {
    /// Odds feed snapshot (defaults to feed.snapshot_path)
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Also print advice for each priced fixture using default form
    #[arg(long)]
    pub advise: bool,

    /// Keep running and reprint on every refresh interval
    #[arg(long)]
    pub watch: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl FixturesArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let path = self
            .snapshot
            .clone()
            .or_else(|| config.feed.snapshot_path.clone())
            .context("no --snapshot given and feed.snapshot_path is not set")?;
        let adviser = Adviser::from_config(config)?;

        let cache = Arc::new(CachedQuoteSource::new(
            SnapshotQuoteSource::new(path),
            Duration::from_secs(config.feed.min_staleness_secs),
        ));

        if !self.watch {
            let fixtures = cache.fixtures().await?;
            return self.print(&fixtures, &adviser);
        }

        let every = Duration::from_secs(config.feed.refresh_interval_secs.max(1));
        let refresher = cache.clone().spawn_refresh_loop(every);
        let mut ticker = tokio::time::interval(every);
        tracing::info!(interval_secs = every.as_secs(), "Watching odds snapshot");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let fixtures = cache.cached().await;
                    self.print(&fixtures, &adviser)?;
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Stopping fixture watch");
                    break;
                }
            }
        }
        refresher.abort();
        Ok(())
    }

    fn print(&self, fixtures: &[Fixture], adviser: &Adviser) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(fixtures)?);
            }
            OutputFormat::Table => {
                if fixtures.is_empty() {
                    println!("No fixtures available.");
                }
                for fixture in fixtures {
                    println!("{}", fixture_line(fixture));
                    if !self.advise {
                        continue;
                    }
                    let Some(quote) = fixture.quote else { continue };
                    match adviser.advise(&AdviceRequest::new(quote)) {
                        Ok(advice) => print!("{}", advice.recommendation),
                        Err(e) => tracing::warn!(fixture = %fixture.label(), error = %e, "Advice failed"),
                    }
                }
            }
        }
        Ok(())
    }
}

fn fixture_line(fixture: &Fixture) -> String {
    let kickoff = fixture.kickoff.format("%Y-%m-%d %H:%M UTC");
    match &fixture.quote {
        Some(q) => format!(
            "{} | {} | 1 {} | X {} | 2 {}",
            fixture.label(),
            kickoff,
            q.home,
            q.draw,
            q.away
        ),
        None => format!("{} | {} | no quote", fixture.label(), kickoff),
    }
}
