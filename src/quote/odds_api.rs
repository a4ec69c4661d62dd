//! Head-to-head odds feed snapshots
//!
//! Parses the event list returned by a decimal-odds feed (`markets=h2h`,
//! `oddsFormat=decimal`) into fixtures. Each event lists bookmakers, each
//! bookmaker lists markets, and the `h2h` market lists one outcome per team
//! plus a draw.

use super::{Fixture, MarketQuote, QuoteSource};
use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::PathBuf;

const H2H_MARKET: &str = "h2h";

#[derive(Debug, Deserialize)]
struct OddsEvent {
    home_team: String,
    away_team: String,
    commence_time: DateTime<Utc>,
    #[serde(default)]
    bookmakers: Vec<OddsBookmaker>,
}

#[derive(Debug, Deserialize)]
struct OddsBookmaker {
    key: String,
    #[serde(default)]
    markets: Vec<OddsMarket>,
}

#[derive(Debug, Deserialize)]
struct OddsMarket {
    key: String,
    #[serde(default)]
    outcomes: Vec<OddsOutcome>,
}

#[derive(Debug, Deserialize)]
struct OddsOutcome {
    name: String,
    #[serde(with = "rust_decimal::serde::float")]
    price: Decimal,
}

/// Parse a feed snapshot into fixtures.
///
/// The first bookmaker with an `h2h` market prices the fixture. Outcomes named
/// after the home or away team map to those sides; any other name is the draw.
pub fn parse_fixtures(json: &str) -> anyhow::Result<Vec<Fixture>> {
    let events: Vec<OddsEvent> =
        serde_json::from_str(json).context("parsing odds feed snapshot")?;

    Ok(events.into_iter().map(event_to_fixture).collect())
}

fn event_to_fixture(event: OddsEvent) -> Fixture {
    let quote = event
        .bookmakers
        .iter()
        .find_map(|b| {
            b.markets
                .iter()
                .find(|m| m.key == H2H_MARKET)
                .map(|m| (b.key.as_str(), m))
        })
        .and_then(|(bookmaker, market)| {
            let quote = quote_from_outcomes(&event.home_team, &event.away_team, &market.outcomes);
            if quote.is_none() {
                tracing::debug!(
                    bookmaker,
                    home = %event.home_team,
                    away = %event.away_team,
                    "Incomplete or invalid h2h prices"
                );
            }
            quote
        });

    Fixture {
        home_team: event.home_team,
        away_team: event.away_team,
        kickoff: event.commence_time,
        quote,
    }
}

fn quote_from_outcomes(home: &str, away: &str, outcomes: &[OddsOutcome]) -> Option<MarketQuote> {
    let mut home_odd = None;
    let mut draw_odd = None;
    let mut away_odd = None;

    for outcome in outcomes {
        if outcome.name == home {
            home_odd = Some(outcome.price);
        } else if outcome.name == away {
            away_odd = Some(outcome.price);
        } else {
            draw_odd = Some(outcome.price);
        }
    }

    let quote = MarketQuote::new(home_odd?, draw_odd?, away_odd?);
    quote.validate().ok()?;
    Some(quote)
}

/// Reads a feed snapshot file on every fetch
#[derive(Debug, Clone)]
pub struct SnapshotQuoteSource {
    path: PathBuf,
}

impl SnapshotQuoteSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl QuoteSource for SnapshotQuoteSource {
    async fn fixtures(&self) -> anyhow::Result<Vec<Fixture>> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("reading odds snapshot {}", self.path.display()))?;
        let fixtures = parse_fixtures(&content)?;
        tracing::debug!(
            path = %self.path.display(),
            fixtures = fixtures.len(),
            "Loaded odds snapshot"
        );
        Ok(fixtures)
    }
}
