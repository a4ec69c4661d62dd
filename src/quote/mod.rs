//! Market quote module
//!
//! Bookmaker 1X2 odds and the sources that supply them to the adviser

mod cache;
mod odds_api;

pub use cache::{CachedQuoteSource, RefreshOutcome};
pub use odds_api::{parse_fixtures, SnapshotQuoteSource};

use crate::model::OutcomeKey;
use crate::staking::StakingError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Decimal odds for home win, draw and away win
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketQuote {
    #[serde(with = "rust_decimal::serde::float")]
    pub home: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub draw: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub away: Decimal,
}

impl MarketQuote {
    pub fn new(home: Decimal, draw: Decimal, away: Decimal) -> Self {
        Self { home, draw, away }
    }

    pub fn get(&self, key: OutcomeKey) -> Decimal {
        match key {
            OutcomeKey::Home => self.home,
            OutcomeKey::Draw => self.draw,
            OutcomeKey::Away => self.away,
        }
    }

    /// Every odd must exceed 1
    pub fn validate(&self) -> Result<(), StakingError> {
        for key in OutcomeKey::ALL {
            let odd = self.get(key);
            if odd <= Decimal::ONE {
                return Err(StakingError::InvalidOdd(odd));
            }
        }
        Ok(())
    }
}

/// An upcoming match with its best available quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub home_team: String,
    pub away_team: String,
    pub kickoff: DateTime<Utc>,
    /// None when the feed has no complete three-way price
    pub quote: Option<MarketQuote>,
}

impl Fixture {
    /// "Home vs Away"
    pub fn label(&self) -> String {
        format!("{} vs {}", self.home_team, self.away_team)
    }

    /// Case-insensitive match on both team names
    pub fn is_between(&self, home: &str, away: &str) -> bool {
        self.home_team.trim().eq_ignore_ascii_case(home.trim())
            && self.away_team.trim().eq_ignore_ascii_case(away.trim())
    }
}

/// Trait for quote source implementations
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fixtures currently offered
    async fn fixtures(&self) -> anyhow::Result<Vec<Fixture>>;

    /// Quote for a specific pairing, if listed and priced
    async fn quote_for(&self, home: &str, away: &str) -> anyhow::Result<Option<MarketQuote>> {
        let fixtures = self.fixtures().await?;
        Ok(fixtures
            .into_iter()
            .find(|f| f.is_between(home, away))
            .and_then(|f| f.quote))
    }
}

/// Fixed in-memory fixture list
#[derive(Debug, Clone, Default)]
pub struct StaticQuoteSource {
    fixtures: Vec<Fixture>,
}

impl StaticQuoteSource {
    pub fn new(fixtures: Vec<Fixture>) -> Self {
        Self { fixtures }
    }
}

#[async_trait]
impl QuoteSource for StaticQuoteSource {
    async fn fixtures(&self) -> anyhow::Result<Vec<Fixture>> {
        Ok(self.fixtures.clone())
    }
}
