//! Per-outcome recommendation assembly

use super::AdviceError;
use crate::model::{OutcomeKey, OutcomeProbabilities};
use crate::quote::MarketQuote;
use crate::staking::StakingAdvisor;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Recommendation for a single outcome
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutcomeAdvice {
    /// Model probability in percent, one decimal
    #[serde(with = "rust_decimal::serde::float")]
    pub probability_percent: Decimal,
    /// Edge in percent, one decimal
    #[serde(with = "rust_decimal::serde::float")]
    pub edge_percent: Decimal,
    /// Decimal odd the edge was computed against
    #[serde(with = "rust_decimal::serde::float")]
    pub quoted_odd: Decimal,
    /// Edge exceeds the bet threshold
    pub should_bet: bool,
    /// Stake in currency units, two decimals
    #[serde(with = "rust_decimal::serde::float")]
    pub stake: Decimal,
}

/// Advice for home win, draw and away win
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub home: OutcomeAdvice,
    pub draw: OutcomeAdvice,
    pub away: OutcomeAdvice,
}

impl Recommendation {
    pub fn get(&self, key: OutcomeKey) -> &OutcomeAdvice {
        match key {
            OutcomeKey::Home => &self.home,
            OutcomeKey::Draw => &self.draw,
            OutcomeKey::Away => &self.away,
        }
    }

    /// Outcomes in 1, X, 2 order
    pub fn iter(&self) -> impl Iterator<Item = (OutcomeKey, &OutcomeAdvice)> {
        OutcomeKey::ALL.into_iter().map(move |k| (k, self.get(k)))
    }

    /// Outcomes flagged as bets
    pub fn bets(&self) -> impl Iterator<Item = (OutcomeKey, &OutcomeAdvice)> {
        self.iter().filter(|(_, advice)| advice.should_bet)
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, advice) in self.iter() {
            writeln!(
                f,
                "{}: prob {}% | edge {}% | odd {} | stake {} | {}",
                key,
                advice.probability_percent,
                advice.edge_percent,
                advice.quoted_odd,
                advice.stake,
                if advice.should_bet { "bet" } else { "no bet" }
            )?;
        }
        Ok(())
    }
}

/// Pairs outcome probabilities with quoted odds and sizes each selection
#[derive(Debug, Clone, Default)]
pub struct AdviceAssembler {
    staking: StakingAdvisor,
}

impl AdviceAssembler {
    pub fn new(staking: StakingAdvisor) -> Self {
        Self { staking }
    }

    /// Build the recommendation.
    ///
    /// Probabilities and odds are paired by position: home, draw, away.
    pub fn assemble(
        &self,
        probs: &OutcomeProbabilities,
        quote: &MarketQuote,
        bankroll: Decimal,
    ) -> Result<Recommendation, AdviceError> {
        quote.validate()?;

        let advise = |key: OutcomeKey| -> Result<OutcomeAdvice, AdviceError> {
            let prob = probs.get(key);
            let odd = quote.get(key);
            let decision = self.staking.evaluate(prob, odd, bankroll)?;
            Ok(OutcomeAdvice {
                probability_percent: percent(prob)?,
                edge_percent: percent(decision.edge)?,
                quoted_odd: odd,
                should_bet: decision.should_bet,
                stake: decision.stake,
            })
        };

        Ok(Recommendation {
            home: advise(OutcomeKey::Home)?,
            draw: advise(OutcomeKey::Draw)?,
            away: advise(OutcomeKey::Away)?,
        })
    }
}

/// Fraction as a percentage rounded to one decimal
fn percent(fraction: f64) -> Result<Decimal, AdviceError> {
    let value = fraction * 100.0;
    Decimal::try_from(value)
        .map(|d| d.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero))
        .map_err(|_| AdviceError::PercentOutOfRange(value))
}
