//! Kelly criterion stake sizing
//!
//! For decimal odds `o` and model probability `p`:
//! - edge = p * o - 1
//! - full Kelly fraction f* = edge / (o - 1)
//! - stake = f* / kelly_divisor * bankroll, rounded to cents
//!
//! Any positive edge gets a stake. Only an edge above `bet_threshold` is
//! flagged as a bet, so small positive edges carry a stake without the flag.

use super::{StakeDecision, StakingError};
use crate::config::StakingConfig;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Fractional-Kelly calculator for decimal odds
#[derive(Debug, Clone)]
pub struct StakingAdvisor {
    /// Full Kelly is divided by this (2.0 = half Kelly)
    pub kelly_divisor: f64,
    /// Edge that must be exceeded for `should_bet`
    pub bet_threshold: f64,
}

impl StakingAdvisor {
    /// Create a new staking advisor
    pub fn new(kelly_divisor: f64, bet_threshold: f64) -> Self {
        Self {
            kelly_divisor,
            bet_threshold,
        }
    }

    /// Create from StakingConfig
    pub fn from_config(config: &StakingConfig) -> Self {
        Self::new(config.kelly_divisor, config.bet_threshold)
    }

    /// Evaluate a selection priced at `odd` with model probability `prob`
    pub fn evaluate(
        &self,
        prob: f64,
        odd: Decimal,
        bankroll: Decimal,
    ) -> Result<StakeDecision, StakingError> {
        if !(0.0..=1.0).contains(&prob) {
            return Err(StakingError::InvalidProbability(prob));
        }
        let odd_f = match odd.to_f64() {
            Some(o) if odd > Decimal::ONE => o,
            _ => return Err(StakingError::InvalidOdd(odd)),
        };
        if bankroll <= Decimal::ZERO {
            return Err(StakingError::InvalidBankroll(bankroll));
        }
        if !(self.kelly_divisor.is_finite() && self.kelly_divisor > 0.0) {
            return Err(StakingError::InvalidKellyDivisor(self.kelly_divisor));
        }

        let edge = prob * odd_f - 1.0;
        let should_bet = edge > self.bet_threshold;

        if edge <= 0.0 {
            return Ok(StakeDecision {
                edge,
                should_bet,
                stake: Decimal::ZERO,
            });
        }

        let kelly_fraction = edge / (odd_f - 1.0);
        let adjusted = kelly_fraction / self.kelly_divisor;
        let stake = Decimal::try_from(adjusted)
            .ok()
            .and_then(|fraction| fraction.checked_mul(bankroll))
            .ok_or(StakingError::StakeOverflow {
                fraction: adjusted,
                bankroll,
            })?
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        tracing::debug!(
            prob,
            odd = %odd,
            edge,
            kelly_fraction,
            stake = %stake,
            should_bet,
            "Evaluated selection"
        );

        Ok(StakeDecision {
            edge,
            should_bet,
            stake,
        })
    }
}

impl Default for StakingAdvisor {
    fn default() -> Self {
        Self::from_config(&StakingConfig::default())
    }
}
