//! Staking types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Staking input errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StakingError {
    /// Decimal odds must be greater than 1
    #[error("invalid decimal odd: {0} (must be > 1)")]
    InvalidOdd(Decimal),
    /// Probability outside [0, 1]
    #[error("invalid probability: {0} (must be within [0, 1])")]
    InvalidProbability(f64),
    /// Bankroll must be positive
    #[error("invalid bankroll: {0} (must be > 0)")]
    InvalidBankroll(Decimal),
    /// Kelly divisor must be positive
    #[error("invalid Kelly divisor: {0} (must be > 0)")]
    InvalidKellyDivisor(f64),
    /// Stake does not fit in a Decimal
    #[error("stake overflow: Kelly fraction {fraction} of bankroll {bankroll}")]
    StakeOverflow { fraction: f64, bankroll: Decimal },
}

/// Outcome of evaluating one priced selection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StakeDecision {
    /// Expected profit per unit staked: prob * odd - 1
    pub edge: f64,
    /// Edge exceeds the bet threshold
    pub should_bet: bool,
    /// Fractional-Kelly stake in currency units, zero unless edge > 0
    #[serde(with = "rust_decimal::serde::float")]
    pub stake: Decimal,
}
