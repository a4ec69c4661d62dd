//! Match outcome model module
//!
//! Turns expected-goal rates into 1X2 outcome probabilities

mod poisson;

pub use poisson::{match_outcome_probabilities, poisson_pmf, PoissonModel, MAX_GOAL_CAP};

use crate::form::GoalRatePair;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Outcome model errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// Expected-goal rate that is negative or not finite
    #[error("invalid goal rate: {0}")]
    InvalidRate(f64),
    /// Goal cap outside 1..=MAX_GOAL_CAP
    #[error("invalid goal cap: {0} (must be between 1 and 100)")]
    InvalidGoalCap(u32),
}

/// One of the three full-time results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeKey {
    Home,
    Draw,
    Away,
}

impl OutcomeKey {
    /// Positional order used for probabilities and quoted odds
    pub const ALL: [OutcomeKey; 3] = [OutcomeKey::Home, OutcomeKey::Draw, OutcomeKey::Away];

    /// Conventional 1X2 label
    pub fn label(self) -> &'static str {
        match self {
            OutcomeKey::Home => "1",
            OutcomeKey::Draw => "X",
            OutcomeKey::Away => "2",
        }
    }
}

impl fmt::Display for OutcomeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Probabilities of home win, draw and away win.
///
/// With a finite goal cap the three values sum to slightly less than 1 unless
/// the model was asked to renormalize. The missing mass belongs to scorelines
/// beyond the cap and is an accepted approximation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OutcomeProbabilities {
    pub home: f64,
    pub draw: f64,
    pub away: f64,
}

impl OutcomeProbabilities {
    pub fn get(&self, key: OutcomeKey) -> f64 {
        match key {
            OutcomeKey::Home => self.home,
            OutcomeKey::Draw => self.draw,
            OutcomeKey::Away => self.away,
        }
    }

    /// Probability mass covered by the truncated distribution
    pub fn total(&self) -> f64 {
        self.home + self.draw + self.away
    }
}

/// Trait for outcome model implementations
pub trait OutcomeModel: Send + Sync {
    /// Calculate outcome probabilities for the given goal rates
    fn probabilities(&self, rates: GoalRatePair) -> Result<OutcomeProbabilities, ModelError>;
}
