//! Independent Poisson scoreline model
//!
//! Each side's goal count is Poisson(rate). The joint mass of every scoreline
//! (h, a) with h, a < goal_cap is summed into home win, draw or away win.

use super::{ModelError, OutcomeModel, OutcomeProbabilities};
use crate::config::ModelConfig;
use crate::form::GoalRatePair;

/// Largest accepted goal cap
pub const MAX_GOAL_CAP: u32 = 100;

/// Poisson outcome model with a configurable truncation
#[derive(Debug, Clone)]
pub struct PoissonModel {
    /// Goal counts per side are summed over `0..goal_cap`
    pub goal_cap: u32,
    /// Rescale the truncated result to sum to 1
    pub renormalize: bool,
}

impl PoissonModel {
    /// Create a new Poisson model
    pub fn new(goal_cap: u32, renormalize: bool) -> Self {
        Self {
            goal_cap,
            renormalize,
        }
    }

    /// Create from ModelConfig
    pub fn from_config(config: &ModelConfig) -> Self {
        Self::new(config.goal_cap, config.renormalize)
    }
}

impl Default for PoissonModel {
    fn default() -> Self {
        Self::new(7, false)
    }
}

impl OutcomeModel for PoissonModel {
    fn probabilities(&self, rates: GoalRatePair) -> Result<OutcomeProbabilities, ModelError> {
        let probs = match_outcome_probabilities(rates.home, rates.away, self.goal_cap)?;
        if !self.renormalize {
            return Ok(probs);
        }

        let total = probs.total();
        if total <= 0.0 {
            // Every scoreline below the cap underflowed
            return Ok(probs);
        }
        Ok(OutcomeProbabilities {
            home: probs.home / total,
            draw: probs.draw / total,
            away: probs.away / total,
        })
    }
}

/// Outcome probabilities for independent Poisson goal counts.
///
/// The result is not renormalized: mass of scorelines with either side at or
/// above `goal_cap` is dropped, so the sum is slightly below 1.
pub fn match_outcome_probabilities(
    rate_home: f64,
    rate_away: f64,
    goal_cap: u32,
) -> Result<OutcomeProbabilities, ModelError> {
    validate_rate(rate_home)?;
    validate_rate(rate_away)?;
    if goal_cap == 0 || goal_cap > MAX_GOAL_CAP {
        return Err(ModelError::InvalidGoalCap(goal_cap));
    }

    let pmf_home = poisson_pmf(rate_home, goal_cap as usize);
    let pmf_away = poisson_pmf(rate_away, goal_cap as usize);

    let mut probs = OutcomeProbabilities::default();
    for (h, p_h) in pmf_home.iter().enumerate() {
        for (a, p_a) in pmf_away.iter().enumerate() {
            let p = p_h * p_a;
            if h > a {
                probs.home += p;
            } else if h == a {
                probs.draw += p;
            } else {
                probs.away += p;
            }
        }
    }

    tracing::trace!(
        rate_home,
        rate_away,
        goal_cap,
        p_home = probs.home,
        p_draw = probs.draw,
        p_away = probs.away,
        "Poisson outcome probabilities"
    );

    Ok(probs)
}

/// Poisson mass for k = 0..len.
///
/// Uses P(k) = P(k-1) * rate / k, which avoids evaluating k! and stays
/// finite for any cap.
pub fn poisson_pmf(rate: f64, len: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(len);
    if len == 0 {
        return out;
    }

    let mut p = (-rate).exp();
    out.push(p);
    for k in 1..len {
        p *= rate / k as f64;
        out.push(p);
    }
    out
}

fn validate_rate(rate: f64) -> Result<(), ModelError> {
    if rate.is_finite() && rate >= 0.0 {
        Ok(())
    } else {
        Err(ModelError::InvalidRate(rate))
    }
}
