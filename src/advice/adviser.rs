//! Single-call adviser: form strings and a quote in, recommendation out

use super::{AdviceAssembler, AdviceError, Recommendation};
use crate::config::Config;
use crate::form::{GoalRateEstimator, GoalRatePair};
use crate::model::{OutcomeModel, OutcomeProbabilities, PoissonModel};
use crate::quote::MarketQuote;
use crate::staking::StakingAdvisor;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Inputs for one advisory call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceRequest {
    /// Home side recent form, e.g. "WWDLW"; default form when absent
    #[serde(default)]
    pub home_form: Option<String>,
    /// Away side recent form
    #[serde(default)]
    pub away_form: Option<String>,
    pub quote: MarketQuote,
    /// Overrides the configured default bankroll
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub bankroll: Option<Decimal>,
    /// Overrides the configured Kelly divisor
    #[serde(default)]
    pub kelly_divisor: Option<f64>,
    /// Overrides the configured bet threshold
    #[serde(default)]
    pub bet_threshold: Option<f64>,
}

impl AdviceRequest {
    pub fn new(quote: MarketQuote) -> Self {
        Self {
            home_form: None,
            away_form: None,
            quote,
            bankroll: None,
            kelly_divisor: None,
            bet_threshold: None,
        }
    }

    pub fn with_forms(mut self, home: impl Into<String>, away: impl Into<String>) -> Self {
        self.home_form = Some(home.into());
        self.away_form = Some(away.into());
        self
    }

    pub fn with_bankroll(mut self, bankroll: Decimal) -> Self {
        self.bankroll = Some(bankroll);
        self
    }
}

/// Full result of an advisory call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advice {
    pub rates: GoalRatePair,
    pub probabilities: OutcomeProbabilities,
    #[serde(with = "rust_decimal::serde::float")]
    pub bankroll: Decimal,
    pub recommendation: Recommendation,
}

/// Runs form estimation, the outcome model and staking in sequence.
///
/// Holds configuration only, so one instance can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct Adviser<M = PoissonModel> {
    estimator: GoalRateEstimator,
    model: M,
    staking: StakingAdvisor,
    default_bankroll: Decimal,
}

impl Adviser<PoissonModel> {
    /// Build from configuration
    pub fn from_config(config: &Config) -> Result<Self, AdviceError> {
        Ok(Self {
            estimator: GoalRateEstimator::from_config(&config.model)?,
            model: PoissonModel::from_config(&config.model),
            staking: StakingAdvisor::from_config(&config.staking),
            default_bankroll: config.staking.default_bankroll,
        })
    }
}

impl<M: OutcomeModel> Adviser<M> {
    pub fn new(
        estimator: GoalRateEstimator,
        model: M,
        staking: StakingAdvisor,
        default_bankroll: Decimal,
    ) -> Self {
        Self {
            estimator,
            model,
            staking,
            default_bankroll,
        }
    }

    /// Produce advice for one match
    pub fn advise(&self, request: &AdviceRequest) -> Result<Advice, AdviceError> {
        // Reject bad odds before any modelling
        request.quote.validate()?;

        let rates = self
            .estimator
            .estimate(request.home_form.as_deref(), request.away_form.as_deref())?;
        let probabilities = self.model.probabilities(rates)?;

        let staking = StakingAdvisor::new(
            request.kelly_divisor.unwrap_or(self.staking.kelly_divisor),
            request.bet_threshold.unwrap_or(self.staking.bet_threshold),
        );
        let bankroll = request.bankroll.unwrap_or(self.default_bankroll);
        let recommendation =
            AdviceAssembler::new(staking).assemble(&probabilities, &request.quote, bankroll)?;

        tracing::debug!(
            rate_home = rates.home,
            rate_away = rates.away,
            p_home = probabilities.home,
            p_draw = probabilities.draw,
            p_away = probabilities.away,
            bets = recommendation.bets().count(),
            "Advice computed"
        );

        Ok(Advice {
            rates,
            probabilities,
            bankroll,
            recommendation,
        })
    }
}

impl Default for Adviser<PoissonModel> {
    fn default() -> Self {
        Self::new(
            GoalRateEstimator::default(),
            PoissonModel::default(),
            StakingAdvisor::default(),
            Decimal::new(1000, 0),
        )
    }
}
