//! Form-based goal rate heuristic
//!
//! rate = average points per match (W=2, D=1, L=0) * side coefficient.
//! Not a calibrated estimator; the coefficients stand in for home advantage.

use super::{FormError, FormRecord, FormSymbol, GoalRatePair};
use crate::config::ModelConfig;

/// Converts recent form into expected-goal rates
#[derive(Debug, Clone)]
pub struct GoalRateEstimator {
    /// Multiplier for the home side's average points
    pub home_coefficient: f64,
    /// Multiplier for the away side's average points
    pub away_coefficient: f64,
    /// Substituted for a missing or empty form record
    pub default_form: FormRecord,
}

impl GoalRateEstimator {
    /// Create a new estimator
    pub fn new(home_coefficient: f64, away_coefficient: f64, default_form: FormRecord) -> Self {
        Self {
            home_coefficient,
            away_coefficient,
            default_form,
        }
    }

    /// Create from ModelConfig
    pub fn from_config(config: &ModelConfig) -> Result<Self, FormError> {
        Ok(Self::new(
            config.home_coefficient,
            config.away_coefficient,
            config.default_form.parse()?,
        ))
    }

    /// Estimate rates from raw form strings.
    ///
    /// `None` or a blank string falls back to `default_form`.
    pub fn estimate(
        &self,
        home_form: Option<&str>,
        away_form: Option<&str>,
    ) -> Result<GoalRatePair, FormError> {
        let home = self.parse_or_default(home_form)?;
        let away = self.parse_or_default(away_form)?;
        Ok(self.estimate_records(&home, &away))
    }

    /// Estimate rates from already parsed records
    pub fn estimate_records(&self, home: &FormRecord, away: &FormRecord) -> GoalRatePair {
        let home = self.or_default(home);
        let away = self.or_default(away);

        GoalRatePair::new(
            home.average_points() * self.home_coefficient,
            away.average_points() * self.away_coefficient,
        )
    }

    fn parse_or_default(&self, raw: Option<&str>) -> Result<FormRecord, FormError> {
        match raw.map(str::trim) {
            Some(s) if !s.is_empty() => s.parse(),
            _ => Ok(self.default_form.clone()),
        }
    }

    fn or_default<'a>(&'a self, record: &'a FormRecord) -> &'a FormRecord {
        if record.is_empty() {
            &self.default_form
        } else {
            record
        }
    }
}

impl Default for GoalRateEstimator {
    fn default() -> Self {
        let config = ModelConfig::default();
        Self::new(
            config.home_coefficient,
            config.away_coefficient,
            FormRecord::new(vec![FormSymbol::Draw; 5]),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-12, "{a} != {b}");
    }

    #[test]
    fn test_estimate_applies_side_coefficients() {
        let estimator = GoalRateEstimator::default();
        // 7 points over 5 matches = 1.4, 6 points over 5 = 1.2
        let rates = estimator.estimate(Some("WWDWL"), Some("WDLDW")).unwrap();
        assert_close(rates.home, 1.4 * 0.7);
        assert_close(rates.away, 1.2 * 0.6);
    }

    #[test]
    fn test_missing_form_uses_default() {
        let estimator = GoalRateEstimator::default();
        let rates = estimator.estimate(None, Some("  ")).unwrap();
        // DDDDD averages one point
        assert_close(rates.home, 0.7);
        assert_close(rates.away, 0.6);
    }

    #[test]
    fn test_empty_record_uses_default() {
        let estimator = GoalRateEstimator::default();
        let rates = estimator.estimate_records(&FormRecord::default(), &"WWWWW".parse().unwrap());
        assert_close(rates.home, 0.7);
        assert_close(rates.away, 2.0 * 0.6);
    }

    #[test]
    fn test_invalid_symbol_fails() {
        let estimator = GoalRateEstimator::default();
        let err = estimator.estimate(Some("WWD?L"), None).unwrap_err();
        assert!(matches!(
            err,
            FormError::InvalidFormSymbol {
                symbol: '?',
                position: 3
            }
        ));
    }

    #[test]
    fn test_from_config() {
        let config = ModelConfig {
            home_coefficient: 1.0,
            away_coefficient: 0.5,
            default_form: "WWWWW".to_string(),
            ..ModelConfig::default()
        };
        let estimator = GoalRateEstimator::from_config(&config).unwrap();
        let rates = estimator.estimate(None, None).unwrap();
        assert_close(rates.home, 2.0);
        assert_close(rates.away, 1.0);
    }

    #[test]
    fn test_from_config_rejects_bad_default_form() {
        let config = ModelConfig {
            default_form: "WDZ".to_string(),
            ..ModelConfig::default()
        };
        assert!(GoalRateEstimator::from_config(&config).is_err());
    }

    #[test]
    fn test_all_losses_give_zero_rate() {
        let estimator = GoalRateEstimator::default();
        let rates = estimator.estimate(Some("LLLLL"), Some("LLL")).unwrap();
        assert_eq!(rates.home, 0.0);
        assert_eq!(rates.away, 0.0);
    }
}
