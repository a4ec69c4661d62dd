//! End-to-end advice tests

use bet_adviser::advice::{AdviceAssembler, AdviceError, AdviceRequest, Adviser};
use bet_adviser::config::Config;
use bet_adviser::form::GoalRateEstimator;
use bet_adviser::model::{match_outcome_probabilities, OutcomeKey};
use bet_adviser::quote::MarketQuote;
use bet_adviser::staking::{StakingAdvisor, StakingError};
use rust_decimal_macros::dec;

fn default_adviser() -> Adviser {
    Adviser::from_config(&Config::default()).unwrap()
}

#[test]
fn test_forms_to_recommendation() {
    let adviser = default_adviser();
    let request = AdviceRequest::new(MarketQuote::new(dec!(2.10), dec!(3.40), dec!(3.60)))
        .with_forms("WWDWL", "WWWWWDLLLL");

    let advice = adviser.advise(&request).unwrap();

    // 1.4 * 0.7 and 1.1 * 0.6
    assert!((advice.rates.home - 0.98).abs() < 1e-12);
    assert!((advice.rates.away - 0.66).abs() < 1e-12);

    let probs = advice.probabilities;
    assert!((probs.home - 0.419_510_644_992_208_2).abs() < 1e-12);
    assert!((probs.draw - 0.341_252_749_570_701_34).abs() < 1e-12);
    assert!((probs.away - 0.239_156_993_442_302).abs() < 1e-12);
    assert!(probs.total() < 1.0);

    let bets: Vec<_> = advice.recommendation.bets().map(|(k, _)| k).collect();
    assert_eq!(bets, vec![OutcomeKey::Draw]);
    assert_eq!(advice.recommendation.draw.stake, dec!(33.39));
    assert_eq!(advice.recommendation.home.stake, dec!(0));
}

#[test]
fn test_half_kelly_worked_example() {
    // p = 0.5 at 2.5: edge 0.25, full Kelly 1/6, half Kelly 1/12 of 500
    let staking = StakingAdvisor::new(2.0, 0.05);
    let decision = staking.evaluate(0.5, dec!(2.5), dec!(500)).unwrap();
    assert!((decision.edge - 0.25).abs() < 1e-12);
    assert!(decision.should_bet);
    assert_eq!(decision.stake, dec!(41.67));
}

#[test]
fn test_stronger_home_form_raises_home_probability() {
    let estimator = GoalRateEstimator::default();
    let strong = estimator.estimate(Some("WWWWW"), Some("DDDDD")).unwrap();
    let weak = estimator.estimate(Some("LLLLL"), Some("DDDDD")).unwrap();

    let strong_probs = match_outcome_probabilities(strong.home, strong.away, 7).unwrap();
    let weak_probs = match_outcome_probabilities(weak.home, weak.away, 7).unwrap();

    assert!(strong_probs.home > weak_probs.home);
    assert!(strong_probs.away < weak_probs.away);
    // Zero home rate: home side never scores
    assert_eq!(weak_probs.home, 0.0);
}

#[test]
fn test_equal_forms_favour_home_side() {
    let adviser = default_adviser();
    let request = AdviceRequest::new(MarketQuote::new(dec!(2.5), dec!(3.2), dec!(3.0)))
        .with_forms("WDLWD", "WDLWD");
    let advice = adviser.advise(&request).unwrap();

    assert!(advice.rates.home > advice.rates.away);
    assert!(advice.probabilities.home > advice.probabilities.away);
}

#[test]
fn test_assembler_pairs_probabilities_and_odds_by_position() {
    let probs = match_outcome_probabilities(0.98, 0.66, 7).unwrap();
    let quote = MarketQuote::new(dec!(2.10), dec!(3.40), dec!(3.60));
    let rec = AdviceAssembler::default()
        .assemble(&probs, &quote, dec!(1000))
        .unwrap();

    for (key, advice) in rec.iter() {
        assert_eq!(advice.quoted_odd, quote.get(key));
        assert_eq!(advice.should_bet, advice.edge_percent > dec!(5));
    }
}

#[test]
fn test_invalid_inputs_are_rejected() {
    let adviser = default_adviser();

    let bad_form = AdviceRequest::new(MarketQuote::new(dec!(2.1), dec!(3.4), dec!(3.6)))
        .with_forms("WXD", "DDDDD");
    assert!(matches!(adviser.advise(&bad_form), Err(AdviceError::Form(_))));

    let bad_odd = AdviceRequest::new(MarketQuote::new(dec!(2.1), dec!(1.0), dec!(3.6)));
    assert_eq!(
        adviser.advise(&bad_odd),
        Err(AdviceError::Staking(StakingError::InvalidOdd(dec!(1.0))))
    );

    let bad_bankroll =
        AdviceRequest::new(MarketQuote::new(dec!(2.1), dec!(3.4), dec!(3.6))).with_bankroll(dec!(0));
    assert!(matches!(
        adviser.advise(&bad_bankroll),
        Err(AdviceError::Staking(StakingError::InvalidBankroll(_)))
    ));
}

#[test]
fn test_advice_json_shape() {
    let adviser = default_adviser();
    let request: AdviceRequest = serde_json::from_str(
        r#"{
            "home_form": "WWDWL",
            "away_form": "WWWWWDLLLL",
            "quote": {"home": 2.1, "draw": 3.4, "away": 3.6},
            "bankroll": 1000
        }"#,
    )
    .unwrap();

    let advice = adviser.advise(&request).unwrap();
    let json = serde_json::to_value(&advice).unwrap();

    assert_eq!(json["bankroll"], serde_json::json!(1000.0));
    assert_eq!(json["recommendation"]["draw"]["stake"], serde_json::json!(33.39));
    assert_eq!(
        json["recommendation"]["home"]["should_bet"],
        serde_json::json!(false)
    );
    assert!(json["probabilities"]["home"].is_f64());
}
