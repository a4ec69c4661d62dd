//! Integration tests for configuration loading

use bet_adviser::advice::{AdviceRequest, Adviser};
use bet_adviser::config::Config;
use bet_adviser::quote::MarketQuote;
use rust_decimal_macros::dec;
use std::io::Write;

#[test]
fn test_example_config_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config.toml.example");
    let config = Config::load(path).unwrap();

    assert_eq!(config.model.goal_cap, 7);
    assert_eq!(config.staking.kelly_divisor, 2.0);
    assert_eq!(config.staking.default_bankroll, dec!(1000));
    assert!(config.feed.snapshot_path.is_none());
}

#[test]
fn test_config_drives_adviser() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
        [model]
        goal_cap = 12
        renormalize = true

        [staking]
        kelly_divisor = 4.0
        bet_threshold = 0.2
        default_bankroll = 1000.0
        "#
    )
    .unwrap();

    let config = Config::load(file.path()).unwrap();
    let adviser = Adviser::from_config(&config).unwrap();
    let advice = adviser
        .advise(
            &AdviceRequest::new(MarketQuote::new(dec!(2.10), dec!(3.40), dec!(3.60)))
                .with_forms("WWDWL", "WWWWWDLLLL"),
        )
        .unwrap();

    assert!((advice.probabilities.total() - 1.0).abs() < 1e-12);
    // Draw edge is about 16%, under the raised threshold
    assert!(!advice.recommendation.draw.should_bet);
    assert!(advice.recommendation.draw.stake > dec!(0));
}

#[test]
fn test_invalid_config_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[model]\ngoal_cap = 0").unwrap();
    assert!(Config::load(file.path()).is_err());
}
