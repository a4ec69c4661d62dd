//! Integration tests for quote sources

use bet_adviser::advice::{AdviceRequest, Adviser};
use bet_adviser::quote::{
    CachedQuoteSource, QuoteSource, RefreshOutcome, SnapshotQuoteSource,
};
use rust_decimal_macros::dec;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

const SNAPSHOT: &str = r#"[
    {
        "commence_time": "2024-08-24T14:00:00Z",
        "home_team": "Brentford",
        "away_team": "Southampton",
        "bookmakers": [
            {"key": "betfair", "markets": [{"key": "h2h", "outcomes": [
                {"name": "Southampton", "price": 3.6},
                {"name": "Brentford", "price": 2.1},
                {"name": "Draw", "price": 3.4}
            ]}]}
        ]
    },
    {
        "commence_time": "2024-08-24T16:30:00Z",
        "home_team": "Fulham",
        "away_team": "Leicester City",
        "bookmakers": []
    }
]"#;

fn snapshot_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn test_snapshot_quote_feeds_adviser() {
    let file = snapshot_file(SNAPSHOT);
    let source = SnapshotQuoteSource::new(file.path());

    let quote = source
        .quote_for("Brentford", "Southampton")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(quote.home, dec!(2.1));
    assert_eq!(quote.away, dec!(3.6));

    let adviser = Adviser::default();
    let advice = adviser
        .advise(&AdviceRequest::new(quote).with_forms("WWDWL", "WWWWWDLLLL"))
        .unwrap();
    assert_eq!(advice.recommendation.draw.stake, dec!(33.39));
}

#[tokio::test]
async fn test_unpriced_and_unknown_fixtures() {
    let file = snapshot_file(SNAPSHOT);
    let source = SnapshotQuoteSource::new(file.path());

    assert!(source
        .quote_for("Fulham", "Leicester City")
        .await
        .unwrap()
        .is_none());
    assert!(source.quote_for("Fulham", "Brentford").await.unwrap().is_none());
}

#[tokio::test]
async fn test_missing_snapshot_is_an_error() {
    let source = SnapshotQuoteSource::new("/nonexistent/odds.json");
    assert!(source.fixtures().await.is_err());
}

#[tokio::test]
async fn test_cache_keeps_fixtures_when_snapshot_breaks() {
    let file = snapshot_file(SNAPSHOT);
    let cache = CachedQuoteSource::new(SnapshotQuoteSource::new(file.path()), Duration::ZERO);

    assert_eq!(cache.refresh().await, RefreshOutcome::Refreshed(2));

    std::fs::write(file.path(), "not json").unwrap();
    assert_eq!(cache.refresh().await, RefreshOutcome::Failed);
    assert_eq!(cache.cached().await.len(), 2);
}

#[tokio::test]
async fn test_cache_skips_fresh_refresh() {
    let file = snapshot_file(SNAPSHOT);
    let cache = CachedQuoteSource::new(
        SnapshotQuoteSource::new(file.path()),
        Duration::from_secs(3600),
    );

    assert_eq!(cache.fixtures().await.unwrap().len(), 2);
    let first_fetch = cache.last_fetch().await;

    // Changes on disk are not picked up while the cache is fresh
    std::fs::write(file.path(), "[]").unwrap();
    assert_eq!(cache.refresh().await, RefreshOutcome::Skipped);
    assert_eq!(cache.fixtures().await.unwrap().len(), 2);
    assert_eq!(cache.last_fetch().await, first_fetch);
}

#[tokio::test]
async fn test_refresh_loop_populates_cache() {
    let file = snapshot_file(SNAPSHOT);
    let cache = Arc::new(CachedQuoteSource::new(
        SnapshotQuoteSource::new(file.path()),
        Duration::ZERO,
    ));

    let handle = cache.clone().spawn_refresh_loop(Duration::from_millis(10));
    let mut populated = false;
    for _ in 0..100 {
        if !cache.cached().await.is_empty() {
            populated = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    handle.abort();

    assert!(populated);
    assert!(cache.last_fetch().await.is_some());
}
