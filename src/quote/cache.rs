//! Cached quote source with a staleness guard
//!
//! Holds the last successfully fetched fixture list. A refresh within
//! `min_staleness` of the last good fetch is skipped; a failed fetch leaves
//! the previous list in place.

use super::{Fixture, QuoteSource};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;

/// Result of a refresh attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Cache is still fresh, nothing fetched
    Skipped,
    /// Fetched this many fixtures
    Refreshed(usize),
    /// Fetch failed, previous fixtures kept
    Failed,
}

#[derive(Debug, Default)]
struct CacheState {
    fixtures: Vec<Fixture>,
    last_fetch: Option<DateTime<Utc>>,
}

/// Wraps a source and serves its last good fixture list
pub struct CachedQuoteSource<S> {
    inner: S,
    min_staleness: std::time::Duration,
    state: RwLock<CacheState>,
    refresh_lock: Mutex<()>,
}

impl<S: QuoteSource> CachedQuoteSource<S> {
    /// Create a new cache around `inner`
    pub fn new(inner: S, min_staleness: std::time::Duration) -> Self {
        Self {
            inner,
            min_staleness,
            state: RwLock::new(CacheState::default()),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Time of the last successful fetch
    pub async fn last_fetch(&self) -> Option<DateTime<Utc>> {
        self.state.read().await.last_fetch
    }

    /// Cached fixtures without triggering a fetch
    pub async fn cached(&self) -> Vec<Fixture> {
        self.state.read().await.fixtures.clone()
    }

    /// Refresh unless the cache is still fresh
    pub async fn refresh(&self) -> RefreshOutcome {
        self.refresh_at(Utc::now()).await
    }

    /// Refresh as of `now`
    pub async fn refresh_at(&self, now: DateTime<Utc>) -> RefreshOutcome {
        let _guard = self.refresh_lock.lock().await;

        let last_fetch = self.state.read().await.last_fetch;
        if let Some(last) = last_fetch {
            let fresh = match (now - last).to_std() {
                Ok(elapsed) => elapsed < self.min_staleness,
                // Clock went backwards
                Err(_) => true,
            };
            if fresh {
                return RefreshOutcome::Skipped;
            }
        }

        match self.inner.fixtures().await {
            Ok(fixtures) => {
                let count = fixtures.len();
                let mut state = self.state.write().await;
                state.fixtures = fixtures;
                state.last_fetch = Some(now);
                tracing::info!(fixtures = count, "Refreshed quote cache");
                RefreshOutcome::Refreshed(count)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Quote refresh failed, keeping cached fixtures");
                RefreshOutcome::Failed
            }
        }
    }
}

impl<S: QuoteSource + 'static> CachedQuoteSource<S> {
    /// Refresh on a fixed interval until the task is aborted.
    ///
    /// The first tick fires immediately.
    pub fn spawn_refresh_loop(self: Arc<Self>, every: std::time::Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;
                self.refresh().await;
            }
        })
    }
}

#[async_trait]
impl<S: QuoteSource> QuoteSource for CachedQuoteSource<S> {
    async fn fixtures(&self) -> anyhow::Result<Vec<Fixture>> {
        self.refresh().await;
        Ok(self.cached().await)
    }
}
