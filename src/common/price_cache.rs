//! Freshness-window cache in front of a price source

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::debug;

use super::errors::Result;
use super::traits::PriceSource;
use super::types::PriceSnapshot;

struct CachedSnapshot {
    snapshot: PriceSnapshot,
    stored_at: Instant,
}

/// Wraps a [`PriceSource`] and serves each pair's snapshot for at most `ttl`
///
/// An expired entry is replaced by the next fetch. Errors from the inner
/// source are returned as-is and never stored. A zero `ttl` disables caching.
pub struct CachedPriceSource<S> {
    inner: S,
    ttl: Duration,
    entries: Mutex<HashMap<String, CachedSnapshot>>,
}

impl<S: PriceSource> CachedPriceSource<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Drop every cached snapshot
    pub fn invalidate(&self) {
        self.entries.lock().clear();
    }

    /// Number of cached pairs, including expired ones not yet replaced
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn fresh(&self, pair_id: &str) -> Option<PriceSnapshot> {
        let entries = self.entries.lock();
        entries
            .get(pair_id)
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .map(|entry| entry.snapshot.clone())
    }
}

#[async_trait]
impl<S: PriceSource> PriceSource for CachedPriceSource<S> {
    async fn snapshot(&self, pair_id: &str) -> Result<PriceSnapshot> {
        if self.ttl.is_zero() {
            return self.inner.snapshot(pair_id).await;
        }

        if let Some(snapshot) = self.fresh(pair_id) {
            debug!(pair_id, "Serving cached price snapshot");
            return Ok(snapshot);
        }

        let snapshot = self.inner.snapshot(pair_id).await?;
        self.entries.lock().insert(
            pair_id.to_string(),
            CachedSnapshot {
                snapshot: snapshot.clone(),
                stored_at: Instant::now(),
            },
        );
        Ok(snapshot)
    }
}
