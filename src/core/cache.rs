use crate::domain::model::CachedResponse;
use crate::domain::ports::{CacheStore, Clock, SystemClock};
use crate::utils::error::Result;
use chrono::Duration;
use std::sync::Arc;

/// Cache key for a request: method plus full URL.
pub fn cache_key(method: &http::Method, url: &str) -> String {
    format!("{} {}", method, url)
}

/// Freshness-checked view over a [`CacheStore`].
#[derive(Clone)]
pub struct ResponseCache {
    store: Arc<dyn CacheStore>,
    clock: Arc<dyn Clock>,
    max_age: Duration,
}

impl ResponseCache {
    pub fn new(store: Arc<dyn CacheStore>, max_age: Duration) -> Self {
        Self::with_clock(store, max_age, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn CacheStore>, max_age: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            max_age,
        }
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    /// A fresh entry for `key`. Stale entries are misses even if the store
    /// has not evicted them yet.
    pub async fn lookup(&self, key: &str) -> Result<Option<CachedResponse>> {
        let Some(entry) = self.store.get(key).await? else {
            return Ok(None);
        };

        let age = self.clock.now() - entry.stored_at;
        if age > self.max_age {
            tracing::debug!("Cache entry for {} is stale ({}s old)", key, age.num_seconds());
            return Ok(None);
        }

        Ok(Some(entry))
    }

    /// Stores `body`, stamped with the current time.
    pub async fn store(&self, key: &str, status: u16, content_type: &str, body: Vec<u8>) -> Result<()> {
        let entry = CachedResponse {
            status,
            content_type: content_type.to_string(),
            body,
            stored_at: self.clock.now(),
        };
        self.store.put(key, entry).await
    }

    pub async fn invalidate(&self, key: &str) -> Result<bool> {
        self.store.delete(key).await
    }
}
