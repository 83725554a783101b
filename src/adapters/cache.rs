use crate::domain::model::CachedResponse;
use crate::domain::ports::CacheStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use moka::future::Cache;
use std::time::Duration;

/// In-process response store. moka's TTL is a best-effort eviction; callers
/// still check freshness themselves.
#[derive(Debug, Clone)]
pub struct MemoryCacheStore {
    inner: Cache<String, CachedResponse>,
}

impl MemoryCacheStore {
    pub fn new(max_entries: u64, time_to_live: Duration) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(time_to_live)
            .build();
        Self { inner }
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &str) -> Result<Option<CachedResponse>> {
        Ok(self.inner.get(key).await)
    }

    async fn put(&self, key: &str, entry: CachedResponse) -> Result<()> {
        self.inner.insert(key.to_string(), entry).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.inner.remove(key).await.is_some())
    }
}
