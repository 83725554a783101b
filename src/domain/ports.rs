use crate::domain::model::{CachedResponse, RawResponse};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// Issues a GET. Caller headers override the client's defaults.
    async fn fetch(&self, url: &str, headers: &[(&str, &str)]) -> Result<RawResponse>;
}

#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<CachedResponse>>;
    async fn put(&self, key: &str, entry: CachedResponse) -> Result<()>;
    /// Returns whether an entry was present.
    async fn delete(&self, key: &str) -> Result<bool>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identifiers {
    pub orcid_id: Option<String>,
    pub medium_id: Option<String>,
}

pub trait IdentityProvider: Send + Sync {
    fn identifiers(&self) -> Identifiers;
}
