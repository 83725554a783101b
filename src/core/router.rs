use crate::adapters::{HttpUpstream, MemoryCacheStore};
use crate::config::Settings;
use crate::core::aggregate::AggregationPipeline;
use crate::core::background::BackgroundTasks;
use crate::core::cache::{cache_key, ResponseCache};
use crate::core::cors::CorsPolicy;
use crate::domain::model::{CachedResponse, Envelope, InboundRequest, OutboundResponse};
use crate::domain::ports::IdentityProvider;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use http::header::{HeaderMap, HeaderName, HeaderValue, ALLOW, CACHE_CONTROL, CONTENT_TYPE};
use http::{Method, StatusCode};
use std::sync::Arc;
use std::time::Duration;

pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed!";
const JSON: &str = "application/json";
const X_CACHE: HeaderName = HeaderName::from_static("x-cache");

/// Method dispatch for the single `/` resource.
pub struct RequestRouter {
    pipeline: AggregationPipeline,
    cache: ResponseCache,
    identity: Arc<dyn IdentityProvider>,
    background: BackgroundTasks,
    cors: CorsPolicy,
    cache_control: HeaderValue,
}

impl RequestRouter {
    pub fn new(
        pipeline: AggregationPipeline,
        cache: ResponseCache,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        let cache_control =
            HeaderValue::from_str(&format!("public, max-age={}", cache.max_age().num_seconds()))
                .unwrap_or_else(|_| HeaderValue::from_static("public, max-age=86400"));

        Self {
            pipeline,
            cache,
            identity,
            background: BackgroundTasks::new(),
            cors: CorsPolicy::default(),
            cache_control,
        }
    }

    /// Wires the production adapters: reqwest upstream and moka store.
    pub fn from_settings(settings: Settings, identity: Arc<dyn IdentityProvider>) -> Result<Self> {
        settings.validate()?;

        let upstream = Arc::new(HttpUpstream::new(settings.upstream_timeout())?);
        let store = Arc::new(MemoryCacheStore::new(
            settings.cache.max_entries,
            Duration::from_secs(settings.cache.max_age_seconds),
        ));
        let cache = ResponseCache::new(store, settings.cache_max_age());
        let pipeline = AggregationPipeline::new(upstream, Arc::new(settings));

        Ok(Self::new(pipeline, cache, identity))
    }

    pub fn background(&self) -> &BackgroundTasks {
        &self.background
    }

    pub async fn handle(&self, request: &InboundRequest) -> OutboundResponse {
        tracing::info!("{} {}", request.method, request.url);

        match request.method {
            Method::GET => self.get(request).await,
            Method::DELETE => self.delete(request).await,
            Method::OPTIONS => self.empty(StatusCode::NO_CONTENT),
            _ => self.method_not_allowed(),
        }
    }

    async fn get(&self, request: &InboundRequest) -> OutboundResponse {
        let key = cache_key(&Method::GET, &request.url);

        match self.cache.lookup(&key).await {
            Ok(Some(entry)) => {
                tracing::debug!("Cache hit for {}", key);
                return self.cached(entry);
            }
            Ok(None) => tracing::debug!("Cache miss for {}", key),
            Err(e) => tracing::warn!("⚠️ Cache lookup failed, fetching instead: {}", e),
        }

        let ids = self.identity.identifiers();
        let result = self
            .pipeline
            .run(ids.orcid_id.as_deref(), ids.medium_id.as_deref())
            .await;

        let body = self.encode(&result.envelope);
        if !result.is_success() {
            let mut response = self.json(result.status, body);
            response
                .headers
                .insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
            return response;
        }

        // 回應先送出，快取寫入在背景執行
        let cache = self.cache.clone();
        let cached_body = body.clone();
        let status = result.status.as_u16();
        self.background.spawn(async move {
            if let Err(e) = cache.store(&key, status, JSON, cached_body).await {
                tracing::warn!("⚠️ Cache store failed for {}: {}", key, e);
            }
        });

        let mut response = self.json(result.status, body);
        response
            .headers
            .insert(CACHE_CONTROL, self.cache_control.clone());
        response
            .headers
            .insert(X_CACHE, HeaderValue::from_static("MISS"));
        response
    }

    async fn delete(&self, request: &InboundRequest) -> OutboundResponse {
        let key = cache_key(&Method::GET, &request.url);

        // 等待尚未完成的背景寫入，避免刪除後又被寫回
        let pending = self.background.drain().await;
        if pending > 0 {
            tracing::debug!("Awaited {} pending cache write(s) before invalidating", pending);
        }

        match self.cache.invalidate(&key).await {
            Ok(true) => tracing::info!("🗑️ Invalidated cache entry {}", key),
            Ok(false) => tracing::debug!("No cache entry to invalidate for {}", key),
            Err(e) => tracing::warn!("⚠️ Cache invalidation failed for {}: {}", key, e),
        }

        self.empty(StatusCode::NO_CONTENT)
    }

    fn method_not_allowed(&self) -> OutboundResponse {
        let envelope = Envelope {
            application: self.pipeline.settings().application.clone(),
            message: METHOD_NOT_ALLOWED_MESSAGE.to_string(),
            data: None,
        };
        let body = self.encode(&envelope);
        let mut response = self.json(StatusCode::METHOD_NOT_ALLOWED, body);
        response
            .headers
            .insert(ALLOW, HeaderValue::from_static("GET, DELETE, OPTIONS"));
        response
    }

    fn cached(&self, entry: CachedResponse) -> OutboundResponse {
        let status = StatusCode::from_u16(entry.status).unwrap_or(StatusCode::OK);
        let mut headers = self.base_headers();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_str(&entry.content_type)
                .unwrap_or_else(|_| HeaderValue::from_static(JSON)),
        );
        headers.insert(CACHE_CONTROL, self.cache_control.clone());
        headers.insert(X_CACHE, HeaderValue::from_static("HIT"));

        OutboundResponse {
            status,
            headers,
            body: entry.body,
        }
    }

    fn encode(&self, envelope: &Envelope) -> Vec<u8> {
        serde_json::to_vec(envelope).unwrap_or_else(|e| {
            tracing::error!("❌ Failed to encode envelope: {}", e);
            serde_json::json!({
                "application": envelope.application,
                "message": e.to_string(),
            })
            .to_string()
            .into_bytes()
        })
    }

    fn json(&self, status: StatusCode, body: Vec<u8>) -> OutboundResponse {
        let mut headers = self.base_headers();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON));
        OutboundResponse {
            status,
            headers,
            body,
        }
    }

    fn empty(&self, status: StatusCode) -> OutboundResponse {
        OutboundResponse {
            status,
            headers: self.base_headers(),
            body: Vec::new(),
        }
    }

    fn base_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        self.cors.apply(&mut headers);
        headers
    }
}
