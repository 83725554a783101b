use crate::domain::model::RawResponse;
use crate::domain::ports::UpstreamClient;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::Client;
use std::time::Duration;

pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64; Win11) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/118.0.5993.90 Safari/537.36";

/// reqwest-backed upstream client with a fixed browser-like identity.
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    client: Client,
}

impl HttpUpstream {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

/// Default identity headers with `overrides` applied on top.
pub fn merged_headers(overrides: &[(&str, &str)]) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    for (key, value) in overrides {
        match (
            HeaderName::from_bytes(key.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => tracing::warn!("Skipping invalid header: {}", key),
        }
    }

    headers
}

#[async_trait]
impl UpstreamClient for HttpUpstream {
    async fn fetch(&self, url: &str, headers: &[(&str, &str)]) -> Result<RawResponse> {
        tracing::debug!("Making upstream request to: {}", url);

        let response = self
            .client
            .get(url)
            .headers(merged_headers(headers))
            .send()
            .await?;
        let status = response.status();
        tracing::debug!("Upstream response status: {}", status);

        let body = response.text().await?;
        Ok(RawResponse::new(status, body))
    }
}
