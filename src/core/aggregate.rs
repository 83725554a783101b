use crate::config::identity::{MEDIUM_ID_VAR, ORCID_ID_VAR};
use crate::config::Settings;
use crate::core::{feed, orcid};
use crate::domain::model::{AggregateResult, EnvelopeResponse, MediumSection, RawResponse};
use crate::domain::ports::UpstreamClient;
use crate::utils::error::{ProfileError, Result};
use http::StatusCode;
use std::sync::Arc;
use std::time::Duration;

pub const SUCCESS_MESSAGE: &str = "Profile aggregated successfully";

const FEED_HEADERS: &[(&str, &str)] = &[(
    "Accept",
    "application/rss+xml, application/xml;q=0.9, */*;q=0.8",
)];

/// Fetches ORCID and Medium concurrently and merges them into one envelope.
pub struct AggregationPipeline {
    client: Arc<dyn UpstreamClient>,
    settings: Arc<Settings>,
}

impl AggregationPipeline {
    pub fn new(client: Arc<dyn UpstreamClient>, settings: Arc<Settings>) -> Self {
        Self { client, settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub async fn run(&self, orcid_id: Option<&str>, medium_id: Option<&str>) -> EnvelopeResponse {
        let application = self.settings.application.as_str();

        let (orcid_id, medium_id) = match (present(orcid_id), present(medium_id)) {
            (Some(orcid_id), Some(medium_id)) => (orcid_id, medium_id),
            (orcid_id, medium_id) => {
                let mut missing = Vec::new();
                if orcid_id.is_none() {
                    missing.push(ORCID_ID_VAR);
                }
                if medium_id.is_none() {
                    missing.push(MEDIUM_ID_VAR);
                }
                let message = format!("Missing environment variable(s): {}", missing.join(", "));
                tracing::error!("❌ {}", ProfileError::ConfigError { message: message.clone() });
                return EnvelopeResponse::failure(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    application,
                    message,
                );
            }
        };

        match self.aggregate(orcid_id, medium_id).await {
            Ok(result) => {
                tracing::info!(
                    "✅ Aggregated {} education, {} publication, {} post(s)",
                    result.education.len(),
                    result.publication.len(),
                    result.medium.posts.len()
                );
                EnvelopeResponse::ok(application, SUCCESS_MESSAGE, result)
            }
            Err(e) => {
                tracing::error!("❌ Aggregation failed: {}", e);
                EnvelopeResponse::failure(StatusCode::INTERNAL_SERVER_ERROR, application, e.to_string())
            }
        }
    }

    async fn aggregate(&self, orcid_id: &str, medium_id: &str) -> Result<AggregateResult> {
        let timeout = self.settings.upstream_timeout();

        // 兩個來源各自獨立執行，任一失敗不影響另一個
        let orcid_task = tokio::spawn(fetch_source(
            self.client.clone(),
            self.settings.orcid_activities_url(orcid_id),
            &[],
            timeout,
            orcid::SOURCE,
            orcid::from_response,
        ));
        let feed_task = tokio::spawn(fetch_source(
            self.client.clone(),
            self.settings.medium_feed_url(medium_id),
            FEED_HEADERS,
            timeout,
            feed::SOURCE,
            feed::from_response,
        ));

        let (orcid_joined, feed_joined) = tokio::join!(orcid_task, feed_task);
        let profile = degrade(
            orcid::SOURCE,
            orcid_joined.map_err(|e| ProfileError::internal(format!("ORCID task failed: {}", e)))?,
        )?;
        let posts = degrade(
            feed::SOURCE,
            feed_joined.map_err(|e| ProfileError::internal(format!("Medium task failed: {}", e)))?,
        )?;

        Ok(AggregateResult {
            education: profile.education,
            publication: profile.publication,
            platform: self.settings.platforms.clone(),
            medium: MediumSection {
                posts,
                url: self.settings.medium_profile_url(medium_id),
            },
        })
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

async fn fetch_source<T>(
    client: Arc<dyn UpstreamClient>,
    url: String,
    headers: &'static [(&'static str, &'static str)],
    timeout: Duration,
    source_name: &'static str,
    parse: fn(&RawResponse) -> Result<T>,
) -> Result<T> {
    tracing::debug!("Fetching {} from {}", source_name, url);

    let response = tokio::time::timeout(timeout, client.fetch(&url, headers))
        .await
        .map_err(|_| ProfileError::TimeoutError {
            source_name,
            seconds: timeout.as_secs(),
        })??;

    tracing::debug!("{} responded with {}", source_name, response.status);
    parse(&response)
}

/// Source failures become an empty contribution; anything else propagates.
fn degrade<T: Default>(source_name: &'static str, result: Result<T>) -> Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(e) if e.is_source_failure() => {
            match e.upstream_status() {
                Some(status) => tracing::warn!(
                    "⚠️ {} unavailable (status {}), continuing without it: {}",
                    source_name,
                    status,
                    e
                ),
                None => tracing::warn!(
                    "⚠️ {} unavailable ({}), continuing without it: {}",
                    source_name,
                    e.kind(),
                    e
                ),
            }
            Ok(T::default())
        }
        Err(e) => Err(e),
    }
}
