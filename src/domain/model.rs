use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationRecord {
    pub start_year: String,
    pub end_year: String,
    pub title: String,
    pub department: String,
    pub university: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationRecord {
    pub title: String,
    pub journal: Option<String>,
    pub year: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformEntry {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediumPost {
    pub title: String,
    pub date: String,
    pub url: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediumSection {
    pub posts: Vec<MediumPost>,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub education: Vec<EducationRecord>,
    pub publication: Vec<PublicationRecord>,
    pub platform: Vec<PlatformEntry>,
    pub medium: MediumSection,
}

/// Body shared by every JSON response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub application: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<AggregateResult>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvelopeResponse {
    pub status: http::StatusCode,
    pub envelope: Envelope,
}

impl EnvelopeResponse {
    pub fn ok(application: &str, message: &str, data: AggregateResult) -> Self {
        Self {
            status: http::StatusCode::OK,
            envelope: Envelope {
                application: application.to_string(),
                message: message.to_string(),
                data: Some(data),
            },
        }
    }

    pub fn failure(status: http::StatusCode, application: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            envelope: Envelope {
                application: application.to_string(),
                message: message.into(),
                data: None,
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// What the upstream client hands back; non-2xx statuses are still `Ok`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: http::StatusCode,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: http::StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedResponse {
    pub status: u16,
    pub content_type: String,
    pub body: Vec<u8>,
    pub stored_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundRequest {
    pub method: http::Method,
    pub url: String,
}

impl InboundRequest {
    pub fn new(method: http::Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundResponse {
    pub status: http::StatusCode,
    pub headers: http::HeaderMap,
    pub body: Vec<u8>,
}

impl OutboundResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
