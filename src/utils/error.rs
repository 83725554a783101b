use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{source_name} returned {status}: {body}")]
    UpstreamUnavailable {
        source_name: &'static str,
        status: u16,
        body: String,
    },

    #[error("Upstream request failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("{source_name} did not respond within {seconds}s")]
    TimeoutError {
        source_name: &'static str,
        seconds: u64,
    },

    #[error("{source_name} response has an unexpected shape: {message}")]
    StructuralMismatch {
        source_name: &'static str,
        message: String,
    },

    #[error("{message}")]
    InternalError { message: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ProfileError {
    /// 單一來源失敗：降級為空資料，不讓整個請求失敗
    pub fn is_source_failure(&self) -> bool {
        matches!(
            self,
            ProfileError::UpstreamUnavailable { .. }
                | ProfileError::TransportError(_)
                | ProfileError::TimeoutError { .. }
                | ProfileError::StructuralMismatch { .. }
        )
    }

    pub fn status_code(&self) -> http::StatusCode {
        match self {
            ProfileError::UpstreamUnavailable { status, .. } => {
                http::StatusCode::from_u16(*status).unwrap_or(http::StatusCode::BAD_GATEWAY)
            }
            ProfileError::TransportError(_) | ProfileError::StructuralMismatch { .. } => {
                http::StatusCode::BAD_GATEWAY
            }
            ProfileError::TimeoutError { .. } => http::StatusCode::GATEWAY_TIMEOUT,
            _ => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP status actually sent by the upstream, if it answered at all.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            ProfileError::UpstreamUnavailable { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ProfileError::ConfigError { .. } => "config",
            ProfileError::InvalidConfigValueError { .. } => "invalid config value",
            ProfileError::UpstreamUnavailable { .. } => "upstream status",
            ProfileError::TransportError(_) => "transport",
            ProfileError::TimeoutError { .. } => "timeout",
            ProfileError::StructuralMismatch { .. } => "unexpected shape",
            ProfileError::InternalError { .. } => "internal",
            ProfileError::SerializationError(_) => "serialization",
            ProfileError::TomlError(_) => "toml",
            ProfileError::IoError(_) => "io",
        }
    }

    pub fn structural(source_name: &'static str, message: impl Into<String>) -> Self {
        ProfileError::StructuralMismatch {
            source_name,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ProfileError::InternalError {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProfileError>;
