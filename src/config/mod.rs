#[cfg(feature = "cli")]
pub mod cli;
pub mod identity;
pub mod lambda;

use crate::domain::model::PlatformEntry;
use crate::utils::error::{ProfileError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub use identity::{EnvIdentity, StaticIdentity};

pub const DEFAULT_APPLICATION: &str = "profile-feed";
pub const DEFAULT_ORCID_BASE_URL: &str = "https://pub.orcid.org";
pub const DEFAULT_MEDIUM_BASE_URL: &str = "https://medium.com";

/// Deployment settings. Upstream identifiers are not part of this file;
/// they come from the environment on every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_application")]
    pub application: String,
    #[serde(default)]
    pub upstream: UpstreamSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub platforms: Vec<PlatformEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamSettings {
    #[serde(default = "default_orcid_base_url")]
    pub orcid_base_url: String,
    #[serde(default = "default_medium_base_url")]
    pub medium_base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_max_age_seconds")]
    pub max_age_seconds: u64,
    #[serde(default = "default_max_entries")]
    pub max_entries: u64,
}

fn default_application() -> String {
    DEFAULT_APPLICATION.to_string()
}

fn default_orcid_base_url() -> String {
    DEFAULT_ORCID_BASE_URL.to_string()
}

fn default_medium_base_url() -> String {
    DEFAULT_MEDIUM_BASE_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_max_age_seconds() -> u64 {
    86_400
}

fn default_max_entries() -> u64 {
    64
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        Self {
            orcid_base_url: default_orcid_base_url(),
            medium_base_url: default_medium_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            max_age_seconds: default_max_age_seconds(),
            max_entries: default_max_entries(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            application: default_application(),
            upstream: UpstreamSettings::default(),
            cache: CacheSettings::default(),
            platforms: Vec::new(),
        }
    }
}

impl Settings {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${GITHUB_URL})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ProfileError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream.timeout_seconds)
    }

    pub fn cache_max_age(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.cache.max_age_seconds as i64)
    }

    pub fn orcid_activities_url(&self, orcid_id: &str) -> String {
        format!(
            "{}/v3.0/{}/activities",
            self.upstream.orcid_base_url.trim_end_matches('/'),
            orcid_id
        )
    }

    pub fn medium_feed_url(&self, medium_id: &str) -> String {
        format!(
            "{}/feed/@{}",
            self.upstream.medium_base_url.trim_end_matches('/'),
            medium_id
        )
    }

    /// Public profile link; always the real Medium host, even when the feed
    /// base URL points elsewhere.
    pub fn medium_profile_url(&self, medium_id: &str) -> String {
        format!("{}/@{}", DEFAULT_MEDIUM_BASE_URL, medium_id)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("application", &self.application)?;
        validate_url("upstream.orcid_base_url", &self.upstream.orcid_base_url)?;
        validate_url("upstream.medium_base_url", &self.upstream.medium_base_url)?;
        validate_range("upstream.timeout_seconds", self.upstream.timeout_seconds, 1, 300)?;
        validate_range(
            "cache.max_age_seconds",
            self.cache.max_age_seconds,
            1,
            365 * 86_400,
        )?;
        validate_range("cache.max_entries", self.cache.max_entries, 1, 100_000)?;

        for (index, platform) in self.platforms.iter().enumerate() {
            validate_non_empty_string(&format!("platforms[{}].name", index), &platform.name)?;
            validate_url(&format!("platforms[{}].url", index), &platform.url)?;
        }

        tracing::debug!("✅ Settings validation passed");
        Ok(())
    }
}
