//! Image synthesis provider configuration module

use serde::{Deserialize, Serialize};

use super::env_or;

/// Remote text-to-image provider configuration
#[derive(Clone, Deserialize, Serialize)]
pub struct GenerationConfig {
    /// Provider API key
    #[serde(skip_serializing)]
    pub api_key: String,

    /// Provider API base URL (no trailing slash)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifier sent with every submission
    #[serde(default = "default_model")]
    pub model: String,

    /// Interval between status checks while waiting for a task, in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Timeout for a single provider API request, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Upper bound for downloading one generated artifact, in seconds
    #[serde(default = "default_artifact_timeout_secs")]
    pub artifact_timeout_secs: u64,
}

impl std::fmt::Debug for GenerationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationConfig")
            .field("api_key", &mask_api_key(&self.api_key))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("poll_interval_ms", &self.poll_interval_ms)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("artifact_timeout_secs", &self.artifact_timeout_secs)
            .finish()
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            model: default_model(),
            poll_interval_ms: default_poll_interval_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            artifact_timeout_secs: default_artifact_timeout_secs(),
        }
    }
}

impl GenerationConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: std::env::var("DASHSCOPE_API_KEY").unwrap_or_default(),
            base_url: std::env::var("DASHSCOPE_BASE_URL").unwrap_or(defaults.base_url),
            model: std::env::var("DASHSCOPE_MODEL").unwrap_or(defaults.model),
            poll_interval_ms: env_or("DASHSCOPE_POLL_INTERVAL_MS", defaults.poll_interval_ms),
            request_timeout_secs: env_or(
                "DASHSCOPE_REQUEST_TIMEOUT_SECS",
                defaults.request_timeout_secs,
            ),
            artifact_timeout_secs: env_or(
                "ARTIFACT_DOWNLOAD_TIMEOUT_SECS",
                defaults.artifact_timeout_secs,
            ),
        }
    }

    /// Whether an API key is present
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

/// Keep only a short prefix of an API key for diagnostics
pub fn mask_api_key(key: &str) -> String {
    if key.is_empty() {
        return String::from("<unset>");
    }
    let prefix: String = key.chars().take(6).collect();
    format!("{}...", prefix)
}

fn default_base_url() -> String {
    String::from("https://dashscope.aliyuncs.com/api/v1")
}

fn default_model() -> String {
    String::from("wanx2.1-t2i-turbo")
}

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_artifact_timeout_secs() -> u64 {
    30
}
