//! Configuration for the job orchestrator

use std::time::Duration;

use jf_shared::GenerationConfig;

/// Default text-to-image model
pub const DEFAULT_MODEL: &str = "wanx2.1-t2i-turbo";

/// Configuration for the job orchestrator
#[derive(Debug, Clone)]
pub struct JobOrchestratorConfig {
    /// Model identifier sent with every submission
    pub model: String,
    /// Upper bound for downloading one artifact
    pub artifact_timeout: Duration,
}

impl Default for JobOrchestratorConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            artifact_timeout: Duration::from_secs(30),
        }
    }
}

impl From<&GenerationConfig> for JobOrchestratorConfig {
    fn from(config: &GenerationConfig) -> Self {
        Self {
            model: config.model.clone(),
            artifact_timeout: Duration::from_secs(config.artifact_timeout_secs),
        }
    }
}
