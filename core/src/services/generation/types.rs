//! Types exchanged with the synthesis provider and returned to callers

use serde::{Deserialize, Serialize};

use crate::domain::entities::job::{Artifact, JobState};
use crate::domain::value_objects::{GenerationRequest, JobHandle};

/// Parameters of one provider submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    pub model: String,
    pub prompt: String,
    /// Provider size string, `width*height`
    pub size: String,
    pub count: u8,
}

impl SynthesisRequest {
    pub fn new(model: &str, request: &GenerationRequest) -> Self {
        Self {
            model: model.to_string(),
            prompt: request.prompt().to_string(),
            size: request.size().to_string(),
            count: request.count(),
        }
    }
}

/// Provider response reduced to the fields the orchestrator inspects
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderReply {
    pub status_code: u16,
    pub request_id: Option<String>,
    pub task_id: Option<String>,
    pub task_status: Option<String>,
    pub results: Vec<ProviderResult>,
    pub code: Option<String>,
    pub message: Option<String>,
}

impl ProviderReply {
    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }

    /// Local state for the reported task status, if one was reported
    pub fn state(&self) -> Option<JobState> {
        self.task_status.as_deref().map(JobState::from_provider_status)
    }

    /// Best available description of a failure
    pub fn error_message(&self) -> String {
        self.message
            .clone()
            .or_else(|| self.code.clone())
            .unwrap_or_else(|| format!("Provider returned HTTP {}", self.status_code))
    }
}

/// One entry of a finished task's result list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderResult {
    pub url: Option<String>,
    pub code: Option<String>,
    pub message: Option<String>,
}

/// Raw download of one artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedArtifact {
    pub status_code: u16,
    pub bytes: Vec<u8>,
}

/// A job accepted by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedJob {
    pub handle: JobHandle,
    pub state: JobState,
    pub request: GenerationRequest,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// A job that finished successfully, with whatever artifacts could be fetched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedJob {
    pub handle: JobHandle,
    pub state: JobState,
    /// Materialized artifacts in provider order
    pub artifacts: Vec<Artifact>,
    /// Number of results the provider reported
    pub requested: usize,
    /// Number of results that could not be materialized
    pub failed: usize,
}

impl CompletedJob {
    pub fn is_partial(&self) -> bool {
        self.failed > 0
    }
}

/// Result of a single status check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStatus {
    pub handle: JobHandle,
    pub state: JobState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
