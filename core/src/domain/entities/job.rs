//! Generation job state and produced artifacts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a remote generation job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    /// Accepted by the provider, not started
    Submitted,
    /// Provider is working on it
    Running,
    /// Finished with results
    Succeeded,
    /// Failed or cancelled on the provider side
    Failed,
    /// Provider does not recognise the job, or reported something unexpected
    Unknown,
}

impl JobState {
    /// Maps a provider task status string onto a job state
    pub fn from_provider_status(status: &str) -> Self {
        match status.trim().to_ascii_uppercase().as_str() {
            "PENDING" => JobState::Submitted,
            "RUNNING" => JobState::Running,
            "SUCCEEDED" => JobState::Succeeded,
            "FAILED" | "CANCELED" | "CANCELLED" => JobState::Failed,
            _ => JobState::Unknown,
        }
    }

    /// Whether the provider will not change this state again
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Succeeded | JobState::Failed | JobState::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JobState::Submitted => "submitted",
            JobState::Running => "running",
            JobState::Succeeded => "succeeded",
            JobState::Failed => "failed",
            JobState::Unknown => "unknown",
        }
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A generated image materialized as an inline data URI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Position in the provider's result list
    pub index: usize,

    /// Provider URL the bytes were fetched from
    pub source_url: String,

    /// `data:<mime>;base64,<payload>`
    pub data_uri: String,

    /// Size of the decoded payload
    pub size_bytes: usize,
}

impl Artifact {
    /// MIME type embedded in the data URI
    pub fn mime_type(&self) -> Option<&str> {
        self.data_uri
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(';'))
            .map(|(mime, _)| mime)
    }
}
