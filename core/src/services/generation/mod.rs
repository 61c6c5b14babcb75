//! Remote image synthesis job orchestration
//!
//! This module drives a text-to-image job through its remote lifecycle:
//! - Submission to an [`ImageSynthesisProvider`]
//! - Waiting for a terminal state and single status checks
//! - Concurrent, time-bounded download of the produced images
//! - Credit-gated generation through the [`GenerationGateway`]

mod config;
mod gateway;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::JobOrchestratorConfig;
pub use gateway::{GatewayOutcome, GatewaySubmission, GenerationGateway};
pub use service::JobOrchestrator;
pub use traits::{ArtifactFetcher, ImageSynthesisProvider};
pub use types::{
    CompletedJob, FetchedArtifact, JobStatus, ProviderReply, ProviderResult, SubmittedJob,
    SynthesisRequest,
};
