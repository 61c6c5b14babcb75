//! Traits for the remote synthesis provider and artifact download

use async_trait::async_trait;

use crate::domain::value_objects::JobHandle;

use super::types::{FetchedArtifact, ProviderReply, SynthesisRequest};

/// Remote asynchronous text-to-image capability
///
/// A non-200 reply is returned as `Ok` with its status code; `Err` is reserved
/// for transport failures and undecodable responses.
#[async_trait]
pub trait ImageSynthesisProvider: Send + Sync {
    /// Create a generation task
    async fn submit(&self, request: &SynthesisRequest) -> Result<ProviderReply, String>;
    /// Block until the task reaches a terminal state
    async fn wait(&self, handle: &JobHandle) -> Result<ProviderReply, String>;
    /// Read the current task state once
    async fn fetch_status(&self, handle: &JobHandle) -> Result<ProviderReply, String>;
}

/// Downloads a produced image by URL
#[async_trait]
pub trait ArtifactFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedArtifact, String>;
}
