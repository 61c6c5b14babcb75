//! Plain HTTP download of generated images

use async_trait::async_trait;
use std::time::Duration;

use jf_core::services::generation::{ArtifactFetcher, FetchedArtifact};
use jf_shared::GenerationConfig;

use crate::InfrastructureError;

/// Downloads artifacts with a single GET per URL
#[derive(Debug, Clone)]
pub struct HttpArtifactFetcher {
    client: reqwest::Client,
}

impl HttpArtifactFetcher {
    pub fn new(timeout: Duration) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub fn from_config(config: &GenerationConfig) -> Result<Self, InfrastructureError> {
        Self::new(Duration::from_secs(config.artifact_timeout_secs))
    }
}

#[async_trait]
impl ArtifactFetcher for HttpArtifactFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedArtifact, String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| format!("Download failed: {}", e))?;

        let status_code = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| format!("Failed to read download body: {}", e))?;

        Ok(FetchedArtifact {
            status_code,
            bytes: bytes.to_vec(),
        })
    }
}
