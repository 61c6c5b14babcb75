//! DashScope asynchronous text-to-image client

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use std::time::Duration;
use tracing::{debug, warn};

use jf_core::domain::value_objects::JobHandle;
use jf_core::services::generation::{ImageSynthesisProvider, ProviderReply, SynthesisRequest};
use jf_shared::config::generation::mask_api_key;
use jf_shared::GenerationConfig;

use super::wire::{SynthesisBody, TaskResponse};
use crate::InfrastructureError;

/// Path of the task creation endpoint, relative to the API base
const SYNTHESIS_PATH: &str = "/services/aigc/text2image/image-synthesis";

/// HTTP client for DashScope image synthesis tasks
///
/// Every reply that carries an HTTP status is handed back as a
/// [`ProviderReply`]; only transport failures and undecodable 200 bodies are
/// reported as errors.
#[derive(Debug, Clone)]
pub struct DashScopeClient {
    client: reqwest::Client,
    base_url: String,
    poll_interval: Duration,
}

impl DashScopeClient {
    pub fn new(config: &GenerationConfig) -> Result<Self, InfrastructureError> {
        if !config.is_configured() {
            return Err(InfrastructureError::Config(
                "DASHSCOPE_API_KEY is not set".to_string(),
            ));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", config.api_key)).map_err(|e| {
                InfrastructureError::Config(format!("Invalid API key header value: {}", e))
            })?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        debug!(
            api_key = %mask_api_key(&config.api_key),
            base_url = %config.base_url,
            "DashScope client ready"
        );

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
        })
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    fn task_url(&self, handle: &JobHandle) -> String {
        format!("{}/tasks/{}", self.base_url, handle)
    }

    async fn read_reply(response: reqwest::Response) -> Result<ProviderReply, String> {
        let status_code = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| format!("Failed to read provider response: {}", e))?;

        match serde_json::from_str::<TaskResponse>(&body) {
            Ok(parsed) => Ok(parsed.into_reply(status_code)),
            Err(e) if status_code == 200 => Err(format!("Undecodable provider response: {}", e)),
            Err(_) => {
                warn!(status_code, "Provider error response was not JSON");
                let message = body.trim();
                Ok(ProviderReply {
                    status_code,
                    message: (!message.is_empty()).then(|| message.to_string()),
                    ..Default::default()
                })
            }
        }
    }
}

#[async_trait]
impl ImageSynthesisProvider for DashScopeClient {
    async fn submit(&self, request: &SynthesisRequest) -> Result<ProviderReply, String> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, SYNTHESIS_PATH))
            .header("X-DashScope-Async", "enable")
            .json(&SynthesisBody::from(request))
            .send()
            .await
            .map_err(|e| format!("HTTP request failed: {}", e))?;

        Self::read_reply(response).await
    }

    async fn wait(&self, handle: &JobHandle) -> Result<ProviderReply, String> {
        loop {
            let reply = self.fetch_status(handle).await?;
            if !reply.is_success() {
                return Ok(reply);
            }
            match reply.state() {
                Some(state) if !state.is_terminal() => {
                    debug!(job_id = %handle, state = %state, "Task still in progress");
                }
                _ => return Ok(reply),
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn fetch_status(&self, handle: &JobHandle) -> Result<ProviderReply, String> {
        let response = self
            .client
            .get(self.task_url(handle))
            .send()
            .await
            .map_err(|e| format!("HTTP request failed: {}", e))?;

        Self::read_reply(response).await
    }
}
