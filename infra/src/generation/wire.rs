//! DashScope request and response bodies

use serde::{Deserialize, Serialize};

use jf_core::services::generation::{ProviderReply, ProviderResult, SynthesisRequest};

/// Body of `POST /services/aigc/text2image/image-synthesis`
#[derive(Debug, Serialize)]
pub struct SynthesisBody<'a> {
    pub model: &'a str,
    pub input: SynthesisInput<'a>,
    pub parameters: SynthesisParameters<'a>,
}

#[derive(Debug, Serialize)]
pub struct SynthesisInput<'a> {
    pub prompt: &'a str,
}

#[derive(Debug, Serialize)]
pub struct SynthesisParameters<'a> {
    pub size: &'a str,
    pub n: u8,
}

impl<'a> From<&'a SynthesisRequest> for SynthesisBody<'a> {
    fn from(request: &'a SynthesisRequest) -> Self {
        Self {
            model: &request.model,
            input: SynthesisInput {
                prompt: &request.prompt,
            },
            parameters: SynthesisParameters {
                size: &request.size,
                n: request.count,
            },
        }
    }
}

/// Envelope shared by task creation, task status and error responses
#[derive(Debug, Default, Deserialize)]
pub struct TaskResponse {
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub output: Option<TaskOutput>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TaskOutput {
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub task_status: Option<String>,
    #[serde(default)]
    pub results: Vec<TaskResult>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TaskResult {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl TaskResponse {
    /// Flatten into the provider-neutral reply
    ///
    /// Task-level `code`/`message` win over envelope-level ones.
    pub fn into_reply(self, status_code: u16) -> ProviderReply {
        let output = self.output.unwrap_or_default();
        ProviderReply {
            status_code,
            request_id: self.request_id,
            task_id: output.task_id,
            task_status: output.task_status,
            results: output
                .results
                .into_iter()
                .map(|result| ProviderResult {
                    url: result.url,
                    code: result.code,
                    message: result.message,
                })
                .collect(),
            code: output.code.or(self.code),
            message: output.message.or(self.message),
        }
    }
}
