//! Job orchestrator implementation

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::domain::entities::job::{Artifact, JobState};
use crate::domain::value_objects::{AspectRatio, GenerationRequest, JobHandle, RatioOption};
use crate::errors::JobError;

use super::config::JobOrchestratorConfig;
use super::traits::{ArtifactFetcher, ImageSynthesisProvider};
use super::types::{CompletedJob, JobStatus, ProviderReply, ProviderResult, SubmittedJob, SynthesisRequest};

/// Drives remote generation jobs and materializes their images
pub struct JobOrchestrator<P: ImageSynthesisProvider, F: ArtifactFetcher> {
    provider: Arc<P>,
    fetcher: Arc<F>,
    config: JobOrchestratorConfig,
}

impl<P: ImageSynthesisProvider, F: ArtifactFetcher> JobOrchestrator<P, F> {
    pub fn new(provider: Arc<P>, fetcher: Arc<F>, config: JobOrchestratorConfig) -> Self {
        Self {
            provider,
            fetcher,
            config,
        }
    }

    /// The static table of supported aspect ratios
    pub fn supported_ratios() -> Vec<RatioOption> {
        AspectRatio::options()
    }

    /// Submit a request to the provider exactly once
    ///
    /// # Returns
    ///
    /// * `Ok(SubmittedJob)` - The provider accepted the job
    /// * `Err(JobError::SubmissionFailed)` - Transport error, non-200 reply or no task id
    pub async fn submit(&self, request: &GenerationRequest) -> Result<SubmittedJob, JobError> {
        let synthesis = SynthesisRequest::new(&self.config.model, request);
        info!(
            model = %synthesis.model,
            size = %synthesis.size,
            count = synthesis.count,
            event = "job_submit",
            "Submitting generation job"
        );

        let reply = self.provider.submit(&synthesis).await.map_err(|e| {
            error!(error = %e, event = "job_submit_failed", "Generation submission transport error");
            JobError::SubmissionFailed {
                message: e,
                code: None,
                status_code: None,
            }
        })?;

        if !reply.is_success() {
            error!(
                status_code = reply.status_code,
                code = ?reply.code,
                event = "job_submit_failed",
                "Provider rejected generation job"
            );
            return Err(JobError::SubmissionFailed {
                message: reply.error_message(),
                code: reply.code,
                status_code: Some(reply.status_code),
            });
        }

        let Some(handle) = reply.task_id.as_deref().and_then(JobHandle::new) else {
            error!(event = "job_submit_failed", "Provider reply carried no task id");
            return Err(JobError::SubmissionFailed {
                message: "Provider response missing task id".to_string(),
                code: reply.code,
                status_code: Some(reply.status_code),
            });
        };

        let state = reply.state().unwrap_or(JobState::Submitted);
        info!(job_id = %handle, state = %state, event = "job_submitted", "Generation job accepted");

        Ok(SubmittedJob {
            handle,
            state,
            request: request.clone(),
            request_id: reply.request_id,
        })
    }

    /// Wait for the job to finish and download its images
    ///
    /// Individual download failures are logged and left out of the result;
    /// the job still succeeds with the remaining artifacts.
    pub async fn await_completion(&self, handle: &JobHandle) -> Result<CompletedJob, JobError> {
        let reply = self.provider.wait(handle).await.map_err(|e| {
            error!(job_id = %handle, error = %e, event = "job_wait_failed", "Waiting for job failed");
            JobError::CompletionFailed {
                job_id: handle.to_string(),
                message: e,
                code: None,
                status_code: None,
            }
        })?;

        if !reply.is_success() {
            error!(
                job_id = %handle,
                status_code = reply.status_code,
                event = "job_wait_failed",
                "Provider returned an error while waiting for job"
            );
            return Err(self.completion_failed(handle, reply));
        }

        match reply.state() {
            Some(JobState::Succeeded) => {
                let (artifacts, failed) = self.materialize_artifacts(handle, &reply.results).await;
                info!(
                    job_id = %handle,
                    artifacts = artifacts.len(),
                    failed = failed,
                    event = "job_completed",
                    "Generation job completed"
                );
                Ok(CompletedJob {
                    handle: handle.clone(),
                    state: JobState::Succeeded,
                    requested: reply.results.len(),
                    artifacts,
                    failed,
                })
            }
            Some(JobState::Unknown) => {
                warn!(job_id = %handle, event = "job_unknown", "Provider does not know this job");
                Err(JobError::UnknownJob {
                    job_id: handle.to_string(),
                })
            }
            Some(JobState::Failed) => {
                warn!(
                    job_id = %handle,
                    code = ?reply.code,
                    event = "job_failed",
                    "Generation job failed on the provider"
                );
                Err(self.completion_failed(handle, reply))
            }
            Some(state @ (JobState::Submitted | JobState::Running)) => Err(JobError::CompletionFailed {
                job_id: handle.to_string(),
                message: format!("Wait returned before completion, job is {}", state),
                code: reply.code,
                status_code: Some(reply.status_code),
            }),
            None => Err(JobError::CompletionFailed {
                job_id: handle.to_string(),
                message: "Provider response missing task status".to_string(),
                code: reply.code,
                status_code: Some(reply.status_code),
            }),
        }
    }

    /// Check the job state once without waiting
    pub async fn poll_status(&self, handle: &JobHandle) -> Result<JobStatus, JobError> {
        let reply = self.provider.fetch_status(handle).await.map_err(|e| {
            warn!(job_id = %handle, error = %e, event = "job_status_failed", "Status check failed");
            JobError::StatusUnavailable {
                job_id: handle.to_string(),
                message: e,
                status_code: None,
            }
        })?;

        if reply.status_code == 404 {
            return Err(JobError::UnknownJob {
                job_id: handle.to_string(),
            });
        }
        if !reply.is_success() {
            return Err(JobError::StatusUnavailable {
                job_id: handle.to_string(),
                message: reply.error_message(),
                status_code: Some(reply.status_code),
            });
        }

        match reply.state() {
            Some(JobState::Unknown) => Err(JobError::UnknownJob {
                job_id: handle.to_string(),
            }),
            Some(state) => Ok(JobStatus {
                handle: handle.clone(),
                state,
                message: reply.message,
            }),
            None => Err(JobError::StatusUnavailable {
                job_id: handle.to_string(),
                message: "Provider response missing task status".to_string(),
                status_code: Some(reply.status_code),
            }),
        }
    }

    /// Submit and wait in one call
    pub async fn generate(&self, request: &GenerationRequest) -> Result<CompletedJob, JobError> {
        let submitted = self.submit(request).await?;
        self.await_completion(&submitted.handle).await
    }

    fn completion_failed(&self, handle: &JobHandle, reply: ProviderReply) -> JobError {
        JobError::CompletionFailed {
            job_id: handle.to_string(),
            message: reply.error_message(),
            code: reply.code,
            status_code: Some(reply.status_code),
        }
    }

    async fn materialize_artifacts(
        &self,
        handle: &JobHandle,
        results: &[ProviderResult],
    ) -> (Vec<Artifact>, usize) {
        let downloads = results
            .iter()
            .enumerate()
            .map(|(index, result)| self.materialize_one(index, result));

        let mut artifacts = Vec::with_capacity(results.len());
        let mut failed = 0;
        for (index, outcome) in join_all(downloads).await.into_iter().enumerate() {
            match outcome {
                Ok(artifact) => artifacts.push(artifact),
                Err(reason) => {
                    failed += 1;
                    warn!(
                        job_id = %handle,
                        index = index,
                        reason = %reason,
                        event = "artifact_fetch_failed",
                        "Skipping artifact that could not be downloaded"
                    );
                }
            }
        }
        (artifacts, failed)
    }

    async fn materialize_one(&self, index: usize, result: &ProviderResult) -> Result<Artifact, String> {
        let url = result
            .url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                result
                    .message
                    .clone()
                    .unwrap_or_else(|| "Result has no url".to_string())
            })?;

        let fetched = tokio::time::timeout(self.config.artifact_timeout, self.fetcher.fetch(url))
            .await
            .map_err(|_| format!("Download timed out after {}s", self.config.artifact_timeout.as_secs()))??;

        if fetched.status_code != 200 {
            return Err(format!("Download returned HTTP {}", fetched.status_code));
        }

        Ok(Artifact {
            index,
            source_url: url.to_string(),
            data_uri: format!("data:image/png;base64,{}", STANDARD.encode(&fetched.bytes)),
            size_bytes: fetched.bytes.len(),
        })
    }
}
