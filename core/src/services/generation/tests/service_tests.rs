//! Unit tests for the job orchestrator

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use crate::domain::entities::job::JobState;
use crate::domain::value_objects::{AspectRatio, GenerationRequest, JobHandle};
use crate::errors::JobError;
use crate::services::generation::{JobOrchestrator, JobOrchestratorConfig, ProviderReply, ProviderResult};

use super::mocks::{error_reply, succeeded_reply, task_reply, FetchBehavior, MockFetcher, MockProvider};

fn build_orchestrator(provider: MockProvider, fetcher: MockFetcher) -> (Arc<MockProvider>, JobOrchestrator<MockProvider, MockFetcher>) {
    let provider = Arc::new(provider);
    let orchestrator = JobOrchestrator::new(
        provider.clone(),
        Arc::new(fetcher),
        JobOrchestratorConfig::default(),
    );
    (provider, orchestrator)
}

fn fox_request() -> GenerationRequest {
    GenerationRequest::new("a red fox", AspectRatio::Landscape, 2).unwrap()
}

fn handle(id: &str) -> JobHandle {
    JobHandle::new(id).unwrap()
}

#[tokio::test]
async fn test_submit_success() {
    let (provider, orchestrator) = build_orchestrator(MockProvider::new(), MockFetcher::empty());

    let submitted = orchestrator.submit(&fox_request()).await.unwrap();

    assert_eq!(submitted.handle.as_str(), "task-1");
    assert_eq!(submitted.state, JobState::Submitted);
    assert_eq!(submitted.request_id.as_deref(), Some("req-1"));

    let sent = provider.submitted.lock().unwrap().clone();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].model, "wanx2.1-t2i-turbo");
    assert_eq!(sent[0].prompt, "a red fox");
    assert_eq!(sent[0].size, "1344*768");
    assert_eq!(sent[0].count, 2);
}

#[tokio::test]
async fn test_submit_rejected_by_provider() {
    let provider = MockProvider::new().with_submit(Ok(error_reply(401, "InvalidApiKey", "Invalid API-key provided.")));
    let (provider, orchestrator) = build_orchestrator(provider, MockFetcher::empty());

    let error = orchestrator.submit(&fox_request()).await.unwrap_err();

    assert_eq!(
        error,
        JobError::SubmissionFailed {
            message: "Invalid API-key provided.".to_string(),
            code: Some("InvalidApiKey".to_string()),
            status_code: Some(401),
        }
    );
    // No retry
    assert_eq!(provider.submit_count(), 1);
}

#[tokio::test]
async fn test_submit_transport_error() {
    let provider = MockProvider::new().with_submit(Err("connection reset".to_string()));
    let (_, orchestrator) = build_orchestrator(provider, MockFetcher::empty());

    match orchestrator.submit(&fox_request()).await {
        Err(JobError::SubmissionFailed { message, status_code, .. }) => {
            assert_eq!(message, "connection reset");
            assert!(status_code.is_none());
        }
        other => panic!("Expected submission failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_submit_missing_task_id() {
    let reply = ProviderReply {
        status_code: 200,
        task_status: Some("PENDING".to_string()),
        ..Default::default()
    };
    let (_, orchestrator) = build_orchestrator(MockProvider::new().with_submit(Ok(reply)), MockFetcher::empty());

    let result = orchestrator.submit(&fox_request()).await;
    assert!(matches!(result, Err(JobError::SubmissionFailed { .. })));
}

#[tokio::test(start_paused = true)]
async fn test_fox_partial_success_when_one_download_hangs() {
    let provider = MockProvider::new().with_wait(Ok(succeeded_reply(
        "task-1",
        &["https://cdn.example.com/fox-0.png", "https://cdn.example.com/fox-1.png"],
    )));
    let fetcher = MockFetcher::new([
        ("https://cdn.example.com/fox-0.png", FetchBehavior::Bytes(b"fox-image".to_vec())),
        ("https://cdn.example.com/fox-1.png", FetchBehavior::Hang),
    ]);
    let (_, orchestrator) = build_orchestrator(provider, fetcher);

    let started = Instant::now();
    let submitted = orchestrator.submit(&fox_request()).await.unwrap();
    let completed = orchestrator.await_completion(&submitted.handle).await.unwrap();

    assert_eq!(completed.state, JobState::Succeeded);
    assert_eq!(completed.artifacts.len(), 1);
    assert_eq!(completed.requested, 2);
    assert_eq!(completed.failed, 1);
    assert!(completed.is_partial());
    assert!(started.elapsed() >= Duration::from_secs(30));

    let artifact = &completed.artifacts[0];
    assert_eq!(artifact.index, 0);
    assert_eq!(artifact.source_url, "https://cdn.example.com/fox-0.png");
    assert_eq!(artifact.size_bytes, 9);
    let payload = artifact.data_uri.strip_prefix("data:image/png;base64,").unwrap();
    assert_eq!(STANDARD.decode(payload).unwrap(), b"fox-image");
}

#[tokio::test(start_paused = true)]
async fn test_downloads_run_concurrently() {
    let urls = ["https://cdn.example.com/0.png", "https://cdn.example.com/1.png", "https://cdn.example.com/2.png"];
    let provider = MockProvider::new().with_wait(Ok(succeeded_reply("task-1", &urls)));
    let fetcher = MockFetcher::new(urls.iter().map(|url| (*url, FetchBehavior::Hang)));
    let (_, orchestrator) = build_orchestrator(provider, fetcher);

    let started = Instant::now();
    let completed = orchestrator.await_completion(&handle("task-1")).await.unwrap();

    assert!(completed.artifacts.is_empty());
    assert_eq!(completed.failed, 3);
    // Three hung downloads share one timeout window
    assert!(started.elapsed() < Duration::from_secs(60));
}

#[tokio::test]
async fn test_artifacts_keep_provider_order() {
    let urls = ["https://cdn.example.com/a.png", "https://cdn.example.com/b.png", "https://cdn.example.com/c.png"];
    let provider = MockProvider::new().with_wait(Ok(succeeded_reply("task-1", &urls)));
    let fetcher = MockFetcher::new([
        (urls[0], FetchBehavior::Bytes(b"a".to_vec())),
        (urls[1], FetchBehavior::Status(403)),
        (urls[2], FetchBehavior::Bytes(b"c".to_vec())),
    ]);
    let (_, orchestrator) = build_orchestrator(provider, fetcher);

    let completed = orchestrator.await_completion(&handle("task-1")).await.unwrap();

    let indexes: Vec<usize> = completed.artifacts.iter().map(|a| a.index).collect();
    assert_eq!(indexes, vec![0, 2]);
    assert_eq!(completed.failed, 1);
}

#[tokio::test]
async fn test_missing_url_and_transport_errors_are_skipped() {
    let mut reply = succeeded_reply("task-1", &["https://cdn.example.com/ok.png", "https://cdn.example.com/err.png"]);
    reply.results.push(ProviderResult {
        url: None,
        code: Some("DataInspectionFailed".to_string()),
        message: Some("Output data may contain inappropriate content.".to_string()),
    });
    let fetcher = MockFetcher::new([
        ("https://cdn.example.com/ok.png", FetchBehavior::Bytes(vec![1, 2, 3])),
        ("https://cdn.example.com/err.png", FetchBehavior::Fail("dns error".to_string())),
    ]);
    let (_, orchestrator) = build_orchestrator(MockProvider::new().with_wait(Ok(reply)), fetcher);

    let completed = orchestrator.await_completion(&handle("task-1")).await.unwrap();

    assert_eq!(completed.artifacts.len(), 1);
    assert_eq!(completed.requested, 3);
    assert_eq!(completed.failed, 2);
}

#[tokio::test]
async fn test_await_failed_job() {
    let reply = ProviderReply {
        code: Some("InternalError".to_string()),
        message: Some("Generation timed out on the provider".to_string()),
        ..task_reply("task-1", "FAILED")
    };
    let (_, orchestrator) = build_orchestrator(MockProvider::new().with_wait(Ok(reply)), MockFetcher::empty());

    match orchestrator.await_completion(&handle("task-1")).await {
        Err(JobError::CompletionFailed { job_id, message, code, status_code }) => {
            assert_eq!(job_id, "task-1");
            assert_eq!(message, "Generation timed out on the provider");
            assert_eq!(code.as_deref(), Some("InternalError"));
            assert_eq!(status_code, Some(200));
        }
        other => panic!("Expected completion failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_await_canceled_job_fails() {
    let provider = MockProvider::new().with_wait(Ok(task_reply("task-1", "CANCELED")));
    let (_, orchestrator) = build_orchestrator(provider, MockFetcher::empty());

    let result = orchestrator.await_completion(&handle("task-1")).await;
    assert!(matches!(result, Err(JobError::CompletionFailed { .. })));
}

#[tokio::test]
async fn test_await_unknown_job() {
    let provider = MockProvider::new().with_wait(Ok(task_reply("task-9", "UNKNOWN")));
    let (_, orchestrator) = build_orchestrator(provider, MockFetcher::empty());

    assert_eq!(
        orchestrator.await_completion(&handle("task-9")).await,
        Err(JobError::UnknownJob {
            job_id: "task-9".to_string()
        })
    );
}

#[tokio::test]
async fn test_await_http_error() {
    let provider = MockProvider::new().with_wait(Ok(error_reply(500, "InternalError", "Service busy")));
    let (_, orchestrator) = build_orchestrator(provider, MockFetcher::empty());

    let error = orchestrator.await_completion(&handle("task-1")).await.unwrap_err();
    assert_eq!(error.provider_status(), Some(500));
    assert_eq!(error.code(), "COMPLETION_FAILED");
}

#[tokio::test]
async fn test_await_transport_error() {
    let provider = MockProvider::new().with_wait(Err("timed out".to_string()));
    let (_, orchestrator) = build_orchestrator(provider, MockFetcher::empty());

    let result = orchestrator.await_completion(&handle("task-1")).await;
    assert!(matches!(result, Err(JobError::CompletionFailed { status_code: None, .. })));
}

#[tokio::test]
async fn test_poll_status() {
    let (_, orchestrator) = build_orchestrator(MockProvider::new(), MockFetcher::empty());

    let status = orchestrator.poll_status(&handle("task-1")).await.unwrap();
    assert_eq!(status.state, JobState::Running);
}

#[tokio::test]
async fn test_poll_unknown_and_not_found() {
    let provider = MockProvider::new().with_status(Ok(task_reply("task-1", "UNKNOWN")));
    let (_, orchestrator) = build_orchestrator(provider, MockFetcher::empty());
    assert!(matches!(
        orchestrator.poll_status(&handle("task-1")).await,
        Err(JobError::UnknownJob { .. })
    ));

    let provider = MockProvider::new().with_status(Ok(error_reply(404, "NotFound", "task not found")));
    let (_, orchestrator) = build_orchestrator(provider, MockFetcher::empty());
    assert!(matches!(
        orchestrator.poll_status(&handle("task-1")).await,
        Err(JobError::UnknownJob { .. })
    ));
}

#[tokio::test]
async fn test_poll_status_unavailable() {
    let provider = MockProvider::new().with_status(Ok(error_reply(503, "Throttling", "Requests throttled")));
    let (_, orchestrator) = build_orchestrator(provider, MockFetcher::empty());
    assert_eq!(
        orchestrator.poll_status(&handle("task-1")).await,
        Err(JobError::StatusUnavailable {
            job_id: "task-1".to_string(),
            message: "Requests throttled".to_string(),
            status_code: Some(503),
        })
    );

    let provider = MockProvider::new().with_status(Err("connection refused".to_string()));
    let (_, orchestrator) = build_orchestrator(provider, MockFetcher::empty());
    assert!(matches!(
        orchestrator.poll_status(&handle("task-1")).await,
        Err(JobError::StatusUnavailable { status_code: None, .. })
    ));
}

#[tokio::test]
async fn test_generate_submits_then_waits() {
    let provider = MockProvider::new().with_wait(Ok(succeeded_reply("task-1", &["https://cdn.example.com/x.png"])));
    let fetcher = MockFetcher::new([("https://cdn.example.com/x.png", FetchBehavior::Bytes(vec![0u8; 16]))]);
    let (provider, orchestrator) = build_orchestrator(provider, fetcher);

    let completed = orchestrator.generate(&fox_request()).await.unwrap();

    assert_eq!(completed.handle.as_str(), "task-1");
    assert_eq!(completed.artifacts.len(), 1);
    assert_eq!(provider.waited.lock().unwrap().as_slice(), ["task-1".to_string()]);
}

#[test]
fn test_supported_ratios() {
    let ratios = JobOrchestrator::<MockProvider, MockFetcher>::supported_ratios();
    assert_eq!(ratios.len(), 5);
    assert_eq!(ratios[1].value, "16:9");
    assert_eq!(ratios[1].size, "1344*768");
}
