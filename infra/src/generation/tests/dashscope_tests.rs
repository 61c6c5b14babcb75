use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use jf_core::domain::entities::job::JobState;
use jf_core::domain::value_objects::{AspectRatio, GenerationRequest, JobHandle};
use jf_core::errors::JobError;
use jf_core::services::generation::{
    ImageSynthesisProvider, JobOrchestrator, JobOrchestratorConfig, SynthesisRequest,
};
use jf_shared::GenerationConfig;

use crate::generation::{DashScopeClient, HttpArtifactFetcher};
use crate::InfrastructureError;

fn config_for(server: &MockServer) -> GenerationConfig {
    GenerationConfig {
        api_key: "sk-test".to_string(),
        base_url: server.uri(),
        poll_interval_ms: 10,
        request_timeout_secs: 5,
        ..Default::default()
    }
}

fn fox_request() -> SynthesisRequest {
    SynthesisRequest {
        model: "wanx2.1-t2i-turbo".to_string(),
        prompt: "a red fox".to_string(),
        size: "1344*768".to_string(),
        count: 2,
    }
}

fn handle(id: &str) -> JobHandle {
    JobHandle::new(id).unwrap()
}

fn task_body(task_id: &str, status: &str) -> serde_json::Value {
    json!({
        "request_id": "req-1",
        "output": {"task_id": task_id, "task_status": status}
    })
}

#[test]
fn test_new_requires_api_key() {
    let result = DashScopeClient::new(&GenerationConfig::default());
    assert!(matches!(result, Err(InfrastructureError::Config(_))));
}

#[tokio::test]
async fn test_submit_sends_async_task_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/services/aigc/text2image/image-synthesis"))
        .and(header("X-DashScope-Async", "enable"))
        .and(header("Authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "wanx2.1-t2i-turbo",
            "input": {"prompt": "a red fox"},
            "parameters": {"size": "1344*768", "n": 2}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(task_body("task-42", "PENDING")))
        .expect(1)
        .mount(&server)
        .await;

    let client = DashScopeClient::new(&config_for(&server)).unwrap();
    let reply = client.submit(&fox_request()).await.unwrap();

    assert!(reply.is_success());
    assert_eq!(reply.task_id.as_deref(), Some("task-42"));
    assert_eq!(reply.state(), Some(JobState::Submitted));
    assert_eq!(reply.request_id.as_deref(), Some("req-1"));
}

#[tokio::test]
async fn test_submit_rejection_is_returned_as_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "code": "InvalidApiKey",
            "message": "Invalid API-key provided.",
            "request_id": "req-9"
        })))
        .mount(&server)
        .await;

    let client = DashScopeClient::new(&config_for(&server)).unwrap();
    let reply = client.submit(&fox_request()).await.unwrap();

    assert_eq!(reply.status_code, 401);
    assert_eq!(reply.code.as_deref(), Some("InvalidApiKey"));
    assert_eq!(reply.task_id, None);
}

#[tokio::test]
async fn test_plain_text_error_body_becomes_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let client = DashScopeClient::new(&config_for(&server)).unwrap();
    let reply = client.submit(&fox_request()).await.unwrap();

    assert_eq!(reply.status_code, 502);
    assert_eq!(reply.message.as_deref(), Some("Bad Gateway"));
}

#[tokio::test]
async fn test_undecodable_success_body_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let client = DashScopeClient::new(&config_for(&server)).unwrap();
    let err = client.submit(&fox_request()).await.unwrap_err();
    assert!(err.contains("Undecodable"));
}

#[tokio::test]
async fn test_transport_failure_is_an_error() {
    let config = GenerationConfig {
        api_key: "sk-test".to_string(),
        base_url: "http://127.0.0.1:1".to_string(),
        ..Default::default()
    };
    let client = DashScopeClient::new(&config).unwrap();

    let err = client.fetch_status(&handle("task-1")).await.unwrap_err();
    assert!(err.contains("HTTP request failed"));
}

#[tokio::test]
async fn test_fetch_status_reads_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tasks/task-7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "request_id": "req-3",
            "output": {
                "task_id": "task-7",
                "task_status": "SUCCEEDED",
                "results": [
                    {"url": "https://cdn.example.com/1.png"},
                    {"code": "DataInspectionFailed", "message": "filtered"}
                ]
            }
        })))
        .mount(&server)
        .await;

    let client = DashScopeClient::new(&config_for(&server)).unwrap();
    let reply = client.fetch_status(&handle("task-7")).await.unwrap();

    assert_eq!(reply.state(), Some(JobState::Succeeded));
    assert_eq!(reply.results.len(), 2);
    assert_eq!(reply.results[0].url.as_deref(), Some("https://cdn.example.com/1.png"));
    assert_eq!(reply.results[1].url, None);
    assert_eq!(reply.results[1].message.as_deref(), Some("filtered"));
}

#[tokio::test]
async fn test_wait_polls_until_terminal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tasks/task-5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(task_body("task-5", "PENDING")))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tasks/task-5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(task_body("task-5", "RUNNING")))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tasks/task-5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(task_body("task-5", "FAILED")))
        .mount(&server)
        .await;

    let client = DashScopeClient::new(&config_for(&server)).unwrap();
    let reply = client.wait(&handle("task-5")).await.unwrap();

    assert_eq!(reply.state(), Some(JobState::Failed));
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn test_wait_stops_on_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tasks/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": "NotFound",
            "message": "task not found"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = DashScopeClient::new(&config_for(&server)).unwrap();
    let reply = client.wait(&handle("missing")).await.unwrap();
    assert_eq!(reply.status_code, 404);
}

#[tokio::test]
async fn test_orchestrator_over_http() {
    let server = MockServer::start().await;
    let image_url = format!("{}/files/fox.png", server.uri());
    let broken_url = format!("{}/files/gone.png", server.uri());

    Mock::given(method("POST"))
        .and(path("/services/aigc/text2image/image-synthesis"))
        .respond_with(ResponseTemplate::new(200).set_body_json(task_body("task-fox", "PENDING")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tasks/task-fox"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "output": {
                "task_id": "task-fox",
                "task_status": "SUCCEEDED",
                "results": [{"url": image_url}, {"url": broken_url}]
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/files/fox.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x89, b'P', b'N', b'G']))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/files/gone.png"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let orchestrator = JobOrchestrator::new(
        Arc::new(DashScopeClient::new(&config).unwrap()),
        Arc::new(HttpArtifactFetcher::from_config(&config).unwrap()),
        JobOrchestratorConfig::from(&config),
    );
    let request = GenerationRequest::new("a red fox", AspectRatio::Landscape, 2).unwrap();

    let job = orchestrator.generate(&request).await.unwrap();

    assert_eq!(job.handle.as_str(), "task-fox");
    assert_eq!(job.artifacts.len(), 1);
    assert_eq!(job.failed, 1);
    assert_eq!(job.artifacts[0].data_uri, "data:image/png;base64,iVBORw==");
}

#[tokio::test]
async fn test_orchestrator_reports_unknown_task() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tasks/stale"))
        .respond_with(ResponseTemplate::new(200).set_body_json(task_body("stale", "UNKNOWN")))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let orchestrator = JobOrchestrator::new(
        Arc::new(DashScopeClient::new(&config).unwrap()),
        Arc::new(HttpArtifactFetcher::from_config(&config).unwrap()),
        JobOrchestratorConfig::from(&config),
    );

    let err = orchestrator.poll_status(&handle("stale")).await.unwrap_err();
    assert!(matches!(err, JobError::UnknownJob { .. }));
}
