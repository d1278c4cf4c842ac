/*
[INPUT]:  Mock HTTP responses
[OUTPUT]: Test results for HTTP client
[POS]:    Integration tests - HTTP endpoints
[UPDATE]: When HTTP endpoints change
*/

mod common;

use common::{client_for, setup_mock_server, status_body};
use redditpulse_adapter::{AnalysisRequest, ClientConfig, PulseClient, PulseError, TaskStatus};
use tokio_test::assert_ok;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[test]
fn test_client_creation() {
    let _client = assert_ok!(PulseClient::new());
}

#[test]
fn test_client_with_config() {
    let config = ClientConfig::default();
    let _client = assert_ok!(PulseClient::with_config(config));
}

#[test]
fn test_client_rejects_bad_base_url() {
    let err = PulseClient::with_config_and_base_url(ClientConfig::default(), "not a url")
        .expect_err("should reject invalid base url");
    assert!(matches!(err, PulseError::UrlParse(_)));
}

#[tokio::test]
async fn test_submit_then_poll_roundtrip() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "task_id": "t1",
            "message": "Analysis started"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/status/t1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(status_body("t1", "pending", 0, "Analysis queued")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);

    let accepted = assert_ok!(client.start_analysis(&AnalysisRequest::new("ai")).await);
    assert_eq!(accepted.task_id, "t1");

    let status = assert_ok!(client.get_analysis_status(&accepted.task_id).await);
    assert_eq!(status.status, TaskStatus::Pending);
    assert_eq!(status.progress, 0);
}

#[tokio::test]
async fn test_server_error_carries_status_text() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/status/t1"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .get_analysis_status("t1")
        .await
        .expect_err("should surface server error");

    match err {
        PulseError::Api { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "Service Unavailable");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
    assert!(client.base_url().as_str().starts_with("http://"));
}
