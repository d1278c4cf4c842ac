/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for redditpulse-adapter tests

use redditpulse_adapter::{ClientConfig, PulseClient};
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the given mock server
pub fn client_for(server: &MockServer) -> PulseClient {
    PulseClient::with_config_and_base_url(ClientConfig::default(), &server.uri())
        .expect("client init")
}

/// JSON body for a `/status/{task_id}` response
#[allow(dead_code)]
pub fn status_body(task_id: &str, status: &str, progress: u8, message: &str) -> serde_json::Value {
    serde_json::json!({
        "task_id": task_id,
        "status": status,
        "progress": progress,
        "message": message,
    })
}
