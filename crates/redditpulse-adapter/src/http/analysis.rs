/*
[INPUT]:  Analysis requests and task identifiers
[OUTPUT]: Task lifecycle data (submission ack, status, result, history)
[POS]:    HTTP layer - analysis task endpoints
[UPDATE]: When adding new task endpoints or changing response format
*/

use crate::http::{PulseClient, Result};
use crate::types::{AnalysisRequest, AnalysisResult, AnalysisStatus, AnalyzeAccepted, HistoryResponse};
use reqwest::Method;

impl PulseClient {
    /// Submit a new analysis job
    ///
    /// POST /analyze
    pub async fn start_analysis(&self, request: &AnalysisRequest) -> Result<AnalyzeAccepted> {
        let builder = self.request(Method::POST, "/analyze")?.json(request);
        self.send_json(builder).await
    }

    /// Fetch the current status of a task
    ///
    /// GET /status/{task_id}
    pub async fn get_analysis_status(&self, task_id: &str) -> Result<AnalysisStatus> {
        let endpoint = format!("/status/{task_id}");
        let builder = self.request(Method::GET, &endpoint)?;
        self.send_json(builder).await
    }

    /// Fetch the full result payload of a completed task
    ///
    /// GET /result/{task_id}
    pub async fn get_analysis_result(&self, task_id: &str) -> Result<AnalysisResult> {
        let endpoint = format!("/result/{task_id}");
        let builder = self.request(Method::GET, &endpoint)?;
        self.send_json(builder).await
    }

    /// Fetch the recent-completions list
    ///
    /// GET /history?limit={limit}
    pub async fn get_analysis_history(&self, limit: Option<u32>) -> Result<HistoryResponse> {
        let endpoint = match limit {
            Some(limit) => format!("/history?limit={limit}"),
            None => "/history".to_string(),
        };
        let builder = self.request(Method::GET, &endpoint)?;
        self.send_json(builder).await
    }

    /// Delete a stored result server-side
    ///
    /// DELETE /result/{task_id} - only the HTTP status is contractual
    pub async fn delete_analysis_result(&self, task_id: &str) -> Result<()> {
        let endpoint = format!("/result/{task_id}");
        let builder = self.request(Method::DELETE, &endpoint)?;
        self.send_expect_success(builder).await
    }
}

#[cfg(test)]
mod tests {
    use crate::http::{ClientConfig, PulseClient, PulseError};
    use crate::types::{AnalysisRequest, TaskStatus};
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> PulseClient {
        PulseClient::with_config_and_base_url(ClientConfig::default(), &server.uri())
            .expect("client init")
    }

    #[tokio::test]
    async fn test_start_analysis() {
        let server = MockServer::start().await;

        let _mock = Mock::given(method("POST"))
            .and(path("/analyze"))
            .and(body_partial_json(serde_json::json!({
                "query": "rust async",
                "limit": 100,
                "time_filter": "week",
                "sort_type": "relevance"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "task_id": "task-1",
                "message": "Analysis started"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let accepted = client
            .start_analysis(&AnalysisRequest::new("rust async"))
            .await
            .expect("start_analysis failed");

        assert_eq!(accepted.task_id, "task-1");
        assert_eq!(accepted.message, "Analysis started");
    }

    #[tokio::test]
    async fn test_get_analysis_status() {
        let server = MockServer::start().await;

        let _mock = Mock::given(method("GET"))
            .and(path("/status/task-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "task_id": "task-1",
                "status": "processing",
                "progress": 40,
                "message": "Analyzing sentiment..."
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let status = client
            .get_analysis_status("task-1")
            .await
            .expect("get_analysis_status failed");

        assert_eq!(status.status, TaskStatus::Processing);
        assert_eq!(status.progress, 40);
        assert_eq!(status.message, "Analyzing sentiment...");
    }

    #[tokio::test]
    async fn test_get_analysis_result() {
        let server = MockServer::start().await;

        let _mock = Mock::given(method("GET"))
            .and(path("/result/task-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "task_id": "task-1",
                "query": "rust async",
                "total_posts": 100,
                "total_comments": 431,
                "analysis_duration": 12.7,
                "created_at": "2024-05-01T10:30:00",
                "posts": [],
                "analytics": {"sentiment_distribution": {"positive": 61, "negative": 14}}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let result = client
            .get_analysis_result("task-1")
            .await
            .expect("get_analysis_result failed");

        assert_eq!(result.task_id, "task-1");
        assert_eq!(result.total_posts, 100);
        assert_eq!(
            result.analytics["sentiment_distribution"]["positive"],
            serde_json::json!(61)
        );
    }

    #[tokio::test]
    async fn test_get_result_before_completion_maps_detail() {
        let server = MockServer::start().await;

        let _mock = Mock::given(method("GET"))
            .and(path("/result/task-1"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "detail": "Analysis not completed"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .get_analysis_result("task-1")
            .await
            .expect_err("should fail before completion");

        match err {
            PulseError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Analysis not completed");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_analysis_history() {
        let server = MockServer::start().await;

        let _mock = Mock::given(method("GET"))
            .and(path("/history"))
            .and(query_param("limit", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "history": [{
                    "task_id": "task-1",
                    "query": "rust async",
                    "total_posts": 100,
                    "total_comments": 431,
                    "analysis_duration": 12.7,
                    "created_at": "2024-05-01T10:30:00"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let response = client
            .get_analysis_history(Some(10))
            .await
            .expect("get_analysis_history failed");

        assert_eq!(response.history.len(), 1);
        assert_eq!(response.history[0].task_id, "task-1");
    }

    #[tokio::test]
    async fn test_delete_analysis_result() {
        let server = MockServer::start().await;

        let _mock = Mock::given(method("DELETE"))
            .and(path("/result/task-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": "Result deleted successfully"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        client
            .delete_analysis_result("task-1")
            .await
            .expect("delete_analysis_result failed");
    }

    #[tokio::test]
    async fn test_delete_unknown_task_surfaces_not_found() {
        let server = MockServer::start().await;

        let _mock = Mock::given(method("DELETE"))
            .and(path("/result/ghost"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "detail": "Task not found"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .delete_analysis_result("ghost")
            .await
            .expect_err("delete should fail");
        assert!(err.is_not_found());
    }
}
