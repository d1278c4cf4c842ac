/*
[INPUT]:  Error sources (HTTP transport, API responses, serialization)
[OUTPUT]: Structured error types with context and retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the RedditPulse adapter
#[derive(Error, Debug)]
pub enum PulseError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl PulseError {
    /// Check if the error is worth retrying on a later poll tick
    pub fn is_retryable(&self) -> bool {
        match self {
            PulseError::Http(_) | PulseError::InvalidResponse(_) => true,
            PulseError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Check if the error means the task is unknown on the server side
    pub fn is_not_found(&self) -> bool {
        matches!(self, PulseError::Api { status: 404, .. })
    }

    /// Create an API error from status code and message
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        PulseError::Api {
            status: status.as_u16(),
            message: message.into(),
        }
    }
}

/// Result type alias for RedditPulse operations
pub type Result<T> = std::result::Result<T, PulseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_errors_are_retryable() {
        let err = PulseError::api_error(StatusCode::BAD_GATEWAY, "upstream down");
        assert!(err.is_retryable());

        let err = PulseError::api_error(StatusCode::BAD_REQUEST, "not completed");
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_not_found_classification() {
        let err = PulseError::api_error(StatusCode::NOT_FOUND, "Task not found");
        assert!(err.is_not_found());
        assert!(!err.is_retryable());

        let err = PulseError::InvalidResponse("truncated body".to_string());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_api_error_creation() {
        let err = PulseError::api_error(StatusCode::BAD_REQUEST, "Analysis not completed");
        match err {
            PulseError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Analysis not completed");
            }
            _ => panic!("Expected Api error variant"),
        }
    }
}
