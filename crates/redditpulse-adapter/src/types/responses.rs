/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust response structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

use super::enums::TaskStatus;
use super::models::HistoryEntry;

/// `POST /analyze` acknowledgment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeAccepted {
    pub task_id: String,
    #[serde(default)]
    pub message: String,
}

/// `GET /status/{task_id}` snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisStatus {
    pub task_id: String,
    pub status: TaskStatus,
    /// Percentage 0-100; meaningless once the status is terminal
    pub progress: u8,
    pub message: String,
}

/// `GET /history` envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

/// One point of the `GET /analytics/trends` series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: String,
    pub avg_sentiment: f64,
    pub post_count: u32,
}

/// `GET /analytics/trends` envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendsResponse {
    #[serde(default)]
    pub trends: Vec<TrendPoint>,
}

/// `GET /` health check payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub message: String,
    #[serde(default)]
    pub version: String,
}
