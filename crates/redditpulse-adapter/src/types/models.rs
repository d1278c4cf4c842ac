/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust data models shared across endpoints
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// One analyzed comment under a post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub author: String,
    pub body: String,
    pub score: i64,
    pub created_utc: f64,
    pub sentiment_score: f64,
    pub sentiment_label: String,
}

/// One analyzed post including its comment thread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub selftext: String,
    pub author: String,
    pub subreddit: String,
    pub score: i64,
    pub upvote_ratio: f64,
    pub num_comments: u32,
    pub created_utc: f64,
    pub url: String,
    pub is_video: bool,
    pub over_18: bool,
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub overall_sentiment: f64,
    pub sentiment_label: String,
    pub engagement_score: f64,
}

/// Full terminal payload for a completed analysis task.
///
/// The `analytics` bundle is opaque to this client; it is carried through
/// untouched for presentation layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub task_id: String,
    pub query: String,
    pub total_posts: u32,
    pub total_comments: u32,
    pub analysis_duration: f64,
    #[serde(with = "lenient_utc")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub analytics: serde_json::Value,
}

impl AnalysisResult {
    /// Project the recency-list summary out of a full result
    pub fn to_history_entry(&self) -> HistoryEntry {
        HistoryEntry {
            task_id: self.task_id.clone(),
            query: self.query.clone(),
            total_posts: self.total_posts,
            total_comments: self.total_comments,
            analysis_duration: self.analysis_duration,
            created_at: self.created_at,
        }
    }
}

/// Bounded-recency summary of a completed analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub task_id: String,
    pub query: String,
    pub total_posts: u32,
    pub total_comments: u32,
    pub analysis_duration: f64,
    #[serde(with = "lenient_utc")]
    pub created_at: DateTime<Utc>,
}

/// The service emits `created_at` both as RFC 3339 and as a naive UTC
/// timestamp (SQLite passthrough), so accept either on input.
pub(crate) mod lenient_utc {
    use super::*;
    use serde::{Deserializer, Serializer, de::Error};

    const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(parsed.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(&raw, NAIVE_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S%.f"))
            .map(|naive| naive.and_utc())
            .map_err(|err| D::Error::custom(format!("unrecognized timestamp {raw:?}: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> AnalysisResult {
        serde_json::from_value(serde_json::json!({
            "task_id": "t1",
            "query": "rust",
            "total_posts": 100,
            "total_comments": 431,
            "analysis_duration": 12.7,
            "created_at": "2024-05-01T10:30:00",
            "posts": [],
            "analytics": {"sentiment_distribution": {"positive": 61}}
        }))
        .unwrap()
    }

    #[test]
    fn test_history_projection_carries_summary_fields() {
        let result = sample_result();
        let entry = result.to_history_entry();
        assert_eq!(entry.task_id, "t1");
        assert_eq!(entry.query, "rust");
        assert_eq!(entry.total_posts, 100);
        assert_eq!(entry.total_comments, 431);
        assert_eq!(entry.analysis_duration, 12.7);
        assert_eq!(entry.created_at, result.created_at);
    }

    #[test]
    fn test_created_at_accepts_rfc3339_and_naive() {
        let naive: HistoryEntry = serde_json::from_value(serde_json::json!({
            "task_id": "t1",
            "query": "rust",
            "total_posts": 1,
            "total_comments": 2,
            "analysis_duration": 0.5,
            "created_at": "2024-05-01T10:30:00.250"
        }))
        .unwrap();

        let rfc3339: HistoryEntry = serde_json::from_value(serde_json::json!({
            "task_id": "t1",
            "query": "rust",
            "total_posts": 1,
            "total_comments": 2,
            "analysis_duration": 0.5,
            "created_at": "2024-05-01T10:30:00.250Z"
        }))
        .unwrap();

        assert_eq!(naive.created_at, rfc3339.created_at);
    }
}
