/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust request structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

use super::enums::{SortType, TimeFilter};

/// Smallest post-count limit the service accepts
pub const MIN_POST_LIMIT: u32 = 10;
/// Largest post-count limit the service accepts
pub const MAX_POST_LIMIT: u32 = 1000;

/// Submission payload for `POST /analyze`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Free-text search query
    pub query: String,
    /// Maximum number of posts to analyze
    pub limit: u32,
    /// Optional target-community filters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subreddits: Option<Vec<String>>,
    pub time_filter: TimeFilter,
    pub sort_type: SortType,
}

impl Default for AnalysisRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            limit: 100,
            subreddits: None,
            time_filter: TimeFilter::Week,
            sort_type: SortType::Relevance,
        }
    }
}

impl AnalysisRequest {
    /// Convenience constructor with service defaults
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Validate the request before submission.
    ///
    /// Returns a human-readable message for the first violated constraint.
    pub fn validate(&self) -> Result<(), String> {
        if self.query.trim().is_empty() {
            return Err("query must not be empty".to_string());
        }
        if !(MIN_POST_LIMIT..=MAX_POST_LIMIT).contains(&self.limit) {
            return Err(format!(
                "limit must be between {MIN_POST_LIMIT} and {MAX_POST_LIMIT}, got {}",
                self.limit
            ));
        }
        Ok(())
    }

    /// De-duplicate subreddit filters in place, preserving first-seen order
    /// and dropping blank entries. An empty filter set collapses to `None`.
    pub fn normalize(&mut self) {
        if let Some(subreddits) = self.subreddits.take() {
            let mut seen: Vec<String> = Vec::with_capacity(subreddits.len());
            for subreddit in subreddits {
                let trimmed = subreddit.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if !seen.iter().any(|s| s == trimmed) {
                    seen.push(trimmed.to_string());
                }
            }
            if !seen.is_empty() {
                self.subreddits = Some(seen);
            }
        }
    }
}
