/*
[INPUT]:  Task identifiers and trend query parameters
[OUTPUT]: Aggregate analytics data (summary bundle, sentiment trends)
[POS]:    HTTP layer - analytics endpoints
[UPDATE]: When adding new analytics endpoints or changing response format
*/

use crate::http::{PulseClient, Result};
use crate::types::{HealthResponse, TrendsResponse};
use reqwest::Method;

impl PulseClient {
    /// Fetch the analytics bundle of a completed analysis on its own.
    ///
    /// GET /analytics/summary/{task_id} - the bundle is opaque to this
    /// client and handed through as raw JSON.
    pub async fn get_analytics_summary(&self, task_id: &str) -> Result<serde_json::Value> {
        let endpoint = format!("/analytics/summary/{task_id}");
        let builder = self.request(Method::GET, &endpoint)?;
        self.send_json(builder).await
    }

    /// Fetch daily sentiment averages over the given trailing window
    ///
    /// GET /analytics/trends?days={days}
    pub async fn get_sentiment_trends(&self, days: u32) -> Result<TrendsResponse> {
        let endpoint = format!("/analytics/trends?days={days}");
        let builder = self.request(Method::GET, &endpoint)?;
        self.send_json(builder).await
    }

    /// Service health check
    ///
    /// GET /
    pub async fn health(&self) -> Result<HealthResponse> {
        let builder = self.request(Method::GET, "/")?;
        self.send_json(builder).await
    }
}
