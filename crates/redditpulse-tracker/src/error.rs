/*
[INPUT]:  Adapter errors and request validation failures
[OUTPUT]: Operation-level error taxonomy for the tracker
[POS]:    Error handling layer - per-operation failure classification
[UPDATE]: When adding new tracker operations or changing recovery policy
*/

use redditpulse_adapter::PulseError;
use thiserror::Error;

/// Errors surfaced by TaskClient operations.
///
/// Transient poll failures inside the polling loop are absorbed there and
/// never reach callers; `TransientPoll` only appears on explicit one-shot
/// status fetches.
#[derive(Error, Debug)]
pub enum TrackerError {
    /// Request rejected before any network call was made
    #[error("invalid analysis request: {0}")]
    InvalidRequest(String),

    /// Creation call failed - no task was created
    #[error("submission failed: {0}")]
    Submission(#[source] PulseError),

    /// One status check failed - safe to retry on a later tick
    #[error("status check failed: {0}")]
    TransientPoll(#[source] PulseError),

    /// Result fetched before completion, or task purged server-side
    #[error("result unavailable: {0}")]
    ResultUnavailable(#[source] PulseError),

    /// Server refused the deletion - local state left unchanged
    #[error("deletion failed: {0}")]
    Deletion(#[source] PulseError),

    /// History reload failed - existing history left as-is
    #[error("history fetch failed: {0}")]
    HistoryFetch(#[source] PulseError),
}

/// Result type alias for tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;
