/*
[INPUT]:  PulseClient + SessionStore + task id + CancellationToken
[OUTPUT]: Session state advanced to a terminal outcome, or a cancelled loop
[POS]:    Execution layer - status polling until terminal state
[UPDATE]: When changing tick cadence, terminal handling, or guard semantics
*/

use crate::session::SessionStore;
use redditpulse_adapter::{PulseClient, TaskStatus};
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// What one poll tick decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Not terminal yet (or a transient failure) - keep ticking
    Continue,
    /// Completed observed - fetch the result, then stop
    Completed,
    /// Failed observed - stop without fetching a result
    Failed,
}

/// One poll tick: fetch the status once and write it through the
/// stale-response guard.
///
/// A fetch error is transient by policy: it is logged and the previous
/// status/progress are left untouched. A status for a task that is no longer
/// the active one is discarded; the loop that issued it is already cancelled
/// or about to be.
pub async fn poll_step(api: &PulseClient, session: &SessionStore, task_id: &str) -> PollOutcome {
    let status = match api.get_analysis_status(task_id).await {
        Ok(status) => status,
        Err(err) => {
            tracing::warn!(task_id = %task_id, error = %err, "status poll failed; will retry next tick");
            return PollOutcome::Continue;
        }
    };

    if !session.apply_status_if_active(&status) {
        tracing::debug!(task_id = %task_id, "discarding status for superseded task");
        return PollOutcome::Continue;
    }

    match status.status {
        TaskStatus::Completed => PollOutcome::Completed,
        TaskStatus::Failed => {
            let detail = if status.message.trim().is_empty() {
                "analysis failed".to_string()
            } else {
                status.message.clone()
            };
            tracing::info!(task_id = %task_id, "task reached failed state");
            session.set_error(Some(detail));
            PollOutcome::Failed
        }
        TaskStatus::Pending | TaskStatus::Processing => PollOutcome::Continue,
    }
}

/// Fetch the completed task's result and fold it into the session.
///
/// Writes are gated on the task still being the active one; a completion
/// that resolves after a newer submission is dropped.
pub async fn fetch_completed_result(api: &PulseClient, session: &SessionStore, task_id: &str) {
    session.set_loading(true);

    match api.get_analysis_result(task_id).await {
        Ok(result) => {
            if session.active_task_id().as_deref() != Some(task_id) {
                tracing::debug!(task_id = %task_id, "discarding result for superseded task");
                session.set_loading(false);
                return;
            }
            let entry = result.to_history_entry();
            tracing::info!(
                task_id = %task_id,
                total_posts = result.total_posts,
                total_comments = result.total_comments,
                "analysis result stored"
            );
            session.set_result(result);
            session.push_history(entry);
            session.set_error(None);
        }
        Err(err) => {
            tracing::error!(task_id = %task_id, error = %err, "result fetch after completion failed");
            session.set_error(Some(format!("result unavailable: {err}")));
        }
    }
}

/// Drive a task to its terminal outcome on a fixed interval.
///
/// Terminates on the first observed terminal status or when the token is
/// cancelled. The caller owns the token; a new submission cancels it.
pub async fn run_poll_loop(
    api: &PulseClient,
    session: &SessionStore,
    task_id: &str,
    interval: Duration,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first interval tick fires immediately; the task was stored as
    // Pending just before this loop started, so skip straight to cadence.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!(task_id = %task_id, "polling cancelled");
                return;
            }
            _ = ticker.tick() => {
                match poll_step(api, session, task_id).await {
                    PollOutcome::Continue => {}
                    PollOutcome::Completed => {
                        fetch_completed_result(api, session, task_id).await;
                        return;
                    }
                    PollOutcome::Failed => return,
                }
            }
        }
    }
}
