/*
[INPUT]:  AnalysisRequest submissions and task ids from callers
[OUTPUT]: Session state driven through the task lifecycle, typed errors
[POS]:    Orchestration layer - one active task slot with polling
[UPDATE]: When adding operations or changing supersede/cancellation rules
*/

use crate::error::{Result, TrackerError};
use crate::poller;
use crate::session::{ActiveTask, HISTORY_CAPACITY, SessionStore};
use redditpulse_adapter::{
    AnalysisRequest, AnalysisResult, AnalysisStatus, HistoryEntry, PulseClient,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Handle to the one live polling loop
#[derive(Debug)]
struct PollHandle {
    task_id: String,
    cancel: CancellationToken,
    #[allow(dead_code)]
    handle: JoinHandle<()>,
}

/// Drives one analysis task from submission to a terminal outcome.
///
/// At most one polling loop is live at any instant; a new submission
/// implicitly cancels the previous one. All state flows into the injected
/// `SessionStore`, which presentation layers read.
#[derive(Debug)]
pub struct TaskClient {
    api: Arc<PulseClient>,
    session: Arc<SessionStore>,
    poll_interval: Duration,
    active_poll: Mutex<Option<PollHandle>>,
}

impl TaskClient {
    pub fn new(api: PulseClient, session: Arc<SessionStore>) -> Self {
        Self::with_poll_interval(api, session, DEFAULT_POLL_INTERVAL)
    }

    pub fn with_poll_interval(
        api: PulseClient,
        session: Arc<SessionStore>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            api: Arc::new(api),
            session,
            poll_interval,
            active_poll: Mutex::new(None),
        }
    }

    /// The store this client writes into
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Submit a new analysis and start polling it.
    ///
    /// Returns the server-assigned task id immediately; completion is
    /// observed through the session. On failure the session's task state is
    /// left untouched.
    pub async fn submit(&self, mut request: AnalysisRequest) -> Result<String> {
        request.normalize();
        request.validate().map_err(TrackerError::InvalidRequest)?;

        // Only one task slot: a new submission supersedes any live loop.
        self.cancel_polling();

        self.session.set_loading(true);
        let accepted = match self.api.start_analysis(&request).await {
            Ok(accepted) => accepted,
            Err(err) => {
                tracing::error!(error = %err, "analysis submission failed");
                self.session.set_error(Some(format!("submission failed: {err}")));
                return Err(TrackerError::Submission(err));
            }
        };

        let task_id = accepted.task_id.clone();
        tracing::info!(task_id = %task_id, query = %request.query, "analysis submitted");

        let message = if accepted.message.is_empty() {
            "Analysis queued".to_string()
        } else {
            accepted.message
        };
        self.session.set_error(None);
        self.session.set_task_status(ActiveTask::pending(&task_id, message));

        self.spawn_poll_loop(task_id.clone());
        Ok(task_id)
    }

    /// One-shot status fetch for any task id.
    ///
    /// The snapshot is returned to the caller regardless; the session write
    /// is gated on the id still being the active task's, so a stale answer
    /// never clobbers a newer task.
    pub async fn get_status(&self, task_id: &str) -> Result<AnalysisStatus> {
        let status = self
            .api
            .get_analysis_status(task_id)
            .await
            .map_err(TrackerError::TransientPoll)?;
        self.session.apply_status_if_active(&status);
        Ok(status)
    }

    /// Fetch the full result of a completed task, store it, and record its
    /// history projection.
    pub async fn get_result(&self, task_id: &str) -> Result<AnalysisResult> {
        self.session.set_loading(true);
        let result = match self.api.get_analysis_result(task_id).await {
            Ok(result) => result,
            Err(err) => {
                self.session.set_error(Some(format!("result unavailable: {err}")));
                return Err(TrackerError::ResultUnavailable(err));
            }
        };

        let entry = result.to_history_entry();
        self.session.set_result(result.clone());
        self.session.push_history(entry);
        self.session.set_error(None);
        Ok(result)
    }

    /// Reload the recency list from the server.
    ///
    /// On failure the existing history is left as-is.
    pub async fn get_history(&self) -> Result<Vec<HistoryEntry>> {
        self.session.set_loading(true);
        let response = match self.api.get_analysis_history(Some(HISTORY_CAPACITY as u32)).await {
            Ok(response) => response,
            Err(err) => {
                self.session.set_error(Some(format!("history fetch failed: {err}")));
                return Err(TrackerError::HistoryFetch(err));
            }
        };

        self.session.set_history(response.history.clone());
        self.session.set_loading(false);
        self.session.set_error(None);
        Ok(response.history)
    }

    /// Delete a task server-side, then reconcile local state.
    ///
    /// Local state is only touched after the server accepted the delete; a
    /// refused deletion leaves everything in place.
    pub async fn delete_task(&self, task_id: &str) -> Result<()> {
        if let Err(err) = self.api.delete_analysis_result(task_id).await {
            tracing::warn!(task_id = %task_id, error = %err, "server refused deletion");
            self.session.set_error(Some(format!("deletion failed: {err}")));
            return Err(TrackerError::Deletion(err));
        }

        self.session.remove_history(task_id);

        let displayed = self
            .session
            .current_result()
            .is_some_and(|result| result.task_id == task_id)
            || self.session.active_task_id().as_deref() == Some(task_id);
        if displayed {
            self.cancel_polling();
            self.session.clear_active();
        }

        tracing::info!(task_id = %task_id, "task deleted");
        self.session.set_error(None);
        Ok(())
    }

    /// Stop the live polling loop, if any, without contacting the server.
    /// Idempotent. An in-flight request is not aborted; its late response is
    /// discarded by the active-task guard.
    pub fn cancel_polling(&self) {
        let mut slot = self
            .active_poll
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(poll) = slot.take() {
            tracing::debug!(task_id = %poll.task_id, "cancelling polling loop");
            poll.cancel.cancel();
        }
    }

    /// Cancel polling and clear the displayed task and result
    pub fn clear_current_analysis(&self) {
        self.cancel_polling();
        self.session.clear_active();
    }

    fn spawn_poll_loop(&self, task_id: String) {
        let cancel = CancellationToken::new();
        let api = self.api.clone();
        let session = self.session.clone();
        let interval = self.poll_interval;

        let loop_cancel = cancel.clone();
        let loop_task_id = task_id.clone();
        let handle = tokio::spawn(async move {
            poller::run_poll_loop(&api, &session, &loop_task_id, interval, loop_cancel).await;
        });

        let mut slot = self
            .active_poll
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = Some(PollHandle {
            task_id,
            cancel,
            handle,
        });
    }
}

impl Drop for TaskClient {
    fn drop(&mut self) {
        self.cancel_polling();
    }
}
