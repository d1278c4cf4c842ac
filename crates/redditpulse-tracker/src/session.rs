/*
[INPUT]:  Status/result/history writes from TaskClient and the polling loop
[OUTPUT]: Synchronously readable session state for presentation layers
[POS]:    State layer - single authoritative in-memory container
[UPDATE]: When adding session fields or changing history/guard invariants
*/

use redditpulse_adapter::{AnalysisResult, AnalysisStatus, HistoryEntry, TaskStatus};
use std::sync::{Mutex, MutexGuard};

/// Maximum number of history entries retained
pub const HISTORY_CAPACITY: usize = 10;

/// The active analysis task as the session sees it
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveTask {
    pub id: String,
    pub status: TaskStatus,
    pub progress: u8,
    pub message: String,
}

impl ActiveTask {
    /// Freshly submitted task, before the first poll tick
    pub fn pending(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: TaskStatus::Pending,
            progress: 0,
            message: message.into(),
        }
    }
}

impl From<AnalysisStatus> for ActiveTask {
    fn from(status: AnalysisStatus) -> Self {
        Self {
            id: status.task_id,
            status: status.status,
            progress: status.progress,
            message: status.message,
        }
    }
}

/// Point-in-time copy of the whole session
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    pub task: Option<ActiveTask>,
    pub result: Option<AnalysisResult>,
    pub history: Vec<HistoryEntry>,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Single authoritative session container.
///
/// One writer role (TaskClient on behalf of the active task), many readers.
/// Every write replaces a field wholesale; critical sections never span a
/// suspension point, so readers always observe the latest complete write.
#[derive(Debug, Default)]
pub struct SessionStore {
    state: Mutex<SessionSnapshot>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, SessionSnapshot> {
        // A poisoned lock only means a panic elsewhere; the state itself is
        // still a complete last write.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Full copy of the current session state
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state().clone()
    }

    pub fn set_loading(&self, loading: bool) {
        self.state().is_loading = loading;
    }

    /// Replace the current error text; setting one clears the loading flag
    pub fn set_error(&self, error: Option<String>) {
        let mut state = self.state();
        if error.is_some() {
            state.is_loading = false;
        }
        state.error = error;
    }

    /// Replace the active task wholesale; clears the loading flag
    pub fn set_task_status(&self, task: ActiveTask) {
        let mut state = self.state();
        state.task = Some(task);
        state.is_loading = false;
    }

    /// Apply a status only when it belongs to the active, non-terminal task.
    ///
    /// This is the stale-response guard: an in-flight poll that resolves
    /// after its task was superseded must not clobber the newer task's
    /// state, and a terminal status admits no further transition.
    pub fn apply_status_if_active(&self, status: &AnalysisStatus) -> bool {
        let mut state = self.state();
        let Some(task) = state.task.as_ref() else {
            return false;
        };
        if task.id != status.task_id {
            return false;
        }
        if task.status.is_terminal() && status.status != task.status {
            return false;
        }
        state.task = Some(ActiveTask::from(status.clone()));
        state.is_loading = false;
        true
    }

    /// Replace the current result; clears the loading flag
    pub fn set_result(&self, result: AnalysisResult) {
        let mut state = self.state();
        state.result = Some(result);
        state.is_loading = false;
    }

    /// Clear both the active task and the current result
    pub fn clear_active(&self) {
        let mut state = self.state();
        state.task = None;
        state.result = None;
    }

    /// Prepend an entry, de-duplicated by task id, truncated to capacity.
    ///
    /// An existing entry for the same task id is removed first so re-fetching
    /// a completed result never produces duplicate rows.
    pub fn push_history(&self, entry: HistoryEntry) {
        let mut state = self.state();
        state.history.retain(|existing| existing.task_id != entry.task_id);
        state.history.insert(0, entry);
        state.history.truncate(HISTORY_CAPACITY);
    }

    /// Wholesale history replacement, used when reloading from the server
    pub fn set_history(&self, mut entries: Vec<HistoryEntry>) {
        entries.truncate(HISTORY_CAPACITY);
        self.state().history = entries;
    }

    /// Drop the entry for the given task id; no-op when absent
    pub fn remove_history(&self, task_id: &str) {
        self.state().history.retain(|entry| entry.task_id != task_id);
    }

    pub fn active_task_id(&self) -> Option<String> {
        self.state().task.as_ref().map(|task| task.id.clone())
    }

    pub fn current_result(&self) -> Option<AnalysisResult> {
        self.state().result.clone()
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        self.state().history.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state().is_loading
    }

    pub fn error(&self) -> Option<String> {
        self.state().error.clone()
    }
}
