//! Fire-and-forget mark-read write-back.
//!
//! Opening an entry schedules one task that tells the server the entry was
//! read. The interactive loop never waits on these tasks; it only reaps the
//! finished ones between commands and calls [`TaskSupervisor::drain`] once
//! on the way out so no write-back is lost at exit.

use std::sync::Arc;

use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error, info, warn};

use crate::app::Result;
use crate::domain::EntryId;
use crate::store::EntryStore;

/// A mark-read that did not reach the server.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkReadFailure {
    pub id: Option<EntryId>,
    pub error: String,
}

impl std::fmt::Display for MarkReadFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "Failed to mark entry {} read: {}", id, self.error),
            None => write!(f, "Mark-read task aborted: {}", self.error),
        }
    }
}

#[derive(Debug, Default)]
pub struct DrainReport {
    pub succeeded: usize,
    pub failures: Vec<MarkReadFailure>,
}

/// Registry of in-flight mark-read tasks.
pub struct TaskSupervisor {
    tasks: JoinSet<(EntryId, Result<()>)>,
}

impl TaskSupervisor {
    pub fn new() -> Self {
        Self {
            tasks: JoinSet::new(),
        }
    }

    /// Spawn a mark-read for `id` on the current runtime.
    pub fn spawn_mark_read(&mut self, store: Arc<dyn EntryStore>, id: EntryId) {
        debug!("Scheduling mark-read for entry {} ({} in flight)", id, self.tasks.len());
        self.tasks.spawn(async move {
            let result = store.mark_read(&[id]).await;
            (id, result)
        });
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Collect tasks that already finished, without waiting.
    pub fn reap(&mut self) -> Vec<MarkReadFailure> {
        let mut failures = Vec::new();
        while let Some(joined) = self.tasks.try_join_next() {
            if let Some(failure) = settle(joined) {
                failures.push(failure);
            }
        }
        failures
    }

    /// Wait for every outstanding task.
    pub async fn drain(&mut self) -> DrainReport {
        let mut report = DrainReport::default();
        if !self.tasks.is_empty() {
            info!("Waiting for {} pending mark-read tasks", self.tasks.len());
        }

        while let Some(joined) = self.tasks.join_next().await {
            match settle(joined) {
                Some(failure) => report.failures.push(failure),
                None => report.succeeded += 1,
            }
        }

        report
    }
}

impl Default for TaskSupervisor {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TaskSupervisor {
    fn drop(&mut self) {
        if !self.tasks.is_empty() {
            warn!("Dropping {} undrained mark-read tasks", self.tasks.len());
        }
    }
}

fn settle(joined: std::result::Result<(EntryId, Result<()>), JoinError>) -> Option<MarkReadFailure> {
    match joined {
        Ok((id, Ok(()))) => {
            debug!("Entry {} marked read", id);
            None
        }
        Ok((id, Err(e))) => {
            warn!("Failed to mark entry {} read: {}", id, e);
            Some(MarkReadFailure {
                id: Some(id),
                error: e.to_string(),
            })
        }
        Err(e) => {
            error!("Mark-read task join error: {}", e);
            Some(MarkReadFailure {
                id: None,
                error: e.to_string(),
            })
        }
    }
}
