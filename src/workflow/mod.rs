//! Batch clear workflow: sequential sweep over the configured collections.
//!
//! DESIGN
//! ======
//! Collections are processed one at a time in configuration order. For each
//! one the workflow lists record ids, then issues a single batch delete. No
//! two requests are ever in flight at once; each is awaited before the next.
//! Collaborators (client and sink) are passed into [`BatchClearWorkflow::run`]
//! so the workflow itself holds nothing but the collection list.
//!
//! ERROR HANDLING
//! ==============
//! A failed list or delete marks that collection `Failed` and the sweep moves
//! on: best-effort across collections, never fail-fast, never retried.
//! Only a broken run (concurrent invocation, duplicate outcome) returns
//! `Err`, and it does so before any further request is sent.
//!
//! Progress counts `Cleared` collections only, so a failure leaves the
//! fraction where it was.

mod state;
pub mod summary;

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, error};

use crate::client::RemoteCollectionClient;
use crate::collections::CollectionSpec;
use crate::error::ErrorCode;
use crate::sink::ProgressSink;
use state::WorkflowState;
pub use summary::{ClearResult, RunStatus, WorkflowSummary};

// =============================================================================
// ERROR
// =============================================================================

/// A run that could not finish its own bookkeeping. Per-collection request
/// failures are never reported here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkflowError {
    #[error("a sweep is already running on this workflow")]
    AlreadyRunning,
    #[error("run aborted: {0}")]
    Aborted(String),
}

impl ErrorCode for WorkflowError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyRunning => "E_ALREADY_RUNNING",
            Self::Aborted(_) => "E_RUN_ABORTED",
        }
    }
}

// =============================================================================
// WORKFLOW
// =============================================================================

pub struct BatchClearWorkflow {
    collections: Vec<CollectionSpec>,
    running: AtomicBool,
}

impl BatchClearWorkflow {
    #[must_use]
    pub fn new(collections: Vec<CollectionSpec>) -> Self {
        Self { collections, running: AtomicBool::new(false) }
    }

    /// Clear every configured collection, reporting to `sink` as it goes.
    ///
    /// The caller must already hold the operator's confirmation; the
    /// deletions are irreversible.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::AlreadyRunning`] if another run on this
    /// workflow is in flight, and [`WorkflowError::Aborted`] if a collection
    /// would produce a second outcome. Request failures are recorded in the
    /// summary instead.
    pub async fn run(
        &self,
        client: &dyn RemoteCollectionClient,
        sink: &dyn ProgressSink,
    ) -> Result<WorkflowSummary, WorkflowError> {
        let _guard = RunGuard::acquire(&self.running)?;
        let total = self.collections.len();
        debug!(total, "sweep started");

        let mut state = WorkflowState::new(total);
        for collection in &self.collections {
            if let Err(e) = state.admit(collection) {
                error!(error = %e, collection = %collection.name, "sweep aborted");
                return Err(e);
            }

            sink.on_start(collection);
            let result = clear_collection(client, collection).await;
            match &result {
                ClearResult::Cleared(count) => sink.on_complete(collection, *count),
                ClearResult::Failed(cause) => sink.on_error(collection, cause),
            }

            if let Err(e) = state.record(collection, result) {
                error!(error = %e, collection = %collection.name, "sweep aborted");
                return Err(e);
            }
            sink.on_progress(state.progress());
        }

        debug!(total, cleared = state.completed_count(), "sweep done");
        let summary = state.into_summary();
        sink.on_finished(&summary);
        Ok(summary)
    }
}

/// List then delete one collection. Never issues a delete after a failed
/// or empty list.
async fn clear_collection(client: &dyn RemoteCollectionClient, collection: &CollectionSpec) -> ClearResult {
    let ids = match client.list_ids(collection).await {
        Ok(ids) => ids,
        Err(e) => return ClearResult::Failed(e),
    };
    if ids.is_empty() {
        return ClearResult::Cleared(0);
    }

    match client.batch_delete(collection, &ids).await {
        Ok(()) => ClearResult::Cleared(ids.len()),
        Err(e) => ClearResult::Failed(e),
    }
}

/// Holds the workflow's running flag for the lifetime of one run.
struct RunGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> RunGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, WorkflowError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| WorkflowError::AlreadyRunning)?;
        Ok(Self { flag })
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
