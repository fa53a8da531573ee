//! Per-run bookkeeping: outcomes recorded so far and the progress numerator.

use super::WorkflowError;
use super::summary::{ClearResult, CollectionOutcome, WorkflowSummary};
use crate::collections::CollectionSpec;

/// Transient state owned by one in-flight run. Dropped when the run ends.
#[derive(Debug)]
pub(crate) struct WorkflowState {
    total: usize,
    /// Collections that reached `Cleared`. Failures do not count.
    completed_count: usize,
    results: Vec<CollectionOutcome>,
}

impl WorkflowState {
    pub(crate) fn new(total: usize) -> Self {
        Self { total, completed_count: 0, results: Vec::with_capacity(total) }
    }

    /// Reject a collection that already has an outcome in this run.
    ///
    /// Called before any request for the collection goes out, so a
    /// duplicated name aborts before it can be deleted twice.
    pub(crate) fn admit(&self, collection: &CollectionSpec) -> Result<(), WorkflowError> {
        if self.results.iter().any(|o| o.collection.name == collection.name) {
            return Err(WorkflowError::Aborted(format!("collection `{}` already has an outcome", collection.name)));
        }
        Ok(())
    }

    pub(crate) fn record(&mut self, collection: &CollectionSpec, result: ClearResult) -> Result<(), WorkflowError> {
        self.admit(collection)?;
        if result.is_cleared() {
            self.completed_count += 1;
        }
        self.results.push(CollectionOutcome { collection: collection.clone(), result });
        Ok(())
    }

    /// Cleared collections over configured collections, in `0.0..=1.0`.
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn progress(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        self.completed_count as f64 / self.total as f64
    }

    pub(crate) fn completed_count(&self) -> usize {
        self.completed_count
    }

    pub(crate) fn into_summary(self) -> WorkflowSummary {
        WorkflowSummary::new(self.results)
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
