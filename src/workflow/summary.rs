//! Outcomes of a finished run and the views the CLI renders from them.

use serde::Serialize;

use crate::client::ClientError;
use crate::collections::CollectionSpec;
use crate::error::ErrorCode;

// =============================================================================
// OUTCOMES
// =============================================================================

/// What happened to one collection during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClearResult {
    /// Every listed record was deleted. `0` when the collection was empty.
    Cleared(usize),
    /// The list or batch-delete call failed; nothing more was attempted.
    Failed(ClientError),
}

impl ClearResult {
    #[must_use]
    pub fn is_cleared(&self) -> bool {
        matches!(self, Self::Cleared(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionOutcome {
    pub collection: CollectionSpec,
    pub result: ClearResult,
}

/// Run-level verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Succeeded,
    PartiallyFailed,
    Failed,
}

// =============================================================================
// SUMMARY
// =============================================================================

/// Ordered per-collection outcomes of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowSummary {
    outcomes: Vec<CollectionOutcome>,
}

impl WorkflowSummary {
    pub(crate) fn new(outcomes: Vec<CollectionOutcome>) -> Self {
        Self { outcomes }
    }

    #[must_use]
    pub fn outcomes(&self) -> &[CollectionOutcome] {
        &self.outcomes
    }

    #[must_use]
    pub fn cleared_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_cleared()).count()
    }

    pub fn failed(&self) -> impl Iterator<Item = &CollectionOutcome> {
        self.outcomes.iter().filter(|o| !o.result.is_cleared())
    }

    #[must_use]
    pub fn records_deleted(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match o.result {
                ClearResult::Cleared(count) => count,
                ClearResult::Failed(_) => 0,
            })
            .sum()
    }

    /// An empty run counts as a success: there was nothing to fail.
    #[must_use]
    pub fn status(&self) -> RunStatus {
        let cleared = self.cleared_count();
        if cleared == self.outcomes.len() {
            RunStatus::Succeeded
        } else if cleared == 0 {
            RunStatus::Failed
        } else {
            RunStatus::PartiallyFailed
        }
    }

    /// One-line run verdict for the operator.
    #[must_use]
    pub fn headline(&self) -> String {
        let total = self.outcomes.len();
        let cleared = self.cleared_count();
        let deleted = self.records_deleted();
        match self.status() {
            RunStatus::Succeeded => {
                format!("sweep complete: {cleared}/{total} collections cleared, {deleted} records deleted")
            }
            RunStatus::PartiallyFailed => {
                let failed: Vec<&str> = self.failed().map(|o| o.collection.name.as_str()).collect();
                format!(
                    "sweep partially failed: {cleared}/{total} collections cleared, {deleted} records deleted; failed: {}",
                    failed.join(", ")
                )
            }
            RunStatus::Failed => format!("sweep failed: 0/{total} collections cleared"),
        }
    }

    #[must_use]
    pub fn report(&self) -> SummaryReport<'_> {
        SummaryReport {
            status: self.status(),
            records_deleted: self.records_deleted(),
            collections: self.outcomes.iter().map(OutcomeReport::from_outcome).collect(),
        }
    }
}

// =============================================================================
// JSON REPORT
// =============================================================================

#[derive(Debug, Serialize)]
pub struct SummaryReport<'a> {
    pub status: RunStatus,
    pub records_deleted: usize,
    pub collections: Vec<OutcomeReport<'a>>,
}

#[derive(Debug, Serialize)]
pub struct OutcomeReport<'a> {
    pub name: &'a str,
    pub label: &'a str,
    pub endpoint: &'a str,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retryable: Option<bool>,
}

impl<'a> OutcomeReport<'a> {
    fn from_outcome(outcome: &'a CollectionOutcome) -> Self {
        let spec = &outcome.collection;
        let base = Self {
            name: &spec.name,
            label: &spec.label,
            endpoint: &spec.endpoint,
            status: "cleared",
            count: None,
            error_code: None,
            message: None,
            retryable: None,
        };
        match &outcome.result {
            ClearResult::Cleared(count) => Self { count: Some(*count), ..base },
            ClearResult::Failed(err) => Self {
                status: "failed",
                error_code: Some(err.error_code()),
                message: Some(err.to_string()),
                retryable: Some(err.retryable()),
                ..base
            },
        }
    }
}

#[cfg(test)]
#[path = "summary_test.rs"]
mod tests;
