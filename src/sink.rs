//! Progress sinks: observers of a sweep.
//!
//! Sinks are notified as the workflow advances and cannot influence it.
//! The CLI pairs a [`ConsoleSink`] (operator-facing lines on stderr) with a
//! [`TracingSink`] (structured log events).

use std::io::Write;
use std::sync::Mutex;

use tracing::{info, warn};

use crate::client::ClientError;
use crate::collections::CollectionSpec;
use crate::error::ErrorCode;
use crate::workflow::{RunStatus, WorkflowSummary};

/// Receives run status notifications. Purely observational.
pub trait ProgressSink: Send + Sync {
    fn on_start(&self, collection: &CollectionSpec);

    /// Cleared collections over configured collections, in `0.0..=1.0`.
    fn on_progress(&self, fraction: f64);

    fn on_complete(&self, collection: &CollectionSpec, count: usize);

    fn on_error(&self, collection: &CollectionSpec, cause: &ClientError);

    fn on_finished(&self, summary: &WorkflowSummary);
}

/// Fan a notification out to two sinks, first then second.
impl<A: ProgressSink, B: ProgressSink> ProgressSink for (A, B) {
    fn on_start(&self, collection: &CollectionSpec) {
        self.0.on_start(collection);
        self.1.on_start(collection);
    }

    fn on_progress(&self, fraction: f64) {
        self.0.on_progress(fraction);
        self.1.on_progress(fraction);
    }

    fn on_complete(&self, collection: &CollectionSpec, count: usize) {
        self.0.on_complete(collection, count);
        self.1.on_complete(collection, count);
    }

    fn on_error(&self, collection: &CollectionSpec, cause: &ClientError) {
        self.0.on_error(collection, cause);
        self.1.on_error(collection, cause);
    }

    fn on_finished(&self, summary: &WorkflowSummary) {
        self.0.on_finished(summary);
        self.1.on_finished(summary);
    }
}

/// An absent sink ignores every notification.
impl<S: ProgressSink> ProgressSink for Option<S> {
    fn on_start(&self, collection: &CollectionSpec) {
        if let Some(sink) = self {
            sink.on_start(collection);
        }
    }

    fn on_progress(&self, fraction: f64) {
        if let Some(sink) = self {
            sink.on_progress(fraction);
        }
    }

    fn on_complete(&self, collection: &CollectionSpec, count: usize) {
        if let Some(sink) = self {
            sink.on_complete(collection, count);
        }
    }

    fn on_error(&self, collection: &CollectionSpec, cause: &ClientError) {
        if let Some(sink) = self {
            sink.on_error(collection, cause);
        }
    }

    fn on_finished(&self, summary: &WorkflowSummary) {
        if let Some(sink) = self {
            sink.on_finished(summary);
        }
    }
}

// =============================================================================
// CONSOLE
// =============================================================================

/// Writes one human-readable line per notification.
pub struct ConsoleSink<W> {
    out: Mutex<W>,
}

impl ConsoleSink<std::io::Stderr> {
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write + Send> ConsoleSink<W> {
    #[must_use]
    pub fn new(out: W) -> Self {
        Self { out: Mutex::new(out) }
    }

    /// Consume the sink and hand back the writer.
    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn line(&self, text: &str) {
        if let Ok(mut out) = self.out.lock() {
            // Write errors are ignored.
            let _ = writeln!(out, "{text}");
        }
    }
}

impl<W: Write + Send> ProgressSink for ConsoleSink<W> {
    fn on_start(&self, collection: &CollectionSpec) {
        self.line(&format!("[{}] clearing {} ({})", collection.name, collection.label, collection.endpoint));
    }

    fn on_progress(&self, fraction: f64) {
        self.line(&format!("progress: {:.0}%", fraction * 100.0));
    }

    fn on_complete(&self, collection: &CollectionSpec, count: usize) {
        self.line(&format!("[{}] cleared {count} records", collection.name));
    }

    fn on_error(&self, collection: &CollectionSpec, cause: &ClientError) {
        self.line(&format!("[{}] failed: {cause} ({})", collection.name, cause.error_code()));
    }

    fn on_finished(&self, summary: &WorkflowSummary) {
        self.line(&summary.headline());
    }
}

// =============================================================================
// TRACING
// =============================================================================

/// Mirrors notifications into structured `tracing` events.
pub struct TracingSink;

impl ProgressSink for TracingSink {
    fn on_start(&self, collection: &CollectionSpec) {
        info!(collection = %collection.name, endpoint = %collection.endpoint, "clearing collection");
    }

    fn on_progress(&self, fraction: f64) {
        info!(fraction, "sweep progress");
    }

    fn on_complete(&self, collection: &CollectionSpec, count: usize) {
        info!(collection = %collection.name, count, "collection cleared");
    }

    fn on_error(&self, collection: &CollectionSpec, cause: &ClientError) {
        warn!(
            collection = %collection.name,
            error = %cause,
            code = cause.error_code(),
            retryable = cause.retryable(),
            "collection failed; continuing with next collection"
        );
    }

    fn on_finished(&self, summary: &WorkflowSummary) {
        let total = summary.outcomes().len();
        let cleared = summary.cleared_count();
        let records_deleted = summary.records_deleted();
        match summary.status() {
            RunStatus::Succeeded => info!(total, cleared, records_deleted, "sweep finished"),
            RunStatus::PartiallyFailed | RunStatus::Failed => {
                warn!(total, cleared, records_deleted, status = ?summary.status(), "sweep finished with failures");
            }
        }
    }
}

#[cfg(test)]
#[path = "sink_test.rs"]
mod tests;
