//! Stable machine-readable codes for errors that reach the operator.

/// Errors that surface in summaries carry a stable code alongside their
/// display message.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    /// Whether a fresh attempt could plausibly succeed. Informational only;
    /// nothing in the sweeper retries on its own.
    fn retryable(&self) -> bool {
        false
    }
}
