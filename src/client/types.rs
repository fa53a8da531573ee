//! Record identifiers and the client error taxonomy.

use serde::{Deserialize, Serialize};

use crate::error::ErrorCode;

// =============================================================================
// RECORD ID
// =============================================================================

/// Identifier of a single remote record.
///
/// The CMS hands out numeric ids; string ids are accepted as well and sent
/// back exactly as received.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Numeric(i64),
    Text(String),
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Numeric(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self::Numeric(id)
    }
}

// =============================================================================
// ERROR
// =============================================================================

/// Failure of a single list or batch-delete call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a response (connect failure, timeout,
    /// unreadable body).
    #[error("transport error: {0}")]
    Transport(String),

    /// The CMS answered with a non-2xx status.
    #[error("HTTP status {status}")]
    Http { status: u16 },

    /// A 2xx list response whose body is not a page of items.
    #[error("response decode failed: {0}")]
    Decode(String),
}

impl ErrorCode for ClientError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "E_TRANSPORT",
            Self::Http { .. } => "E_HTTP_STATUS",
            Self::Decode(_) => "E_DECODE",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Http { status: 429 | 500..=599 })
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
