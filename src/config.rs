//! Client configuration, validated once before any request is made.
//!
//! Raw values come from clap (flags with env fallbacks, after `.env` is
//! loaded by `dotenvy`). This module only normalises and checks them.

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Records fetched per list call. Only the first page is ever read.
pub const PAGE_SIZE: usize = 100;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid base URL `{0}`: expected http:// or https://")]
    InvalidBaseUrl(String),
    #[error("{field} must be greater than zero")]
    ZeroTimeout { field: &'static str },
    #[error("session cookie must not be empty")]
    EmptySessionCookie,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for ClientTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Scheme and authority of the CMS, without a trailing slash.
    pub base_url: String,
    /// Raw `Cookie` header value of an existing CMS session, forwarded as-is.
    pub session_cookie: Option<String>,
    pub timeouts: ClientTimeouts,
}

impl ClientConfig {
    /// Validate raw settings into a typed config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the base URL has no http(s) scheme, a
    /// timeout is zero, or the session cookie is blank.
    pub fn new(base_url: &str, session_cookie: Option<String>, timeouts: ClientTimeouts) -> Result<Self, ConfigError> {
        let base_url = base_url.trim().trim_end_matches('/');
        let has_host = base_url
            .strip_prefix("http://")
            .or_else(|| base_url.strip_prefix("https://"))
            .is_some_and(|rest| !rest.is_empty());
        if !has_host {
            return Err(ConfigError::InvalidBaseUrl(base_url.to_owned()));
        }

        if timeouts.request_secs == 0 {
            return Err(ConfigError::ZeroTimeout { field: "request timeout" });
        }
        if timeouts.connect_secs == 0 {
            return Err(ConfigError::ZeroTimeout { field: "connect timeout" });
        }

        let session_cookie = match session_cookie {
            Some(cookie) if cookie.trim().is_empty() => return Err(ConfigError::EmptySessionCookie),
            Some(cookie) => Some(cookie.trim().to_owned()),
            None => None,
        };

        Ok(Self { base_url: base_url.to_owned(), session_cookie, timeouts })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
