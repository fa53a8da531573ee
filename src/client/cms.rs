//! CMS headless REST client.
//!
//! Thin HTTP wrapper over the object collection endpoints:
//! `GET {endpoint}?fields=id&pageSize=100` and `DELETE {endpoint}batch`.
//! Pure parsing in `parse_page` for testability.
//!
//! Only the first page is read. When the CMS reports more pages, the
//! remainder stays behind and a warning is logged so the operator can run
//! the sweep again.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, COOKIE, HeaderMap, HeaderValue};
use tracing::{debug, warn};

use super::RemoteCollectionClient;
use super::types::{ClientError, RecordId};
use crate::collections::CollectionSpec;
use crate::config::{ClientConfig, PAGE_SIZE};

const APPLICATION_JSON: &str = "application/json";

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("invalid session cookie header: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    #[error("HTTP client build failed: {0}")]
    Http(#[from] reqwest::Error),
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct CmsClient {
    http: reqwest::Client,
    base_url: String,
}

impl CmsClient {
    /// Build a client for the configured CMS. The session cookie, when
    /// present, is attached to every request.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if the cookie is not a valid header value or
    /// the HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, BuildError> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = &config.session_cookie {
            let mut value = HeaderValue::from_str(cookie)?;
            value.set_sensitive(true);
            headers.insert(COOKIE, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()?;
        Ok(Self { http, base_url: config.base_url.clone() })
    }

    fn list_url(&self, collection: &CollectionSpec) -> String {
        format!("{}{}?fields=id&pageSize={PAGE_SIZE}", self.base_url, collection.endpoint)
    }

    fn batch_url(&self, collection: &CollectionSpec) -> String {
        format!("{}{}batch", self.base_url, collection.endpoint)
    }
}

#[async_trait::async_trait]
impl RemoteCollectionClient for CmsClient {
    async fn list_ids(&self, collection: &CollectionSpec) -> Result<Vec<RecordId>, ClientError> {
        let response = self
            .http
            .get(self.list_url(collection))
            .header(ACCEPT, APPLICATION_JSON)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Http { status: status.as_u16() });
        }

        let text = response.text().await?;
        let page = parse_page(&text)?;
        if page.last_page.is_some_and(|last| last > 1) {
            warn!(
                collection = %collection.name,
                total_count = page.total_count,
                page_size = PAGE_SIZE,
                "collection has more than one page; only the first page will be deleted"
            );
        }
        debug!(collection = %collection.name, ids = page.ids.len(), "listed record ids");
        Ok(page.ids)
    }

    async fn batch_delete(&self, collection: &CollectionSpec, ids: &[RecordId]) -> Result<(), ClientError> {
        let body: Vec<BatchItem<'_>> = ids.iter().map(|id| BatchItem { id }).collect();

        let response = self
            .http
            .delete(self.batch_url(collection))
            .header(ACCEPT, APPLICATION_JSON)
            .header(CONTENT_TYPE, APPLICATION_JSON)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Http { status: status.as_u16() });
        }
        debug!(collection = %collection.name, ids = ids.len(), status = status.as_u16(), "batch delete accepted");
        Ok(())
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(serde::Serialize)]
struct BatchItem<'a> {
    id: &'a RecordId,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiPage {
    items: Vec<ApiItem>,
    last_page: Option<u64>,
    total_count: Option<u64>,
}

#[derive(serde::Deserialize)]
struct ApiItem {
    id: RecordId,
}

#[derive(Debug, PartialEq, Eq)]
struct IdPage {
    ids: Vec<RecordId>,
    last_page: Option<u64>,
    total_count: Option<u64>,
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_page(json: &str) -> Result<IdPage, ClientError> {
    let page: ApiPage = serde_json::from_str(json).map_err(|e| ClientError::Decode(e.to_string()))?;
    Ok(IdPage {
        ids: page.items.into_iter().map(|item| item.id).collect(),
        last_page: page.last_page,
        total_count: page.total_count,
    })
}

#[cfg(test)]
#[path = "cms_test.rs"]
mod tests;
