//! Read-only inspection: how many records would a sweep delete right now.

use serde::Serialize;

use crate::client::{ClientError, RemoteCollectionClient};
use crate::collections::CollectionSpec;
use crate::error::ErrorCode;

#[derive(Debug, Serialize)]
pub struct ScanEntry<'a> {
    pub name: &'a str,
    pub endpoint: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ScanEntry<'_> {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.count.is_some()
    }
}

/// List each collection in order and count its first page. Never deletes.
pub async fn scan_collections<'a>(
    client: &dyn RemoteCollectionClient,
    collections: &'a [CollectionSpec],
) -> Vec<ScanEntry<'a>> {
    let mut entries = Vec::with_capacity(collections.len());
    for collection in collections {
        let listing: Result<usize, ClientError> = client.list_ids(collection).await.map(|ids| ids.len());
        let entry = match listing {
            Ok(count) => ScanEntry {
                name: &collection.name,
                endpoint: &collection.endpoint,
                count: Some(count),
                error_code: None,
                message: None,
            },
            Err(e) => {
                tracing::debug!(collection = %collection.name, error = %e, "scan failed");
                ScanEntry {
                    name: &collection.name,
                    endpoint: &collection.endpoint,
                    count: None,
                    error_code: Some(e.error_code()),
                    message: Some(e.to_string()),
                }
            }
        };
        entries.push(entry);
    }
    entries
}

#[cfg(test)]
#[path = "scan_test.rs"]
mod tests;
