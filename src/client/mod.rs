//! Client: the remote side of a sweep.
//!
//! DESIGN
//! ======
//! The workflow only sees [`RemoteCollectionClient`]. [`cms::CmsClient`] is
//! the production implementation over the CMS headless REST API; tests
//! substitute scripted mocks. Timeouts live here, not in the workflow.

pub mod cms;
pub mod types;

pub use cms::CmsClient;
pub use types::{ClientError, RecordId};

use crate::collections::CollectionSpec;

/// Async access to one CMS's object collections. Enables mocking in tests.
#[async_trait::async_trait]
pub trait RemoteCollectionClient: Send + Sync {
    /// Fetch the identifiers of the first page of records in `collection`.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] on transport failure, a non-2xx status, or
    /// an undecodable page body.
    async fn list_ids(&self, collection: &CollectionSpec) -> Result<Vec<RecordId>, ClientError>;

    /// Delete every record in `ids` with a single bulk request.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] on transport failure or a non-2xx status.
    async fn batch_delete(&self, collection: &CollectionSpec, ids: &[RecordId]) -> Result<(), ClientError>;
}
