//! Descriptors for the CMS object collections the sweeper clears.
//!
//! The list is built once at startup and handed to the workflow by value.
//! Nothing mutates it afterwards.

use serde::Serialize;

/// One remote collection of CMS-managed records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionSpec {
    /// Unique key, used in logs and summaries.
    pub name: String,
    /// Base resource path, always ending in `/` (e.g. `/o/c/quests/`).
    pub endpoint: String,
    /// Human-readable label for console output.
    pub label: String,
}

impl CollectionSpec {
    #[must_use]
    pub fn new(name: impl Into<String>, endpoint: impl Into<String>, label: impl Into<String>) -> Self {
        let mut endpoint = endpoint.into();
        if !endpoint.ends_with('/') {
            endpoint.push('/');
        }
        Self { name: name.into(), endpoint, label: label.into() }
    }
}

/// The fixed collection list, in the order they are cleared.
#[must_use]
pub fn default_collections() -> Vec<CollectionSpec> {
    vec![
        CollectionSpec::new("quests", "/o/c/quests/", "Quests"),
        CollectionSpec::new("inventoryitems", "/o/c/inventoryitems/", "Inventory Items"),
        CollectionSpec::new("playeractions", "/o/c/playeractions/", "Player Actions"),
        CollectionSpec::new("characters", "/o/c/characters/", "Characters"),
    ]
}

#[cfg(test)]
#[path = "collections_test.rs"]
mod tests;
