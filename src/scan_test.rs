use super::*;
use crate::client::RecordId;
use crate::collections::default_collections;
use std::sync::Mutex;

struct ListOnlyClient {
    deletes: Mutex<usize>,
}

#[async_trait::async_trait]
impl RemoteCollectionClient for ListOnlyClient {
    async fn list_ids(&self, collection: &CollectionSpec) -> Result<Vec<RecordId>, ClientError> {
        match collection.name.as_str() {
            "characters" => Err(ClientError::Http { status: 401 }),
            "quests" => Ok(vec![RecordId::Numeric(1), RecordId::Numeric(2)]),
            _ => Ok(Vec::new()),
        }
    }

    async fn batch_delete(&self, _collection: &CollectionSpec, _ids: &[RecordId]) -> Result<(), ClientError> {
        *self.deletes.lock().unwrap() += 1;
        Ok(())
    }
}

#[tokio::test]
async fn scan_counts_each_collection_without_deleting() {
    let client = ListOnlyClient { deletes: Mutex::new(0) };
    let collections = default_collections();

    let entries = scan_collections(&client, &collections).await;

    let names: Vec<_> = entries.iter().map(|e| e.name).collect();
    assert_eq!(names, ["quests", "inventoryitems", "playeractions", "characters"]);
    assert_eq!(entries[0].count, Some(2));
    assert_eq!(entries[1].count, Some(0));
    assert!(!entries[3].is_ok());
    assert_eq!(entries[3].error_code, Some("E_HTTP_STATUS"));
    assert_eq!(*client.deletes.lock().unwrap(), 0);
}

#[tokio::test]
async fn scan_entries_serialize_compactly() {
    let client = ListOnlyClient { deletes: Mutex::new(0) };
    let collections = default_collections();

    let entries = scan_collections(&client, &collections).await;
    let json = serde_json::to_value(&entries).unwrap();

    assert_eq!(json[0], serde_json::json!({ "name": "quests", "endpoint": "/o/c/quests/", "count": 2 }));
    assert_eq!(json[3]["message"], "HTTP status 401");
    assert!(json[3].get("count").is_none());
}
