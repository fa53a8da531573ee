use super::*;
use crate::client::{ClientError, RecordId};
use std::io::Cursor;
use std::sync::Mutex;

// =========================================================================
// MockClient
// =========================================================================

/// Every collection lists two records; `failing` collections answer 500.
#[derive(Default)]
struct MockClient {
    failing: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl MockClient {
    fn failing(name: &str) -> Self {
        Self { failing: vec![name.into()], ..Self::default() }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl RemoteCollectionClient for MockClient {
    async fn list_ids(&self, collection: &CollectionSpec) -> Result<Vec<RecordId>, ClientError> {
        self.calls.lock().unwrap().push(format!("list {}", collection.name));
        if self.failing.contains(&collection.name) {
            return Err(ClientError::Http { status: 500 });
        }
        Ok(vec![RecordId::Numeric(1), RecordId::Numeric(2)])
    }

    async fn batch_delete(&self, collection: &CollectionSpec, ids: &[RecordId]) -> Result<(), ClientError> {
        self.calls.lock().unwrap().push(format!("delete {} x{}", collection.name, ids.len()));
        Ok(())
    }
}

const BASE: &str = "http://cms.test";

async fn clear_with_answers(
    answers: &str,
    client: &MockClient,
    skip_confirm: bool,
) -> (Result<WorkflowSummary, CliError>, String) {
    let mut input = Cursor::new(answers);
    let mut prompts = Vec::new();
    let sink = ConsoleSink::new(Vec::new());
    let result = confirm_and_clear(&mut input, &mut prompts, client, &sink, default_collections(), BASE, skip_confirm).await;
    (result, String::from_utf8(prompts).unwrap())
}

// =========================================================================
// confirm_and_clear
// =========================================================================

#[tokio::test]
async fn declining_sends_no_requests() {
    let client = MockClient::default();
    let (result, prompts) = clear_with_answers("n\n", &client, false).await;

    assert!(matches!(result, Err(CliError::Declined)));
    assert!(client.calls().is_empty());
    assert!(prompts.contains(BASE));
}

#[tokio::test]
async fn declining_second_prompt_sends_no_requests() {
    let client = MockClient::default();
    let (result, _) = clear_with_answers("y\nn\n", &client, false).await;

    assert!(matches!(result, Err(CliError::Declined)));
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn confirming_twice_clears_every_collection() {
    let client = MockClient::default();
    let (result, _) = clear_with_answers("y\ny\n", &client, false).await;

    let summary = result.unwrap();
    assert_eq!(summary.status(), RunStatus::Succeeded);
    assert_eq!(summary.records_deleted(), 8);
    assert_eq!(client.calls().len(), 8);
    assert!(ensure_succeeded(&summary).is_ok());
}

#[tokio::test]
async fn yes_flag_skips_prompts() {
    let client = MockClient::default();
    let (result, prompts) = clear_with_answers("", &client, true).await;

    assert!(result.is_ok());
    assert!(prompts.is_empty());
    assert_eq!(client.calls().first().map(String::as_str), Some("list quests"));
}

#[tokio::test]
async fn partial_failure_is_unsuccessful() {
    let client = MockClient::failing("inventoryitems");
    let (result, _) = clear_with_answers("y\ny\n", &client, false).await;

    let summary = result.unwrap();
    assert_eq!(summary.status(), RunStatus::PartiallyFailed);
    let err = ensure_succeeded(&summary).unwrap_err();
    assert!(matches!(err, CliError::Unsuccessful));
    assert_eq!(err.to_string(), "sweep did not fully succeed");
}

// =========================================================================
// operator_sink
// =========================================================================

#[test]
fn tracing_sink_only_when_verbose() {
    assert!(operator_sink(false).1.is_none());
    assert!(operator_sink(true).1.is_some());
}
