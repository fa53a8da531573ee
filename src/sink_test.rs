use super::*;
use crate::workflow::summary::{ClearResult, CollectionOutcome};

fn quests() -> CollectionSpec {
    CollectionSpec::new("quests", "/o/c/quests/", "Quests")
}

fn console_output(drive: impl FnOnce(&ConsoleSink<Vec<u8>>)) -> String {
    let sink = ConsoleSink::new(Vec::new());
    drive(&sink);
    String::from_utf8(sink.into_inner()).unwrap()
}

#[test]
fn console_reports_start_and_completion() {
    let out = console_output(|sink| {
        sink.on_start(&quests());
        sink.on_complete(&quests(), 3);
    });
    assert_eq!(out, "[quests] clearing Quests (/o/c/quests/)\n[quests] cleared 3 records\n");
}

#[test]
fn console_reports_error_with_code() {
    let out = console_output(|sink| sink.on_error(&quests(), &ClientError::Http { status: 500 }));
    assert_eq!(out, "[quests] failed: HTTP status 500 (E_HTTP_STATUS)\n");
}

#[test]
fn console_renders_progress_as_percent() {
    let out = console_output(|sink| {
        sink.on_progress(0.25);
        sink.on_progress(1.0);
    });
    assert_eq!(out, "progress: 25%\nprogress: 100%\n");
}

#[test]
fn console_finishes_with_headline() {
    let summary = WorkflowSummary::new(vec![CollectionOutcome { collection: quests(), result: ClearResult::Cleared(2) }]);
    let out = console_output(|sink| sink.on_finished(&summary));
    assert_eq!(out, "sweep complete: 1/1 collections cleared, 2 records deleted\n");
}

#[test]
fn pair_notifies_both_sinks_in_order() {
    let pair = (ConsoleSink::new(Vec::new()), ConsoleSink::new(Vec::new()));
    pair.on_complete(&quests(), 1);
    let (first, second) = pair;
    assert_eq!(String::from_utf8(first.into_inner()).unwrap(), "[quests] cleared 1 records\n");
    assert_eq!(String::from_utf8(second.into_inner()).unwrap(), "[quests] cleared 1 records\n");
}

#[test]
fn absent_sink_half_stays_silent() {
    let pair = (ConsoleSink::new(Vec::new()), None::<ConsoleSink<Vec<u8>>>);
    pair.on_start(&quests());
    pair.on_complete(&quests(), 2);
    let (console, absent) = pair;
    assert!(absent.is_none());
    assert_eq!(
        String::from_utf8(console.into_inner()).unwrap(),
        "[quests] clearing Quests (/o/c/quests/)\n[quests] cleared 2 records\n"
    );
}

#[test]
fn present_optional_sink_forwards() {
    let sink = Some(ConsoleSink::new(Vec::new()));
    sink.on_error(&quests(), &ClientError::Http { status: 503 });
    let out = String::from_utf8(sink.map(ConsoleSink::into_inner).unwrap_or_default()).unwrap();
    assert_eq!(out, "[quests] failed: HTTP status 503 (E_HTTP_STATUS)\n");
}
