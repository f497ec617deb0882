// Lifecycle logging emitted by engine operations

use gematria_core::core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_CHUNK_INDEX, FIELD_ENTRY_ID, FIELD_ERR_CODE,
    FIELD_PHRASE, FIELD_REQUESTED, FIELD_UNIQUE, FIELD_UPSERTED, FIELD_VALUE,
};
use gematria_core::logging_facility::test_capture::{init_test_capture, CapturedEvent};
use gematria_core::model::NewEntry;
use gematria_core::ops::MemoryEntryStore;
use gematria_core::reconcile::Reconciler;
use gematria_engine::{
    apply_engine_command, apply_engine_query, EngineCommand, EngineCommandResult, EngineQuery,
};
use gematria_store::SqliteEntryStore;

fn field<'a>(event: &'a CapturedEvent, key: &str) -> Option<&'a str> {
    event.fields.get(key).map(String::as_str)
}

#[test]
fn test_command_logs_start_and_end() {
    let capture = init_test_capture();
    let store = MemoryEntryStore::new();

    apply_engine_command(
        EngineCommand::BulkUpsert {
            rows: vec![
                NewEntry::new("זט", 16),
                NewEntry::new("זט", 16),
                NewEntry::new("חי", 18),
            ],
        },
        &store,
        &Reconciler::default(),
    )
    .unwrap();

    capture.assert_event_exists("bulk_upsert", EVENT_START);
    capture.assert_event_exists("bulk_upsert", EVENT_END);

    let end = capture
        .events_for_op("bulk_upsert")
        .into_iter()
        .find(|e| {
            e.event.as_deref() == Some(EVENT_END)
                && field(e, FIELD_REQUESTED) == Some("3")
        })
        .unwrap();
    assert_eq!(field(&end, FIELD_UNIQUE), Some("2"));
    assert_eq!(field(&end, FIELD_UPSERTED), Some("2"));
    assert!(end.fields.contains_key("duration_ms"));
}

#[test]
fn test_create_logs_phrase_value_and_entry_id() {
    let capture = init_test_capture();
    let store = MemoryEntryStore::new();

    let result = apply_engine_command(
        EngineCommand::EntryCreate {
            phrase: "תשיב".to_string(),
            value: 712,
        },
        &store,
        &Reconciler::default(),
    )
    .unwrap();
    let EngineCommandResult::Created(entry) = result else {
        panic!("expected a created entry");
    };

    let start_events = capture.count_events(|e| {
        e.op.as_deref() == Some("entry_create")
            && e.event.as_deref() == Some(EVENT_START)
            && field(e, FIELD_PHRASE) == Some("תשיב")
            && field(e, FIELD_VALUE) == Some("712")
    });
    assert!(start_events >= 1);

    let entry_id = entry.id.to_string();
    let end_events = capture.count_events(|e| {
        e.op.as_deref() == Some("entry_create")
            && e.event.as_deref() == Some(EVENT_END)
            && field(e, FIELD_ENTRY_ID) == Some(entry_id.as_str())
    });
    assert!(end_events >= 1);
}

#[test]
fn test_failed_bulk_logs_chunk_index() {
    let capture = init_test_capture();
    // No table: the first chunk fails
    let store = SqliteEntryStore::open_in_memory().unwrap();

    apply_engine_command(
        EngineCommand::BulkUpsert {
            rows: vec![NewEntry::new("כט", 29)],
        },
        &store,
        &Reconciler::default(),
    )
    .unwrap_err();

    let error_events = capture.count_events(|e| {
        e.op.as_deref() == Some("bulk_upsert")
            && e.event.as_deref() == Some(EVENT_END_ERROR)
            && field(e, FIELD_ERR_CODE) == Some("ERR_SCHEMA_MISSING")
            && field(e, FIELD_CHUNK_INDEX) == Some("0")
    });
    assert!(error_events >= 1);
}

#[test]
fn test_failed_query_logs_error_code() {
    let capture = init_test_capture();
    let store = MemoryEntryStore::new();

    apply_engine_query(
        EngineQuery::EntryGetByPhrase {
            phrase: "לא קיים".to_string(),
        },
        &store,
    )
    .unwrap_err();

    capture.assert_event_exists("entry_get_by_phrase", EVENT_END_ERROR);
    let error_events = capture.count_events(|e| {
        e.op.as_deref() == Some("entry_get_by_phrase")
            && field(e, FIELD_ERR_CODE) == Some("ERR_NOT_FOUND")
    });
    assert!(error_events >= 1);
}
