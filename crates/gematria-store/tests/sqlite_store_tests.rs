// Integration tests for SqliteEntryStore against on-disk databases
// Covers reconciliation through SQLite, schema probing and concurrent writers

use gematria_core::errors::ExErrorKind;
use gematria_core::model::NewEntry;
use gematria_core::ops::EntryStore;
use gematria_core::reconcile::{ReconcileReport, Reconciler};
use gematria_store::SqliteEntryStore;
use std::path::Path;
use std::thread;
use tempfile::TempDir;

fn setup_file_store(dir: &TempDir) -> SqliteEntryStore {
    let store = SqliteEntryStore::open(dir.path().join("gematria.db")).unwrap();
    store.ensure_schema().unwrap();
    store
}

fn row(phrase: &str, value: i64) -> NewEntry {
    NewEntry {
        phrase: phrase.to_string(),
        value,
    }
}

#[test]
fn test_reconcile_round_trip() {
    let dir = TempDir::new().unwrap();
    let store = setup_file_store(&dir);

    let report = Reconciler::default()
        .reconcile(&store, &[row("א", 1), row("ב", 2), row("א", 3)])
        .unwrap();

    assert_eq!(
        report,
        ReconcileReport {
            requested: 3,
            unique: 2,
            upserted: 2
        }
    );
    assert_eq!(store.get_by_phrase("א").unwrap().unwrap().value, 3);
    assert_eq!(store.get_by_phrase("ב").unwrap().unwrap().value, 2);
}

#[test]
fn test_reconcile_in_chunks_persists_across_reopen() {
    let dir = TempDir::new().unwrap();
    let batch: Vec<NewEntry> = (1..=45).map(|i| row(&"ש".repeat(i), i as i64)).collect();

    {
        let store = setup_file_store(&dir);
        let report = Reconciler::with_chunk_size(10)
            .unwrap()
            .reconcile(&store, &batch)
            .unwrap();
        assert_eq!(report.upserted, 45);
    }

    let reopened = SqliteEntryStore::open(dir.path().join("gematria.db")).unwrap();
    assert_eq!(reopened.count().unwrap(), 45);
    assert_eq!(reopened.get_by_phrase("ששש").unwrap().unwrap().value, 3);
}

#[test]
fn test_reconcile_never_deletes() {
    let dir = TempDir::new().unwrap();
    let store = setup_file_store(&dir);
    store.insert(&row("קדם", 144)).unwrap();

    Reconciler::default()
        .reconcile(&store, &[row("אב", 3)])
        .unwrap();

    assert_eq!(store.count().unwrap(), 2);
    assert!(store.get_by_phrase("קדם").unwrap().is_some());
}

#[test]
fn test_reconcile_without_table_is_schema_missing() {
    let dir = TempDir::new().unwrap();
    let store = SqliteEntryStore::open(dir.path().join("empty.db")).unwrap();

    let err = Reconciler::default()
        .reconcile(&store, &[row("אב", 3)])
        .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::SchemaMissing);
    assert_eq!(err.chunk_index(), Some(0));
    assert_eq!(err.rows_committed(), Some(0));
}

#[test]
fn test_open_in_missing_directory_is_unavailable() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("no-such-dir").join("gematria.db");

    let err = SqliteEntryStore::open(&path).err().unwrap();
    assert_eq!(err.kind(), ExErrorKind::StoreUnavailable);
}

#[test]
fn test_open_url_with_sqlite_scheme() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("url.db");
    let url = format!("sqlite://{}", path.display());

    let store = SqliteEntryStore::open_url(&url).unwrap();
    store.ensure_schema().unwrap();
    store.insert(&row("אב", 3)).unwrap();

    assert!(Path::new(&path).exists());
}

#[test]
fn test_concurrent_reconcilers_on_separate_connections() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gematria.db");
    setup_file_store(&dir);

    thread::scope(|s| {
        for worker in 0..4i64 {
            let path = &path;
            s.spawn(move || {
                let store = SqliteEntryStore::open(path).unwrap();
                let batch: Vec<NewEntry> = (0..50)
                    .map(|i| row(&format!("{}{}", "א".repeat(i % 10 + 1), "ב".repeat(i / 10)), worker))
                    .collect();
                Reconciler::with_chunk_size(7)
                    .unwrap()
                    .reconcile(&store, &batch)
                    .unwrap();
            });
        }
    });

    let store = SqliteEntryStore::open(&path).unwrap();
    assert_eq!(store.count().unwrap(), 50);

    // One row per phrase, value from whichever worker wrote it last
    let total: usize = (0..4)
        .map(|v| store.list_by_value(v, 1000).unwrap().len())
        .sum();
    assert_eq!(total, 50);
}
