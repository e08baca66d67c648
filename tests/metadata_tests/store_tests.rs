//! Tests for MetadataStore
//!
//! These tests verify:
//! - Schema creation on open
//! - Insert/update/delete row semantics
//! - Sorting, pagination and substring search
//! - Values are bound, not spliced into SQL

use std::thread;
use std::time::Duration;

use docdb::config::{Config, JournalMode};
use docdb::metadata::MetadataStore;
use docdb::{DocDbError, SortColumn, SortOrder};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_store() -> (TempDir, MetadataStore) {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .db_path(temp_dir.path().join("docs.db"))
        .files_dir(temp_dir.path().join("files"))
        .build();
    let store = MetadataStore::open(&config).unwrap();
    (temp_dir, store)
}

fn ids(records: &[docdb::Record]) -> Vec<i64> {
    records.iter().map(|r| r.id).collect()
}

// =============================================================================
// Open Tests
// =============================================================================

#[test]
fn test_open_creates_database_file() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("deep").join("docs.db");
    let config = Config::builder().db_path(&db_path).build();

    let store = MetadataStore::open(&config).unwrap();

    assert!(db_path.exists());
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn test_open_with_wal_journal() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .db_path(temp_dir.path().join("docs.db"))
        .journal_mode(JournalMode::Wal)
        .build();

    let store = MetadataStore::open(&config).unwrap();
    store.insert("a.txt").unwrap();

    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn test_reopen_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .db_path(temp_dir.path().join("docs.db"))
        .build();

    {
        let store = MetadataStore::open(&config).unwrap();
        store.insert("a.txt").unwrap();
        store.close().unwrap();
    }

    let store = MetadataStore::open(&config).unwrap();
    assert_eq!(store.count().unwrap(), 1);
    assert_eq!(store.insert("b.txt").unwrap(), 2);
}

// =============================================================================
// Mutation Tests
// =============================================================================

#[test]
fn test_insert_then_find_one() {
    let (_temp, store) = setup_temp_store();

    let id = store.insert("a.txt").unwrap();
    let record = store.find_one(id).unwrap();

    assert_eq!(record.id, id);
    assert_eq!(record.name, "a.txt");
    assert_eq!(record.created_at, record.updated_at);
}

#[test]
fn test_find_one_missing() {
    let (_temp, store) = setup_temp_store();

    let err = store.find_one(5).unwrap_err();

    assert!(matches!(err, DocDbError::NotFound(5)));
}

#[test]
fn test_update_name_advances_updated_at_only() {
    let (_temp, store) = setup_temp_store();
    let id = store.insert("a.txt").unwrap();
    let before = store.find_one(id).unwrap();

    thread::sleep(Duration::from_millis(20));
    store.update_name(id, "b.txt").unwrap();
    let after = store.find_one(id).unwrap();

    assert_eq!(after.name, "b.txt");
    assert_eq!(after.created_at, before.created_at);
    assert!(after.updated_at > before.updated_at);
}

#[test]
fn test_update_name_missing_id_is_silent() {
    let (_temp, store) = setup_temp_store();

    store.update_name(3, "x.txt").unwrap();

    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn test_delete_row() {
    let (_temp, store) = setup_temp_store();
    let id = store.insert("a.txt").unwrap();

    store.delete(id).unwrap();
    store.delete(id).unwrap();

    assert!(store.find_one(id).unwrap_err().is_not_found());
}

#[test]
fn test_quotes_in_names_are_stored_verbatim() {
    let (_temp, store) = setup_temp_store();
    let hostile = "x'); DROP TABLE docs; --.txt";

    let id = store.insert(hostile).unwrap();

    assert_eq!(store.find_one(id).unwrap().name, hostile);
    assert_eq!(store.count().unwrap(), 1);
}

// =============================================================================
// Query Tests
// =============================================================================

#[test]
fn test_find_all_sorted_by_each_column() {
    let (_temp, store) = setup_temp_store();
    for name in ["b.txt", "c.txt", "a.txt"] {
        store.insert(name).unwrap();
    }

    let by_id = store.find_all(SortColumn::Id, SortOrder::Asc).unwrap();
    assert_eq!(ids(&by_id), vec![1, 2, 3]);

    let by_name = store.find_all(SortColumn::Name, SortOrder::Asc).unwrap();
    assert_eq!(ids(&by_name), vec![3, 1, 2]);

    let by_created_desc = store.find_all(SortColumn::CreatedAt, SortOrder::Desc).unwrap();
    assert_eq!(by_created_desc.len(), 3);
    assert!(by_created_desc
        .windows(2)
        .all(|w| w[0].created_at >= w[1].created_at));
}

#[test]
fn test_find_many_windows() {
    let (_temp, store) = setup_temp_store();
    for i in 0..5 {
        store.insert(&format!("doc{i}.txt")).unwrap();
    }

    assert_eq!(
        ids(&store.find_many(2, 1, SortColumn::Id, SortOrder::Asc).unwrap()),
        vec![2, 3]
    );
    assert_eq!(
        ids(&store.find_many(2, 0, SortColumn::Id, SortOrder::Desc).unwrap()),
        vec![5, 4]
    );
    assert!(store
        .find_many(0, 0, SortColumn::Id, SortOrder::Asc)
        .unwrap()
        .is_empty());
}

#[test]
fn test_equal_names_fall_back_to_id_order() {
    let (_temp, store) = setup_temp_store();
    for _ in 0..3 {
        store.insert("same.txt").unwrap();
    }

    let desc = store.find_all(SortColumn::Name, SortOrder::Desc).unwrap();

    assert_eq!(ids(&desc), vec![1, 2, 3]);
}

#[test]
fn test_find_like_orders_by_id() {
    let (_temp, store) = setup_temp_store();
    store.insert("zeta.md").unwrap();
    store.insert("alpha.md").unwrap();
    store.insert("beta.txt").unwrap();

    let md = store.find_like(".md").unwrap();

    assert_eq!(ids(&md), vec![1, 2]);
}

#[test]
fn test_find_like_underscore_is_literal() {
    let (_temp, store) = setup_temp_store();
    store.insert("a_b.txt").unwrap();
    store.insert("axb.txt").unwrap();

    let found = store.find_like("a_b").unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "a_b.txt");
}

#[test]
fn test_find_like_is_case_sensitive() {
    let (_temp, store) = setup_temp_store();
    store.insert("Report.PDF").unwrap();
    store.insert("report.pdf").unwrap();

    assert_eq!(ids(&store.find_like("Report").unwrap()), vec![1]);
    assert_eq!(ids(&store.find_like("pdf").unwrap()), vec![2]);
    assert_eq!(ids(&store.find_like("eport").unwrap()), vec![1, 2]);
}
