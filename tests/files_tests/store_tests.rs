//! Tests for FileStore
//!
//! These tests verify:
//! - Root creation
//! - One-shot directory creation per id
//! - Byte-exact copies
//! - Recursive removal and id discovery

use std::fs;
use std::io::{Cursor, Read};

use docdb::files::FileStore;
use docdb::DocDbError;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_files() -> (TempDir, FileStore) {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::open(&temp_dir.path().join("files")).unwrap();
    (temp_dir, store)
}

// =============================================================================
// Open Tests
// =============================================================================

#[test]
fn test_open_creates_root() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("a").join("b");

    let store = FileStore::open(&root).unwrap();

    assert!(root.is_dir());
    assert_eq!(store.root(), root.as_path());
}

#[test]
fn test_open_existing_root_keeps_content() {
    let (temp, store) = setup_temp_files();
    store.write(1, "a.txt", &mut Cursor::new(b"a")).unwrap();

    let reopened = FileStore::open(&temp.path().join("files")).unwrap();

    assert!(reopened.exists(1));
}

// =============================================================================
// Write Tests
// =============================================================================

#[test]
fn test_write_copies_all_bytes() {
    let (_temp, store) = setup_temp_files();
    let content = vec![7u8; 100_000];

    let copied = store.write(3, "big.bin", &mut Cursor::new(&content)).unwrap();

    assert_eq!(copied, 100_000);
    assert_eq!(fs::read(store.file_path(3, "big.bin")).unwrap(), content);
}

#[test]
fn test_write_empty_source() {
    let (_temp, store) = setup_temp_files();

    let copied = store.write(1, "empty.txt", &mut Cursor::new(Vec::new())).unwrap();

    assert_eq!(copied, 0);
    assert!(store.file_path(1, "empty.txt").is_file());
}

#[test]
fn test_write_existing_directory_fails() {
    let (_temp, store) = setup_temp_files();
    store.write(1, "a.txt", &mut Cursor::new(b"first")).unwrap();

    let err = store
        .write(1, "b.txt", &mut Cursor::new(b"second"))
        .unwrap_err();

    assert!(matches!(err, DocDbError::AlreadyExists(ref p) if p == &store.dir_path(1)));
    assert_eq!(fs::read(store.file_path(1, "a.txt")).unwrap(), b"first");
    assert!(!store.file_path(1, "b.txt").exists());
}

// =============================================================================
// Open File Tests
// =============================================================================

#[test]
fn test_open_file_reads_back() {
    let (_temp, store) = setup_temp_files();
    store.write(2, "a.txt", &mut Cursor::new(b"hello")).unwrap();

    let mut buf = String::new();
    store
        .open_file(2, "a.txt")
        .unwrap()
        .read_to_string(&mut buf)
        .unwrap();

    assert_eq!(buf, "hello");
}

#[test]
fn test_open_file_missing() {
    let (_temp, store) = setup_temp_files();

    let err = store.open_file(2, "a.txt").unwrap_err();

    assert!(matches!(err, DocDbError::NotFound(2)));
}

// =============================================================================
// Remove / Listing Tests
// =============================================================================

#[test]
fn test_remove_all_then_rewrite() {
    let (_temp, store) = setup_temp_files();
    store.write(1, "a.txt", &mut Cursor::new(b"a")).unwrap();

    store.remove_all(1).unwrap();
    assert!(!store.exists(1));

    store.write(1, "b.txt", &mut Cursor::new(b"b")).unwrap();
    assert_eq!(store.entry_count(1).unwrap(), 1);
}

#[test]
fn test_remove_all_missing_is_ok() {
    let (_temp, store) = setup_temp_files();

    store.remove_all(404).unwrap();
    assert_eq!(store.entry_count(404).unwrap(), 0);
}

#[test]
fn test_list_ids_sorted_numeric_dirs_only() {
    let (_temp, store) = setup_temp_files();
    for id in [10, 2, 1] {
        store.write(id, "x", &mut Cursor::new(b"x")).unwrap();
    }
    fs::create_dir(store.root().join("tmp")).unwrap();
    fs::write(store.root().join("5"), b"a file, not a dir").unwrap();

    assert_eq!(store.list_ids().unwrap(), vec![1, 2, 10]);
}
