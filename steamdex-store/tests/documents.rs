use std::fs;

use steamdex_core::{GameRecord, InvalidGameRecord};
use steamdex_store::*;

fn record(id: u32, name: &str) -> GameRecord {
    GameRecord {
        id,
        name: name.to_string(),
        ..GameRecord::default()
    }
}

#[test]
fn absent_file_loads_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let doc: JsonFile<Vec<GameRecord>> = JsonFile::new(dir.path().join("missing.json"));
    assert!(doc.load().unwrap().is_none());
    assert!(doc.load_or_default().unwrap().is_empty());
}

#[test]
fn empty_file_loads_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.json");
    fs::write(&path, "  \n").unwrap();
    let doc: JsonFile<Vec<GameRecord>> = JsonFile::new(&path);
    assert!(doc.load().unwrap().is_none());
}

#[test]
fn corrupt_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "[{\"ID\": 1,").unwrap();
    let doc: JsonFile<Vec<GameRecord>> = JsonFile::new(&path);
    assert!(matches!(doc.load(), Err(StoreError::Corrupt { .. })));
}

#[test]
fn save_creates_parent_dirs_and_leaves_no_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("games.json");
    let doc: JsonFile<Vec<GameRecord>> = JsonFile::new(&path);
    doc.save(&vec![record(10, "Ünïcode Quest")]).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("\"ID\": 10"));
    assert!(written.contains("Ünïcode Quest"));
    assert!(!dir.path().join("nested").join("games.json.tmp").exists());

    assert_eq!(doc.load().unwrap().unwrap()[0].name, "Ünïcode Quest");
}

#[test]
fn remove_reports_whether_file_existed() {
    let dir = tempfile::tempdir().unwrap();
    let doc: JsonFile<Vec<InvalidGameRecord>> = JsonFile::new(dir.path().join("inv.json"));
    assert!(!doc.remove().unwrap());
    doc.save(&vec![InvalidGameRecord::placeholder(1)]).unwrap();
    assert!(doc.remove().unwrap());
    assert!(doc.load().unwrap().is_none());
}

#[test]
fn memory_document_round_trip() {
    let doc: MemoryDocument<Vec<GameRecord>> = MemoryDocument::new("valid");
    assert!(doc.load().unwrap().is_none());
    doc.save(&vec![record(1, "A")]).unwrap();
    assert_eq!(doc.load().unwrap().unwrap().len(), 1);
    assert!(doc.remove().unwrap());
    assert!(!doc.remove().unwrap());
    assert_eq!(doc.location(), "memory:valid");
}

#[test]
fn stores_in_dir_use_catalog_file_names() {
    let dir = tempfile::tempdir().unwrap();
    let stores = CatalogStores::in_dir(dir.path());
    stores.valid.save(&vec![record(1, "A")]).unwrap();
    stores.staged_invalid.save(&vec![]).unwrap();

    assert!(dir.path().join("detailed_games_actual.json").exists());
    assert!(dir.path().join("staging").join("invalid_games.json").exists());
    assert!(stores.has_leftover_staging().unwrap());
}

#[test]
fn snapshot_reads_disk_but_never_writes_it() {
    let dir = tempfile::tempdir().unwrap();
    CatalogStores::in_dir(dir.path())
        .valid
        .save(&vec![record(1, "A")])
        .unwrap();

    let snapshot = CatalogStores::snapshot_of(dir.path()).unwrap();
    assert_eq!(snapshot.valid.load_or_default().unwrap().len(), 1);
    snapshot.valid.save(&vec![]).unwrap();

    let on_disk = CatalogStores::in_dir(dir.path());
    assert_eq!(on_disk.valid.load_or_default().unwrap().len(), 1);
}

#[test]
fn known_ids_union_and_delta() {
    let stores = CatalogStores::in_memory();
    stores.valid.save(&vec![record(10, "A"), record(30, "C")]).unwrap();
    stores
        .invalid
        .save(&vec![InvalidGameRecord::placeholder(20)])
        .unwrap();

    let known = known_ids(&stores, true).unwrap();
    assert_eq!(compute_delta([40, 30, 20, 10, 5], &known), vec![5, 40]);

    let without_invalid = known_ids(&stores, false).unwrap();
    assert_eq!(compute_delta([40, 30, 20, 10, 5], &without_invalid), vec![5, 20, 40]);
}

#[test]
fn known_ids_fail_on_corrupt_store() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("invalid_games_actual.json"), "not json").unwrap();
    let stores = CatalogStores::in_dir(dir.path());
    assert!(matches!(known_ids(&stores, true), Err(StoreError::Corrupt { .. })));
    assert!(known_ids(&stores, false).unwrap().is_empty());
}

#[test]
fn lock_is_exclusive_and_released_on_drop() {
    let dir = tempfile::tempdir().unwrap();
    let lock = StoreLock::acquire(dir.path()).unwrap();
    assert!(lock.path().exists());
    assert!(matches!(StoreLock::acquire(dir.path()), Err(StoreError::Locked(_))));

    drop(lock);
    assert!(!dir.path().join(".steamdex.lock").exists());
    let _again = StoreLock::acquire(dir.path()).unwrap();
}

#[test]
fn stale_lock_can_be_broken() {
    let dir = tempfile::tempdir().unwrap();
    let lock = StoreLock::acquire(dir.path()).unwrap();
    std::mem::forget(lock);

    assert!(StoreLock::break_stale(dir.path()).unwrap());
    assert!(!StoreLock::break_stale(dir.path()).unwrap());
    let _lock = StoreLock::acquire(dir.path()).unwrap();
}
