use mnemon_memory::{Journal, MemoryStore};
use std::path::PathBuf;
use tempfile::TempDir;

fn setup() -> (TempDir, PathBuf, PathBuf, Journal) {
    let dir = tempfile::tempdir().unwrap();
    let primary = dir.path().join("memory_store.txt");
    let mirror = dir.path().join("memory_backup.txt");
    let journal = Journal::new(dir.path().join("activity_log.txt"));
    (dir, primary, mirror, journal)
}

// ── Append & list ──────────────────────────────────────────────

#[test]
fn test_append_preserves_order() {
    let (_dir, primary, mirror, journal) = setup();
    let store = MemoryStore::open(&primary, &mirror, journal).unwrap();

    assert!(store.append("first").unwrap());
    assert!(store.append("second").unwrap());
    assert!(store.append("third").unwrap());

    assert_eq!(store.list(), vec!["first", "second", "third"]);
}

#[test]
fn test_whitespace_only_append_is_noop() {
    let (_dir, primary, mirror, journal) = setup();
    let store = MemoryStore::open(&primary, &mirror, journal).unwrap();

    store.append("real entry").unwrap();
    assert!(!store.append("").unwrap());
    assert!(!store.append("   \t ").unwrap());
    assert_eq!(store.count(), 1);
}

#[test]
fn test_embedded_newline_is_rejected() {
    let (_dir, primary, mirror, journal) = setup();
    let store = MemoryStore::open(&primary, &mirror, journal).unwrap();

    assert!(store.append("two\nlines").is_err());
    assert!(store.append("carriage\rreturn").is_err());
    assert_eq!(store.count(), 0);
    // Nothing leaked into the file either
    assert_eq!(store.load().unwrap().len(), 0);
}

#[test]
fn test_list_returns_defensive_copy() {
    let (_dir, primary, mirror, journal) = setup();
    let store = MemoryStore::open(&primary, &mirror, journal).unwrap();
    store.append("kept").unwrap();

    let mut listed = store.list();
    listed.push("injected".into());
    assert_eq!(store.list(), vec!["kept"]);
}

// ── Persistence & restart ──────────────────────────────────────

#[test]
fn test_restart_round_trip() {
    let (_dir, primary, mirror, journal) = setup();
    {
        let store = MemoryStore::open(&primary, &mirror, journal.clone()).unwrap();
        for i in 0..5 {
            store.append(&format!("entry {i}")).unwrap();
        }
    }

    // Simulated restart: a fresh store reloads from the primary file
    let store = MemoryStore::open(&primary, &mirror, journal).unwrap();
    let entries = store.list();
    assert_eq!(entries.len(), 5);
    assert_eq!(entries[0], "entry 0");
    assert_eq!(entries[4], "entry 4");
}

#[test]
fn test_mirror_matches_primary_after_append() {
    let (_dir, primary, mirror, journal) = setup();
    let store = MemoryStore::open(&primary, &mirror, journal).unwrap();
    store.append("note-A").unwrap();
    store.append("note-B").unwrap();

    assert_eq!(
        std::fs::read(&primary).unwrap(),
        std::fs::read(&mirror).unwrap()
    );
}

#[test]
fn test_recovery_from_mirror() {
    let (_dir, primary, mirror, journal) = setup();
    let store = MemoryStore::open(&primary, &mirror, journal).unwrap();
    store.append("hello").unwrap();
    store.append("world").unwrap();

    // Lose the primary; the mirror is now authoritative
    std::fs::remove_file(&primary).unwrap();
    let entries = store.load().unwrap();
    assert_eq!(entries, vec!["hello", "world"]);
    // Recovery recreated the primary file
    assert!(primary.exists());
    assert_eq!(
        std::fs::read(&primary).unwrap(),
        std::fs::read(&mirror).unwrap()
    );
}

#[test]
fn test_recovery_single_entry_mirror() {
    let (_dir, primary, mirror, journal) = setup();
    std::fs::write(&mirror, "hello\n").unwrap();

    let store = MemoryStore::open(&primary, &mirror, journal).unwrap();
    assert_eq!(store.list(), vec!["hello"]);
    assert!(primary.exists());
}

#[test]
fn test_neither_file_is_empty_store() {
    let (_dir, primary, mirror, journal) = setup();
    let store = MemoryStore::open(&primary, &mirror, journal).unwrap();
    assert!(store.list().is_empty());
}

#[test]
fn test_blank_lines_skipped_on_load() {
    let (_dir, primary, mirror, journal) = setup();
    std::fs::write(&primary, "one\n\n\ntwo\n  \nthree\n").unwrap();

    let store = MemoryStore::open(&primary, &mirror, journal).unwrap();
    assert_eq!(store.list(), vec!["one", "two", "three"]);
}

// ── Clear ──────────────────────────────────────────────────────

#[test]
fn test_clear_empties_everything() {
    let (_dir, primary, mirror, journal) = setup();
    let store = MemoryStore::open(&primary, &mirror, journal).unwrap();
    store.append("note-A").unwrap();
    store.append("note-B").unwrap();

    store.clear().unwrap();
    assert!(store.list().is_empty());
    assert_eq!(std::fs::read_to_string(&primary).unwrap(), "");
    assert_eq!(std::fs::read_to_string(&mirror).unwrap(), "");
}

#[test]
fn test_clear_is_idempotent() {
    let (_dir, primary, mirror, journal) = setup();
    let store = MemoryStore::open(&primary, &mirror, journal).unwrap();
    store.clear().unwrap();
    store.clear().unwrap();
    assert!(store.list().is_empty());
}

// ── Journal integration ────────────────────────────────────────

#[test]
fn test_append_and_clear_are_journaled() {
    let (dir, primary, mirror, _) = setup();
    let journal_path = dir.path().join("activity_log.txt");
    let store =
        MemoryStore::open(&primary, &mirror, Journal::new(&journal_path)).unwrap();

    store.append("remembered thing").unwrap();
    store.clear().unwrap();

    let log = std::fs::read_to_string(&journal_path).unwrap();
    assert!(log.contains("memory appended: remembered thing"));
    assert!(log.contains("memory cleared"));
}
