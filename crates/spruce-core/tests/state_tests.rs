use std::fs;
use tempfile::tempdir;

use spruce_core::state::{SkillStatus, STATE_FILENAME};
use spruce_core::{ActionChoice, ScanResult, StateStore};

fn scan_result(fingerprint: &str) -> ScanResult {
    ScanResult {
        issues: vec![],
        scanned_at: "2026-08-07T12:00:00+00:00".to_string(),
        scan_duration_ms: 12,
        file_count: 3,
        fingerprint: fingerprint.to_string(),
    }
}

#[test]
fn test_open_without_file_uses_defaults() {
    let tmp = tempdir().unwrap();
    let store = StateStore::open(tmp.path());
    let state = store.state();

    assert_eq!(state.version, "0.1.0");
    assert_eq!(state.project_root, tmp.path().display().to_string());
    assert!(state.fingerprint.is_none());
    assert!(state.scan_history.is_empty());
    assert!(state.decisions.is_empty());
    assert!(state.preferences.auto_scan_on_startup);
}

#[test]
fn test_corrupt_state_file_falls_back_to_defaults() {
    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join(STATE_FILENAME), "{ this is not json").unwrap();

    let store = StateStore::open(tmp.path());
    assert_eq!(store.state().project_root, tmp.path().display().to_string());
    assert!(store.state().scan_history.is_empty());
}

#[test]
fn test_record_scan_persists_fingerprint_and_history() {
    let tmp = tempdir().unwrap();

    let mut store = StateStore::open(tmp.path());
    store.record_scan(&scan_result("fp-1")).unwrap();

    let reopened = StateStore::open(tmp.path());
    assert_eq!(reopened.fingerprint(), Some("fp-1"));
    assert_eq!(reopened.state().scan_history.len(), 1);
    assert_eq!(reopened.state().scan_history[0].file_count, 3);
    assert_eq!(
        reopened.state().last_full_scan.as_deref(),
        Some("2026-08-07T12:00:00+00:00")
    );
}

#[test]
fn test_scan_history_is_capped_at_twenty() {
    let tmp = tempdir().unwrap();
    let mut store = StateStore::open(tmp.path());

    for i in 0..25 {
        store.record_scan(&scan_result(&format!("fp-{}", i))).unwrap();
    }

    let state = store.state();
    assert_eq!(state.scan_history.len(), 20);
    // the five oldest entries were evicted
    assert_eq!(state.scan_history[0].fingerprint, "fp-5");
    assert_eq!(state.scan_history[19].fingerprint, "fp-24");
}

#[test]
fn test_deferred_decision_survives_reload_exactly_once() {
    let tmp = tempdir().unwrap();

    let mut store = StateStore::open(tmp.path());
    store
        .record_decision("dup-hash-abc12345", ActionChoice::Defer)
        .unwrap();

    let reopened = StateStore::open(tmp.path());
    assert!(reopened.is_already_decided("dup-hash-abc12345"));
    assert_eq!(
        reopened
            .deferred_items()
            .iter()
            .filter(|item| item.issue_id == "dup-hash-abc12345")
            .count(),
        1
    );
}

#[test]
fn test_accept_decision_does_not_defer() {
    let tmp = tempdir().unwrap();
    let mut store = StateStore::open(tmp.path());
    store
        .record_decision("ref-missing-deadbeef", ActionChoice::Accept)
        .unwrap();

    assert!(store.is_already_decided("ref-missing-deadbeef"));
    assert!(store.deferred_items().is_empty());
}

#[test]
fn test_add_skill_suggestion_is_idempotent() {
    let tmp = tempdir().unwrap();
    let mut store = StateStore::open(tmp.path());

    store
        .add_skill_suggestion("instr-11111111", "auto-always-do", "first call", "repetitive-instruction")
        .unwrap();
    store
        .add_skill_suggestion("instr-11111111", "other-name", "second call", "manual-process")
        .unwrap();

    let reopened = StateStore::open(tmp.path());
    let suggestions = &reopened.state().skill_suggestions;
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].name, "auto-always-do");
    assert_eq!(suggestions[0].description, "first call");
    assert_eq!(suggestions[0].status, SkillStatus::Suggested);
}

#[test]
fn test_update_skill_status_persists_when_found() {
    let tmp = tempdir().unwrap();
    let mut store = StateStore::open(tmp.path());
    store
        .add_skill_suggestion("ftype-22222222", "create-md-module", "scaffold", "file-type-pattern")
        .unwrap();

    store
        .update_skill_status("ftype-22222222", SkillStatus::Created)
        .unwrap();

    let reopened = StateStore::open(tmp.path());
    assert_eq!(
        reopened.state().skill_suggestions[0].status,
        SkillStatus::Created
    );
}

#[test]
fn test_update_skill_status_unknown_id_is_silent() {
    let tmp = tempdir().unwrap();
    let mut store = StateStore::open(tmp.path());
    store
        .update_skill_status("cfg-missing-lint", SkillStatus::Dismissed)
        .unwrap();
    assert!(store.state().skill_suggestions.is_empty());
}

#[test]
fn test_round_trip_reproduces_equivalent_record() {
    let tmp = tempdir().unwrap();

    let mut store = StateStore::open(tmp.path());
    store.record_scan(&scan_result("fp-rt")).unwrap();
    store
        .record_decision("struct-depth-9", ActionChoice::Skip)
        .unwrap();
    store
        .add_skill_suggestion("proc-33333333", "run-tests", "test runner", "manual-process")
        .unwrap();

    let reopened = StateStore::open(tmp.path());
    assert_eq!(reopened.fingerprint(), Some("fp-rt"));
    assert_eq!(
        reopened.state().decisions.get("struct-depth-9"),
        Some(&ActionChoice::Skip)
    );
    assert_eq!(reopened.state().skill_suggestions.len(), 1);
    assert_eq!(reopened.state().scan_history.len(), 1);
}
