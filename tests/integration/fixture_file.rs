//! Integration test over the bundled slow-log fixture.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[allow(deprecated)]
fn sloq() -> Command {
    let mut cmd = Command::cargo_bin("sloq").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn fixture_lines_produce_expected_counts() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out.ndjson");
    let fixture = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/slowlog.txt");

    sloq()
        .args(["-l", "info"])
        .arg(&out)
        .pipe_stdin(fixture)
        .unwrap()
        .assert()
        .success()
        .stderr(predicate::str::contains("succeeded=4"))
        .stderr(predicate::str::contains("failed=2"));

    let written = fs::read_to_string(&out).unwrap();
    let records: Vec<serde_json::Value> = written
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(records.len(), 4);

    for record in &records {
        assert!(record["took"].is_string(), "record: {record}");
        assert!(record["level"].is_string(), "record: {record}");
        assert!(record["source"].is_object(), "record: {record}");
    }

    // The mid-string truncation comes back as a closed document.
    assert_eq!(
        records[1]["source"]["query"]["match"]["title"],
        "the quick bro"
    );
    // The array-bearing source survives extraction plus repair.
    assert_eq!(records[2]["source"]["ids"], serde_json::json!([1, 2]));
}
