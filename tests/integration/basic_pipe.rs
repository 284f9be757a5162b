//! Integration tests for the basic stdin-to-file pipeline.

use std::fs;

use assert_cmd::Command;
use tempfile::TempDir;

#[allow(deprecated)]
fn sloq() -> Command {
    let mut cmd = Command::cargo_bin("sloq").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn empty_stdin_exits_zero_with_empty_output() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out.ndjson");
    sloq().arg(&out).write_stdin("").assert().success();
    assert_eq!(fs::read_to_string(&out).unwrap(), "");
}

#[test]
fn complete_line_is_emitted_as_one_record() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out.ndjson");
    let input = r#"[2026-08-12T10:02:11,885][TRACE][index.search.slowlog.query] took[12.3ms], took_millis[12], total_shards[5], source[{\"size\":10,\"query\":{\"term\":{\"user\":\"kim\"}}}], extra_source[]"#;

    sloq().arg(&out).write_stdin(input).assert().success();

    let written = fs::read_to_string(&out).unwrap();
    assert_eq!(written.lines().count(), 1);
    let record: serde_json::Value = serde_json::from_str(written.trim_end()).unwrap();
    assert_eq!(record["took"], "12.3ms");
    assert_eq!(record["level"], "TRACE");
    assert_eq!(record["source"]["size"], 10);
    assert_eq!(record["source"]["query"]["term"]["user"], "kim");
}

#[test]
fn output_keys_are_ordered_took_level_source() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out.ndjson");
    let input = r#"[ts][INFO][logger] took[5ms], source[{\"a\":1}], extra_source[]"#;

    sloq().arg(&out).write_stdin(input).assert().success();

    let written = fs::read_to_string(&out).unwrap();
    assert_eq!(
        written.trim_end(),
        r#"{"took":"5ms","level":"INFO","source":{"a":1}}"#
    );
}

#[test]
fn truncated_source_is_repaired_before_emission() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out.ndjson");
    let input = r#"[2026-08-12T10:02:12,101][WARN][index.search.slowlog.query] took[843ms], took_millis[843], total_shards[5], source[{\"query\":{\"match\":{\"title\":\"the quick bro], extra_source[]"#;

    sloq().arg(&out).write_stdin(input).assert().success();

    let written = fs::read_to_string(&out).unwrap();
    let record: serde_json::Value = serde_json::from_str(written.trim_end()).unwrap();
    assert_eq!(record["took"], "843ms");
    assert_eq!(record["source"]["query"]["match"]["title"], "the quick bro");
}

#[test]
fn unwritable_out_file_exits_one() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("no-such-dir").join("out.ndjson");
    sloq().arg(&out).write_stdin("").assert().code(1);
}
