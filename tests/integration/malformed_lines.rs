//! Integration tests for lines that cannot be fully parsed.

use std::fs;

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
fn line_without_took_is_skipped_not_emitted() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out.ndjson");
    let input = r#"[ts][TRACE][logger] took_millis[4], source[{\"size\":20}], extra_source[]"#;

    sloq().arg(&out).write_stdin(input).assert().success();
    assert_eq!(fs::read_to_string(&out).unwrap(), "");
}

#[test]
fn unrepairable_line_is_dropped_and_run_continues() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out.ndjson");
    // First line exceeds the repair depth budget; second is fine.
    let input = concat!(
        r#"[ts][DEBUG][logger] took[77ms], source[[[[[[[[[[[[[[[[[[[[], extra_source[]"#,
        "\n",
        r#"[ts][INFO][logger] took[5ms], source[{\"a\":1}], extra_source[]"#,
    );

    sloq()
        .arg(&out)
        .write_stdin(input)
        .assert()
        .success()
        .stderr(predicate::str::contains("failed to parse line"))
        .stderr(predicate::str::contains("too deep"));

    let written = fs::read_to_string(&out).unwrap();
    assert_eq!(written.lines().count(), 1);
    assert!(written.contains(r#""took":"5ms""#));
}

#[test]
fn plain_text_lines_are_skipped() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out.ndjson");
    let input = "not a slow log line at all\nanother one\n";

    sloq().arg(&out).write_stdin(input).assert().success();
    assert_eq!(fs::read_to_string(&out).unwrap(), "");
}
