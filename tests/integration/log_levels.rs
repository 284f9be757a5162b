//! Integration tests for the log-level flag and the end-of-run summary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[allow(deprecated)]
fn sloq() -> Command {
    let mut cmd = Command::cargo_bin("sloq").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

const OK_LINE: &str = r#"[ts][INFO][logger] took[5ms], source[{\"a\":1}], extra_source[]"#;

#[test]
fn info_level_reports_summary_counts() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out.ndjson");
    let input = format!("{OK_LINE}\nno markers here\n");

    sloq()
        .args(["--log-level", "info"])
        .arg(&out)
        .write_stdin(input)
        .assert()
        .success()
        .stderr(predicate::str::contains("run complete"))
        .stderr(predicate::str::contains("succeeded=1"))
        .stderr(predicate::str::contains("failed=1"));
}

#[test]
fn info_level_logs_each_emitted_record() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out.ndjson");

    sloq()
        .args(["-l", "info"])
        .arg(&out)
        .write_stdin(OK_LINE)
        .assert()
        .success()
        .stderr(predicate::str::contains(r#"{\"took\":\"5ms\""#).or(
            predicate::str::contains(r#"{"took":"5ms""#),
        ));
}

#[test]
fn default_warn_level_keeps_stderr_quiet_on_success() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out.ndjson");

    sloq()
        .arg(&out)
        .write_stdin(OK_LINE)
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn skipped_lines_log_at_info_not_warn() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out.ndjson");

    sloq()
        .arg(&out)
        .write_stdin("no markers here")
        .assert()
        .success()
        .stderr(predicate::str::is_empty());

    sloq()
        .args(["-l", "info"])
        .arg(&out)
        .write_stdin("no markers here")
        .assert()
        .success()
        .stderr(predicate::str::contains("skipping message"));
}

// Piped stderr must be plain text; color escapes would garble anything
// grepping the diagnostics.
#[test]
fn piped_stderr_carries_no_ansi_escapes() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out.ndjson");

    let output = sloq()
        .args(["-l", "info"])
        .arg(&out)
        .write_stdin(format!("{OK_LINE}\n"))
        .output()
        .unwrap();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains('\u{1b}'), "stderr: {stderr:?}");
    assert!(stderr.contains("succeeded=1"), "stderr: {stderr:?}");
    assert!(stderr.contains("failed=0"), "stderr: {stderr:?}");
}

#[test]
fn invalid_log_level_is_rejected() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out.ndjson");
    sloq().args(["-l", "loud"]).arg(&out).assert().failure();
}
