//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with HOME pointed at a temp directory and
//! verify outputs.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (code, stdout, stderr).
fn run_cli(home: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_officedrills"))
        .args(args)
        .env("HOME", home)
        .env_remove("OFFICEDRILLS_ENV")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

#[test]
fn test_exercise_list_json_has_defaults() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["exercise", "list", "--json"]);
    assert_eq!(code, 0);
    let list: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(list.as_array().unwrap().len(), 30);

    let (code, stdout, _) = run_cli(
        home.path(),
        &["exercise", "list", "--json", "--category", "neck"],
    );
    assert_eq!(code, 0);
    let list: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(list.as_array().unwrap().len(), 3);
}

#[test]
fn test_break_preview_is_repeatable_with_seed() {
    let home = tempfile::tempdir().unwrap();
    let first = run_cli(home.path(), &["break", "preview", "--seed", "7"]);
    let second = run_cli(home.path(), &["break", "preview", "--seed", "7"]);
    assert_eq!(first.0, 0);
    assert_eq!(first.1, second.1);
    let picked: serde_json::Value = serde_json::from_str(&first.1).unwrap();
    assert_eq!(picked.as_array().unwrap().len(), 2);
}

#[test]
fn test_config_set_and_get() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["config", "set", "interval", "45"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("ok"));

    let (_, stdout, _) = run_cli(home.path(), &["config", "get", "interval"]);
    assert_eq!(stdout.trim(), "45");

    let (code, _, stderr) = run_cli(home.path(), &["config", "set", "sound_volume", "3"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error"));
}

#[test]
fn test_timer_snooze_persists_between_invocations() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(home.path(), &["timer", "snooze", "10"]);
    assert_eq!(code, 0);

    let (code, stdout, _) = run_cli(home.path(), &["timer", "status"]);
    assert_eq!(code, 0);
    let snapshot: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(snapshot["type"], "state_snapshot");
    assert_eq!(snapshot["phase"], "running");
    let remaining = snapshot["remaining_secs"].as_u64().unwrap();
    assert!(remaining <= 600 && remaining > 590);
}

#[test]
fn test_break_start_from_stdin_records_history() {
    use std::io::Write;
    use std::process::Stdio;

    let home = tempfile::tempdir().unwrap();
    let mut child = Command::new(env!("CARGO_BIN_EXE_officedrills"))
        .args(["break", "start", "--seed", "3"])
        .env("HOME", home.path())
        .env_remove("OFFICEDRILLS_ENV")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(b"d\ns\n").unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("1 completed, 1 skipped"));

    let (_, stdout, _) = run_cli(home.path(), &["history", "stats", "--period", "all"]);
    let stats: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(stats["total_sessions"], 1);
    assert_eq!(stats["completion_rate"], 50);

    let (_, csv, _) = run_cli(home.path(), &["history", "export-csv"]);
    assert!(csv.starts_with("Date,Time,Category,Exercise,Status,Duration\n"));
    assert_eq!(csv.trim_end().lines().count(), 3);
}

#[test]
fn test_config_reset_all_clears_stored_data() {
    let home = tempfile::tempdir().unwrap();
    run_cli(home.path(), &["config", "set", "interval", "45"]);
    run_cli(home.path(), &["timer", "snooze", "10"]);
    let (code, _, _) = run_cli(
        home.path(),
        &["exercise", "add", "Wall Angels", "--category", "back"],
    );
    assert_eq!(code, 0);

    let (code, stdout, _) = run_cli(home.path(), &["config", "reset", "--all"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("all data cleared"));

    let (_, stdout, _) = run_cli(home.path(), &["config", "get", "interval"]);
    assert_eq!(stdout.trim(), "30");

    let (_, stdout, _) = run_cli(home.path(), &["exercise", "list", "--json"]);
    let list: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(list.as_array().unwrap().len(), 30);

    let (_, stdout, _) = run_cli(home.path(), &["timer", "status"]);
    let snapshot: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(snapshot["phase"], "idle");
    assert_eq!(snapshot["remaining_secs"], 1800);
}

#[test]
fn test_unknown_exercise_remove_fails() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(home.path(), &["exercise", "remove", "nope"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error"));
}
