//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with its data directory pointed at a
//! temporary directory, and verify outputs and the stored record.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use chrono::{Days, Local};
use tempfile::TempDir;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    run_cli_with_input(data_dir, args, "")
}

/// Run a CLI command with `input` piped to stdin.
fn run_cli_with_input(data_dir: &Path, args: &[&str], input: &str) -> (String, String, i32) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_focusbuddy"))
        .args(args)
        .env("FOCUSBUDDY_DATA_DIR", data_dir)
        .env_remove("FOCUSBUDDY_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI command");

    {
        let mut stdin = child.stdin.take().expect("stdin is piped");
        stdin.write_all(input.as_bytes()).expect("Failed to write stdin");
    }

    let output = child.wait_with_output().expect("Failed to wait for CLI");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn stored_record(data_dir: &Path) -> serde_json::Value {
    let raw = std::fs::read_to_string(data_dir.join("focus_data.json"))
        .expect("progress record should exist");
    serde_json::from_str(&raw).expect("progress record should be JSON")
}

#[test]
fn test_status_on_fresh_install() {
    let dir = TempDir::new().unwrap();
    let (stdout, stderr, code) = run_cli(dir.path(), &["status"]);
    assert_eq!(code, 0, "status failed: {stderr}");
    assert!(stdout.contains("Level:  1"));
    assert!(stdout.contains("XP:     0/100"));
    assert!(stdout.contains("Streak: 0 days"));
}

#[test]
fn test_status_json_snapshot() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["status", "--json"]);
    assert_eq!(code, 0);
    let snap: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(snap["type"], "StateSnapshot");
    assert_eq!(snap["phase"], "focus_paused");
    assert_eq!(snap["formatted"], "25:00");
    assert_eq!(snap["button_label"], "Start");
    assert_eq!(snap["level"], 1);
}

#[test]
fn test_debug_complete_records_session() {
    let dir = TempDir::new().unwrap();
    let (stdout, stderr, code) = run_cli(dir.path(), &["debug", "complete"]);
    assert_eq!(code, 0, "debug complete failed: {stderr}");

    let events: Vec<serde_json::Value> = serde_json::from_str(&stdout).unwrap();
    assert_eq!(events[0]["type"], "SessionExpired");
    assert_eq!(events[0]["kind"], "focus");
    assert_eq!(events[1]["type"], "FocusCompleted");
    assert_eq!(events[1]["xp"], 25);
    assert_eq!(events[1]["persisted"], true);

    assert_eq!(stored_record(dir.path())["xp"], 25);

    let (stdout, _, _) = run_cli(dir.path(), &["status"]);
    assert!(stdout.contains("XP:     25/100"));
}

#[test]
fn test_debug_complete_signals_streak_milestone() {
    let dir = TempDir::new().unwrap();
    let yesterday = Local::now()
        .date_naive()
        .checked_sub_days(Days::new(1))
        .unwrap();
    std::fs::write(
        dir.path().join("focus_data.json"),
        format!(
            r#"{{"xp": 90, "level": 1, "streak": 4, "last_session": "{}"}}"#,
            yesterday.format("%Y-%m-%d")
        ),
    )
    .unwrap();

    let (stdout, _, code) = run_cli(dir.path(), &["debug", "complete"]);
    assert_eq!(code, 0);
    let events: Vec<serde_json::Value> = serde_json::from_str(&stdout).unwrap();
    let types: Vec<&str> = events.iter().filter_map(|e| e["type"].as_str()).collect();
    assert_eq!(
        types,
        vec!["SessionExpired", "FocusCompleted", "LevelUp", "StreakMilestone"]
    );

    let record = stored_record(dir.path());
    assert_eq!(record["xp"], 115);
    assert_eq!(record["level"], 2);
    assert_eq!(record["streak"], 5);
}

#[test]
fn test_corrupt_record_recovers_silently() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("focus_data.json"), "{{{ definitely not json").unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["status"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Level:  1"));
    assert!(stdout.contains("Streak: 0 days"));
}

#[test]
fn test_config_get_set() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["config", "get", "timer.focus_secs"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "1500");

    let (_, _, code) = run_cli(dir.path(), &["config", "set", "timer.break_secs", "600"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(dir.path(), &["config", "get", "timer.break_secs"]);
    assert_eq!(stdout.trim(), "600");
}

#[test]
fn test_config_list_prints_toml() {
    let dir = TempDir::new().unwrap();
    let (_, _, code) = run_cli(dir.path(), &["config", "set", "timer.break_secs", "600"]);
    assert_eq!(code, 0);

    let (stdout, _, code) = run_cli(dir.path(), &["config", "list"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("[timer]"));
    assert!(stdout.contains("break_secs = 600"));
    assert!(stdout.contains("[progress]"));
    assert_eq!(
        stdout,
        std::fs::read_to_string(dir.path().join("config.toml")).unwrap()
    );
}

#[test]
fn test_config_rejects_bad_values() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["config", "set", "progress.xp_per_session", "250"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));

    let (_, _, code) = run_cli(dir.path(), &["config", "get", "timer.nope"]);
    assert_eq!(code, 1);
}

#[test]
fn test_run_counts_down_to_break() {
    let dir = TempDir::new().unwrap();
    let (_, _, code) = run_cli(dir.path(), &["config", "set", "timer.focus_secs", "1"]);
    assert_eq!(code, 0);

    let (stdout, stderr, code) = run_cli_with_input(dir.path(), &["run"], "s\n");
    assert_eq!(code, 0, "run failed: {stderr}");
    assert!(stdout.contains("Great job!"));
    assert!(stdout.contains("Break Time"));
    assert_eq!(stored_record(dir.path())["xp"], 25);
}

#[test]
fn test_run_debug_skip_needs_unlock() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli_with_input(dir.path(), &["run"], "x\nq\n");
    assert_eq!(code, 0);
    assert!(stdout.contains("unknown command: x"));
    assert!(!dir.path().join("focus_data.json").exists());

    let (stdout, _, code) = run_cli_with_input(dir.path(), &["run"], "t\nt\nt\nt\nt\nx\nq\n");
    assert_eq!(code, 0);
    assert!(stdout.contains("Debug mode activated"));
    assert!(stdout.contains("Great job!"));
    assert_eq!(stored_record(dir.path())["xp"], 25);
}

#[test]
fn test_completions() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["completions", "bash"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("focusbuddy"));
}
