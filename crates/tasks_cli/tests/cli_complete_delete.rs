use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run(dir: &TempDir, args: &[&str]) -> Output {
    let exe = env!("CARGO_BIN_EXE_tasks");
    Command::new(exe)
        .args(args)
        .current_dir(dir.path())
        .env_remove("TASKS_STORE_PATH")
        .env("TASKS_CONFIG_PATH", dir.path().join("no-config.json"))
        .output()
        .expect("failed to run tasks")
}

fn store_path(dir: &TempDir) -> PathBuf {
    dir.path().join(".tasks.csv")
}

fn seed(dir: &TempDir) {
    for description in ["buy milk", "walk dog"] {
        assert!(run(dir, &["add", description]).status.success());
    }
}

fn list_json(dir: &TempDir, all: bool) -> serde_json::Value {
    let args: &[&str] = if all {
        &["--json", "list", "--all"]
    } else {
        &["--json", "list"]
    };
    let output = run(dir, args);
    assert!(output.status.success());
    serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).expect("json output")
}

#[test]
fn complete_command_marks_only_target() {
    let dir = tempfile::tempdir().unwrap();
    seed(&dir);

    let output = run(&dir, &["complete", "1"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Marked task 1 as complete"));

    let all = list_json(&dir, true);
    assert_eq!(all[0]["is_completed"], true);
    assert_eq!(all[1]["is_completed"], false);

    let open = list_json(&dir, false);
    assert_eq!(open.as_array().unwrap().len(), 1);
    assert_eq!(open[0]["description"], "walk dog");
}

#[test]
fn complete_missing_id_leaves_file_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    seed(&dir);
    let before = std::fs::read(store_path(&dir)).unwrap();

    let output = run(&dir, &["complete", "99"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: not_found"));
    assert!(stderr.contains("99"));
    assert_eq!(std::fs::read(store_path(&dir)).unwrap(), before);
}

#[test]
fn complete_rejects_non_numeric_id() {
    let dir = tempfile::tempdir().unwrap();

    let output = run(&dir, &["complete", "abc"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input"));
}

#[test]
fn delete_command_removes_task() {
    let dir = tempfile::tempdir().unwrap();
    seed(&dir);

    let output = run(&dir, &["delete", "1"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Deleted task 1"));

    let all = list_json(&dir, true);
    assert_eq!(all.as_array().unwrap().len(), 1);
    assert_eq!(all[0]["id"], 2);
}

#[test]
fn delete_missing_id_leaves_file_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    seed(&dir);
    let before = std::fs::read(store_path(&dir)).unwrap();

    let output = run(&dir, &["delete", "7"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: not_found"));
    assert_eq!(std::fs::read(store_path(&dir)).unwrap(), before);
}

#[test]
fn delete_json_returns_removed_task() {
    let dir = tempfile::tempdir().unwrap();
    seed(&dir);

    let output = run(&dir, &["--json", "delete", "2"]);

    assert!(output.status.success());
    let parsed: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).expect("json output");
    assert_eq!(parsed["id"], 2);
    assert_eq!(parsed["description"], "walk dog");
}

#[test]
fn lifecycle_never_reuses_lower_ids() {
    let dir = tempfile::tempdir().unwrap();
    seed(&dir);

    assert!(run(&dir, &["complete", "1"]).status.success());
    assert!(run(&dir, &["delete", "1"]).status.success());

    let output = run(&dir, &["add", "read book"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Added task 3: read book"));

    let all = list_json(&dir, true);
    let ids: Vec<u64> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|task| task["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, [2, 3]);
}
