//! End-to-end tests for the orderline binary
//!
//! Each test runs in its own temp directory with XDG paths pointed inside it,
//! so no user config or log directory is touched.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn orderline(temp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("orderline").expect("binary builds");
    cmd.current_dir(temp.path())
        .env("XDG_CONFIG_HOME", temp.path().join("config"))
        .env("XDG_DATA_HOME", temp.path().join("data"))
        .env_remove("RUST_LOG");
    cmd
}

fn stdout_lines(output: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(output).lines().map(str::to_string).collect()
}

// =============================================================================
// Session Tests
// =============================================================================

#[test]
fn test_session_from_stdin() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let output = orderline(&temp)
        .write_stdin("CREATE Q1 2\nENQ Q1 americano\nRUN 1 1\nRUN 1 1\n")
        .output()
        .expect("Failed to run orderline");

    assert!(output.status.success());
    let lines = stdout_lines(&output.stdout);
    assert_eq!(
        lines,
        vec![
            "time=0 event=create queue=Q1",
            "time=0 event=enqueue queue=Q1 task=Q1-001 remaining=2",
            "time=0 event=run queue=Q1",
            "time=1 event=work queue=Q1 task=Q1-001 remaining=1",
            "display time=1 next=Q1",
            "display menu=[americano:2,cappuccino:3,hot_chocolate:4,latte:3,macchiato:2,mocha:4,tea:1]",
            "display Q1 [1/2] -> [Q1-001:1]",
            "time=1 event=run queue=Q1",
            "time=2 event=work queue=Q1 task=Q1-001 remaining=0",
            "time=2 event=finish queue=Q1 task=Q1-001",
            "display time=2 next=Q1",
            "display menu=[americano:2,cappuccino:3,hot_chocolate:4,latte:3,macchiato:2,mocha:4,tea:1]",
            "display Q1 [0/2] -> []",
            "Break time!",
        ]
    );
}

#[test]
fn test_session_from_script_file() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let script = temp.path().join("orders.txt");
    fs::write(
        &script,
        "# two queues, one skipped\nCREATE A 2\nCREATE B 2\nENQ A tea\nENQ B tea\nSKIP A\nRUN 1\n",
    )
    .unwrap();

    orderline(&temp)
        .arg("session")
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("time=0 event=skip queue=A\ntime=0 event=run queue=B"))
        .stdout(predicate::str::contains("time=2 event=finish queue=A task=A-001"))
        .stdout(predicate::str::ends_with("Break time!\n"));
}

#[test]
fn test_blank_line_stops_processing() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    orderline(&temp)
        .write_stdin("CREATE A 1\n\nCREATE B 1\n")
        .assert()
        .success()
        .stdout("time=0 event=create queue=A\nBreak time!\n");
}

#[test]
fn test_rejections_print_apology() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    orderline(&temp)
        .write_stdin("CREATE A 1\nENQ A tea\nENQ A tea\nENQ A espresso\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Sorry, we're at capacity.\ntime=0 event=reject queue=A task=A-002 reason=full",
        ))
        .stdout(predicate::str::contains(
            "Sorry, we don't serve that.\ntime=0 event=reject queue=A task=A-003 reason=unknown_item",
        ));
}

#[test]
fn test_invalid_steps_reported() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    orderline(&temp)
        .write_stdin("CREATE A 1\nCREATE B 1\nRUN 1 0\nRUN 1 3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("time=0 event=error reason=invalid_steps").count(2));
}

#[test]
fn test_json_format_flag() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    orderline(&temp)
        .args(["--format", "json"])
        .write_stdin("CREATE A 1\nENQ A latte\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"time":0,"event":"create","queue":"A"}"#))
        .stdout(predicate::str::contains(
            r#"{"time":0,"event":"enqueue","queue":"A","task":"A-001","remaining":3}"#,
        ));
}

// =============================================================================
// Config Tests
// =============================================================================

#[test]
fn test_config_menu_override() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let config = temp.path().join("custom.yml");
    fs::write(&config, "menu:\n  espresso: 1\n  flat_white: 3\n").unwrap();

    orderline(&temp)
        .arg("--config")
        .arg(&config)
        .write_stdin("CREATE A 2\nENQ A espresso\nENQ A americano\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("task=A-001 remaining=1"))
        .stdout(predicate::str::contains("task=A-002 reason=unknown_item"));
}

#[test]
fn test_project_local_config_is_found() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    fs::write(temp.path().join(".orderline.yml"), "format: json\n").unwrap();

    orderline(&temp)
        .write_stdin("CREATE A 1\n")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(r#"{"time":0,"event":"create","queue":"A"}"#));
}

#[test]
fn test_bad_explicit_config_fails() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let config = temp.path().join("bad.yml");
    fs::write(&config, "menu:\n  water: 0\n").unwrap();

    orderline(&temp)
        .arg("--config")
        .arg(&config)
        .write_stdin("CREATE A 1\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

// =============================================================================
// Menu Tests
// =============================================================================

#[test]
fn test_menu_command() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    orderline(&temp)
        .arg("menu")
        .assert()
        .success()
        .stdout("americano:2\ncappuccino:3\nhot_chocolate:4\nlatte:3\nmacchiato:2\nmocha:4\ntea:1\n");
}
