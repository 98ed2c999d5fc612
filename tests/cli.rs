use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

fn figure_actions_cmd(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("figure-actions").expect("binary exists");
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("HOME", config_home.path());
    cmd
}

fn write_trace(dir: &TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("trace.toml");
    std::fs::write(&path, body).unwrap();
    path
}

const CLICK_TRACE: &str = r#"
bounds = [0.0, 10.0, 0.0, 10.0]

[[binding]]
name = "select"
zone = "centre"
button = "left"
gesture = "click"

[[event]]
kind = "press"
t = 0.0
x = 5.0
y = 5.0
button = "left"

[[event]]
kind = "release"
t = 0.05
x = 5.0
y = 5.0
button = "left"
"#;

#[test]
fn help_prints_about() {
    let temp = TempDir::new().unwrap();
    figure_actions_cmd(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Replay pointer traces through plot gesture bindings",
        ));
}

#[test]
fn no_trace_prints_usage() {
    let temp = TempDir::new().unwrap();
    figure_actions_cmd(&temp)
        .assert()
        .success()
        .stdout(predicate::str::contains("figure-actions --trace FILE"));
}

#[test]
fn replays_a_click() {
    let temp = TempDir::new().unwrap();
    let trace = write_trace(&temp, CLICK_TRACE);
    figure_actions_cmd(&temp)
        .arg("--trace")
        .arg(&trace)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "0.050s (centre, left, click) -> select",
        ));
}

#[test]
fn short_delay_turns_the_click_into_nothing() {
    let temp = TempDir::new().unwrap();
    let trace = write_trace(&temp, CLICK_TRACE);
    figure_actions_cmd(&temp)
        .arg("--trace")
        .arg(&trace)
        .args(["--delay", "0.01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("select").not());
}

#[test]
fn edge_fraction_from_config_file_moves_the_zone() {
    let temp = TempDir::new().unwrap();
    let trace = write_trace(
        &temp,
        &CLICK_TRACE.replace("x = 5.0\ny = 5.0", "x = 5.0\ny = 4.0"),
    );
    let config = temp.path().join("custom.toml");
    std::fs::write(&config, "[interaction]\nedge_fraction = 0.45\n").unwrap();

    figure_actions_cmd(&temp)
        .arg("--trace")
        .arg(&trace)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("select").not());
}

#[test]
fn ambiguous_bindings_fail() {
    let temp = TempDir::new().unwrap();
    let body = format!(
        "{CLICK_TRACE}\n[[binding]]\nname = \"anywhere\"\nzone = \"any\"\nbutton = \"left\"\ngesture = \"click\"\n"
    );
    let trace = write_trace(&temp, &body);
    figure_actions_cmd(&temp)
        .arg("--trace")
        .arg(&trace)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Multiple actions"));
}

#[test]
fn draw_contours_reports_points() {
    let temp = TempDir::new().unwrap();
    let trace = write_trace(
        &temp,
        r#"
bounds = [0.0, 10.0, 0.0, 10.0]

[[event]]
kind = "press"
t = 0.0
x = 5.0
y = 5.0
button = "left"
axes = 1

[[event]]
kind = "release"
t = 0.05
x = 5.0
y = 5.0
button = "left"
axes = 1
"#,
    );
    figure_actions_cmd(&temp)
        .arg("--trace")
        .arg(&trace)
        .arg("--draw-contours")
        .assert()
        .success()
        .stdout(predicate::str::contains("add-point"))
        .stdout(predicate::str::contains("axes 1: 1 point(s), 0 contour(s)"));
}

#[test]
fn missing_trace_file_fails() {
    let temp = TempDir::new().unwrap();
    figure_actions_cmd(&temp)
        .arg("--trace")
        .arg(temp.path().join("absent.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read trace"));
}
