use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const DIMENS: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<resources>
    <dimen name="margin">12.0dp</dimen>
    <dimen name="text">8.5sp</dimen>
</resources>
"#;

const CONFIG: &str = r#"
destination = "out"
sources = ["res/values"]

[[scale]]
name = "large"
factor = 2.0

[[scale]]
name = "medium"
factor = 1.5
"#;

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("res/values")).unwrap();
    fs::write(dir.path().join("res/values/dimens.xml"), DIMENS).unwrap();
    fs::write(dir.path().join("dimens.toml"), CONFIG).unwrap();
    dir
}

fn cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("dimens-scale").unwrap();
    cmd.current_dir(dir).arg("--no-color").env_remove("RUST_LOG");
    cmd
}

#[test]
fn scale_writes_every_qualifier() {
    let dir = project();

    cmd(dir.path())
        .arg("scale")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 2 files from 1 source"));

    let large = fs::read_to_string(dir.path().join("out/values-large/dimens.xml")).unwrap();
    assert!(large.contains(r#"<dimen name="margin">24.0dp</dimen>"#));
    assert!(large.contains(r#"<dimen name="text">17.0sp</dimen>"#));

    let medium = fs::read_to_string(dir.path().join("out/values-medium/dimens.xml")).unwrap();
    assert!(medium.contains(r#"<dimen name="text">12.8sp</dimen>"#));
}

#[test]
fn scale_json_report() {
    let dir = project();

    let output = cmd(dir.path()).args(["scale", "--json"]).output().unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["files_scanned"], 1);
    assert_eq!(report["dimensions"], 2);
    assert_eq!(report["outputs"].as_array().unwrap().len(), 2);
    assert!(report["failures"].as_array().unwrap().is_empty());
}

#[test]
fn scale_failure_exits_nonzero() {
    let dir = project();
    fs::write(
        dir.path().join("res/values/broken.xml"),
        "<resources><dimen name=\"a\">1dp</resources>",
    )
    .unwrap();

    cmd(dir.path())
        .arg("scale")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("1 failure"));

    assert!(dir.path().join("out/values-large/dimens.xml").exists());
    assert!(!dir.path().join("out/values-large/broken.xml").exists());
}

#[test]
fn command_line_overrides_config() {
    let dir = project();

    cmd(dir.path())
        .args(["scale", "--scale", "xl=3", "--to", "custom"])
        .assert()
        .success();

    let xl = fs::read_to_string(dir.path().join("custom/values-xl/dimens.xml")).unwrap();
    assert!(xl.contains(r#"<dimen name="margin">36.0dp</dimen>"#));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn plan_writes_nothing() {
    let dir = project();

    cmd(dir.path())
        .arg("plan")
        .assert()
        .success()
        .stdout(predicate::str::contains("values-large"))
        .stdout(predicate::str::contains("values-medium"));

    assert!(!dir.path().join("out").exists());
}

#[test]
fn check_warns_on_duplicate_scale() {
    let dir = project();

    cmd(dir.path())
        .args(["check", "--scale", "large=2", "--scale", "large=3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stderr(predicate::str::contains("configured more than once"));
}

#[test]
fn invalid_factor_is_config_error() {
    let dir = project();

    cmd(dir.path())
        .args(["scale", "--scale", "large=0"])
        .assert()
        .code(3);
    assert!(!dir.path().join("out").exists());
}

#[test]
fn config_error_as_json() {
    let dir = project();

    let output = cmd(dir.path())
        .args(["scale", "--json", "--scale", "large=-1"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["code_str"], "E3004");
    assert_eq!(report["category"], "Configuration");
    assert!(report["message"].as_str().unwrap().contains("factor"));
}

#[test]
fn missing_config_is_config_error() {
    let dir = TempDir::new().unwrap();

    cmd(dir.path())
        .args(["--config", "nope.toml", "check"])
        .assert()
        .code(3);
}

#[test]
fn malformed_scale_flag_rejected_by_parser() {
    let dir = project();

    cmd(dir.path())
        .args(["scale", "--scale", "large"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NAME=FACTOR"));
}
