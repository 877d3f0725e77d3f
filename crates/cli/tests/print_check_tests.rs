//! Integration tests for `envchain print` and `envchain check`.

mod common;

use common::{arg, envchain_cmd, write_file};
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn test_print_dotenv_is_name_ordered() {
    let dir = TempDir::new().unwrap();
    let env = write_file(dir.path(), "app.env", "ZONE=eu\nAPP=${ZONE}-api\n");

    envchain_cmd()
        .args(["print", "-e", &arg(&env)])
        .assert()
        .success()
        .stdout("APP=eu-api\nZONE=eu\n");
}

#[test]
fn test_print_export_format() {
    let dir = TempDir::new().unwrap();
    let env = write_file(dir.path(), "app.env", "A=1\n");

    envchain_cmd()
        .args(["print", "-e", &arg(&env), "--format", "export"])
        .assert()
        .success()
        .stdout("export A=1\n");
}

#[test]
fn test_print_json_format() {
    let dir = TempDir::new().unwrap();
    let env = write_file(dir.path(), "app.env", "A=1\nB=$A$A\n");

    let output = envchain_cmd()
        .args(["print", "-e", &arg(&env), "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value, serde_json::json!({ "A": "1", "B": "11" }));
}

#[test]
fn test_check_counts_variables() {
    let dir = TempDir::new().unwrap();
    let base = write_file(dir.path(), "base.env", "# base\nA=1\nB=2\n");
    let extra = write_file(dir.path(), "extra.env", "B=3\nC=$B\n");

    envchain_cmd()
        .args(["check", "-e", &arg(&base), "-e", &arg(&extra)])
        .assert()
        .success()
        .stdout("OK: 3 variables resolved\n");
}

#[test]
fn test_blank_lines_need_opt_in() {
    let dir = TempDir::new().unwrap();
    let env = write_file(dir.path(), "spaced.env", "A=1\n\nB=2\n");

    envchain_cmd()
        .args(["check", "-e", &arg(&env)])
        .assert()
        .code(2);

    envchain_cmd()
        .args(["check", "--allow-blank-lines", "-e", &arg(&env)])
        .assert()
        .success();

    envchain_cmd()
        .env("ENVCHAIN_ALLOW_BLANK_LINES", "1")
        .args(["check", "-e", &arg(&env)])
        .assert()
        .success();
}

#[test]
fn test_verbose_logs_go_to_stderr() {
    let dir = TempDir::new().unwrap();
    let env = write_file(dir.path(), "app.env", "A=1\nA=2\n");

    envchain_cmd()
        .args(["print", "-v", "-e", &arg(&env)])
        .assert()
        .success()
        .stdout("A=2\n")
        .stderr(predicate::str::contains("Overwriting previously defined variable"));
}
