//! Shared test utilities for envchain integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory.
//! - Write definition files into a temp directory.
//!
//! Invariants / Assumptions:
//! - `ENVCHAIN_*` and `RUST_LOG` are cleared so the host cannot change behaviour.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};

/// Returns a hermetic `envchain` command for integration testing.
pub fn envchain_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("envchain");

    // Clear potential host leakage
    cmd.env_remove("ENVCHAIN_ALLOW_BLANK_LINES")
        .env_remove("ENVCHAIN_STRICT_REFERENCES")
        .env_remove("RUST_LOG");

    cmd
}

/// Write `body` to `dir/name` and return the path.
#[allow(dead_code)]
pub fn write_file(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    path
}

/// Path as a command-line argument.
#[allow(dead_code)]
pub fn arg(path: &Path) -> String {
    path.display().to_string()
}
