//! Helpers for running the ctxsmith binary in an isolated home directory

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Path of a file under tests/fixtures.
pub fn fixture(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
        .to_string_lossy()
        .into_owned()
}

/// Empty home directory so no user config leaks into a test.
pub fn isolated_home() -> TempDir {
    TempDir::new().expect("Failed to create temp home")
}

/// Config file location inside an isolated home.
pub fn config_file(home: &Path) -> PathBuf {
    home.join(".config").join("ctxsmith").join("config.toml")
}

/// assert_cmd handle for the binary running against `home`.
pub fn ctxsmith(home: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(env!("CARGO_BIN_EXE_ctxsmith"));
    cmd.env("HOME", home).env_remove("RUST_LOG").env("NO_COLOR", "1");
    cmd
}

/// Helper to run ctxsmith and capture output
pub fn run_ctxsmith(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_ctxsmith"))
        .args(args)
        .env("HOME", home)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to execute ctxsmith");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}
