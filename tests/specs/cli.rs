//! `cryoingestd --help` / `--version` / argument-validation behavior.

use super::prelude::daemon;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(5);

#[test]
fn version_flag_prints_version_and_exits_zero() {
    let assert = daemon().arg("--version").timeout(TIMEOUT).assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("cryoingestd"), "stdout: {stdout}");
}

#[test]
fn help_flag_prints_usage_and_exits_zero() {
    let assert = daemon().arg("--help").timeout(TIMEOUT).assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("--config"), "stdout: {stdout}");
}

#[test]
fn missing_config_flag_fails() {
    daemon().timeout(TIMEOUT).assert().failure();
}

#[test]
fn unreadable_config_path_fails() {
    let assert = daemon()
        .arg("--config")
        .arg("/nonexistent/path/to/config.json")
        .timeout(TIMEOUT)
        .assert()
        .failure();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    assert!(stderr.contains("NotFound") || stderr.contains("config"), "stderr: {stderr}");
}
