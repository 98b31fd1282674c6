//! Configuration validation behavior at the process boundary.

use super::prelude::{daemon, write_config};
use std::time::Duration;
use tempfile::tempdir;

const TIMEOUT: Duration = Duration::from_secs(5);

#[test]
fn missing_required_option_fails_with_diagnostic() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path(), "config.json", r#"{"project_name": "demo"}"#);

    let assert = daemon()
        .arg("--config")
        .arg(&config)
        .timeout(TIMEOUT)
        .assert()
        .failure();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    assert!(stderr.contains("source_pattern"), "stderr: {stderr}");
}

#[test]
fn frames_to_stack_out_of_range_fails_validation() {
    let dir = tempdir().unwrap();
    let body = format!(
        r#"{{
            "project_name": "demo",
            "source_pattern": "{pattern}",
            "working_directory": "{local}",
            "storage_root": "{storage}",
            "frames_to_stack": 0
        }}"#,
        pattern = dir.path().join("stage/*.mrc").to_string_lossy(),
        local = dir.path().join("scratch").to_string_lossy(),
        storage = dir.path().join("nas").to_string_lossy(),
    );
    let config = write_config(dir.path(), "config.json", &body);

    let assert = daemon()
        .arg("--config")
        .arg(&config)
        .timeout(TIMEOUT)
        .assert()
        .failure();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    assert!(stderr.contains("Invalid"), "stderr: {stderr}");
}

#[test]
fn later_config_file_overrides_earlier_on_shared_keys() {
    let dir = tempdir().unwrap();
    let base = write_config(
        dir.path(),
        "base.json",
        &format!(
            r#"{{
                "project_name": "base-project",
                "source_pattern": "{pattern}",
                "working_directory": "{local}",
                "storage_root": "{storage}",
                "walltime_secs": 1
            }}"#,
            pattern = dir.path().join("stage/*.mrc").to_string_lossy(),
            local = dir.path().join("scratch").to_string_lossy(),
            storage = dir.path().join("nas").to_string_lossy(),
        ),
    );
    // Malformed on its own (missing required options), but merged after
    // base.json it should not disturb the options base.json already set.
    let override_file = write_config(dir.path(), "override.json", r#"{"project_name": "override-project"}"#);

    daemon()
        .arg("--config")
        .arg(&base)
        .arg("--config")
        .arg(&override_file)
        .timeout(Duration::from_secs(10))
        .assert()
        .success();
}
