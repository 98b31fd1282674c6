//! Black-box helpers for cryoingestd behavioral specifications.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};

/// A fresh `Command` for the `cryoingestd` binary.
pub fn daemon() -> Command {
    Command::cargo_bin("cryoingestd").expect("cryoingestd binary should be built")
}

/// Write `body` (a JSON object literal) to `dir/name` and return its path.
pub fn write_config(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).expect("config file should write");
    path
}

/// A minimal, valid flat config pointing `working_directory`/`storage_root`
/// at fresh subdirectories of `dir`, with a `source_pattern` matching
/// nothing and a short `walltime_secs` so the daemon exits quickly.
pub fn quiet_project_config(dir: &Path, walltime_secs: u64) -> String {
    format!(
        r#"{{
            "project_name": "demo",
            "source_pattern": "{pattern}",
            "working_directory": "{local}",
            "storage_root": "{storage}",
            "walltime_secs": {walltime_secs}
        }}"#,
        pattern = dir.join("stage/*.mrc").to_string_lossy().replace('\\', "\\\\"),
        local = dir.join("scratch").to_string_lossy().replace('\\', "\\\\"),
        storage = dir.join("nas").to_string_lossy().replace('\\', "\\\\"),
    )
}
