//! End-to-end Monitor walltime behavior (spec.md §8 scenario S4): a project
//! with no matching files exits cleanly once the Monitor reports
//! end-of-stream.

use super::prelude::{daemon, quiet_project_config, write_config};
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn exits_cleanly_when_source_pattern_stays_empty() {
    let dir = tempdir().unwrap();
    let body = quiet_project_config(dir.path(), 1);
    let config = write_config(dir.path(), "config.json", &body);

    // BETWEEN_PULLS_SECS (2s) plus one walltime period (1s) is enough for
    // the Monitor to reach end-of-stream on an empty directory; 10s leaves
    // generous headroom for process startup.
    daemon()
        .arg("--config")
        .arg(&config)
        .timeout(Duration::from_secs(10))
        .assert()
        .success();

    assert!(dir.path().join("scratch").is_dir());
    assert!(dir.path().join("nas").is_dir());
}
