use super::*;
use tempfile::tempdir;

fn write_json(dir: &std::path::Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
fn load_merges_multiple_files_last_wins() {
    let dir = tempdir().unwrap();
    let base = write_json(
        dir.path(),
        "base.json",
        r#"{"project_name": "p1", "source_pattern": "/stage/*.mrc"}"#,
    );
    let override_file = write_json(
        dir.path(),
        "override.json",
        r#"{"project_name": "p2"}"#,
    );

    let mut config = Config::new();
    config.load(&[base, override_file]).unwrap();

    assert_eq!(
        config.values.get("project_name").and_then(Value::as_str),
        Some("p2")
    );
    assert_eq!(
        config.values.get("source_pattern").and_then(Value::as_str),
        Some("/stage/*.mrc")
    );
}

#[test]
fn load_missing_file_is_an_error() {
    let mut config = Config::new();
    let err = config
        .load(&[PathBuf::from("/nonexistent/config.json")])
        .unwrap_err();
    assert!(matches!(err, ConfigError::NotFound(_)));
}

#[test]
fn load_malformed_json_is_an_error() {
    let dir = tempdir().unwrap();
    let bad = write_json(dir.path(), "bad.json", "{not json");

    let mut config = Config::new();
    let err = config.load(&[bad]).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn validate_all_skips_options_that_are_not_set() {
    // None of the validated keys are present; validate_all should still
    // pass, matching the original's "log and continue" behavior for a
    // missing config option.
    let config = Config::new();
    assert!(config.validate_all());
}

#[test]
fn validate_all_fails_when_frames_to_stack_out_of_range() {
    let dir = tempdir().unwrap();
    let path = write_json(dir.path(), "config.json", r#"{"frames_to_stack": 0}"#);
    let mut config = Config::new();
    config.load(&[path]).unwrap();
    assert!(!config.validate_all());
}

#[test]
fn validate_all_fails_when_required_string_is_empty() {
    let dir = tempdir().unwrap();
    let path = write_json(dir.path(), "config.json", r#"{"project_name": ""}"#);
    let mut config = Config::new();
    config.load(&[path]).unwrap();
    assert!(!config.validate_all());
}

fn valid_config_json(dir: &std::path::Path, storage: &std::path::Path) -> String {
    format!(
        r#"{{
            "project_name": "demo",
            "source_pattern": "{pattern}",
            "working_directory": "{local}",
            "storage_root": "{storage}",
            "frames_to_stack": 3
        }}"#,
        pattern = dir.join("stage/*.mrc").to_string_lossy().replace('\\', "\\\\"),
        local = dir.join("scratch").to_string_lossy().replace('\\', "\\\\"),
        storage = storage.to_string_lossy().replace('\\', "\\\\"),
    )
}

#[test]
fn build_project_config_succeeds_with_required_fields() {
    let dir = tempdir().unwrap();
    let storage = tempdir().unwrap();
    let body = valid_config_json(dir.path(), storage.path());
    let path = write_json(dir.path(), "config.json", &body);

    let mut config = Config::new();
    config.load(&[path]).unwrap();
    let project = config.build_project_config().unwrap();

    assert_eq!(project.project_name, "demo");
    assert_eq!(project.frames, 3);
    assert_eq!(project.globus_root, PathBuf::from(DEFAULT_GLOBUS_ROOT));
    assert_eq!(project.analysis_tool, "scipion");
    assert!(project.scipion_config_path.is_none());
}

#[test]
fn build_project_config_fails_when_required_option_is_missing() {
    let dir = tempdir().unwrap();
    let path = write_json(dir.path(), "config.json", r#"{"project_name": "demo"}"#);
    let mut config = Config::new();
    config.load(&[path]).unwrap();

    let err = config.build_project_config().unwrap_err();
    assert!(matches!(err, ConfigError::MissingOption("source_pattern")));
}

#[test]
fn build_project_config_fails_when_scipion_config_path_does_not_exist() {
    let dir = tempdir().unwrap();
    let storage = tempdir().unwrap();
    let mut body_value: serde_json::Map<String, Value> =
        serde_json::from_str(&valid_config_json(dir.path(), storage.path())).unwrap();
    body_value.insert(
        "scipion_config_path".to_string(),
        Value::String(dir.path().join("missing.conf").to_string_lossy().into_owned()),
    );
    let body = serde_json::to_string(&body_value).unwrap();
    let path = write_json(dir.path(), "config.json", &body);

    let mut config = Config::new();
    config.load(&[path]).unwrap();

    let err = config.build_project_config().unwrap_err();
    assert!(matches!(err, ConfigError::Invalid));
}

#[test]
fn build_project_config_honors_globus_root_override() {
    let dir = tempdir().unwrap();
    let storage = tempdir().unwrap();
    let mut body_value: serde_json::Map<String, Value> =
        serde_json::from_str(&valid_config_json(dir.path(), storage.path())).unwrap();
    body_value.insert(
        "globus_root".to_string(),
        Value::String("/mnt/other-root/".to_string()),
    );
    let body = serde_json::to_string(&body_value).unwrap();
    let path = write_json(dir.path(), "config.json", &body);

    let mut config = Config::new();
    config.load(&[path]).unwrap();
    let project = config.build_project_config().unwrap();

    assert_eq!(project.globus_root, PathBuf::from("/mnt/other-root/"));
}
