// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Flat JSON configuration (spec.md §6 "Configuration file (JSON)"):
//! multiple files merge with last-wins semantics, unknown keys are ignored,
//! and each option carries an ordered list of validators run by
//! `validate_all`.

use cryo_core::project::DEFAULT_GLOBUS_ROOT;
use cryo_core::ProjectConfig;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default Monitor walltime when `walltime_secs` is not configured: 12
/// hours, long enough to span an overnight idle gap between acquisitions
/// without mistaking it for end-of-stream.
const DEFAULT_WALLTIME_SECS: u64 = 43_200;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path} as JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("configuration did not pass validation")]
    Invalid,
    #[error("missing required option: {0}")]
    MissingOption(&'static str),
    #[error("option {0} has the wrong type")]
    WrongType(&'static str),
}

type Validator = Box<dyn Fn(&Value) -> bool + Send + Sync>;

/// Flat key→value configuration map with per-option validators. Options not
/// present in `values` are treated as unvalidated (spec.md §6: validators
/// run only against options that are actually set).
pub struct Config {
    values: HashMap<String, Value>,
    validators: HashMap<&'static str, Vec<Validator>>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
            validators: default_validators(),
        }
    }

    /// Load and merge each file in `paths`, in order — later files override
    /// earlier ones key-by-key (spec.md §6: "last-wins").
    pub fn load(&mut self, paths: &[PathBuf]) -> Result<(), ConfigError> {
        for path in paths {
            self.load_one(path)?;
        }
        Ok(())
    }

    fn load_one(&mut self, path: &Path) -> Result<(), ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let parsed: HashMap<String, Value> =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        self.values.extend(parsed);
        Ok(())
    }

    /// True iff every predicate of every validated option passes (spec.md
    /// §6). An option with no value set is skipped, mirroring the original
    /// behavior of logging and continuing rather than failing on a missing
    /// key.
    pub fn validate_all(&self) -> bool {
        self.validators.iter().all(|(key, predicates)| {
            let Some(value) = self.values.get(*key) else {
                tracing::info!(key, "did not validate, config option not found");
                return true;
            };
            predicates.iter().all(|predicate| {
                let ok = predicate(value);
                if !ok {
                    tracing::warn!(key, %value, "configuration check failed");
                }
                ok
            })
        })
    }

    fn str(&self, key: &'static str) -> Result<String, ConfigError> {
        self.values
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or(ConfigError::MissingOption(key))
    }

    fn str_opt(&self, key: &'static str) -> Result<Option<String>, ConfigError> {
        match self.values.get(key) {
            None => Ok(None),
            Some(Value::Null) => Ok(None),
            Some(v) => v
                .as_str()
                .map(|s| Some(s.to_owned()))
                .ok_or(ConfigError::WrongType(key)),
        }
    }

    fn u64_or(&self, key: &'static str, default: u64) -> Result<u64, ConfigError> {
        match self.values.get(key) {
            None => Ok(default),
            Some(v) => v.as_u64().ok_or(ConfigError::WrongType(key)),
        }
    }

    /// Build the validated, typed [`ProjectConfig`] the Supervisor runs
    /// against. Fails closed: any required option missing or of the wrong
    /// type, or any validator failing, is reported rather than defaulted.
    pub fn build_project_config(&self) -> Result<ProjectConfig, ConfigError> {
        if !self.validate_all() {
            return Err(ConfigError::Invalid);
        }

        let globus_root = self
            .str_opt("globus_root")?
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_GLOBUS_ROOT));

        Ok(ProjectConfig {
            project_name: self.str("project_name")?,
            pattern: self.str("source_pattern")?,
            frames: self.u64_or("frames_to_stack", 1)? as u32,
            local_root: PathBuf::from(self.str("working_directory")?),
            storage_root: PathBuf::from(self.str("storage_root")?),
            globus_root,
            scipion_config_path: self.str_opt("scipion_config_path")?.map(PathBuf::from),
            analysis_tool: self
                .str_opt("analysis_tool")?
                .unwrap_or_else(|| "scipion".to_string()),
            walltime_secs: self.u64_or("walltime_secs", DEFAULT_WALLTIME_SECS)?,
        })
    }
}

fn non_empty_str() -> Validator {
    Box::new(|v: &Value| v.as_str().is_some_and(|s| !s.is_empty()))
}

fn path_exists() -> Validator {
    Box::new(|v: &Value| v.as_str().is_some_and(|s| Path::new(s).exists()))
}

fn in_range_u64(lo: u64, hi: u64) -> Validator {
    Box::new(move |v: &Value| v.as_u64().is_some_and(|n| lo < n && n < hi))
}

/// Mirrors the original per-option validator table: each option carries an
/// ordered list of predicates, run in order by [`Config::validate_all`].
fn default_validators() -> HashMap<&'static str, Vec<Validator>> {
    let mut validators: HashMap<&'static str, Vec<Validator>> = HashMap::new();
    validators.insert("project_name", vec![non_empty_str()]);
    validators.insert("source_pattern", vec![non_empty_str()]);
    validators.insert("working_directory", vec![non_empty_str()]);
    validators.insert("storage_root", vec![non_empty_str()]);
    validators.insert("frames_to_stack", vec![in_range_u64(0, 100)]);
    validators.insert("scipion_config_path", vec![path_exists()]);
    validators
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
