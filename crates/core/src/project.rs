// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Project-wide configuration (spec.md §3 "Project").

use std::path::PathBuf;

/// Default Globus transfer root, used when the config does not override it
/// (spec.md §6 "Filesystem layout").
pub const DEFAULT_GLOBUS_ROOT: &str = "/mnt/NCEF-CryoEM/";

/// Default inter-item admission delay before rescaling by `frames`
/// (spec.md §4.6 point 2).
pub const DEFAULT_MIN_IMPORT_INTERVAL_SECS: u64 = 45;

/// Static, validated configuration for one running project. Built once at
/// startup by `cryo-cli`'s config loader and handed to the Supervisor.
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    pub project_name: String,
    /// Glob pattern the Monitor polls (recursive, per spec.md §4.2).
    pub pattern: String,
    /// Number of frames per stack. `1` means single-frame, linear items.
    pub frames: u32,
    pub local_root: PathBuf,
    pub storage_root: PathBuf,
    pub globus_root: PathBuf,
    /// Path to the downstream analysis tool's config file. `None` skips
    /// project creation/scheduling at startup (spec.md §4.6 point 4).
    pub scipion_config_path: Option<PathBuf>,
    /// Name of the downstream analysis tool, used to build the processing
    /// indicator path `/var/www/<tool>/<project>/index.html` (spec.md §4.4
    /// `processing`).
    pub analysis_tool: String,
    /// Monitor `walltime` in seconds (spec.md §4.2).
    pub walltime_secs: u64,
}

impl ProjectConfig {
    /// The `MIN_IMPORT_INTERVAL` after rescaling by `frames` (spec.md §4.6
    /// point 2, §9 open question: kept per-instance rather than mutating a
    /// shared constant).
    pub fn min_import_interval_secs(&self) -> f64 {
        DEFAULT_MIN_IMPORT_INTERVAL_SECS as f64 / self.frames.max(1) as f64
    }

    pub fn stack_dir(&self) -> PathBuf {
        self.local_root.join("stack")
    }

    /// `/var/www/<tool>/<project>/index.html` (spec.md §4.4 `processing`).
    pub fn processing_indicator_path(&self) -> PathBuf {
        PathBuf::from("/var/www")
            .join(&self.analysis_tool)
            .join(&self.project_name)
            .join("index.html")
    }
}

/// Marker type distinguishing configuration (static) from the running
/// supervisor (`cryo-engine::Supervisor`), which owns the Monitor, Helper,
/// and Registry built from this config. Kept in `cryo-core` because the
/// engine, commands, and cli crates all need to refer to project
/// configuration without depending on the engine's runtime types.
#[derive(Debug, Clone, Copy)]
pub struct Project;
