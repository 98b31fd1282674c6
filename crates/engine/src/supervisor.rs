// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Project Supervisor (C6, spec.md §4.6): owns the directory setup, the
//! self-restarting transfer loop, the one-shot analysis-project startup,
//! and the ingest loop that admits newly-observed paths into the state
//! machine.

use crate::context::EngineContext;
use crate::handlers::transition;
use crate::monitor::{Monitor, Pull};
use cryo_commands::named;
use cryo_core::{Clock, Item, Trigger};
use std::sync::Arc;
use std::time::Duration;

/// ATC endpoint, source side of the periodic transfer.
const ATC_GLOBUS_ENDPOINT: &str = "67dace28-311f-11e8-b8f8-0ac6873fc732";
/// MOAB endpoint, destination side of the periodic transfer.
const MOAB_GLOBUS_ENDPOINT: &str = "dabdccc3-6d04-11e5-ba46-22000b92c6ec";

/// Delay before each transfer attempt, including the first (spec.md §4.6
/// point 3).
const TRANSFER_PRE_WAIT_SECS: u64 = 1800;
/// Delay before the one-shot analysis-project startup (spec.md §4.6 point 4).
const START_SCIPION_DELAY_SECS: u64 = 60;
/// Sleep between Monitor pulls once a pull returns no new paths (spec.md
/// §4.6 point 5).
const BETWEEN_PULLS_SECS: u64 = 2;

/// Drives one project's ingest loop, transfer loop, and startup sequence.
/// Construction is cheap; [`Supervisor::run_ingest_loop`] does the work and
/// only returns once the Monitor reaches end-of-stream.
pub struct Supervisor<C: Clock> {
    ctx: Arc<EngineContext<C>>,
}

impl<C: Clock> Supervisor<C> {
    pub fn new(ctx: Arc<EngineContext<C>>) -> Self {
        Self { ctx }
    }

    /// Create `local_root`, `storage_root`, and (when `frames > 1`)
    /// `local_root/stack/` (spec.md §4.6 point 1).
    pub fn ensure_root_directories(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.ctx.config.local_root)?;
        std::fs::create_dir_all(&self.ctx.config.storage_root)?;
        if self.ctx.config.frames > 1 {
            std::fs::create_dir_all(self.ctx.config.stack_dir())?;
        }
        Ok(())
    }

    /// Register a fresh Item for `original` and fire `initialize` on it
    /// (spec.md §4.6 point 5).
    fn admit(&self, original: std::path::PathBuf) {
        self.ctx.registry.lock().insert(Item::new(original.clone()));
        transition(&self.ctx, &original, Trigger::Initialize);
    }

    /// Run the ingest loop: pull from `monitor`, admit each newly-observed
    /// path with `MIN_IMPORT_INTERVAL` between admissions, sleep 2 s
    /// between empty pulls, and return once the Monitor reports
    /// end-of-stream. The caller is responsible for exiting the process
    /// with code 0 afterwards (spec.md §6 "Exit codes").
    pub async fn run_ingest_loop(&self, monitor: &mut Monitor<C>) {
        let admission_delay = Duration::from_secs_f64(self.ctx.config.min_import_interval_secs());
        loop {
            match monitor.pull() {
                Pull::EndOfStream => return,
                Pull::Paths(paths) => {
                    for path in paths {
                        self.admit(path);
                        tokio::time::sleep(admission_delay).await;
                    }
                    tokio::time::sleep(Duration::from_secs(BETWEEN_PULLS_SECS)).await;
                }
            }
        }
    }

    /// Launch the self-restarting transfer loop (spec.md §4.6 point 3). The
    /// returned future resolves immediately; the loop itself runs through
    /// scheduled callbacks on `ctx.helper`.
    pub fn launch_transfer_loop(&self) {
        schedule_transfer(self.ctx.clone());
    }

    /// Schedule the one-shot analysis-project startup at +60 s (spec.md
    /// §4.6 point 4).
    pub fn schedule_start_scipion(&self) {
        let ctx = self.ctx.clone();
        self.ctx
            .helper
            .schedule_after(Duration::from_secs(START_SCIPION_DELAY_SECS), move || {
                start_scipion(ctx);
            });
    }
}

/// `schedule-globus-transfer(pre_wait=1800s)`: sleep, run the transfer, then
/// relaunch regardless of the transfer's outcome (spec.md §4.6 point 3).
fn schedule_transfer<C: Clock>(ctx: Arc<EngineContext<C>>) {
    ctx.helper
        .schedule_after(Duration::from_secs(TRANSFER_PRE_WAIT_SECS), move || {
            run_transfer(ctx);
        });
}

fn run_transfer<C: Clock>(ctx: Arc<EngineContext<C>>) {
    let runner = ctx.runner.clone();
    let project_name = ctx.config.project_name.clone();
    let dest_root = ctx.config.globus_root.join(&project_name);
    let src_spec = format!("{ATC_GLOBUS_ENDPOINT}:/{project_name}");
    let dest_spec = format!("{MOAB_GLOBUS_ENDPOINT}:{}", dest_root.display());
    let flags = vec![
        "-s".to_string(),
        "mtime".to_string(),
        "-r".to_string(),
        "--preserve-mtime".to_string(),
        "--notify".to_string(),
        "failed,inactive".to_string(),
        "--label".to_string(),
        project_name.clone(),
    ];
    let argv = named::transfer(&src_spec, &dest_spec, &flags);
    let ctx2 = ctx.clone();
    ctx.helper.submit(
        async move { runner.run_and_wait(&argv).await },
        Some(move |code: i32| {
            tracing::info!(code, project = %project_name, "transfer loop iteration complete");
            schedule_transfer(ctx2);
        }),
    );
}

/// `_start_scipion`: no-op (logged) when no config file is configured,
/// otherwise creates the analysis project and, only on success, schedules
/// it (spec.md §4.6 point 4; original source's create-then-schedule
/// sequencing, gated on the create step's exit code).
fn start_scipion<C: Clock>(ctx: Arc<EngineContext<C>>) {
    let Some(config_path) = ctx.config.scipion_config_path.clone() else {
        tracing::info!(project = %ctx.config.project_name, "no analysis config configured, skipping project startup");
        return;
    };

    tracing::info!(project = %ctx.config.project_name, "creating analysis project");
    let runner = ctx.runner.clone();
    let project_name = ctx.config.project_name.clone();
    let argv = named::project_create(&config_path, &project_name);
    let ctx2 = ctx.clone();
    ctx.helper.submit(
        async move { runner.run_and_wait(&argv).await },
        Some(move |code: i32| {
            if code != 0 {
                tracing::warn!(code, project = %project_name, "analysis project creation failed, not scheduling");
                return;
            }
            schedule_project(ctx2, config_path, project_name);
        }),
    );
}

fn schedule_project<C: Clock>(
    ctx: Arc<EngineContext<C>>,
    config_path: std::path::PathBuf,
    project_name: String,
) {
    tracing::info!(project = %project_name, "scheduling analysis project");
    let runner = ctx.runner.clone();
    let argv = named::project_schedule(&config_path, &project_name);
    ctx.helper.submit(
        async move { runner.run_and_wait(&argv).await },
        Some(move |code: i32| {
            if code != 0 {
                tracing::warn!(code, project = %project_name, "analysis project scheduling failed");
            }
        }),
    );
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
