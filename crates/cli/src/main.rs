// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! cryoingestd: the acquisition-station ingestion daemon. Loads a project's
//! configuration, starts its transfer loop and analysis-project startup,
//! then runs the ingest loop until the source pattern goes quiet.

use clap::Parser;
use cryo_commands::SystemRunner;
use cryo_core::SystemClock;
use cryo_engine::{EngineContext, Helper, Monitor, Supervisor};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal::unix::{signal, SignalKind};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "cryoingestd", version, about = "Cryo-EM acquisition ingestion daemon")]
struct Args {
    /// Configuration file (JSON). May be repeated; later files win
    /// key-by-key over earlier ones.
    #[arg(long = "config", required = true)]
    config: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    setup_logging();

    let mut config = cryo_cli::Config::new();
    config.load(&args.config)?;
    let project_config = config.build_project_config()?;

    tracing::info!(project = %project_config.project_name, "starting ingest daemon");

    let pattern = project_config.pattern.clone();
    let walltime = Duration::from_secs(project_config.walltime_secs);

    let (helper, queue) = Helper::new();
    let runner = Arc::new(SystemRunner::new());
    let ctx = EngineContext::new(project_config, runner, helper, SystemClock);
    let supervisor = Supervisor::new(ctx.clone());

    supervisor.ensure_root_directories()?;
    supervisor.launch_transfer_loop();
    supervisor.schedule_start_scipion();

    tokio::spawn(queue.run());

    let mut monitor = Monitor::new(pattern, walltime, SystemClock);

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    tokio::select! {
        () = supervisor.run_ingest_loop(&mut monitor) => {
            tracing::info!(project = %ctx.config.project_name, "monitor reached end-of-stream, exiting");
        }
        _ = sigterm.recv() => {
            tracing::info!("received SIGTERM, shutting down");
        }
        _ = sigint.recv() => {
            tracing::info!("received SIGINT, shutting down");
        }
    }

    Ok(())
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
