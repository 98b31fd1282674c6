// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Command Runner (spec.md §4.1): runs an external argv, returning
//! either its exit code or its captured stdout/stderr. Never shell
//! interpretation; argv elements are passed literally.

use async_trait::async_trait;
use tokio::process::Command;

/// Run an external command and observe its outcome. Implementors never
/// treat a non-zero exit or a launch failure as fatal — both surface as
/// ordinary return values (spec.md §4.1: "not as a pipeline fatal error").
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Launch `argv`, wait for it to exit, return its exit code. A launch
    /// failure (missing binary) is reported as exit code 127, mirroring a
    /// shell's own convention for "command not found".
    async fn run_and_wait(&self, argv: &[String]) -> i32;

    /// Launch `argv`, wait for it to exit, return captured stdout/stderr.
    /// Both are returned even on non-zero exit. A launch failure yields two
    /// empty buffers.
    async fn run_and_capture(&self, argv: &[String]) -> (Vec<u8>, Vec<u8>);
}

/// Runs commands against the real OS process table.
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }

    async fn spawn(&self, argv: &[String]) -> std::io::Result<std::process::Output> {
        let Some((program, args)) = argv.split_first() else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "empty argv",
            ));
        };
        Command::new(program).args(args).output().await
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run_and_wait(&self, argv: &[String]) -> i32 {
        let start = std::time::Instant::now();
        let elapsed = || cryo_core::time_fmt::format_elapsed_ms(start.elapsed().as_millis() as u64);
        match self.spawn(argv).await {
            Ok(output) => {
                let code = output.status.code().unwrap_or(-1);
                if output.status.success() {
                    tracing::debug!(command = %argv.join(" "), elapsed = %elapsed(), "command succeeded");
                } else {
                    tracing::warn!(command = %argv.join(" "), code, elapsed = %elapsed(), "command exited non-zero");
                }
                code
            }
            Err(err) => {
                tracing::warn!(command = %argv.join(" "), %err, elapsed = %elapsed(), "command failed to launch");
                127
            }
        }
    }

    async fn run_and_capture(&self, argv: &[String]) -> (Vec<u8>, Vec<u8>) {
        let start = std::time::Instant::now();
        let elapsed = || cryo_core::time_fmt::format_elapsed_ms(start.elapsed().as_millis() as u64);
        match self.spawn(argv).await {
            Ok(output) => {
                if output.status.success() {
                    tracing::debug!(command = %argv.join(" "), elapsed = %elapsed(), "command succeeded");
                } else {
                    tracing::warn!(
                        command = %argv.join(" "),
                        code = output.status.code(),
                        elapsed = %elapsed(),
                        "command exited non-zero",
                    );
                }
                (output.stdout, output.stderr)
            }
            Err(err) => {
                tracing::warn!(command = %argv.join(" "), %err, elapsed = %elapsed(), "command failed to launch");
                (Vec::new(), Vec::new())
            }
        }
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
