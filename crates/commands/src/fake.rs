// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake command runner for deterministic testing.

use crate::runner::CommandRunner;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Scripted response for one argv.
#[derive(Debug, Clone, Default)]
pub struct FakeResponse {
    pub exit_code: i32,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

/// Records every argv it was asked to run and replays a scripted response
/// keyed on the exact argv, falling back to a configurable default when
/// no response was scripted.
#[derive(Clone)]
pub struct FakeRunner {
    inner: Arc<Mutex<FakeRunnerState>>,
}

struct FakeRunnerState {
    calls: Vec<Vec<String>>,
    responses: HashMap<Vec<String>, FakeResponse>,
    default: FakeResponse,
}

impl Default for FakeRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeRunner {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeRunnerState {
                calls: Vec::new(),
                responses: HashMap::new(),
                default: FakeResponse {
                    exit_code: 0,
                    stdout: Vec::new(),
                    stderr: Vec::new(),
                },
            })),
        }
    }

    /// Script the response for one exact argv.
    pub fn on(&self, argv: Vec<String>, response: FakeResponse) {
        self.inner.lock().responses.insert(argv, response);
    }

    /// Change the response returned for argv with no scripted entry.
    pub fn set_default(&self, response: FakeResponse) {
        self.inner.lock().default = response;
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.inner.lock().calls.clone()
    }

    fn resolve(&self, argv: &[String]) -> FakeResponse {
        let mut inner = self.inner.lock();
        inner.calls.push(argv.to_vec());
        inner
            .responses
            .get(argv)
            .cloned()
            .unwrap_or_else(|| inner.default.clone())
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run_and_wait(&self, argv: &[String]) -> i32 {
        self.resolve(argv).exit_code
    }

    async fn run_and_capture(&self, argv: &[String]) -> (Vec<u8>, Vec<u8>) {
        let response = self.resolve(argv);
        (response.stdout, response.stderr)
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
