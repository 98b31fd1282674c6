// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Everything a state handler needs: the project's static config, the
//! Command Runner, the Helper it submits work through, the Registry it
//! mutates, and the clock it reads for timing decisions.

use crate::registry::Registry;
use crate::scheduler::Helper;
use cryo_commands::CommandRunner;
use cryo_core::{Clock, ProjectConfig};
use parking_lot::Mutex;
use std::sync::Arc;

pub struct EngineContext<C: Clock> {
    pub config: ProjectConfig,
    pub runner: Arc<dyn CommandRunner>,
    pub helper: Helper,
    pub registry: Mutex<Registry>,
    pub clock: C,
}

impl<C: Clock> EngineContext<C> {
    pub fn new(config: ProjectConfig, runner: Arc<dyn CommandRunner>, helper: Helper, clock: C) -> Arc<Self> {
        Arc::new(Self {
            config,
            runner,
            helper,
            registry: Mutex::new(Registry::new()),
            clock,
        })
    }
}
