// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File-Pattern Monitor (C2): a lazy, restartable source of sorted
//! "newly-appeared" path sets (spec.md §4.2).

use cryo_core::Clock;
use glob::glob;
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Result of one [`Monitor::pull`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pull {
    /// Sorted, newly-observed paths. May be empty.
    Paths(Vec<PathBuf>),
    /// Terminal, non-error signal: no change within `walltime`. Callers
    /// must stop the ingest loop.
    EndOfStream,
}

/// Polls a glob pattern and reports paths it has not reported before.
/// `seen` only ever grows (spec.md §3 "Monitor state": "removals are not
/// observed"). `base_time` resets to "now" on every non-empty pull.
pub struct Monitor<C: Clock> {
    pattern: String,
    walltime: Duration,
    base_time: Instant,
    seen: HashSet<PathBuf>,
    clock: C,
}

impl<C: Clock> Monitor<C> {
    pub fn new(pattern: impl Into<String>, walltime: Duration, clock: C) -> Self {
        let base_time = clock.instant_now();
        Self {
            pattern: pattern.into(),
            walltime,
            base_time,
            seen: HashSet::new(),
            clock,
        }
    }

    /// Poll the pattern once. Returns end-of-stream once `now` exceeds
    /// `base_time + walltime` with no intervening non-empty pull.
    /// `walltime == 0` means "end immediately unless something just
    /// changed" (spec.md §4.2).
    pub fn pull(&mut self) -> Pull {
        let now = self.clock.instant_now();

        let mut fresh: Vec<PathBuf> = glob(&self.pattern)
            .into_iter()
            .flatten()
            .filter_map(Result::ok)
            .filter(|path| !self.seen.contains(path))
            .collect();
        fresh.sort();

        if fresh.is_empty() {
            if now > self.base_time + self.walltime {
                return Pull::EndOfStream;
            }
            return Pull::Paths(fresh);
        }

        for path in &fresh {
            self.seen.insert(path.clone());
        }
        self.base_time = now;
        Pull::Paths(fresh)
    }
}

#[cfg(test)]
#[path = "monitor_tests.rs"]
mod tests;
