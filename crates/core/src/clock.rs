// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction so timing-sensitive logic (the `creating` quiescence
//! check, the Monitor's `walltime`, scheduler delays) can be driven by a
//! fake clock in tests instead of real sleeps.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};

/// A source of monotonic and wall-clock time.
pub trait Clock: Clone + Send + Sync + 'static {
    /// Monotonic instant, used for scheduler deadlines and the Monitor's
    /// `base_time`/`walltime` accounting.
    fn instant_now(&self) -> Instant;

    /// Wall-clock time, used to compare against filesystem `mtime`.
    fn unix_now(&self) -> SystemTime;
}

/// Production clock backed by the OS.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn instant_now(&self) -> Instant {
        Instant::now()
    }

    fn unix_now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Deterministic clock for tests. Starts at process startup's `Instant`/
/// `SystemTime` and advances only when told to via [`FakeClock::advance`].
#[derive(Debug, Clone)]
pub struct FakeClock {
    base_instant: Instant,
    base_unix: SystemTime,
    offset_ms: Arc<AtomicU64>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self {
            base_instant: Instant::now(),
            base_unix: SystemTime::now(),
            offset_ms: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Advance the fake clock by `d`.
    pub fn advance(&self, d: Duration) {
        self.offset_ms
            .fetch_add(d.as_millis() as u64, Ordering::SeqCst);
    }

    fn offset(&self) -> Duration {
        Duration::from_millis(self.offset_ms.load(Ordering::SeqCst))
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn instant_now(&self) -> Instant {
        self.base_instant + self.offset()
    }

    fn unix_now(&self) -> SystemTime {
        self.base_unix + self.offset()
    }
}

/// Seconds between `unix_now()` and the given `mtime`, as the `creating`
/// quiescence check needs (`now - mtime`). Negative values mean `mtime` is
/// in the future relative to the clock (clock skew); callers treat that as
/// "not yet quiescent".
pub fn age_secs(clock: &impl Clock, mtime: SystemTime) -> i64 {
    match clock.unix_now().duration_since(mtime) {
        Ok(d) => d.as_secs() as i64,
        Err(e) => -(e.duration().as_secs() as i64),
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
