// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Async Helper (C3): a single cooperative scheduler. `submit` and
//! `schedule_after` both route their completions through one channel, so a
//! single consumer loop (the Supervisor's) runs them one at a time — two
//! `on_enter_*` handlers for the same Item never interleave (spec.md §4.3).

use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;

/// A completion or timer callback, queued to run on the single consumer
/// loop.
pub type Callback = Box<dyn FnOnce() + Send>;

/// Handle used to submit work and schedule delayed callbacks. Cloning
/// shares the same underlying queue.
#[derive(Clone)]
pub struct Helper {
    tx: mpsc::UnboundedSender<Callback>,
}

/// The consuming half. Only the Supervisor's main loop drains this.
pub struct HelperQueue {
    rx: mpsc::UnboundedReceiver<Callback>,
}

impl Helper {
    /// Create a connected `(Helper, HelperQueue)` pair.
    pub fn new() -> (Self, HelperQueue) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, HelperQueue { rx })
    }

    /// Start `work` without blocking the caller. When it finishes,
    /// `completion` (if given) runs on the consumer loop with the work's
    /// result.
    pub fn submit<W, T, F>(&self, work: W, completion: Option<F>)
    where
        W: Future<Output = T> + Send + 'static,
        T: Send + 'static,
        F: FnOnce(T) + Send + 'static,
    {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = work.await;
            if let Some(completion) = completion {
                let _ = tx.send(Box::new(move || completion(result)));
            }
        });
    }

    /// Run `callback` on the consumer loop after `delay`. Non-cancellable.
    pub fn schedule_after<F>(&self, delay: Duration, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(Box::new(callback));
        });
    }

    /// Block the caller until `work` finishes. Used only by the
    /// Supervisor's startup sequence, never from inside an `on_enter`
    /// handler.
    pub async fn run_until_complete<W, T>(&self, work: W) -> T
    where
        W: Future<Output = T>,
    {
        work.await
    }
}

impl HelperQueue {
    /// Run callbacks as they arrive until the queue closes (every `Helper`
    /// clone dropped). Each callback runs to completion before the next is
    /// received — this is the serialization guarantee.
    pub async fn run(mut self) {
        while let Some(callback) = self.rx.recv().await {
            callback();
        }
    }

    /// Run one callback if one is immediately available, without blocking.
    /// Used in tests to drive the queue deterministically.
    pub fn try_run_one(&mut self) -> bool {
        match self.rx.try_recv() {
            Ok(callback) => {
                callback();
                true
            }
            Err(_) => false,
        }
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
