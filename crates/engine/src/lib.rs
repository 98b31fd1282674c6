// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cryo-engine: the single-threaded cooperative scheduler, the per-item
//! state handlers, and the Project Supervisor that drives a project's
//! acquisition pipeline end to end (spec.md §5, §6, §4.4-§4.5).

pub mod context;
pub mod error;
pub mod handlers;
pub mod monitor;
pub mod registry;
pub mod scheduler;
pub mod supervisor;

pub use context::EngineContext;
pub use error::EngineError;
pub use handlers::transition;
pub use monitor::{Monitor, Pull};
pub use registry::Registry;
pub use scheduler::{Callback, Helper, HelperQueue};
pub use supervisor::Supervisor;
