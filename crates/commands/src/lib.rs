// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cryo-commands: the Command Runner and the named/derived operations
//! built on it (spec.md §4.1). No subprocess interpretation beyond literal
//! argv passing lives anywhere else in this workspace.

pub mod derived;
pub mod error;
pub mod named;
pub mod runner;

#[cfg(any(test, feature = "test-support"))]
pub mod fake;

pub use derived::{hash_compare, safe_copy};
pub use error::CommandError;
pub use runner::{CommandRunner, SystemRunner};

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeResponse, FakeRunner};
