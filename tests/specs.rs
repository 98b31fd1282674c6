//! Behavioral specifications for cryoingestd.
//!
//! These tests are black-box: they invoke the `cryoingestd` binary and
//! verify stdout, stderr, and exit codes.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

#[path = "specs/cli.rs"]
mod cli;
#[path = "specs/config.rs"]
mod config;
#[path = "specs/walltime.rs"]
mod walltime;
