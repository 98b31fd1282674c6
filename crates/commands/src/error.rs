// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors from derived command operations (spec.md §4.1 "Derived operations").

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("destination exists: {0}")]
    DestinationExists(PathBuf),
}
