// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors a handler can raise. Only [`EngineError`] is fatal — everything
//! else in the pipeline's error taxonomy (transient-IO, transient-compute,
//! verification-mismatch, transition-denied) is handled in place by
//! scheduling a retry, never by returning an `Err` (spec.md §7).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Core(#[from] cryo_core::CoreError),
}
