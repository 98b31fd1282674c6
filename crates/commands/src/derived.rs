// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Derived command operations built on top of the named commands (spec.md
//! §4.1 "Derived operations").

use crate::error::CommandError;
use crate::named;
use crate::runner::CommandRunner;
use std::path::Path;

/// Run `sha1` on both paths; true iff the first stdout tokens match.
/// Fails with [`CommandError::FileNotFound`] when either stdout is empty.
pub async fn hash_compare(
    runner: &dyn CommandRunner,
    a: &Path,
    b: &Path,
) -> Result<bool, CommandError> {
    let (a_out, _) = runner.run_and_capture(&named::sha1(a)).await;
    let a_hash = first_token(&a_out).ok_or_else(|| CommandError::FileNotFound(a.to_path_buf()))?;

    let (b_out, _) = runner.run_and_capture(&named::sha1(b)).await;
    let b_hash = first_token(&b_out).ok_or_else(|| CommandError::FileNotFound(b.to_path_buf()))?;

    Ok(a_hash == b_hash)
}

fn first_token(stdout: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(stdout);
    let token = text.split_whitespace().next()?;
    Some(token.to_string())
}

/// Copy `src` to `dest`, failing with [`CommandError::DestinationExists`]
/// if `dest` already exists.
pub async fn safe_copy(
    runner: &dyn CommandRunner,
    src: &Path,
    dest: &Path,
) -> Result<i32, CommandError> {
    if dest.exists() {
        return Err(CommandError::DestinationExists(dest.to_path_buf()));
    }
    Ok(runner.run_and_wait(&named::copy(src, dest)).await)
}

#[cfg(test)]
#[path = "derived_tests.rs"]
mod tests;
