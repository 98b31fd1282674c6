// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types shared by the data model.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    RoleMap(#[from] crate::role::RoleMapError),
    #[error(transparent)]
    Transition(#[from] crate::state::TransitionError),
}
