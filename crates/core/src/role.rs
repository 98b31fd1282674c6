// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Path-role map: the small fixed set of role tags an [`crate::item`]
//! accumulates as it moves through the workflow (spec.md §3).

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A single-path role tag. `local_unstacked` is deliberately not a variant
/// here — it holds a *list* of child items rather than one path, and lives
/// as its own field on `Item` instead (see `item::Item::unstacked_children`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    /// Source location as seen by the monitor.
    Original,
    /// Copied-in scratch file.
    LocalOriginal,
    /// Optional intermediate after format conversion.
    LocalConverted,
    /// The file that will be compressed (may alias `LocalOriginal`).
    LocalStack,
    /// Compressed artifact on scratch.
    LocalCompressed,
    /// Re-expanded file used for verification.
    LocalUncompressed,
    /// Exported artifact in durable storage.
    StorageFinal,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoleMapError {
    #[error("role {0:?} already set")]
    AlreadySet(Role),
    #[error("role {0:?} not set")]
    NotSet(Role),
}

/// Mapping from role tag to path. Invariant: a role is set exactly once per
/// item lifetime, except `LocalOriginal`, which is rebound during
/// `confirming` (the rename to `.orig` updates the map atomically with the
/// rename, see `engine`'s `on_enter_confirming`).
#[derive(Debug, Clone, Default)]
pub struct RoleMap {
    paths: HashMap<Role, PathBuf>,
}

impl RoleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, role: Role) -> Option<&Path> {
        self.paths.get(&role).map(PathBuf::as_path)
    }

    pub fn require(&self, role: Role) -> Result<&Path, RoleMapError> {
        self.get(role).ok_or(RoleMapError::NotSet(role))
    }

    pub fn contains(&self, role: Role) -> bool {
        self.paths.contains_key(&role)
    }

    /// Set a role's path. Fails if already set (except `LocalOriginal`,
    /// which may be rebound once during `confirming`).
    pub fn set(&mut self, role: Role, path: PathBuf) -> Result<(), RoleMapError> {
        if role != Role::LocalOriginal && self.paths.contains_key(&role) {
            return Err(RoleMapError::AlreadySet(role));
        }
        self.paths.insert(role, path);
        Ok(())
    }

    /// Rebind `LocalOriginal` unconditionally — used by the `confirming`
    /// rename-to-`.orig` step, which is the one documented exception to
    /// "set exactly once".
    pub fn rebind_local_original(&mut self, path: PathBuf) {
        self.paths.insert(Role::LocalOriginal, path);
    }

    /// All roles currently present, in the canonical per-frame-count order
    /// used by invariant checks (spec.md §8 Invariant 1).
    pub fn present_roles(&self) -> Vec<Role> {
        const ORDER: [Role; 7] = [
            Role::Original,
            Role::LocalOriginal,
            Role::LocalConverted,
            Role::LocalStack,
            Role::LocalCompressed,
            Role::LocalUncompressed,
            Role::StorageFinal,
        ];
        ORDER
            .into_iter()
            .filter(|r| self.paths.contains_key(r))
            .collect()
    }
}

#[cfg(test)]
#[path = "role_tests.rs"]
mod tests;
