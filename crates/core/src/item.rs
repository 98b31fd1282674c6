// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The per-file workflow item (spec.md §3 "Item", §4.5 "Workflow Item &
//! Stacking Rendez-vous").

use crate::role::RoleMap;
use crate::state::State;
use std::path::{Path, PathBuf};

/// One file moving through the workflow. Its identity is `original`, the
/// path as first observed by the Monitor — the Registry keys on it, so it
/// never changes for the life of the Item.
///
/// `unstacked_children` is only ever non-empty on a *parent stack item*: the
/// ordered list of child `original` paths gathered during the `stacking`
/// rendez-vous (spec.md §4.5). It is not a `Role`, because a role holds a
/// single path and this holds a list.
#[derive(Debug, Clone)]
pub struct Item {
    original: PathBuf,
    pub roles: RoleMap,
    pub state: State,
    pub unstacked_children: Vec<PathBuf>,
}

impl Item {
    /// A freshly-observed Item, starting in `initial` with its `original`
    /// role already set.
    pub fn new(original: PathBuf) -> Self {
        let mut roles = RoleMap::new();
        let _ = roles.set(crate::role::Role::Original, original.clone());
        Self {
            original,
            roles,
            state: State::Initial,
            unstacked_children: Vec::new(),
        }
    }

    /// A parent stack item, registered directly into `stacking` (bypassing
    /// `initial` — it has no staging file of its own to wait for).
    pub fn new_parent_stack(original: PathBuf) -> Self {
        let mut roles = RoleMap::new();
        let _ = roles.set(crate::role::Role::Original, original.clone());
        Self {
            original,
            roles,
            state: State::Stacking,
            unstacked_children: Vec::new(),
        }
    }

    pub fn original(&self) -> &Path {
        &self.original
    }

    /// Append a child's `original` to this parent's unstacked list. Callers
    /// must only do this on a parent item (spec.md §4.5 invariant: each
    /// child appears in exactly one parent's list, in arrival order).
    pub fn push_unstacked_child(&mut self, child_original: PathBuf) {
        self.unstacked_children.push(child_original);
    }

    /// Whether this parent has gathered exactly `frames` children and may
    /// fire `stack` (spec.md §4.5, §8 Invariant 2).
    pub fn ready_to_stack(&self, frames: u32) -> bool {
        self.unstacked_children.len() == frames as usize
    }
}

/// Derive the shared stack key for a child Item entering `stacking`
/// (spec.md §4.5): the filename stem of `local_original` with its trailing
/// two characters removed, plus the original extension, placed under
/// `local_root/stack/`.
///
/// Example: `local_original = /tmp/p/frame_00.mrc` → `/tmp/p/stack/frame_.mrc`.
pub fn derive_stack_key(local_original: &Path, local_root: &Path) -> PathBuf {
    let stem: String = local_original
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let trimmed_len = stem.chars().count().saturating_sub(2);
    let trimmed: String = stem.chars().take(trimmed_len).collect();
    let suffix = match local_original.extension() {
        Some(ext) => format!("{trimmed}.{}", ext.to_string_lossy()),
        None => trimmed,
    };
    local_root.join("stack").join(suffix)
}

#[cfg(test)]
#[path = "item_tests.rs"]
mod tests;
