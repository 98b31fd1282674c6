// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The state-machine registry (spec.md §3): live Items keyed by `original`.
//! Mutated only from the single consumer loop, so a `parking_lot::Mutex`
//! per Item plus a plain `HashMap` for membership is sufficient — no
//! cross-item locking is ever required.

use cryo_core::Item;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Default)]
pub struct Registry {
    items: HashMap<PathBuf, Arc<Mutex<Item>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a freshly-created Item. Panics if `original` is already
    /// registered — the Monitor guarantees each path arrives once (spec.md
    /// §3: "at most one Item per `original` path may be registered").
    pub fn insert(&mut self, item: Item) -> Arc<Mutex<Item>> {
        let original = item.original().to_path_buf();
        let handle = Arc::new(Mutex::new(item));
        let previous = self.items.insert(original, handle.clone());
        debug_assert!(previous.is_none(), "duplicate registration for one original path");
        handle
    }

    pub fn get(&self, original: &Path) -> Option<Arc<Mutex<Item>>> {
        self.items.get(original).cloned()
    }

    /// Look up the parent for a stack key, or create and register one
    /// directly in `stacking` if absent (spec.md §4.5 point 1).
    pub fn get_or_create_parent(&mut self, stack_key: PathBuf) -> Arc<Mutex<Item>> {
        self.items
            .entry(stack_key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(Item::new_parent_stack(stack_key))))
            .clone()
    }

    pub fn remove(&mut self, original: &Path) -> Option<Arc<Mutex<Item>>> {
        self.items.remove(original)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
