// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-state `on_enter` handlers (spec.md §4.4, §4.5) and the transition
//! driver that invokes them. Handlers never block the consumer loop:
//! subprocess work goes through `ctx.helper.submit`, retries through
//! `ctx.helper.schedule_after`.

use crate::context::EngineContext;
use crate::error::EngineError;
use cryo_commands::{hash_compare, named, safe_copy, CommandError};
use cryo_core::{item::derive_stack_key, state, Clock, CoreError, Item, Role, RoleMap, State, Trigger};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

const CREATING_QUIESCENCE_SECS: i64 = 15;
const IMPORT_RETRY_SECS: u64 = 10;
const CONVERT_RETRY_SECS: u64 = 10;
const EXPORT_RETRY_SECS: u64 = 10;
const PROCESSING_RETRY_SECS: u64 = 10;
const CONFIRM_RETRY_SECS: u64 = 10;

/// Fire `trigger` against the Item registered under `original`. Transition
/// denied and unregistered-item cases are logged and dropped, never fatal
/// (spec.md §7 "transition-denied").
pub fn transition<C: Clock>(ctx: &Arc<EngineContext<C>>, original: &Path, trigger: Trigger) {
    let Some(item_arc) = ctx.registry.lock().get(original) else {
        tracing::warn!(path = %original.display(), %trigger, "transition fired for unregistered item");
        return;
    };
    let new_state = {
        let mut locked = item_arc.lock();
        match state::fire(locked.state, trigger) {
            Ok(next) => {
                locked.state = next;
                Some(next)
            }
            Err(err) => {
                tracing::info!(%err, "transition denied");
                None
            }
        }
    };
    if let Some(next) = new_state {
        enter_state(ctx.clone(), item_arc, next);
    }
}

fn enter_state<C: Clock>(ctx: Arc<EngineContext<C>>, item: Arc<Mutex<Item>>, state: State) {
    match state {
        State::Initial => {}
        State::Creating => on_enter_creating(ctx, item),
        State::Importing => on_enter_importing(ctx, item),
        State::Converting => on_enter_converting(ctx, item),
        State::Stacking => on_enter_stacking(ctx, item),
        State::Compressing => on_enter_compressing(ctx, item),
        State::Exporting => on_enter_exporting(ctx, item),
        State::Processing => on_enter_processing(ctx, item),
        State::Confirming => on_enter_confirming(ctx, item),
        State::Cleaning => on_enter_cleaning(ctx, item),
        State::Finished => on_enter_finished(ctx, item),
    }
}

/// Record a role, aborting the process on a role-map invariant violation
/// (spec.md §7 "fatal"). A double-set here means two handlers raced on the
/// same Item, a programming error rather than recoverable per-item state.
fn set_role(roles: &mut RoleMap, original: &Path, role: Role, path: PathBuf) {
    if let Err(err) = roles.set(role, path) {
        let err: EngineError = CoreError::from(err).into();
        tracing::error!(path = %original.display(), %err, "fatal: role invariant violated");
        std::process::exit(1);
    }
}

fn append_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut os = path.as_os_str().to_owned();
    os.push(suffix);
    PathBuf::from(os)
}

// --- creating ----------------------------------------------------------

fn on_enter_creating<C: Clock>(ctx: Arc<EngineContext<C>>, item: Arc<Mutex<Item>>) {
    let original = item.lock().original().to_path_buf();

    let mtime = match std::fs::metadata(&original).and_then(|m| m.modified()) {
        Ok(mtime) => mtime,
        Err(err) => {
            tracing::warn!(path = %original.display(), %err, "stat failed; re-checking shortly");
            reschedule_creating(ctx, item, CREATING_QUIESCENCE_SECS as u64 + 1);
            return;
        }
    };

    let age = cryo_core::clock::age_secs(&ctx.clock, mtime);
    if age > CREATING_QUIESCENCE_SECS {
        let elapsed = cryo_core::time_fmt::format_elapsed(age.max(0) as u64);
        tracing::info!(path = %original.display(), elapsed, "quiescence elapsed; importing");
        transition(&ctx, &original, Trigger::ImportFile);
    } else {
        let delay = (CREATING_QUIESCENCE_SECS + 1 - age).max(1) as u64;
        reschedule_creating(ctx, item, delay);
    }
}

fn reschedule_creating<C: Clock>(ctx: Arc<EngineContext<C>>, item: Arc<Mutex<Item>>, delay_secs: u64) {
    let ctx2 = ctx.clone();
    ctx.helper
        .schedule_after(Duration::from_secs(delay_secs), move || {
            on_enter_creating(ctx2, item);
        });
}

// --- importing -----------------------------------------------------------

fn on_enter_importing<C: Clock>(ctx: Arc<EngineContext<C>>, item: Arc<Mutex<Item>>) {
    let original = item.lock().original().to_path_buf();
    let Some(basename) = original.file_name() else {
        tracing::error!(path = %original.display(), "staged path has no file name");
        return;
    };
    let local_original = ctx.config.local_root.join(basename);

    let runner = ctx.runner.clone();
    let src = original.clone();
    let dest = local_original.clone();
    let ctx2 = ctx.clone();
    let item2 = item.clone();
    ctx.helper.submit(
        async move { safe_copy(runner.as_ref(), &src, &dest).await },
        Some(move |result: Result<i32, CommandError>| {
            complete_importing(ctx2, item2, local_original, result);
        }),
    );
}

fn complete_importing<C: Clock>(
    ctx: Arc<EngineContext<C>>,
    item: Arc<Mutex<Item>>,
    local_original: PathBuf,
    result: Result<i32, CommandError>,
) {
    let original = item.lock().original().to_path_buf();
    let succeeded = matches!(result, Ok(0));
    if !succeeded {
        tracing::warn!(path = %original.display(), ?result, "import failed; retrying in 10s");
        let ctx2 = ctx.clone();
        let original2 = original.clone();
        ctx.helper
            .schedule_after(Duration::from_secs(IMPORT_RETRY_SECS), move || {
                transition(&ctx2, &original2, Trigger::ImportFile);
            });
        return;
    }

    let (frames, is_dm4) = {
        let mut locked = item.lock();
        set_role(&mut locked.roles, &original, Role::LocalOriginal, local_original.clone());
        let is_dm4 = local_original
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("dm4"))
            .unwrap_or(false);
        (ctx.config.frames, is_dm4)
    };

    if frames > 1 {
        transition(&ctx, &original, Trigger::Stack);
    } else if is_dm4 {
        transition(&ctx, &original, Trigger::ConvertToMrc);
    } else {
        {
            let mut locked = item.lock();
            set_role(&mut locked.roles, &original, Role::LocalStack, local_original);
        }
        transition(&ctx, &original, Trigger::Compress);
    }
}

// --- converting ------------------------------------------------------------

fn on_enter_converting<C: Clock>(ctx: Arc<EngineContext<C>>, item: Arc<Mutex<Item>>) {
    let (original, local_original) = {
        let locked = item.lock();
        let Some(local_original) = locked.roles.get(Role::LocalOriginal).map(Path::to_path_buf)
        else {
            tracing::error!("converting entered without local_original set");
            return;
        };
        (locked.original().to_path_buf(), local_original)
    };
    let local_converted = local_original.with_extension("mrc");
    {
        let mut locked = item.lock();
        set_role(&mut locked.roles, &original, Role::LocalConverted, local_converted.clone());
    }

    let runner = ctx.runner.clone();
    let src = local_original;
    let dest = local_converted;
    let ctx2 = ctx.clone();
    let item2 = item.clone();
    ctx.helper.submit(
        async move { runner.run_and_wait(&named::format_convert(&src, &dest)).await },
        Some(move |code: i32| complete_converting(ctx2, item2, original, code)),
    );
}

fn complete_converting<C: Clock>(
    ctx: Arc<EngineContext<C>>,
    item: Arc<Mutex<Item>>,
    original: PathBuf,
    code: i32,
) {
    if code != 0 {
        tracing::warn!(path = %original.display(), code, "format conversion failed; retrying in 10s");
        let ctx2 = ctx.clone();
        let original2 = original.clone();
        ctx.helper
            .schedule_after(Duration::from_secs(CONVERT_RETRY_SECS), move || {
                transition(&ctx2, &original2, Trigger::ConvertToMrc);
            });
        return;
    }

    // local_stack is set to local_original, not local_converted — this
    // mirrors the original pipeline's behavior verbatim (see DESIGN.md).
    let mut locked = item.lock();
    if let Some(local_original) = locked.roles.get(Role::LocalOriginal).map(Path::to_path_buf) {
        set_role(&mut locked.roles, &original, Role::LocalStack, local_original);
    }
    drop(locked);
    transition(&ctx, &original, Trigger::Compress);
}

// --- stacking --------------------------------------------------------------

fn on_enter_stacking<C: Clock>(ctx: Arc<EngineContext<C>>, item: Arc<Mutex<Item>>) {
    let (original, local_original) = {
        let locked = item.lock();
        (
            locked.original().to_path_buf(),
            locked.roles.get(Role::LocalOriginal).map(Path::to_path_buf),
        )
    };

    match local_original {
        // Child entering stacking for the first time: run the rendezvous.
        Some(local_original) => {
            let stack_key = derive_stack_key(&local_original, &ctx.config.local_root);
            let parent = {
                let mut registry = ctx.registry.lock();
                registry.get_or_create_parent(stack_key.clone())
            };
            parent.lock().push_unstacked_child(original);
            transition(&ctx, &stack_key, Trigger::Stack);
        }
        // Parent re-checking whether it has gathered enough children.
        None => {
            let (children, ready) = {
                let locked = item.lock();
                (
                    locked.unstacked_children.clone(),
                    locked.ready_to_stack(ctx.config.frames),
                )
            };
            if !ready {
                return;
            }
            let runner = ctx.runner.clone();
            let out = original.clone();
            let ctx2 = ctx.clone();
            let item2 = item.clone();
            ctx.helper.submit(
                async move { runner.run_and_wait(&named::stack(&children, &out)).await },
                Some(move |code: i32| complete_stacking(ctx2, item2, original, code)),
            );
        }
    }
}

fn complete_stacking<C: Clock>(
    ctx: Arc<EngineContext<C>>,
    item: Arc<Mutex<Item>>,
    original: PathBuf,
    code: i32,
) {
    if code == 0 {
        {
            let mut locked = item.lock();
            set_role(&mut locked.roles, &original, Role::LocalStack, original.clone());
        }
        transition(&ctx, &original, Trigger::Compress);
    } else {
        tracing::warn!(path = %original.display(), code, "stack command failed");
    }
}

// --- compressing -------------------------------------------------------------

fn on_enter_compressing<C: Clock>(ctx: Arc<EngineContext<C>>, item: Arc<Mutex<Item>>) {
    let (original, local_stack) = {
        let locked = item.lock();
        let Some(local_stack) = locked.roles.get(Role::LocalStack).map(Path::to_path_buf) else {
            tracing::error!("compressing entered without local_stack set");
            return;
        };
        (locked.original().to_path_buf(), local_stack)
    };
    let local_compressed = append_suffix(&local_stack, ".bz2");
    {
        let mut locked = item.lock();
        set_role(&mut locked.roles, &original, Role::LocalCompressed, local_compressed);
    }

    let runner = ctx.runner.clone();
    let path = local_stack;
    let ctx2 = ctx.clone();
    let item2 = item.clone();
    ctx.helper.submit(
        async move { runner.run_and_wait(&named::compress(&path, true)).await },
        Some(move |code: i32| complete_compressing(ctx2, item2, original, code)),
    );
}

fn complete_compressing<C: Clock>(
    ctx: Arc<EngineContext<C>>,
    _item: Arc<Mutex<Item>>,
    original: PathBuf,
    code: i32,
) {
    if code == 0 {
        transition(&ctx, &original, Trigger::Export);
    } else {
        tracing::warn!(path = %original.display(), code, "compress failed; retrying in place");
        transition(&ctx, &original, Trigger::Compress);
    }
}

// --- exporting ---------------------------------------------------------------

fn on_enter_exporting<C: Clock>(ctx: Arc<EngineContext<C>>, item: Arc<Mutex<Item>>) {
    let (original, local_compressed) = {
        let locked = item.lock();
        let Some(local_compressed) = locked.roles.get(Role::LocalCompressed).map(Path::to_path_buf)
        else {
            tracing::error!("exporting entered without local_compressed set");
            return;
        };
        (locked.original().to_path_buf(), local_compressed)
    };
    let Some(basename) = local_compressed.file_name() else {
        tracing::error!(path = %local_compressed.display(), "compressed path has no file name");
        return;
    };
    let storage_final = ctx.config.storage_root.join(basename);
    {
        let mut locked = item.lock();
        set_role(&mut locked.roles, &original, Role::StorageFinal, storage_final.clone());
    }

    let runner = ctx.runner.clone();
    let src = local_compressed;
    let dest = storage_final;
    let ctx2 = ctx.clone();
    let item2 = item.clone();
    ctx.helper.submit(
        async move { safe_copy(runner.as_ref(), &src, &dest).await },
        Some(move |result: Result<i32, CommandError>| complete_exporting(ctx2, item2, original, result)),
    );
}

fn complete_exporting<C: Clock>(
    ctx: Arc<EngineContext<C>>,
    _item: Arc<Mutex<Item>>,
    original: PathBuf,
    result: Result<i32, CommandError>,
) {
    if matches!(result, Ok(0)) {
        transition(&ctx, &original, Trigger::HoldForProcessing);
    } else {
        tracing::warn!(path = %original.display(), ?result, "export failed; retrying in 10s");
        let ctx2 = ctx.clone();
        let original2 = original.clone();
        ctx.helper
            .schedule_after(Duration::from_secs(EXPORT_RETRY_SECS), move || {
                transition(&ctx2, &original2, Trigger::Export);
            });
    }
}

// --- processing ----------------------------------------------------------------

fn on_enter_processing<C: Clock>(ctx: Arc<EngineContext<C>>, item: Arc<Mutex<Item>>) {
    let original = item.lock().original().to_path_buf();
    let Some(stem) = original.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
        tracing::error!(path = %original.display(), "processing item has no file stem");
        return;
    };

    let indicator = ctx.config.processing_indicator_path();
    let done = std::fs::read_to_string(&indicator)
        .map(|contents| contents.contains(&stem))
        .unwrap_or(false);

    if done {
        transition(&ctx, &original, Trigger::Confirm);
    } else {
        let ctx2 = ctx.clone();
        ctx.helper
            .schedule_after(Duration::from_secs(PROCESSING_RETRY_SECS), move || {
                transition(&ctx2, &original, Trigger::HoldForProcessing);
            });
    }
}

// --- confirming ------------------------------------------------------------------

fn on_enter_confirming<C: Clock>(ctx: Arc<EngineContext<C>>, item: Arc<Mutex<Item>>) {
    let (original, local_original, local_compressed, storage_final) = {
        let locked = item.lock();
        let local_original = locked.roles.get(Role::LocalOriginal).map(Path::to_path_buf);
        let local_compressed = locked.roles.get(Role::LocalCompressed).map(Path::to_path_buf);
        let storage_final = locked.roles.get(Role::StorageFinal).map(Path::to_path_buf);
        (
            locked.original().to_path_buf(),
            local_original,
            local_compressed,
            storage_final,
        )
    };
    let (Some(local_original), Some(local_compressed), Some(storage_final)) =
        (local_original, local_compressed, storage_final)
    else {
        tracing::error!("confirming entered with missing roles");
        return;
    };

    let renamed = append_suffix(&local_original, ".orig");
    if let Err(err) = std::fs::rename(&local_original, &renamed) {
        tracing::warn!(path = %local_original.display(), %err, "rename to .orig failed; retrying in 10s");
        let ctx2 = ctx.clone();
        ctx.helper
            .schedule_after(Duration::from_secs(CONFIRM_RETRY_SECS), move || {
                on_enter_confirming(ctx2, item);
            });
        return;
    }

    {
        let mut locked = item.lock();
        set_role(&mut locked.roles, &original, Role::LocalUncompressed, local_original);
        locked.roles.rebind_local_original(renamed);
    }

    let runner = ctx.runner.clone();
    let decompress_path = local_compressed.clone();
    let ctx2 = ctx.clone();
    let item2 = item.clone();
    ctx.helper.submit(
        async move { runner.run_and_wait(&named::decompress(&decompress_path, true)).await },
        Some(move |_code: i32| complete_confirming(ctx2, item2, original, local_compressed, storage_final)),
    );
}

fn complete_confirming<C: Clock>(
    ctx: Arc<EngineContext<C>>,
    item: Arc<Mutex<Item>>,
    original: PathBuf,
    local_compressed: PathBuf,
    storage_final: PathBuf,
) {
    let sizes_match = match (
        std::fs::metadata(&local_compressed),
        std::fs::metadata(&storage_final),
    ) {
        (Ok(a), Ok(b)) => a.len() == b.len(),
        _ => false,
    };
    if !sizes_match {
        tracing::warn!(path = %original.display(), "size mismatch after transfer; re-probing in 10s");
        reschedule_confirm_completion(ctx, item, original, local_compressed, storage_final);
        return;
    }

    let (local_original, local_uncompressed) = {
        let locked = item.lock();
        (
            locked.roles.get(Role::LocalOriginal).map(Path::to_path_buf),
            locked.roles.get(Role::LocalUncompressed).map(Path::to_path_buf),
        )
    };
    let (Some(local_original), Some(local_uncompressed)) = (local_original, local_uncompressed)
    else {
        tracing::error!("confirming missing roles after decompress");
        return;
    };

    let runner = ctx.runner.clone();
    let ctx2 = ctx.clone();
    let item2 = item.clone();
    let original2 = original.clone();
    ctx.helper.submit(
        async move { hash_compare(runner.as_ref(), &local_original, &local_uncompressed).await },
        Some(move |result: Result<bool, CommandError>| match result {
            Ok(true) => transition(&ctx2, &original2, Trigger::Clean),
            Ok(false) => {
                tracing::warn!(path = %original2.display(), "hash mismatch after decompress; holding in confirming");
            }
            Err(err) => {
                tracing::warn!(path = %original2.display(), %err, "hash comparison failed; re-probing in 10s");
                reschedule_confirm_completion(ctx2, item2, original2.clone(), local_compressed, storage_final);
            }
        }),
    );
}

fn reschedule_confirm_completion<C: Clock>(
    ctx: Arc<EngineContext<C>>,
    item: Arc<Mutex<Item>>,
    original: PathBuf,
    local_compressed: PathBuf,
    storage_final: PathBuf,
) {
    let ctx2 = ctx.clone();
    ctx.helper
        .schedule_after(Duration::from_secs(CONFIRM_RETRY_SECS), move || {
            complete_confirming(ctx2, item, original, local_compressed, storage_final);
        });
}

// --- cleaning ----------------------------------------------------------------

fn on_enter_cleaning<C: Clock>(ctx: Arc<EngineContext<C>>, item: Arc<Mutex<Item>>) {
    const ROLES_TO_UNLINK: [Role; 6] = [
        Role::LocalStack,
        Role::LocalCompressed,
        Role::LocalUncompressed,
        Role::LocalOriginal,
        Role::LocalConverted,
        Role::Original,
    ];

    let (original, children) = {
        let locked = item.lock();
        for role in ROLES_TO_UNLINK {
            if let Some(path) = locked.roles.get(role) {
                let _ = std::fs::remove_file(path);
            }
        }
        (locked.original().to_path_buf(), locked.unstacked_children.clone())
    };

    for child_original in children {
        transition(&ctx, &child_original, Trigger::Clean);
    }
    transition(&ctx, &original, Trigger::Finalize);
}

// --- finished ------------------------------------------------------------------

fn on_enter_finished<C: Clock>(ctx: Arc<EngineContext<C>>, item: Arc<Mutex<Item>>) {
    let original = item.lock().original().to_path_buf();
    tracing::info!(path = %original.display(), "item finished");
    ctx.registry.lock().remove(&original);
}

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;
