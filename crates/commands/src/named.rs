// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bit-exact argv builders for the named commands the pipeline invokes
//! (spec.md §4.1). Keeping argv assembly in one place means the engine
//! never has to remember flag order or position.

use std::path::Path;

fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// `["cp", src, dest]`
pub fn copy(src: &Path, dest: &Path) -> Vec<String> {
    vec!["cp".into(), path_str(src), path_str(dest)]
}

/// `["shasum", path]`
pub fn sha1(path: &Path) -> Vec<String> {
    vec!["shasum".into(), path_str(path)]
}

/// `["lbzip2", "-k", "-n 8", "-z", path]`, with `-f` inserted at position 1
/// when `force` is set.
pub fn compress(path: &Path, force: bool) -> Vec<String> {
    let mut argv = vec![
        "lbzip2".into(),
        "-k".into(),
        "-n 8".into(),
        "-z".into(),
        path_str(path),
    ];
    if force {
        argv.insert(1, "-f".into());
    }
    argv
}

/// `["lbzip2", "-k", "-n 4", "-d", path]`, with `-f` inserted at position 1
/// when `force` is set.
pub fn decompress(path: &Path, force: bool) -> Vec<String> {
    let mut argv = vec![
        "lbzip2".into(),
        "-k".into(),
        "-n 4".into(),
        "-d".into(),
        path_str(path),
    ];
    if force {
        argv.insert(1, "-f".into());
    }
    argv
}

/// `["newstack", "-bytes", "0", src, dest]`
pub fn format_convert(src: &Path, dest: &Path) -> Vec<String> {
    vec![
        "newstack".into(),
        "-bytes".into(),
        "0".into(),
        path_str(src),
        path_str(dest),
    ]
}

/// `["newstack", "-bytes 0", in1, in2, …, out]`. `inputs` must be in arrival
/// order (spec.md §4.5 invariant: the order passed to `stack` matches
/// `local_unstacked` order).
pub fn stack(inputs: &[std::path::PathBuf], out: &Path) -> Vec<String> {
    let mut argv = vec!["newstack".into(), "-bytes 0".into()];
    argv.extend(inputs.iter().map(|p| path_str(p)));
    argv.push(path_str(out));
    argv
}

/// `["globus", "transfer", src_spec, dest_spec, flags…]`
pub fn transfer(src_spec: &str, dest_spec: &str, flags: &[String]) -> Vec<String> {
    let mut argv = vec![
        "globus".into(),
        "transfer".into(),
        src_spec.into(),
        dest_spec.into(),
    ];
    argv.extend(flags.iter().cloned());
    argv
}

/// Fixed argv invoking the downstream analysis CLI's project-create
/// operation.
pub fn project_create(config_path: &Path, project_name: &str) -> Vec<String> {
    vec![
        "scipion".into(),
        "project".into(),
        "create".into(),
        path_str(config_path),
        project_name.into(),
    ]
}

/// Fixed argv invoking the downstream analysis CLI's project-schedule
/// operation.
pub fn project_schedule(config_path: &Path, project_name: &str) -> Vec<String> {
    vec![
        "scipion".into(),
        "project".into(),
        "schedule".into(),
        path_str(config_path),
        project_name.into(),
    ]
}

#[cfg(test)]
#[path = "named_tests.rs"]
mod tests;
