// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The workflow state machine (spec.md §4.4): 11 named states, a fixed
//! transition table, and nothing else — auto-transitions are disabled and
//! the graph never changes at runtime.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// One of the 11 states an [`crate::item::Item`] can occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum State {
    Initial,
    Creating,
    Importing,
    Converting,
    Stacking,
    Compressing,
    Exporting,
    Processing,
    Confirming,
    Cleaning,
    Finished,
}

impl State {
    pub const ALL: [State; 11] = [
        State::Initial,
        State::Creating,
        State::Importing,
        State::Converting,
        State::Stacking,
        State::Compressing,
        State::Exporting,
        State::Processing,
        State::Confirming,
        State::Cleaning,
        State::Finished,
    ];
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            State::Initial => "initial",
            State::Creating => "creating",
            State::Importing => "importing",
            State::Converting => "converting",
            State::Stacking => "stacking",
            State::Compressing => "compressing",
            State::Exporting => "exporting",
            State::Processing => "processing",
            State::Confirming => "confirming",
            State::Cleaning => "cleaning",
            State::Finished => "finished",
        };
        write!(f, "{}", s)
    }
}

/// A named transition trigger (spec.md §4.4 table).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    Initialize,
    ImportFile,
    ConvertToMrc,
    Stack,
    Compress,
    Export,
    HoldForProcessing,
    Confirm,
    Clean,
    Finalize,
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Trigger::Initialize => "initialize",
            Trigger::ImportFile => "import_file",
            Trigger::ConvertToMrc => "convert_to_mrc",
            Trigger::Stack => "stack",
            Trigger::Compress => "compress",
            Trigger::Export => "export",
            Trigger::HoldForProcessing => "hold_for_processing",
            Trigger::Confirm => "confirm",
            Trigger::Clean => "clean",
            Trigger::Finalize => "finalize",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("transition denied: trigger {trigger} not allowed from state {from}")]
pub struct TransitionError {
    pub trigger: Trigger,
    pub from: State,
}

/// Allowed source states for each trigger, and its destination.
///
/// Mirrors spec.md §4.4 bit-for-bit. Firing a trigger whose current state is
/// not in its source list is a *transition-denied* error (§7): logged and
/// dropped, never a panic.
fn allowed_sources(trigger: Trigger) -> &'static [State] {
    use State::*;
    match trigger {
        Trigger::Initialize => &[Initial],
        Trigger::ImportFile => &[Creating, Importing],
        Trigger::ConvertToMrc => &[Converting, Importing],
        Trigger::Stack => &[Importing, Stacking],
        Trigger::Compress => &[Importing, Stacking, Compressing, Converting],
        Trigger::Export => &[Compressing, Exporting],
        Trigger::HoldForProcessing => &[Exporting, Processing],
        Trigger::Confirm => &[Processing, Exporting],
        Trigger::Clean => &[Stacking, Confirming],
        Trigger::Finalize => &[Cleaning],
    }
}

fn destination(trigger: Trigger) -> State {
    match trigger {
        Trigger::Initialize => State::Creating,
        Trigger::ImportFile => State::Importing,
        Trigger::ConvertToMrc => State::Converting,
        Trigger::Stack => State::Stacking,
        Trigger::Compress => State::Compressing,
        Trigger::Export => State::Exporting,
        Trigger::HoldForProcessing => State::Processing,
        Trigger::Confirm => State::Confirming,
        Trigger::Clean => State::Cleaning,
        Trigger::Finalize => State::Finished,
    }
}

/// Attempt to fire `trigger` from `current`. Returns the destination state
/// on success, or a `TransitionError` (transition-denied, §7) if `current`
/// is not in the trigger's allowed source set.
pub fn fire(current: State, trigger: Trigger) -> Result<State, TransitionError> {
    if allowed_sources(trigger).contains(&current) {
        Ok(destination(trigger))
    } else {
        Err(TransitionError {
            trigger,
            from: current,
        })
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
