//! Committed actions and the engine's error type.
//!
//! - `Action` — a named, frozen pair of do/undo step lists
//! - [`HistoryError`] / [`HistoryResult`] — error handling for the engine

use std::fmt;

use super::step::Step;

/// Direction of a history traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryDirection {
    Undo,
    Redo,
}

impl fmt::Display for HistoryDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undo => f.write_str("undo"),
            Self::Redo => f.write_str("redo"),
        }
    }
}

/// Error type for history operations and step bodies.
///
/// `InvalidState` and `EmptyHistory` signal misuse of the engine protocol.
/// Hosts should disable the affordances that would trigger them rather than
/// surface them to users.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HistoryError {
    /// An action is pending when none may be, or missing when one must be.
    #[error("invalid state: {0}")]
    InvalidState(String),
    /// Nothing to undo or redo.
    #[error("nothing to {0}")]
    EmptyHistory(HistoryDirection),
    /// A step body could not find the object it operates on.
    #[error("target not found: {0}")]
    TargetNotFound(String),
    /// A step body failed.
    #[error("step failed: {0}")]
    StepFailed(String),
}

/// Result type for history operations.
pub type HistoryResult<T = ()> = Result<T, HistoryError>;

/// A named, atomic, reversible group of steps.
///
/// Step lists are frozen once the action leaves the builder. Doing the action
/// runs `do_steps` in insertion order; undoing it runs `undo_steps` in
/// reverse, so compound edits unwind last-in-first-out.
pub(crate) struct Action {
    name: String,
    do_steps: Vec<Step>,
    undo_steps: Vec<Step>,
}

impl Action {
    pub(crate) fn new(name: String, do_steps: Vec<Step>, undo_steps: Vec<Step>) -> Self {
        Self {
            name,
            do_steps,
            undo_steps,
        }
    }

    /// Display name, as shown in the edit menu.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn do_step_count(&self) -> usize {
        self.do_steps.len()
    }

    pub fn undo_step_count(&self) -> usize {
        self.undo_steps.len()
    }

    /// Runs the do steps in insertion order, stopping at the first failure.
    pub(crate) fn apply(&self) -> HistoryResult {
        for step in &self.do_steps {
            step.execute()?;
        }
        Ok(())
    }

    /// Runs the undo steps last-added first, stopping at the first failure.
    pub(crate) fn revert(&self) -> HistoryResult {
        for step in self.undo_steps.iter().rev() {
            step.execute()?;
        }
        Ok(())
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("name", &self.name)
            .field("do_steps", &self.do_step_count())
            .field("undo_steps", &self.undo_step_count())
            .finish()
    }
}
