//! Assembly of a pending action.
//!
//! [`ActionBuilder`] collects do and undo steps for the one action that may be
//! under construction at a time. [`EditHistory`](super::EditHistory) owns the
//! builder slot; callers reach it through `begin_action`, `add_do_step`,
//! `add_undo_step` and `commit`.

use std::fmt;

use super::action::Action;
use super::step::Step;

/// Accumulates the steps of an action that has not been committed yet.
pub(crate) struct ActionBuilder {
    name: String,
    do_steps: Vec<Step>,
    undo_steps: Vec<Step>,
}

impl ActionBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            do_steps: Vec::new(),
            undo_steps: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Appends a forward step. Insertion order is replay order.
    pub fn push_do(&mut self, step: Step) {
        self.do_steps.push(step);
    }

    /// Appends a reverse step. Undo replays these last-added first.
    pub fn push_undo(&mut self, step: Step) {
        self.undo_steps.push(step);
    }

    /// Registers one self-inverting step in both lists.
    pub fn push_swap(&mut self, step: Step) {
        self.undo_steps.push(step.clone());
        self.do_steps.push(step);
    }

    /// Freezes the step lists into an `Action`.
    pub fn build(self) -> Action {
        Action::new(self.name, self.do_steps, self.undo_steps)
    }
}

impl fmt::Debug for ActionBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionBuilder")
            .field("name", &self.name)
            .field("do_steps", &self.do_steps.len())
            .field("undo_steps", &self.undo_steps.len())
            .finish()
    }
}
