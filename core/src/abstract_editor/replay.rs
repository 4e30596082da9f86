//! "Currently applying" flag shared with step bodies.
//!
//! While [`EditHistory`](super::EditHistory) runs the steps of a commit, undo
//! or redo, its [`ReplayFlag`] reads `true`. Step bodies and the listeners
//! they notify capture a clone of the flag to tell a replay apart from a
//! fresh edit, and must not start a new action while it is set.

use std::cell::Cell;
use std::rc::Rc;

/// Cloneable view of the engine's "currently applying" state.
#[derive(Debug, Clone, Default)]
pub struct ReplayFlag {
    applying: Rc<Cell<bool>>,
}

impl ReplayFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while the owning engine is running steps.
    pub fn is_applying(&self) -> bool {
        self.applying.get()
    }

    /// Sets the flag until the returned guard is dropped.
    ///
    /// The previous value is restored on drop, including during unwinding.
    pub(crate) fn enter(&self) -> ReplayGuard {
        let previous = self.applying.replace(true);
        ReplayGuard {
            applying: self.applying.clone(),
            previous,
        }
    }
}

/// Scope guard returned by [`ReplayFlag::enter`].
#[must_use = "the flag is released when the guard is dropped"]
pub(crate) struct ReplayGuard {
    applying: Rc<Cell<bool>>,
    previous: bool,
}

impl Drop for ReplayGuard {
    fn drop(&mut self) {
        self.applying.set(self.previous);
    }
}
