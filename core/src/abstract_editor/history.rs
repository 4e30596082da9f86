//! Undo/redo action history.
//!
//! [`EditHistory`] owns the pending-action slot, a queue of committed actions
//! and a stack of undone ones. Committing a new action clears the redo stack
//! (standard editor behavior), so the timeline is always linear.

use std::collections::VecDeque;
use std::fmt;

use super::action::{Action, HistoryDirection, HistoryError, HistoryResult};
use super::builder::ActionBuilder;
use super::replay::ReplayFlag;
use super::step::Step;
use crate::config::HistoryConfig;

/// History limit meaning "keep every committed action".
pub const UNLIMITED: usize = 0;

/// Transactional undo/redo engine.
///
/// The undo queue is a [`VecDeque`]. When it exceeds the history limit, the
/// oldest actions are dropped from the front. The redo stack is an unbounded
/// [`Vec`] (it can never grow larger than the undo queue was).
///
/// Each editor owns one `EditHistory` and passes it explicitly to the
/// collaborators that record actions.
///
/// # Example
///
/// ```ignore
/// let table = Rc::new(RefCell::new(BTreeMap::new()));
/// let mut history = EditHistory::new();
///
/// history.begin_action("Add key")?;
/// history.add_do_step(Step::method({
///     let table = table.clone();
///     move || { table.borrow_mut().insert("K".to_string(), String::new()); }
/// }))?;
/// history.add_undo_step(Step::method({
///     let table = table.clone();
///     move || { table.borrow_mut().remove("K"); }
/// }))?;
/// history.commit()?;
///
/// history.undo()?;
/// history.redo()?;
/// ```
///
/// # Step failures
///
/// A failing step aborts the operation and its error is returned unchanged.
/// Steps that already ran are not rolled back, and the action does not move:
/// a failed commit drops the pending action, a failed undo leaves the action
/// on the undo queue, a failed redo leaves it on the redo stack. `version` is
/// untouched in every case. The same holds when a step panics.
pub struct EditHistory {
    undo_queue: VecDeque<Action>,
    redo_stack: Vec<Action>,
    pending: Option<ActionBuilder>,
    history_limit: usize,
    version: u64,
    replay: ReplayFlag,
    /// Tracks distance from the saved state.
    ///
    /// - `Some(0)` — the current state matches the last save.
    /// - `Some(n)` where `n > 0` — `n` undos needed to reach the saved state.
    /// - `Some(n)` where `n < 0` — `|n|` redos needed to reach the saved state.
    /// - `None` — the save point is permanently unreachable (evicted by the
    ///   limit, or its redo branch was discarded).
    save_distance: Option<i64>,
}

impl EditHistory {
    /// Creates an empty history with no limit.
    pub fn new() -> Self {
        Self::with_history_limit(UNLIMITED)
    }

    /// Creates an empty history keeping at most `limit` committed actions.
    ///
    /// [`UNLIMITED`] (`0`) disables the bound.
    pub fn with_history_limit(limit: usize) -> Self {
        Self {
            undo_queue: VecDeque::new(),
            redo_stack: Vec::new(),
            pending: None,
            history_limit: limit,
            version: 0,
            replay: ReplayFlag::new(),
            save_distance: Some(0),
        }
    }

    pub fn from_config(config: &HistoryConfig) -> Self {
        Self::with_history_limit(config.history_limit)
    }

    // ------------------------------------------------------------------
    // Action builder
    // ------------------------------------------------------------------

    /// Starts a new pending action.
    ///
    /// Fails with [`HistoryError::InvalidState`] if one is already pending.
    pub fn begin_action(&mut self, name: impl Into<String>) -> HistoryResult {
        let name = name.into();
        if let Some(pending) = &self.pending {
            return Err(HistoryError::InvalidState(format!(
                "cannot begin \"{name}\": action \"{}\" is still pending",
                pending.name()
            )));
        }
        self.pending = Some(ActionBuilder::new(name));
        Ok(())
    }

    /// Appends a forward step to the pending action.
    pub fn add_do_step(&mut self, step: Step) -> HistoryResult {
        self.pending_mut("add a do step")?.push_do(step);
        Ok(())
    }

    /// Appends a reverse step to the pending action.
    pub fn add_undo_step(&mut self, step: Step) -> HistoryResult {
        self.pending_mut("add an undo step")?.push_undo(step);
        Ok(())
    }

    /// Appends one self-inverting step (usually a property step) to both
    /// lists of the pending action.
    pub fn add_swap_step(&mut self, step: Step) -> HistoryResult {
        self.pending_mut("add a swap step")?.push_swap(step);
        Ok(())
    }

    /// Discards the pending action without running any of its steps.
    pub fn cancel_action(&mut self) -> HistoryResult {
        let pending = self.take_pending("cancel")?;
        log::debug!("Cancelled action \"{}\"", pending.name());
        Ok(())
    }

    /// Runs the pending action's do steps and records it as the newest
    /// undoable action.
    ///
    /// Clears the redo stack, bumps `version` and enforces the history limit.
    /// Fails with [`HistoryError::InvalidState`] if no action is pending.
    pub fn commit(&mut self) -> HistoryResult {
        let action = self.take_pending("commit")?.build();

        let result = {
            let _applying = self.replay.enter();
            action.apply()
        };
        if let Err(e) = result {
            log::warn!("Commit of \"{}\" failed: {e}", action.name());
            return Err(e);
        }

        // Clearing the redo stack invalidates a save point that was in redo.
        self.redo_stack.clear();
        if let Some(d) = self.save_distance
            && d < 0
        {
            self.save_distance = None;
        }
        if let Some(d) = &mut self.save_distance {
            *d += 1;
        }

        self.version += 1;
        log::debug!(
            "Committed \"{}\" (version {})",
            action.name(),
            self.version
        );
        self.undo_queue.push_back(action);
        self.enforce_limit();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Timeline
    // ------------------------------------------------------------------

    /// Undoes the most recently committed action.
    ///
    /// Runs its undo steps last-added first, moves it to the redo stack and
    /// decrements `version`. Fails with [`HistoryError::EmptyHistory`] if
    /// there is nothing to undo.
    pub fn undo(&mut self) -> HistoryResult {
        // Steps run while the action is still queued, so a failing or
        // panicking step leaves the timeline as it was.
        {
            let action = self
                .undo_queue
                .back()
                .ok_or(HistoryError::EmptyHistory(HistoryDirection::Undo))?;
            let _applying = self.replay.enter();
            if let Err(e) = action.revert() {
                log::warn!("Undo of \"{}\" failed: {e}", action.name());
                return Err(e);
            }
        }

        if let Some(action) = self.undo_queue.pop_back() {
            self.version -= 1;
            if let Some(d) = &mut self.save_distance {
                *d -= 1;
            }
            log::debug!("Undid \"{}\" (version {})", action.name(), self.version);
            self.redo_stack.push(action);
        }
        Ok(())
    }

    /// Redoes the most recently undone action.
    ///
    /// Runs its do steps in insertion order, moves it back to the undo queue
    /// and increments `version`. Fails with [`HistoryError::EmptyHistory`] if
    /// there is nothing to redo.
    pub fn redo(&mut self) -> HistoryResult {
        {
            let action = self
                .redo_stack
                .last()
                .ok_or(HistoryError::EmptyHistory(HistoryDirection::Redo))?;
            let _applying = self.replay.enter();
            if let Err(e) = action.apply() {
                log::warn!("Redo of \"{}\" failed: {e}", action.name());
                return Err(e);
            }
        }

        if let Some(action) = self.redo_stack.pop() {
            self.version += 1;
            if let Some(d) = &mut self.save_distance {
                *d += 1;
            }
            log::debug!("Redid \"{}\" (version {})", action.name(), self.version);
            self.undo_queue.push_back(action);
        }
        Ok(())
    }

    /// Discards both stacks and any pending action, and resets `version`.
    ///
    /// If the current state was the saved state it remains so after
    /// clearing. Otherwise the save point is permanently lost.
    pub fn clear(&mut self) {
        self.undo_queue.clear();
        self.redo_stack.clear();
        self.pending = None;
        self.version = 0;
        if self.save_distance != Some(0) {
            self.save_distance = None;
        }
    }

    /// Caps the undo queue at `limit` actions, evicting the oldest ones
    /// immediately if needed. [`UNLIMITED`] removes the cap.
    pub fn set_history_limit(&mut self, limit: usize) {
        self.history_limit = limit;
        self.enforce_limit();
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    /// Drops the oldest committed actions beyond the limit.
    ///
    /// Never touches the redo stack or `version`.
    fn enforce_limit(&mut self) {
        if self.history_limit == UNLIMITED {
            return;
        }
        while self.undo_queue.len() > self.history_limit {
            if let Some(evicted) = self.undo_queue.pop_front() {
                log::trace!("Evicted \"{}\" from history", evicted.name());
            }
        }
        // If the save point was beyond the oldest surviving entry, it's gone.
        if let Some(d) = self.save_distance
            && d > self.undo_queue.len() as i64
        {
            self.save_distance = None;
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Returns `true` if there are actions that can be undone.
    pub fn has_undo(&self) -> bool {
        !self.undo_queue.is_empty()
    }

    /// Returns `true` if there are actions that can be redone.
    pub fn has_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn has_pending_action(&self) -> bool {
        self.pending.is_some()
    }

    /// Name of the pending action, or of the most recently committed one.
    pub fn current_action_name(&self) -> Option<&str> {
        match &self.pending {
            Some(pending) => Some(pending.name()),
            None => self.undo_queue.back().map(Action::name),
        }
    }

    /// Number of committed actions currently undoable.
    ///
    /// Same as [`undo_count`](Self::undo_count); kept under the name edit
    /// menus use for the committed-action count.
    pub fn action_count(&self) -> usize {
        self.undo_count()
    }

    /// Net count of commits and redos minus undos since the last clear.
    ///
    /// Eviction does not adjust it, so it is a change counter, not a
    /// position in the timeline.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Number of actions in the undo queue.
    pub fn undo_count(&self) -> usize {
        self.undo_queue.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Returns an iterator over undo action names, most recent first.
    pub fn undo_descriptions(&self) -> impl Iterator<Item = &str> {
        self.undo_queue.iter().rev().map(Action::name)
    }

    /// Returns an iterator over redo action names, most recent first.
    pub fn redo_descriptions(&self) -> impl Iterator<Item = &str> {
        self.redo_stack.iter().rev().map(Action::name)
    }

    /// Returns `true` while commit, undo or redo is running steps.
    pub fn is_applying(&self) -> bool {
        self.replay.is_applying()
    }

    /// Handle for step bodies and listeners to query [`is_applying`](Self::is_applying).
    pub fn replay_flag(&self) -> ReplayFlag {
        self.replay.clone()
    }

    // ------------------------------------------------------------------
    // Save point
    // ------------------------------------------------------------------

    /// Records the current state as the saved state.
    pub fn mark_saved(&mut self) {
        self.save_distance = Some(0);
    }

    /// Returns `true` if the current state differs from the last saved state
    /// or the save point is no longer reachable.
    pub fn has_unsaved_changes(&self) -> bool {
        self.save_distance != Some(0)
    }

    fn pending_mut(&mut self, what: &str) -> HistoryResult<&mut ActionBuilder> {
        self.pending
            .as_mut()
            .ok_or_else(|| HistoryError::InvalidState(format!("cannot {what}: no action pending")))
    }

    fn take_pending(&mut self, what: &str) -> HistoryResult<ActionBuilder> {
        self.pending
            .take()
            .ok_or_else(|| HistoryError::InvalidState(format!("cannot {what}: no action pending")))
    }
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EditHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditHistory")
            .field("undo_count", &self.undo_queue.len())
            .field("redo_count", &self.redo_stack.len())
            .field("pending", &self.pending.as_ref().map(ActionBuilder::name))
            .field("history_limit", &self.history_limit)
            .field("version", &self.version)
            .field("save_distance", &self.save_distance)
            .finish()
    }
}
