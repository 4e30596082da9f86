//! Reversible units of work.
//!
//! A [`Step`] is the smallest piece of work an action replays. Two kinds exist:
//!
//! - **Method steps** run an opaque closure. They have no notion of undo on
//!   their own; reversal comes from pairing them with a different method step
//!   in the undo list.
//! - **Property steps** hold a getter, a setter and a captured value.
//!   Running one swaps the live value with the captured one, so running the
//!   *same* step twice toggles the slot between two states.
//!
//! [`Step`] is a cheap, cloneable handle. Clones share the underlying step,
//! which lets a single property step appear in both the do and undo lists of
//! an action.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::action::{HistoryError, HistoryResult};

/// Type-erased getter/setter/value triple backing a property step.
trait PropertySwap {
    fn swap(&mut self) -> HistoryResult;
}

struct PropertySlot<V> {
    get: Box<dyn Fn() -> V>,
    set: Box<dyn FnMut(V)>,
    value: V,
}

impl<V: 'static> PropertySwap for PropertySlot<V> {
    fn swap(&mut self) -> HistoryResult {
        let live = (self.get)();
        let captured = std::mem::replace(&mut self.value, live);
        (self.set)(captured);
        Ok(())
    }
}

/// The two step variants, dispatched by `match`.
enum StepKind {
    /// An opaque zero-argument operation.
    Method(Box<dyn FnMut() -> HistoryResult>),
    /// A self-inverting value swap.
    Property(Box<dyn PropertySwap>),
}

/// Shared handle to a reversible unit of work.
#[derive(Clone)]
pub struct Step {
    kind: Rc<RefCell<StepKind>>,
}

impl Step {
    fn from_kind(kind: StepKind) -> Self {
        Self {
            kind: Rc::new(RefCell::new(kind)),
        }
    }

    /// Creates a method step from an infallible closure.
    pub fn method(mut f: impl FnMut() + 'static) -> Self {
        Self::from_kind(StepKind::Method(Box::new(move || {
            f();
            Ok(())
        })))
    }

    /// Creates a method step whose body may fail.
    ///
    /// A failure propagates out of `commit`, `undo` or `redo` unchanged.
    pub fn try_method(f: impl FnMut() -> HistoryResult + 'static) -> Self {
        Self::from_kind(StepKind::Method(Box::new(f)))
    }

    /// Creates a property step.
    ///
    /// `value` is the value installed on the first run. Afterwards the step
    /// holds whatever it displaced, so the next run restores it.
    ///
    /// ```ignore
    /// let title = Rc::new(RefCell::new(String::from("old")));
    /// let step = Step::property(
    ///     { let t = title.clone(); move || t.borrow().clone() },
    ///     { let t = title.clone(); move |v| *t.borrow_mut() = v },
    ///     String::from("new"),
    /// );
    /// ```
    pub fn property<V: 'static>(
        get: impl Fn() -> V + 'static,
        set: impl FnMut(V) + 'static,
        value: V,
    ) -> Self {
        Self::from_kind(StepKind::Property(Box::new(PropertySlot {
            get: Box::new(get),
            set: Box::new(set),
            value,
        })))
    }

    /// Runs the step once.
    ///
    /// Fails with [`HistoryError::InvalidState`] if the step is re-entered
    /// from its own body.
    pub fn execute(&self) -> HistoryResult {
        let mut kind = self
            .kind
            .try_borrow_mut()
            .map_err(|_| HistoryError::InvalidState("step re-entered while running".into()))?;
        match &mut *kind {
            StepKind::Method(f) => f(),
            StepKind::Property(slot) => slot.swap(),
        }
    }

    /// Returns `true` for property steps.
    pub fn is_property(&self) -> bool {
        matches!(self.kind.try_borrow().as_deref(), Ok(StepKind::Property(_)))
    }

    /// Returns `true` if both handles point at the same step.
    pub fn ptr_eq(&self, other: &Step) -> bool {
        Rc::ptr_eq(&self.kind, &other.kind)
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind.try_borrow() {
            Ok(kind) => match *kind {
                StepKind::Method(_) => "method",
                StepKind::Property(_) => "property",
            },
            Err(_) => "running",
        };
        f.debug_struct("Step").field("kind", &kind).finish()
    }
}
