//! Abstract editor framework for reversible editing operations.
//!
//! This module provides a transactional undo/redo engine. It knows nothing
//! about what is being edited: callers build [`Step`]s that close over their
//! own state (a table row, a scene list, a document field) and group them
//! into named actions.
//!
//! - [`Step`] — a reversible unit of work (method or property variant)
//! - [`EditHistory`] — the linear undo/redo timeline, which also assembles
//!   the single pending action and freezes it on commit
//! - [`ReplayFlag`] — lets step bodies detect that they are being replayed
//!
//! # Recording an action
//!
//! ```ignore
//! history.begin_action("Remove key")?;
//! history.add_do_step(remove_step)?;   // performs the edit
//! history.add_undo_step(insert_step)?; // reverses it
//! history.commit()?;                   // runs the do steps and records
//! ```
//!
//! For "add" edits the do step inserts and the undo step removes; for
//! "remove" edits the reverse. In-place edits use a single property step
//! registered with [`EditHistory::add_swap_step`].
//!
//! # Threading
//!
//! The engine is single-threaded. Steps hold `Rc`-based closures, so
//! [`EditHistory`] is neither `Send` nor `Sync`; a multithreaded host must
//! confine each instance to one thread.

mod action;
mod builder;
mod history;
mod replay;
mod step;

pub use action::{HistoryDirection, HistoryError, HistoryResult};
pub use history::{EditHistory, UNLIMITED};
pub use replay::ReplayFlag;
pub use step::Step;
