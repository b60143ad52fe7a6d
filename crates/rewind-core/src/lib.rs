#![forbid(unsafe_code)]

//! Rewind Core
//!
//! Bounded undo/redo for reversible editor commands.
//!
//! # Key Components
//!
//! - [`Command`] - Trait for reversible operations with validation hooks
//! - [`Recorder`] - Engine that performs, undoes, and redoes commands
//! - [`DropOutStack`] - Fixed-capacity stack that evicts its oldest entry
//! - [`Outcome`] - Verdict and message of the last operation
//! - [`EditContext`] - Host predicate gating all edits
//! - [`CommandRegistry`] - Explicit id-to-factory mapping for commands
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicI32, Ordering};
//!
//! use rewind_core::{Command, CommandResult, Recorder};
//!
//! struct Counter(Arc<AtomicI32>);
//!
//! impl Command for Counter {
//!     fn apply(&mut self) -> CommandResult {
//!         self.0.fetch_add(1, Ordering::SeqCst);
//!         Ok(())
//!     }
//!
//!     fn revert(&mut self) -> CommandResult {
//!         self.0.fetch_sub(1, Ordering::SeqCst);
//!         Ok(())
//!     }
//! }
//!
//! let value = Arc::new(AtomicI32::new(0));
//! let mut recorder = Recorder::with_capacity(10).unwrap();
//!
//! assert!(recorder.perform(Counter(Arc::clone(&value))).is_success());
//! assert_eq!(recorder.next_undo_description(), "Counter");
//!
//! recorder.undo();
//! assert_eq!(value.load(Ordering::SeqCst), 0);
//! assert_eq!(recorder.redo_count(), 1);
//! ```
//!
//! # Logging
//!
//! Entry points run inside `history.perform`, `history.undo`, and
//! `history.redo` debug spans. Events use the `rewind.history` target:
//! `debug` for completed transitions, `warn` for vetoes and failed effects.

pub mod command;
pub mod config;
pub mod context;
pub mod outcome;
pub mod recorder;
pub mod registry;
pub mod stack;
pub mod status;

pub use command::{Command, CommandError, CommandResult};
#[cfg(feature = "config")]
pub use config::ConfigError;
pub use config::{DEFAULT_CAPACITY, RecorderConfig};
pub use context::{AlwaysEditable, EditContext, EditSwitch};
pub use outcome::{Outcome, Verdict};
pub use recorder::{
    INVALID_VALIDATION_MESSAGE, NOT_EDITABLE_MESSAGE, PERFORM_FAILED_MESSAGE, REDO_EMPTY_MESSAGE,
    REDO_FAILED_MESSAGE, Recorder, UNDO_EMPTY_MESSAGE, UNDO_FAILED_MESSAGE,
};
pub use registry::{CommandFactory, CommandRegistry, RegistryError};
pub use stack::{DropOutStack, HistoryError};
pub use status::{FAILED_FALLBACK, HistoryStatus, WARNING_FALLBACK};
