#![forbid(unsafe_code)]

//! History engine: perform, undo, and redo with validation.
//!
//! The [`Recorder`] keeps two [`DropOutStack`]s of equal capacity and one
//! shared [`Outcome`]. Every entry point resets the outcome, checks the
//! host's [`EditContext`], asks the command's validation hook, runs the
//! effect, and only then moves the command between histories.
//!
//! ```text
//! perform(c3)                     undo()                    perform(c4)
//! ┌──────────────────────┐       ┌──────────────────────┐   ┌──────────────────────┐
//! │ undo: [c1, c2, c3]   │  ──►  │ undo: [c1, c2]       │ ► │ undo: [c1, c2, c4]   │
//! │ redo: []             │       │ redo: [c3]           │   │ redo: []             │
//! └──────────────────────┘       └──────────────────────┘   └──────────────────────┘
//! ```
//!
//! # Invariants
//!
//! 1. A command is held by at most one history at a time.
//! 2. A vetoed or failed operation leaves both histories untouched.
//! 3. A successful `perform` empties the redo history.
//! 4. Nothing escapes an entry point as an error; the outcome carries it.

use std::cell::OnceCell;
use std::fmt;

use crate::command::Command;
use crate::config::RecorderConfig;
use crate::context::{AlwaysEditable, EditContext};
use crate::outcome::{Outcome, Verdict};
use crate::stack::{DropOutStack, HistoryError};
use crate::status::HistoryStatus;

/// Default message when `perform` fails without a more specific one.
pub const PERFORM_FAILED_MESSAGE: &str = "Couldn't perform Action!";
/// Default message when `undo` fails without a more specific one.
pub const UNDO_FAILED_MESSAGE: &str = "Couldn't perform Undo Action!";
/// Default message when `redo` fails without a more specific one.
pub const REDO_FAILED_MESSAGE: &str = "Couldn't perform Redo Action!";
/// Reported by `undo` and `next_undo_description` on an empty undo history.
pub const UNDO_EMPTY_MESSAGE: &str = "UndoStack is empty!";
/// Reported by `redo` and `next_redo_description` on an empty redo history.
pub const REDO_EMPTY_MESSAGE: &str = "RedoStack is empty!";
/// Reported when a validation hook could not produce a verdict.
pub const INVALID_VALIDATION_MESSAGE: &str = "validation object was invalid";
/// Reported when the host is not in an editable context.
pub const NOT_EDITABLE_MESSAGE: &str = "Can't do this in Play/Pause mode!";

/// A command in history, with its description cached on first use.
struct Entry {
    command: Box<dyn Command>,
    description: OnceCell<String>,
}

impl Entry {
    fn new(command: Box<dyn Command>) -> Self {
        Self {
            command,
            description: OnceCell::new(),
        }
    }

    fn description(&self) -> &str {
        self.description.get_or_init(|| self.command.describe())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Undo,
    Redo,
}

impl Direction {
    const fn empty_message(self) -> &'static str {
        match self {
            Self::Undo => UNDO_EMPTY_MESSAGE,
            Self::Redo => REDO_EMPTY_MESSAGE,
        }
    }

    const fn failed_message(self) -> &'static str {
        match self {
            Self::Undo => UNDO_FAILED_MESSAGE,
            Self::Redo => REDO_FAILED_MESSAGE,
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Undo => "undo",
            Self::Redo => "redo",
        }
    }
}

/// Bounded undo/redo engine for reversible commands.
///
/// Single-threaded by contract: each entry point runs to completion and
/// the returned `&Outcome` borrows the recorder. Hosts that share a recorder
/// across threads wrap the whole thing in one mutex.
pub struct Recorder {
    /// Previously performed commands (most recent on top).
    undo_stack: DropOutStack<Entry>,
    /// Previously undone commands (most recent on top).
    redo_stack: DropOutStack<Entry>,
    /// The single outcome reused by every call.
    outcome: Outcome,
    /// Host gate checked before every transition.
    context: Box<dyn EditContext>,
    config: RecorderConfig,
}

impl fmt::Debug for Recorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recorder")
            .field("undo_count", &self.undo_stack.count())
            .field("redo_count", &self.redo_stack.count())
            .field("outcome", &self.outcome)
            .field("config", &self.config)
            .finish()
    }
}

impl Recorder {
    /// Create a recorder gated by `context`.
    ///
    /// Fails if the configured capacity is zero.
    pub fn new(
        config: RecorderConfig,
        context: impl EditContext + 'static,
    ) -> Result<Self, HistoryError> {
        Ok(Self {
            undo_stack: DropOutStack::new(config.capacity)?,
            redo_stack: DropOutStack::new(config.capacity)?,
            outcome: Outcome::new(),
            context: Box::new(context),
            config,
        })
    }

    /// Create an always-editable recorder with the given capacity.
    pub fn with_capacity(capacity: usize) -> Result<Self, HistoryError> {
        Self::new(RecorderConfig::new(capacity), AlwaysEditable)
    }

    // ========================================================================
    // Core Operations
    // ========================================================================

    /// Validate and apply `command`, then record it for undo.
    pub fn perform<C: Command + 'static>(&mut self, command: C) -> &Outcome {
        self.perform_boxed(Box::new(command))
    }

    /// Validate and apply a boxed command, then record it for undo.
    ///
    /// On success the command goes on top of the undo history and the redo
    /// history is emptied. On any failure the command is dropped and both
    /// histories are left as they were.
    pub fn perform_boxed(&mut self, command: Box<dyn Command>) -> &Outcome {
        let _span = tracing::debug_span!("history.perform").entered();
        self.outcome.clear();

        if !self.ensure_editable() {
            return &self.outcome;
        }

        let mut entry = Entry::new(command);

        if let Err(err) = entry.command.validate_before_apply(&mut self.outcome) {
            tracing::warn!(
                target: "rewind.history",
                command = %entry.description(),
                error = %err,
                "apply validation produced no verdict"
            );
            self.outcome.fail(INVALID_VALIDATION_MESSAGE);
        }

        if self.outcome.is_failed() {
            self.outcome.default_message(PERFORM_FAILED_MESSAGE);
            tracing::warn!(
                target: "rewind.history",
                command = %entry.description(),
                reason = %self.outcome.message,
                "perform vetoed"
            );
            return &self.outcome;
        }

        if let Err(err) = entry.command.apply() {
            tracing::warn!(
                target: "rewind.history",
                command = %entry.description(),
                error = %err,
                "apply failed"
            );
            self.outcome.verdict = Verdict::Failed;
            self.outcome.default_message(PERFORM_FAILED_MESSAGE);
            return &self.outcome;
        }

        tracing::debug!(
            target: "rewind.history",
            command = %entry.description(),
            dropped_redo = self.redo_stack.count(),
            evicts_oldest = self.undo_stack.is_full(),
            "command performed"
        );
        self.undo_stack.push(entry);
        self.redo_stack.clear();
        self.outcome.verdict = Verdict::Success;
        &self.outcome
    }

    /// Revert the most recent command and move it to the redo history.
    pub fn undo(&mut self) -> &Outcome {
        let _span = tracing::debug_span!("history.undo").entered();
        self.step(Direction::Undo)
    }

    /// Reapply the most recently undone command and move it back.
    pub fn redo(&mut self) -> &Outcome {
        let _span = tracing::debug_span!("history.redo").entered();
        self.step(Direction::Redo)
    }

    /// Shared undo/redo algorithm.
    ///
    /// The top command is validated and run in place; it only moves once
    /// its effect succeeded.
    fn step(&mut self, direction: Direction) -> &Outcome {
        self.outcome.clear();

        if !self.ensure_editable() {
            return &self.outcome;
        }

        let (source, target) = match direction {
            Direction::Undo => (&mut self.undo_stack, &mut self.redo_stack),
            Direction::Redo => (&mut self.redo_stack, &mut self.undo_stack),
        };

        let Some(entry) = source.peek_mut() else {
            self.outcome.fail(direction.empty_message());
            tracing::debug!(
                target: "rewind.history",
                direction = direction.as_str(),
                "nothing to step"
            );
            return &self.outcome;
        };

        let validated = match direction {
            Direction::Undo => entry.command.validate_before_undo(&mut self.outcome),
            Direction::Redo => entry.command.validate_before_redo(&mut self.outcome),
        };
        if let Err(err) = validated {
            tracing::warn!(
                target: "rewind.history",
                direction = direction.as_str(),
                command = %entry.description(),
                error = %err,
                "validation produced no verdict"
            );
            self.outcome.fail(INVALID_VALIDATION_MESSAGE);
        }

        if self.outcome.is_failed() {
            self.outcome.default_message(direction.failed_message());
            tracing::warn!(
                target: "rewind.history",
                direction = direction.as_str(),
                command = %entry.description(),
                reason = %self.outcome.message,
                "step vetoed"
            );
            return &self.outcome;
        }

        let ran = match direction {
            Direction::Undo => entry.command.revert(),
            Direction::Redo => entry.command.reapply(),
        };
        if let Err(err) = ran {
            tracing::warn!(
                target: "rewind.history",
                direction = direction.as_str(),
                command = %entry.description(),
                error = %err,
                "step failed"
            );
            self.outcome.fail(direction.failed_message());
            return &self.outcome;
        }

        tracing::debug!(
            target: "rewind.history",
            direction = direction.as_str(),
            command = %entry.description(),
            verdict = %self.outcome.verdict,
            "step completed"
        );
        if let Some(entry) = source.pop() {
            target.push(entry);
        }
        &self.outcome
    }

    /// Gate on the host context, failing the outcome if not editable.
    fn ensure_editable(&mut self) -> bool {
        if self.context.is_editable() {
            return true;
        }
        self.outcome.fail(NOT_EDITABLE_MESSAGE);
        tracing::debug!(target: "rewind.history", "not in an editable context");
        false
    }

    // ========================================================================
    // Info
    // ========================================================================

    /// The verdict of the last operation.
    #[must_use]
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    #[must_use]
    pub fn undo_count(&self) -> usize {
        self.undo_stack.count()
    }

    #[must_use]
    pub fn redo_count(&self) -> usize {
        self.redo_stack.count()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Capacity of each history.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    #[must_use]
    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }

    /// Description of the command `undo` would revert next.
    #[must_use]
    pub fn next_undo_description(&self) -> &str {
        self.undo_stack
            .peek()
            .map_or(UNDO_EMPTY_MESSAGE, Entry::description)
    }

    /// Description of the command `redo` would reapply next.
    #[must_use]
    pub fn next_redo_description(&self) -> &str {
        self.redo_stack
            .peek()
            .map_or(REDO_EMPTY_MESSAGE, Entry::description)
    }

    /// Undo descriptions, most recent first.
    pub fn undo_descriptions(&self, limit: usize) -> Vec<&str> {
        self.undo_stack
            .iter()
            .take(limit)
            .map(Entry::description)
            .collect()
    }

    /// Redo descriptions, most recent first.
    pub fn redo_descriptions(&self, limit: usize) -> Vec<&str> {
        self.redo_stack
            .iter()
            .take(limit)
            .map(Entry::description)
            .collect()
    }

    /// Snapshot of counts, next descriptions, and the last verdict.
    #[must_use]
    pub fn status(&self) -> HistoryStatus {
        HistoryStatus {
            undo_count: self.undo_count(),
            redo_count: self.redo_count(),
            next_undo: self.next_undo_description().to_string(),
            next_redo: self.next_redo_description().to_string(),
            verdict: self.outcome.verdict,
            message: HistoryStatus::display_message(&self.outcome),
        }
    }

    // ========================================================================
    // Maintenance
    // ========================================================================

    /// Drop all recorded commands from both histories.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

// ============================================================================
// Tests
// ============================================================================
