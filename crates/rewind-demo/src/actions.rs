#![forbid(unsafe_code)]

//! Toy commands without a scene effect.

use rewind_core::{Command, CommandResult, Outcome, Verdict};

/// Logs every transition it goes through.
#[derive(Debug, Default)]
pub struct LogAction {
    transitions: Vec<&'static str>,
}

impl LogAction {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Transitions seen so far, oldest first.
    #[must_use]
    pub fn transitions(&self) -> &[&'static str] {
        &self.transitions
    }

    fn record(&mut self, transition: &'static str) -> CommandResult {
        tracing::info!(target: "rewind.demo", transition, "log action");
        self.transitions.push(transition);
        Ok(())
    }
}

impl Command for LogAction {
    fn apply(&mut self) -> CommandResult {
        self.record("apply")
    }

    fn revert(&mut self) -> CommandResult {
        self.record("revert")
    }

    fn reapply(&mut self) -> CommandResult {
        self.record("reapply")
    }

    fn describe(&self) -> String {
        "Log Action".to_string()
    }
}

/// Can be performed, but every undo is vetoed.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailUndoAction;

impl Command for FailUndoAction {
    fn apply(&mut self) -> CommandResult {
        Ok(())
    }

    fn revert(&mut self) -> CommandResult {
        Ok(())
    }

    fn validate_before_undo(&self, outcome: &mut Outcome) -> CommandResult {
        outcome.verdict = Verdict::Failed;
        Ok(())
    }

    fn describe(&self) -> String {
        "Fail Undo".to_string()
    }
}

/// Can be performed and undone, but every redo is vetoed.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailRedoAction;

impl Command for FailRedoAction {
    fn apply(&mut self) -> CommandResult {
        Ok(())
    }

    fn revert(&mut self) -> CommandResult {
        Ok(())
    }

    fn validate_before_redo(&self, outcome: &mut Outcome) -> CommandResult {
        outcome.verdict = Verdict::Failed;
        Ok(())
    }

    fn describe(&self) -> String {
        "Fail Redo".to_string()
    }
}
