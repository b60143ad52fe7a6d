#![forbid(unsafe_code)]

//! Reversible commands.
//!
//! A [`Command`] is one unit of reversible work. The caller fills in its
//! parameters, then hands it to [`Recorder::perform`](crate::Recorder::perform);
//! from then on the command is owned by whichever history currently holds it.
//!
//! # Invariants
//!
//! - After a successful `apply()`, `revert()` undoes exactly that effect.
//! - After `revert()`, `reapply()` reproduces the same effect.
//! - Validation hooks only inspect state and write the outcome; they never
//!   perform the effect themselves.
//!
//! # Failure Modes
//!
//! - **Stale target**: the object a command touched is gone by undo time.
//!   Return [`CommandError::TargetNotFound`]; the command stays where it was.
//! - **Veto**: a hook calls [`Outcome::fail`]; no state changes.
//! - **Broken hook**: a hook returns `Err`, meaning it could not reach a
//!   verdict. The recorder reports this as a failed validation.

use crate::outcome::Outcome;

/// Result of applying, reverting, or reapplying a command.
pub type CommandResult = Result<(), CommandError>;

/// Errors a command can raise while running its effect.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// An object the command operates on no longer exists.
    #[error("target '{0}' not found")]
    TargetNotFound(String),
    /// The command cannot run in the current state.
    #[error("invalid state: {0}")]
    InvalidState(String),
    #[error("{0}")]
    Other(String),
}

/// A reversible unit of work with a validation hook per transition.
///
/// Only `apply` and `revert` are required. `reapply` defaults to `apply`,
/// the hooks default to "no objection", and `describe` defaults to the
/// implementing type's name.
pub trait Command: Send {
    /// Perform the forward effect.
    fn apply(&mut self) -> CommandResult;

    /// Undo the effect of the most recent `apply` or `reapply`.
    fn revert(&mut self) -> CommandResult;

    /// Redo the effect after a revert.
    fn reapply(&mut self) -> CommandResult {
        self.apply()
    }

    /// Check whether `apply` may run. Veto with [`Outcome::fail`].
    fn validate_before_apply(&self, _outcome: &mut Outcome) -> CommandResult {
        Ok(())
    }

    /// Check whether `revert` may run. Veto with [`Outcome::fail`].
    fn validate_before_undo(&self, _outcome: &mut Outcome) -> CommandResult {
        Ok(())
    }

    /// Check whether `reapply` may run. Veto with [`Outcome::fail`].
    fn validate_before_redo(&self, _outcome: &mut Outcome) -> CommandResult {
        Ok(())
    }

    /// Human-readable label for display.
    ///
    /// Called at most once per command by the recorder, which caches it.
    fn describe(&self) -> String {
        short_type_name(std::any::type_name::<Self>()).to_string()
    }
}

impl std::fmt::Debug for dyn Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("description", &self.describe())
            .finish()
    }
}

/// Strip the module path (and generic arguments) from a type name.
pub(crate) fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        value: i32,
    }

    impl Command for Counter {
        fn apply(&mut self) -> CommandResult {
            self.value += 1;
            Ok(())
        }

        fn revert(&mut self) -> CommandResult {
            self.value -= 1;
            Ok(())
        }
    }

    struct Generic<T>(T);

    impl<T: Send> Command for Generic<T> {
        fn apply(&mut self) -> CommandResult {
            Ok(())
        }

        fn revert(&mut self) -> CommandResult {
            Ok(())
        }
    }

    #[test]
    fn test_default_description_is_type_name() {
        let cmd = Counter { value: 0 };
        assert_eq!(cmd.describe(), "Counter");
    }

    #[test]
    fn test_default_description_strips_generics() {
        let cmd = Generic(std::collections::HashMap::<u8, u8>::new());
        assert_eq!(cmd.describe(), "Generic");
    }

    #[test]
    fn test_reapply_defaults_to_apply() {
        let mut cmd = Counter { value: 0 };
        cmd.apply().unwrap();
        cmd.revert().unwrap();
        cmd.reapply().unwrap();
        assert_eq!(cmd.value, 1);
    }

    #[test]
    fn test_default_hooks_leave_outcome_untouched() {
        let cmd = Counter { value: 0 };
        let mut outcome = Outcome::new();
        cmd.validate_before_apply(&mut outcome).unwrap();
        cmd.validate_before_undo(&mut outcome).unwrap();
        cmd.validate_before_redo(&mut outcome).unwrap();
        assert_eq!(outcome, Outcome::new());
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("a::b::Cmd"), "Cmd");
        assert_eq!(short_type_name("Cmd"), "Cmd");
        assert_eq!(short_type_name("a::Wrap<b::Inner>"), "Wrap");
    }

    #[test]
    fn test_command_error_display() {
        let err = CommandError::TargetNotFound("Cube".into());
        assert!(err.to_string().contains("Cube"));

        let err = CommandError::InvalidState("no scene".into());
        assert_eq!(err.to_string(), "invalid state: no scene");
    }

    #[test]
    fn test_dyn_debug_shows_description() {
        let cmd: Box<dyn Command> = Box::new(Counter { value: 0 });
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Counter"));
    }
}
