#![forbid(unsafe_code)]

//! Snapshot of history state for display.
//!
//! A host renders [`HistoryStatus`] however it likes (buttons with counts,
//! a message box for the last outcome). The `Display` impl gives a compact
//! text form for logs and headless hosts.

use std::fmt;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::outcome::{Outcome, Verdict};

/// Shown for a failed outcome that carries no message.
pub const FAILED_FALLBACK: &str = "Action Failed!";
/// Shown for a warning that carries no message.
pub const WARNING_FALLBACK: &str = "Action Succeeded";

/// Counts, next descriptions, and the last verdict of a recorder.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
pub struct HistoryStatus {
    pub undo_count: usize,
    pub redo_count: usize,
    pub next_undo: String,
    pub next_redo: String,
    pub verdict: Verdict,
    /// Message to surface for the last outcome, `None` for a plain success.
    pub message: Option<String>,
}

impl HistoryStatus {
    /// Message a host should surface for `outcome`, if any.
    #[must_use]
    pub fn display_message(outcome: &Outcome) -> Option<String> {
        match outcome.verdict {
            Verdict::Success => None,
            Verdict::SuccessWithWarning if outcome.message.is_empty() => {
                Some(WARNING_FALLBACK.to_string())
            }
            Verdict::Failed if outcome.message.is_empty() => Some(FAILED_FALLBACK.to_string()),
            Verdict::SuccessWithWarning | Verdict::Failed => Some(outcome.message.clone()),
        }
    }
}

impl fmt::Display for HistoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Undo {} [{}] | Redo {} [{}]",
            self.undo_count, self.next_undo, self.redo_count, self.next_redo
        )?;
        if let Some(message) = &self.message {
            write!(f, " | {}: {}", self.verdict, message)?;
        }
        Ok(())
    }
}
