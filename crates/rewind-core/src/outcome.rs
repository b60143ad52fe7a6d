#![forbid(unsafe_code)]

//! Outcome reported by every history operation.
//!
//! A [`Recorder`](crate::Recorder) owns exactly one [`Outcome`] and reuses it
//! across calls: each entry point resets it with [`Outcome::clear`] before
//! computing a fresh verdict. Validation hooks receive it as `&mut Outcome`
//! and may veto a transition by calling [`Outcome::fail`].

use std::fmt;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

/// Tri-state result of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
pub enum Verdict {
    #[default]
    Success,
    /// The operation went through, but the message deserves attention.
    SuccessWithWarning,
    Failed,
}

impl Verdict {
    /// Stable lowercase label for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::SuccessWithWarning => "success_with_warning",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict plus an optional human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
pub struct Outcome {
    pub verdict: Verdict,
    /// Empty when no message was produced.
    pub message: String,
}

impl Outcome {
    /// A fresh `(Success, "")` outcome.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to `(Success, "")`, keeping the message allocation.
    pub fn clear(&mut self) {
        self.verdict = Verdict::Success;
        self.message.clear();
    }

    /// Mark as failed with the given message.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.verdict = Verdict::Failed;
        self.message = message.into();
    }

    /// Mark as succeeded with a warning.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.verdict = Verdict::SuccessWithWarning;
        self.message = message.into();
    }

    /// Fill in `message` only if none was set.
    pub fn default_message(&mut self, message: &str) {
        if self.message.is_empty() {
            self.message.push_str(message);
        }
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.verdict == Verdict::Failed
    }

    /// True for both `Success` and `SuccessWithWarning`.
    #[must_use]
    pub fn is_success(&self) -> bool {
        !self.is_failed()
    }

    #[must_use]
    pub fn has_message(&self) -> bool {
        !self.message.is_empty()
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.verdict)
        } else {
            write!(f, "{}: {}", self.verdict, self.message)
        }
    }
}
