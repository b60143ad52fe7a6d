#![forbid(unsafe_code)]

//! Editable-context gate.
//!
//! The host decides whether it is currently in a state where edits are
//! allowed (e.g. not while a simulation is playing). The recorder asks
//! before every `perform`, `undo` and `redo`.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Predicate supplied by the host: "is editing allowed right now?"
pub trait EditContext: Send {
    fn is_editable(&self) -> bool;
}

/// Context for hosts without a non-editable mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysEditable;

impl EditContext for AlwaysEditable {
    fn is_editable(&self) -> bool {
        true
    }
}

impl<F> EditContext for F
where
    F: Fn() -> bool + Send,
{
    fn is_editable(&self) -> bool {
        self()
    }
}

/// Shared on/off switch the host flips when entering or leaving edit mode.
///
/// Clones share the same flag, so the host keeps one handle and gives a
/// clone to the recorder.
#[derive(Debug, Clone)]
pub struct EditSwitch {
    editable: Arc<AtomicBool>,
}

impl Default for EditSwitch {
    fn default() -> Self {
        Self::new(true)
    }
}

impl EditSwitch {
    #[must_use]
    pub fn new(editable: bool) -> Self {
        Self {
            editable: Arc::new(AtomicBool::new(editable)),
        }
    }

    pub fn set_editable(&self, editable: bool) {
        self.editable.store(editable, Ordering::Release);
    }
}

impl EditContext for EditSwitch {
    fn is_editable(&self) -> bool {
        self.editable.load(Ordering::Acquire)
    }
}
