use track_recorder_core::{ConfirmationPrompt, StopConfirmation};

use std::{cell::RefCell, rc::Rc};

use tracing::debug;

/// Stop confirmation answered by the next `save`, `discard` or `continue` line.
#[derive(Debug, Clone, Default)]
pub struct TerminalPrompt {
    pending: Rc<RefCell<Option<StopConfirmation>>>,
}

impl TerminalPrompt {
    /// Create a prompt with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the outstanding confirmation, if any.
    pub fn take_pending(&self) -> Option<StopConfirmation> {
        self.pending.borrow_mut().take()
    }

    /// Whether a confirmation is waiting for an answer.
    pub fn has_pending(&self) -> bool {
        self.pending.borrow().is_some()
    }
}

impl ConfirmationPrompt for TerminalPrompt {
    fn present(&self, confirmation: StopConfirmation) {
        debug!(session_id = ?confirmation.session_id(), "Presenting stop confirmation");
        println!("Stop recording? Type `save [name]`, `discard`, or `continue`.");
        *self.pending.borrow_mut() = Some(confirmation);
    }
}
