//! Terminal status indicator driven by recording state broadcasts.

use track_recorder_core::{RecordingState, TrackRecordingManager};

use std::{
    cell::Cell,
    rc::{Rc, Weak},
};

use tracing::debug;

/// Prints a one-line status whenever the recording state changes.
#[derive(Debug, Default)]
pub struct StatusLine {
    last: Cell<Option<RecordingState>>,
    updates: Cell<usize>,
}

impl StatusLine {
    /// Create a status line that has not seen any state yet.
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Subscribe to `manager`.
    ///
    /// The handler only holds a weak reference, so dropping the last `Rc`
    /// detaches the status line without unsubscribing.
    pub fn attach(self: &Rc<Self>, manager: &TrackRecordingManager) {
        let this: Weak<Self> = Rc::downgrade(self);
        manager.subscribe(self, move |state| {
            if let Some(line) = this.upgrade() {
                line.update(state);
            }
        });
    }

    /// Record `state`, printing it if it differs from the last one shown.
    pub fn update(&self, state: RecordingState) {
        self.updates.set(self.updates.get() + 1);
        if self.last.replace(Some(state)) == Some(state) {
            debug!(%state, "Status unchanged");
            return;
        }
        println!("[{}]", Self::label(state));
    }

    /// Last state received.
    pub fn last(&self) -> Option<RecordingState> {
        self.last.get()
    }

    /// Number of broadcasts received, including repeats.
    pub fn updates(&self) -> usize {
        self.updates.get()
    }

    /// Human-readable label for `state`.
    pub fn label(state: RecordingState) -> String {
        match state {
            RecordingState::Inactive => "idle".to_string(),
            RecordingState::Active => "recording".to_string(),
            RecordingState::Error(reason) => format!("unavailable: {reason}"),
        }
    }
}
