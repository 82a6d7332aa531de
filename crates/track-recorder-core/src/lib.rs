//! Track Recorder Core Library
//!
//! Single-session track recording state machine with weak, self-pruning
//! observers. The recording engine, permission query, confirmation dialog and
//! informational messages are injected as trait objects.
//!
//! # Example
//!
//! ```no_run
//! use track_recorder_core::{Collaborators, RecordingState, TrackRecordingManager};
//!
//! use std::rc::Rc;
//!
//! fn wire(collaborators: Collaborators) {
//!     let manager = TrackRecordingManager::new(collaborators);
//!
//!     let status = Rc::new(());
//!     manager.subscribe(&status, |state| match state {
//!         RecordingState::Active => println!("recording"),
//!         RecordingState::Inactive => println!("idle"),
//!         RecordingState::Error(reason) => println!("error: {reason}"),
//!     });
//!
//!     manager.toggle();
//! }
//! ```

mod error;
mod recording;

pub use {
    error::RecorderError,
    error::Result as CoreResult,
    recording::{
        Collaborators, ConfirmationPrompt, InfoMessage, PermissionGate, RecorderBackend,
        RecordingError, RecordingState, SavingOption, StopConfirmation, ToggleOutcome,
        TrackRecordingManager,
    },
};
