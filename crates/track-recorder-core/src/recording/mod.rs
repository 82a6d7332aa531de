mod collaborators;
mod confirmation;
mod manager;
mod observers;
mod state;

pub(crate) use observers::ObserverRegistry;

#[cfg(test)]
pub(crate) use manager::EMPTY_TRACK_MESSAGE;

pub use {
    collaborators::{
        Collaborators, ConfirmationPrompt, InfoMessage, PermissionGate, RecorderBackend,
    },
    confirmation::StopConfirmation,
    manager::TrackRecordingManager,
    state::{RecordingError, RecordingState, SavingOption, ToggleOutcome},
};
