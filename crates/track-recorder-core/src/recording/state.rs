use std::fmt;

use thiserror::Error;

/// Canonical recording state broadcast to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingState {
    /// No recording is running.
    Inactive,
    /// A track is being recorded.
    Active,
    /// A precondition for recording is not met.
    Error(RecordingError),
}

impl fmt::Display for RecordingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordingState::Inactive => f.write_str("inactive"),
            RecordingState::Active => f.write_str("active"),
            RecordingState::Error(reason) => write!(f, "error ({reason})"),
        }
    }
}

/// Reasons the manager can be in [`RecordingState::Error`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum RecordingError {
    /// Location access is denied, so no samples can be collected.
    #[error("location access is prohibited")]
    LocationProhibited,
}

/// How a running recording is finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SavingOption {
    /// Throw the recorded samples away.
    WithoutSaving,
    /// Keep the track, optionally under a caller-supplied name.
    SaveWithName(Option<String>),
}

/// What a single `toggle()` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// A new recording was started.
    Started,
    /// The confirmation prompt was presented; the stop completes when it resolves.
    AwaitingConfirmation,
    /// The recording held no samples and was discarded without asking.
    DiscardedEmpty,
    /// An error state was handled and the recorder forced to a stopped state.
    Recovered(RecordingError),
    /// A confirmation is still outstanding, so nothing was done.
    Ignored,
    /// The backend rejected the transition; state was resynced from the recorder.
    Failed,
}
