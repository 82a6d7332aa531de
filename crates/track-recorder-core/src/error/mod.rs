use error_location::ErrorLocation;
use thiserror::Error;

/// Faults reported by a recorder backend, with source location tracking.
#[derive(Error, Debug)]
pub enum RecorderError {
    /// A start was requested while a recording is already running.
    #[error("Recorder is already recording {location}")]
    AlreadyRecording {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A stop was requested while no recording is running.
    #[error("Recorder is not recording {location}")]
    NotRecording {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The recording engine rejected an operation.
    #[error("Recorder {operation} failed: {reason} {location}")]
    BackendFailed {
        /// Name of the backend operation that failed.
        operation: &'static str,
        /// Description of the failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`RecorderError`].
pub type Result<T> = std::result::Result<T, RecorderError>;
