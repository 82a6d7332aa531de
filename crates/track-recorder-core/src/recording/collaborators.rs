use crate::{CoreResult, recording::StopConfirmation};

/// The engine that actually collects location samples into a track.
pub trait RecorderBackend {
    /// Begin a new recording.
    fn start(&self) -> CoreResult<()>;

    /// Stop the current recording and drop its samples.
    ///
    /// Must succeed when nothing is recording, so it can be used to force a
    /// clean stopped state.
    fn stop_without_saving(&self) -> CoreResult<()>;

    /// Stop the current recording and keep it as a track.
    fn stop_and_save(&self, name: Option<&str>) -> CoreResult<()>;

    /// Whether a recording is currently running.
    fn is_active(&self) -> bool;

    /// Whether the current recording has no samples yet.
    fn is_empty(&self) -> bool;
}

/// Permission precondition for recording.
pub trait PermissionGate {
    /// Whether recording is currently prohibited.
    fn is_prohibited(&self) -> bool;

    /// Offer the user a way to grant the missing permission. Fire and forget.
    fn prompt_user_to_enable(&self);
}

/// Asks the user what to do with a non-empty recording that is being stopped.
pub trait ConfirmationPrompt {
    /// Present the prompt. The decision is delivered through `confirmation`,
    /// now or later; dropping it unresolved keeps the recording running.
    fn present(&self, confirmation: StopConfirmation);
}

/// Fire-and-forget informational text for the user.
pub trait InfoMessage {
    /// Display `text`.
    fn show(&self, text: &str);
}

/// Everything [`TrackRecordingManager`](crate::TrackRecordingManager) talks to.
pub struct Collaborators {
    /// Recording engine.
    pub backend: Box<dyn RecorderBackend>,
    /// Permission query.
    pub permissions: Box<dyn PermissionGate>,
    /// Stop confirmation dialog.
    pub prompt: Box<dyn ConfirmationPrompt>,
    /// Informational messages.
    pub messages: Box<dyn InfoMessage>,
}
