use crate::{SavingOption, TrackRecordingManager};

use std::rc::Weak;

use tracing::{debug, instrument};
use uuid::Uuid;

/// Pending decision about a recording the user asked to stop.
///
/// Handed to [`ConfirmationPrompt::present`](crate::ConfirmationPrompt::present).
/// Every resolving method consumes the value, so a decision is applied at most
/// once. Dropping it without a decision keeps the recording running.
#[derive(Debug)]
pub struct StopConfirmation {
    manager: Weak<TrackRecordingManager>,
    session_id: Option<Uuid>,
    resolved: bool,
}

impl StopConfirmation {
    pub(crate) fn new(manager: Weak<TrackRecordingManager>, session_id: Option<Uuid>) -> Self {
        Self {
            manager,
            session_id,
            resolved: false,
        }
    }

    /// Session id of the recording this decision applies to.
    pub fn session_id(&self) -> Option<Uuid> {
        self.session_id
    }

    /// Stop and keep the track without a name.
    pub fn save(self) {
        self.resolve(Some(SavingOption::SaveWithName(None)));
    }

    /// Stop and keep the track under `name`.
    pub fn save_with_name(self, name: impl Into<String>) {
        self.resolve(Some(SavingOption::SaveWithName(Some(name.into()))));
    }

    /// Stop and throw the track away.
    pub fn discard(self) {
        self.resolve(Some(SavingOption::WithoutSaving));
    }

    /// Leave the recording running.
    pub fn keep_recording(self) {
        self.resolve(None);
    }

    #[instrument(skip(self), fields(session_id = ?self.session_id))]
    fn resolve(mut self, option: Option<SavingOption>) {
        self.resolved = true;
        match self.manager.upgrade() {
            Some(manager) => manager.complete_confirmation(self.session_id, option),
            None => debug!("Recording manager dropped before confirmation resolved"),
        }
    }
}

impl Drop for StopConfirmation {
    fn drop(&mut self) {
        if self.resolved {
            return;
        }
        if let Some(manager) = self.manager.upgrade() {
            debug!(session_id = ?self.session_id, "Confirmation dismissed");
            manager.complete_confirmation(self.session_id, None);
        }
    }
}
