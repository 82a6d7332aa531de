use crate::{
    CoreResult,
    recording::{
        Collaborators, ConfirmationPrompt, InfoMessage, ObserverRegistry, PermissionGate,
        RecorderBackend, RecordingError, RecordingState, SavingOption, StopConfirmation,
        ToggleOutcome,
    },
};

use std::{
    any::Any,
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
};

use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// Shown when a recording is stopped before any sample arrived.
pub(crate) const EMPTY_TRACK_MESSAGE: &str = "The track is empty, so it was not saved.";

/// Owner of the single track recording session.
///
/// The recorder and permission gate are the source of truth: every
/// [`toggle`](Self::toggle) re-derives the state from them before deciding
/// what to do. The cached state is what observers see; each write to it is
/// broadcast synchronously to every live subscriber.
///
/// # Thread Safety
///
/// Not thread-safe. All calls must come from one thread; the manager is
/// `!Send` and is shared through `Rc`.
pub struct TrackRecordingManager {
    backend: Box<dyn RecorderBackend>,
    permissions: Box<dyn PermissionGate>,
    prompt: Box<dyn ConfirmationPrompt>,
    messages: Box<dyn InfoMessage>,
    state: Cell<RecordingState>,
    generation: Cell<u64>,
    awaiting_confirmation: Cell<bool>,
    session_id: Cell<Option<Uuid>>,
    observers: RefCell<ObserverRegistry>,
    this: Weak<TrackRecordingManager>,
}

impl TrackRecordingManager {
    /// Create the manager, seeding its state from the collaborators.
    #[instrument(skip(collaborators))]
    pub fn new(collaborators: Collaborators) -> Rc<Self> {
        let Collaborators {
            backend,
            permissions,
            prompt,
            messages,
        } = collaborators;

        let state = derive_state(permissions.as_ref(), backend.as_ref());
        let session_id = (state == RecordingState::Active).then(Uuid::new_v4);

        info!(%state, "Track recording manager initialized");

        Rc::new_cyclic(|this| Self {
            backend,
            permissions,
            prompt,
            messages,
            state: Cell::new(state),
            generation: Cell::new(0),
            awaiting_confirmation: Cell::new(false),
            session_id: Cell::new(session_id),
            observers: RefCell::new(ObserverRegistry::default()),
            this: this.clone(),
        })
    }

    /// State as last written and broadcast.
    pub fn current_state(&self) -> RecordingState {
        self.state.get()
    }

    /// Ground-truth state computed from the permission gate and recorder.
    ///
    /// Side-effect free; does not touch the cached state.
    pub fn derive_state(&self) -> RecordingState {
        derive_state(self.permissions.as_ref(), self.backend.as_ref())
    }

    /// Whether a stop confirmation is outstanding.
    pub fn is_awaiting_confirmation(&self) -> bool {
        self.awaiting_confirmation.get()
    }

    /// Start a recording, or begin stopping the running one.
    ///
    /// While a stop confirmation is outstanding only the error path runs; it
    /// abandons the confirmation. Any other toggle is ignored.
    #[instrument(skip(self))]
    pub fn toggle(&self) -> ToggleOutcome {
        match self.derive_state() {
            RecordingState::Error(reason) => {
                if self.awaiting_confirmation.replace(false) {
                    warn!(session_id = ?self.session_id.get(), "Abandoning stop confirmation");
                }
                self.set_state(RecordingState::Error(reason));
                self.handle_error(reason)
            }
            _ if self.awaiting_confirmation.get() => {
                debug!("Stop confirmation pending, ignoring toggle");
                ToggleOutcome::Ignored
            }
            RecordingState::Inactive => self.start(),
            RecordingState::Active => self.request_stop(),
        }
    }

    /// Re-derive the state and broadcast it if it changed.
    #[instrument(skip(self))]
    pub fn refresh(&self) -> RecordingState {
        let derived = self.derive_state();
        if derived != self.state.get() {
            debug!(from = %self.state.get(), to = %derived, "State drifted from recorder");
            self.set_state(derived);
        }
        derived
    }

    /// Register `handler` for `identity` and call it once with the current state.
    ///
    /// Subscribing the same identity again replaces its handler. The manager
    /// holds only a weak reference to `identity`; once it is dropped the
    /// handler is never called again.
    pub fn subscribe<T, F>(&self, identity: &Rc<T>, handler: F)
    where
        T: Any,
        F: Fn(RecordingState) + 'static,
    {
        let handler: Rc<dyn Fn(RecordingState)> = Rc::new(handler);
        let replaced = self
            .observers
            .borrow_mut()
            .insert(identity, Rc::clone(&handler));

        debug!(replaced, "Observer subscribed");

        handler(self.state.get());
    }

    /// Remove the handler registered for `identity`, if any.
    pub fn unsubscribe<T: Any>(&self, identity: &Rc<T>) {
        let removed = self.observers.borrow_mut().remove(identity);
        debug!(removed, "Observer unsubscribed");
    }

    #[instrument(skip(self))]
    fn start(&self) -> ToggleOutcome {
        if let Err(e) = self.backend.start() {
            error!(error = ?e, "Failed to start recording");
            self.resync();
            return ToggleOutcome::Failed;
        }

        let session_id = Uuid::new_v4();
        self.session_id.set(Some(session_id));
        self.set_state(RecordingState::Active);

        info!(session_id = %session_id, "Recording started");

        ToggleOutcome::Started
    }

    #[instrument(skip(self))]
    fn request_stop(&self) -> ToggleOutcome {
        if self.backend.is_empty() {
            self.messages.show(EMPTY_TRACK_MESSAGE);
            return if self.finalize(SavingOption::WithoutSaving) {
                ToggleOutcome::DiscardedEmpty
            } else {
                ToggleOutcome::Failed
            };
        }

        // Flag first: a prompt may resolve synchronously from inside present().
        self.awaiting_confirmation.set(true);
        debug!(session_id = ?self.session_id.get(), "Awaiting stop confirmation");

        self.prompt
            .present(StopConfirmation::new(self.this.clone(), self.session_id.get()));

        ToggleOutcome::AwaitingConfirmation
    }

    /// Apply the user's decision for `session_id`. `None` means keep recording.
    pub(crate) fn complete_confirmation(
        &self,
        session_id: Option<Uuid>,
        option: Option<SavingOption>,
    ) {
        if !self.awaiting_confirmation.get() || self.session_id.get() != session_id {
            warn!(session_id = ?session_id, "Confirmation resolved with none pending");
            return;
        }
        self.awaiting_confirmation.set(false);

        match option {
            Some(option) => {
                self.finalize(option);
            }
            None => info!(session_id = ?self.session_id.get(), "Recording continues"),
        }
    }

    /// Stop the backend and write `Inactive`. Returns `false` on a backend fault.
    #[instrument(skip(self))]
    fn finalize(&self, option: SavingOption) -> bool {
        let session_id = self.session_id.get();

        let result: CoreResult<()> = match &option {
            SavingOption::WithoutSaving => self.backend.stop_without_saving(),
            SavingOption::SaveWithName(name) => self.backend.stop_and_save(name.as_deref()),
        };

        if let Err(e) = result {
            error!(session_id = ?session_id, error = ?e, "Failed to stop recording");
            self.resync();
            return false;
        }

        self.session_id.set(None);
        self.set_state(RecordingState::Inactive);

        info!(
            session_id = ?session_id,
            saved = matches!(option, SavingOption::SaveWithName(_)),
            "Recording stopped"
        );

        true
    }

    #[instrument(skip(self))]
    fn handle_error(&self, reason: RecordingError) -> ToggleOutcome {
        match reason {
            RecordingError::LocationProhibited => {
                warn!("Location access prohibited, stopping any recording");
                self.permissions.prompt_user_to_enable();
            }
        }

        if self.finalize(SavingOption::WithoutSaving) {
            ToggleOutcome::Recovered(reason)
        } else {
            ToggleOutcome::Failed
        }
    }

    /// Write the state derived from the recorder after a backend fault.
    fn resync(&self) {
        let derived = self.derive_state();
        if derived != RecordingState::Active {
            self.session_id.set(None);
        }
        self.set_state(derived);
    }

    fn set_state(&self, state: RecordingState) {
        self.state.set(state);
        let generation = self.generation.get().wrapping_add(1);
        self.generation.set(generation);
        self.notify(state, generation);
    }

    fn notify(&self, state: RecordingState, generation: u64) {
        // Snapshot so handlers can call back into the manager.
        let handlers = self.observers.borrow_mut().live_handlers();

        debug!(%state, observers = handlers.len(), "Broadcasting state");

        for (key, handler) in handlers {
            // A handler wrote a newer state; its own pass has reached every
            // live observer, so the rest of this one is stale.
            if self.generation.get() != generation {
                debug!(%state, "Superseded by a nested write, ending broadcast");
                return;
            }
            if self.observers.borrow().is_current(key, &handler) {
                handler(state);
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn observer_count(&self) -> usize {
        self.observers.borrow().len()
    }
}

fn derive_state(permissions: &dyn PermissionGate, backend: &dyn RecorderBackend) -> RecordingState {
    if permissions.is_prohibited() {
        RecordingState::Error(RecordingError::LocationProhibited)
    } else if backend.is_active() {
        RecordingState::Active
    } else {
        RecordingState::Inactive
    }
}
