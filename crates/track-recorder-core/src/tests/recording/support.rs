//! Test doubles for the recording collaborators.

use crate::{
    Collaborators, ConfirmationPrompt, CoreResult, InfoMessage, PermissionGate, RecorderBackend,
    RecorderError, RecordingState, StopConfirmation, TrackRecordingManager,
};

use std::{
    cell::{Cell, RefCell},
    panic::Location,
    rc::Rc,
};

use error_location::ErrorLocation;

#[derive(Default)]
struct FakeRecorderInner {
    active: Cell<bool>,
    samples: Cell<usize>,
    starts: Cell<usize>,
    discards: Cell<usize>,
    saves: RefCell<Vec<Option<String>>>,
    fail_start: Cell<bool>,
    fail_stop: Cell<bool>,
}

/// In-memory recorder that counts every call.
#[derive(Clone, Default)]
pub(crate) struct FakeRecorder {
    inner: Rc<FakeRecorderInner>,
}

impl FakeRecorder {
    pub(crate) fn set_active(&self, active: bool) {
        self.inner.active.set(active);
    }

    pub(crate) fn add_samples(&self, count: usize) {
        self.inner.samples.set(self.inner.samples.get() + count);
    }

    pub(crate) fn fail_start(&self, fail: bool) {
        self.inner.fail_start.set(fail);
    }

    pub(crate) fn fail_stop(&self, fail: bool) {
        self.inner.fail_stop.set(fail);
    }

    pub(crate) fn starts(&self) -> usize {
        self.inner.starts.get()
    }

    pub(crate) fn discards(&self) -> usize {
        self.inner.discards.get()
    }

    pub(crate) fn saves(&self) -> Vec<Option<String>> {
        self.inner.saves.borrow().clone()
    }

    #[track_caller]
    fn backend_failure(operation: &'static str) -> RecorderError {
        RecorderError::BackendFailed {
            operation,
            reason: "injected failure".to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl RecorderBackend for FakeRecorder {
    fn start(&self) -> CoreResult<()> {
        if self.inner.fail_start.get() {
            return Err(Self::backend_failure("start"));
        }
        self.inner.starts.set(self.inner.starts.get() + 1);
        self.inner.samples.set(0);
        self.inner.active.set(true);
        Ok(())
    }

    fn stop_without_saving(&self) -> CoreResult<()> {
        if self.inner.fail_stop.get() {
            return Err(Self::backend_failure("stop_without_saving"));
        }
        self.inner.discards.set(self.inner.discards.get() + 1);
        self.inner.samples.set(0);
        self.inner.active.set(false);
        Ok(())
    }

    fn stop_and_save(&self, name: Option<&str>) -> CoreResult<()> {
        if self.inner.fail_stop.get() {
            return Err(Self::backend_failure("stop_and_save"));
        }
        self.inner.saves.borrow_mut().push(name.map(str::to_string));
        self.inner.samples.set(0);
        self.inner.active.set(false);
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.inner.active.get()
    }

    fn is_empty(&self) -> bool {
        self.inner.samples.get() == 0
    }
}

#[derive(Default)]
struct FakePermissionsInner {
    prohibited: Cell<bool>,
    prompts: Cell<usize>,
}

/// Switchable permission gate.
#[derive(Clone, Default)]
pub(crate) struct FakePermissions {
    inner: Rc<FakePermissionsInner>,
}

impl FakePermissions {
    pub(crate) fn set_prohibited(&self, prohibited: bool) {
        self.inner.prohibited.set(prohibited);
    }

    pub(crate) fn prompts(&self) -> usize {
        self.inner.prompts.get()
    }
}

impl PermissionGate for FakePermissions {
    fn is_prohibited(&self) -> bool {
        self.inner.prohibited.get()
    }

    fn prompt_user_to_enable(&self) {
        self.inner.prompts.set(self.inner.prompts.get() + 1);
    }
}

#[derive(Default)]
struct FakePromptInner {
    pending: RefCell<Option<StopConfirmation>>,
    presented: Cell<usize>,
}

/// Prompt that parks the confirmation until a test resolves it.
#[derive(Clone, Default)]
pub(crate) struct FakePrompt {
    inner: Rc<FakePromptInner>,
}

impl FakePrompt {
    pub(crate) fn presented(&self) -> usize {
        self.inner.presented.get()
    }

    pub(crate) fn take(&self) -> Option<StopConfirmation> {
        self.inner.pending.borrow_mut().take()
    }
}

impl ConfirmationPrompt for FakePrompt {
    fn present(&self, confirmation: StopConfirmation) {
        self.inner.presented.set(self.inner.presented.get() + 1);
        *self.inner.pending.borrow_mut() = Some(confirmation);
    }
}

/// Records every message shown.
#[derive(Clone, Default)]
pub(crate) struct FakeMessages {
    shown: Rc<RefCell<Vec<String>>>,
}

impl FakeMessages {
    pub(crate) fn shown(&self) -> Vec<String> {
        self.shown.borrow().clone()
    }
}

impl InfoMessage for FakeMessages {
    fn show(&self, text: &str) {
        self.shown.borrow_mut().push(text.to_string());
    }
}

/// A manager wired to fakes the test can inspect.
pub(crate) struct Harness {
    pub(crate) manager: Rc<TrackRecordingManager>,
    pub(crate) recorder: FakeRecorder,
    pub(crate) permissions: FakePermissions,
    pub(crate) prompt: FakePrompt,
    pub(crate) messages: FakeMessages,
}

impl Harness {
    pub(crate) fn new() -> Self {
        Self::with(FakeRecorder::default(), FakePermissions::default())
    }

    pub(crate) fn with(recorder: FakeRecorder, permissions: FakePermissions) -> Self {
        let prompt = FakePrompt::default();
        let messages = FakeMessages::default();

        let manager = TrackRecordingManager::new(Collaborators {
            backend: Box::new(recorder.clone()),
            permissions: Box::new(permissions.clone()),
            prompt: Box::new(prompt.clone()),
            messages: Box::new(messages.clone()),
        });

        Self {
            manager,
            recorder,
            permissions,
            prompt,
            messages,
        }
    }

    /// Subscribe `identity` and collect every state it is told about.
    pub(crate) fn observe<T: 'static>(&self, identity: &Rc<T>) -> Rc<RefCell<Vec<RecordingState>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        self.manager
            .subscribe(identity, move |state| sink.borrow_mut().push(state));
        seen
    }
}
