use crate::{
    AppCommand, AppResult, ConsoleMessages, LocationPermission, SimulatedRecorder, StatusLine,
    TerminalPrompt, config::Config, simulated_recorder::run_sampler,
};

use std::rc::Rc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, instrument, warn};
use track_recorder_core::{Collaborators, RecordingState, ToggleOutcome, TrackRecordingManager};

/// Main application state.
///
/// Everything here is `!Send`; the app runs on a current-thread runtime
/// inside a `LocalSet`, so the sampler task and the command loop share the
/// recorder without locks.
pub struct App {
    pub(crate) manager: Rc<TrackRecordingManager>,
    pub(crate) recorder: SimulatedRecorder,
    pub(crate) permission: LocationPermission,
    pub(crate) prompt: TerminalPrompt,
    pub(crate) status: Rc<StatusLine>,
    pub(crate) config: Config,
}

impl App {
    /// Wire the simulated collaborators to a new recording manager.
    #[instrument(skip(config))]
    pub(crate) fn new(config: Config) -> Self {
        let recorder = SimulatedRecorder::new();
        let permission = LocationPermission::new(config.location.enabled);
        let prompt = TerminalPrompt::new();

        let manager = TrackRecordingManager::new(Collaborators {
            backend: Box::new(recorder.clone()),
            permissions: Box::new(permission.clone()),
            prompt: Box::new(prompt.clone()),
            messages: Box::new(ConsoleMessages),
        });

        let status = StatusLine::new();
        status.attach(&manager);

        Self {
            manager,
            recorder,
            permission,
            prompt,
            status,
            config,
        }
    }

    /// Run the command loop until `quit`, end of input, or Ctrl+C.
    ///
    /// Must be polled inside a `LocalSet`.
    #[instrument(skip(self))]
    pub(crate) async fn run(self) -> AppResult<()> {
        info!("Track recorder starting");
        println!("{}", AppCommand::HELP);

        let sampler = tokio::task::spawn_local(run_sampler(
            self.recorder.clone(),
            self.config.recorder.sample_interval(),
        ));

        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        info!("Input closed, shutting down");
                        break;
                    };
                    if line.trim().is_empty() {
                        continue;
                    }
                    match line.parse::<AppCommand>() {
                        Ok(command) => {
                            if !self.handle_command(command) {
                                break;
                            }
                        }
                        Err(e) => {
                            warn!(error = %e, "Rejected input");
                            println!("{}", AppCommand::HELP);
                        }
                    }
                }

                _ = tokio::signal::ctrl_c() => {
                    info!("Received Ctrl+C, shutting down");
                    break;
                }
            }
        }

        sampler.abort();

        if self.manager.current_state() == RecordingState::Active {
            warn!(
                samples = self.recorder.sample_count(),
                "Exiting with a recording in progress; it will not be saved"
            );
        }

        info!(
            saved_tracks = self.recorder.saved_tracks(),
            "Track recorder shut down"
        );

        Ok(())
    }

    /// Apply one command. Returns `false` when the app should exit.
    #[instrument(skip(self))]
    pub(crate) fn handle_command(&self, command: AppCommand) -> bool {
        match command {
            AppCommand::Toggle => {
                let outcome = self.manager.toggle();
                debug!(?outcome, "Toggle handled");
                if outcome == ToggleOutcome::Ignored {
                    println!("Answer the pending question first: `save`, `discard`, or `continue`.");
                }
            }
            AppCommand::Save { name } => match self.prompt.take_pending() {
                Some(confirmation) => match name {
                    Some(name) => confirmation.save_with_name(name),
                    None => confirmation.save(),
                },
                None => println!("Nothing to save; no stop is pending."),
            },
            AppCommand::Discard => match self.prompt.take_pending() {
                Some(confirmation) => confirmation.discard(),
                None => println!("Nothing to discard; no stop is pending."),
            },
            AppCommand::Continue => match self.prompt.take_pending() {
                Some(confirmation) => confirmation.keep_recording(),
                None => println!("Nothing to continue; no stop is pending."),
            },
            AppCommand::Allow => {
                self.permission.set_granted(true);
                self.manager.refresh();
            }
            AppCommand::Deny => {
                self.permission.set_granted(false);
                self.manager.refresh();
            }
            AppCommand::Status => {
                let state = self.manager.current_state();
                debug!(
                    %state,
                    shown = ?self.status.last(),
                    updates = self.status.updates(),
                    "Status requested"
                );
                println!(
                    "{} ({} samples, {} tracks saved, location {})",
                    StatusLine::label(state),
                    self.recorder.sample_count(),
                    self.recorder.saved_tracks(),
                    if self.permission.is_granted() { "on" } else { "off" }
                );
                if self.prompt.has_pending() {
                    println!("Waiting for an answer: `save [name]`, `discard`, or `continue`.");
                }
            }
            AppCommand::Help => println!("{}", AppCommand::HELP),
            AppCommand::Quit => {
                info!("Shutdown requested");
                if let Some(confirmation) = self.prompt.take_pending() {
                    confirmation.keep_recording();
                }
                return false;
            }
        }

        true
    }
}
