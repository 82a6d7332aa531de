//! Track-Recorder: single-session track recording driven from the terminal.

mod app;
mod app_command;
mod config;
mod console_messages;
mod error;
mod location_permission;
mod simulated_recorder;
mod status_line;
mod terminal_prompt;

pub(crate) use {
    app::App,
    app_command::AppCommand,
    console_messages::ConsoleMessages,
    error::{AppError, Result as AppResult},
    location_permission::LocationPermission,
    simulated_recorder::SimulatedRecorder,
    status_line::StatusLine,
    terminal_prompt::TerminalPrompt,
};

use crate::config::Config;

use std::panic::Location;

use error_location::ErrorLocation;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Log filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "track_recorder=debug,track_recorder_core=debug";

/// Application entry point.
fn main() {
    // Logs go to stderr so they do not interleave with the prompt on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        error!(error = ?e, "Track recorder failed");
        std::process::exit(1);
    }
}

#[track_caller]
fn run() -> AppResult<()> {
    let config = Config::load()?;

    // The recording manager is !Send: one thread, one LocalSet.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| AppError::RuntimeError {
            reason: format!("Failed to create tokio runtime: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

    let local = tokio::task::LocalSet::new();
    local.block_on(&runtime, App::new(config).run())
}
