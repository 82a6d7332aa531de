use crate::{AppError, AppResult};

use std::{panic::Location, str::FromStr};

use error_location::ErrorLocation;

/// Commands typed on the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    /// Start a recording or ask to stop the current one.
    Toggle,
    /// Answer a pending stop confirmation by keeping the track.
    Save {
        /// Optional track name; everything after `save`.
        name: Option<String>,
    },
    /// Answer a pending stop confirmation by throwing the track away.
    Discard,
    /// Answer a pending stop confirmation by continuing to record.
    Continue,
    /// Grant location access.
    Allow,
    /// Revoke location access.
    Deny,
    /// Print the current state.
    Status,
    /// Print the command list.
    Help,
    /// Request application shutdown.
    Quit,
}

impl AppCommand {
    /// Command summary printed by `help`.
    pub const HELP: &'static str = "Commands: toggle (t), save [name], discard, continue, \
                                    allow, deny, status, help, quit (q)";

    /// Parse one terminal line.
    #[track_caller]
    pub fn parse(line: &str) -> AppResult<Self> {
        let trimmed = line.trim();
        let (word, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (trimmed, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "toggle" | "t" => AppCommand::Toggle,
            "save" | "s" => AppCommand::Save {
                name: (!rest.is_empty()).then(|| rest.to_string()),
            },
            "discard" | "d" => AppCommand::Discard,
            "continue" | "c" => AppCommand::Continue,
            "allow" => AppCommand::Allow,
            "deny" => AppCommand::Deny,
            "status" => AppCommand::Status,
            "help" | "?" => AppCommand::Help,
            "quit" | "q" | "exit" => AppCommand::Quit,
            _ => {
                return Err(AppError::UnknownCommand {
                    input: trimmed.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        if !rest.is_empty() && !matches!(command, AppCommand::Save { .. }) {
            return Err(AppError::UnknownCommand {
                input: trimmed.to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(command)
    }
}

impl FromStr for AppCommand {
    type Err = AppError;

    #[track_caller]
    fn from_str(s: &str) -> AppResult<Self> {
        Self::parse(s)
    }
}
