use track_recorder_core::InfoMessage;

use tracing::info;

/// Prints informational messages to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleMessages;

impl InfoMessage for ConsoleMessages {
    fn show(&self, text: &str) {
        info!(text, "Info message shown");
        println!("{text}");
    }
}
