//! Terminal status sink (spinner + banner).
//!
//! The loading spinner is an `indicatif` spinner on stderr, the error banner
//! is a stderr line, and the saved-path confirmation goes to stdout so it can
//! be piped.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::status::{Status, StatusSink};

/// Status sink that renders to the terminal.
pub struct TerminalUi {
    spinner: Mutex<Option<ProgressBar>>,
    use_spinner: bool,
    host: String,
}

impl TerminalUi {
    /// Creates a terminal sink.
    ///
    /// When `use_spinner` is false (quiet mode, non-terminal stderr, dumb
    /// terminal) no spinner is drawn; banners are still printed.
    #[must_use]
    pub fn new(use_spinner: bool, host: impl Into<String>) -> Self {
        Self {
            spinner: Mutex::new(None),
            use_spinner,
            host: host.into(),
        }
    }

    fn clear_spinner(&self) {
        let mut slot = self
            .spinner
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(spinner) = slot.take() {
            spinner.finish_and_clear();
        }
    }

    fn start_spinner(&self) {
        if !self.use_spinner {
            return;
        }
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner.set_message(format!("Requesting forecast from {}...", self.host));

        let mut slot = self
            .spinner
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *slot = Some(spinner);
    }
}

impl StatusSink for TerminalUi {
    fn transition(&self, status: &Status) {
        match status {
            Status::Idle => self.clear_spinner(),
            Status::Loading => {
                // Loading clears any prior banner state implicitly: banners
                // are lines already emitted, so only the spinner is managed.
                self.clear_spinner();
                self.start_spinner();
            }
            Status::Error(message) => {
                self.clear_spinner();
                eprintln!("Error: {message}");
            }
            Status::Done(path) => {
                self.clear_spinner();
                println!("Saved {}", path.display());
            }
        }
    }
}

/// Returns true when the `NO_COLOR` convention requests plain output.
#[must_use]
pub fn no_color_env_requested() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty())
}

/// Returns true when `TERM` identifies a dumb terminal.
#[must_use]
pub fn is_dumb_terminal() -> bool {
    std::env::var("TERM")
        .map(|value| value.eq_ignore_ascii_case("dumb"))
        .unwrap_or(false)
}

/// Decides whether the loading spinner should be drawn.
#[must_use]
pub fn should_use_spinner(stderr_is_terminal: bool, quiet: bool, dumb_terminal: bool) -> bool {
    stderr_is_terminal && !quiet && !dumb_terminal
}
