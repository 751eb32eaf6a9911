//! Interaction status model and the UI seam.
//!
//! The controller reports transitions to an injected [`StatusSink`] rather
//! than driving any concrete UI, so the sink can be a terminal spinner, a
//! recording stub in tests, or anything else.

use std::path::PathBuf;
use std::sync::Arc;

/// Status of one search interaction. Transient; nothing is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// No interaction in progress.
    Idle,
    /// Request outstanding; the loading indicator should be visible.
    Loading,
    /// The interaction failed; the message is ready for display.
    Error(String),
    /// The response was saved to the given path.
    Done(PathBuf),
}

impl Status {
    /// Returns true while the loading indicator should be shown.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// UI handle the controller reports status transitions to.
///
/// Implementations must tolerate any transition order: every interaction ends
/// in `Error` or `Done`, and `Loading` implicitly clears prior banner state.
pub trait StatusSink: Send + Sync {
    /// Reports a status transition.
    fn transition(&self, status: &Status);
}

impl<S: StatusSink + ?Sized> StatusSink for Arc<S> {
    fn transition(&self, status: &Status) {
        (**self).transition(status);
    }
}

/// Maximum banner length in characters; server-provided text is capped.
const MAX_BANNER_CHARS: usize = 500;

/// Sanitizes server-provided text before it reaches the banner.
///
/// Control characters (including newlines and ANSI escape introducers) become
/// spaces, the result is trimmed, and overly long text is truncated.
#[must_use]
pub fn sanitize_banner_text(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    let trimmed = cleaned.trim();
    if trimmed.chars().count() > MAX_BANNER_CHARS {
        trimmed.chars().take(MAX_BANNER_CHARS).collect()
    } else {
        trimmed.to_string()
    }
}
