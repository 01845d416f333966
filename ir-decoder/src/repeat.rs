//! Key repeat suppression
//!
//! Remotes auto-repeat and keys stutter mechanically, so a fully valid
//! frame can arrive again milliseconds after the one it duplicates. The
//! filter drops a code identical to the previously accepted one when it
//! arrives inside the re-trigger window. Suppression does not refresh the
//! window: holding a key down still delivers one code per window.

use crate::types::Code;
use std::time::{Duration, Instant};

/// Suppresses duplicate codes inside the re-trigger window
pub struct RepeatFilter {
    window: Duration,
    last: Option<(Code, Instant)>,
}

impl RepeatFilter {
    /// Create a filter with the given minimum re-trigger interval
    pub fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    /// Create a filter from a window in milliseconds
    pub fn from_window_ms(window_ms: f64) -> Self {
        Self::new(Duration::from_secs_f64(window_ms.max(0.0) / 1000.0))
    }

    /// Decide whether a freshly assembled code passes the filter
    ///
    /// The first code of a session is always accepted. A code equal to the
    /// last accepted one within the window is rejected and leaves the
    /// filter state untouched.
    pub fn accept(&mut self, code: Code, now: Instant) -> bool {
        if let Some((last_code, accepted_at)) = self.last {
            if last_code == code && now.saturating_duration_since(accepted_at) < self.window {
                return false;
            }
        }
        self.last = Some((code, now));
        true
    }
}
