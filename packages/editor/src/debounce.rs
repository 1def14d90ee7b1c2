//! Caller-driven debounce clock.
//!
//! The core owns no timers. The host notes each property edit and asks, on
//! its own schedule, whether the burst has settled; a settled burst is then
//! committed with a single `PushHistory` dispatch.

use std::time::{Duration, Instant};

pub const DEFAULT_DEBOUNCE_WINDOW: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct DebounceClock {
    window: Duration,
    last_edit: Option<Instant>,
}

impl DebounceClock {
    pub fn new() -> Self {
        Self::with_window(DEFAULT_DEBOUNCE_WINDOW)
    }

    pub fn with_window(window: Duration) -> Self {
        Self {
            window,
            last_edit: None,
        }
    }

    /// Record a property edit at `now`, restarting the trailing window.
    pub fn note_edit(&mut self, now: Instant) {
        self.last_edit = Some(now);
    }

    /// True when edits are pending and the window has elapsed since the last
    /// one.
    pub fn should_flush(&self, now: Instant) -> bool {
        match self.last_edit {
            Some(last) => now.saturating_duration_since(last) >= self.window,
            None => false,
        }
    }

    pub fn pending(&self) -> bool {
        self.last_edit.is_some()
    }

    pub fn reset(&mut self) {
        self.last_edit = None;
    }
}

impl Default for DebounceClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flush_only_after_window_elapses() {
        let mut clock = DebounceClock::with_window(Duration::from_millis(500));
        let start = Instant::now();

        assert!(!clock.should_flush(start));

        clock.note_edit(start);
        assert!(!clock.should_flush(start + Duration::from_millis(100)));
        assert!(clock.should_flush(start + Duration::from_millis(500)));
    }

    #[test]
    fn test_new_edit_restarts_the_window() {
        let mut clock = DebounceClock::with_window(Duration::from_millis(500));
        let start = Instant::now();

        clock.note_edit(start);
        clock.note_edit(start + Duration::from_millis(400));

        assert!(!clock.should_flush(start + Duration::from_millis(600)));
        assert!(clock.should_flush(start + Duration::from_millis(900)));
    }

    #[test]
    fn test_reset_clears_pending_edits() {
        let mut clock = DebounceClock::new();
        clock.note_edit(Instant::now());
        assert!(clock.pending());

        clock.reset();
        assert!(!clock.pending());
    }
}
