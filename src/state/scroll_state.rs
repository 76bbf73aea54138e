//! ScrollState - Scroll Tracking and Echo Suppression
//!
//! Programmatic scrolls make the rendering engine report visible-range
//! changes just like a user drag does. An echo token is set when we scroll
//! ourselves; reports are ignored until the token expires or a genuine user
//! gesture clears it.

use std::time::{Duration, Instant};

/// Scroll-tracking state of the selection synchronizer
#[derive(Debug, Clone)]
pub struct ScrollState {
    /// Whether visible-range reports may update the selected day
    tracking_enabled: bool,
    /// Set when a programmatic scroll starts
    echo_since: Option<Instant>,
    /// How long an echo token stays valid
    echo_window: Duration,
}

impl ScrollState {
    /// Create a tracking state with the given echo window
    pub fn new(echo_window: Duration) -> Self {
        Self {
            tracking_enabled: true,
            echo_since: None,
            echo_window,
        }
    }

    /// Check if scroll tracking is enabled
    pub fn is_tracking_enabled(&self) -> bool {
        self.tracking_enabled
    }

    /// Check if an echo token is pending
    pub fn is_echo_pending(&self) -> bool {
        self.echo_since.is_some()
    }

    /// Record that a programmatic scroll started at `now`
    pub fn mark_programmatic_scroll(&mut self, now: Instant) {
        self.echo_since = Some(now);
    }

    /// Stop reacting to visible-range reports until the next user gesture
    pub fn pause_tracking(&mut self) {
        self.tracking_enabled = false;
    }

    /// A genuine touch/drag: re-enable tracking and drop any echo token
    pub fn on_user_gesture(&mut self) {
        self.tracking_enabled = true;
        self.echo_since = None;
    }

    /// Decide whether a visible-range report at `now` comes from the user
    ///
    /// An expired echo token is cleared on the way.
    pub fn accepts_report(&mut self, now: Instant) -> bool {
        if !self.tracking_enabled {
            return false;
        }

        match self.echo_since {
            Some(since) if now.saturating_duration_since(since) < self.echo_window => false,
            Some(_) => {
                self.echo_since = None;
                true
            }
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echo_window_suppresses_reports() {
        let start = Instant::now();
        let mut state = ScrollState::new(Duration::from_millis(3000));
        assert!(state.accepts_report(start));

        state.mark_programmatic_scroll(start);
        assert!(!state.accepts_report(start + Duration::from_millis(1500)));
        assert!(state.is_echo_pending());
        assert!(state.accepts_report(start + Duration::from_millis(3000)));
        assert!(!state.is_echo_pending());
    }

    #[test]
    fn test_user_gesture_clears_echo_and_resumes() {
        let start = Instant::now();
        let mut state = ScrollState::new(Duration::from_millis(3000));
        state.mark_programmatic_scroll(start);
        state.pause_tracking();
        assert!(!state.accepts_report(start + Duration::from_secs(10)));

        state.on_user_gesture();
        assert!(state.is_tracking_enabled());
        assert!(state.accepts_report(start + Duration::from_millis(10)));
    }
}
