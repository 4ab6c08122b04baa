//! Long-press recognition for row activation.
//!
//! The tracker is a pure machine fed timestamps; the component layer owns
//! the actual timer and calls [`PressTracker::poll_fire`] when it elapses.
//! A press that fires forces the row into the selection and consumes the
//! click event of the same interaction so it cannot also navigate.

/// Hold duration that turns a press into a selection gesture.
pub const LONG_PRESS_MS: i64 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PressSession {
    index: usize,
    started_at_ms: i64,
    fired: bool,
}

/// What a completed press interaction amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// No press was being tracked.
    Idle,
    /// Released before the threshold; the native click proceeds.
    Click {
        /// Row the press started on.
        index: usize,
    },
    /// Held past the threshold; the row must be force-selected and the
    /// trailing click is consumed.
    LongPress {
        /// Row the press started on.
        index: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Tracks at most one press-and-hold interaction.
pub struct PressTracker {
    session: Option<PressSession>,
    suppress_click: bool,
}

impl PressTracker {
    /// Starts tracking a press on a row.
    ///
    /// Any suppression left over from a previous interaction is dropped;
    /// the browser delivers that click before the next press can start.
    pub fn press(&mut self, index: usize, now_ms: i64) {
        self.suppress_click = false;
        self.session = Some(PressSession {
            index,
            started_at_ms: now_ms,
            fired: false,
        });
    }

    /// Timer callback: fires the long press once the threshold elapsed.
    ///
    /// Returns the row to force-select, at most once per press.
    pub fn poll_fire(&mut self, now_ms: i64) -> Option<usize> {
        let session = self.session.as_mut()?;
        if session.fired || now_ms - session.started_at_ms < LONG_PRESS_MS {
            return None;
        }
        session.fired = true;
        self.suppress_click = true;
        Some(session.index)
    }

    /// Ends the interaction on mouse-up/touch-end.
    pub fn release(&mut self, now_ms: i64) -> PressOutcome {
        let Some(session) = self.session.take() else {
            return PressOutcome::Idle;
        };
        if session.fired {
            return PressOutcome::LongPress {
                index: session.index,
            };
        }
        if now_ms - session.started_at_ms >= LONG_PRESS_MS {
            // The timer lost the race against the release event; the hold
            // still counts.
            self.suppress_click = true;
            return PressOutcome::LongPress {
                index: session.index,
            };
        }
        PressOutcome::Click {
            index: session.index,
        }
    }

    /// Abandons the interaction (pointer left the row, scroll started).
    pub fn cancel(&mut self) {
        self.session = None;
    }

    /// Consumes the pending click suppression, if any.
    ///
    /// The row click handler calls this first and bails out when it
    /// returns `true`.
    pub fn take_click_suppression(&mut self) -> bool {
        std::mem::take(&mut self.suppress_click)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quick_release_stays_a_click() {
        let mut tracker = PressTracker::default();
        tracker.press(3, 1_000);
        assert_eq!(tracker.poll_fire(1_400), None);
        assert_eq!(tracker.release(1_500), PressOutcome::Click { index: 3 });
        assert!(!tracker.take_click_suppression());
    }

    #[test]
    fn held_press_fires_once_and_suppresses_the_click() {
        let mut tracker = PressTracker::default();
        tracker.press(5, 1_000);
        assert_eq!(tracker.poll_fire(1_600), Some(5));
        assert_eq!(tracker.poll_fire(1_700), None);
        assert_eq!(tracker.release(1_800), PressOutcome::LongPress { index: 5 });
        assert!(tracker.take_click_suppression());
        assert!(!tracker.take_click_suppression());
    }

    #[test]
    fn release_past_threshold_counts_even_without_the_timer() {
        let mut tracker = PressTracker::default();
        tracker.press(1, 0);
        assert_eq!(tracker.release(LONG_PRESS_MS), PressOutcome::LongPress { index: 1 });
        assert!(tracker.take_click_suppression());
    }

    #[test]
    fn cancel_drops_the_session_without_side_effects() {
        let mut tracker = PressTracker::default();
        tracker.press(2, 0);
        tracker.cancel();
        assert_eq!(tracker.poll_fire(10_000), None);
        assert_eq!(tracker.release(10_000), PressOutcome::Idle);
        assert!(!tracker.take_click_suppression());
    }

    #[test]
    fn a_new_press_clears_stale_suppression() {
        let mut tracker = PressTracker::default();
        tracker.press(0, 0);
        tracker.poll_fire(700);
        tracker.release(800);
        // The click handler never ran; the next press must not inherit the
        // suppression.
        tracker.press(1, 1_000);
        assert!(!tracker.take_click_suppression());
    }
}
