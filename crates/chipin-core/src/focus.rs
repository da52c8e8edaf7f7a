use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Default delay between losing focus and hiding the dropdown.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Focus state of the text input with a debounced hide.
///
/// `has_focus` is where keyboard focus actually is. `visible` is what the
/// dropdown shows: it turns on immediately with focus and only turns off
/// when a scheduled check finds the input still unfocused. Each focus-out
/// schedules its own check, and every check reads `has_focus` when it
/// fires, so a check scheduled before a re-focus does nothing.
#[derive(Debug, Clone)]
pub struct FocusTracker {
    delay: Duration,
    has_focus: bool,
    visible: bool,
    checks: VecDeque<Instant>,
}

impl FocusTracker {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            has_focus: false,
            visible: false,
            checks: VecDeque::new(),
        }
    }

    pub fn focus_in(&mut self) {
        self.has_focus = true;
        self.visible = true;
    }

    pub fn focus_out(&mut self, now: Instant) {
        self.has_focus = false;
        self.checks.push_back(now + self.delay);
    }

    /// Fire every check due at `now`. Returns true if visibility changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let before = self.visible;
        while let Some(&due) = self.checks.front() {
            if due > now {
                break;
            }
            self.checks.pop_front();
            self.visible = self.has_focus;
            tracing::trace!(focused = self.has_focus, "focus check fired");
        }
        before != self.visible
    }

    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Earliest pending check, if any. Hosts can use it to size their poll timeout.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.checks.front().copied()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for FocusTracker {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
