use foundation::time::Time;

/// Deterministic schedule-or-reset coalescing timer.
///
/// `trigger` starts a single deadline or pushes an existing one back to
/// `now + delay`; `poll` reports each deadline at most once. A burst of
/// triggers inside the delay window therefore collapses into one fire.
///
/// The timer never reads a clock of its own; callers pass `Time` in, so
/// coalescing behavior is replayable and independently testable.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Debouncer {
    delay_s: f64,
    deadline: Option<Time>,
}

impl Debouncer {
    pub fn new(delay_s: f64) -> Self {
        Self {
            delay_s,
            deadline: None,
        }
    }

    pub fn delay_s(&self) -> f64 {
        self.delay_s
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Schedules the deadline, or resets a pending one to `now + delay`.
    pub fn trigger(&mut self, now: Time) {
        self.deadline = Some(now.advanced_by(self.delay_s));
    }

    /// Drops any pending deadline without firing it.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Fires at most once per scheduled deadline.
    pub fn poll(&mut self, now: Time) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
