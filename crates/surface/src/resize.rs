use foundation::time::Time;
use runtime::debounce::Debouncer;

/// Delay between the last observed resize and the geometry recalculation.
pub const RESIZE_DEBOUNCE_S: f64 = 0.1;

/// Coalesces container-resize bursts into single geometry-recalculation
/// requests.
///
/// Attached for the whole lifetime of a mounted surface and detached exactly
/// at teardown; a deadline still pending at detach is cancelled, so a timer
/// firing after unmount cannot touch a dead surface.
#[derive(Debug)]
pub struct ResizeWatcher {
    debounce: Debouncer,
    attached: bool,
}

impl ResizeWatcher {
    pub fn new() -> Self {
        Self::with_delay(RESIZE_DEBOUNCE_S)
    }

    pub fn with_delay(delay_s: f64) -> Self {
        Self {
            debounce: Debouncer::new(delay_s),
            attached: true,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Records a size change, scheduling or resetting the single pending
    /// recalculation.
    pub fn note_resize(&mut self, now: Time) {
        if self.attached {
            self.debounce.trigger(now);
        }
    }

    /// True exactly once per coalesced burst; always false once detached.
    pub fn poll(&mut self, now: Time) -> bool {
        self.attached && self.debounce.poll(now)
    }

    pub fn detach(&mut self) {
        self.attached = false;
        self.debounce.cancel();
    }
}

impl Default for ResizeWatcher {
    fn default() -> Self {
        Self::new()
    }
}
