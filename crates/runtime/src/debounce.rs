use foundation::time::Millis;

use crate::timer::CancellableTimer;

/// Holds the latest value until a quiet period of `delay_ms` has elapsed.
///
/// Every [`Debouncer::trigger`] replaces the pending value and restarts the
/// timer; only the value from the last trigger inside the window is released.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay_ms: u64,
    timer: CancellableTimer,
    pending: Option<T>,
}

impl<T> Debouncer<T> {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            timer: CancellableTimer::new(),
            pending: None,
        }
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Returns `true` if an earlier pending value was dropped.
    pub fn trigger(&mut self, now: Millis, value: T) -> bool {
        self.pending = Some(value);
        self.timer.start(now, self.delay_ms)
    }

    /// Releases the pending value once the quiet period has elapsed.
    pub fn poll(&mut self, now: Millis) -> Option<T> {
        if self.timer.fire(now) {
            self.pending.take()
        } else {
            None
        }
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.timer.cancel();
        self.pending.take()
    }

    pub fn deadline(&self) -> Option<Millis> {
        self.timer.deadline()
    }

    pub fn is_pending(&self) -> bool {
        self.timer.is_pending()
    }
}
