use foundation::time::Millis;

/// Single-shot timer that can be re-armed or cancelled.
///
/// The timer does not run anything itself; the owner polls it with the current
/// time and acts when [`CancellableTimer::fire`] reports it is due. Re-arming
/// replaces the previous deadline (last write wins).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct CancellableTimer {
    deadline: Option<Millis>,
}

impl CancellableTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the timer for `now + delay_ms`.
    ///
    /// Returns `true` if a pending deadline was superseded.
    pub fn start(&mut self, now: Millis, delay_ms: u64) -> bool {
        self.deadline.replace(now.after(delay_ms)).is_some()
    }

    /// Returns `true` if the timer was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Millis> {
        self.deadline
    }

    /// Disarms and returns `true` if the deadline has been reached.
    pub fn fire(&mut self, now: Millis) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Earliest of several optional deadlines.
pub fn earliest(deadlines: impl IntoIterator<Item = Option<Millis>>) -> Option<Millis> {
    deadlines.into_iter().flatten().min()
}

#[cfg(test)]
mod tests {
    use super::{CancellableTimer, earliest};
    use foundation::time::Millis;

    #[test]
    fn fires_once_at_deadline() {
        let mut t = CancellableTimer::new();
        assert!(!t.start(Millis(0), 100));
        assert!(!t.fire(Millis(99)));
        assert!(t.fire(Millis(100)));
        assert!(!t.fire(Millis(200)));
        assert!(!t.is_pending());
    }

    #[test]
    fn restart_supersedes_previous_deadline() {
        let mut t = CancellableTimer::new();
        t.start(Millis(0), 100);
        assert!(t.start(Millis(50), 100));
        assert!(!t.fire(Millis(100)));
        assert!(t.fire(Millis(150)));
    }

    #[test]
    fn cancel_disarms() {
        let mut t = CancellableTimer::new();
        assert!(!t.cancel());
        t.start(Millis(0), 10);
        assert!(t.cancel());
        assert!(!t.fire(Millis(1_000)));
    }

    #[test]
    fn earliest_skips_unarmed() {
        assert_eq!(earliest([None, Some(Millis(30)), Some(Millis(10))]), Some(Millis(10)));
        assert_eq!(earliest([None, None]), None);
    }
}
