use std::cell::Cell;
use std::rc::Rc;

use foundation::time::Millis;

/// Source of "now" for every timer in the widget.
///
/// The browser build reads `performance.now()`; tests drive a [`ManualClock`].
pub trait Clock {
    fn now(&self) -> Millis;
}

/// Clock that only moves when told to.
///
/// Clones share the same underlying time so a test can keep a handle after
/// giving one to the controller.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now_ms: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(ms: u64) -> Self {
        Self {
            now_ms: Rc::new(Cell::new(ms)),
        }
    }

    pub fn advance(&self, delta_ms: u64) {
        self.now_ms.set(self.now_ms.get().saturating_add(delta_ms));
    }

    pub fn set(&self, now: Millis) {
        self.now_ms.set(now.0);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Millis {
        Millis(self.now_ms.get())
    }
}
