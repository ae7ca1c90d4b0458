//! Time sources for the note store.

use std::cell::Cell;
use std::rc::Rc;

/// Source of "now" in Unix epoch milliseconds.
pub trait Clock {
    fn now_millis(&self) -> i64;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Manually driven clock. Clones share the same instant.
#[derive(Debug, Clone, Default)]
pub struct FixedClock {
    now: Rc<Cell<i64>>,
}

impl FixedClock {
    pub fn new(now: i64) -> Self {
        Self {
            now: Rc::new(Cell::new(now)),
        }
    }

    pub fn set(&self, now: i64) {
        self.now.set(now);
    }

    pub fn advance(&self, millis: i64) {
        self.now.set(self.now.get() + millis);
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.now.get()
    }
}
