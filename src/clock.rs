//! Time source for everything that depends on wall-clock time (hurt window,
//! throw cooldown, task scheduling).
//!
//! All timestamps are milliseconds since an arbitrary, clock-specific epoch.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

pub type Millis = u64;

pub trait Clock {
    fn now_ms(&self) -> Millis;
}

// ── Real time ─────────────────────────────────────────────────────────────────

/// Monotonic clock measured from the moment it was created.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { start: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> Millis {
        self.start.elapsed().as_millis() as Millis
    }
}

// ── Manual time ───────────────────────────────────────────────────────────────

/// A clock that only moves when told to.  Clones share the same time, so a
/// test can keep one handle while the world owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Millis>>,
}

impl ManualClock {
    pub fn new(start: Millis) -> Self {
        Self { now: Rc::new(Cell::new(start)) }
    }

    pub fn set(&self, ms: Millis) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: Millis) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> Millis {
        self.now.get()
    }
}
