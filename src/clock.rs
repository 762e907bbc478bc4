//! Time source for deadline checks
//!
//! Every deadline decision goes through a [`Clock`] so that tests can move time forward
//! deterministically with a [`FakeClock`].

use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Supplies the current instant
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Clock backed by the operating system's monotonic clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually driven clock
///
/// Time only moves when [`FakeClock::advance`] is called.
#[derive(Debug)]
pub struct FakeClock {
    now: Mutex<Instant>,
}

impl FakeClock {
    /// Creates a fake clock frozen at the current instant
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Instant::now()),
        }
    }

    /// Moves the clock forward by `duration`
    pub fn advance(&self, duration: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += duration;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Absolute instant after which no new page may be processed
///
/// Computed once per crawl. A timeout too large to represent never expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    at: Option<Instant>,
}

impl Deadline {
    /// Returns the deadline `timeout` after the clock's current instant
    pub fn after(clock: &dyn Clock, timeout: Duration) -> Self {
        Self {
            at: clock.now().checked_add(timeout),
        }
    }

    /// Returns true once `now` is at or past the deadline
    pub fn has_passed(&self, now: Instant) -> bool {
        match self.at {
            Some(at) => now >= at,
            None => false,
        }
    }
}
