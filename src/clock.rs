//! Logical clocks used to stamp vertex creation times

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of monotonically non-decreasing timestamps
pub trait Clock: Send + Sync + fmt::Debug {
    /// Current timestamp
    fn now(&self) -> u64;

    /// Note a timestamp already handed out elsewhere (e.g. by a restored store)
    ///
    /// Later calls to [`Clock::now`] must not return less than `timestamp`.
    fn observe(&self, _timestamp: u64) {}
}

/// Counter clock: every read returns the current tick and advances it by one
///
/// Deterministic, which makes it the default for tests and embedded use.
#[derive(Debug, Default)]
pub struct LogicalClock {
    tick: AtomicU64,
}

impl LogicalClock {
    /// Create a clock starting at tick 0
    #[must_use]
    pub const fn new() -> Self {
        Self::starting_at(0)
    }

    /// Create a clock starting at `tick`
    #[must_use]
    pub const fn starting_at(tick: u64) -> Self {
        Self {
            tick: AtomicU64::new(tick),
        }
    }

    /// Next tick to be handed out, without advancing
    #[must_use]
    pub fn peek(&self) -> u64 {
        self.tick.load(Ordering::Relaxed)
    }

    /// Move the clock forward to `tick`
    ///
    /// Ignored when `tick` is behind the current value; the clock never runs backwards.
    pub fn set(&self, tick: u64) {
        self.tick.fetch_max(tick, Ordering::Relaxed);
    }
}

impl Clock for LogicalClock {
    fn now(&self) -> u64 {
        self.tick.fetch_add(1, Ordering::Relaxed)
    }

    fn observe(&self, timestamp: u64) {
        self.set(timestamp.saturating_add(1));
    }
}

/// Wall clock in Unix seconds, clamped so it never goes backwards
#[derive(Debug, Default)]
pub struct SystemClock {
    last: AtomicU64,
}

impl SystemClock {
    /// Create a system clock
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last: AtomicU64::new(0),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        // Clock set before the epoch reads as 0
        let wall = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs());
        let prev = self.last.fetch_max(wall, Ordering::Relaxed);
        prev.max(wall)
    }

    fn observe(&self, timestamp: u64) {
        self.last.fetch_max(timestamp, Ordering::Relaxed);
    }
}
