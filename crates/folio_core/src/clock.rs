//! Time sources for the interaction engine.
//!
//! Every component takes the current time as a plain millisecond value
//! (`advance(now)`), so the engine itself never reads a clock. Drivers pick
//! a [`Clock`]: [`SystemClock`] for real playback, [`ManualClock`] for tests
//! and for precomputing schedules.

use std::{
    cell::Cell,
    time::{Instant, SystemTime, UNIX_EPOCH},
};

/// Milliseconds. Absolute values are milliseconds since the Unix epoch for
/// [`SystemClock`] and an arbitrary origin for [`ManualClock`].
pub type Millis = u64;

/// A source of the current time in milliseconds.
pub trait Clock {
    fn now_ms(&self) -> Millis;
}

/// Wall-clock anchored at construction, monotonic afterwards.
///
/// The epoch offset is sampled once; later readings add the elapsed
/// [`Instant`] time, so system clock adjustments never move time backwards.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    anchor_ms: Millis,
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        let anchor_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as Millis)
            .unwrap_or(0);
        Self {
            anchor_ms,
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> Millis {
        self.anchor_ms + self.start.elapsed().as_millis() as Millis
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Millis>,
}

impl ManualClock {
    pub const fn new(start: Millis) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Move forward by `ms` and return the new time.
    pub fn advance(&self, ms: Millis) -> Millis {
        let now = self.now.get().saturating_add(ms);
        self.now.set(now);
        now
    }

    /// Jump to an absolute time. Earlier values are ignored.
    pub fn set(&self, at: Millis) {
        if at > self.now.get() {
            self.now.set(at);
        }
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> Millis {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::new(100);
        assert_eq!(clock.now_ms(), 100);
        assert_eq!(clock.advance(50), 150);
        assert_eq!(clock.now_ms(), 150);
    }

    #[test]
    fn test_manual_clock_never_goes_back() {
        let clock = ManualClock::new(500);
        clock.set(200);
        assert_eq!(clock.now_ms(), 500);
        clock.set(900);
        assert_eq!(clock.now_ms(), 900);
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
        assert!(a > 0);
    }
}
