//! # Pool Clock
//!
//! Monotonic timestamps for return/sweep bookkeeping.
//!
//! Every pool stamps items with the moment they were returned and sweeps
//! them against a cutoff. Both sides must come from the same clock
//! instance for the comparison to mean anything.

use std::cell::Cell;
use std::time::Instant;

/// A monotonic timestamp in nanoseconds since its clock started.
///
/// Ticks are only comparable against ticks from the same clock instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tick(u64);

impl Tick {
    /// The zero timestamp (the moment a clock started).
    pub const ZERO: Self = Self(0);

    /// Builds a tick from raw nanoseconds.
    #[must_use]
    pub const fn from_nanos(nanos: u64) -> Self {
        Self(nanos)
    }

    /// Raw nanosecond value.
    #[must_use]
    pub const fn as_nanos(self) -> u64 {
        self.0
    }
}

/// Source of monotonic timestamps.
///
/// Implementations must never go backwards. A pool stamps returned items
/// with `now()` and compares sweep cutoffs against those stamps, so the
/// clock that produced the cutoff must be the clock the pool holds.
pub trait Clock {
    /// Returns the current timestamp.
    fn now(&self) -> Tick;
}

/// Wall-clock-independent monotonic clock backed by [`Instant`].
///
/// This is the default clock on every pool.
#[derive(Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Creates a clock whose ticks count from this moment.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Tick {
        Tick(u64::try_from(self.origin.elapsed().as_nanos()).unwrap_or(u64::MAX))
    }
}

/// Hand-driven clock for deterministic sweeps.
///
/// Time only moves when the owner advances it. Useful in tests and in
/// hosts that already have a frame counter.
#[derive(Debug, Default)]
pub struct ManualClock {
    current: Cell<u64>,
}

impl ManualClock {
    /// Creates a clock stopped at [`Tick::ZERO`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock to an absolute tick. Ignored if it would go
    /// backwards.
    pub fn set(&self, tick: Tick) {
        if tick.0 > self.current.get() {
            self.current.set(tick.0);
        }
    }

    /// Advances the clock by `nanos` nanoseconds.
    pub fn advance(&self, nanos: u64) {
        self.current.set(self.current.get().saturating_add(nanos));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Tick {
        Tick(self.current.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monotonic_clock_never_decreases() {
        let clock = MonotonicClock::new();
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::new();
        assert_eq!(clock.now(), Tick::ZERO);

        clock.advance(10);
        assert_eq!(clock.now(), Tick::from_nanos(10));

        // Going backwards is ignored
        clock.set(Tick::from_nanos(5));
        assert_eq!(clock.now(), Tick::from_nanos(10));
    }
}
