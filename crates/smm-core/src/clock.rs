//! Millisecond time sources for hash-time accounting.

use core::cell::Cell;

/// A monotonic millisecond counter.
pub trait Clock {
    fn now_millis(&self) -> u64;
}

/// Wall-clock source backed by `std::time::Instant`.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl SystemClock {
    pub fn new() -> Self {
        SystemClock {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// A clock that only moves when told to.
///
/// Useful for hosts that already track time themselves, and for tests.
/// With `step` set, every reading advances the clock by that many
/// milliseconds after returning.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
    step: u64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clock that advances by `step` milliseconds on every reading.
    pub fn stepping(step: u64) -> Self {
        ManualClock {
            now: Cell::new(0),
            step,
        }
    }

    pub fn advance(&self, millis: u64) {
        self.now.set(self.now.get().saturating_add(millis));
    }

    pub fn set(&self, millis: u64) {
        self.now.set(millis);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        let now = self.now.get();
        self.now.set(now.saturating_add(self.step));
        now
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_millis(&self) -> u64 {
        (**self).now_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::new();
        assert_eq!(clock.now_millis(), 0);
        clock.advance(250);
        assert_eq!(clock.now_millis(), 250);
        clock.set(10);
        assert_eq!(clock.now_millis(), 10);
    }

    #[test]
    fn test_stepping_clock() {
        let clock = ManualClock::stepping(100);
        assert_eq!(clock.now_millis(), 0);
        assert_eq!(clock.now_millis(), 100);
        assert_eq!(clock.now_millis(), 200);
    }

    #[test]
    fn test_clock_by_reference() {
        let clock = ManualClock::new();
        clock.advance(5);
        let by_ref: &ManualClock = &clock;
        assert_eq!(Clock::now_millis(&by_ref), 5);
    }
}
