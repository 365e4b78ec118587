//! Monotonic millisecond time sources.
//!
//! The stopwatch only needs one thing from the platform: a free-running
//! millisecond counter, read through the [`Clock`] trait. Two sources ship with
//! the crate, plus a polling-loop helper:
//!
//! - [`ManualClock`]: set and advanced by hand, for host simulations and tests
//! - `MillisCounter` (feature `clock-isr`): advanced from a periodic timer
//!   interrupt and read from the main loop through `critical_section::with`
//! - `run_polling_loop` (feature `delay-loop`): drives
//!   [`Session::step`](crate::session::Session::step) forever with a pacing delay
//!
//! Counters wrap at `u64::MAX`; every consumer in this crate uses wrapping
//! arithmetic, so both nodes of a link only need to wrap the same way.
//!
//! Typical timer setups for a 1 ms interrupt:
//!
//! | PRESCALER | TIMER_COUNTS | F_CPU  |
//! |-----------|--------------|--------|
//! |        64 |          250 | 16 MHz |
//! |         8 |         1000 |  8 MHz |

use core::cell::Cell;

#[cfg(feature = "delay-loop")]
mod delay;
#[cfg_attr(feature = "delay-loop", allow(unused_imports))]
#[cfg(feature = "delay-loop")]
pub use delay::*;

#[cfg(feature = "clock-isr")]
mod isr;
#[cfg_attr(feature = "clock-isr", allow(unused_imports))]
#[cfg(feature = "clock-isr")]
pub use isr::*;

#[cfg(feature = "clock-isr")]
mod macros;

/// A monotonic millisecond counter.
pub trait Clock {
    /// Current time in milliseconds.
    fn now_ms(&self) -> u64;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

/// A clock that only moves when told to.
///
/// # Example
/// ```rust
/// use rf_stopwatch::clock::{Clock, ManualClock};
///
/// let clock = ManualClock::new(1_000);
/// clock.advance(250);
/// assert_eq!(clock.now_ms(), 1_250);
/// ```
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    /// Creates a clock reading `start_ms`.
    pub const fn new(start_ms: u64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    /// Jumps to `now_ms`.
    pub fn set(&self, now_ms: u64) {
        self.now.set(now_ms);
    }

    /// Moves forward by `ms`, wrapping at `u64::MAX`.
    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().wrapping_add(ms));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_moves_on_request() {
        let clock = ManualClock::new(10);
        assert_eq!(clock.now_ms(), 10);
        clock.advance(5);
        assert_eq!(clock.now_ms(), 15);
        clock.set(3);
        assert_eq!(clock.now_ms(), 3);
    }

    #[test]
    fn test_manual_clock_wraps() {
        let clock = ManualClock::new(u64::MAX);
        clock.advance(2);
        assert_eq!(clock.now_ms(), 1);
    }

    #[test]
    fn test_clock_through_reference() {
        let clock = ManualClock::new(42);
        let by_ref: &ManualClock = &clock;
        assert_eq!(Clock::now_ms(&by_ref), 42);
    }
}
