use core::cell::Cell;

use critical_section::Mutex;

use super::Clock;

/// A millisecond counter shared between a timer interrupt and the main loop.
///
/// The interrupt handler calls [`tick`](MillisCounter::tick) with the period of
/// the timer; the main loop reads it through [`Clock::now_ms`]. Both sides go
/// through `critical_section::with`, so the 64-bit counter is never torn.
///
/// # Example
/// ```rust
/// use rf_stopwatch::clock::{Clock, MillisCounter};
///
/// static MILLIS: MillisCounter = MillisCounter::new();
///
/// // #[interrupt]
/// fn tim2() {
///     MILLIS.tick(1);
/// }
///
/// tim2();
/// assert_eq!(MILLIS.now_ms(), 1);
/// ```
#[derive(Debug)]
pub struct MillisCounter {
    ms: Mutex<Cell<u64>>,
}

impl MillisCounter {
    /// Creates a counter reading zero.
    pub const fn new() -> Self {
        Self {
            ms: Mutex::new(Cell::new(0)),
        }
    }

    /// Advances the counter by `elapsed_ms`. Call from the timer ISR.
    pub fn tick(&self, elapsed_ms: u32) {
        critical_section::with(|cs| {
            let ms = self.ms.borrow(cs);
            ms.set(ms.get().wrapping_add(u64::from(elapsed_ms)));
        });
    }

    /// Overwrites the counter.
    pub fn reset(&self, now_ms: u64) {
        critical_section::with(|cs| self.ms.borrow(cs).set(now_ms));
    }
}

impl Default for MillisCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MillisCounter {
    fn now_ms(&self) -> u64 {
        critical_section::with(|cs| self.ms.borrow(cs).get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_accumulates_ticks() {
        let counter = MillisCounter::new();
        assert_eq!(counter.now_ms(), 0);
        for _ in 0..250 {
            counter.tick(1);
        }
        counter.tick(4);
        assert_eq!(counter.now_ms(), 254);
    }

    #[test]
    fn test_counter_wraps() {
        let counter = MillisCounter::default();
        counter.reset(u64::MAX);
        counter.tick(1);
        assert_eq!(counter.now_ms(), 0);
    }

    #[test]
    fn test_declared_global_counter() {
        crate::millis_clock!(TEST_MILLIS);
        TEST_MILLIS.tick(7);
        assert_eq!(TEST_MILLIS.now_ms(), 7);
    }
}
