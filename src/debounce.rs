//! Debounced sampling of a push button.
//!
//! A [`ButtonChannel`] turns a noisy digital input into clean logical edges.
//! Every raw flicker restarts the debounce window; a new level is only
//! accepted once the raw reading has been stable for strictly longer than
//! the window.
//!
//! The sampler has no timer or interrupt path of its own. It must be called
//! once per iteration of the polling loop with the current monotonic time.

use embedded_hal::digital::InputPin;

use crate::consts::DEBOUNCE_WINDOW_MS;

/// Logical level of a digital line.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Level {
    /// Line pulled to ground.
    Low,
    /// Line pulled to the supply rail.
    High,
}

impl From<bool> for Level {
    fn from(is_high: bool) -> Self {
        if is_high { Level::High } else { Level::Low }
    }
}

impl Level {
    /// The edge that ends at this level.
    pub fn edge(self) -> Edge {
        match self {
            Level::Low => Edge::Falling,
            Level::High => Edge::Rising,
        }
    }
}

/// A committed transition of the debounced state.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Edge {
    /// Transition to [`Level::Low`].
    Falling,
    /// Transition to [`Level::High`].
    Rising,
}

/// One physical button line and its debounce state.
///
/// The initial state mirrors a pulled-up button at power on: the debounced
/// state starts `High` and the last raw reading starts `Low`, so the very
/// first sample opens a debounce window.
///
/// ## Example
///
/// ```rust
/// # use embedded_hal_mock::eh1::digital::{Mock as Pin, State as PinState, Transaction as PinTransaction};
/// use rf_stopwatch::debounce::{ButtonChannel, Edge};
///
/// # let pin = Pin::new(&[
/// #     PinTransaction::get(PinState::Low),
/// #     PinTransaction::get(PinState::Low),
/// # ]);
/// let mut button = ButtonChannel::new(pin, 0);
/// assert_eq!(button.sample(0), None);
/// assert_eq!(button.sample(51), Some(Edge::Falling));
/// # button.pin.done();
/// ```
#[derive(Debug)]
pub struct ButtonChannel<P>
where
    P: InputPin,
{
    /// Input pin
    pub pin: P,
    index: u8,
    window_ms: u64,
    state: Level,
    last_raw: Level,
    last_change_ms: u64,
}

impl<P> ButtonChannel<P>
where
    P: InputPin,
{
    /// Creates a channel with the default 50 ms debounce window.
    ///
    /// # Arguments
    /// - `pin`: The input line the button is wired to.
    /// - `index`: Logical index of the button (0 or 1).
    pub fn new(pin: P, index: u8) -> Self {
        Self::with_window(pin, index, DEBOUNCE_WINDOW_MS)
    }

    /// Creates a channel with a custom debounce window in milliseconds.
    pub fn with_window(pin: P, index: u8, window_ms: u64) -> Self {
        Self {
            pin,
            index,
            window_ms,
            state: Level::High,
            last_raw: Level::Low,
            last_change_ms: 0,
        }
    }

    /// Logical index of this button.
    pub fn index(&self) -> u8 {
        self.index
    }

    /// Currently accepted (debounced) level.
    pub fn state(&self) -> Level {
        self.state
    }

    /// Reads the pin once and advances the debounce state.
    ///
    /// # Returns
    /// - `Some(edge)` exactly once per accepted transition
    /// - `None` otherwise
    ///
    /// # Notes
    /// A failed pin read is treated as an unchanged raw reading, so it neither
    /// restarts nor completes a debounce window.
    pub fn sample(&mut self, now_ms: u64) -> Option<Edge> {
        let raw = match self.pin.is_high() {
            Ok(high) => Level::from(high),
            Err(_) => self.last_raw,
        };
        self.observe(raw, now_ms)
    }

    fn observe(&mut self, raw: Level, now_ms: u64) -> Option<Edge> {
        if raw != self.last_raw {
            self.last_change_ms = now_ms;
        }
        self.last_raw = raw;

        // Strictly greater: a reading exactly at the window boundary waits one more cycle
        if now_ms.wrapping_sub(self.last_change_ms) > self.window_ms && raw != self.state {
            self.state = raw;
            return Some(raw.edge());
        }
        None
    }
}
