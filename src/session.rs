//! The controller's polling loop.
//!
//! A [`Session`] owns every piece of controller state (the start button, the
//! timer registry, the radio, the clock and the diagnostics sink) and runs one
//! cooperative iteration per [`step`](Session::step):
//!
//! 1. Read the clock and, if configured, disarm slots that waited too long.
//! 2. Sample the start button.
//! 3. On a press: transmit a `START` frame and arm both timer slots.
//! 4. While a slot is armed: wait up to the receive timeout for a frame, check
//!    its CRC, decode it and resolve the slot named by an `END` frame.
//!
//! ## Design Notes
//!
//! - Single threaded and non-preemptive. The receive wait blocks the whole loop,
//!   so a press that begins and ends inside one wait is not seen.
//! - No condition aborts the loop. Link, CRC and protocol problems are reported
//!   through [`Diagnostics`] and the next iteration proceeds.
//! - Only button channel 0 triggers a start. A second channel exists in the
//!   hardware layout but has no behaviour attached yet.
//!
//! ## Example
//!
//! ```rust,ignore
//! use rf_stopwatch::{clock::ManualClock, config::StopwatchConfig, diag::NullSink, session::Session};
//!
//! let mut session = Session::new(radio, &clock, button_pin, NullSink, StopwatchConfig::default());
//! let _ = session.init();
//! session.run();
//! ```

use embedded_hal::digital::InputPin;
use nb::block;

use crate::clock::Clock;
use crate::config::StopwatchConfig;
use crate::debounce::ButtonChannel;
use crate::diag::{Diagnostics, Event, forward};
use crate::error::{Error, RadioOp};
use crate::frame::{Command, Frame};
use crate::radio::Transceiver;
use crate::registry::{Slot, TimerRegistry};

/// Outcome of the transceiver connection check.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum LinkStatus {
    /// The transceiver answered.
    Up,
    /// The transceiver did not answer; the session runs degraded.
    Down,
}

/// A resolved measurement.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct Resolution {
    /// Slot closed by the `END` frame.
    pub slot: Slot,
    /// Time between the start press and the reception of the `END` frame, in ms.
    pub elapsed_ms: u64,
}

/// Stopwatch controller state and polling loop.
///
/// ## Type Parameters
///
/// - `R`: The [`Transceiver`] driver
/// - `C`: The [`Clock`] providing monotonic milliseconds
/// - `P`: The start button's [`InputPin`]
/// - `D`: The [`Diagnostics`] sink receiving status reports
#[derive(Debug)]
pub struct Session<R, C, P, D>
where
    R: Transceiver,
    C: Clock,
    P: InputPin,
    D: Diagnostics,
{
    /// Radio driver
    pub radio: R,
    /// Time source
    pub clock: C,
    /// Start button (channel 0)
    pub button: ButtonChannel<P>,
    /// Status sink
    pub diagnostics: D,
    /// Timer slots
    pub timers: TimerRegistry,
    config: StopwatchConfig,
}

impl<R, C, P, D> Session<R, C, P, D>
where
    R: Transceiver,
    C: Clock,
    P: InputPin,
    D: Diagnostics,
{
    /// Creates a session. The radio is left untouched until [`init`](Session::init).
    ///
    /// # Arguments
    /// - `radio`: Transceiver driver.
    /// - `clock`: Monotonic millisecond source.
    /// - `button`: Input pin of the start button.
    /// - `diagnostics`: Sink for status reports.
    /// - `config`: Static configuration.
    pub fn new(radio: R, clock: C, button: P, diagnostics: D, config: StopwatchConfig) -> Self {
        Self {
            radio,
            clock,
            button: ButtonChannel::with_window(button, 0, config.debounce_ms),
            diagnostics,
            timers: TimerRegistry::new(),
            config,
        }
    }

    /// The configuration this session runs with.
    pub fn config(&self) -> &StopwatchConfig {
        &self.config
    }

    /// Checks the transceiver link and configures the radio.
    ///
    /// # Returns
    /// - `Ok(LinkStatus::Up)` when the chip answered and accepted the configuration
    /// - `Ok(LinkStatus::Down)` when the chip did not answer; the session keeps
    ///   running degraded, as the hardware offers no recovery path
    ///
    /// # Errors
    /// - [`Error::Config`] if the radio configuration is invalid
    /// - [`Error::Radio`] if the driver failed to apply it
    ///
    /// Both are also reported to the diagnostics sink. Callers may ignore them and
    /// keep polling.
    pub fn init(&mut self) -> Result<LinkStatus, Error<R::Error>> {
        let link = if self.radio.is_connected() {
            self.report(&Event::LinkUp);
            LinkStatus::Up
        } else {
            self.report(&Event::LinkDown);
            LinkStatus::Down
        };

        if let Err(e) = self.config.radio.validate() {
            self.report(&Event::ConfigRejected(e));
            return Err(e.into());
        }
        if let Err(cause) = self.radio.init(&self.config.radio) {
            self.report(&Event::RadioFault(RadioOp::Init));
            return Err(Error::Radio {
                op: RadioOp::Init,
                cause,
            });
        }

        self.report(&Event::Ready);
        Ok(link)
    }

    /// Runs one iteration of the polling loop.
    ///
    /// # Returns
    /// The measurement resolved during this iteration, if any.
    ///
    /// # Timing
    /// Returns immediately when no slot is armed; otherwise blocks for up to the
    /// configured receive timeout.
    pub fn step(&mut self) -> Option<Resolution> {
        let now = self.clock.now_ms();
        self.expire_stale(now);

        if self.button.sample(now) == Some(self.config.pressed_level.edge()) {
            self.start(now);
        }

        if !self.timers.any_armed() {
            return None;
        }

        match self.radio.poll_receive(self.config.receive_timeout_ms) {
            Ok(Some(frame)) => self.handle_frame(frame),
            Ok(None) => None,
            Err(_) => {
                self.report(&Event::RadioFault(RadioOp::Receive));
                None
            }
        }
    }

    /// Runs the polling loop forever.
    pub fn run(&mut self) -> ! {
        loop {
            let _ = self.step();
        }
    }

    fn start(&mut self, now: u64) {
        let frame = Frame::encode_start(self.config.radio.destination_address);
        self.report(&Event::Sent(frame));
        if block!(self.radio.send(&frame)).is_err() {
            self.report(&Event::RadioFault(RadioOp::Send));
        }

        if self.timers.arm_all(now) {
            self.report(&Event::Armed { at_ms: now });
        } else {
            self.report(&Event::AlreadyArmed);
        }
    }

    fn handle_frame(&mut self, frame: Frame) -> Option<Resolution> {
        if !self.radio.check_crc() {
            self.report(&Event::CrcFailed);
            return None;
        }
        self.report(&Event::Received(frame));

        match frame.decode() {
            Command::End(slot) => {
                let now = self.clock.now_ms();
                match self.timers.resolve(slot, now) {
                    Some(elapsed_ms) => {
                        self.report(&Event::Elapsed { slot, elapsed_ms });
                        Some(Resolution { slot, elapsed_ms })
                    }
                    None => {
                        self.report(&Event::OrphanEnd(slot));
                        None
                    }
                }
            }
            Command::MalformedEnd(digit) => {
                self.report(&Event::MalformedEnd(digit));
                None
            }
            Command::Start | Command::Unrecognized => None,
        }
    }

    fn expire_stale(&mut self, now: u64) {
        let Some(timeout) = self.config.arm_timeout_ms else {
            return;
        };
        for slot in Slot::ALL {
            if let Some(age_ms) = self.timers.expire(slot, now, timeout) {
                self.report(&Event::Expired { slot, age_ms });
            }
        }
    }

    fn report(&mut self, event: &Event) {
        forward(event);
        self.diagnostics.report(event);
    }
}
