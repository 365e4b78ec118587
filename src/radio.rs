//! Transceiver abstraction.
//!
//! The stopwatch does not drive the radio chip itself. Modulation, channel
//! tuning, CRC generation, address filtering and FIFO handling belong to the
//! transceiver driver, which is plugged in through the [`Transceiver`] trait.
//!
//! ## Contract
//!
//! - [`init`](Transceiver::init) applies a [`RadioConfig`] once at startup.
//! - [`is_connected`](Transceiver::is_connected) checks the bus link to the chip.
//! - [`send`](Transceiver::send) queues a full 32-byte frame; it returns
//!   `nb::Error::WouldBlock` while the previous frame is still on air.
//! - [`poll_receive`](Transceiver::poll_receive) waits up to `timeout_ms` for a frame.
//! - [`check_crc`](Transceiver::check_crc) reports whether the last received frame
//!   passed the hardware CRC check.

use core::fmt::Debug;

use crate::config::RadioConfig;
use crate::frame::Frame;

/// A framed packet radio.
pub trait Transceiver {
    /// Driver specific error.
    type Error: Debug;

    /// Configures the chip.
    fn init(&mut self, config: &RadioConfig) -> Result<(), Self::Error>;

    /// Whether the chip answers on its bus.
    fn is_connected(&mut self) -> bool;

    /// Transmits the whole frame buffer.
    fn send(&mut self, frame: &Frame) -> nb::Result<(), Self::Error>;

    /// Waits up to `timeout_ms` for an inbound frame.
    ///
    /// # Returns
    /// - `Ok(Some(frame))` when a frame arrived, with its reported length
    /// - `Ok(None)` when the wait timed out
    fn poll_receive(&mut self, timeout_ms: u32) -> Result<Option<Frame>, Self::Error>;

    /// Whether the last received frame passed the CRC check.
    fn check_crc(&mut self) -> bool;
}
