//! Fixed-size frame codec for the stopwatch protocol.
//!
//! Every frame is a 32-byte buffer:
//!
//! | Byte(s)  | Content |
//! |----------|---------|
//! | `0`      | Destination address |
//! | `1..`    | ASCII command, zero padded |
//!
//! Two commands are in use:
//!
//! - `START`: sent by the controller when the start button is pressed
//! - `END1` / `END2`: sent by a remote target to close slot 0 / slot 1
//!
//! The codec is pure data transformation. It never talks to the radio.
//!
//! ## Decoding rules
//!
//! - Byte 0 is not semantic payload and is ignored by [`decode`].
//! - Matching is by prefix at offset 1, so trailing bytes after a literal are ignored.
//! - Only the bytes within the received length are inspected; the byte right after
//!   the meaningful payload acts as a terminator.

use core::fmt;

use crate::consts::{END_COMMAND, END_DIGIT_OFFSET, FRAME_LEN, PAYLOAD_OFFSET, START_COMMAND};
use crate::registry::Slot;

/// A command carried by a frame.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Command {
    /// Start of a measurement, broadcast by the controller.
    Start,
    /// End of a measurement for the given slot.
    End(Slot),
    /// An `END` frame whose slot digit is not `'1'` or `'2'`.
    ///
    /// Carries the offending byte (`0` when the frame stops right after `END`).
    MalformedEnd(u8),
    /// Anything else. Ignored by the controller.
    Unrecognized,
}

/// A single radio frame.
///
/// The full 32-byte buffer is always transmitted. `len` is the number of bytes
/// that are meaningful, which for received frames is the length reported by the
/// transceiver.
#[derive(PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct Frame {
    bytes: [u8; FRAME_LEN],
    len: usize,
}

impl Frame {
    /// An all-zero frame addressed to `dest_addr`.
    fn addressed(dest_addr: u8) -> Self {
        let mut bytes = [0u8; FRAME_LEN];
        bytes[0] = dest_addr;
        Self {
            bytes,
            len: FRAME_LEN,
        }
    }

    fn with_command(dest_addr: u8, command: &[u8]) -> Self {
        let mut frame = Self::addressed(dest_addr);
        frame.bytes[PAYLOAD_OFFSET..PAYLOAD_OFFSET + command.len()].copy_from_slice(command);
        frame
    }

    /// Builds a `START` frame.
    ///
    /// # Example
    /// ```rust
    /// use rf_stopwatch::frame::Frame;
    ///
    /// let frame = Frame::encode_start(0x1f);
    /// assert_eq!(&frame.as_bytes()[..7], b"\x1fSTART\0");
    /// ```
    pub fn encode_start(dest_addr: u8) -> Self {
        Self::with_command(dest_addr, START_COMMAND)
    }

    /// Builds an `END<digit>` frame closing `slot`.
    ///
    /// Slot 0 is sent as `'1'` and slot 1 as `'2'`.
    pub fn encode_end(dest_addr: u8, slot: Slot) -> Self {
        let mut frame = Self::with_command(dest_addr, END_COMMAND);
        frame.bytes[END_DIGIT_OFFSET] = slot.digit();
        frame
    }

    /// Wraps a buffer handed over by the transceiver.
    ///
    /// Anything beyond [`FRAME_LEN`] is dropped and the unused tail is zeroed.
    pub fn from_received(buf: &[u8]) -> Self {
        let len = buf.len().min(FRAME_LEN);
        let mut bytes = [0u8; FRAME_LEN];
        bytes[..len].copy_from_slice(&buf[..len]);
        Self { bytes, len }
    }

    /// Destination address (byte 0).
    pub fn address(&self) -> u8 {
        self.bytes[0]
    }

    /// The whole wire buffer.
    pub fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.bytes
    }

    /// Number of meaningful bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the frame carries no bytes at all.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Command bytes, stopping at the first NUL or at the meaningful length.
    pub fn payload(&self) -> &[u8] {
        let tail = self.bytes.get(PAYLOAD_OFFSET..self.len).unwrap_or(&[]);
        let end = tail.iter().position(|&b| b == 0).unwrap_or(tail.len());
        &tail[..end]
    }

    /// Payload as text, for status output.
    ///
    /// Returns the longest valid UTF-8 prefix of the payload.
    pub fn text(&self) -> &str {
        let payload = self.payload();
        match core::str::from_utf8(payload) {
            Ok(text) => text,
            Err(e) => core::str::from_utf8(&payload[..e.valid_up_to()]).unwrap_or(""),
        }
    }

    /// Decodes the command carried by this frame.
    pub fn decode(&self) -> Command {
        decode(&self.bytes, self.len)
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("address", &self.address())
            .field("payload", &self.text())
            .field("len", &self.len)
            .finish()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Decodes the command in the first `length` bytes of `buffer`.
///
/// # Arguments
/// - `buffer`: Raw frame bytes, address byte included.
/// - `length`: Number of meaningful bytes reported by the transceiver.
///
/// # Returns
/// The recognized [`Command`]. Short, empty or unknown buffers decode as
/// [`Command::Unrecognized`].
pub fn decode(buffer: &[u8], length: usize) -> Command {
    let meaningful = &buffer[..length.min(buffer.len())];
    let Some(payload) = meaningful.get(PAYLOAD_OFFSET..) else {
        return Command::Unrecognized;
    };

    if payload.starts_with(END_COMMAND) {
        let digit = meaningful.get(END_DIGIT_OFFSET).copied().unwrap_or(0);
        return match Slot::from_digit(digit) {
            Some(slot) => Command::End(slot),
            None => Command::MalformedEnd(digit),
        };
    }
    if payload.starts_with(START_COMMAND) {
        return Command::Start;
    }
    Command::Unrecognized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_start_layout() {
        let frame = Frame::encode_start(0x1f);
        assert_eq!(frame.address(), 0x1f);
        assert_eq!(&frame.as_bytes()[1..6], b"START");
        assert!(frame.as_bytes()[6..].iter().all(|&b| b == 0));
        assert_eq!(frame.len(), FRAME_LEN);
        assert_eq!(frame.text(), "START");
    }

    #[test]
    fn test_encode_end_layout() {
        let frame = Frame::encode_end(0x2f, Slot::Second);
        assert_eq!(&frame.as_bytes()[..5], b"\x2fEND2");
        assert!(frame.as_bytes()[5..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_end_round_trip_recovers_slot() {
        for slot in Slot::ALL {
            let frame = Frame::encode_end(0x2f, slot);
            assert_eq!(frame.decode(), Command::End(slot));
        }
    }

    #[test]
    fn test_decode_start() {
        assert_eq!(Frame::encode_start(0x1f).decode(), Command::Start);
    }

    #[test]
    fn test_decode_malformed_end_index() {
        assert_eq!(decode(b"\x2fEND3", 5), Command::MalformedEnd(b'3'));
        assert_eq!(decode(b"\x2fEND0", 5), Command::MalformedEnd(b'0'));
    }

    #[test]
    fn test_decode_end_without_digit() {
        // The digit lies beyond the reported length
        assert_eq!(decode(b"\x2fEND1", 4), Command::MalformedEnd(0));
    }

    #[test]
    fn test_decode_ignores_address_byte() {
        assert_eq!(decode(b"ENDXX", 5), Command::Unrecognized);
        assert_eq!(decode(b"\x00END1", 5), Command::End(Slot::First));
    }

    #[test]
    fn test_decode_prefix_match() {
        assert_eq!(decode(b"\x2fEND1 extra", 11), Command::End(Slot::First));
        assert_eq!(decode(b"\x2fEN", 3), Command::Unrecognized);
        assert_eq!(decode(b"", 0), Command::Unrecognized);
        assert_eq!(decode(b"\x2fHELLO", 6), Command::Unrecognized);
    }

    #[test]
    fn test_from_received_truncates_and_terminates() {
        let frame = Frame::from_received(b"\x2fEND1");
        assert_eq!(frame.len(), 5);
        assert_eq!(frame.payload(), b"END1");
        assert_eq!(frame.as_bytes()[5], 0);

        let oversized = [b'A'; FRAME_LEN + 4];
        let frame = Frame::from_received(&oversized);
        assert_eq!(frame.len(), FRAME_LEN);
        assert_eq!(frame.payload().len(), FRAME_LEN - 1);
    }

    #[test]
    fn test_text_stops_at_invalid_utf8() {
        let frame = Frame::from_received(b"\x2fEND\xff\x01");
        assert_eq!(frame.text(), "END");
        assert!(!frame.is_empty());
    }
}
