//! Constants used across the stopwatch protocol implementation.
//!
//! This module defines the frame geometry, the command literals carried
//! inside frames, the default timing windows and the fixed radio settings
//! that both the controller and the remote targets are flashed with.
//!
//! ## Key Concepts
//!
//! - **Frames**: Fixed 32-byte buffers, byte 0 is the destination address.
//! - **Commands**: ASCII literals starting at byte 1, zero padded.
//! - **Slots**: Two independent timing channels, one per remote target.
//! - **Radio defaults**: Frequency, channel and addresses shared by every node.
//!
//! These values should be used wherever framing or timing logic is implemented to ensure
//! the controller and the targets agree on the wire format.

/// Total size (in bytes) of every frame exchanged over the radio link.
pub const FRAME_LEN: usize = 32;

/// Offset of the first command byte inside a frame.
///
/// Byte 0 carries the destination address and is consumed by the transceiver's
/// address filter.
pub const PAYLOAD_OFFSET: usize = 1;

/// Command literal sent by the controller when the start button is pressed.
pub const START_COMMAND: &[u8] = b"START";

/// Command prefix sent by a remote target when its end event fires.
///
/// It is followed by a single ASCII digit naming the slot (`'1'` or `'2'`).
pub const END_COMMAND: &[u8] = b"END";

/// Offset of the slot digit in an `END` frame.
pub const END_DIGIT_OFFSET: usize = PAYLOAD_OFFSET + END_COMMAND.len();

/// Number of independent timer slots.
pub const SLOT_COUNT: usize = 2;

/// Minimum time (in ms) a raw button reading must be stable before it is accepted.
pub const DEBOUNCE_WINDOW_MS: u64 = 50;

/// Bounded wait (in ms) for an inbound frame while a measurement is in flight.
pub const RECEIVE_TIMEOUT_MS: u32 = 100;

/// Default carrier frequency in MHz.
pub const RADIO_FREQUENCY_MHZ: f32 = 868.0;

/// Default radio channel number.
pub const RADIO_CHANNEL: u8 = 16;

/// Default address of the controller node.
pub const DEVICE_ADDRESS: u8 = 0x2f;

/// Default address of the remote target(s) the controller talks to.
pub const DEST_DEVICE_ADDRESS: u8 = 0x1f;

/// Frequency bands (in MHz, inclusive) a CC1101-class transceiver can tune to.
pub const RADIO_BANDS_MHZ: [(f32, f32); 3] = [(300.0, 348.0), (387.0, 464.0), (779.0, 928.0)];
