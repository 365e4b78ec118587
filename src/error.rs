//! Error types.
//!
//! Only configuration problems and transceiver driver failures are errors.
//! Protocol anomalies (CRC failures, malformed or orphan `END` frames) are
//! reported as [`Event`](crate::diag::Event)s and never abort the polling loop.

use core::fmt;

use thiserror::Error;

/// Radio operation that failed.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum RadioOp {
    /// Transceiver initialization.
    Init,
    /// Frame transmission.
    Send,
    /// Frame reception.
    Receive,
}

impl fmt::Display for RadioOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RadioOp::Init => "init",
            RadioOp::Send => "send",
            RadioOp::Receive => "receive",
        })
    }
}

/// Invalid static configuration.
#[derive(Error, PartialEq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum ConfigError {
    /// The carrier frequency is outside every supported band.
    #[error("frequency {0} MHz is outside the supported bands")]
    FrequencyOutOfBand(f32),
    /// The controller would address itself.
    #[error("local and destination address are both {0:#04x}")]
    AddressCollision(u8),
}

/// Errors returned while bringing up a session.
#[derive(Error, Debug)]
pub enum Error<E: fmt::Debug> {
    /// The configuration was rejected before touching the radio.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// The transceiver driver failed.
    #[error("radio {op} failed: {cause:?}")]
    Radio {
        /// Failed operation
        op: RadioOp,
        /// Driver error
        cause: E,
    },
}
