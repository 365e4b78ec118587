//! Static configuration of a stopwatch controller.
//!
//! All values are fixed at build time in the firmware; [`Default`] yields the
//! settings every node of the system is flashed with (see [`crate::consts`]).

use crate::consts::{
    DEBOUNCE_WINDOW_MS, DEST_DEVICE_ADDRESS, DEVICE_ADDRESS, RADIO_BANDS_MHZ, RADIO_CHANNEL,
    RADIO_FREQUENCY_MHZ, RECEIVE_TIMEOUT_MS,
};
use crate::debounce::Level;
use crate::error::ConfigError;

/// Settings handed to the transceiver driver at startup.
#[derive(PartialEq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct RadioConfig {
    /// Carrier frequency in MHz.
    pub frequency_mhz: f32,
    /// Channel number.
    pub channel: u8,
    /// Address of this node, used by the driver's address filter.
    pub local_address: u8,
    /// Address written into byte 0 of every outgoing frame.
    pub destination_address: u8,
    /// Drop inbound frames not addressed to `local_address`.
    pub address_check: bool,
    /// Append a CRC on transmit and check it on receive.
    pub crc: bool,
}

impl Default for RadioConfig {
    fn default() -> Self {
        Self {
            frequency_mhz: RADIO_FREQUENCY_MHZ,
            channel: RADIO_CHANNEL,
            local_address: DEVICE_ADDRESS,
            destination_address: DEST_DEVICE_ADDRESS,
            address_check: true,
            crc: true,
        }
    }
}

impl RadioConfig {
    /// Checks the settings before they reach the driver.
    ///
    /// # Errors
    /// - [`ConfigError::FrequencyOutOfBand`] if the frequency is outside every band
    /// - [`ConfigError::AddressCollision`] if the node would address itself
    pub fn validate(&self) -> Result<(), ConfigError> {
        let in_band = RADIO_BANDS_MHZ
            .iter()
            .any(|&(lo, hi)| self.frequency_mhz >= lo && self.frequency_mhz <= hi);
        if !in_band {
            return Err(ConfigError::FrequencyOutOfBand(self.frequency_mhz));
        }
        if self.local_address == self.destination_address {
            return Err(ConfigError::AddressCollision(self.local_address));
        }
        Ok(())
    }
}

/// Full controller configuration.
#[derive(PartialEq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct StopwatchConfig {
    /// Transceiver settings.
    pub radio: RadioConfig,
    /// Debounce window of the start button, in ms.
    pub debounce_ms: u64,
    /// Bounded receive wait while a measurement is in flight, in ms.
    pub receive_timeout_ms: u32,
    /// Raw level of the start button when pressed.
    pub pressed_level: Level,
    /// Drop armed slots older than this, in ms. `None` keeps them armed forever.
    pub arm_timeout_ms: Option<u64>,
}

impl Default for StopwatchConfig {
    fn default() -> Self {
        Self {
            radio: RadioConfig::default(),
            debounce_ms: DEBOUNCE_WINDOW_MS,
            receive_timeout_ms: RECEIVE_TIMEOUT_MS,
            pressed_level: Level::Low,
            arm_timeout_ms: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_firmware_constants() {
        let config = StopwatchConfig::default();
        assert_eq!(config.radio.frequency_mhz, 868.0);
        assert_eq!(config.radio.channel, 16);
        assert_eq!(config.radio.local_address, 0x2f);
        assert_eq!(config.radio.destination_address, 0x1f);
        assert!(config.radio.address_check);
        assert!(config.radio.crc);
        assert_eq!(config.debounce_ms, 50);
        assert_eq!(config.receive_timeout_ms, 100);
        assert_eq!(config.pressed_level, Level::Low);
        assert_eq!(config.arm_timeout_ms, None);
        assert_eq!(config.radio.validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_out_of_band_frequency() {
        let radio = RadioConfig {
            frequency_mhz: 500.0,
            ..RadioConfig::default()
        };
        assert_eq!(radio.validate(), Err(ConfigError::FrequencyOutOfBand(500.0)));

        let radio = RadioConfig {
            frequency_mhz: 433.92,
            ..RadioConfig::default()
        };
        assert_eq!(radio.validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_self_addressing() {
        let radio = RadioConfig {
            destination_address: DEVICE_ADDRESS,
            ..RadioConfig::default()
        };
        assert_eq!(radio.validate(), Err(ConfigError::AddressCollision(0x2f)));
    }
}
