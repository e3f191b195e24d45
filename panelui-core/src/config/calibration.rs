//! Persisted touch calibration
//!
//! A calibration record wraps a [`TouchConfig`] with a header and a CRC so
//! a half-written or stale record in flash is detected on load.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::types::TouchConfig;

/// Magic number to identify valid calibration data
pub const CALIBRATION_MAGIC: u32 = 0x5443_414C; // "TCAL"

/// Current calibration data version
pub const CALIBRATION_VERSION: u8 = 1;

/// Upper bound of a serialized record
pub const MAX_CALIBRATION_SIZE: usize = 64;

/// Calibration encoding/decoding errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationError {
    /// Serialization failed (buffer too small)
    Serialize,
    /// Deserialization failed
    Deserialize,
    /// Invalid magic or version
    InvalidFormat,
    /// CRC check failed
    CrcMismatch,
}

/// Calibration record stored in flash
///
/// This struct is serialized with postcard.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TouchCalibrationData {
    /// Magic number for validation
    pub magic: u32,
    /// Data format version
    pub version: u8,
    /// Calibration parameters
    pub config: TouchConfig,
    /// CRC32 checksum (calculated over magic..config)
    pub crc: u32,
}

impl Default for TouchCalibrationData {
    fn default() -> Self {
        Self::new(TouchConfig::default())
    }
}

impl TouchCalibrationData {
    /// Wrap `config` in a sealed record
    pub fn new(config: TouchConfig) -> Self {
        let mut data = Self {
            magic: CALIBRATION_MAGIC,
            version: CALIBRATION_VERSION,
            config,
            crc: 0,
        };
        data.update_crc();
        data
    }

    /// Check if the header matches this firmware
    pub fn is_valid(&self) -> bool {
        self.magic == CALIBRATION_MAGIC && self.version == CALIBRATION_VERSION
    }

    /// Calculate CRC32 over the header and parameters
    pub fn calculate_crc(&self) -> u32 {
        let c = &self.config;
        let mut crc: u32 = 0xFFFFFFFF;

        crc = crc32_update(crc, &self.magic.to_le_bytes());
        crc = crc32_update(crc, &[self.version]);
        crc = crc32_update(crc, &c.x_mul.to_bits().to_le_bytes());
        crc = crc32_update(crc, &c.y_mul.to_bits().to_le_bytes());
        crc = crc32_update(crc, &c.x_off.to_le_bytes());
        crc = crc32_update(crc, &c.y_off.to_le_bytes());
        crc = crc32_update(crc, &c.width.to_le_bytes());
        crc = crc32_update(crc, &c.height.to_le_bytes());
        crc = crc32_update(crc, &[c.rotation.as_u8()]);
        crc = crc32_update(crc, &c.pressure_threshold.to_le_bytes());

        !crc
    }

    /// Update the CRC field
    pub fn update_crc(&mut self) {
        self.crc = self.calculate_crc();
    }

    /// Verify the CRC is correct
    pub fn verify_crc(&self) -> bool {
        self.crc == self.calculate_crc()
    }

    /// Header, version and CRC checks in one go
    pub fn validate(&self) -> Result<(), CalibrationError> {
        if !self.is_valid() {
            return Err(CalibrationError::InvalidFormat);
        }
        if !self.verify_crc() {
            return Err(CalibrationError::CrcMismatch);
        }
        Ok(())
    }

    /// Serialize into `buffer`, returning the number of bytes written
    #[cfg(feature = "serde")]
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, CalibrationError> {
        postcard::to_slice(self, buffer)
            .map(|used| used.len())
            .map_err(|_| CalibrationError::Serialize)
    }

    /// Serialize into a fixed-capacity vector
    #[cfg(feature = "serde")]
    pub fn encode_to_vec(&self) -> Result<heapless::Vec<u8, MAX_CALIBRATION_SIZE>, CalibrationError> {
        let mut buffer = [0u8; MAX_CALIBRATION_SIZE];
        let len = self.encode(&mut buffer)?;
        heapless::Vec::from_slice(&buffer[..len]).map_err(|_| CalibrationError::Serialize)
    }

    /// Deserialize and validate a record
    #[cfg(feature = "serde")]
    pub fn decode(bytes: &[u8]) -> Result<Self, CalibrationError> {
        let data: Self = postcard::from_bytes(bytes).map_err(|_| CalibrationError::Deserialize)?;
        data.validate()?;
        Ok(data)
    }
}

/// Simple CRC32 update function (IEEE 802.3 polynomial)
fn crc32_update(crc: u32, data: &[u8]) -> u32 {
    const POLY: u32 = 0xEDB88320;
    let mut crc = crc;

    for &byte in data {
        crc ^= byte as u32;
        for _ in 0..8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ POLY;
            } else {
                crc >>= 1;
            }
        }
    }

    crc
}
