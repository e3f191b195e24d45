//! Flash storage abstractions
//!
//! Provides a small key-value interface over persistent storage. panelui
//! only stores touch calibration records, but the key space leaves room
//! for application data.

/// Storage keys for persisted records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StorageKey {
    /// Touch calibration record (binary postcard format)
    TouchCalibration = 0,
    /// Display configuration (draw area, rotation, font)
    DisplayConfig = 1,
    /// Free for application use
    Application = 2,
}

impl StorageKey {
    /// Get the key as a byte value
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Create a key from a byte value
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(StorageKey::TouchCalibration),
            1 => Some(StorageKey::DisplayConfig),
            2 => Some(StorageKey::Application),
            _ => None,
        }
    }
}

/// Errors from flash storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlashError {
    /// Flash operation failed
    Flash,
    /// Key not found
    NotFound,
    /// Buffer too small for the data
    BufferTooSmall,
    /// Storage is full
    Full,
}

/// Flash storage trait
///
/// Blocking key-value storage. Wear leveling and atomicity are up to
/// the implementation.
pub trait FlashStorage {
    /// Read a value by key into the provided buffer
    ///
    /// Returns the number of bytes read.
    fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, FlashError>;

    /// Write a value by key, replacing any previous value
    fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), FlashError>;

    /// Remove a value
    fn remove(&mut self, key: StorageKey) -> Result<(), FlashError>;

    /// Check if a key exists in storage
    fn exists(&mut self, key: StorageKey) -> bool {
        let mut probe = [0u8; 1];
        !matches!(self.read(key, &mut probe), Err(FlashError::NotFound))
    }
}
