//! Settings persistence
//!
//! Loads and saves touch calibration and display configuration through a
//! [`FlashStorage`]. Records are postcard-encoded; calibration records
//! also carry a header and CRC that are checked on load.

use panelui_core::config::{
    CalibrationError, DisplayConfig, TouchCalibrationData, TouchConfig, MAX_CALIBRATION_SIZE,
};
use panelui_hal::{FlashError, FlashStorage, StorageKey};

/// Upper bound of a serialized display configuration
pub const MAX_DISPLAY_CONFIG_SIZE: usize = 32;

/// Persistence errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PersistError {
    /// Flash operation failed
    Flash(FlashError),
    /// Record failed to encode, decode or validate
    Calibration(CalibrationError),
    /// Display configuration failed to encode or decode
    Encoding,
}

impl From<FlashError> for PersistError {
    fn from(e: FlashError) -> Self {
        PersistError::Flash(e)
    }
}

impl From<CalibrationError> for PersistError {
    fn from(e: CalibrationError) -> Self {
        PersistError::Calibration(e)
    }
}

/// Load touch calibration from flash
///
/// Returns the stored parameters, or the defaults if nothing is stored or
/// the record is damaged.
pub fn load_calibration<S: FlashStorage + ?Sized>(storage: &mut S) -> TouchConfig {
    match try_load_calibration(storage) {
        Ok(config) => {
            #[cfg(feature = "defmt")]
            defmt::debug!("Loaded touch calibration: {}", config);
            config
        }
        Err(PersistError::Flash(FlashError::NotFound)) => {
            #[cfg(feature = "defmt")]
            defmt::debug!("No touch calibration in flash, using defaults");
            TouchConfig::default()
        }
        Err(_e) => {
            #[cfg(feature = "defmt")]
            defmt::warn!("Failed to load touch calibration: {}, using defaults", _e);
            TouchConfig::default()
        }
    }
}

/// Load touch calibration, reporting why it is unusable
pub fn try_load_calibration<S: FlashStorage + ?Sized>(storage: &mut S) -> Result<TouchConfig, PersistError> {
    let mut buffer = [0u8; MAX_CALIBRATION_SIZE];
    let len = storage.read(StorageKey::TouchCalibration, &mut buffer)?;

    #[cfg(feature = "defmt")]
    defmt::trace!("Read {} bytes of touch calibration", len);

    let data = TouchCalibrationData::decode(&buffer[..len])?;
    Ok(data.config)
}

/// Seal `config` into a calibration record and write it
pub fn save_calibration<S: FlashStorage + ?Sized>(
    storage: &mut S,
    config: &TouchConfig,
) -> Result<(), PersistError> {
    let bytes = TouchCalibrationData::new(*config).encode_to_vec()?;

    #[cfg(feature = "defmt")]
    defmt::debug!("Saving {} bytes of touch calibration", bytes.len());

    storage.write(StorageKey::TouchCalibration, &bytes)?;
    Ok(())
}

/// Forget the stored calibration
pub fn clear_calibration<S: FlashStorage + ?Sized>(storage: &mut S) -> Result<(), PersistError> {
    match storage.remove(StorageKey::TouchCalibration) {
        Ok(()) | Err(FlashError::NotFound) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Load the display configuration, falling back to defaults
pub fn load_display_config<S: FlashStorage + ?Sized>(storage: &mut S) -> DisplayConfig {
    let mut buffer = [0u8; MAX_DISPLAY_CONFIG_SIZE];
    let result = storage
        .read(StorageKey::DisplayConfig, &mut buffer)
        .map_err(PersistError::from)
        .and_then(|len| postcard::from_bytes(&buffer[..len]).map_err(|_| PersistError::Encoding));

    match result {
        Ok(config) => config,
        Err(_e) => {
            #[cfg(feature = "defmt")]
            defmt::debug!("Display config unavailable ({}), using defaults", _e);
            DisplayConfig::default()
        }
    }
}

/// Write the display configuration
pub fn save_display_config<S: FlashStorage + ?Sized>(
    storage: &mut S,
    config: &DisplayConfig,
) -> Result<(), PersistError> {
    let mut buffer = [0u8; MAX_DISPLAY_CONFIG_SIZE];
    let bytes = postcard::to_slice(config, &mut buffer).map_err(|_| PersistError::Encoding)?;
    storage.write(StorageKey::DisplayConfig, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;
    use panelui_core::asset::FontId;
    use panelui_core::config::{Rotation, CALIBRATION_VERSION};
    use panelui_core::geometry::Rect;

    /// In-memory flash with one slot per key
    #[derive(Default)]
    struct MemFlash {
        slots: [Option<Vec<u8, 64>>; 3],
        fail_writes: bool,
    }

    impl MemFlash {
        fn put(&mut self, key: StorageKey, data: &[u8]) {
            self.slots[key.as_u8() as usize] = Some(Vec::from_slice(data).unwrap());
        }
    }

    impl FlashStorage for MemFlash {
        fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, FlashError> {
            let data = self.slots[key.as_u8() as usize]
                .as_ref()
                .ok_or(FlashError::NotFound)?;
            let dest = buffer
                .get_mut(..data.len())
                .ok_or(FlashError::BufferTooSmall)?;
            dest.copy_from_slice(data);
            Ok(data.len())
        }

        fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), FlashError> {
            if self.fail_writes {
                return Err(FlashError::Flash);
            }
            let data = Vec::from_slice(data).map_err(|_| FlashError::Full)?;
            self.slots[key.as_u8() as usize] = Some(data);
            Ok(())
        }

        fn remove(&mut self, key: StorageKey) -> Result<(), FlashError> {
            self.slots[key.as_u8() as usize]
                .take()
                .map(|_| ())
                .ok_or(FlashError::NotFound)
        }
    }

    fn custom() -> TouchConfig {
        TouchConfig {
            x_mul: 0.1,
            y_mul: 0.07,
            x_off: -12,
            y_off: -31,
            rotation: Rotation::Flipped,
            pressure_threshold: 650,
            ..Default::default()
        }
    }

    #[test]
    fn test_save_then_load() {
        let mut flash = MemFlash::default();
        save_calibration(&mut flash, &custom()).unwrap();

        assert!(flash.exists(StorageKey::TouchCalibration));
        assert_eq!(try_load_calibration(&mut flash), Ok(custom()));
        assert_eq!(load_calibration(&mut flash), custom());
    }

    #[test]
    fn test_missing_record_falls_back() {
        let mut flash = MemFlash::default();
        assert_eq!(
            try_load_calibration(&mut flash),
            Err(PersistError::Flash(FlashError::NotFound))
        );
        assert_eq!(load_calibration(&mut flash), TouchConfig::default());
    }

    #[test]
    fn test_crc_mismatch_falls_back() {
        let mut record = TouchCalibrationData::new(custom());
        record.config.x_off = 99;
        let bytes = record.encode_to_vec().unwrap();

        let mut flash = MemFlash::default();
        flash.put(StorageKey::TouchCalibration, &bytes);

        assert_eq!(
            try_load_calibration(&mut flash),
            Err(PersistError::Calibration(CalibrationError::CrcMismatch))
        );
        assert_eq!(load_calibration(&mut flash), TouchConfig::default());
    }

    #[test]
    fn test_stale_version_rejected() {
        let mut record = TouchCalibrationData::new(custom());
        record.version = CALIBRATION_VERSION + 1;
        record.update_crc();
        let bytes = record.encode_to_vec().unwrap();

        let mut flash = MemFlash::default();
        flash.put(StorageKey::TouchCalibration, &bytes);

        assert_eq!(
            try_load_calibration(&mut flash),
            Err(PersistError::Calibration(CalibrationError::InvalidFormat))
        );
    }

    #[test]
    fn test_truncated_record() {
        let bytes = TouchCalibrationData::new(custom()).encode_to_vec().unwrap();
        let mut flash = MemFlash::default();
        flash.put(StorageKey::TouchCalibration, &bytes[..4]);

        assert_eq!(
            try_load_calibration(&mut flash),
            Err(PersistError::Calibration(CalibrationError::Deserialize))
        );
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut flash = MemFlash::default();
        save_calibration(&mut flash, &custom()).unwrap();

        clear_calibration(&mut flash).unwrap();
        clear_calibration(&mut flash).unwrap();
        assert!(!flash.exists(StorageKey::TouchCalibration));
    }

    #[test]
    fn test_write_failure_propagates() {
        let mut flash = MemFlash {
            fail_writes: true,
            ..Default::default()
        };
        assert_eq!(
            save_calibration(&mut flash, &custom()),
            Err(PersistError::Flash(FlashError::Flash))
        );
    }

    #[test]
    fn test_display_config_roundtrip() {
        let mut flash = MemFlash::default();
        assert_eq!(load_display_config(&mut flash), DisplayConfig::default());

        let config = DisplayConfig {
            draw_area: Rect::new(0, 0, 479, 319),
            rotation: Rotation::Flipped,
            font: FontId::Arial12Bold,
        };
        save_display_config(&mut flash, &config).unwrap();
        assert_eq!(load_display_config(&mut flash), config);
    }
}
