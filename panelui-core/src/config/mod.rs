//! Configuration types
//!
//! Operator-settable state owned by each `Display` and `TouchInput`
//! instance, plus the persisted calibration record.

pub mod calibration;
pub mod types;

pub use calibration::{
    CalibrationError, TouchCalibrationData, CALIBRATION_MAGIC, CALIBRATION_VERSION,
    MAX_CALIBRATION_SIZE,
};
pub use types::*;
