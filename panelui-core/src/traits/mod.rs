//! Backend traits
//!
//! These traits define the interface between the shared layout and
//! calibration logic and hardware-specific drivers.

pub mod display;
pub mod touch;

pub use display::{DisplayBackend, DisplayError};
pub use touch::{pressure_proxy, RawSample, TouchBackend, TouchError, ADC_MAX};
