//! Touch backend trait
//!
//! The raw sampling contract a touch-controller driver implements.

/// Full-scale reading of the controller's 12-bit ADC
pub const ADC_MAX: u16 = 4095;

/// Errors that can occur while sampling the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchError {
    /// Bus transaction failed
    Bus,
    /// Controller not initialized
    NotInitialized,
}

/// One raw reading in sensor units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    /// X plate reading
    pub x: i32,
    /// Y plate reading
    pub y: i32,
    /// Pressure proxy, see [`pressure_proxy`]
    pub z: i32,
}

impl RawSample {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Whether the pressure proxy clears `threshold`
    pub const fn is_pressed(&self, threshold: u16) -> bool {
        self.z > threshold as i32
    }
}

/// Pressure proxy from the two cross-plate readings: z1 + (4095 - z2)
///
/// Grows with contact pressure; an untouched panel reads near zero.
pub const fn pressure_proxy(z1: u16, z2: u16) -> i32 {
    z1 as i32 + (ADC_MAX as i32 - z2 as i32)
}

/// Raw sampling contract
pub trait TouchBackend {
    /// Initialize the controller
    fn begin(&mut self) -> Result<(), TouchError> {
        Ok(())
    }

    /// Take one reading
    ///
    /// Returns `Ok(Some(sample))` when the pressure proxy exceeds
    /// `pressure_threshold`, `Ok(None)` when nothing is touching the panel.
    /// The pressure comparison belongs to the backend; callers do not
    /// re-check it.
    fn sample_raw(&mut self, pressure_threshold: u16) -> Result<Option<RawSample>, TouchError>;
}
