//! GPIO pin abstractions
//!
//! Touch controllers need two lines besides the bus: an active-low chip
//! select driven by the host and an optional pen-interrupt line driven by
//! the controller.

/// Digital output pin
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Run `f` with an active-low chip select asserted
///
/// The line is released again before returning, whatever `f` returns,
/// so a failed transfer never leaves the device selected.
pub fn with_selected<P, R>(cs: &mut P, f: impl FnOnce() -> R) -> R
where
    P: OutputPin + ?Sized,
{
    cs.set_low();
    let result = f();
    cs.set_high();
    result
}
