//! Adapters from `embedded-hal` 1.0 implementations
//!
//! Most chip HALs already implement the `embedded-hal` traits. Wrapping a
//! bus or pin in one of these adapters makes it usable by panelui drivers
//! without a chip-specific port.

use core::cell::RefCell;
use core::convert::Infallible;

use embedded_hal::digital::{InputPin as EhInputPin, OutputPin as EhOutputPin};
use embedded_hal::spi::SpiBus as EhSpiBus;

use crate::gpio::{InputPin, OutputPin};
use crate::spi::SpiBus;

/// [`SpiBus`] over an `embedded_hal::spi::SpiBus<u8>`
///
/// Every operation is flushed before returning, so a driver can release
/// its chip select right after the call.
pub struct EhSpi<T> {
    bus: T,
}

impl<T> EhSpi<T> {
    /// Wrap an embedded-hal bus
    pub fn new(bus: T) -> Self {
        Self { bus }
    }

    /// Give back the wrapped bus
    pub fn release(self) -> T {
        self.bus
    }
}

impl<T: EhSpiBus<u8>> SpiBus for EhSpi<T> {
    type Error = T::Error;

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        self.bus.transfer(read, write)?;
        self.bus.flush()
    }

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.bus.write(data)?;
        self.bus.flush()
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.bus.read(buf)?;
        self.bus.flush()
    }

    fn transfer_in_place(&mut self, data: &mut [u8]) -> Result<(), Self::Error> {
        self.bus.transfer_in_place(data)?;
        self.bus.flush()
    }
}

/// [`OutputPin`] over an infallible `embedded_hal::digital::OutputPin`
pub struct EhOutput<P> {
    pin: P,
    high: bool,
}

impl<P: EhOutputPin<Error = Infallible>> EhOutput<P> {
    /// Wrap a pin and drive it high (chip select idle)
    pub fn new(mut pin: P) -> Self {
        infallible(pin.set_high());
        Self { pin, high: true }
    }
}

impl<P: EhOutputPin<Error = Infallible>> OutputPin for EhOutput<P> {
    fn set_high(&mut self) {
        infallible(self.pin.set_high());
        self.high = true;
    }

    fn set_low(&mut self) {
        infallible(self.pin.set_low());
        self.high = false;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// [`InputPin`] over an infallible `embedded_hal::digital::InputPin`
///
/// embedded-hal 1.0 reads take `&mut self`; the pin sits in a `RefCell`
/// so it can be sampled through a shared reference.
pub struct EhInput<P> {
    pin: RefCell<P>,
}

impl<P: EhInputPin<Error = Infallible>> EhInput<P> {
    /// Wrap an input pin
    pub fn new(pin: P) -> Self {
        Self {
            pin: RefCell::new(pin),
        }
    }
}

impl<P: EhInputPin<Error = Infallible>> InputPin for EhInput<P> {
    fn is_high(&self) -> bool {
        infallible(self.pin.borrow_mut().is_high())
    }
}

fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}
