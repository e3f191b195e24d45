//! XPT2046 resistive touch controller (SPI)
//!
//! The XPT2046 is a 12-bit ADC with a touch-screen front end. Each
//! conversion is started by a control byte and clocked out during the next
//! 16-bit transfer, so reads are pipelined: the word that carries one
//! control byte returns the result of the previous one.
//!
//! # Transaction
//!
//! With chip select held low:
//! - `0xB1` starts a Z1 conversion
//! - word `0x00C1` returns Z1 and starts Z2
//! - word `0x0091` returns Z2 and starts a Y-plate read
//! - word `0x00D0` returns that reading and starts an X-plate read
//! - word `0x0000` returns the last reading
//!
//! Results are left-aligned by three bits. On common 320x240 modules the
//! Y plate carries the panel's horizontal axis, so the first position
//! reading is reported as `x`.

use panelui_core::traits::{pressure_proxy, RawSample, TouchBackend, TouchError};
use panelui_hal::gpio::with_selected;
use panelui_hal::{InputPin, OutputPin, SpiBus, SpiConfig};

/// XPT2046 control bytes
pub mod cmd {
    /// Z1 cross-plate pressure
    pub const READ_Z1: u8 = 0xB1;
    /// Z2 cross-plate pressure
    pub const READ_Z2: u8 = 0xC1;
    /// Y-plate position
    pub const READ_Y: u8 = 0x91;
    /// X-plate position, powering down with PENIRQ enabled afterwards
    pub const READ_X_POWER_DOWN: u8 = 0xD0;
    /// Clocks out the pending conversion
    pub const NOP: u8 = 0x00;
}

/// Conversion results are left-aligned by this many bits
const RESULT_SHIFT: u16 = 3;

/// One full set of conversions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Channels {
    pub z1: u16,
    pub z2: u16,
    pub x: u16,
    pub y: u16,
}

impl Channels {
    /// Pressure proxy z1 + (4095 - z2)
    pub const fn pressure(&self) -> i32 {
        pressure_proxy(self.z1, self.z2)
    }

    /// As a raw sample
    pub const fn sample(&self) -> RawSample {
        RawSample::new(self.x as i32, self.y as i32, self.pressure())
    }
}

/// Placeholder for boards that leave PENIRQ unconnected
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIrq;

impl InputPin for NoIrq {
    fn is_high(&self) -> bool {
        true
    }
}

/// XPT2046 driver
pub struct Xpt2046<SPI, CS, IRQ = NoIrq> {
    spi: SPI,
    cs: CS,
    irq: Option<IRQ>,
    spi_config: SpiConfig,
    channels: Channels,
}

impl<SPI, CS> Xpt2046<SPI, CS, NoIrq>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    /// Create a driver on `spi` with chip select `cs`
    ///
    /// The chip select is released immediately. The bus runs at 1 MHz,
    /// mode 0, MSB first unless changed with [`Xpt2046::with_spi_config`].
    pub fn new(spi: SPI, mut cs: CS) -> Self {
        cs.set_high();
        Self {
            spi,
            cs,
            irq: None,
            spi_config: SpiConfig::default(),
            channels: Channels::default(),
        }
    }
}

impl<SPI, CS, IRQ> Xpt2046<SPI, CS, IRQ>
where
    SPI: SpiBus,
    CS: OutputPin,
    IRQ: InputPin,
{
    /// Attach the active-low PENIRQ line
    pub fn with_irq<I: InputPin>(self, irq: I) -> Xpt2046<SPI, CS, I> {
        Xpt2046 {
            spi: self.spi,
            cs: self.cs,
            irq: Some(irq),
            spi_config: self.spi_config,
            channels: self.channels,
        }
    }

    /// Use a different bus configuration
    pub fn with_spi_config(mut self, config: SpiConfig) -> Self {
        self.spi_config = config;
        self
    }

    pub fn spi_config(&self) -> &SpiConfig {
        &self.spi_config
    }

    /// Whether PENIRQ reports contact; `None` without an IRQ line
    pub fn is_pen_down(&self) -> Option<bool> {
        self.irq.as_ref().map(|irq| irq.is_low())
    }

    /// Run one full conversion sequence
    pub fn read_channels(&mut self) -> Result<Channels, TouchError> {
        self.spi.configure(&self.spi_config).map_err(|_| TouchError::Bus)?;

        let spi = &mut self.spi;
        let result = with_selected(&mut self.cs, || -> Result<Channels, SPI::Error> {
            spi.transfer_byte(cmd::READ_Z1)?;
            let z1 = spi.transfer_word(cmd::READ_Z2 as u16)? >> RESULT_SHIFT;
            let z2 = spi.transfer_word(cmd::READ_Y as u16)? >> RESULT_SHIFT;
            let x = spi.transfer_word(cmd::READ_X_POWER_DOWN as u16)? >> RESULT_SHIFT;
            let y = spi.transfer_word(cmd::NOP as u16)? >> RESULT_SHIFT;
            Ok(Channels { z1, z2, x, y })
        });

        match result {
            Ok(channels) => {
                self.channels = channels;
                Ok(channels)
            }
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("XPT2046: SPI transfer failed");
                Err(TouchError::Bus)
            }
        }
    }

    /// Results of the most recent successful conversion
    pub fn last_channels(&self) -> Channels {
        self.channels
    }

    /// Give back the bus and pins
    pub fn release(self) -> (SPI, CS, Option<IRQ>) {
        (self.spi, self.cs, self.irq)
    }
}

impl<SPI, CS, IRQ> TouchBackend for Xpt2046<SPI, CS, IRQ>
where
    SPI: SpiBus,
    CS: OutputPin,
    IRQ: InputPin,
{
    fn begin(&mut self) -> Result<(), TouchError> {
        self.cs.set_high();
        self.spi.configure(&self.spi_config).map_err(|_| TouchError::Bus)?;
        #[cfg(feature = "defmt")]
        defmt::debug!("XPT2046 ready at {} Hz", self.spi_config.frequency);
        Ok(())
    }

    fn sample_raw(&mut self, pressure_threshold: u16) -> Result<Option<RawSample>, TouchError> {
        let channels = self.read_channels()?;
        let sample = channels.sample();

        if !sample.is_pressed(pressure_threshold) {
            return Ok(None);
        }

        #[cfg(feature = "defmt")]
        defmt::trace!("XPT2046: {}", channels);
        Ok(Some(sample))
    }
}
