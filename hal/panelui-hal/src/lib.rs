//! panelui Hardware Abstraction Layer
//!
//! This crate defines the bus, pin and storage traits that the panelui
//! drivers are written against. Chip-specific HALs implement them directly,
//! or an `embedded-hal` 1.0 implementation can be wrapped with the adapters
//! in [`compat`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (Display, TouchInput)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  panelui-drivers (XPT2046, framebuffer) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  panelui-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  chip HAL     │       │ embedded-hal  │
//! │  (direct)     │       │ via `compat`  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Chip select and pen IRQ lines
//! - [`spi::SpiBus`] - SPI bus operations
//! - [`flash::FlashStorage`] - Persistent storage for calibration data

#![no_std]
#![deny(unsafe_code)]

pub mod compat;
pub mod flash;
pub mod gpio;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use flash::{FlashError, FlashStorage, StorageKey};
pub use gpio::{InputPin, OutputPin};
pub use spi::{SpiBus, SpiConfig};
