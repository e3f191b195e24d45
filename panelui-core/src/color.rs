//! Color words
//!
//! The core never interprets colors. A `Color` is handed to the backend
//! unchanged, and the backend decides the pixel format. The helpers below
//! cover the RGB565 panels this crate is usually paired with.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Opaque 32-bit color word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const GRAY: Self = Self::rgb(128, 128, 128);

    /// Pack 8-bit channels as 0x00RRGGBB
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Raw color word
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Reduce to RGB565 for 16-bit panels
    pub const fn to_rgb565(self) -> u16 {
        let r = ((self.0 >> 16) & 0xFF) as u16;
        let g = ((self.0 >> 8) & 0xFF) as u16;
        let b = (self.0 & 0xFF) as u16;
        ((r >> 3) << 11) | ((g >> 2) << 5) | (b >> 3)
    }

    /// Expand an RGB565 value, replicating high bits into the low ones
    pub const fn from_rgb565(value: u16) -> Self {
        let r5 = (value >> 11) & 0x1F;
        let g6 = (value >> 5) & 0x3F;
        let b5 = value & 0x1F;
        Self::rgb(
            ((r5 << 3) | (r5 >> 2)) as u8,
            ((g6 << 2) | (g6 >> 4)) as u8,
            ((b5 << 3) | (b5 >> 2)) as u8,
        )
    }
}

impl From<u32> for Color {
    fn from(value: u32) -> Self {
        Self(value)
    }
}
