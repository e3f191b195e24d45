//! Display and touch configuration structures

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::asset::FontId;
use crate::geometry::Rect;

/// Default panel width in pixels
pub const DEFAULT_WIDTH: i16 = 320;

/// Default panel height in pixels
pub const DEFAULT_HEIGHT: i16 = 240;

/// Default pressure threshold for the z1 + (4095 - z2) proxy
pub const DEFAULT_PRESSURE_THRESHOLD: u16 = 500;

/// Screen orientation
///
/// Only the native orientation and its 180° flip are defined. Raw values
/// other than 0 and 1 are rejected at conversion time, so every stored
/// rotation has a well-defined calibration transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Rotation {
    /// Native panel orientation (0)
    #[default]
    Normal,
    /// Rotated by 180° (1)
    Flipped,
}

impl Rotation {
    /// Raw value as used by panel drivers
    pub const fn as_u8(self) -> u8 {
        match self {
            Rotation::Normal => 0,
            Rotation::Flipped => 1,
        }
    }
}

/// A raw rotation value outside 0..=1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidRotation(pub u8);

impl TryFrom<u8> for Rotation {
    type Error = InvalidRotation;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Rotation::Normal),
            1 => Ok(Rotation::Flipped),
            other => Err(InvalidRotation(other)),
        }
    }
}

/// Display configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Full drawable surface; the clip used when none is given
    pub draw_area: Rect,
    /// Panel orientation
    pub rotation: Rotation,
    /// Font selected at start-up
    pub font: FontId,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            draw_area: Rect::new(0, 0, DEFAULT_WIDTH as i32 - 1, DEFAULT_HEIGHT as i32 - 1),
            rotation: Rotation::Normal,
            font: FontId::Arial8,
        }
    }
}

impl DisplayConfig {
    /// Configuration for a `width` x `height` panel
    pub const fn with_size(width: i32, height: i32) -> Self {
        Self {
            draw_area: Rect::new(0, 0, width - 1, height - 1),
            rotation: Rotation::Normal,
            font: FontId::Arial8,
        }
    }
}

/// Touch calibration parameters
///
/// Screen coordinates are `mul * raw + off` per axis, mirrored against
/// `width`/`height` when flipped. Fields are public and unchecked.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TouchConfig {
    /// X scale, screen pixels per ADC count
    pub x_mul: f32,
    /// Y scale, screen pixels per ADC count
    pub y_mul: f32,
    /// X offset in screen pixels
    pub x_off: i16,
    /// Y offset in screen pixels
    pub y_off: i16,
    /// Screen width used when mirroring
    pub width: i16,
    /// Screen height used when mirroring
    pub height: i16,
    /// Orientation applied to the next sample
    pub rotation: Rotation,
    /// Minimum pressure proxy that counts as a touch
    pub pressure_threshold: u16,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            x_mul: 0.092219,
            y_mul: 0.06857,
            x_off: -20,
            y_off: -20,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            rotation: Rotation::Normal,
            pressure_threshold: DEFAULT_PRESSURE_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_conversion() {
        assert_eq!(Rotation::try_from(0), Ok(Rotation::Normal));
        assert_eq!(Rotation::try_from(1), Ok(Rotation::Flipped));
        assert_eq!(Rotation::try_from(2), Err(InvalidRotation(2)));
        assert_eq!(Rotation::Flipped.as_u8(), 1);
    }

    #[test]
    fn test_default_draw_area() {
        let cfg = DisplayConfig::default();
        assert_eq!(cfg.draw_area, Rect::new(0, 0, 319, 239));
        assert_eq!(DisplayConfig::with_size(128, 64).draw_area, Rect::new(0, 0, 127, 63));
    }
}
