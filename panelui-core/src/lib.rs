//! Board-agnostic core of the panel UI library
//!
//! This crate contains everything that does not depend on a specific
//! panel or touch controller:
//!
//! - Geometry and color words
//! - Bitmap and font asset views
//! - Display and touch backend traits
//! - Text layout (inset, centering, word wrap)
//! - The [`Display`] surface and the calibrated [`TouchInput`]
//! - Configuration and persisted calibration records

#![no_std]
#![deny(unsafe_code)]

pub mod asset;
pub mod color;
pub mod config;
pub mod display;
pub mod geometry;
pub mod input;
pub mod layout;
pub mod traits;

pub use asset::{Bitmap, Font, FontId, FontSet};
pub use color::Color;
pub use config::{DisplayConfig, Rotation, TouchConfig};
pub use display::Display;
pub use geometry::{Point, Rect};
pub use input::{calibrate, TouchInput};
pub use layout::TextLayout;
pub use traits::{DisplayBackend, DisplayError, RawSample, TouchBackend, TouchError};
