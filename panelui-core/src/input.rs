//! Touch input
//!
//! Turns raw controller readings into screen coordinates. The transform
//! is a per-axis affine map, mirrored against the screen size when the
//! panel is flipped, with negative results pinned to 0.

use crate::config::{Rotation, TouchConfig};
use crate::geometry::Point;
use crate::traits::{RawSample, TouchBackend, TouchError};

/// Map a raw sample to screen coordinates
///
/// The affine term is truncated toward zero before mirroring. Only
/// negative results are clamped; there is no upper bound.
pub fn calibrate(config: &TouchConfig, raw: RawSample) -> Point {
    let x = affine(config.x_mul, raw.x, config.x_off);
    let y = affine(config.y_mul, raw.y, config.y_off);

    let (x, y) = match config.rotation {
        Rotation::Normal => (x, y),
        Rotation::Flipped => (
            (config.width as i32).saturating_sub(x),
            (config.height as i32).saturating_sub(y),
        ),
    };

    Point::new(x.max(0), y.max(0))
}

fn affine(mul: f32, raw: i32, off: i16) -> i32 {
    (mul * raw as f32 + off as f32) as i32
}

/// Calibrated touch input over a controller backend
pub struct TouchInput<B> {
    backend: B,
    config: TouchConfig,
    point: Point,
    raw: Option<RawSample>,
}

impl<B: TouchBackend> TouchInput<B> {
    pub fn new(backend: B, config: TouchConfig) -> Self {
        Self {
            backend,
            config,
            point: Point::ORIGIN,
            raw: None,
        }
    }

    /// Initialize the controller
    pub fn begin(&mut self) -> Result<(), TouchError> {
        self.backend.begin()
    }

    /// Sample once and return the calibrated point, if touched
    ///
    /// Without a touch the last stored point is left as it was.
    pub fn get_point(&mut self) -> Result<Option<Point>, TouchError> {
        let Some(raw) = self.backend.sample_raw(self.config.pressure_threshold)? else {
            return Ok(None);
        };

        let point = calibrate(&self.config, raw);
        #[cfg(feature = "defmt")]
        defmt::trace!("Touch raw {} -> {}", raw, point);

        self.raw = Some(raw);
        self.point = point;
        Ok(Some(point))
    }

    /// Sample once and report whether the panel is touched
    ///
    /// The calibrated point is available from [`TouchInput::last_point`].
    pub fn get_press(&mut self) -> Result<bool, TouchError> {
        self.get_point().map(|point| point.is_some())
    }

    /// Like [`TouchInput::get_point`] but reports no touch as the origin
    pub fn point_or_origin(&mut self) -> Result<Point, TouchError> {
        self.get_point().map(|point| point.unwrap_or(Point::ORIGIN))
    }

    /// Change orientation; applies from the next sample
    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.config.rotation = rotation;
    }

    pub fn config(&self) -> &TouchConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut TouchConfig {
        &mut self.config
    }

    pub fn set_config(&mut self, config: TouchConfig) {
        self.config = config;
    }

    /// Point of the most recent touch; the origin before any touch
    pub fn last_point(&self) -> Point {
        self.point
    }

    /// Raw reading behind [`TouchInput::last_point`]
    pub fn last_raw(&self) -> Option<RawSample> {
        self.raw
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Give back the backend
    pub fn release(self) -> B {
        self.backend
    }
}
