//! In-memory display backend
//!
//! Keeps one [`Color`] per pixel. Every primitive is clipped twice: to the
//! clip rectangle it receives and to the buffer bounds, so shapes may hang
//! off the panel freely. Text uses the glyph-by-glyph default of
//! [`DisplayBackend`].
//!
//! In [`Rotation::Flipped`] logical (x, y) lands at physical
//! (W - 1 - x, H - 1 - y); [`FrameBuffer::pixel`] reads physical memory,
//! as a panel flush would.

use panelui_core::asset::Bitmap;
use panelui_core::color::Color;
use panelui_core::config::Rotation;
use panelui_core::geometry::{Point, Rect};
use panelui_core::traits::{DisplayBackend, DisplayError};

/// A `W` x `H` pixel buffer
pub struct FrameBuffer<const W: usize, const H: usize> {
    pixels: [[Color; W]; H],
    rotation: Rotation,
}

impl<const W: usize, const H: usize> Default for FrameBuffer<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const H: usize> FrameBuffer<W, H> {
    /// A black buffer in the native orientation
    pub const fn new() -> Self {
        Self {
            pixels: [[Color::BLACK; W]; H],
            rotation: Rotation::Normal,
        }
    }

    /// The addressable area
    pub const fn bounds() -> Rect {
        Rect::new(0, 0, W as i32 - 1, H as i32 - 1)
    }

    /// Physical pixel at (`x`, `y`)
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        if !Self::bounds().contains_xy(x, y) {
            return None;
        }
        Some(self.pixels[y as usize][x as usize])
    }

    /// Raw rows, top to bottom
    pub fn rows(&self) -> &[[Color; W]; H] {
        &self.pixels
    }

    /// Number of pixels holding `color`
    pub fn count(&self, color: Color) -> usize {
        self.pixels
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&c| c == color)
            .count()
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    fn visible(clip: &Rect) -> Option<Rect> {
        clip.intersection(&Self::bounds())
    }

    /// Write a pixel already known to be in bounds
    fn store(&mut self, x: i32, y: i32, color: Color) {
        let (x, y) = match self.rotation {
            Rotation::Normal => (x as usize, y as usize),
            Rotation::Flipped => (W - 1 - x as usize, H - 1 - y as usize),
        };
        self.pixels[y][x] = color;
    }

    fn plot(&mut self, visible: &Rect, x: i32, y: i32, color: Color) {
        if visible.contains_xy(x, y) {
            self.store(x, y, color);
        }
    }

    fn hline(&mut self, visible: &Rect, x1: i32, x2: i32, y: i32, color: Color) {
        if y < visible.y1 || y > visible.y2 {
            return;
        }
        for x in x1.max(visible.x1)..=x2.min(visible.x2) {
            self.store(x, y, color);
        }
    }

    fn vline(&mut self, visible: &Rect, x: i32, y1: i32, y2: i32, color: Color) {
        if x < visible.x1 || x > visible.x2 {
            return;
        }
        for y in y1.max(visible.y1)..=y2.min(visible.y2) {
            self.store(x, y, color);
        }
    }
}

impl<const W: usize, const H: usize> DisplayBackend for FrameBuffer<W, H> {
    fn set_rotation(&mut self, rotation: Rotation) -> Result<(), DisplayError> {
        self.rotation = rotation;
        Ok(())
    }

    fn clear(&mut self, color: Color) -> Result<(), DisplayError> {
        for row in self.pixels.iter_mut() {
            row.fill(color);
        }
        Ok(())
    }

    fn draw_pixel(&mut self, clip: &Rect, p: Point, color: Color) -> Result<(), DisplayError> {
        if let Some(visible) = Self::visible(clip) {
            self.plot(&visible, p.x, p.y, color);
        }
        Ok(())
    }

    fn fill_rect(&mut self, clip: &Rect, rect: &Rect, color: Color) -> Result<(), DisplayError> {
        let Some(visible) = Self::visible(clip) else {
            return Ok(());
        };
        for y in rect.y1.max(visible.y1)..=rect.y2.min(visible.y2) {
            self.hline(&visible, rect.x1, rect.x2, y, color);
        }
        Ok(())
    }

    fn draw_rect(&mut self, clip: &Rect, rect: &Rect, color: Color) -> Result<(), DisplayError> {
        let Some(visible) = Self::visible(clip) else {
            return Ok(());
        };
        if rect.x1 > rect.x2 || rect.y1 > rect.y2 {
            return Ok(());
        }
        self.hline(&visible, rect.x1, rect.x2, rect.y1, color);
        self.hline(&visible, rect.x1, rect.x2, rect.y2, color);
        self.vline(&visible, rect.x1, rect.y1, rect.y2, color);
        self.vline(&visible, rect.x2, rect.y1, rect.y2, color);
        Ok(())
    }

    fn fill_round_rect(
        &mut self,
        clip: &Rect,
        rect: &Rect,
        radius: u16,
        color: Color,
    ) -> Result<(), DisplayError> {
        let Some(visible) = Self::visible(clip) else {
            return Ok(());
        };
        let r = (radius as i32).min(rect.width() / 2).min(rect.height() / 2).max(0);

        for y in rect.y1.max(visible.y1)..=rect.y2.min(visible.y2) {
            let dy = if y < rect.y1 + r {
                rect.y1 + r - y
            } else if y > rect.y2 - r {
                y - (rect.y2 - r)
            } else {
                0
            };
            let inset = r - isqrt(r * r - dy * dy);
            self.hline(&visible, rect.x1 + inset, rect.x2 - inset, y, color);
        }
        Ok(())
    }

    fn draw_circle(
        &mut self,
        clip: &Rect,
        center: Point,
        radius: u16,
        color: Color,
    ) -> Result<(), DisplayError> {
        let Some(visible) = Self::visible(clip) else {
            return Ok(());
        };

        // Midpoint circle, one octant mirrored eight ways
        let mut x = radius as i32;
        let mut y = 0;
        let mut err = 1 - x;
        while x >= y {
            for (dx, dy) in [
                (x, y),
                (y, x),
                (-y, x),
                (-x, y),
                (-x, -y),
                (-y, -x),
                (y, -x),
                (x, -y),
            ] {
                self.plot(&visible, center.x + dx, center.y + dy, color);
            }
            y += 1;
            if err < 0 {
                err += 2 * y + 1;
            } else {
                x -= 1;
                err += 2 * (y - x) + 1;
            }
        }
        Ok(())
    }

    fn draw_bitmap(
        &mut self,
        clip: &Rect,
        origin: Point,
        bitmap: &Bitmap<'_>,
        color: Color,
    ) -> Result<(), DisplayError> {
        let Some(visible) = Self::visible(clip) else {
            return Ok(());
        };
        let extent = Rect::with_size(origin, bitmap.width() as i32, bitmap.height() as i32);
        if extent.intersection(&visible).is_none() {
            return Ok(());
        }
        for (bx, by) in bitmap.set_pixels() {
            self.plot(&visible, origin.x + bx as i32, origin.y + by as i32, color);
        }
        Ok(())
    }
}

/// Floor square root; 0 for non-positive input
fn isqrt(n: i32) -> i32 {
    if n <= 0 {
        return 0;
    }
    let mut x = n;
    let mut y = (x + 1) / 2;
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}
