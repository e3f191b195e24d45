//! Display backend trait
//!
//! The raw drawing contract a panel driver implements. Every primitive
//! receives the clip rectangle already resolved by the caller: unclipped
//! draws pass the full draw area, so there is a single primitive set
//! instead of a clipped and an unclipped copy of each.
//!
//! All methods have defaults. Drawing primitives default to doing nothing
//! and returning `Ok(())`; a backend that implements none of them draws
//! nothing and never fails. Text defaults render glyph by glyph through
//! [`DisplayBackend::draw_bitmap`], and the metric queries default to the
//! font descriptor, so a backend that can blit bitmaps gets text for free.

use crate::asset::{Bitmap, Font};
use crate::color::Color;
use crate::config::Rotation;
use crate::geometry::{Point, Rect};
use crate::layout::{wrap_lines, wrapped_height};

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with the panel
    Communication,
    /// Coordinates the backend cannot address
    InvalidCoordinates,
    /// Panel not initialized
    NotInitialized,
    /// Buffer overflow
    BufferOverflow,
    /// Requested font is not registered
    FontUnavailable,
}

/// Raw drawing contract
pub trait DisplayBackend {
    /// Initialize the panel
    fn begin(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }

    /// Change panel orientation
    fn set_rotation(&mut self, _rotation: Rotation) -> Result<(), DisplayError> {
        Ok(())
    }

    /// Fill the whole panel with `color`
    fn clear(&mut self, _color: Color) -> Result<(), DisplayError> {
        Ok(())
    }

    /// Notification that the active font changed
    ///
    /// Text primitives receive the font on every call; backends that keep
    /// a hardware font register can update it here.
    fn set_font(&mut self, _font: &Font<'_>) -> Result<(), DisplayError> {
        Ok(())
    }

    /// Set one pixel if it lies inside `clip`
    fn draw_pixel(&mut self, _clip: &Rect, _p: Point, _color: Color) -> Result<(), DisplayError> {
        Ok(())
    }

    /// Fill `rect`, restricted to `clip`
    fn fill_rect(&mut self, _clip: &Rect, _rect: &Rect, _color: Color) -> Result<(), DisplayError> {
        Ok(())
    }

    /// Draw the one-pixel outline of `rect`, restricted to `clip`
    fn draw_rect(&mut self, _clip: &Rect, _rect: &Rect, _color: Color) -> Result<(), DisplayError> {
        Ok(())
    }

    /// Fill `rect` with corners rounded to `radius`, restricted to `clip`
    fn fill_round_rect(
        &mut self,
        _clip: &Rect,
        _rect: &Rect,
        _radius: u16,
        _color: Color,
    ) -> Result<(), DisplayError> {
        Ok(())
    }

    /// Draw a circle outline, restricted to `clip`
    fn draw_circle(
        &mut self,
        _clip: &Rect,
        _center: Point,
        _radius: u16,
        _color: Color,
    ) -> Result<(), DisplayError> {
        Ok(())
    }

    /// Blit a 1bpp bitmap with its top-left at `origin`
    ///
    /// Set bits are painted with `color`; clear bits are left untouched.
    fn draw_bitmap(
        &mut self,
        _clip: &Rect,
        _origin: Point,
        _bitmap: &Bitmap<'_>,
        _color: Color,
    ) -> Result<(), DisplayError> {
        Ok(())
    }

    /// Draw one line of text starting at `origin`, no wrapping
    fn draw_text(
        &mut self,
        clip: &Rect,
        origin: Point,
        text: &str,
        font: &Font<'_>,
        color: Color,
    ) -> Result<(), DisplayError> {
        let mut x = origin.x;
        for c in text.chars() {
            if x > clip.x2 {
                break;
            }
            if let Some(glyph) = font.glyph(c) {
                // Trim the row padding so it does not paint past the glyph
                let bitmap = glyph.bitmap;
                let glyph_clip = Rect::new(
                    x,
                    origin.y,
                    x + glyph.metrics.width as i32 - 1,
                    origin.y + bitmap.height() as i32 - 1,
                );
                if let Some(visible) = glyph_clip.intersection(clip) {
                    self.draw_bitmap(&visible, Point::new(x, origin.y), &bitmap, color)?;
                }
            }
            x += font.advance(c);
        }
        Ok(())
    }

    /// Draw text breaking lines on word boundaries at the clip's right edge
    ///
    /// Line breaks are measured with the font descriptor; a backend that
    /// overrides [`DisplayBackend::string_width`] should override this too.
    fn draw_text_wrapped(
        &mut self,
        clip: &Rect,
        origin: Point,
        text: &str,
        font: &Font<'_>,
        color: Color,
    ) -> Result<(), DisplayError> {
        let line_height = self.font_height(font);
        for line in wrap_lines(text, origin, clip, line_height, |s| font.string_width(s)) {
            if line.origin.y > clip.y2 {
                break;
            }
            self.draw_text(clip, line.origin, line.text, font, color)?;
        }
        Ok(())
    }

    /// Line height of `font`
    fn font_height(&self, font: &Font<'_>) -> i32 {
        font.height()
    }

    /// Width of `text` on a single line
    fn string_width(&self, font: &Font<'_>, text: &str) -> i32 {
        font.string_width(text)
    }

    /// Height of `text` once wrapped inside `clip` starting at `origin`
    fn string_total_height(&self, font: &Font<'_>, clip: &Rect, origin: Point, text: &str) -> i32 {
        wrapped_height(text, origin, clip, self.font_height(font), |s| {
            self.string_width(font, s)
        })
    }
}
