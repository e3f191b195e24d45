//! Borrowed views over statically provisioned image and font tables
//!
//! Both asset kinds are 1 bit per pixel, row-major, most significant bit
//! first, each row padded to a whole byte. The tables themselves live in
//! the application's flash; nothing here copies or validates them beyond
//! bounds-checked indexing.

pub mod bitmap;
pub mod font;

pub use bitmap::Bitmap;
pub use font::{Font, FontId, FontSet, Glyph, GlyphMetrics, GLYPH_COUNT, GLYPH_SPACING};
