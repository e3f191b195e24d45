//! Bitmap fonts
//!
//! A font is a glyph blob plus a descriptor of 95 entries, one per
//! printable ASCII character (0x20 ' ' through 0x7E '~'). Each entry gives
//! the glyph width in pixels, the byte offset of its bitmap in the blob and
//! its height in rows.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::bitmap::Bitmap;

/// Number of glyphs in a font descriptor
pub const GLYPH_COUNT: usize = 95;

/// First character covered by the descriptor
pub const FIRST_CHAR: u8 = 0x20;

/// Blank columns inserted after every glyph
pub const GLYPH_SPACING: i32 = 1;

/// Per-glyph descriptor entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GlyphMetrics {
    /// Glyph width in pixels
    pub width: u8,
    /// Byte offset of the glyph bitmap in the font blob
    pub offset: u16,
    /// Glyph height in rows
    pub height: u8,
}

impl GlyphMetrics {
    pub const fn new(width: u8, offset: u16, height: u8) -> Self {
        Self {
            width,
            offset,
            height,
        }
    }

    /// Bytes per bitmap row
    pub const fn row_stride(&self) -> u16 {
        (self.width as u16 + 7) / 8
    }
}

/// One renderable character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph<'a> {
    pub metrics: GlyphMetrics,
    pub bitmap: Bitmap<'a>,
}

impl Glyph<'_> {
    /// Horizontal distance to the next glyph origin
    pub const fn advance(&self) -> i32 {
        self.metrics.width as i32 + GLYPH_SPACING
    }
}

/// A bitmap font borrowed from external storage
#[derive(Debug, Clone, Copy)]
pub struct Font<'a> {
    data: &'a [u8],
    glyphs: &'a [GlyphMetrics; GLYPH_COUNT],
    height: u8,
}

impl<'a> Font<'a> {
    /// Wrap a glyph blob and its descriptor
    ///
    /// The line height is the tallest glyph in the descriptor.
    pub const fn new(data: &'a [u8], glyphs: &'a [GlyphMetrics; GLYPH_COUNT]) -> Self {
        let mut height = 0;
        let mut i = 0;
        while i < GLYPH_COUNT {
            if glyphs[i].height > height {
                height = glyphs[i].height;
            }
            i += 1;
        }
        Self {
            data,
            glyphs,
            height,
        }
    }

    /// Line height in pixels
    pub const fn height(&self) -> i32 {
        self.height as i32
    }

    /// Descriptor entry for `c`, if it is printable ASCII
    pub fn metrics(&self, c: char) -> Option<GlyphMetrics> {
        let code = c as u32;
        if !(FIRST_CHAR as u32..FIRST_CHAR as u32 + GLYPH_COUNT as u32).contains(&code) {
            return None;
        }
        Some(self.glyphs[(code - FIRST_CHAR as u32) as usize])
    }

    /// Glyph for `c`, or `None` for non-printable characters and
    /// descriptor entries pointing past the end of the blob
    pub fn glyph(&self, c: char) -> Option<Glyph<'a>> {
        let metrics = self.metrics(c)?;
        let start = metrics.offset as usize;
        let len = metrics.row_stride() as usize * metrics.height as usize;
        let data = self.data.get(start..start + len)?;
        Some(Glyph {
            metrics,
            bitmap: Bitmap::new(metrics.row_stride(), metrics.height as u16, data),
        })
    }

    /// Horizontal advance of `c`; zero for characters without a glyph
    pub fn advance(&self, c: char) -> i32 {
        self.metrics(c)
            .map(|m| m.width as i32 + GLYPH_SPACING)
            .unwrap_or(0)
    }

    /// Width of a single line of text
    pub fn string_width(&self, text: &str) -> i32 {
        text.chars().map(|c| self.advance(c)).sum()
    }
}

/// The built-in faces an application can link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FontId {
    #[default]
    Arial8,
    Arial10,
    Arial12,
    Arial14,
    Arial16,
    Arial8Bold,
    Arial10Bold,
    Arial12Bold,
}

impl FontId {
    /// Number of font identifiers
    pub const COUNT: usize = 8;

    /// All identifiers in table order
    pub const ALL: [FontId; Self::COUNT] = [
        FontId::Arial8,
        FontId::Arial10,
        FontId::Arial12,
        FontId::Arial14,
        FontId::Arial16,
        FontId::Arial8Bold,
        FontId::Arial10Bold,
        FontId::Arial12Bold,
    ];

    /// Table index
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Identifier for a table index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// The fonts linked into the application, looked up by [`FontId`]
///
/// Only registered faces can be selected; the rest cost nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct FontSet<'a> {
    faces: [Option<Font<'a>>; FontId::COUNT],
}

impl<'a> FontSet<'a> {
    /// An empty set
    pub const fn new() -> Self {
        Self {
            faces: [None; FontId::COUNT],
        }
    }

    /// Register `font` under `id`, replacing any previous face
    pub const fn with(mut self, id: FontId, font: Font<'a>) -> Self {
        self.faces[id as usize] = Some(font);
        self
    }

    /// Register `font` under `id` in place
    pub fn insert(&mut self, id: FontId, font: Font<'a>) {
        self.faces[id.index()] = Some(font);
    }

    /// Face registered under `id`
    pub fn get(&self, id: FontId) -> Option<&Font<'a>> {
        self.faces[id.index()].as_ref()
    }

    /// Whether `id` has a registered face
    pub fn contains(&self, id: FontId) -> bool {
        self.faces[id.index()].is_some()
    }
}
