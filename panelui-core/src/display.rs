//! Display surface
//!
//! [`Display`] owns a backend, the active font and the draw area, and
//! implements every layout-level operation once on top of the raw
//! [`DisplayBackend`] primitives: default clips, rectangle-relative text,
//! centering, word wrapping and independent clip regions.
//!
//! Coordinates are not validated. Out-of-range values, inverted
//! rectangles and empty strings go to the backend as computed.

use crate::asset::{Bitmap, Font, FontId, FontSet};
use crate::color::Color;
use crate::config::{DisplayConfig, Rotation};
use crate::geometry::{Point, Rect};
use crate::layout::text::TEXT_INSET;
use crate::layout::TextLayout;
use crate::traits::{DisplayBackend, DisplayError};

/// A drawing surface over a panel backend
pub struct Display<'f, B> {
    backend: B,
    config: DisplayConfig,
    fonts: FontSet<'f>,
    font: Option<Font<'f>>,
}

impl<'f, B: DisplayBackend> Display<'f, B> {
    /// Create a display; the font named in `config` becomes active if it
    /// is registered in `fonts`
    pub fn new(backend: B, config: DisplayConfig, fonts: FontSet<'f>) -> Self {
        let font = fonts.get(config.font).copied();
        Self {
            backend,
            config,
            fonts,
            font,
        }
    }

    /// Initialize the backend and push the configured rotation and font
    pub fn begin(&mut self) -> Result<(), DisplayError> {
        self.backend.begin()?;
        self.backend.set_rotation(self.config.rotation)?;
        if let Some(font) = &self.font {
            self.backend.set_font(font)?;
        }
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "Display ready: area {}, font {}",
            self.config.draw_area,
            self.config.font
        );
        Ok(())
    }

    /// Change the panel orientation
    pub fn set_rotation(&mut self, rotation: Rotation) -> Result<(), DisplayError> {
        self.backend.set_rotation(rotation)?;
        self.config.rotation = rotation;
        Ok(())
    }

    /// Fill the whole panel
    pub fn clear(&mut self, color: Color) -> Result<(), DisplayError> {
        self.backend.clear(color)
    }

    /// Select the active font
    ///
    /// Fails with [`DisplayError::FontUnavailable`] if `id` was not
    /// registered; the previous font stays active.
    pub fn set_font(&mut self, id: FontId) -> Result<(), DisplayError> {
        let font = *self.fonts.get(id).ok_or(DisplayError::FontUnavailable)?;
        self.backend.set_font(&font)?;
        self.font = Some(font);
        self.config.font = id;
        Ok(())
    }

    /// The active font, if one is registered
    pub fn font(&self) -> Option<&Font<'f>> {
        self.font.as_ref()
    }

    /// Line height of the active font; 0 without a font
    pub fn font_height(&self) -> i32 {
        self.font
            .as_ref()
            .map(|font| self.backend.font_height(font))
            .unwrap_or(0)
    }

    /// Single-line width of `text` in the active font; 0 without a font
    pub fn string_width(&self, text: &str) -> i32 {
        self.font
            .as_ref()
            .map(|font| self.backend.string_width(font, text))
            .unwrap_or(0)
    }

    /// Height of `text` wrapped inside `rect`
    ///
    /// Uses `rect` as the clip and its inset top-left corner as origin,
    /// exactly as [`Display::draw_text_in`] would lay it out.
    pub fn string_height(&self, rect: Rect, text: &str) -> i32 {
        self.font
            .as_ref()
            .map(|font| {
                self.backend
                    .string_total_height(font, &rect, rect.p1() + TEXT_INSET, text)
            })
            .unwrap_or(0)
    }

    /// Draw `text` as described by `layout`
    ///
    /// Without an active font nothing is drawn.
    pub fn text(&mut self, text: &str, layout: TextLayout, color: Color) -> Result<(), DisplayError> {
        let Some(font) = self.font else {
            #[cfg(feature = "defmt")]
            defmt::trace!("No active font, skipping text");
            return Ok(());
        };

        let resolved = layout.resolve(
            self.config.draw_area,
            self.backend.font_height(&font),
            || self.backend.string_width(&font, text),
        );

        if resolved.wrap {
            self.backend
                .draw_text_wrapped(&resolved.clip, resolved.origin, text, &font, color)
        } else {
            self.backend
                .draw_text(&resolved.clip, resolved.origin, text, &font, color)
        }
    }

    /// Text at `p`, clipped to the draw area
    pub fn draw_text_at(&mut self, p: Point, text: &str, color: Color) -> Result<(), DisplayError> {
        self.text(text, TextLayout::at(p), color)
    }

    /// Text at `p`, clipped to `clip`, optionally wrapped
    pub fn draw_text_clipped(
        &mut self,
        clip: Rect,
        p: Point,
        text: &str,
        wrap: bool,
        color: Color,
    ) -> Result<(), DisplayError> {
        self.text(text, TextLayout::at(p).clipped_to(clip).with_wrap(wrap), color)
    }

    /// Text inside `rect`, clipped to it, optionally wrapped
    pub fn draw_text_in(
        &mut self,
        rect: Rect,
        text: &str,
        wrap: bool,
        color: Color,
    ) -> Result<(), DisplayError> {
        self.text(text, TextLayout::in_rect(rect).with_wrap(wrap), color)
    }

    /// Text anchored to `rect` but clipped to a separate `clip`
    pub fn draw_text_in_clipped(
        &mut self,
        clip: Rect,
        rect: Rect,
        text: &str,
        wrap: bool,
        color: Color,
    ) -> Result<(), DisplayError> {
        self.text(
            text,
            TextLayout::in_rect(rect).clipped_to(clip).with_wrap(wrap),
            color,
        )
    }

    /// One line centered in `rect`, clipped to the draw area
    pub fn draw_text_centered(&mut self, rect: Rect, text: &str, color: Color) -> Result<(), DisplayError> {
        self.text(text, TextLayout::centered_in(rect), color)
    }

    /// One line centered in `rect`, clipped to `clip`
    pub fn draw_text_centered_clipped(
        &mut self,
        clip: Rect,
        rect: Rect,
        text: &str,
        color: Color,
    ) -> Result<(), DisplayError> {
        self.text(text, TextLayout::centered_in(rect).clipped_to(clip), color)
    }

    /// Outline or fill `rect`; `clip` defaults to the draw area
    ///
    /// The clip is independent of the shape, so a rectangle can be drawn
    /// partly outside a visible pane.
    pub fn rectangle(
        &mut self,
        rect: Rect,
        filled: bool,
        clip: Option<Rect>,
        color: Color,
    ) -> Result<(), DisplayError> {
        let clip = self.clip_or_area(clip);
        if filled {
            self.backend.fill_rect(&clip, &rect, color)
        } else {
            self.backend.draw_rect(&clip, &rect, color)
        }
    }

    /// Rectangle outline
    pub fn draw_rect(&mut self, rect: Rect, color: Color) -> Result<(), DisplayError> {
        self.rectangle(rect, false, None, color)
    }

    /// Filled rectangle
    pub fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), DisplayError> {
        self.rectangle(rect, true, None, color)
    }

    /// Filled rectangle with rounded corners
    pub fn fill_round_rect(
        &mut self,
        rect: Rect,
        radius: u16,
        clip: Option<Rect>,
        color: Color,
    ) -> Result<(), DisplayError> {
        let clip = self.clip_or_area(clip);
        self.backend.fill_round_rect(&clip, &rect, radius, color)
    }

    /// Circle outline
    pub fn draw_circle(
        &mut self,
        center: Point,
        radius: u16,
        clip: Option<Rect>,
        color: Color,
    ) -> Result<(), DisplayError> {
        let clip = self.clip_or_area(clip);
        self.backend.draw_circle(&clip, center, radius, color)
    }

    /// Single pixel
    pub fn draw_pixel(&mut self, p: Point, color: Color) -> Result<(), DisplayError> {
        let clip = self.config.draw_area;
        self.backend.draw_pixel(&clip, p, color)
    }

    /// Bitmap with its top-left at `p`, clipped to the draw area
    pub fn draw_bitmap(&mut self, p: Point, bitmap: &Bitmap<'_>, color: Color) -> Result<(), DisplayError> {
        let clip = self.config.draw_area;
        self.backend.draw_bitmap(&clip, p, bitmap, color)
    }

    /// Bitmap with its top-left at `p`, clipped to `clip`
    pub fn draw_bitmap_clipped(
        &mut self,
        clip: Rect,
        p: Point,
        bitmap: &Bitmap<'_>,
        color: Color,
    ) -> Result<(), DisplayError> {
        self.backend.draw_bitmap(&clip, p, bitmap, color)
    }

    /// Current configuration
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Full drawable surface
    pub fn draw_area(&self) -> Rect {
        self.config.draw_area
    }

    /// Change the default clip used by unclipped draws
    pub fn set_draw_area(&mut self, area: Rect) {
        self.config.draw_area = area;
    }

    /// Register or replace a font face
    pub fn register_font(&mut self, id: FontId, font: Font<'f>) {
        self.fonts.insert(id, font);
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

    fn clip_or_area(&self, clip: Option<Rect>) -> Rect {
        clip.unwrap_or(self.config.draw_area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::font::tests::{block_font_table, BLOCK_FONT_DATA};
    use crate::asset::{GlyphMetrics, GLYPH_COUNT};
    use heapless::{String, Vec};

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Fill(Rect, Rect),
        Outline(Rect, Rect),
        Bitmap(Rect, Point, u16),
        Text(Rect, Point, String<32>),
        Wrapped(Rect, Point, String<32>),
        Rotation(Rotation),
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op, 32>,
        fail: bool,
    }

    impl Recorder {
        fn push(&mut self, op: Op) -> Result<(), DisplayError> {
            if self.fail {
                return Err(DisplayError::Communication);
            }
            self.ops.push(op).map_err(|_| DisplayError::BufferOverflow)
        }
    }

    fn s(text: &str) -> String<32> {
        String::try_from(text).unwrap()
    }

    impl DisplayBackend for Recorder {
        fn set_rotation(&mut self, rotation: Rotation) -> Result<(), DisplayError> {
            self.push(Op::Rotation(rotation))
        }

        fn fill_rect(&mut self, clip: &Rect, rect: &Rect, _color: Color) -> Result<(), DisplayError> {
            self.push(Op::Fill(*clip, *rect))
        }

        fn draw_rect(&mut self, clip: &Rect, rect: &Rect, _color: Color) -> Result<(), DisplayError> {
            self.push(Op::Outline(*clip, *rect))
        }

        fn draw_bitmap(
            &mut self,
            clip: &Rect,
            origin: Point,
            bitmap: &Bitmap<'_>,
            _color: Color,
        ) -> Result<(), DisplayError> {
            self.push(Op::Bitmap(*clip, origin, bitmap.width()))
        }

        fn draw_text(
            &mut self,
            clip: &Rect,
            origin: Point,
            text: &str,
            _font: &Font<'_>,
            _color: Color,
        ) -> Result<(), DisplayError> {
            self.push(Op::Text(*clip, origin, s(text)))
        }

        fn draw_text_wrapped(
            &mut self,
            clip: &Rect,
            origin: Point,
            text: &str,
            _font: &Font<'_>,
            _color: Color,
        ) -> Result<(), DisplayError> {
            self.push(Op::Wrapped(*clip, origin, s(text)))
        }
    }

    /// Backend relying on every default
    struct Inert;

    impl DisplayBackend for Inert {}

    const AREA: Rect = Rect::new(0, 0, 319, 239);

    fn wide_table() -> [GlyphMetrics; GLYPH_COUNT] {
        [GlyphMetrics::new(7, 0, 10); GLYPH_COUNT]
    }

    #[test]
    fn test_point_text_uses_draw_area_and_inset() {
        let table = block_font_table();
        let fonts = FontSet::new().with(FontId::Arial8, Font::new(&BLOCK_FONT_DATA, &table));
        let mut display = Display::new(Recorder::default(), DisplayConfig::default(), fonts);

        display.draw_text_at(Point::new(5, 5), "hi", Color::WHITE).unwrap();
        display
            .draw_text_clipped(Rect::new(0, 0, 50, 50), Point::new(5, 5), "hi", true, Color::WHITE)
            .unwrap();

        assert_eq!(
            &display.backend().ops[..],
            &[
                Op::Text(AREA, Point::new(6, 6), s("hi")),
                Op::Wrapped(Rect::new(0, 0, 50, 50), Point::new(6, 6), s("hi")),
            ]
        );
    }

    #[test]
    fn test_rect_text_variants() {
        let table = block_font_table();
        let fonts = FontSet::new().with(FontId::Arial8, Font::new(&BLOCK_FONT_DATA, &table));
        let mut display = Display::new(Recorder::default(), DisplayConfig::default(), fonts);
        let pane = Rect::new(10, 10, 100, 40);
        let clip = Rect::new(0, 0, 60, 60);

        display.draw_text_in(pane, "a", false, Color::WHITE).unwrap();
        display.draw_text_in(pane, "b", true, Color::WHITE).unwrap();
        display.draw_text_in_clipped(clip, pane, "c", true, Color::WHITE).unwrap();

        assert_eq!(
            &display.backend().ops[..],
            &[
                Op::Text(pane, Point::new(11, 11), s("a")),
                Op::Wrapped(pane, Point::new(11, 11), s("b")),
                Op::Wrapped(clip, Point::new(11, 11), s("c")),
            ]
        );
    }

    #[test]
    fn test_centered_text() {
        let table = block_font_table();
        let fonts = FontSet::new().with(FontId::Arial8, Font::new(&BLOCK_FONT_DATA, &table));
        let mut display = Display::new(Recorder::default(), DisplayConfig::default(), fonts);
        let button = Rect::new(0, 0, 100, 20);

        // "OK" = 2 * (4 + 1) = 10px wide, font height 6
        display.draw_text_centered(button, "OK", Color::WHITE).unwrap();
        display
            .draw_text_centered_clipped(button, button, "OK", Color::WHITE)
            .unwrap();

        assert_eq!(
            &display.backend().ops[..],
            &[
                Op::Text(AREA, Point::new(45, 8), s("OK")),
                Op::Text(button, Point::new(45, 8), s("OK")),
            ]
        );
    }

    #[test]
    fn test_rectangles_with_independent_clip() {
        let mut display = Display::new(Recorder::default(), DisplayConfig::default(), FontSet::new());
        let shape = Rect::new(-20, 10, 40, 30);
        let pane = Rect::new(0, 0, 30, 239);

        display.draw_rect(shape, Color::RED).unwrap();
        display.fill_rect(shape, Color::RED).unwrap();
        display.rectangle(shape, true, Some(pane), Color::RED).unwrap();
        display.rectangle(shape, false, Some(pane), Color::RED).unwrap();

        assert_eq!(
            &display.backend().ops[..],
            &[
                Op::Outline(AREA, shape),
                Op::Fill(AREA, shape),
                Op::Fill(pane, shape),
                Op::Outline(pane, shape),
            ]
        );
    }

    #[test]
    fn test_bitmap_dispatch() {
        const ICON: [u8; 4] = [0xFF; 4];
        let icon = Bitmap::new(2, 2, &ICON);
        let mut display = Display::new(Recorder::default(), DisplayConfig::default(), FontSet::new());
        let clip = Rect::new(0, 0, 10, 10);

        display.draw_bitmap(Point::new(3, 4), &icon, Color::WHITE).unwrap();
        display
            .draw_bitmap_clipped(clip, Point::new(3, 4), &icon, Color::WHITE)
            .unwrap();

        assert_eq!(
            &display.backend().ops[..],
            &[
                Op::Bitmap(AREA, Point::new(3, 4), 16),
                Op::Bitmap(clip, Point::new(3, 4), 16),
            ]
        );
    }

    #[test]
    fn test_switching_font_changes_width() {
        let narrow = block_font_table();
        let wide = wide_table();
        let fonts = FontSet::new()
            .with(FontId::Arial8, Font::new(&BLOCK_FONT_DATA, &narrow))
            .with(FontId::Arial16, Font::new(&BLOCK_FONT_DATA, &wide));
        let mut display = Display::new(Inert, DisplayConfig::default(), fonts);

        assert_eq!(display.string_width("abc"), 15);
        assert_eq!(display.font_height(), 6);

        display.set_font(FontId::Arial16).unwrap();
        assert_eq!(display.string_width("abc"), 24);
        assert_eq!(display.font_height(), 10);
        assert_eq!(display.config().font, FontId::Arial16);
    }

    #[test]
    fn test_unregistered_font_keeps_previous() {
        let table = block_font_table();
        let fonts = FontSet::new().with(FontId::Arial8, Font::new(&BLOCK_FONT_DATA, &table));
        let mut display = Display::new(Inert, DisplayConfig::default(), fonts);

        assert_eq!(display.set_font(FontId::Arial14), Err(DisplayError::FontUnavailable));
        assert_eq!(display.config().font, FontId::Arial8);
        assert_eq!(display.string_width("a"), 5);

        display.register_font(FontId::Arial14, Font::new(&BLOCK_FONT_DATA, &table));
        assert_eq!(display.set_font(FontId::Arial14), Ok(()));
    }

    #[test]
    fn test_string_height_wraps_inside_rect() {
        let table = block_font_table();
        let fonts = FontSet::new().with(FontId::Arial8, Font::new(&BLOCK_FONT_DATA, &table));
        let display = Display::new(Inert, DisplayConfig::default(), fonts);

        // Origin x = 1; "ab cd" = 25px -> 26 > 20 wraps, 3 lines of 6px
        let rect = Rect::new(0, 0, 20, 100);
        assert_eq!(display.string_height(rect, "ab cd ef"), 18);
        assert_eq!(display.string_height(Rect::new(0, 0, 200, 100), "ab cd ef"), 6);
    }

    #[test]
    fn test_without_font_text_is_skipped() {
        let mut display = Display::new(Recorder::default(), DisplayConfig::default(), FontSet::new());
        assert!(display.font().is_none());
        display.draw_text_at(Point::ORIGIN, "lost", Color::WHITE).unwrap();
        assert!(display.backend().ops.is_empty());
        assert_eq!(display.string_width("lost"), 0);
        assert_eq!(display.string_height(AREA, "lost"), 0);
    }

    #[test]
    fn test_inert_backend_never_fails() {
        let table = block_font_table();
        let fonts = FontSet::new().with(FontId::Arial8, Font::new(&BLOCK_FONT_DATA, &table));
        let mut display = Display::new(Inert, DisplayConfig::default(), fonts);

        display.begin().unwrap();
        display.clear(Color::BLACK).unwrap();
        display.fill_round_rect(AREA, 4, None, Color::WHITE).unwrap();
        display.draw_circle(Point::new(10, 10), 5, None, Color::WHITE).unwrap();
        display.draw_pixel(Point::new(1, 1), Color::WHITE).unwrap();
        display.draw_text_in(AREA, "all defaults", true, Color::WHITE).unwrap();
    }

    #[test]
    fn test_backend_errors_propagate() {
        let mut display = Display::new(
            Recorder {
                fail: true,
                ..Default::default()
            },
            DisplayConfig::default(),
            FontSet::new(),
        );
        assert_eq!(display.draw_rect(AREA, Color::WHITE), Err(DisplayError::Communication));
        assert_eq!(display.set_rotation(Rotation::Flipped), Err(DisplayError::Communication));
        assert_eq!(display.config().rotation, Rotation::Normal);
    }

    #[test]
    fn test_default_text_blits_glyphs() {
        struct Blits(Vec<(Rect, Point), 8>);

        impl DisplayBackend for Blits {
            fn draw_bitmap(
                &mut self,
                clip: &Rect,
                origin: Point,
                _bitmap: &Bitmap<'_>,
                _color: Color,
            ) -> Result<(), DisplayError> {
                self.0
                    .push((*clip, origin))
                    .map_err(|_| DisplayError::BufferOverflow)
            }
        }

        let table = block_font_table();
        let fonts = FontSet::new().with(FontId::Arial8, Font::new(&BLOCK_FONT_DATA, &table));
        let mut display = Display::new(Blits(Vec::new()), DisplayConfig::default(), fonts);

        // Clip ends at x=8: 'a' and ' ' are blitted, 'b' starts past it
        let clip = Rect::new(0, 0, 8, 20);
        display
            .draw_text_clipped(clip, Point::new(-1, -1), "a b", false, Color::WHITE)
            .unwrap();

        let blits = &display.backend().0;
        assert_eq!(
            &blits[..],
            &[
                (Rect::new(0, 0, 3, 5), Point::new(0, 0)),
                // ' ' has a block glyph in the test table too
                (Rect::new(5, 0, 8, 5), Point::new(5, 0)),
            ]
        );
    }

    #[test]
    fn test_wrapped_text_stops_below_clip() {
        struct Lines(Vec<Point, 8>);

        impl DisplayBackend for Lines {
            fn draw_text(
                &mut self,
                _clip: &Rect,
                origin: Point,
                _text: &str,
                _font: &Font<'_>,
                _color: Color,
            ) -> Result<(), DisplayError> {
                self.0.push(origin).map_err(|_| DisplayError::BufferOverflow)
            }
        }

        let table = block_font_table();
        let fonts = FontSet::new().with(FontId::Arial8, Font::new(&BLOCK_FONT_DATA, &table));
        let mut display = Display::new(Lines(Vec::new()), DisplayConfig::default(), fonts);

        // Lines start at y = 1, 7, 13; the clip ends at y = 8
        display
            .draw_text_in(Rect::new(0, 0, 20, 8), "ab cd ef", true, Color::WHITE)
            .unwrap();

        assert_eq!(&display.backend().0[..], &[Point::new(1, 1), Point::new(1, 7)]);
    }
}
