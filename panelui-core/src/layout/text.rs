//! Text placement
//!
//! Every text draw reduces to a clip rectangle, an anchor point and a wrap
//! flag. [`TextLayout`] describes the request; [`TextLayout::resolve`]
//! turns it into those three values.

use crate::geometry::{Point, Rect};

/// Inset applied to explicit anchors and rectangle corners
pub const TEXT_INSET: Point = Point::new(1, 1);

/// Where the text is anchored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Anchor {
    /// Explicit point, inset by one pixel
    At(Point),
    /// Top-left corner of a box, inset by one pixel; the box is also the
    /// default clip
    TopLeft(Rect),
    /// Single line centered in a box
    Centered(Rect),
}

/// A text placement request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextLayout {
    anchor: Anchor,
    clip: Option<Rect>,
    wrap: bool,
}

/// Final clip, origin and wrap mode of a text draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ResolvedText {
    pub clip: Rect,
    pub origin: Point,
    pub wrap: bool,
}

impl TextLayout {
    /// Text starting at `p`
    pub const fn at(p: Point) -> Self {
        Self {
            anchor: Anchor::At(p),
            clip: None,
            wrap: false,
        }
    }

    /// Text inside `rect`, starting at its top-left corner and clipped to it
    pub const fn in_rect(rect: Rect) -> Self {
        Self {
            anchor: Anchor::TopLeft(rect),
            clip: None,
            wrap: false,
        }
    }

    /// A single line centered in `rect`
    pub const fn centered_in(rect: Rect) -> Self {
        Self {
            anchor: Anchor::Centered(rect),
            clip: None,
            wrap: false,
        }
    }

    /// Clip to `clip` instead of the default
    pub const fn clipped_to(mut self, clip: Rect) -> Self {
        self.clip = Some(clip);
        self
    }

    /// Break lines on word boundaries at the clip's right edge
    pub const fn wrapped(self) -> Self {
        self.with_wrap(true)
    }

    /// Set the wrap mode
    pub const fn with_wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    pub const fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// Resolve against the display's draw area and the active font
    ///
    /// `text_width` is only called for centered text. Centering lays out
    /// one line, so the wrap flag is dropped for it.
    pub fn resolve(
        &self,
        draw_area: Rect,
        font_height: i32,
        text_width: impl FnOnce() -> i32,
    ) -> ResolvedText {
        match self.anchor {
            Anchor::At(p) => ResolvedText {
                clip: self.clip.unwrap_or(draw_area),
                origin: p + TEXT_INSET,
                wrap: self.wrap,
            },
            Anchor::TopLeft(r) => ResolvedText {
                clip: self.clip.unwrap_or(r),
                origin: r.p1() + TEXT_INSET,
                wrap: self.wrap,
            },
            Anchor::Centered(r) => ResolvedText {
                clip: self.clip.unwrap_or(draw_area),
                origin: centered_origin(&r, text_width(), font_height),
                wrap: false,
            },
        }
    }
}

/// Origin that centers a `text_width` x `font_height` line in `r`
///
/// The vertical position carries a one-pixel downward bias.
pub fn centered_origin(r: &Rect, text_width: i32, font_height: i32) -> Point {
    Point::new(
        r.x1 + (r.width() / 2 - text_width / 2),
        r.y1 + (r.height() / 2 - font_height / 2) + 1,
    )
}
