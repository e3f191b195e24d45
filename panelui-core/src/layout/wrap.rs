//! Word wrapping
//!
//! Words are maximal runs of characters other than ' ' and '\n'. A line
//! collects words until the next one would carry the line past the clip's
//! right edge; '\n' always ends a line. A word that does not fit even on
//! an empty line is placed alone and overflows, leaving the backend to
//! clip it.

use crate::geometry::{Point, Rect};

/// One laid-out line: where it starts and which slice of the input it shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'t> {
    pub origin: Point,
    pub text: &'t str,
}

/// Iterator over the lines of wrapped text
pub struct WrapLines<'t, F> {
    text: &'t str,
    pos: usize,
    x: i32,
    y: i32,
    right: i32,
    line_height: i32,
    measure: F,
}

/// Lay out `text` from `origin`, breaking before the clip's right edge
///
/// `measure` returns the pixel width of a single-line slice; lines advance
/// by `line_height`.
pub fn wrap_lines<'t, F>(
    text: &'t str,
    origin: Point,
    clip: &Rect,
    line_height: i32,
    measure: F,
) -> WrapLines<'t, F>
where
    F: FnMut(&str) -> i32,
{
    WrapLines {
        text,
        pos: 0,
        x: origin.x,
        y: origin.y,
        right: clip.x2,
        line_height,
        measure,
    }
}

/// Total height of `text` wrapped inside `clip`
pub fn wrapped_height<F>(text: &str, origin: Point, clip: &Rect, line_height: i32, measure: F) -> i32
where
    F: FnMut(&str) -> i32,
{
    wrap_lines(text, origin, clip, line_height, measure).count() as i32 * line_height
}

impl<'t, F> Iterator for WrapLines<'t, F>
where
    F: FnMut(&str) -> i32,
{
    type Item = Line<'t>;

    fn next(&mut self) -> Option<Line<'t>> {
        let bytes = self.text.as_bytes();
        let len = bytes.len();
        if self.pos >= len {
            return None;
        }

        let mut i = self.pos;
        while i < len && bytes[i] == b' ' {
            i += 1;
        }
        let start = i;
        let mut end = i;
        let mut exhausted = false;

        loop {
            let mut word_start = i;
            while word_start < len && bytes[word_start] == b' ' {
                word_start += 1;
            }
            if word_start >= len {
                self.pos = len;
                exhausted = true;
                break;
            }
            if bytes[word_start] == b'\n' {
                self.pos = word_start + 1;
                break;
            }

            let mut word_end = word_start;
            while word_end < len && bytes[word_end] != b' ' && bytes[word_end] != b'\n' {
                word_end += 1;
            }

            if end > start {
                let width = (self.measure)(&self.text[start..word_end]);
                if self.x + width > self.right {
                    self.pos = word_start;
                    break;
                }
            }

            end = word_end;
            i = word_end;
        }

        // Trailing blanks after the last break are not a line
        if exhausted && end == start {
            return None;
        }

        let line = Line {
            origin: Point::new(self.x, self.y),
            text: &self.text[start..end],
        };
        self.y += self.line_height;
        Some(line)
    }
}
