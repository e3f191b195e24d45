//! Screen geometry
//!
//! Signed pixel coordinates. Layout arithmetic routinely produces values
//! left of or above the screen (centering a wide string, clipping a shape
//! that hangs off a pane), so nothing here is unsigned or range-checked.

use core::ops::{Add, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A pixel position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// The origin (0, 0)
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Create a point
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset by `dx`, `dy`
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// An axis-aligned rectangle given by two inclusive corners
///
/// Callers are expected to pass `x1 <= x2` and `y1 <= y2`. Inverted
/// rectangles are not normalized: containment is then always false and
/// clipping against them draws nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    /// Create a rectangle from its corner coordinates
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Create a rectangle from its two corner points
    pub const fn from_points(p1: Point, p2: Point) -> Self {
        Self::new(p1.x, p1.y, p2.x, p2.y)
    }

    /// Create a rectangle from a top-left corner and a size in pixels
    ///
    /// The bottom-right corner is inclusive, so a 10x10 rect at (0, 0)
    /// ends at (9, 9).
    pub const fn with_size(origin: Point, width: i32, height: i32) -> Self {
        Self::new(
            origin.x,
            origin.y,
            origin.x + width - 1,
            origin.y + height - 1,
        )
    }

    /// Top-left corner
    pub const fn p1(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    /// Bottom-right corner
    pub const fn p2(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    /// Horizontal span (`x2 - x1`)
    pub const fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    /// Vertical span (`y2 - y1`)
    pub const fn height(&self) -> i32 {
        self.y2 - self.y1
    }

    /// Center point, rounded toward the top-left
    pub const fn center(&self) -> Point {
        Point::new(self.x1 + self.width() / 2, self.y1 + self.height() / 2)
    }

    /// Whether `p` lies inside, edges included
    pub const fn contains(&self, p: Point) -> bool {
        self.contains_xy(p.x, p.y)
    }

    /// Whether (`x`, `y`) lies inside, edges included
    pub const fn contains_xy(&self, x: i32, y: i32) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }

    /// A copy moved by `d`
    pub const fn translate(&self, d: Point) -> Self {
        Self::new(self.x1 + d.x, self.y1 + d.y, self.x2 + d.x, self.y2 + d.y)
    }

    /// Overlap of two rectangles, or `None` when they are disjoint
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let r = Rect::new(
            self.x1.max(other.x1),
            self.y1.max(other.y1),
            self.x2.min(other.x2),
            self.y2.min(other.y2),
        );
        (r.x1 <= r.x2 && r.y1 <= r.y2).then_some(r)
    }
}

impl Add<Point> for Rect {
    type Output = Rect;

    fn add(self, d: Point) -> Rect {
        self.translate(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_contains_edges_and_midpoint() {
        let r = Rect::new(10, 20, 30, 40);
        assert!(r.contains(r.p1()));
        assert!(r.contains(r.p2()));
        assert!(r.contains_xy(10, 40));
        assert!(r.contains_xy(30, 20));
        assert!(r.contains(r.center()));
        assert!(!r.contains_xy(9, 20));
        assert!(!r.contains_xy(31, 40));
        assert!(!r.contains_xy(20, 41));
    }

    #[test]
    fn test_translate_is_a_copy() {
        let r = Rect::new(0, 0, 5, 5);
        let moved = r + Point::new(3, -2);
        assert_eq!(moved, Rect::new(3, -2, 8, 3));
        assert_eq!(r, Rect::new(0, 0, 5, 5));
    }

    #[test]
    fn test_inverted_rect_contains_nothing() {
        let r = Rect::new(10, 10, 0, 0);
        assert!(!r.contains_xy(5, 5));
        assert_eq!(r.intersection(&Rect::new(0, 0, 20, 20)), None);
    }

    #[test]
    fn test_with_size_is_inclusive() {
        let r = Rect::with_size(Point::new(2, 3), 10, 4);
        assert_eq!(r, Rect::new(2, 3, 11, 6));
    }

    fn rect() -> impl Strategy<Value = Rect> {
        (-500i32..500, -500i32..500, 0i32..300, 0i32..300)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, x + w, y + h))
    }

    proptest! {
        #[test]
        fn prop_points_inside_are_contained(r in rect(), fx in 0.0f64..=1.0, fy in 0.0f64..=1.0) {
            let p = Point::new(
                r.x1 + (r.width() as f64 * fx) as i32,
                r.y1 + (r.height() as f64 * fy) as i32,
            );
            prop_assert!(r.contains(p));
        }

        #[test]
        fn prop_points_outside_are_not_contained(r in rect(), d in 1i32..100) {
            prop_assert!(!r.contains_xy(r.x1 - d, r.y1));
            prop_assert!(!r.contains_xy(r.x2 + d, r.y2));
            prop_assert!(!r.contains_xy(r.x1, r.y1 - d));
            prop_assert!(!r.contains_xy(r.x2, r.y2 + d));
        }

        #[test]
        fn prop_translation_preserves_containment(
            r in rect(),
            px in -800i32..800,
            py in -800i32..800,
            dx in -400i32..400,
            dy in -400i32..400,
        ) {
            let p = Point::new(px, py);
            let d = Point::new(dx, dy);
            prop_assert_eq!(r.contains(p), (r + d).contains(p + d));
        }
    }
}
