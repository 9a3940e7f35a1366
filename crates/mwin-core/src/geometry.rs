#![forbid(unsafe_code)]

//! Geometric primitives.

use serde::{Deserialize, Serialize};

/// A rectangle in device pixel space.
///
/// Stored as four edges; `right` and `bottom` are exclusive. Coordinates may
/// be negative or lie beyond the display: collapsed containers and hidden
/// windows are parked off-screen rather than shrunk to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge (inclusive).
    pub left: i32,
    /// Top edge (inclusive).
    pub top: i32,
    /// Right edge (exclusive).
    pub right: i32,
    /// Bottom edge (exclusive).
    pub bottom: i32,
}

impl Rect {
    /// Create a rectangle from its four edges.
    ///
    /// Callers must pass `right >= left` and `bottom >= top`.
    #[inline]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        debug_assert!(right >= left && bottom >= top);
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rectangle from an origin and a size.
    ///
    /// Negative sizes saturate to zero.
    #[inline]
    pub const fn from_origin_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        let width = if width < 0 { 0 } else { width };
        let height = if height < 0 { 0 } else { height };
        Self {
            left: x,
            top: y,
            right: x.saturating_add(width),
            bottom: y.saturating_add(height),
        }
    }

    /// Width in pixels.
    #[inline]
    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    /// Height in pixels.
    #[inline]
    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Whether both dimensions are non-negative.
    #[inline]
    pub const fn is_well_formed(&self) -> bool {
        self.right >= self.left && self.bottom >= self.top
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    /// Whether the interiors of two rectangles overlap.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.intersection_opt(other).is_some()
    }

    /// Compute the intersection with another rectangle, returning `None` if no overlap.
    #[inline]
    pub fn intersection_opt(&self, other: &Rect) -> Option<Rect> {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right.min(other.right);
        let bottom = self.bottom.min(other.bottom);

        if left < right && top < bottom {
            Some(Rect::new(left, top, right, bottom))
        } else {
            None
        }
    }

    /// The smallest rectangle that contains both.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect::new(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }

    /// Shift by the given offset, keeping the size.
    #[inline]
    #[must_use]
    pub const fn translate(&self, dx: i32, dy: i32) -> Rect {
        Rect {
            left: self.left + dx,
            top: self.top + dy,
            right: self.right + dx,
            bottom: self.bottom + dy,
        }
    }

    /// Move the top-left corner to `(x, y)`, keeping the size.
    #[inline]
    #[must_use]
    pub const fn with_origin(&self, x: i32, y: i32) -> Rect {
        Rect::from_origin_size(x, y, self.width(), self.height())
    }

    /// Top-left corner.
    #[inline]
    pub const fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }
}

/// A point in device pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        dx.hypot(dy)
    }

    /// Component-wise difference `self - origin`.
    #[inline]
    #[must_use]
    pub const fn delta_from(self, origin: Self) -> (i32, i32) {
        (self.x - origin.x, self.y - origin.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::{Point, Rect};

    #[test]
    fn rect_contains_edges() {
        let rect = Rect::new(2, 3, 6, 8);
        assert!(rect.contains(2, 3));
        assert!(rect.contains(5, 7));
        assert!(!rect.contains(6, 3));
        assert!(!rect.contains(2, 8));
    }

    #[test]
    fn rect_intersection_overlaps() {
        let a = Rect::new(0, 0, 4, 4);
        let b = Rect::new(2, 2, 6, 6);
        assert_eq!(a.intersection_opt(&b), Some(Rect::new(2, 2, 4, 4)));
        assert!(a.intersects(&b));
    }

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Rect::new(0, 0, 100, 100);
        let b = Rect::new(100, 0, 200, 100);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn from_origin_size_saturates_negative() {
        let r = Rect::from_origin_size(10, 10, -5, 20);
        assert_eq!(r.width(), 0);
        assert_eq!(r.height(), 20);
        assert!(r.is_empty());
    }

    #[test]
    fn negative_coordinates_are_legal() {
        let r = Rect::new(-3000, 0, 0, 1000);
        assert_eq!(r.width(), 3000);
        assert!(r.is_well_formed());
    }

    #[test]
    fn translate_and_with_origin_keep_size() {
        let r = Rect::new(10, 20, 110, 220);
        assert_eq!(r.translate(5, -5), Rect::new(15, 15, 115, 215));
        assert_eq!(r.with_origin(10000, 10000), Rect::new(10000, 10000, 10100, 10200));
    }

    #[test]
    fn union_covers_both() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, -5, 20, 8);
        assert_eq!(a.union(&b), Rect::new(0, -5, 20, 10));
    }

    #[test]
    fn point_distance() {
        let a = Point::new(0, 0);
        let b = Point::new(60, 80);
        assert_eq!(a.distance(b), 100.0);
        assert_eq!(b.delta_from(a), (60, 80));
    }
}
