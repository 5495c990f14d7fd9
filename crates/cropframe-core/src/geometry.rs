//! Plain geometric value types shared by every stage of the crop pipeline.
//!
//! A [`Rect`] carries no notion of which space it lives in. Whether a
//! rectangle is in display (viewport) coordinates or in source-pixel
//! coordinates is decided by the code holding it.

use serde::{Deserialize, Serialize};

/// A 2D position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The origin (0, 0).
    pub fn zero() -> Self {
        Self::default()
    }

    /// Component-wise difference `self - other`.
    pub fn delta_from(self, other: Point) -> (f64, f64) {
        (self.x - other.x, self.y - other.y)
    }
}

/// A 2D extent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle: top-left corner plus size.
///
/// Controllers never mutate a `Rect` in place; they produce a new value, so
/// an earlier snapshot stays valid for comparison or rollback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rectangle of `size` centered on `center`.
    pub fn centered_at(center: Point, size: Size) -> Self {
        Self::new(
            center.x - size.width / 2.0,
            center.y - size.height / 2.0,
            size.width,
            size.height,
        )
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Same size, moved by `(dx, dy)`.
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Same top-left corner, new size.
    pub fn with_size(&self, size: Size) -> Self {
        Self::new(self.x, self.y, size.width, size.height)
    }

    /// True when either side is zero or negative (or NaN).
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Half-open containment: left/top edges inclusive, right/bottom exclusive.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Overlapping area of two rectangles, or `None` if they do not overlap.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right > left && bottom > top {
            Some(Rect::new(left, top, right - left, bottom - top))
        } else {
            None
        }
    }

    /// Component-wise approximate equality, for comparing mapped results.
    pub fn approx_eq(&self, other: &Rect, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance
            && (self.y - other.y).abs() <= tolerance
            && (self.width - other.width).abs() <= tolerance
            && (self.height - other.height).abs() <= tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_and_edges() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.right(), 110.0);
        assert_eq!(r.bottom(), 70.0);
        assert_eq!(r.center(), Point::new(60.0, 45.0));
    }

    #[test]
    fn test_centered_at_roundtrips_center() {
        let r = Rect::centered_at(Point::new(400.0, 300.0), Size::new(200.0, 100.0));
        assert_eq!(r, Rect::new(300.0, 250.0, 200.0, 100.0));
        assert_eq!(r.center(), Point::new(400.0, 300.0));
    }

    #[test]
    fn test_translate_keeps_size() {
        let r = Rect::new(0.0, 0.0, 30.0, 40.0).translate(-5.0, 7.5);
        assert_eq!(r, Rect::new(-5.0, 7.5, 30.0, 40.0));
    }

    #[test]
    fn test_structural_equality() {
        let a = Rect::new(1.0, 2.0, 3.0, 4.0);
        let b = a;
        assert_eq!(a, b);
        assert_ne!(a, a.translate(1.0, 0.0));
    }

    #[test]
    fn test_is_empty() {
        assert!(!Rect::new(0.0, 0.0, 1.0, 1.0).is_empty());
        assert!(Rect::new(0.0, 0.0, 0.0, 1.0).is_empty());
        assert!(Rect::new(0.0, 0.0, 1.0, -1.0).is_empty());
        assert!(Rect::new(0.0, 0.0, f64::NAN, 1.0).is_empty());
    }

    #[test]
    fn test_contains_is_half_open() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(r.contains(Point::new(9.99, 9.99)));
        assert!(!r.contains(Point::new(10.0, 5.0)));
        assert!(!r.contains(Point::new(5.0, -0.1)));
    }

    #[test]
    fn test_intersection() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, -20.0, 100.0, 40.0);
        assert_eq!(a.intersection(&b), Some(Rect::new(50.0, 0.0, 50.0, 20.0)));

        let far = Rect::new(200.0, 200.0, 10.0, 10.0);
        assert_eq!(a.intersection(&far), None);

        // Touching edges do not overlap
        let touching = Rect::new(100.0, 0.0, 10.0, 10.0);
        assert_eq!(a.intersection(&touching), None);
    }

    #[test]
    fn test_point_delta() {
        let (dx, dy) = Point::new(15.0, 5.0).delta_from(Point::new(10.0, 10.0));
        assert_eq!(dx, 5.0);
        assert_eq!(dy, -5.0);
    }
}
