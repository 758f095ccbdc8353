//! Axis-aligned bounding box.

use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};
use crate::point::Point2;
use crate::vector::Vector2;

/// A 2D axis-aligned bounding box.
///
/// Unlike a naive min/max pair, [`AABB::new`] does not silently reorder an
/// inverted box: a caller passing `min.x > max.x` or `min.y > max.y` gets a
/// [`MathError::DomainError`] back, not a quietly "corrected" box. Callers
/// that genuinely want the min/max of an unordered point pair should compute
/// it themselves before constructing the box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AABB {
    pub min: Point2,
    pub max: Point2,
}

impl AABB {
    /// Construct from an explicit min/max pair. Rejects inverted boxes.
    pub fn new(min: Point2, max: Point2) -> MathResult<Self> {
        if min.x > max.x || min.y > max.y {
            return Err(MathError::DomainError);
        }
        Ok(Self { min, max })
    }

    /// Create a bounding box from a set of points. `None` if `points` is empty.
    pub fn from_points(points: &[Point2]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }

        let mut min = points[0];
        let mut max = points[0];

        for p in points.iter().skip(1) {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }

        Some(Self { min, max })
    }

    /// Width of the bounding box.
    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Height of the bounding box.
    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Size as a vector.
    #[inline]
    pub fn size(&self) -> Vector2 {
        Vector2::new(self.width(), self.height())
    }

    /// Center point.
    #[inline]
    pub fn center(&self) -> Point2 {
        self.min.midpoint(&self.max)
    }

    /// Area of the bounding box.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Check if a point is inside (inclusive).
    #[inline]
    pub fn contains_point(&self, p: &Point2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Check if this bbox intersects another.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// Check if this bbox fully contains another.
    #[inline]
    pub fn contains(&self, other: &Self) -> bool {
        self.min.x <= other.min.x
            && self.max.x >= other.max.x
            && self.min.y <= other.min.y
            && self.max.y >= other.max.y
    }

    /// Union of two bounding boxes. Always valid: the union of two valid
    /// boxes is never inverted.
    #[inline]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: Point2::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point2::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// Intersection of two bounding boxes, `None` if disjoint.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let min_x = self.min.x.max(other.min.x);
        let min_y = self.min.y.max(other.min.y);
        let max_x = self.max.x.min(other.max.x);
        let max_y = self.max.y.min(other.max.y);

        if min_x <= max_x && min_y <= max_y {
            Some(Self {
                min: Point2::new(min_x, min_y),
                max: Point2::new(max_x, max_y),
            })
        } else {
            None
        }
    }

    /// Expand the bounding box by a margin on every side.
    #[inline]
    pub fn expand(&self, margin: f64) -> Self {
        Self {
            min: Point2::new(self.min.x - margin, self.min.y - margin),
            max: Point2::new(self.max.x + margin, self.max.y + margin),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_inverted_box() {
        let min = Point2::new(10.0, 0.0);
        let max = Point2::new(0.0, 10.0);
        assert_eq!(AABB::new(min, max), Err(MathError::DomainError));
    }

    #[test]
    fn new_accepts_degenerate_point_box() {
        let p = Point2::new(5.0, 5.0);
        let b = AABB::new(p, p).unwrap();
        assert_eq!(b.area(), 0.0);
    }

    #[test]
    fn from_points_basic() {
        let pts = [
            Point2::new(1.0, 5.0),
            Point2::new(-2.0, 3.0),
            Point2::new(4.0, -1.0),
        ];
        let b = AABB::from_points(&pts).unwrap();
        assert_eq!(b.min, Point2::new(-2.0, -1.0));
        assert_eq!(b.max, Point2::new(4.0, 5.0));
    }

    #[test]
    fn intersects_and_contains() {
        let a = AABB::new(Point2::new(0.0, 0.0), Point2::new(10.0, 10.0)).unwrap();
        let b = AABB::new(Point2::new(5.0, 5.0), Point2::new(15.0, 15.0)).unwrap();
        assert!(a.intersects(&b));
        let inner = AABB::new(Point2::new(2.0, 2.0), Point2::new(4.0, 4.0)).unwrap();
        assert!(a.contains(&inner));
        assert!(!inner.contains(&a));
    }

    #[test]
    fn union_and_intersection() {
        let a = AABB::new(Point2::new(0.0, 0.0), Point2::new(5.0, 5.0)).unwrap();
        let b = AABB::new(Point2::new(3.0, 3.0), Point2::new(8.0, 8.0)).unwrap();
        let u = a.union(&b);
        assert_eq!(u.min, Point2::new(0.0, 0.0));
        assert_eq!(u.max, Point2::new(8.0, 8.0));
        let i = a.intersection(&b).unwrap();
        assert_eq!(i.min, Point2::new(3.0, 3.0));
        assert_eq!(i.max, Point2::new(5.0, 5.0));

        let c = AABB::new(Point2::new(100.0, 100.0), Point2::new(110.0, 110.0)).unwrap();
        assert!(a.intersection(&c).is_none());
    }
}
