//! Polygon type for 2D boundary representation and validation.
//!
//! Uses the tolerance-aware robust predicates for every geometric test so
//! results stay consistent for nearly-degenerate configurations.

use serde::{Deserialize, Serialize};

use crate::bbox::AABB;
use crate::epsilon::Epsilon;
use crate::error::{MathError, MathResult};
use crate::point::Point2;
use crate::robust_predicates::{orientation_2d, segments_properly_intersect, Orientation};

/// A 2D polygon defined by an ordered list of vertices.
///
/// Vertices are assumed to form a closed loop (last vertex implicitly
/// connects to first). The polygon may be wound either way; [`ensure_ccw`]
/// and [`ensure_cw`] normalize it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon2 {
    pub vertices: Vec<Point2>,
}

impl Polygon2 {
    /// Create a new polygon from vertices. Requires at least 3 vertices.
    pub fn new(vertices: Vec<Point2>) -> MathResult<Self> {
        if vertices.len() < 3 {
            return Err(MathError::InsufficientVertices);
        }
        Ok(Self { vertices })
    }

    /// Create a rectangle polygon from min and max corners.
    pub fn rectangle(min: Point2, max: Point2) -> Self {
        Self {
            vertices: vec![
                Point2::new(min.x, min.y),
                Point2::new(max.x, min.y),
                Point2::new(max.x, max.y),
                Point2::new(min.x, max.y),
            ],
        }
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges (same as vertex count for a closed polygon).
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get edge `index` as an endpoint pair.
    pub fn edge(&self, index: usize) -> (Point2, Point2) {
        let n = self.vertices.len();
        (self.vertices[index], self.vertices[(index + 1) % n])
    }

    /// Iterate over all edges as endpoint pairs.
    pub fn edges(&self) -> impl Iterator<Item = (Point2, Point2)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Signed area via the shoelace formula. Positive = CCW, negative = CW.
    pub fn signed_area(&self) -> f64 {
        let n = self.vertices.len();
        if n < 3 {
            return 0.0;
        }

        let mut sum = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            sum += self.vertices[i].x * self.vertices[j].y;
            sum -= self.vertices[j].x * self.vertices[i].y;
        }
        sum / 2.0
    }

    /// Absolute area.
    #[inline]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Perimeter (sum of edge lengths).
    pub fn perimeter(&self) -> f64 {
        self.edges().map(|(a, b)| a.distance_to(&b)).sum()
    }

    /// Centroid (center of mass for uniform density).
    pub fn centroid(&self) -> Point2 {
        let n = self.vertices.len();
        if n == 0 {
            return Point2::ORIGIN;
        }

        let signed_area = self.signed_area();
        if signed_area.abs() < 1e-15 {
            let sum_x: f64 = self.vertices.iter().map(|v| v.x).sum();
            let sum_y: f64 = self.vertices.iter().map(|v| v.y).sum();
            return Point2::new(sum_x / n as f64, sum_y / n as f64);
        }

        let mut cx = 0.0;
        let mut cy = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            let cross =
                self.vertices[i].x * self.vertices[j].y - self.vertices[j].x * self.vertices[i].y;
            cx += (self.vertices[i].x + self.vertices[j].x) * cross;
            cy += (self.vertices[i].y + self.vertices[j].y) * cross;
        }

        let factor = 1.0 / (6.0 * signed_area);
        Point2::new(cx * factor, cy * factor)
    }

    /// True if the polygon is wound clockwise.
    #[inline]
    pub fn is_clockwise(&self) -> bool {
        self.signed_area() < 0.0
    }

    /// True if the polygon is wound counter-clockwise.
    #[inline]
    pub fn is_counter_clockwise(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Reverse the winding order in place.
    pub fn reverse(&mut self) {
        self.vertices.reverse();
    }

    /// Return a new polygon with reversed winding.
    pub fn reversed(&self) -> Self {
        let mut vertices = self.vertices.clone();
        vertices.reverse();
        Self { vertices }
    }

    /// Ensure counter-clockwise winding.
    pub fn ensure_ccw(&mut self) {
        if self.is_clockwise() {
            self.reverse();
        }
    }

    /// Ensure clockwise winding.
    pub fn ensure_cw(&mut self) {
        if self.is_counter_clockwise() {
            self.reverse();
        }
    }

    /// Check if the polygon is convex.
    pub fn is_convex(&self, eps: &Epsilon) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }

        let mut expected_orientation: Option<Orientation> = None;

        for i in 0..n {
            let p0 = self.vertices[i];
            let p1 = self.vertices[(i + 1) % n];
            let p2 = self.vertices[(i + 2) % n];

            let orient = orientation_2d(p0, p1, p2, eps);
            if orient == Orientation::Collinear {
                continue;
            }

            match expected_orientation {
                None => expected_orientation = Some(orient),
                Some(expected) if expected != orient => return false,
                _ => {}
            }
        }

        true
    }

    /// Check if a point is inside the polygon using the winding number
    /// algorithm with robust orientation tests.
    pub fn contains_point(&self, p: &Point2, eps: &Epsilon) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }

        let mut winding = 0i32;

        for i in 0..n {
            let vi = self.vertices[i];
            let vj = self.vertices[(i + 1) % n];

            if vi.y <= p.y {
                if vj.y > p.y && orientation_2d(vi, vj, *p, eps) == Orientation::CounterClockwise {
                    winding += 1;
                }
            } else if vj.y <= p.y && orientation_2d(vi, vj, *p, eps) == Orientation::Clockwise {
                winding -= 1;
            }
        }

        winding != 0
    }

    /// Check if a point lies on the boundary within `tolerance`.
    pub fn point_on_boundary(&self, p: &Point2, tolerance: f64) -> bool {
        for (a, b) in self.edges() {
            if distance_to_segment(p, &a, &b) < tolerance {
                return true;
            }
        }
        false
    }

    /// Check if a point is inside or on the boundary.
    pub fn contains_point_inclusive(&self, p: &Point2, tolerance: f64, eps: &Epsilon) -> bool {
        self.contains_point(p, eps) || self.point_on_boundary(p, tolerance)
    }

    /// Compute the axis-aligned bounding box.
    pub fn bounding_box(&self) -> Option<AABB> {
        AABB::from_points(&self.vertices)
    }

    /// Check if this polygon intersects another (edges cross, or one
    /// contains the other).
    pub fn intersects(&self, other: &Polygon2, eps: &Epsilon) -> bool {
        for (a1, a2) in self.edges() {
            for (b1, b2) in other.edges() {
                if segments_properly_intersect(a1, a2, b1, b2, eps) {
                    return true;
                }
            }
        }

        if !self.vertices.is_empty() && other.contains_point(&self.vertices[0], eps) {
            return true;
        }
        if !other.vertices.is_empty() && self.contains_point(&other.vertices[0], eps) {
            return true;
        }

        false
    }

    /// Check if the polygon has any self-intersecting (non-adjacent) edges.
    pub fn is_simple(&self, eps: &Epsilon) -> bool {
        let n = self.vertices.len();
        if n < 4 {
            return true;
        }

        for i in 0..n {
            let a1 = self.vertices[i];
            let a2 = self.vertices[(i + 1) % n];

            for j in (i + 2)..n {
                if i == 0 && j == n - 1 {
                    continue;
                }

                let b1 = self.vertices[j];
                let b2 = self.vertices[(j + 1) % n];

                if segments_properly_intersect(a1, a2, b1, b2, eps) {
                    return false;
                }
            }
        }

        true
    }

    /// Validate the polygon for use in mesh ingestion: at least 3 vertices,
    /// simple (no self-intersection).
    pub fn validate(&self, eps: &Epsilon) -> MathResult<()> {
        if self.vertices.len() < 3 {
            return Err(MathError::InsufficientVertices);
        }
        if !self.is_simple(eps) {
            return Err(MathError::SelfIntersecting);
        }
        Ok(())
    }
}

impl Default for Polygon2 {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
        }
    }
}

fn distance_to_segment(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let ab = *b - *a;
    let len_sq = ab.length_squared();
    if len_sq < 1e-300 {
        return p.distance_to(a);
    }
    let t = ((*p - *a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    let proj = *a + ab * t;
    p.distance_to(&proj)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-10;

    fn eps() -> Epsilon {
        Epsilon::default()
    }

    fn square() -> Polygon2 {
        Polygon2::rectangle(Point2::new(0.0, 0.0), Point2::new(10.0, 10.0))
    }

    #[test]
    fn polygon_new_requires_3_vertices() {
        assert!(Polygon2::new(vec![]).is_err());
        assert!(Polygon2::new(vec![Point2::ORIGIN]).is_err());
        assert!(Polygon2::new(vec![Point2::ORIGIN, Point2::new(1.0, 0.0)]).is_err());
        assert!(Polygon2::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.5, 1.0)
        ])
        .is_ok());
    }

    #[test]
    fn polygon_area() {
        let poly = square();
        assert!((poly.area() - 100.0).abs() < EPSILON);
    }

    #[test]
    fn polygon_perimeter() {
        let poly = square();
        assert!((poly.perimeter() - 40.0).abs() < EPSILON);
    }

    #[test]
    fn polygon_centroid() {
        let poly = square();
        let c = poly.centroid();
        assert!((c.x - 5.0).abs() < EPSILON);
        assert!((c.y - 5.0).abs() < EPSILON);
    }

    #[test]
    fn polygon_winding() {
        let ccw = Polygon2::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        ])
        .unwrap();
        assert!(ccw.is_counter_clockwise());

        let cw = ccw.reversed();
        assert!(cw.is_clockwise());
    }

    #[test]
    fn polygon_is_convex() {
        assert!(square().is_convex(&eps()));

        let l_shape = Polygon2::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 2.0),
            Point2::new(0.0, 2.0),
        ])
        .unwrap();
        assert!(!l_shape.is_convex(&eps()));
    }

    #[test]
    fn polygon_contains_point() {
        let poly = square();

        assert!(poly.contains_point(&Point2::new(5.0, 5.0), &eps()));
        assert!(poly.contains_point(&Point2::new(1.0, 1.0), &eps()));

        assert!(!poly.contains_point(&Point2::new(-1.0, 5.0), &eps()));
        assert!(!poly.contains_point(&Point2::new(15.0, 5.0), &eps()));
        assert!(!poly.contains_point(&Point2::new(5.0, 15.0), &eps()));
    }

    #[test]
    fn polygon_is_simple() {
        assert!(square().is_simple(&eps()));

        let fig8 = Polygon2 {
            vertices: vec![
                Point2::new(0.0, 0.0),
                Point2::new(2.0, 2.0),
                Point2::new(2.0, 0.0),
                Point2::new(0.0, 2.0),
            ],
        };
        assert!(!fig8.is_simple(&eps()));
    }

    #[test]
    fn polygon_bounding_box() {
        let poly = square();
        let bbox = poly.bounding_box().unwrap();
        assert_eq!(bbox.min, Point2::new(0.0, 0.0));
        assert_eq!(bbox.max, Point2::new(10.0, 10.0));
    }

    #[test]
    fn polygon_edges_iterator() {
        let poly = square();
        let edges: Vec<_> = poly.edges().collect();
        assert_eq!(edges.len(), 4);
    }

    #[test]
    fn polygon_validate_rejects_self_intersecting() {
        let fig8 = Polygon2 {
            vertices: vec![
                Point2::new(0.0, 0.0),
                Point2::new(2.0, 2.0),
                Point2::new(2.0, 0.0),
                Point2::new(0.0, 2.0),
            ],
        };
        assert_eq!(fig8.validate(&eps()), Err(MathError::SelfIntersecting));
    }
}
