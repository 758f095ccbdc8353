//! Polygon- and triangle-level predicates built on `cdt-math`'s robust,
//! tolerance-classified primitives.
//!
//! Every function here takes an explicit [`Epsilon`]; none consult global
//! state, so the mesh store, the CDT engine, and the overlap auditor all
//! classify the same configuration the same way.

use cdt_math::robust_predicates::{
    orientation_2d, segment_intersection_point, segments_properly_intersect, IntersectionType,
    Orientation,
};
use cdt_math::{Epsilon, Point2, Polygon2};

pub use cdt_math::robust_predicates::{point_in_triangle, segments_intersect};
pub use segment_intersection_point as segment_intersection;

/// Signed shoelace area of a polygon given as a bare point sequence
/// (positive = counter-clockwise in a y-up frame).
pub fn polygon_signed_area(poly: &[Point2]) -> f64 {
    let n = poly.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += poly[i].x * poly[j].y;
        sum -= poly[j].x * poly[i].y;
    }
    sum / 2.0
}

/// Absolute polygon area.
pub fn polygon_area(poly: &[Point2]) -> f64 {
    polygon_signed_area(poly).abs()
}

/// O(n^2) self-intersection check.
///
/// Two edges count as intersecting only when their intersection is
/// `Proper`, or they meet at a point other than a shared endpoint of
/// adjacent edges (a `Touching` classification where the touch point is not
/// the common vertex of two consecutive edges).
pub fn polygon_self_intersects(poly: &[Point2], eps: &Epsilon) -> bool {
    let n = poly.len();
    if n < 4 {
        return false;
    }

    for i in 0..n {
        let a1 = poly[i];
        let a2 = poly[(i + 1) % n];

        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue; // adjacent through the wrap-around
            }

            let b1 = poly[j];
            let b2 = poly[(j + 1) % n];

            let (_, kind) = segment_intersection_point(a1, a2, b1, b2, eps);
            match kind {
                IntersectionType::Proper | IntersectionType::CollinearOverlap => return true,
                IntersectionType::Touching => {
                    // Adjacent edges legitimately share a vertex; that
                    // shared-endpoint touch is not a self-intersection.
                    let shares_vertex = a1 == b1 || a1 == b2 || a2 == b1 || a2 == b2;
                    if !shares_vertex {
                        return true;
                    }
                }
                IntersectionType::None => {}
            }
        }
    }

    false
}

/// True if `p` is strictly inside `poly` (winding-number containment, with
/// boundary points excluded).
pub fn point_strictly_in_polygon(p: Point2, poly: &[Point2], eps: &Epsilon) -> bool {
    if poly.len() < 3 {
        return false;
    }
    let polygon = Polygon2 {
        vertices: poly.to_vec(),
    };
    let tol = eps.tolerance_for(&poly.iter().map(Point2::as_array).collect::<Vec<_>>());
    polygon.contains_point(&p, eps) && !polygon.point_on_boundary(&p, tol)
}

/// True if every vertex of `inner` lies strictly inside `outer`, and no
/// edge of `outer` properly intersects any edge of `inner`.
pub fn polygon_contains_polygon(outer: &[Point2], inner: &[Point2], eps: &Epsilon) -> bool {
    if outer.len() < 3 || inner.len() < 3 {
        return false;
    }

    for &v in inner {
        if !point_strictly_in_polygon(v, outer, eps) {
            return false;
        }
    }

    let outer_edges = ring_edges(outer);
    let inner_edges = ring_edges(inner);
    for &(a1, a2) in &outer_edges {
        for &(b1, b2) in &inner_edges {
            if segments_properly_intersect(a1, a2, b1, b2, eps) {
                return false;
            }
        }
    }

    true
}

/// True if any edge pair between `a` and `b` intersects properly, or either
/// polygon contains a vertex of the other.
pub fn polygons_intersect(a: &[Point2], b: &[Point2], eps: &Epsilon) -> bool {
    if a.len() < 3 || b.len() < 3 {
        return false;
    }

    for &(a1, a2) in &ring_edges(a) {
        for &(b1, b2) in &ring_edges(b) {
            if segments_properly_intersect(a1, a2, b1, b2, eps) {
                return true;
            }
        }
    }

    let poly_a = Polygon2 { vertices: a.to_vec() };
    let poly_b = Polygon2 { vertices: b.to_vec() };
    if poly_a.contains_point(&b[0], eps) || poly_b.contains_point(&a[0], eps) {
        return true;
    }

    false
}

fn ring_edges(poly: &[Point2]) -> Vec<(Point2, Point2)> {
    let n = poly.len();
    (0..n).map(|i| (poly[i], poly[(i + 1) % n])).collect()
}

/// Ensure a triangle's vertices are listed counter-clockwise, reversing the
/// last two if they are clockwise. Collinear (degenerate) triangles are
/// returned unchanged.
fn ensure_ccw(a: Point2, b: Point2, c: Point2, eps: &Epsilon) -> (Point2, Point2, Point2) {
    if orientation_2d(a, b, c, eps) == Orientation::Clockwise {
        (a, c, b)
    } else {
        (a, b, c)
    }
}

/// Clip a convex polygon (here, a triangle) against a half-plane bounded by
/// the directed line `e1 -> e2`, keeping the side that is not clockwise of
/// it (i.e. on or to the left).
fn clip_half_plane(subject: &[Point2], e1: Point2, e2: Point2, eps: &Epsilon) -> Vec<Point2> {
    if subject.is_empty() {
        return Vec::new();
    }

    let mut output = Vec::with_capacity(subject.len() + 1);
    let n = subject.len();

    for i in 0..n {
        let curr = subject[i];
        let prev = subject[(i + n - 1) % n];

        let curr_inside = orientation_2d(e1, e2, curr, eps) != Orientation::Clockwise;
        let prev_inside = orientation_2d(e1, e2, prev, eps) != Orientation::Clockwise;

        if curr_inside {
            if !prev_inside {
                let (p, kind) = segment_intersection_point(prev, curr, e1, e2, eps);
                if kind != IntersectionType::None {
                    output.push(p);
                }
            }
            output.push(curr);
        } else if prev_inside {
            let (p, kind) = segment_intersection_point(prev, curr, e1, e2, eps);
            if kind != IntersectionType::None {
                output.push(p);
            }
        }
    }

    output
}

/// Area of the intersection of two triangles, via Sutherland-Hodgman
/// clipping of the first triangle against the three half-planes of the
/// second, followed by a shoelace area on the resulting convex polygon.
///
/// Required to distinguish true volumetric overlap (positive area) from
/// mere edge touching (zero area) in the overlap auditor.
pub fn triangle_intersection_area(
    t1: (Point2, Point2, Point2),
    t2: (Point2, Point2, Point2),
    eps: &Epsilon,
) -> f64 {
    let (a1, b1, c1) = ensure_ccw(t1.0, t1.1, t1.2, eps);
    let (a2, b2, c2) = ensure_ccw(t2.0, t2.1, t2.2, eps);

    let mut subject = vec![a1, b1, c1];

    for &(e1, e2) in &[(a2, b2), (b2, c2), (c2, a2)] {
        subject = clip_half_plane(&subject, e1, e2, eps);
        if subject.is_empty() {
            return 0.0;
        }
    }

    polygon_area(&subject)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eps() -> Epsilon {
        Epsilon::default()
    }

    #[test]
    fn area_of_square() {
        let sq = vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ];
        assert!((polygon_area(&sq) - 100.0).abs() < 1e-9);
        assert!(polygon_signed_area(&sq) > 0.0);
    }

    #[test]
    fn self_intersection_figure_eight() {
        let fig8 = vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(2.0, 0.0),
            Point2::new(0.0, 2.0),
        ];
        assert!(polygon_self_intersects(&fig8, &eps()));
    }

    #[test]
    fn simple_square_does_not_self_intersect() {
        let sq = vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ];
        assert!(!polygon_self_intersects(&sq, &eps()));
    }

    #[test]
    fn contains_polygon_strict_inside() {
        let outer = vec![
            Point2::new(0.0, 0.0),
            Point2::new(20.0, 0.0),
            Point2::new(20.0, 20.0),
            Point2::new(0.0, 20.0),
        ];
        let inner = vec![
            Point2::new(5.0, 5.0),
            Point2::new(15.0, 5.0),
            Point2::new(15.0, 15.0),
            Point2::new(5.0, 15.0),
        ];
        assert!(polygon_contains_polygon(&outer, &inner, &eps()));
    }

    #[test]
    fn contains_polygon_rejects_touching() {
        let outer = vec![
            Point2::new(0.0, 0.0),
            Point2::new(20.0, 0.0),
            Point2::new(20.0, 20.0),
            Point2::new(0.0, 20.0),
        ];
        let touching = vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ];
        assert!(!polygon_contains_polygon(&outer, &touching, &eps()));
    }

    #[test]
    fn polygons_intersect_overlapping_squares() {
        let a = vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ];
        let b = vec![
            Point2::new(5.0, 5.0),
            Point2::new(15.0, 5.0),
            Point2::new(15.0, 15.0),
            Point2::new(5.0, 15.0),
        ];
        assert!(polygons_intersect(&a, &b, &eps()));
    }

    #[test]
    fn polygons_disjoint_do_not_intersect() {
        let a = vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ];
        let b = vec![
            Point2::new(100.0, 100.0),
            Point2::new(110.0, 100.0),
            Point2::new(110.0, 110.0),
            Point2::new(100.0, 110.0),
        ];
        assert!(!polygons_intersect(&a, &b, &eps()));
    }

    #[test]
    fn triangle_intersection_area_identical_triangles() {
        let t = (
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(0.0, 4.0),
        );
        let area = triangle_intersection_area(t, t, &eps());
        assert!((area - 8.0).abs() < 1e-9);
    }

    #[test]
    fn triangle_intersection_area_disjoint_is_zero() {
        let t1 = (
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        );
        let t2 = (
            Point2::new(10.0, 10.0),
            Point2::new(11.0, 10.0),
            Point2::new(10.0, 11.0),
        );
        assert_eq!(triangle_intersection_area(t1, t2, &eps()), 0.0);
    }

    #[test]
    fn triangle_intersection_area_half_overlap() {
        // Two right triangles sharing the hypotenuse square's diagonal.
        let t1 = (
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
        );
        let t2 = (
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
        );
        // Share only the diagonal edge: zero-area overlap.
        let area = triangle_intersection_area(t1, t2, &eps());
        assert!(area < 1e-6);
    }

    #[test]
    fn point_strictly_in_polygon_basic() {
        let sq = vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ];
        assert!(point_strictly_in_polygon(Point2::new(5.0, 5.0), &sq, &eps()));
        assert!(!point_strictly_in_polygon(Point2::new(0.0, 5.0), &sq, &eps()));
        assert!(!point_strictly_in_polygon(Point2::new(-1.0, 5.0), &sq, &eps()));
    }
}
