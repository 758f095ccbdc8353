//! Robust geometric predicates with a unified tolerance policy.
//!
//! All predicates are built on Shewchuk's adaptive-precision determinants via
//! the `robust` crate, so the underlying orientation/incircle computation
//! itself never mis-classifies a close call due to ordinary floating-point
//! cancellation. On top of that, every classification here is routed through
//! an explicit [`Epsilon`] so that "nearly collinear" or "nearly cocircular"
//! configurations get a *consistent*, documented answer (`Collinear`/`OnCircle`)
//! rather than whichever sign a zero-threshold comparison on the raw
//! determinant happens to produce.
//!
//! # Example
//!
//! ```rust
//! use cdt_math::robust_predicates::{orientation_2d, Orientation};
//! use cdt_math::{Epsilon, Point2};
//!
//! let a = Point2::new(0.0, 0.0);
//! let b = Point2::new(1.0, 0.0);
//! let c = Point2::new(0.5, 1.0);
//!
//! assert_eq!(orientation_2d(a, b, c, &Epsilon::default()), Orientation::CounterClockwise);
//! ```

use crate::{Epsilon, Point2};
use robust::Coord;

/// Result of an orientation test. `CounterClockwise` corresponds to `c` lying
/// to the left of the directed line `a -> b`; `Clockwise` to the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    CounterClockwise,
    Clockwise,
    Collinear,
}

impl Orientation {
    /// Returns true if not collinear (has a definite turn direction).
    #[inline]
    pub fn is_definite(&self) -> bool {
        *self != Orientation::Collinear
    }

    /// Returns the opposite orientation (CCW <-> CW, Collinear stays same).
    #[inline]
    pub fn opposite(&self) -> Self {
        match self {
            Orientation::CounterClockwise => Orientation::Clockwise,
            Orientation::Clockwise => Orientation::CounterClockwise,
            Orientation::Collinear => Orientation::Collinear,
        }
    }
}

/// Result of an incircle test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CirclePosition {
    Inside,
    Outside,
    OnCircle,
}

/// Outcome of classifying how two segments meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntersectionType {
    /// Segments do not meet at all.
    None,
    /// Segments cross at a single interior point of both.
    Proper,
    /// Segments meet only at a shared endpoint, or one segment's endpoint
    /// touches the interior of the other.
    Touching,
    /// Segments are collinear and overlap over a nondegenerate interval.
    CollinearOverlap,
}

#[inline]
fn coord(p: Point2) -> Coord<f64> {
    Coord { x: p.x, y: p.y }
}

#[inline]
fn max_magnitude(points: &[Point2]) -> f64 {
    points
        .iter()
        .flat_map(|p| [p.x.abs(), p.y.abs()])
        .fold(0.0_f64, f64::max)
}

/// Robust, tolerance-classified 2D orientation test.
///
/// Determines whether point `c` lies to the left of, to the right of, or
/// (within `eps`) on the directed line from `a` to `b`.
pub fn orientation_2d(a: Point2, b: Point2, c: Point2, eps: &Epsilon) -> Orientation {
    let (orientation, _) = orientation_2d_with_value(a, b, c, eps);
    orientation
}

/// Same as [`orientation_2d`] but also returns the raw signed double-area.
pub fn orientation_2d_with_value(
    a: Point2,
    b: Point2,
    c: Point2,
    eps: &Epsilon,
) -> (Orientation, f64) {
    let det = robust::orient2d(coord(a), coord(b), coord(c));
    let tol = eps.tolerance(max_magnitude(&[a, b, c]));

    let orientation = if det > tol {
        Orientation::CounterClockwise
    } else if det < -tol {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    };

    (orientation, det)
}

/// Robust, tolerance-classified 2D incircle test.
///
/// Determines whether point `d` lies inside, outside, or (within `eps`) on
/// the circle through `a`, `b`, `c`. Precondition: `a, b, c` given
/// counter-clockwise; if clockwise, inside/outside are swapped.
pub fn incircle_2d(a: Point2, b: Point2, c: Point2, d: Point2, eps: &Epsilon) -> CirclePosition {
    let (position, _) = incircle_2d_with_value(a, b, c, d, eps);
    position
}

/// Same as [`incircle_2d`] but also returns the raw determinant.
pub fn incircle_2d_with_value(
    a: Point2,
    b: Point2,
    c: Point2,
    d: Point2,
    eps: &Epsilon,
) -> (CirclePosition, f64) {
    let det = robust::incircle(coord(a), coord(b), coord(c), coord(d));
    let tol = eps.tolerance(max_magnitude(&[a, b, c, d]));

    let position = if det > tol {
        CirclePosition::Inside
    } else if det < -tol {
        CirclePosition::Outside
    } else {
        CirclePosition::OnCircle
    };

    (position, det)
}

/// Check if point `q`, already known to be collinear with `p1`/`p2`, lies on
/// the closed segment `p1-p2`.
#[inline]
fn on_segment(p1: Point2, q: Point2, p2: Point2) -> bool {
    q.x <= p1.x.max(p2.x) && q.x >= p1.x.min(p2.x) && q.y <= p1.y.max(p2.y) && q.y >= p1.y.min(p2.y)
}

/// Classify how segments `a1-a2` and `b1-b2` intersect.
///
/// Returns `(intersects, proper)`: `intersects` is true for any contact
/// (crossing, touching, or collinear overlap); `proper` is true only for a
/// strict interior crossing.
pub fn segments_intersect(a1: Point2, a2: Point2, b1: Point2, b2: Point2, eps: &Epsilon) -> (bool, bool) {
    let o1 = orientation_2d(a1, a2, b1, eps);
    let o2 = orientation_2d(a1, a2, b2, eps);
    let o3 = orientation_2d(b1, b2, a1, eps);
    let o4 = orientation_2d(b1, b2, a2, eps);

    if o1 != o2 && o3 != o4 && o1 != Orientation::Collinear && o3 != Orientation::Collinear {
        return (true, true);
    }

    if o1 == Orientation::Collinear && on_segment(a1, b1, a2) {
        return (true, false);
    }
    if o2 == Orientation::Collinear && on_segment(a1, b2, a2) {
        return (true, false);
    }
    if o3 == Orientation::Collinear && on_segment(b1, a1, b2) {
        return (true, false);
    }
    if o4 == Orientation::Collinear && on_segment(b1, a2, b2) {
        return (true, false);
    }

    (false, false)
}

/// Check if two line segments properly intersect (cross, not just touch).
pub fn segments_properly_intersect(a1: Point2, a2: Point2, b1: Point2, b2: Point2, eps: &Epsilon) -> bool {
    segments_intersect(a1, a2, b1, b2, eps).1
}

/// Full intersection classification, returning a representative point.
///
/// On `CollinearOverlap` the returned point is the midpoint of the overlap
/// interval. On `None`, the returned point is `a1` (caller must check the
/// type before trusting the point).
pub fn segment_intersection_point(
    a1: Point2,
    a2: Point2,
    b1: Point2,
    b2: Point2,
    eps: &Epsilon,
) -> (Point2, IntersectionType) {
    let o1 = orientation_2d(a1, a2, b1, eps);
    let o2 = orientation_2d(a1, a2, b2, eps);
    let o3 = orientation_2d(b1, b2, a1, eps);
    let o4 = orientation_2d(b1, b2, a2, eps);

    if o1 != o2 && o3 != o4 && o1 != Orientation::Collinear && o3 != Orientation::Collinear {
        // Standard two-line intersection solve.
        let d1 = a2 - a1;
        let d2 = b2 - b1;
        let denom = d1.cross(&d2);
        if denom.abs() > 1e-300 {
            let diff = b1 - a1;
            let t = diff.cross(&d2) / denom;
            let p = a1 + d1 * t;
            return (p, IntersectionType::Proper);
        }
    }

    let all_collinear = o1 == Orientation::Collinear
        && o2 == Orientation::Collinear
        && o3 == Orientation::Collinear
        && o4 == Orientation::Collinear;

    if all_collinear {
        // Project onto the dominant axis to find the overlap interval.
        let along = |p: Point2| -> f64 {
            let d = a2 - a1;
            if d.x.abs() >= d.y.abs() {
                p.x
            } else {
                p.y
            }
        };
        let (a_lo, a_hi) = (along(a1).min(along(a2)), along(a1).max(along(a2)));
        let (b_lo, b_hi) = (along(b1).min(along(b2)), along(b1).max(along(b2)));
        let lo = a_lo.max(b_lo);
        let hi = a_hi.min(b_hi);
        let tol = eps.tolerance(max_magnitude(&[a1, a2, b1, b2]));
        if hi - lo > tol {
            let mid = (lo + hi) / 2.0;
            let d = a2 - a1;
            let t = if d.x.abs() >= d.y.abs() {
                if d.x.abs() > 1e-300 {
                    (mid - a1.x) / d.x
                } else {
                    0.0
                }
            } else if d.y.abs() > 1e-300 {
                (mid - a1.y) / d.y
            } else {
                0.0
            };
            return (a1 + d * t, IntersectionType::CollinearOverlap);
        } else if hi - lo >= -tol {
            // Touching at a single collinear point.
            let mid = (lo + hi) / 2.0;
            let d = a2 - a1;
            let t = if d.x.abs() >= d.y.abs() {
                if d.x.abs() > 1e-300 {
                    (mid - a1.x) / d.x
                } else {
                    0.0
                }
            } else if d.y.abs() > 1e-300 {
                (mid - a1.y) / d.y
            } else {
                0.0
            };
            return (a1 + d * t, IntersectionType::Touching);
        }
        return (a1, IntersectionType::None);
    }

    let (intersects, _) = segments_intersect(a1, a2, b1, b2, eps);
    if intersects {
        // Endpoint touch, not collinear: the shared/touching point is
        // whichever endpoint lies on the other segment.
        for &(p, on) in &[
            (b1, o1 == Orientation::Collinear && on_segment(a1, b1, a2)),
            (b2, o2 == Orientation::Collinear && on_segment(a1, b2, a2)),
            (a1, o3 == Orientation::Collinear && on_segment(b1, a1, b2)),
            (a2, o4 == Orientation::Collinear && on_segment(b1, a2, b2)),
        ] {
            if on {
                return (p, IntersectionType::Touching);
            }
        }
    }

    (a1, IntersectionType::None)
}

/// Point-in-triangle test, closed (boundary counts as inside).
pub fn point_in_triangle(p: Point2, a: Point2, b: Point2, c: Point2, eps: &Epsilon) -> bool {
    let o1 = orientation_2d(a, b, p, eps);
    let o2 = orientation_2d(b, c, p, eps);
    let o3 = orientation_2d(c, a, p, eps);

    let all_ccw_or_on = o1 != Orientation::Clockwise
        && o2 != Orientation::Clockwise
        && o3 != Orientation::Clockwise;
    let all_cw_or_on = o1 != Orientation::CounterClockwise
        && o2 != Orientation::CounterClockwise
        && o3 != Orientation::CounterClockwise;

    all_ccw_or_on || all_cw_or_on
}

/// Point-in-triangle test, open (boundary does not count as inside).
pub fn point_strictly_in_triangle(p: Point2, a: Point2, b: Point2, c: Point2, eps: &Epsilon) -> bool {
    let o1 = orientation_2d(a, b, p, eps);
    let o2 = orientation_2d(b, c, p, eps);
    let o3 = orientation_2d(c, a, p, eps);

    let all_strict_ccw = o1 == Orientation::CounterClockwise
        && o2 == Orientation::CounterClockwise
        && o3 == Orientation::CounterClockwise;
    let all_strict_cw = o1 == Orientation::Clockwise
        && o2 == Orientation::Clockwise
        && o3 == Orientation::Clockwise;

    all_strict_ccw || all_strict_cw
}

/// Check if a vertex forms a convex angle, given three consecutive polygon
/// vertices in CCW winding.
#[inline]
pub fn is_convex_vertex(prev: Point2, curr: Point2, next: Point2, eps: &Epsilon) -> bool {
    orientation_2d(prev, curr, next, eps) == Orientation::CounterClockwise
}

/// Check if a vertex forms a reflex angle, given three consecutive polygon
/// vertices in CCW winding.
#[inline]
pub fn is_reflex_vertex(prev: Point2, curr: Point2, next: Point2, eps: &Epsilon) -> bool {
    orientation_2d(prev, curr, next, eps) == Orientation::Clockwise
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eps() -> Epsilon {
        Epsilon::default()
    }

    #[test]
    fn test_basic_orientation() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(1.0, 0.0);
        let c_left = Point2::new(0.5, 1.0);
        let c_right = Point2::new(0.5, -1.0);
        let c_on = Point2::new(0.5, 0.0);

        assert_eq!(orientation_2d(a, b, c_left, &eps()), Orientation::CounterClockwise);
        assert_eq!(orientation_2d(a, b, c_right, &eps()), Orientation::Clockwise);
        assert_eq!(orientation_2d(a, b, c_on, &eps()), Orientation::Collinear);
    }

    #[test]
    fn test_nearly_collinear_within_tolerance_is_collinear() {
        let a = Point2::new(0.0, 0.0);
        let c = Point2::new(2.0, 0.0);
        let b = Point2::new(1.0, 1e-13);
        assert_eq!(orientation_2d(a, c, b, &eps()), Orientation::Collinear);
    }

    #[test]
    fn test_large_coordinate_stability() {
        let base = 1_000_000.0;
        let a = Point2::new(base, base);
        let b = Point2::new(base + 1.0, base);
        let c = Point2::new(base + 0.5, base + 0.5);
        assert_eq!(orientation_2d(a, b, c, &eps()), Orientation::CounterClockwise);
    }

    #[test]
    fn test_segments_intersect_basic() {
        let a1 = Point2::new(0.0, 0.0);
        let a2 = Point2::new(1.0, 1.0);
        let b1 = Point2::new(0.0, 1.0);
        let b2 = Point2::new(1.0, 0.0);

        assert_eq!(segments_intersect(a1, a2, b1, b2, &eps()), (true, true));
    }

    #[test]
    fn test_segments_touch_endpoint() {
        let a1 = Point2::new(0.0, 0.0);
        let a2 = Point2::new(1.0, 0.0);
        let b1 = Point2::new(1.0, 0.0);
        let b2 = Point2::new(2.0, 1.0);

        assert_eq!(segments_intersect(a1, a2, b1, b2, &eps()), (true, false));
    }

    #[test]
    fn test_segments_parallel_no_intersect() {
        let a1 = Point2::new(0.0, 0.0);
        let a2 = Point2::new(1.0, 0.0);
        let b1 = Point2::new(0.0, 1.0);
        let b2 = Point2::new(1.0, 1.0);

        assert_eq!(segments_intersect(a1, a2, b1, b2, &eps()).0, false);
    }

    #[test]
    fn test_collinear_overlap_classified() {
        let a1 = Point2::new(0.0, 0.0);
        let a2 = Point2::new(2.0, 0.0);
        let b1 = Point2::new(1.0, 0.0);
        let b2 = Point2::new(3.0, 0.0);

        let (_, kind) = segment_intersection_point(a1, a2, b1, b2, &eps());
        assert_eq!(kind, IntersectionType::CollinearOverlap);
    }

    #[test]
    fn test_point_in_triangle_basic() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(10.0, 0.0);
        let c = Point2::new(5.0, 10.0);

        assert!(point_in_triangle(Point2::new(5.0, 3.0), a, b, c, &eps()));
        assert!(!point_in_triangle(Point2::new(-1.0, 0.0), a, b, c, &eps()));
        assert!(point_in_triangle(Point2::new(5.0, 0.0), a, b, c, &eps()));
        assert!(!point_strictly_in_triangle(Point2::new(5.0, 0.0), a, b, c, &eps()));
        assert!(point_strictly_in_triangle(Point2::new(5.0, 3.0), a, b, c, &eps()));
    }

    #[test]
    fn test_convex_reflex() {
        let prev = Point2::new(0.0, 0.0);
        let curr = Point2::new(1.0, 0.0);
        let next = Point2::new(1.0, 1.0);
        assert!(is_convex_vertex(prev, curr, next, &eps()));
        assert!(!is_reflex_vertex(prev, curr, next, &eps()));

        let next_reflex = Point2::new(1.0, -1.0);
        assert!(!is_convex_vertex(prev, curr, next_reflex, &eps()));
        assert!(is_reflex_vertex(prev, curr, next_reflex, &eps()));
    }

    #[test]
    fn test_incircle_basic() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(1.0, 0.0);
        let c = Point2::new(0.0, 1.0);

        let inside = Point2::new(0.3, 0.3);
        assert_eq!(incircle_2d(a, b, c, inside, &eps()), CirclePosition::Inside);

        let outside = Point2::new(10.0, 10.0);
        assert_eq!(incircle_2d(a, b, c, outside, &eps()), CirclePosition::Outside);
    }

    #[test]
    fn test_orientation_enum() {
        assert!(Orientation::CounterClockwise.is_definite());
        assert!(Orientation::Clockwise.is_definite());
        assert!(!Orientation::Collinear.is_definite());

        assert_eq!(Orientation::CounterClockwise.opposite(), Orientation::Clockwise);
        assert_eq!(Orientation::Collinear.opposite(), Orientation::Collinear);
    }
}
