//! Phase 1: boundary conditioning — dedup, validation, and winding
//! canonicalization ahead of triangulation.

use cdt_math::{Epsilon, Point2};

use crate::error::{MeshError, MeshResult};
use crate::predicates::{
    polygon_area, polygon_contains_polygon, polygon_self_intersects, polygon_signed_area,
    polygons_intersect,
};

/// Condition the outer polygon and its holes: dedup consecutive near-equal
/// points, reject degenerate rings, canonicalize winding (outer CCW, holes
/// CW), and validate hole nesting (I6).
pub(crate) fn condition(
    outer: &[Point2],
    holes: &[Vec<Point2>],
    eps: &Epsilon,
) -> MeshResult<(Vec<Point2>, Vec<Vec<Point2>>)> {
    let outer = dedup_consecutive(outer, eps);
    validate_ring(&outer, eps)?;
    let outer = canonicalize_winding(outer, true);

    let mut conditioned_holes = Vec::with_capacity(holes.len());
    for hole in holes {
        let h = dedup_consecutive(hole, eps);
        validate_ring(&h, eps)?;
        let h = canonicalize_winding(h, false);
        conditioned_holes.push(h);
    }

    for hole in &conditioned_holes {
        if !polygon_contains_polygon(&outer, hole, eps) {
            return Err(MeshError::HoleNotInsidePerimeter);
        }
    }
    for i in 0..conditioned_holes.len() {
        for j in (i + 1)..conditioned_holes.len() {
            if polygons_intersect(&conditioned_holes[i], &conditioned_holes[j], eps) {
                return Err(MeshError::HoleIntersectsHole);
            }
        }
    }

    Ok((outer, conditioned_holes))
}

fn dedup_consecutive(points: &[Point2], eps: &Epsilon) -> Vec<Point2> {
    let mut out: Vec<Point2> = Vec::with_capacity(points.len());
    for &p in points {
        if let Some(&last) = out.last() {
            if eps.points_merge(last.as_array(), p.as_array()) {
                continue;
            }
        }
        out.push(p);
    }
    if out.len() > 1 && eps.points_merge(out[0].as_array(), out[out.len() - 1].as_array()) {
        out.pop();
    }
    out
}

fn validate_ring(points: &[Point2], eps: &Epsilon) -> MeshResult<()> {
    if points.len() < 3 {
        return Err(MeshError::PolygonTooSmall);
    }
    if polygon_self_intersects(points, eps) {
        return Err(MeshError::PolygonSelfIntersects);
    }
    if polygon_area(points) <= eps.abs {
        return Err(MeshError::PolygonTooSmall);
    }
    Ok(())
}

fn canonicalize_winding(mut points: Vec<Point2>, ccw: bool) -> Vec<Point2> {
    let is_ccw = polygon_signed_area(&points) > 0.0;
    if is_ccw != ccw {
        points.reverse();
    }
    points
}
