//! Phase 3: ear-clipping triangulation of the simply-connected outer region.

use cdt_math::robust_predicates::{orientation_2d, point_in_triangle, Orientation};
use cdt_math::{Epsilon, Point2, Vector2};

use crate::error::{MeshError, MeshResult};
use crate::ids::VertexId;
use crate::mesh::Mesh;

use super::Working;

/// Ear-clip the simply-connected region bounded by the CCW loop `ids` into
/// an initial, unconstrained, possibly non-Delaunay triangulation.
///
/// At each step the whole remaining ring is scanned for eligible ears and
/// the one with the largest minimum angle is clipped, improving triangle
/// quality over a first-found strategy without changing the O(n^2) worst
/// case of plain ear clipping.
pub(crate) fn triangulate(mesh: &Mesh, ids: &[VertexId]) -> MeshResult<Working> {
    let mut working = Working::new();
    let eps = mesh.config().epsilon;

    if ids.len() == 3 {
        working.insert([ids[0], ids[1], ids[2]]);
        return Ok(working);
    }

    let mut ring: Vec<VertexId> = ids.to_vec();
    let mut start = 0usize;
    let safety_limit = ring.len() * ring.len() + 16;
    let mut iterations = 0usize;

    while ring.len() > 3 {
        iterations += 1;
        if iterations > safety_limit {
            return Err(MeshError::CannotTriangulate);
        }

        let n = ring.len();
        let mut best: Option<(usize, f64)> = None;

        for offset in 0..n {
            let i = (start + offset) % n;
            if let Some(score) = ear_score(mesh, &ring, i, &eps)? {
                if best.map(|(_, b)| score > b).unwrap_or(true) {
                    best = Some((i, score));
                }
            }
        }

        let (ear_index, _) = best.ok_or(MeshError::CannotTriangulate)?;
        let n = ring.len();
        let prev = ring[(ear_index + n - 1) % n];
        let cur = ring[ear_index];
        let next = ring[(ear_index + 1) % n];

        working.insert([prev, cur, next]);
        ring.remove(ear_index);

        let remaining = ring.len();
        start = if remaining == 0 {
            0
        } else {
            ear_index.min(remaining - 1)
        };
    }

    working.insert([ring[0], ring[1], ring[2]]);
    Ok(working)
}

fn ear_score(mesh: &Mesh, ring: &[VertexId], i: usize, eps: &Epsilon) -> MeshResult<Option<f64>> {
    let n = ring.len();
    let prev = ring[(i + n - 1) % n];
    let cur = ring[i];
    let next = ring[(i + 1) % n];

    let pa = mesh.vertex(prev)?;
    let pb = mesh.vertex(cur)?;
    let pc = mesh.vertex(next)?;

    if orientation_2d(pa, pb, pc, eps) != Orientation::CounterClockwise {
        return Ok(None);
    }

    for &other in ring {
        if other == prev || other == cur || other == next {
            continue;
        }
        let p = mesh.vertex(other)?;
        if point_in_triangle(p, pa, pb, pc, eps) {
            return Ok(None);
        }
    }

    Ok(Some(min_angle(pa, pb, pc)))
}

fn min_angle(a: Point2, b: Point2, c: Point2) -> f64 {
    let angle_at = |p: Point2, q: Point2, r: Point2| -> f64 {
        let v1 = (q - p).try_normalize().unwrap_or(Vector2::ZERO);
        let v2 = (r - p).try_normalize().unwrap_or(Vector2::ZERO);
        v1.dot(&v2).clamp(-1.0, 1.0).acos()
    };
    angle_at(a, b, c)
        .min(angle_at(b, c, a))
        .min(angle_at(c, a, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MeshConfig;

    #[test]
    fn triangulates_convex_square() {
        let mut mesh = Mesh::new(MeshConfig::for_cdt(Epsilon::default()));
        let ids: Vec<VertexId> = [
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ]
        .iter()
        .map(|&p| mesh.add_vertex(p))
        .collect();

        let working = triangulate(&mesh, &ids).unwrap();
        assert_eq!(working.len(), 2);
    }

    #[test]
    fn triangulates_l_shape() {
        let mut mesh = Mesh::new(MeshConfig::for_cdt(Epsilon::default()));
        let ids: Vec<VertexId> = [
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 5.0),
            Point2::new(5.0, 5.0),
            Point2::new(5.0, 10.0),
            Point2::new(0.0, 10.0),
        ]
        .iter()
        .map(|&p| mesh.add_vertex(p))
        .collect();

        let working = triangulate(&mesh, &ids).unwrap();
        assert_eq!(working.len(), 4);
    }

    #[test]
    fn triangulates_single_triangle() {
        let mut mesh = Mesh::new(MeshConfig::for_cdt(Epsilon::default()));
        let ids: Vec<VertexId> = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        ]
        .iter()
        .map(|&p| mesh.add_vertex(p))
        .collect();

        let working = triangulate(&mesh, &ids).unwrap();
        assert_eq!(working.len(), 1);
    }
}
