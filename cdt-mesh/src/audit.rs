//! Overlap auditor: an offline validator that classifies pairwise triangle
//! relationships without mutating the mesh.

use cdt_math::robust_predicates::{point_strictly_in_triangle, segment_intersection_point, IntersectionType};

use crate::ids::Edge;
use crate::mesh::Mesh;
use crate::predicates::triangle_intersection_area;

/// Classification of a flagged triangle-pair relationship, in the
/// precedence order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapKind {
    /// The two triangles share all three vertices.
    Duplicate,
    /// A non-shared vertex of one triangle lies strictly inside the other.
    VertexInside,
    /// An edge of one triangle properly crosses an edge of the other.
    EdgeCrossing,
    /// An edge pair intersects improperly (touching or collinear overlap)
    /// with no shared endpoint.
    EdgeOverlap,
    /// Exactly two vertices coincide but no edge is shared between them.
    CoordinateDuplicate,
}

/// A single flagged triangle pair, with the positive intersection area that
/// justified reporting it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlapFinding {
    pub triangle_a: usize,
    pub triangle_b: usize,
    pub kind: OverlapKind,
    pub area: f64,
}

/// Classify every triangle pair in `mesh`, keeping only findings whose
/// triangle-intersection area exceeds the mesh's absolute tolerance (zero-
/// area touches are not reported).
pub fn audit(mesh: &Mesh) -> Vec<OverlapFinding> {
    let eps = mesh.config().epsilon;
    let triangles = mesh.triangles();
    let mut findings = Vec::new();

    for i in 0..triangles.len() {
        for j in (i + 1)..triangles.len() {
            let ta = triangles[i];
            let tb = triangles[j];

            let va = ta.vertices();
            let vb = tb.vertices();
            let shared_vertices = va.iter().filter(|v| vb.contains(v)).count();

            let ea = ta.edges();
            let eb = tb.edges();
            let shared_edges = ea.iter().filter(|e| eb.contains(e)).count();

            let Some((pa, pb)) = resolve(mesh, &va, &vb) else {
                continue;
            };

            let kind = classify(shared_vertices, shared_edges, &ea, &eb, &pa, &pb, &va, &vb, &eps);
            let Some(kind) = kind else {
                continue;
            };

            let area = triangle_intersection_area(
                (pa[0], pa[1], pa[2]),
                (pb[0], pb[1], pb[2]),
                &eps,
            );
            if area > eps.abs {
                findings.push(OverlapFinding {
                    triangle_a: i,
                    triangle_b: j,
                    kind,
                    area,
                });
            }
        }
    }

    findings
}

fn resolve(
    mesh: &Mesh,
    va: &[crate::ids::VertexId; 3],
    vb: &[crate::ids::VertexId; 3],
) -> Option<([cdt_math::Point2; 3], [cdt_math::Point2; 3])> {
    let pa = [
        mesh.vertex(va[0]).ok()?,
        mesh.vertex(va[1]).ok()?,
        mesh.vertex(va[2]).ok()?,
    ];
    let pb = [
        mesh.vertex(vb[0]).ok()?,
        mesh.vertex(vb[1]).ok()?,
        mesh.vertex(vb[2]).ok()?,
    ];
    Some((pa, pb))
}

#[allow(clippy::too_many_arguments)]
fn classify(
    shared_vertices: usize,
    shared_edges: usize,
    ea: &[Edge; 3],
    eb: &[Edge; 3],
    pa: &[cdt_math::Point2; 3],
    pb: &[cdt_math::Point2; 3],
    va: &[crate::ids::VertexId; 3],
    vb: &[crate::ids::VertexId; 3],
    eps: &cdt_math::Epsilon,
) -> Option<OverlapKind> {
    if shared_vertices == 3 {
        return Some(OverlapKind::Duplicate);
    }

    for (idx, &v) in va.iter().enumerate() {
        if !vb.contains(&v) && point_strictly_in_triangle(pa[idx], pb[0], pb[1], pb[2], eps) {
            return Some(OverlapKind::VertexInside);
        }
    }
    for (idx, &v) in vb.iter().enumerate() {
        if !va.contains(&v) && point_strictly_in_triangle(pb[idx], pa[0], pa[1], pa[2], eps) {
            return Some(OverlapKind::VertexInside);
        }
    }

    for &edge_a in ea {
        for &edge_b in eb {
            let (a1, a2) = edge_points(edge_a, va, pa);
            let (b1, b2) = edge_points(edge_b, vb, pb);
            let (_, kind) = segment_intersection_point(a1, a2, b1, b2, eps);
            if kind == IntersectionType::Proper {
                return Some(OverlapKind::EdgeCrossing);
            }
        }
    }

    for &edge_a in ea {
        for &edge_b in eb {
            let shares_endpoint = edge_a.contains(edge_b.lo()) || edge_a.contains(edge_b.hi());
            if shares_endpoint {
                continue;
            }
            let (a1, a2) = edge_points(edge_a, va, pa);
            let (b1, b2) = edge_points(edge_b, vb, pb);
            let (_, kind) = segment_intersection_point(a1, a2, b1, b2, eps);
            if matches!(kind, IntersectionType::Touching | IntersectionType::CollinearOverlap) {
                return Some(OverlapKind::EdgeOverlap);
            }
        }
    }

    if shared_vertices == 2 && shared_edges == 0 {
        return Some(OverlapKind::CoordinateDuplicate);
    }

    None
}

fn edge_points(
    edge: Edge,
    verts: &[crate::ids::VertexId; 3],
    points: &[cdt_math::Point2; 3],
) -> (cdt_math::Point2, cdt_math::Point2) {
    let (lo, hi) = edge.endpoints();
    let find = |v: crate::ids::VertexId| verts.iter().position(|&x| x == v).map(|i| points[i]);
    (find(lo).unwrap(), find(hi).unwrap())
}
