//! Shared edge-flip mechanics used by both constraint repair (phase 4) and
//! Delaunay propagation (phase 5).

use cdt_math::robust_predicates::{orientation_2d, Orientation};
use cdt_math::Epsilon;

use crate::ids::{Edge, VertexId};
use crate::mesh::Mesh;

use super::Working;

/// The two triangles sharing `edge`, and their vertices opposite it, in the
/// form `(t1, t2, c, d)` where `t1`'s opposite vertex is `c` and `t2`'s is
/// `d`. `None` if the edge is a boundary edge (used by only one triangle) or
/// is unused.
pub(crate) fn quad_for_edge(working: &Working, edge: Edge) -> Option<(u64, u64, VertexId, VertexId)> {
    let owners = working.owners_of(edge);
    if owners.len() != 2 {
        return None;
    }
    let (t1, t2) = (owners[0], owners[1]);
    let c = triangle_opposite(working.verts(t1), edge)?;
    let d = triangle_opposite(working.verts(t2), edge)?;
    Some((t1, t2, c, d))
}

fn triangle_opposite(verts: [VertexId; 3], edge: Edge) -> Option<VertexId> {
    let (a, b) = edge.endpoints();
    verts.into_iter().find(|&v| v != a && v != b)
}

/// True if flipping the shared edge `(a, b)` to `(c, d)` is legal: the union
/// quadrilateral, visited in order `a, c, b, d`, must be strictly convex.
pub(crate) fn is_flip_legal(
    mesh: &Mesh,
    a: VertexId,
    b: VertexId,
    c: VertexId,
    d: VertexId,
    eps: &Epsilon,
) -> bool {
    let (pa, pb, pc, pd) = match (mesh.vertex(a), mesh.vertex(b), mesh.vertex(c), mesh.vertex(d)) {
        (Ok(pa), Ok(pb), Ok(pc), Ok(pd)) => (pa, pb, pc, pd),
        _ => return false,
    };

    let turns = [
        orientation_2d(pa, pc, pb, eps),
        orientation_2d(pc, pb, pd, eps),
        orientation_2d(pb, pd, pa, eps),
        orientation_2d(pd, pa, pc, eps),
    ];

    turns.iter().all(|&t| t == Orientation::CounterClockwise)
        || turns.iter().all(|&t| t == Orientation::Clockwise)
}

/// Replace the two triangles sharing edge `(a, b)` with two sharing the
/// opposite diagonal `(c, d)`.
pub(crate) fn perform_flip(
    working: &mut Working,
    t1: u64,
    t2: u64,
    a: VertexId,
    b: VertexId,
    c: VertexId,
    d: VertexId,
) -> (u64, u64) {
    working.remove(t1);
    working.remove(t2);
    let new1 = working.insert([c, d, a]);
    let new2 = working.insert([d, c, b]);
    (new1, new2)
}
