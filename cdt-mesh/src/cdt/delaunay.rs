//! Phase 5: Delaunay flip propagation to a fixed point.

use std::collections::{HashSet, VecDeque};

use cdt_math::robust_predicates::{incircle_2d, orientation_2d, CirclePosition, Orientation};

use crate::ids::{Edge, VertexId};
use crate::mesh::Mesh;

use super::flip;
use super::Working;

/// Flip every non-constrained interior edge that violates the local
/// Delaunay property, re-enqueueing the edges of each flipped pair, until no
/// more flips are needed.
pub(crate) fn propagate(mesh: &Mesh, working: &mut Working, constrained: &[Edge]) {
    let eps = mesh.config().epsilon;
    let constrained: HashSet<Edge> = constrained.iter().copied().collect();

    let mut queue: VecDeque<Edge> = working
        .edges()
        .filter(|e| !constrained.contains(e))
        .collect();
    let mut queued: HashSet<Edge> = queue.iter().copied().collect();

    while let Some(edge) = queue.pop_front() {
        queued.remove(&edge);

        if constrained.contains(&edge) || !working.has_edge(edge) {
            continue;
        }

        let Some((t1, t2, c, d)) = flip::quad_for_edge(working, edge) else {
            continue;
        };
        let (a, b) = edge.endpoints();

        if !is_locally_delaunay(mesh, a, b, c, d, &eps) {
            if !flip::is_flip_legal(mesh, a, b, c, d, &eps) {
                continue; // cannot improve; leave as-is
            }
            flip::perform_flip(working, t1, t2, a, b, c, d);

            for e in [
                Edge::new(c, d),
                Edge::new(a, c),
                Edge::new(c, b),
                Edge::new(b, d),
                Edge::new(d, a),
            ] {
                if !constrained.contains(&e) && queued.insert(e) {
                    queue.push_back(e);
                }
            }
        }
    }
}

fn is_locally_delaunay(
    mesh: &Mesh,
    a: VertexId,
    b: VertexId,
    c: VertexId,
    d: VertexId,
    eps: &cdt_math::Epsilon,
) -> bool {
    let (pa, pb, pc, pd) = match (mesh.vertex(a), mesh.vertex(b), mesh.vertex(c), mesh.vertex(d)) {
        (Ok(pa), Ok(pb), Ok(pc), Ok(pd)) => (pa, pb, pc, pd),
        _ => return true,
    };
    // incircle_2d requires (a, b, c) wound counterclockwise. The canonical
    // edge order (a, b) carries no winding guarantee on its own, so derive
    // it from the owning triangle's actual geometry rather than trusting
    // stored vertex order, which the working triangulation does not
    // preserve across flips.
    let (pa, pb) = if orientation_2d(pa, pb, pc, eps) == Orientation::CounterClockwise {
        (pa, pb)
    } else {
        (pb, pa)
    };
    incircle_2d(pa, pb, pc, pd, eps) != CirclePosition::Inside
}
