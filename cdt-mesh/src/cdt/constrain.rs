//! Phase 4: constraint enforcement for boundary edges via edge-flip repair.

use cdt_math::robust_predicates::segments_properly_intersect;

use crate::error::{MeshError, MeshResult};
use crate::ids::Edge;
use crate::mesh::Mesh;

use super::flip;
use super::Working;

/// Ensure every edge in `boundary_edges` appears in `working`, repairing
/// missing ones by flipping crossing edges until the constraint emerges.
pub(crate) fn enforce(mesh: &Mesh, working: &mut Working, boundary_edges: &[Edge]) -> MeshResult<()> {
    for &constraint in boundary_edges {
        if working.has_edge(constraint) {
            continue;
        }
        insert_constraint(mesh, working, constraint)?;
    }
    Ok(())
}

fn insert_constraint(mesh: &Mesh, working: &mut Working, constraint: Edge) -> MeshResult<()> {
    let eps = mesh.config().epsilon;
    let (ca, cb) = constraint.endpoints();
    let (pca, pcb) = (mesh.vertex(ca)?, mesh.vertex(cb)?);

    let safety_limit = working.len() * working.len() + 32;
    let mut guard = 0usize;

    while !working.has_edge(constraint) {
        guard += 1;
        if guard > safety_limit {
            return Err(MeshError::CannotTriangulate);
        }

        let crossing = find_crossing_edge(mesh, working, pca, pcb, &eps)?;
        let (t1, t2, c, d) =
            flip::quad_for_edge(working, crossing).ok_or(MeshError::CannotTriangulate)?;
        let (a, b) = crossing.endpoints();

        if !flip::is_flip_legal(mesh, a, b, c, d, &eps) {
            return Err(MeshError::CannotTriangulate);
        }

        flip::perform_flip(working, t1, t2, a, b, c, d);
    }

    Ok(())
}

fn find_crossing_edge(
    mesh: &Mesh,
    working: &Working,
    pca: cdt_math::Point2,
    pcb: cdt_math::Point2,
    eps: &cdt_math::Epsilon,
) -> MeshResult<Edge> {
    for edge in working.edges() {
        if working.owners_of(edge).len() != 2 {
            continue; // boundary edge of the working triangulation, never a flip target
        }
        let (a, b) = edge.endpoints();
        let (pa, pb) = (mesh.vertex(a)?, mesh.vertex(b)?);
        if segments_properly_intersect(pa, pb, pca, pcb, eps) {
            return Ok(edge);
        }
    }
    Err(MeshError::CannotTriangulate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cdt::earclip;
    use crate::config::MeshConfig;
    use cdt_math::{Epsilon, Point2};

    #[test]
    fn existing_constraint_edges_are_no_ops() {
        let mut mesh = Mesh::new(MeshConfig::for_cdt(Epsilon::default()));
        let ids: Vec<_> = [
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ]
        .iter()
        .map(|&p| mesh.add_vertex(p))
        .collect();

        let mut working = earclip::triangulate(&mesh, &ids).unwrap();
        let boundary: Vec<Edge> = (0..4)
            .map(|i| Edge::new(ids[i], ids[(i + 1) % 4]))
            .collect();

        enforce(&mesh, &mut working, &boundary).unwrap();
        for e in &boundary {
            assert!(working.has_edge(*e));
        }
    }

    #[test]
    fn non_triangulation_diagonal_gets_inserted_by_flip() {
        // A non-convex quad where ear clipping picks the "wrong" diagonal
        // relative to an externally imposed constraint along the other one.
        let mut mesh = Mesh::new(MeshConfig::for_cdt(Epsilon::default()));
        let a = mesh.add_vertex(Point2::new(0.0, 0.0));
        let b = mesh.add_vertex(Point2::new(4.0, 0.0));
        let c = mesh.add_vertex(Point2::new(4.0, 4.0));
        let d = mesh.add_vertex(Point2::new(0.0, 4.0));

        let mut working = Working::new();
        working.insert([a, b, d]);
        working.insert([b, c, d]);

        let constraint = Edge::new(a, c);
        insert_constraint(&mesh, &mut working, constraint).unwrap();
        assert!(working.has_edge(constraint));
    }
}
