//! Constrained Delaunay Triangulation engine.
//!
//! Builds a [`Mesh`] from an outer polygon and zero or more hole polygons by
//! running, in order: boundary conditioning, ear-clipping, constraint-edge
//! flip repair, Delaunay flip propagation, and hole carving.

mod boundary;
mod constrain;
mod delaunay;
mod earclip;
mod flip;
mod holes;

use std::collections::HashMap;

use cdt_math::Point2;

use crate::config::MeshConfig;
use crate::error::MeshResult;
use crate::ids::{Edge, Triangle, VertexId};
use crate::mesh::Mesh;

/// A triangle tracked by the engine before it is committed to the public
/// [`Mesh`].
#[derive(Debug, Clone, Copy)]
struct WorkingTriangle {
    verts: [VertexId; 3],
}

/// The engine's own triangle set and edge adjacency, kept independent of
/// `Mesh`'s validated insertion path so flips and hole carving can mutate
/// freely; only the survivors are committed at the end.
#[derive(Debug, Default)]
struct Working {
    next_id: u64,
    triangles: HashMap<u64, WorkingTriangle>,
    adjacency: HashMap<Edge, Vec<u64>>,
}

impl Working {
    fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, verts: [VertexId; 3]) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        let t = Triangle::new(verts[0], verts[1], verts[2]);
        for edge in t.edges() {
            self.adjacency.entry(edge).or_default().push(id);
        }
        self.triangles.insert(id, WorkingTriangle { verts });
        id
    }

    fn remove(&mut self, id: u64) {
        if let Some(t) = self.triangles.remove(&id) {
            let tri = Triangle::new(t.verts[0], t.verts[1], t.verts[2]);
            for edge in tri.edges() {
                if let Some(owners) = self.adjacency.get_mut(&edge) {
                    owners.retain(|&o| o != id);
                    if owners.is_empty() {
                        self.adjacency.remove(&edge);
                    }
                }
            }
        }
    }

    fn verts(&self, id: u64) -> [VertexId; 3] {
        self.triangles[&id].verts
    }

    fn owners_of(&self, edge: Edge) -> &[u64] {
        self.adjacency.get(&edge).map(Vec::as_slice).unwrap_or(&[])
    }

    fn has_edge(&self, edge: Edge) -> bool {
        !self.owners_of(edge).is_empty()
    }

    fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.adjacency.keys().copied()
    }

    fn ids(&self) -> Vec<u64> {
        self.triangles.keys().copied().collect()
    }

    fn len(&self) -> usize {
        self.triangles.len()
    }
}

fn loop_edges(ids: &[VertexId]) -> Vec<Edge> {
    let n = ids.len();
    (0..n).map(|i| Edge::new(ids[i], ids[(i + 1) % n])).collect()
}

/// Build a mesh triangulating `outer` minus the union of `holes`, using the
/// given configuration's tolerance policy for every predicate.
pub fn build_simple(outer: &[Point2], holes: &[Vec<Point2>], config: MeshConfig) -> MeshResult<Mesh> {
    let (outer_pts, hole_pts) = boundary::condition(outer, holes, &config.epsilon)?;

    let mut mesh = Mesh::new(config);

    let perimeter_idx = mesh.add_perimeter(&outer_pts)?;
    let outer_ids: Vec<VertexId> = mesh.perimeters()[perimeter_idx].vertices().to_vec();

    let mut hole_ids: Vec<Vec<VertexId>> = Vec::with_capacity(hole_pts.len());
    for h in &hole_pts {
        let hole_idx = mesh.add_hole(h)?;
        hole_ids.push(mesh.holes()[hole_idx].vertices().to_vec());
    }

    let mut working = earclip::triangulate(&mesh, &outer_ids)?;

    let mut constrained_edges = loop_edges(&outer_ids);
    for h in &hole_ids {
        constrained_edges.extend(loop_edges(h));
    }

    constrain::enforce(&mesh, &mut working, &constrained_edges)?;
    delaunay::propagate(&mesh, &mut working, &constrained_edges);
    holes::carve(&mesh, &mut working, &hole_pts)?;

    for id in working.ids() {
        let [a, b, c] = working.verts(id);
        mesh.add_triangle(a, b, c)?;
    }

    Ok(mesh)
}

/// Build with a default-epsilon, merge-enabled configuration.
pub fn build_simple_default(outer: &[Point2], holes: &[Vec<Point2>]) -> MeshResult<Mesh> {
    build_simple(outer, holes, MeshConfig::for_cdt(cdt_math::Epsilon::default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_square_with_no_holes() {
        let outer = vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ];
        let mesh = build_simple_default(&outer, &[]).unwrap();
        assert_eq!(mesh.triangle_count(), 2);
        assert!(mesh.verify_invariants().is_ok());
    }

    #[test]
    fn builds_square_with_centered_hole() {
        let outer = vec![
            Point2::new(0.0, 0.0),
            Point2::new(30.0, 0.0),
            Point2::new(30.0, 30.0),
            Point2::new(0.0, 30.0),
        ];
        let hole = vec![
            Point2::new(10.0, 10.0),
            Point2::new(20.0, 10.0),
            Point2::new(20.0, 20.0),
            Point2::new(10.0, 20.0),
        ];
        let mesh = build_simple_default(&outer, &[hole]).unwrap();
        assert!(mesh.triangle_count() > 0);
        assert!(mesh.verify_invariants().is_ok());
        assert_eq!(mesh.holes().len(), 1);
    }

    #[test]
    fn builds_l_shape() {
        let outer = vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 5.0),
            Point2::new(5.0, 5.0),
            Point2::new(5.0, 10.0),
            Point2::new(0.0, 10.0),
        ];
        let mesh = build_simple_default(&outer, &[]).unwrap();
        assert_eq!(mesh.triangle_count(), 4);
        assert!(mesh.verify_invariants().is_ok());
    }

    #[test]
    fn rejects_self_intersecting_outer() {
        let outer = vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(10.0, 0.0),
            Point2::new(0.0, 10.0),
        ];
        assert!(build_simple_default(&outer, &[]).is_err());
    }

    /// True if `(a, b, c)` wound counterclockwise and `d` does not lie
    /// strictly inside its circumcircle; the order-independent form of the
    /// local Delaunay test used by `delaunay::propagate`.
    fn locally_delaunay(
        a: cdt_math::Point2,
        b: cdt_math::Point2,
        c: cdt_math::Point2,
        d: cdt_math::Point2,
        eps: &cdt_math::Epsilon,
    ) -> bool {
        use cdt_math::robust_predicates::{incircle_2d, orientation_2d, CirclePosition, Orientation};
        let (a, b) = if orientation_2d(a, b, c, eps) == Orientation::CounterClockwise {
            (a, b)
        } else {
            (b, a)
        };
        incircle_2d(a, b, c, d, eps) != CirclePosition::Inside
    }

    /// Every interior (non-constrained, two-owner) edge of `mesh` must be
    /// locally Delaunay with respect to both its opposite vertices.
    fn assert_globally_locally_delaunay(mesh: &Mesh, constrained: &std::collections::HashSet<Edge>) {
        let eps = mesh.config().epsilon;
        let mut owners: HashMap<Edge, Vec<Triangle>> = HashMap::new();
        for &t in mesh.triangles() {
            for e in t.edges() {
                owners.entry(e).or_default().push(t);
            }
        }
        for (edge, tris) in &owners {
            if constrained.contains(edge) || tris.len() != 2 {
                continue;
            }
            let (a, b) = edge.endpoints();
            let opposite = |t: &Triangle| {
                t.vertices().into_iter().find(|&v| v != a && v != b).unwrap()
            };
            let c = opposite(&tris[0]);
            let d = opposite(&tris[1]);
            let (pa, pb, pc, pd) = (
                mesh.vertex(a).unwrap(),
                mesh.vertex(b).unwrap(),
                mesh.vertex(c).unwrap(),
                mesh.vertex(d).unwrap(),
            );
            assert!(
                locally_delaunay(pa, pb, pc, pd, &eps),
                "edge {edge:?} is not locally Delaunay"
            );
        }
    }

    fn rectangle(x0: f64, y0: f64, w: f64, h: f64) -> Vec<Point2> {
        vec![
            Point2::new(x0, y0),
            Point2::new(x0 + w, y0),
            Point2::new(x0 + w, y0 + h),
            Point2::new(x0, y0 + h),
        ]
    }

    fn constrained_edges_of(mesh: &Mesh) -> std::collections::HashSet<Edge> {
        // Re-derive constrained edges from the mesh's own committed
        // perimeter/hole loops rather than the input polygons directly,
        // since boundary conditioning may have merged near-duplicate
        // vertices before committing them.
        let mut set = std::collections::HashSet::new();
        for p in mesh.perimeters() {
            set.extend(loop_edges(p.vertices()));
        }
        for h in mesh.holes() {
            set.extend(loop_edges(h.vertices()));
        }
        set
    }

    mod proptest_invariants {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn rectangle_with_no_hole_is_valid_and_delaunay(w in 10.0f64..60.0, h in 10.0f64..60.0) {
                let outer = rectangle(0.0, 0.0, w, h);
                let mesh = build_simple_default(&outer, &[]).unwrap();
                prop_assert!(mesh.verify_invariants().is_ok());
                let constrained = constrained_edges_of(&mesh);
                assert_globally_locally_delaunay(&mesh, &constrained);
            }

            #[test]
            fn rectangle_with_centered_hole_is_valid_and_delaunay(
                w in 10.0f64..60.0,
                h in 10.0f64..60.0,
                margin_frac in 0.1f64..0.4,
            ) {
                let outer = rectangle(0.0, 0.0, w, h);
                let hole = rectangle(
                    w * margin_frac,
                    h * margin_frac,
                    w * (1.0 - 2.0 * margin_frac),
                    h * (1.0 - 2.0 * margin_frac),
                );
                let mesh = build_simple_default(&outer, &[hole]).unwrap();
                prop_assert!(mesh.verify_invariants().is_ok());
                prop_assert_eq!(mesh.holes().len(), 1);
                let constrained = constrained_edges_of(&mesh);
                assert_globally_locally_delaunay(&mesh, &constrained);
            }
        }
    }
}
