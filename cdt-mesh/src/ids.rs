//! Topological identifiers: vertex ids, canonical edges, triangles, loops.
//!
//! Unlike a free-form topology graph keyed by UUID, a CDT mesh is array
//! backed: vertices are appended once and never moved, so a plain sequential
//! index makes a perfectly stable, cheap identifier. IDs are never recycled
//! or reordered for the mesh's lifetime.

use serde::{Deserialize, Serialize};

/// Stable index into a [`crate::mesh::Mesh`]'s vertex table.
///
/// IDs are assigned sequentially from 0 as vertices are added and are never
/// reused, even if a vertex were somehow removed (the mesh never removes
/// vertices).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexId(pub usize);

impl VertexId {
    /// Sentinel value denoting "no vertex".
    pub const NIL: Self = Self(usize::MAX);

    /// True if this is the `NIL` sentinel.
    #[inline]
    pub fn is_nil(&self) -> bool {
        *self == Self::NIL
    }

    /// The raw index, if not `NIL`.
    #[inline]
    pub fn index(&self) -> Option<usize> {
        if self.is_nil() {
            None
        } else {
            Some(self.0)
        }
    }
}

impl std::fmt::Display for VertexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_nil() {
            write!(f, "v<nil>")
        } else {
            write!(f, "v{}", self.0)
        }
    }
}

/// An undirected edge between two vertices, stored canonically as
/// `(min, max)` so that equality is purely structural.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Edge(VertexId, VertexId);

impl Edge {
    /// Build the canonical form of the edge between `a` and `b`.
    ///
    /// # Panics
    /// Panics if `a == b`; a mesh edge must join two distinct vertices.
    pub fn new(a: VertexId, b: VertexId) -> Self {
        assert!(a != b, "edge endpoints must be distinct");
        if a < b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    /// The smaller endpoint.
    #[inline]
    pub fn lo(&self) -> VertexId {
        self.0
    }

    /// The larger endpoint.
    #[inline]
    pub fn hi(&self) -> VertexId {
        self.1
    }

    /// Both endpoints as a tuple, in canonical (min, max) order.
    #[inline]
    pub fn endpoints(&self) -> (VertexId, VertexId) {
        (self.0, self.1)
    }

    /// True if this edge has `v` as one of its endpoints.
    #[inline]
    pub fn contains(&self, v: VertexId) -> bool {
        self.0 == v || self.1 == v
    }

    /// The other endpoint, given one of them. Returns `None` if `v` is not
    /// an endpoint of this edge.
    pub fn other(&self, v: VertexId) -> Option<VertexId> {
        if self.0 == v {
            Some(self.1)
        } else if self.1 == v {
            Some(self.0)
        } else {
            None
        }
    }
}

/// An oriented triangle, stored as the ordered triple it was created with.
///
/// The order carries no winding contract at storage time (the mesh enforces
/// non-degeneracy separately); equality that should ignore winding and
/// rotation is expressed via [`Triangle::unordered_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triangle(pub VertexId, pub VertexId, pub VertexId);

impl Triangle {
    /// Construct a triangle from three vertex ids, in the given order.
    pub fn new(a: VertexId, b: VertexId, c: VertexId) -> Self {
        Self(a, b, c)
    }

    /// The three vertex ids as an array, in storage order.
    #[inline]
    pub fn vertices(&self) -> [VertexId; 3] {
        [self.0, self.1, self.2]
    }

    /// True if any two of the three vertex ids coincide.
    pub fn has_repeated_vertex(&self) -> bool {
        self.0 == self.1 || self.1 == self.2 || self.0 == self.2
    }

    /// The triangle's three canonical edges.
    pub fn edges(&self) -> [Edge; 3] {
        [
            Edge::new(self.0, self.1),
            Edge::new(self.1, self.2),
            Edge::new(self.2, self.0),
        ]
    }

    /// A winding- and rotation-independent key identifying the triangle's
    /// vertex *set* (not its order), used to detect duplicate triangles.
    pub fn unordered_key(&self) -> [VertexId; 3] {
        let mut v = self.vertices();
        v.sort();
        v
    }

    /// True if `other` has the same unordered vertex set as `self`.
    #[inline]
    pub fn same_vertex_set(&self, other: &Triangle) -> bool {
        self.unordered_key() == other.unordered_key()
    }

    /// The third vertex opposite a given edge of this triangle. Returns
    /// `None` if the edge's endpoints are not both vertices of this
    /// triangle.
    pub fn opposite_vertex(&self, edge: Edge) -> Option<VertexId> {
        let (a, b) = edge.endpoints();
        self.vertices().into_iter().find(|&v| v != a && v != b)
    }
}

/// A closed polygon loop of vertex ids: a perimeter or a hole boundary.
///
/// The last vertex is implicitly connected back to the first; it is never
/// repeated in storage. `num_edges() == num_vertices()`, except for
/// degenerate loops of fewer than 3 vertices, which have no edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolygonLoop {
    vertices: Vec<VertexId>,
}

impl PolygonLoop {
    /// Build a loop from an ordered, non-repeating vertex sequence.
    pub fn new(vertices: Vec<VertexId>) -> Self {
        Self { vertices }
    }

    /// The loop's vertex ids, in order.
    #[inline]
    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    /// Number of vertices in the loop.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges in the loop: zero for a degenerate (< 3 vertex) loop,
    /// otherwise equal to the vertex count.
    pub fn num_edges(&self) -> usize {
        if self.vertices.len() < 3 {
            0
        } else {
            self.vertices.len()
        }
    }

    /// The loop's edges as canonical [`Edge`] values, in traversal order.
    pub fn edges(&self) -> Vec<Edge> {
        let n = self.num_edges();
        (0..n)
            .map(|i| Edge::new(self.vertices[i], self.vertices[(i + 1) % self.vertices.len()]))
            .collect()
    }

    /// Resolve this loop's vertex ids into world-space points using a
    /// vertex lookup function, e.g. `Mesh::vertex`.
    pub fn points<F>(&self, lookup: F) -> Vec<cdt_math::Point2>
    where
        F: Fn(VertexId) -> cdt_math::Point2,
    {
        self.vertices.iter().map(|&v| lookup(v)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_id_nil() {
        assert!(VertexId::NIL.is_nil());
        assert!(!VertexId(0).is_nil());
        assert_eq!(VertexId(3).index(), Some(3));
        assert_eq!(VertexId::NIL.index(), None);
    }

    #[test]
    fn edge_is_canonical() {
        let e1 = Edge::new(VertexId(2), VertexId(5));
        let e2 = Edge::new(VertexId(5), VertexId(2));
        assert_eq!(e1, e2);
        assert_eq!(e1.lo(), VertexId(2));
        assert_eq!(e1.hi(), VertexId(5));
    }

    #[test]
    #[should_panic]
    fn edge_rejects_self_loop() {
        Edge::new(VertexId(1), VertexId(1));
    }

    #[test]
    fn edge_other_endpoint() {
        let e = Edge::new(VertexId(1), VertexId(4));
        assert_eq!(e.other(VertexId(1)), Some(VertexId(4)));
        assert_eq!(e.other(VertexId(4)), Some(VertexId(1)));
        assert_eq!(e.other(VertexId(9)), None);
    }

    #[test]
    fn triangle_repeated_vertex() {
        let t = Triangle::new(VertexId(0), VertexId(0), VertexId(1));
        assert!(t.has_repeated_vertex());
        let t2 = Triangle::new(VertexId(0), VertexId(1), VertexId(2));
        assert!(!t2.has_repeated_vertex());
    }

    #[test]
    fn triangle_same_vertex_set_ignores_order() {
        let a = Triangle::new(VertexId(0), VertexId(1), VertexId(2));
        let b = Triangle::new(VertexId(2), VertexId(0), VertexId(1));
        assert!(a.same_vertex_set(&b));
        let c = Triangle::new(VertexId(0), VertexId(1), VertexId(3));
        assert!(!a.same_vertex_set(&c));
    }

    #[test]
    fn triangle_opposite_vertex() {
        let t = Triangle::new(VertexId(0), VertexId(1), VertexId(2));
        let e = Edge::new(VertexId(0), VertexId(1));
        assert_eq!(t.opposite_vertex(e), Some(VertexId(2)));
        let not_an_edge = Edge::new(VertexId(0), VertexId(9));
        assert_eq!(t.opposite_vertex(not_an_edge), None);
    }

    #[test]
    fn polygon_loop_edges() {
        let loop_ = PolygonLoop::new(vec![VertexId(0), VertexId(1), VertexId(2)]);
        assert_eq!(loop_.num_edges(), 3);
        let edges = loop_.edges();
        assert_eq!(edges.len(), 3);
        assert!(edges.contains(&Edge::new(VertexId(2), VertexId(0))));
    }

    #[test]
    fn degenerate_loop_has_no_edges() {
        let loop_ = PolygonLoop::new(vec![VertexId(0), VertexId(1)]);
        assert_eq!(loop_.num_edges(), 0);
    }
}
