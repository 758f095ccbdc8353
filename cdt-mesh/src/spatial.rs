//! R*-tree spatial index for vertex merge-candidate lookup.
//!
//! [`crate::mesh::Mesh::add_vertex`] needs to answer "is there already a
//! vertex within tolerance of this point?" in better than O(n) time as the
//! vertex table grows; this index narrows the search to a small candidate
//! set before falling back to an exact tolerance check.

use rstar::{PointDistance, RTree, RTreeObject, AABB as RStarAABB};

use crate::ids::VertexId;

#[derive(Debug, Clone, Copy)]
struct VertexEntry {
    id: VertexId,
    position: [f64; 2],
}

impl RTreeObject for VertexEntry {
    type Envelope = RStarAABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        RStarAABB::from_point(self.position)
    }
}

impl PointDistance for VertexEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.position[0] - point[0];
        let dy = self.position[1] - point[1];
        dx * dx + dy * dy
    }
}

impl PartialEq for VertexEntry {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// Spatial index over the mesh's vertex table, keyed by [`VertexId`].
pub struct VertexIndex {
    tree: RTree<VertexEntry>,
}

impl VertexIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Insert a vertex at a position.
    pub fn insert(&mut self, id: VertexId, position: [f64; 2]) {
        self.tree.insert(VertexEntry { id, position });
    }

    /// All vertex ids within `radius` of `center` (Euclidean distance).
    pub fn within_radius(&self, center: [f64; 2], radius: f64) -> Vec<VertexId> {
        let radius_sq = radius * radius;
        self.tree
            .locate_within_distance(center, radius_sq)
            .map(|entry| entry.id)
            .collect()
    }

    /// Number of vertices indexed.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// True if the index holds no vertices.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl Default for VertexIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_index_is_empty() {
        let idx = VertexIndex::new();
        assert!(idx.is_empty());
        assert_eq!(idx.len(), 0);
    }

    #[test]
    fn within_radius_finds_candidates() {
        let mut idx = VertexIndex::new();
        idx.insert(VertexId(0), [0.0, 0.0]);
        idx.insert(VertexId(1), [0.0001, 0.0001]);
        idx.insert(VertexId(2), [1000.0, 1000.0]);

        let nearby = idx.within_radius([0.0, 0.0], 1.0);
        assert_eq!(nearby.len(), 2);
        assert!(nearby.contains(&VertexId(0)));
        assert!(nearby.contains(&VertexId(1)));
    }
}
