//! Mesh configuration: a single record rather than option-pattern builders.

use serde::{Deserialize, Serialize};

use cdt_math::Epsilon;

/// Configuration governing a [`crate::mesh::Mesh`]'s tolerance and
/// enforcement behavior.
///
/// Replaces the `WithEpsilon`/`WithMergeVertices`/... option-function
/// pattern with one enumerated record: every field is visible at the call
/// site, and there is exactly one way to construct a non-default config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeshConfig {
    /// Tolerance policy used by every predicate the mesh consults.
    pub epsilon: Epsilon,

    /// If true, `add_vertex` returns an existing vertex id for a point
    /// within tolerance of one already in the table, rather than always
    /// appending. Defaults to `false` for a bare mesh; the CDT engine turns
    /// this on for its own internal mesh.
    pub merge_vertices: bool,

    /// If true, `add_triangle` rejects a candidate whose edge properly
    /// crosses an existing edge that doesn't share a vertex with it.
    pub edge_intersection_check: bool,
}

impl MeshConfig {
    /// Construct a config with explicit values for every field.
    pub fn new(epsilon: Epsilon, merge_vertices: bool, edge_intersection_check: bool) -> Self {
        Self {
            epsilon,
            merge_vertices,
            edge_intersection_check,
        }
    }

    /// The configuration the CDT engine builds its working mesh with:
    /// vertex merging on (boundary points at near-identical positions must
    /// collapse to one id), edge-intersection checking off (the engine's own
    /// flip/constrain phases maintain I5, so re-checking on every insert
    /// would be redundant work).
    pub fn for_cdt(epsilon: Epsilon) -> Self {
        Self {
            epsilon,
            merge_vertices: true,
            edge_intersection_check: false,
        }
    }
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            epsilon: Epsilon::default(),
            merge_vertices: false,
            edge_intersection_check: false,
        }
    }
}
