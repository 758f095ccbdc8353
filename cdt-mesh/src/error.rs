//! Error types for the cdt-mesh crate.

use thiserror::Error;

/// Errors that can occur while building or mutating a [`crate::mesh::Mesh`].
///
/// Every variant carries enough context for programmatic handling; callers
/// that only care about success/failure can still match on the discriminant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    /// A vertex id was out of range or the `NIL` sentinel.
    #[error("invalid vertex id: {0}")]
    InvalidVertexId(String),

    /// A triangle index was out of range.
    #[error("invalid triangle index: {0}")]
    InvalidTriangleIndex(usize),

    /// A candidate triangle repeats a vertex id.
    #[error("triangle has repeated vertex ids")]
    DegenerateTopology,

    /// A candidate triangle is collinear or has zero area within tolerance.
    #[error("triangle is collinear or has zero area")]
    DegenerateGeometry,

    /// The unordered vertex triple is already present in the mesh.
    #[error("triangle with this vertex set already exists")]
    Duplicate,

    /// One of the candidate triangle's edges already borders two triangles.
    #[error("edge already borders two triangles")]
    EdgeSaturated,

    /// One of the candidate triangle's edges properly crosses an existing,
    /// non-adjacent edge.
    #[error("candidate edge properly intersects an existing edge")]
    EdgeIntersection,

    /// The candidate triangle strictly contains, or is strictly contained
    /// by, an existing triangle's vertex.
    #[error("candidate triangle overlaps an existing triangle")]
    TriangleOverlap,

    /// A supplied loop crosses itself.
    #[error("polygon self-intersects")]
    PolygonSelfIntersects,

    /// A supplied loop has fewer than 3 distinct vertices or zero area.
    #[error("polygon is degenerate or below the minimum size")]
    PolygonTooSmall,

    /// A hole is not strictly inside its enclosing outer perimeter.
    #[error("hole is not strictly inside its perimeter")]
    HoleNotInsidePerimeter,

    /// Two holes overlap or nest.
    #[error("hole intersects another hole")]
    HoleIntersectsHole,

    /// Two perimeters cross or nest.
    #[error("perimeter intersects another perimeter")]
    OverlappingPerimeters,

    /// Ear-clipping made no progress despite a validated input.
    #[error("ear clipping could not find a valid ear")]
    CannotTriangulate,

    /// Load/save failure from the persistence layer.
    #[error("I/O error: {0}")]
    IoError(String),

    /// Math error propagated from `cdt-math`.
    #[error("math error: {0}")]
    MathError(#[from] cdt_math::MathError),
}

/// Result type for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;
