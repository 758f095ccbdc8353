//! Persisted mesh format: a deterministic JSON record of vertices,
//! triangles, perimeter/hole loops, and the tolerance configuration.
//!
//! `save` emits a record whose field and array ordering matches the mesh's
//! own insertion order (§5: enumeration order is insertion order), so two
//! saves of an unmodified mesh produce byte-identical output. `load` rebuilds
//! a mesh directly from the record's arrays, then re-checks invariants
//! I1-I7 from scratch; a record that fails any of them is rejected rather
//! than silently repaired.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use cdt_math::{Epsilon, Point2};

use crate::config::MeshConfig;
use crate::error::{MeshError, MeshResult};
use crate::ids::{PolygonLoop, Triangle, VertexId};
use crate::mesh::Mesh;

/// `{x, y}` as persisted, matching [`Point2`] field-for-field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct PointRecord {
    x: f64,
    y: f64,
}

impl From<Point2> for PointRecord {
    fn from(p: Point2) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<PointRecord> for Point2 {
    fn from(p: PointRecord) -> Self {
        Point2::new(p.x, p.y)
    }
}

/// Optional `config` block. Any field left out on load falls back to
/// [`MeshConfig::default`]'s value for that field.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigRecord {
    #[serde(default = "default_epsilon_abs")]
    epsilon_abs: f64,
    #[serde(default = "default_epsilon_rel")]
    epsilon_rel: f64,
    #[serde(default)]
    merge_vertices: bool,
    #[serde(default)]
    edge_intersection_check: bool,
}

fn default_epsilon_abs() -> f64 {
    Epsilon::default().abs
}

fn default_epsilon_rel() -> f64 {
    Epsilon::default().rel
}

impl From<MeshConfig> for ConfigRecord {
    fn from(c: MeshConfig) -> Self {
        Self {
            epsilon_abs: c.epsilon.abs,
            epsilon_rel: c.epsilon.rel,
            merge_vertices: c.merge_vertices,
            edge_intersection_check: c.edge_intersection_check,
        }
    }
}

impl From<ConfigRecord> for MeshConfig {
    fn from(c: ConfigRecord) -> Self {
        MeshConfig::new(
            Epsilon::new(c.epsilon_abs, c.epsilon_rel),
            c.merge_vertices,
            c.edge_intersection_check,
        )
    }
}

/// The on-disk mesh record described by the persistence contract: vertices
/// in insertion order, triangles as vertex-id triples, perimeter/hole loops
/// as unclosed vertex-id sequences, and an optional tolerance config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshRecord {
    vertices: Vec<PointRecord>,
    triangles: Vec<[usize; 3]>,
    perimeters: Vec<Vec<usize>>,
    holes: Vec<Vec<usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    config: Option<ConfigRecord>,
}

impl MeshRecord {
    /// Capture a mesh's current state as a persistable record.
    pub fn from_mesh(mesh: &Mesh) -> Self {
        Self {
            vertices: mesh.vertices().iter().copied().map(PointRecord::from).collect(),
            triangles: mesh
                .triangles()
                .iter()
                .map(|t| {
                    let [a, b, c] = t.vertices();
                    [a.0, b.0, c.0]
                })
                .collect(),
            perimeters: mesh
                .perimeters()
                .iter()
                .map(|p| p.vertices().iter().map(|v| v.0).collect())
                .collect(),
            holes: mesh
                .holes()
                .iter()
                .map(|p| p.vertices().iter().map(|v| v.0).collect())
                .collect(),
            config: Some(ConfigRecord::from(*mesh.config())),
        }
    }

    /// Rebuild a mesh from this record, re-validating invariants I1-I7.
    /// Rejects the record with the first invariant violation found rather
    /// than repairing it.
    pub fn into_mesh(self) -> MeshResult<Mesh> {
        let config: MeshConfig = self.config.map(MeshConfig::from).unwrap_or_default();
        let vertex_count = self.vertices.len();

        let to_vertex_id = |raw: usize| -> MeshResult<VertexId> {
            if raw >= vertex_count {
                return Err(MeshError::InvalidVertexId(raw.to_string()));
            }
            Ok(VertexId(raw))
        };

        let vertices: Vec<Point2> = self.vertices.into_iter().map(Point2::from).collect();

        let mut triangles = Vec::with_capacity(self.triangles.len());
        for [a, b, c] in self.triangles {
            triangles.push(Triangle::new(
                to_vertex_id(a)?,
                to_vertex_id(b)?,
                to_vertex_id(c)?,
            ));
        }

        let to_loop = |raw: Vec<usize>| -> MeshResult<PolygonLoop> {
            let ids = raw
                .into_iter()
                .map(to_vertex_id)
                .collect::<MeshResult<Vec<_>>>()?;
            Ok(PolygonLoop::new(ids))
        };

        let perimeters = self
            .perimeters
            .into_iter()
            .map(to_loop)
            .collect::<MeshResult<Vec<_>>>()?;
        let holes = self.holes.into_iter().map(to_loop).collect::<MeshResult<Vec<_>>>()?;

        let mesh = Mesh::from_parts(vertices, triangles, perimeters, holes, config);
        mesh.verify_invariants()?;
        Ok(mesh)
    }
}

/// Serialize a mesh to a pretty-printed JSON string.
pub fn save(mesh: &Mesh) -> String {
    serde_json::to_string_pretty(&MeshRecord::from_mesh(mesh))
        .expect("MeshRecord serialization is infallible for finite coordinates")
}

/// Serialize a mesh to a compact (no whitespace) JSON string.
pub fn save_compact(mesh: &Mesh) -> String {
    serde_json::to_string(&MeshRecord::from_mesh(mesh))
        .expect("MeshRecord serialization is infallible for finite coordinates")
}

/// Parse and validate a mesh from a JSON string, re-checking I1-I7.
pub fn load(json: &str) -> MeshResult<Mesh> {
    let record: MeshRecord =
        serde_json::from_str(json).map_err(|e| MeshError::IoError(e.to_string()))?;
    record.into_mesh()
}

/// Parse a mesh record from an already-deserialized [`Value`], re-checking
/// I1-I7. Useful for callers that have already gone through a generic JSON
/// layer (e.g. an HTTP handler) before reaching the mesh boundary.
pub fn load_value(value: Value) -> MeshResult<Mesh> {
    let record: MeshRecord =
        serde_json::from_value(value).map_err(|e| MeshError::IoError(e.to_string()))?;
    record.into_mesh()
}
