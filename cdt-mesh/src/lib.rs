//! cdt-mesh - a constrained Delaunay triangulation kernel over a polygon
//! with optional holes.
//!
//! Given a simple outer boundary and zero or more non-overlapping interior
//! holes, [`cdt::build_simple`] produces a [`mesh::Mesh`] that:
//! - respects every boundary edge (perimeter and hole) as a constraint, and
//! - satisfies the Delaunay empty-circumcircle property on every
//!   non-constrained interior edge.
//!
//! The crate is organized bottom-up:
//! - [`ids`] - stable vertex ids, canonical edges, triangles, polygon loops.
//! - [`config`] - the single tolerance/behavior record a mesh is built with.
//! - [`error`] - the typed error taxonomy returned by every public operation.
//! - [`predicates`] - polygon/segment/triangle predicates built on
//!   `cdt_math`'s robust orientation and in-circle tests.
//! - [`spatial`] - the R*-tree index backing vertex-merge lookups.
//! - [`mesh`] - the topology store and its incrementally enforced invariants.
//! - [`cdt`] - the triangulation engine: boundary conditioning, ear-clipping,
//!   constraint-edge flip repair, Delaunay flip propagation, hole carving.
//! - [`audit`] - an offline overlap auditor used by validation tooling.
//! - [`io`] - the persisted JSON mesh record (load/save, with full
//!   invariant re-validation on load).
//!
//! # Example
//!
//! ```rust
//! use cdt_math::Point2;
//! use cdt_mesh::cdt::build_simple_default;
//!
//! let outer = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(10.0, 0.0),
//!     Point2::new(10.0, 10.0),
//!     Point2::new(0.0, 10.0),
//! ];
//! let mesh = build_simple_default(&outer, &[]).unwrap();
//! assert_eq!(mesh.triangle_count(), 2);
//! assert!(mesh.verify_invariants().is_ok());
//! ```

pub mod audit;
pub mod cdt;
pub mod config;
pub mod error;
pub mod ids;
pub mod io;
pub mod mesh;
pub mod predicates;
pub mod spatial;

pub use audit::{audit as audit_overlaps, OverlapFinding, OverlapKind};
pub use cdt::{build_simple, build_simple_default};
pub use config::MeshConfig;
pub use error::{MeshError, MeshResult};
pub use ids::{Edge, PolygonLoop, Triangle, VertexId};
pub use io::{load, load_value, save, save_compact, MeshRecord};
pub use mesh::Mesh;
