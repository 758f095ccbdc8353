//! The mesh store: vertices, triangles, edge-use bookkeeping, and the
//! perimeter/hole registries, with invariants I1-I7 enforced incrementally.

use std::collections::HashMap;

use cdt_math::robust_predicates::{
    orientation_2d, point_strictly_in_triangle, segments_properly_intersect, Orientation,
};
use cdt_math::Point2;

use crate::config::MeshConfig;
use crate::error::{MeshError, MeshResult};
use crate::ids::{Edge, PolygonLoop, Triangle, VertexId};
use crate::predicates::{polygon_area, polygon_contains_polygon, polygon_self_intersects, polygons_intersect};
use crate::spatial::VertexIndex;

/// The top-level mesh container.
///
/// Owns its vertex, triangle, edge-use, perimeter, and hole tables
/// exclusively; there is no internal locking, and every mutating operation
/// assumes exclusive access (the core is single-threaded, per the overall
/// concurrency model).
#[derive(Debug, Clone)]
pub struct Mesh {
    vertices: Vec<Point2>,
    triangles: Vec<Triangle>,
    edge_uses: HashMap<Edge, u32>,
    perimeters: Vec<PolygonLoop>,
    holes: Vec<PolygonLoop>,
    config: MeshConfig,
    #[allow(dead_code)]
    index: VertexIndex,
}

impl Mesh {
    /// Create a new, empty mesh with the given configuration.
    pub fn new(config: MeshConfig) -> Self {
        Self {
            vertices: Vec::new(),
            triangles: Vec::new(),
            edge_uses: HashMap::new(),
            perimeters: Vec::new(),
            holes: Vec::new(),
            config,
            index: VertexIndex::new(),
        }
    }

    /// Reconstruct a mesh directly from its parts, recomputing the
    /// edge-use map and spatial index. Used by the persistence layer to
    /// load a record without re-running `add_triangle`/`add_perimeter`'s
    /// construction-order validation (the record is re-checked wholesale
    /// via [`Mesh::verify_invariants`] instead).
    pub(crate) fn from_parts(
        vertices: Vec<Point2>,
        triangles: Vec<Triangle>,
        perimeters: Vec<PolygonLoop>,
        holes: Vec<PolygonLoop>,
        config: MeshConfig,
    ) -> Self {
        let mut edge_uses = HashMap::new();
        for t in &triangles {
            for edge in t.edges() {
                *edge_uses.entry(edge).or_insert(0) += 1;
            }
        }
        let mut index = VertexIndex::new();
        for (i, p) in vertices.iter().enumerate() {
            index.insert(VertexId(i), p.as_array());
        }
        Self {
            vertices,
            triangles,
            edge_uses,
            perimeters,
            holes,
            config,
            index,
        }
    }

    /// The mesh's configuration.
    #[inline]
    pub fn config(&self) -> &MeshConfig {
        &self.config
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Look up a vertex's position by id.
    pub fn vertex(&self, id: VertexId) -> MeshResult<Point2> {
        let idx = id
            .index()
            .ok_or_else(|| MeshError::InvalidVertexId(id.to_string()))?;
        self.vertices
            .get(idx)
            .copied()
            .ok_or_else(|| MeshError::InvalidVertexId(id.to_string()))
    }

    /// All vertices, in insertion order (index = [`VertexId`]).
    #[inline]
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    /// All triangles, in insertion order.
    #[inline]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Look up a triangle by index.
    pub fn triangle(&self, index: usize) -> MeshResult<Triangle> {
        self.triangles
            .get(index)
            .copied()
            .ok_or(MeshError::InvalidTriangleIndex(index))
    }

    /// All perimeters (outer boundary loops), in insertion order.
    #[inline]
    pub fn perimeters(&self) -> &[PolygonLoop] {
        &self.perimeters
    }

    /// All holes (interior void loops), in insertion order.
    #[inline]
    pub fn holes(&self) -> &[PolygonLoop] {
        &self.holes
    }

    /// Current edge-use counts: canonical edge -> number of triangles using
    /// it (always 1 or 2 for a structurally valid mesh).
    #[inline]
    pub fn edge_usage_counts(&self) -> &HashMap<Edge, u32> {
        &self.edge_uses
    }

    /// Resolve a [`PolygonLoop`] to world-space points.
    pub fn loop_points(&self, loop_: &PolygonLoop) -> MeshResult<Vec<Point2>> {
        loop_.vertices().iter().map(|&v| self.vertex(v)).collect()
    }

    /// Insert a vertex, merging with an existing one within tolerance if
    /// `config.merge_vertices` is set.
    pub fn add_vertex(&mut self, p: Point2) -> VertexId {
        if self.config.merge_vertices && !self.vertices.is_empty() {
            let probe_tol = self.config.epsilon.tolerance_for(&[p.as_array()]);
            // Chebyshev tolerance converted to a safe Euclidean query radius
            // (Euclidean <= sqrt(2) * Chebyshev), plus a small safety margin.
            let radius = probe_tol * std::f64::consts::SQRT_2 * 1.05 + 1e-15;
            for candidate in self.index.within_radius(p.as_array(), radius) {
                if let Ok(q) = self.vertex(candidate) {
                    if self.config.epsilon.points_merge(p.as_array(), q.as_array()) {
                        return candidate;
                    }
                }
            }
        }

        let id = VertexId(self.vertices.len());
        self.index.insert(id, p.as_array());
        self.vertices.push(p);
        id
    }

    fn require_vertex(&self, id: VertexId) -> MeshResult<Point2> {
        self.vertex(id)
    }

    /// Add a triangle, enforcing I1-I5 in the order documented by the
    /// data-model specification. Returns the new triangle's index.
    pub fn add_triangle(&mut self, a: VertexId, b: VertexId, c: VertexId) -> MeshResult<usize> {
        let pa = self.require_vertex(a)?;
        let pb = self.require_vertex(b)?;
        let pc = self.require_vertex(c)?;

        if a == b || b == c || a == c {
            return Err(MeshError::DegenerateTopology);
        }

        let eps = &self.config.epsilon;
        if orientation_2d(pa, pb, pc, eps) == Orientation::Collinear {
            return Err(MeshError::DegenerateGeometry);
        }

        let candidate = Triangle::new(a, b, c);
        if self.triangles.iter().any(|t| t.same_vertex_set(&candidate)) {
            return Err(MeshError::Duplicate);
        }

        let candidate_edges = candidate.edges();
        for edge in &candidate_edges {
            if self.edge_uses.get(edge).copied().unwrap_or(0) >= 2 {
                return Err(MeshError::EdgeSaturated);
            }
        }

        if self.config.edge_intersection_check {
            for &edge in &candidate_edges {
                let (p1, p2) = edge.endpoints();
                let (gp1, gp2) = (self.require_vertex(p1)?, self.require_vertex(p2)?);
                for existing in &self.triangles {
                    for existing_edge in existing.edges() {
                        let (q1, q2) = existing_edge.endpoints();
                        if edge.contains(q1) || edge.contains(q2) {
                            continue; // shares a vertex with the candidate edge
                        }
                        let (gq1, gq2) = (self.require_vertex(q1)?, self.require_vertex(q2)?);
                        if segments_properly_intersect(gp1, gp2, gq1, gq2, eps) {
                            return Err(MeshError::EdgeIntersection);
                        }
                    }
                }
            }
        }

        for existing in &self.triangles {
            let [ea, eb, ec] = existing.vertices();
            let (epa, epb, epc) = (
                self.require_vertex(ea)?,
                self.require_vertex(eb)?,
                self.require_vertex(ec)?,
            );

            for p in [pa, pb, pc] {
                if point_strictly_in_triangle(p, epa, epb, epc, eps) {
                    return Err(MeshError::TriangleOverlap);
                }
            }
            for p in [epa, epb, epc] {
                if point_strictly_in_triangle(p, pa, pb, pc, eps) {
                    return Err(MeshError::TriangleOverlap);
                }
            }
        }

        for edge in candidate_edges {
            *self.edge_uses.entry(edge).or_insert(0) += 1;
        }
        self.triangles.push(candidate);
        Ok(self.triangles.len() - 1)
    }

    fn validate_boundary_points(&self, points: &[Point2]) -> MeshResult<()> {
        if points.len() < 3 {
            return Err(MeshError::PolygonTooSmall);
        }
        if polygon_self_intersects(points, &self.config.epsilon) {
            return Err(MeshError::PolygonSelfIntersects);
        }
        if polygon_area(points) <= self.config.epsilon.abs {
            return Err(MeshError::PolygonTooSmall);
        }
        Ok(())
    }

    /// Add an outer perimeter loop, validating I7 against existing
    /// perimeters. Boundary edges are not triangulated here; that's the CDT
    /// engine's job.
    pub fn add_perimeter(&mut self, points: &[Point2]) -> MeshResult<usize> {
        self.validate_boundary_points(points)?;

        for existing in &self.perimeters {
            let existing_points = self.loop_points(existing)?;
            if polygons_intersect(points, &existing_points, &self.config.epsilon) {
                return Err(MeshError::OverlappingPerimeters);
            }
        }

        let ids: Vec<VertexId> = points.iter().map(|&p| self.add_vertex(p)).collect();
        self.perimeters.push(PolygonLoop::new(ids));
        Ok(self.perimeters.len() - 1)
    }

    /// Add a hole loop, validating I6 (strictly inside exactly one
    /// perimeter, disjoint from all other holes).
    pub fn add_hole(&mut self, points: &[Point2]) -> MeshResult<usize> {
        self.validate_boundary_points(points)?;

        let eps = &self.config.epsilon;
        let mut containing_perimeters = 0;
        for perimeter in &self.perimeters {
            let perimeter_points = self.loop_points(perimeter)?;
            if polygon_contains_polygon(&perimeter_points, points, eps) {
                containing_perimeters += 1;
            } else if polygons_intersect(&perimeter_points, points, eps) {
                return Err(MeshError::HoleNotInsidePerimeter);
            }
        }
        if containing_perimeters != 1 {
            return Err(MeshError::HoleNotInsidePerimeter);
        }

        for existing in &self.holes {
            let existing_points = self.loop_points(existing)?;
            if polygons_intersect(points, &existing_points, eps) {
                return Err(MeshError::HoleIntersectsHole);
            }
        }

        let ids: Vec<VertexId> = points.iter().map(|&p| self.add_vertex(p)).collect();
        self.holes.push(PolygonLoop::new(ids));
        Ok(self.holes.len() - 1)
    }

    /// Remove the triangles at the given indices (by original index,
    /// largest first so earlier indices stay valid), updating edge-use
    /// counts. Used internally by hole carving.
    pub(crate) fn remove_triangles(&mut self, mut indices: Vec<usize>) {
        indices.sort_unstable();
        indices.dedup();
        for &idx in indices.iter().rev() {
            let t = self.triangles.remove(idx);
            for edge in t.edges() {
                if let Some(count) = self.edge_uses.get_mut(&edge) {
                    *count -= 1;
                    if *count == 0 {
                        self.edge_uses.remove(&edge);
                    }
                }
            }
        }
    }

    /// Recompute edge-use counts from scratch over the current triangle
    /// list, independent of the incrementally maintained map. Used by
    /// [`Mesh::verify_invariants`] so a stale `edge_uses` map can't mask a
    /// violation.
    fn recompute_edge_uses(&self) -> HashMap<Edge, u32> {
        let mut counts = HashMap::new();
        for t in &self.triangles {
            for edge in t.edges() {
                *counts.entry(edge).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Re-check invariants I1-I7 from scratch. Used after loading a
    /// persisted mesh, and available for tests.
    pub fn verify_invariants(&self) -> MeshResult<()> {
        let eps = &self.config.epsilon;

        // I1, I2, I3
        for (i, t) in self.triangles.iter().enumerate() {
            if t.has_repeated_vertex() {
                return Err(MeshError::DegenerateTopology);
            }
            let [a, b, c] = t.vertices();
            let (pa, pb, pc) = (self.vertex(a)?, self.vertex(b)?, self.vertex(c)?);
            if orientation_2d(pa, pb, pc, eps) == Orientation::Collinear {
                return Err(MeshError::DegenerateGeometry);
            }
            for other in &self.triangles[i + 1..] {
                if t.same_vertex_set(other) {
                    return Err(MeshError::Duplicate);
                }
            }
        }

        // I4
        let recomputed = self.recompute_edge_uses();
        for &count in recomputed.values() {
            if !(1..=2).contains(&count) {
                return Err(MeshError::EdgeSaturated);
            }
        }

        // I5: no proper intersection between edges of distinct triangles,
        // unless they are the same canonical edge.
        for i in 0..self.triangles.len() {
            for j in (i + 1)..self.triangles.len() {
                let ti = &self.triangles[i];
                let tj = &self.triangles[j];
                for ei in ti.edges() {
                    for ej in tj.edges() {
                        if ei == ej {
                            continue;
                        }
                        let (a1, a2) = ei.endpoints();
                        let (b1, b2) = ej.endpoints();
                        let (pa1, pa2, pb1, pb2) = (
                            self.vertex(a1)?,
                            self.vertex(a2)?,
                            self.vertex(b1)?,
                            self.vertex(b2)?,
                        );
                        if segments_properly_intersect(pa1, pa2, pb1, pb2, eps) {
                            return Err(MeshError::EdgeIntersection);
                        }
                    }
                }
            }
        }

        // I6: every hole strictly inside exactly one perimeter, pairwise
        // disjoint from other holes.
        for (hi, hole) in self.holes.iter().enumerate() {
            let hole_points = self.loop_points(hole)?;
            let containing = self
                .perimeters
                .iter()
                .filter_map(|p| self.loop_points(p).ok())
                .filter(|p| polygon_contains_polygon(p, &hole_points, eps))
                .count();
            if containing != 1 {
                return Err(MeshError::HoleNotInsidePerimeter);
            }
            for other in &self.holes[hi + 1..] {
                let other_points = self.loop_points(other)?;
                if polygons_intersect(&hole_points, &other_points, eps) {
                    return Err(MeshError::HoleIntersectsHole);
                }
            }
        }

        // I7: perimeters pairwise disjoint.
        for i in 0..self.perimeters.len() {
            for j in (i + 1)..self.perimeters.len() {
                let pi = self.loop_points(&self.perimeters[i])?;
                let pj = self.loop_points(&self.perimeters[j])?;
                if polygons_intersect(&pi, &pj, eps) {
                    return Err(MeshError::OverlappingPerimeters);
                }
            }
        }

        Ok(())
    }
}
