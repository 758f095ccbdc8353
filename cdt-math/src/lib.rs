//! cdt-math - foundational 2D geometry primitives for the CDT kernel.
//!
//! This crate provides:
//! - [`Point2`] / [`Vector2`] - 2D point and vector types
//! - [`AABB`] - axis-aligned bounding box that rejects inverted input rather
//!   than silently normalizing it
//! - [`Epsilon`] - the single absolute+relative tolerance policy used by
//!   every predicate in this crate and in `cdt-mesh`
//! - [`robust_predicates`] - tolerance-classified orientation, incircle, and
//!   segment-intersection tests built on Shewchuk adaptive-precision
//!   determinants
//! - [`Polygon2`] - 2D polygon validation (winding, simplicity, containment)
//!
//! # Example
//!
//! ```rust
//! use cdt_math::{Point2, Polygon2};
//!
//! let a = Point2::new(0.0, 0.0);
//! let b = Point2::new(3.0, 4.0);
//! assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
//!
//! let square = Polygon2::rectangle(Point2::new(0.0, 0.0), Point2::new(10.0, 10.0));
//! assert!((square.area() - 100.0).abs() < 1e-10);
//! ```

pub mod bbox;
pub mod epsilon;
pub mod error;
pub mod guards;
pub mod point;
pub mod polygon;
pub mod robust_predicates;
pub mod vector;

pub use bbox::AABB;
pub use epsilon::Epsilon;
pub use error::{MathError, MathResult};
pub use point::Point2;
pub use polygon::Polygon2;
pub use robust_predicates::{
    incircle_2d, is_convex_vertex, is_reflex_vertex, orientation_2d, point_in_triangle,
    point_strictly_in_triangle, segment_intersection_point, segments_intersect,
    segments_properly_intersect, CirclePosition, IntersectionType, Orientation,
};
pub use vector::Vector2;

pub use guards::{
    clamp_acos_domain, clamp_log_domain, clamp_sqrt_domain, guard_finite, guard_infinite,
    guard_nan, is_finite, is_valid, safe_acos, safe_asin, safe_div, safe_div_or, safe_ln,
    safe_sqrt, sanitize, sanitize_to_zero, snap_to_grid, snap_to_integer, snap_to_zero,
};

/// Linear interpolation between two values.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Clamp a value to a range.
#[inline]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Convert degrees to radians.
#[inline]
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Convert radians to degrees.
#[inline]
pub fn rad_to_deg(radians: f64) -> f64 {
    radians * 180.0 / std::f64::consts::PI
}
