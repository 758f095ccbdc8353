//! Unified tolerance policy for geometric comparisons.
//!
//! Every categorical classification in [`crate::robust_predicates`] and in
//! `cdt-mesh`'s predicates module routes through an [`Epsilon`] value rather
//! than a bare scalar constant. This keeps tolerance handling consistent
//! across scales: a mesh spanning millimeters and one spanning kilometers
//! both get a tolerance proportional to the magnitude of the coordinates
//! involved, plus a floor for values near zero.

use serde::{Deserialize, Serialize};

/// Absolute + relative tolerance pair.
///
/// The effective tolerance for a comparison over a set of magnitudes `m` is
/// `abs + rel * m`, where `m` is the largest absolute coordinate value among
/// the points involved in the comparison. Both fields are coerced to their
/// absolute value on construction: a negative tolerance has no sensible
/// meaning and is never produced by this type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Epsilon {
    pub abs: f64,
    pub rel: f64,
}

impl Epsilon {
    /// Construct a tolerance pair, taking the absolute value of each field.
    #[inline]
    pub fn new(abs: f64, rel: f64) -> Self {
        Self {
            abs: abs.abs(),
            rel: rel.abs(),
        }
    }

    /// Effective scalar tolerance for the given maximum coordinate magnitude.
    #[inline]
    pub fn tolerance(&self, max_magnitude: f64) -> f64 {
        self.abs + self.rel * max_magnitude.abs()
    }

    /// Effective tolerance computed from the magnitudes of the given points,
    /// each a `[x, y]` pair.
    pub fn tolerance_for(&self, points: &[[f64; 2]]) -> f64 {
        let m = points
            .iter()
            .flat_map(|p| [p[0].abs(), p[1].abs()])
            .fold(0.0_f64, f64::max);
        self.tolerance(m)
    }

    /// True if `a` and `b` are within this tolerance under the Chebyshev
    /// (max-coordinate-difference) metric.
    pub fn points_merge(&self, a: [f64; 2], b: [f64; 2]) -> bool {
        let tol = self.tolerance_for(&[a, b]);
        (a[0] - b[0]).abs() <= tol && (a[1] - b[1]).abs() <= tol
    }
}

impl Default for Epsilon {
    /// `abs = 1e-9`, `rel = 1e-12`, matching the persisted-config defaults.
    fn default() -> Self {
        Self {
            abs: 1e-9,
            rel: 1e-12,
        }
    }
}
