//! 2D vector type with full operations.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use crate::error::{MathError, MathResult};

/// A vector in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    /// Create a new 2D vector.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Unit X vector.
    pub const UNIT_X: Self = Self { x: 1.0, y: 0.0 };

    /// Unit Y vector.
    pub const UNIT_Y: Self = Self { x: 0.0, y: 1.0 };

    /// Length (magnitude) of the vector.
    #[inline]
    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Squared length (avoids sqrt).
    #[inline]
    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Normalize to unit length. Returns error if zero length.
    ///
    /// # Postcondition (Design by Contract)
    /// The result vector has length approximately 1.0 (within floating-point tolerance).
    #[inline]
    pub fn normalize(&self) -> MathResult<Self> {
        let len = self.length();
        if len < 1e-15 {
            Err(MathError::ZeroLengthVector)
        } else {
            let result = Self::new(self.x / len, self.y / len);
            debug_assert!(
                (result.length() - 1.0).abs() < 1e-10,
                "normalize postcondition failed: length {} != 1.0",
                result.length()
            );
            Ok(result)
        }
    }

    /// Try to normalize, returning None if zero length.
    #[inline]
    pub fn try_normalize(&self) -> Option<Self> {
        self.normalize().ok()
    }

    /// Dot product with another vector.
    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// 2D cross product (returns scalar: z-component of 3D cross).
    /// Positive if other is counter-clockwise from self.
    #[inline]
    pub fn cross(&self, other: &Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Perpendicular vector (rotated 90° counter-clockwise).
    ///
    /// # Postcondition (Design by Contract)
    /// Result is orthogonal to self (dot product is zero).
    #[inline]
    pub fn perp(&self) -> Self {
        let result = Self::new(-self.y, self.x);
        debug_assert!(
            self.dot(&result).abs() < 1e-10,
            "perp postcondition failed: dot product {} != 0",
            self.dot(&result)
        );
        result
    }

    /// Perpendicular vector (rotated 90° clockwise).
    #[inline]
    pub fn perp_cw(&self) -> Self {
        let result = Self::new(self.y, -self.x);
        debug_assert!(
            self.dot(&result).abs() < 1e-10,
            "perp_cw postcondition failed: dot product {} != 0",
            self.dot(&result)
        );
        result
    }

    /// Angle to another vector in radians (-π to π).
    #[inline]
    pub fn angle_to(&self, other: &Self) -> f64 {
        let cross = self.cross(other);
        let dot = self.dot(other);
        cross.atan2(dot)
    }

    /// Angle from positive X axis in radians (-π to π).
    #[inline]
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Rotate by angle in radians (counter-clockwise).
    #[inline]
    pub fn rotate(&self, angle_rad: f64) -> Self {
        let original_len = self.length();
        let (sin, cos) = angle_rad.sin_cos();
        let result = Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos);
        debug_assert!(
            (result.length() - original_len).abs() < 1e-10 * (1.0 + original_len),
            "rotate postcondition failed: length {} != {}",
            result.length(),
            original_len
        );
        result
    }

    /// Linear interpolation between two vectors.
    #[inline]
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// Project this vector onto another.
    #[inline]
    pub fn project_onto(&self, other: &Self) -> MathResult<Self> {
        let other_len_sq = other.length_squared();
        if other_len_sq < 1e-15 {
            Err(MathError::ZeroLengthVector)
        } else {
            let scale = self.dot(other) / other_len_sq;
            Ok(*other * scale)
        }
    }

    /// Check if vectors are approximately equal within tolerance.
    #[inline]
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        (self.x - other.x).abs() < tolerance && (self.y - other.y).abs() < tolerance
    }
}

impl Default for Vector2 {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Add for Vector2 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vector2 {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f64> for Vector2 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<Vector2> for f64 {
    type Output = Vector2;

    #[inline]
    fn mul(self, rhs: Vector2) -> Self::Output {
        Vector2::new(self * rhs.x, self * rhs.y)
    }
}

impl Div<f64> for Vector2 {
    type Output = Self;

    #[inline]
    fn div(self, rhs: f64) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vector2 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y)
    }
}
