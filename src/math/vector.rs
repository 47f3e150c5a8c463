//! Two-dimensional vector type.

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// A 2D vector or point in shape space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new vector.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Create a vector with both components set to `v`.
    pub const fn splat(v: f64) -> Self {
        Self { x: v, y: v }
    }

    /// Check if both components are exactly zero.
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn squared_length(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Unit vector in the same direction.
    ///
    /// A zero vector yields `(0, 0)` when `allow_zero` is set and `(0, 1)` otherwise,
    /// so callers that need a direction always get one.
    pub fn normalize(self, allow_zero: bool) -> Self {
        let len = self.length();
        if len == 0.0 {
            return Self::new(0.0, if allow_zero { 0.0 } else { 1.0 });
        }
        Self::new(self.x / len, self.y / len)
    }

    /// Perpendicular vector of the same length.
    ///
    /// With `polarity` set the result is rotated counter-clockwise (points left of `self`).
    pub fn orthogonal(self, polarity: bool) -> Self {
        if polarity {
            Self::new(-self.y, self.x)
        } else {
            Self::new(self.y, -self.x)
        }
    }

    /// Perpendicular unit vector, see [`Vector2::orthogonal`].
    pub fn orthonormal(self, polarity: bool, allow_zero: bool) -> Self {
        let len = self.length();
        if len == 0.0 {
            let y = if allow_zero { 0.0 } else { 1.0 };
            return if polarity {
                Self::new(0.0, y)
            } else {
                Self::new(0.0, -y)
            };
        }
        self.orthogonal(polarity) / len
    }

    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product; positive when `other` is
    /// counter-clockwise from `self`.
    pub fn cross(self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Component-wise product.
    pub fn mul_components(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y)
    }

    /// Component-wise quotient.
    pub fn div_components(self, other: Self) -> Self {
        Self::new(self.x / other.x, self.y / other.y)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vector2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vector2 {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f64> for Vector2 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<Vector2> for f64 {
    type Output = Vector2;

    fn mul(self, rhs: Vector2) -> Vector2 {
        rhs * self
    }
}

impl Div<f64> for Vector2 {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vector2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl From<(f64, f64)> for Vector2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}
