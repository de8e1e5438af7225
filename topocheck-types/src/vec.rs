use std::ops::{Add, Mul, Neg, Sub};

use approx::AbsDiffEq;
use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// A point or a displacement in 2-dimensional cartesian space.
///
/// Equality is exact: two values are equal only if both coordinates are bit-for-bit the same number. Use
/// [`AbsDiffEq`] when a tolerance is wanted.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct Vector2d {
    x: f64,
    y: f64,
}

impl Vector2d {
    /// Origin of the coordinate space.
    pub const ZERO: Vector2d = Vector2d { x: 0.0, y: 0.0 };

    /// Creates a new vector, rejecting NaN and infinite coordinates.
    pub fn new(x: f64, y: f64) -> Result<Self, GeometryError> {
        if x.is_finite() && y.is_finite() {
            Ok(Self { x, y })
        } else {
            Err(GeometryError::InvalidCoordinate { x, y })
        }
    }

    /// Builds a vector from coordinates that were derived from already validated values.
    pub(crate) const fn from_finite(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// X coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Returns coordinates as an array.
    pub fn coords(&self) -> [f64; 2] {
        [self.x, self.y]
    }

    /// Dot product.
    pub fn dot(&self, other: &Vector2d) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3d cross product of the two vectors (the perp-dot product).
    ///
    /// Positive when `other` is counterclockwise from `self`.
    pub fn cross(&self, other: &Vector2d) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Squared length of the vector.
    pub fn length_sq(&self) -> f64 {
        self.dot(self)
    }

    /// Length of the vector.
    pub fn length(&self) -> f64 {
        self.length_sq().sqrt()
    }

    /// Squared euclidean distance to another point.
    pub fn distance_sq(&self, other: &Vector2d) -> f64 {
        (*self - *other).length_sq()
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Vector2d) -> f64 {
        self.distance_sq(other).sqrt()
    }

    /// Point at parameter `t` on the way from `self` to `other`.
    pub fn lerp(&self, other: &Vector2d, t: f64) -> Vector2d {
        *self + (*other - *self) * t
    }
}

impl Add for Vector2d {
    type Output = Vector2d;

    fn add(self, rhs: Vector2d) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for Vector2d {
    type Output = Vector2d;

    fn sub(self, rhs: Vector2d) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Neg for Vector2d {
    type Output = Vector2d;

    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl Mul<f64> for Vector2d {
    type Output = Vector2d;

    fn mul(self, rhs: f64) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

impl TryFrom<[f64; 2]> for Vector2d {
    type Error = GeometryError;

    fn try_from(value: [f64; 2]) -> Result<Self, Self::Error> {
        Self::new(value[0], value[1])
    }
}

impl TryFrom<(f64, f64)> for Vector2d {
    type Error = GeometryError;

    fn try_from(value: (f64, f64)) -> Result<Self, Self::Error> {
        Self::new(value.0, value.1)
    }
}

impl From<Vector2d> for [f64; 2] {
    fn from(value: Vector2d) -> Self {
        value.coords()
    }
}

impl AbsDiffEq for Vector2d {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon) && self.y.abs_diff_eq(&other.y, epsilon)
    }
}
