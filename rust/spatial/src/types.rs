// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core value types for room geometry

use std::ops::{Add, Mul, Neg, Sub};

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A world-space point (simplified for serialization)
///
/// Also used for direction vectors (orientation basis, wall normals).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Position3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position3D {
    pub const ORIGIN: Position3D = Position3D {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn to_nalgebra(&self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }

    pub fn from_nalgebra(p: &Point3<f64>) -> Self {
        Self {
            x: p.x,
            y: p.y,
            z: p.z,
        }
    }

    pub fn to_vector(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    pub fn from_vector(v: &Vector3<f64>) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }

    pub fn dot(&self, other: &Position3D) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn length(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Euclidean distance between two points
    pub fn distance_to(&self, other: &Position3D) -> f64 {
        (*other - *self).length()
    }

    /// Unit-length copy, or `None` for a (near) zero vector
    pub fn normalized(&self) -> Option<Position3D> {
        let len = self.length();
        if len < 1e-12 || !len.is_finite() {
            None
        } else {
            Some(*self * (1.0 / len))
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Position3D {
    type Output = Position3D;

    fn add(self, rhs: Position3D) -> Position3D {
        Position3D::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Position3D {
    type Output = Position3D;

    fn sub(self, rhs: Position3D) -> Position3D {
        Position3D::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Position3D {
    type Output = Position3D;

    fn mul(self, rhs: f64) -> Position3D {
        Position3D::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Position3D {
    type Output = Position3D;

    fn neg(self) -> Position3D {
        Position3D::new(-self.x, -self.y, -self.z)
    }
}

/// Extents of a surface's local bounding box
///
/// `width` runs along local x, `height` along local y, `depth` along local z.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Dimensions3D {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl Dimensions3D {
    pub fn new(width: f64, height: f64, depth: f64) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Face area of the surface (width x height)
    pub fn face_area(&self) -> f64 {
        self.width * self.height
    }

    pub fn half_extents(&self) -> Position3D {
        Position3D::new(self.width / 2.0, self.height / 2.0, self.depth / 2.0)
    }
}

/// Column basis of a surface's world transform
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Orientation3D {
    /// Local x axis in world space
    pub right_vector: Position3D,
    /// Local y axis in world space
    pub up_vector: Position3D,
    /// Local z axis in world space; the outward normal for walls
    pub forward_vector: Position3D,
}

impl Orientation3D {
    pub fn identity() -> Self {
        Self {
            right_vector: Position3D::new(1.0, 0.0, 0.0),
            up_vector: Position3D::new(0.0, 1.0, 0.0),
            forward_vector: Position3D::new(0.0, 0.0, 1.0),
        }
    }

    /// Map a local-space offset into world space through the basis
    pub fn rotate(&self, local: &Position3D) -> Position3D {
        self.right_vector * local.x + self.up_vector * local.y + self.forward_vector * local.z
    }
}

impl Default for Orientation3D {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_vector_ops() {
        let a = Position3D::new(1.0, 2.0, 3.0);
        let b = Position3D::new(0.5, -1.0, 2.0);

        assert_eq!(a + b, Position3D::new(1.5, 1.0, 5.0));
        assert_eq!(a - b, Position3D::new(0.5, 3.0, 1.0));
        assert_eq!(a * 2.0, Position3D::new(2.0, 4.0, 6.0));
        assert_eq!(-a, Position3D::new(-1.0, -2.0, -3.0));
    }

    #[test]
    fn test_distance() {
        let a = Position3D::new(0.0, 0.0, 0.0);
        let b = Position3D::new(3.0, 4.0, 0.0);
        assert_relative_eq!(a.distance_to(&b), 5.0);
        assert_relative_eq!(b.distance_to(&a), 5.0);
    }

    #[test]
    fn test_normalized_zero_vector() {
        assert!(Position3D::ORIGIN.normalized().is_none());
        let n = Position3D::new(0.0, 0.0, -4.0).normalized().unwrap();
        assert_relative_eq!(n.z, -1.0);
    }

    #[test]
    fn test_nalgebra_round_trip() {
        let p = Position3D::new(1.5, -2.0, 0.25);
        assert_eq!(Position3D::from_nalgebra(&p.to_nalgebra()), p);
        assert_eq!(Position3D::from_vector(&p.to_vector()), p);
    }

    #[test]
    fn test_identity_rotation() {
        let o = Orientation3D::identity();
        let local = Position3D::new(1.0, 2.0, 3.0);
        assert_eq!(o.rotate(&local), local);
    }
}
