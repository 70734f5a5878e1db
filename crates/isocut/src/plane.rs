//! Cutting plane representation.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A cutting plane given by a point on it and a normal.
///
/// The normal is kept as supplied (not normalized), so the status of a point
/// scales with `|normal|`. Reconstructed PLIC normals are unit length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    base: Point3<f64>,
    normal: Vector3<f64>,
}

impl Plane {
    /// Creates a plane from a base point and a normal vector.
    pub fn new(base: Point3<f64>, normal: Vector3<f64>) -> Self {
        Self { base, normal }
    }

    /// Returns the base point.
    #[inline]
    pub fn base(&self) -> Point3<f64> {
        self.base
    }

    /// Returns the normal as supplied.
    #[inline]
    pub fn normal(&self) -> Vector3<f64> {
        self.normal
    }

    /// Returns the unit normal, or `None` for a zero normal.
    pub fn unit_normal(&self) -> Option<Vector3<f64>> {
        let len = self.normal.norm();
        if len > f64::MIN_POSITIVE {
            Some(self.normal / len)
        } else {
            None
        }
    }

    /// Computes the status of a point: `(point - base) . normal`.
    /// - Positive: point is on the side the normal points to
    /// - Negative: point is on the opposite side
    #[inline]
    pub fn status(&self, point: &Point3<f64>) -> f64 {
        (point - self.base).dot(&self.normal)
    }

    /// Returns the plane with the normal flipped.
    #[inline]
    pub fn flipped(&self) -> Self {
        Self {
            base: self.base,
            normal: -self.normal,
        }
    }

    /// Returns the plane translated by `distance` along its unit normal.
    pub fn translated(&self, distance: f64) -> Self {
        let shift = self.unit_normal().unwrap_or_else(Vector3::zeros) * distance;
        Self {
            base: self.base + shift,
            normal: self.normal,
        }
    }

    /// Projects a point onto the plane. Returns the point unchanged for a zero normal.
    pub fn project_point(&self, point: &Point3<f64>) -> Point3<f64> {
        match self.unit_normal() {
            Some(n) => point - n * (point - self.base).dot(&n),
            None => *point,
        }
    }
}
