//! Mesh face representation.

use nalgebra::{Point3, Vector3};

use crate::polygon::{polygon_centre_and_area, PolygonPoints};

/// A mesh face: an ordered vertex ring with its owning and neighbouring cell.
///
/// The area vector follows the right-hand rule on the vertex order and, on a
/// mesh, points from the owner into the neighbour.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    points: PolygonPoints,
    owner: usize,
    neighbour: Option<usize>,
    centre: Point3<f64>,
    area: Vector3<f64>,
}

impl Face {
    /// Creates a face from its vertices, computing centre and area vector.
    ///
    /// The face is owned by cell 0 and has no neighbour until
    /// [`Face::with_cells`] says otherwise.
    ///
    /// # Panics (debug builds only)
    /// Panics if fewer than 3 vertices are provided.
    pub fn new(points: impl IntoIterator<Item = Point3<f64>>) -> Self {
        let points: PolygonPoints = points.into_iter().collect();
        debug_assert!(points.len() >= 3, "Face must have at least 3 vertices");
        let (centre, area) = polygon_centre_and_area(&points);
        Self {
            points,
            owner: 0,
            neighbour: None,
            centre,
            area,
        }
    }

    /// Creates a triangular face. The winding order sets the area direction.
    pub fn triangle(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>) -> Self {
        Self::new([a, b, c])
    }

    /// Creates a quadrilateral face from a corner and two edge vectors.
    ///
    /// The vertices are `origin`, `origin + u`, `origin + u + v`, `origin + v`,
    /// so the area vector is `u x v`.
    pub fn rectangle(origin: Point3<f64>, u: Vector3<f64>, v: Vector3<f64>) -> Self {
        Self::new([origin, origin + u, origin + u + v, origin + v])
    }

    /// Sets the owner and neighbour cells.
    pub fn with_cells(mut self, owner: usize, neighbour: Option<usize>) -> Self {
        self.owner = owner;
        self.neighbour = neighbour;
        self
    }

    /// Overrides the centre and area vector with values supplied by a mesh.
    pub fn with_geometry(mut self, centre: Point3<f64>, area: Vector3<f64>) -> Self {
        self.centre = centre;
        self.area = area;
        self
    }

    /// Returns the vertices in ring order.
    #[inline]
    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the face has no vertices (never for a valid face).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the owning cell.
    #[inline]
    pub fn owner(&self) -> usize {
        self.owner
    }

    /// Returns the neighbouring cell, `None` on a boundary face.
    #[inline]
    pub fn neighbour(&self) -> Option<usize> {
        self.neighbour
    }

    /// Returns true if the face lies between two cells.
    #[inline]
    pub fn is_internal(&self) -> bool {
        self.neighbour.is_some()
    }

    /// Returns the face centre.
    #[inline]
    pub fn centre(&self) -> Point3<f64> {
        self.centre
    }

    /// Returns the area vector.
    #[inline]
    pub fn area(&self) -> Vector3<f64> {
        self.area
    }

    /// Returns the area magnitude.
    #[inline]
    pub fn mag_area(&self) -> f64 {
        self.area.norm()
    }

    /// Returns the unit normal, or `None` for a zero-area face.
    pub fn unit_normal(&self) -> Option<Vector3<f64>> {
        let len = self.area.norm();
        if len > f64::MIN_POSITIVE {
            Some(self.area / len)
        } else {
            None
        }
    }
}
