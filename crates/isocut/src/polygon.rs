//! Centroid and area vector of planar polygons.

use nalgebra::{Point3, Vector3};
use smallvec::SmallVec;

/// Inline capacity of polygon buffers. Faces of typical polyhedral meshes have
/// at most 12 vertices; a cut adds at most two.
pub const POLYGON_INLINE_CAPACITY: usize = 16;

/// Ordered polygon vertex buffer, stored inline up to [`POLYGON_INLINE_CAPACITY`] points.
pub type PolygonPoints = SmallVec<[Point3<f64>; POLYGON_INLINE_CAPACITY]>;

/// Area magnitudes below this are treated as zero.
pub(crate) fn area_floor() -> f64 {
    f64::MIN_POSITIVE.sqrt()
}

/// Returns the vertex-average point of a polygon, or the origin when empty.
pub fn vertex_average(points: &[Point3<f64>]) -> Point3<f64> {
    if points.is_empty() {
        return Point3::origin();
    }
    let sum: Vector3<f64> = points.iter().map(|p| p.coords).sum();
    Point3::from(sum / points.len() as f64)
}

/// Computes the centre and area vector of a planar polygon.
///
/// Triangles are computed directly. Larger polygons are fanned into triangles
/// about the vertex-average point; the area vector is the sum of the triangle
/// area vectors and the centre is the area-weighted mean of the triangle
/// centroids, which is insensitive to uneven vertex spacing along the boundary.
///
/// The area vector follows the right-hand rule on the vertex order.
/// An empty polygon yields `(origin, 0)`; a polygon with (near) zero area
/// yields its vertex average and a zero area vector.
pub fn polygon_centre_and_area(points: &[Point3<f64>]) -> (Point3<f64>, Vector3<f64>) {
    match points.len() {
        0 => (Point3::origin(), Vector3::zeros()),
        3 => {
            let [a, b, c] = [points[0], points[1], points[2]];
            let centre = Point3::from((a.coords + b.coords + c.coords) / 3.0);
            let area = 0.5 * (b - a).cross(&(c - a));
            (centre, area)
        }
        n => {
            let mid = vertex_average(points);

            let mut sum_n = Vector3::zeros();
            let mut sum_a = 0.0;
            let mut sum_ac = Vector3::zeros();

            for i in 0..n {
                let p = points[i];
                let next = points[(i + 1) % n];
                let c = p.coords + next.coords + mid.coords;
                let tri_n = (next - p).cross(&(mid - p));
                let tri_a = tri_n.norm();
                sum_n += tri_n;
                sum_a += tri_a;
                sum_ac += tri_a * c;
            }

            if sum_a < area_floor() {
                tracing::trace!(vertices = n, "zero-area polygon snapped");
                (mid, Vector3::zeros())
            } else {
                (Point3::from(sum_ac / (3.0 * sum_a)), 0.5 * sum_n)
            }
        }
    }
}

/// Computes the area magnitude of a planar polygon.
#[inline]
pub fn polygon_area(points: &[Point3<f64>]) -> f64 {
    polygon_centre_and_area(points).1.norm()
}
