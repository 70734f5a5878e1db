//! Cutting surfaces and analytic test surfaces.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::{Plane, PointClassification};

/// The surface a face is cut with.
///
/// All three variants funnel into the same classification and clipping walk.
#[derive(Debug, Clone, Copy)]
pub enum CuttingSurface<'a> {
    /// Cut with a plane; point status is `(v - base) . normal`.
    Plane(Plane),
    /// Cut with the iso-line `value == cut_value` of a per-vertex scalar field.
    ///
    /// `values[i]` belongs to the i-th face vertex.
    ScalarField { values: &'a [f64], cut_value: f64 },
    /// Reuse a classification computed earlier, e.g. by the neighbouring cell.
    Precomputed(&'a PointClassification),
}

impl<'a> CuttingSurface<'a> {
    /// Convenience constructor for a plane cut.
    pub fn plane(base: Point3<f64>, normal: Vector3<f64>) -> Self {
        CuttingSurface::Plane(Plane::new(base, normal))
    }

    /// Convenience constructor for an iso-value cut.
    pub fn field(values: &'a [f64], cut_value: f64) -> Self {
        CuttingSurface::ScalarField { values, cut_value }
    }
}

/// Analytic surfaces used to generate synthetic scalar fields.
///
/// Each shape is positive on its "inside" (the side a VoF field would call
/// liquid) and zero on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AnalyticSurface {
    /// Signed distance to a plane, positive on the side `normal` points to.
    Plane { origin: Point3<f64>, normal: Vector3<f64> },
    /// Signed distance to a sphere, positive inside.
    Sphere { centre: Point3<f64>, radius: f64 },
    /// Surface through `centre` with unit normal `normal` and principal
    /// curvatures `k1` (along `tangent`) and `k2`, positive towards the
    /// centres of curvature.
    CurvedSurface {
        centre: Point3<f64>,
        normal: Vector3<f64>,
        tangent: Vector3<f64>,
        k1: f64,
        k2: f64,
    },
}

impl AnalyticSurface {
    /// Evaluates the implicit function at `p`.
    pub fn evaluate(&self, p: &Point3<f64>) -> f64 {
        match *self {
            AnalyticSurface::Plane { origin, normal } => {
                (p - origin).dot(&normal.try_normalize(0.0).unwrap_or_else(Vector3::zeros))
            }
            AnalyticSurface::Sphere { centre, radius } => radius - (p - centre).norm(),
            AnalyticSurface::CurvedSurface {
                centre,
                normal,
                tangent,
                k1,
                k2,
            } => {
                let frame = LocalFrame::new(centre, normal, tangent);
                let local = frame.to_local(p);
                match normal_curvature_radius(&local, k1, k2) {
                    Some(r) => r - (local - Vector3::new(0.0, 0.0, r)).norm(),
                    None => local.z,
                }
            }
        }
    }

    /// Returns the gradient direction of the implicit function at `p`.
    ///
    /// For the curved surface this points from `p` towards the centre of
    /// normal curvature and is not normalized.
    pub fn gradient(&self, p: &Point3<f64>) -> Vector3<f64> {
        match *self {
            AnalyticSurface::Plane { normal, .. } => {
                normal.try_normalize(0.0).unwrap_or_else(Vector3::zeros)
            }
            AnalyticSurface::Sphere { centre, .. } => {
                (centre - p).try_normalize(0.0).unwrap_or_else(Vector3::zeros)
            }
            AnalyticSurface::CurvedSurface {
                centre,
                normal,
                tangent,
                k1,
                k2,
            } => {
                let frame = LocalFrame::new(centre, normal, tangent);
                let local = frame.to_local(p);
                match normal_curvature_radius(&local, k1, k2) {
                    Some(r) => frame.to_global(&Vector3::new(0.0, 0.0, r)) - p,
                    None => frame.e3,
                }
            }
        }
    }

    /// Absolute value of the implicit function.
    #[inline]
    pub fn distance(&self, p: &Point3<f64>) -> f64 {
        self.evaluate(p).abs()
    }

    /// Samples the implicit function at every point.
    pub fn sample(&self, points: &[Point3<f64>]) -> Vec<f64> {
        points.iter().map(|p| self.evaluate(p)).collect()
    }
}

/// Radius of normal curvature in the direction of `local`'s in-plane angle,
/// or `None` where the surface is flat in that direction.
fn normal_curvature_radius(local: &Vector3<f64>, k1: f64, k2: f64) -> Option<f64> {
    let angle = if local.x != 0.0 {
        (local.y / local.x).atan()
    } else {
        0.0
    };
    let kn = k1 * angle.cos().powi(2) + k2 * angle.sin().powi(2);
    if kn.abs() > f64::MIN_POSITIVE {
        Some(1.0 / kn)
    } else {
        None
    }
}

/// Orthonormal frame with `e3` along the surface normal and `e1` along the tangent.
struct LocalFrame {
    origin: Point3<f64>,
    e1: Vector3<f64>,
    e2: Vector3<f64>,
    e3: Vector3<f64>,
}

impl LocalFrame {
    fn new(origin: Point3<f64>, normal: Vector3<f64>, tangent: Vector3<f64>) -> Self {
        let e3 = normal.try_normalize(0.0).unwrap_or_else(Vector3::z);
        let in_plane = tangent - e3 * tangent.dot(&e3);
        let e1 = in_plane
            .try_normalize(0.0)
            .unwrap_or_else(|| {
                e3.cross(&Vector3::x())
                    .try_normalize(0.0)
                    .unwrap_or_else(Vector3::y)
            });
        let e2 = e3.cross(&e1);
        Self { origin, e1, e2, e3 }
    }

    fn to_local(&self, p: &Point3<f64>) -> Vector3<f64> {
        let d = p - self.origin;
        Vector3::new(d.dot(&self.e1), d.dot(&self.e2), d.dot(&self.e3))
    }

    fn to_global(&self, local: &Vector3<f64>) -> Point3<f64> {
        self.origin + self.e1 * local.x + self.e2 * local.y + self.e3 * local.z
    }
}
