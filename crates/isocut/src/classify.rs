//! Vertex classification against a cutting surface.

use nalgebra::Point3;
use smallvec::SmallVec;

use crate::polygon::POLYGON_INLINE_CAPACITY;
use crate::{CutConfig, CuttingSurface};

/// Per-vertex status buffer.
pub type StatusBuf = SmallVec<[f64; POLYGON_INLINE_CAPACITY]>;

/// Where a face lies relative to the cutting surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceStatus {
    /// Every vertex is strictly on the retained side; the whole face is kept.
    BelowSurface,
    /// The face has retained vertices and non-retained vertices.
    Cut,
    /// No vertex is strictly on the retained side; nothing is kept.
    AboveSurface,
}

impl FaceStatus {
    /// The conventional integer label: -1, 0 or +1.
    pub fn label(self) -> i8 {
        match self {
            FaceStatus::BelowSurface => -1,
            FaceStatus::Cut => 0,
            FaceStatus::AboveSurface => 1,
        }
    }

    /// Returns `true` for [`FaceStatus::Cut`].
    #[inline]
    pub fn is_cut(self) -> bool {
        self == FaceStatus::Cut
    }
}

/// Signed vertex statuses of one face and the derived edge weights.
///
/// Statuses within tolerance of zero are stored as exactly `0.0`. A vertex with
/// positive status is on the retained side.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointClassification {
    status: StatusBuf,
    weights: SmallVec<[Option<f64>; POLYGON_INLINE_CAPACITY]>,
}

impl PointClassification {
    /// Builds a classification from raw statuses, snapping near-zero values.
    ///
    /// `scale` is the magnitude of the operands the statuses were computed from.
    pub fn from_raw(raw: impl IntoIterator<Item = f64>, scale: f64, config: &CutConfig) -> Self {
        let status: StatusBuf = raw.into_iter().map(|s| config.snap(s, scale)).collect();
        let weights = edge_weights(&status);
        Self { status, weights }
    }

    /// Per-vertex statuses.
    #[inline]
    pub fn status(&self) -> &[f64] {
        &self.status
    }

    /// Per-edge weights; entry `i` belongs to the edge from vertex `i` to `i + 1`.
    ///
    /// `Some(w)` only where the edge endpoints have strictly opposite signs; the
    /// intersection point is `v[i] + w * (v[i + 1] - v[i])`.
    #[inline]
    pub fn weights(&self) -> &[Option<f64>] {
        &self.weights
    }

    /// Number of classified vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.status.len()
    }

    /// Returns `true` when no vertex was classified.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.status.is_empty()
    }

    /// Number of edges crossing the surface.
    pub fn crossing_count(&self) -> usize {
        self.weights.iter().filter(|w| w.is_some()).count()
    }

    /// Index of the first vertex strictly on the retained side.
    pub fn first_retained(&self) -> Option<usize> {
        self.status.iter().position(|&s| s > 0.0)
    }

    /// Classifies the face as a whole.
    ///
    /// Zero-status vertices count as not retained, so a face whose vertices
    /// all lie on the surface is [`FaceStatus::AboveSurface`].
    pub fn face_status(&self) -> FaceStatus {
        let retained = self.status.iter().filter(|&&s| s > 0.0).count();
        if retained == 0 {
            FaceStatus::AboveSurface
        } else if retained == self.status.len() {
            FaceStatus::BelowSurface
        } else {
            FaceStatus::Cut
        }
    }

    /// Returns the classification for the opposite side.
    ///
    /// Weights are unchanged by negation.
    pub fn flipped(&self) -> Self {
        Self {
            status: self.status.iter().map(|&s| if s == 0.0 { 0.0 } else { -s }).collect(),
            weights: self.weights.clone(),
        }
    }
}

/// Interpolation weights for sign-straddling edges.
fn edge_weights(status: &[f64]) -> SmallVec<[Option<f64>; POLYGON_INLINE_CAPACITY]> {
    let n = status.len();
    (0..n)
        .map(|i| {
            let s0 = status[i];
            let s1 = status[(i + 1) % n];
            if (s0 < 0.0 && s1 > 0.0) || (s0 > 0.0 && s1 < 0.0) {
                Some((s0 / (s0 - s1)).clamp(0.0, 1.0))
            } else {
                None
            }
        })
        .collect()
}

/// Classifies the vertices of a face against a cutting surface.
///
/// For a plane the snap scale is `|normal| * max |v - base|`; for a scalar field
/// it is the largest magnitude among the vertex values and the cut value.
/// A precomputed classification is returned unchanged. Field and precomputed
/// results have one entry per value, whatever the length of `points`.
pub fn classify(
    points: &[Point3<f64>],
    surface: &CuttingSurface<'_>,
    config: &CutConfig,
) -> PointClassification {
    match surface {
        CuttingSurface::Plane(plane) => {
            let reach = points
                .iter()
                .map(|p| (p - plane.base()).norm())
                .fold(0.0, f64::max);
            let scale = reach * plane.normal().norm();
            PointClassification::from_raw(points.iter().map(|p| plane.status(p)), scale, config)
        }
        CuttingSurface::ScalarField { values, cut_value } => {
            classify_values(values, *cut_value, config)
        }
        CuttingSurface::Precomputed(classification) => (*classification).clone(),
    }
}

/// Classifies per-vertex values against an iso level.
pub fn classify_values(values: &[f64], level: f64, config: &CutConfig) -> PointClassification {
    let scale = values.iter().fold(level.abs(), |m, v| m.max(v.abs()));
    PointClassification::from_raw(values.iter().map(|v| v - level), scale, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    fn triangle() -> [Point3<f64>; 3] {
        [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn field_statuses_and_weights() {
        let cfg = CutConfig::default();
        let values = [-1.0, 1.0, 1.0];
        let c = classify(&triangle(), &CuttingSurface::field(&values, 0.0), &cfg);
        assert_eq!(c.status(), &[-1.0, 1.0, 1.0]);
        assert_eq!(c.weights(), &[Some(0.5), None, Some(0.5)]);
        assert_eq!(c.crossing_count(), 2);
        assert_eq!(c.face_status(), FaceStatus::Cut);
        assert_eq!(c.first_retained(), Some(1));
    }

    #[test]
    fn plane_statuses() {
        let cfg = CutConfig::default();
        let surface = CuttingSurface::plane(Point3::new(0.25, 0.0, 0.0), Vector3::x());
        let c = classify(&triangle(), &surface, &cfg);
        assert_eq!(c.status(), &[-0.25, 0.75, -0.25]);
        assert_eq!(c.weights(), &[Some(0.25), Some(0.75), None]);
    }

    #[test]
    fn near_zero_snaps_to_exact_zero() {
        let cfg = CutConfig::default();
        let values = [1e-17, 1.0, -1.0];
        let c = classify(&triangle(), &CuttingSurface::field(&values, 0.0), &cfg);
        assert_eq!(c.status()[0], 0.0);
        // No weight on edges touching the zero vertex.
        assert_eq!(c.weights(), &[None, Some(0.5), None]);
    }

    #[test]
    fn uniform_signs_are_not_cut() {
        let cfg = CutConfig::default();
        let wet = classify_values(&[1.0, 2.0, 3.0], 0.5, &cfg);
        assert_eq!(wet.face_status(), FaceStatus::BelowSurface);
        assert_eq!(wet.crossing_count(), 0);

        let dry = classify_values(&[-1.0, -2.0, 0.0], 0.0, &cfg);
        assert_eq!(dry.face_status(), FaceStatus::AboveSurface);
        assert!(dry.first_retained().is_none());
    }

    #[test]
    fn all_zero_face_is_above_surface() {
        let cfg = CutConfig::default();
        let c = classify_values(&[0.5, 0.5, 0.5, 0.5], 0.5, &cfg);
        assert!(c.status().iter().all(|&s| s == 0.0));
        assert_eq!(c.face_status(), FaceStatus::AboveSurface);
        assert_eq!(c.flipped().face_status(), FaceStatus::AboveSurface);
    }

    #[test]
    fn flipped_swaps_sides_and_keeps_weights() {
        let cfg = CutConfig::default();
        let c = classify_values(&[-1.0, 3.0, 3.0], 0.0, &cfg);
        let f = c.flipped();
        assert_eq!(f.status(), &[1.0, -3.0, -3.0]);
        assert_eq!(f.weights(), c.weights());
        assert_eq!(f.first_retained(), Some(0));
    }

    #[test]
    fn precomputed_is_reused() {
        let cfg = CutConfig::default();
        let c = classify_values(&[-1.0, 1.0, 1.0], 0.0, &cfg);
        let again = classify(&triangle(), &CuttingSurface::Precomputed(&c), &cfg);
        assert_eq!(again, c);
    }

    #[test]
    fn face_status_labels() {
        assert_eq!(FaceStatus::BelowSurface.label(), -1);
        assert_eq!(FaceStatus::Cut.label(), 0);
        assert_eq!(FaceStatus::AboveSurface.label(), 1);
        assert!(FaceStatus::Cut.is_cut());
    }
}
