//! Clipping a face by a cutting surface.

use nalgebra::{Point3, Vector3};

use crate::classify::{classify, classify_values, FaceStatus, PointClassification};
use crate::polygon::{polygon_centre_and_area, PolygonPoints};
use crate::{CutConfig, CuttingSurface, Face};

/// Which side of the cutting surface is retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    /// Keep the part where the status is positive.
    #[default]
    Positive,
    /// Keep the part where the status is negative.
    Negative,
}

impl Side {
    /// Returns the other side.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Side::Positive => Side::Negative,
            Side::Negative => Side::Positive,
        }
    }
}

/// Result of cutting one face.
///
/// Holds the retained sub-polygon (same traversal sense as the parent face),
/// the interface polygon (the points where the face meets the surface, in
/// walk order) and the sub-face centre and area vector.
#[derive(Debug, Clone, PartialEq)]
pub struct SubFace {
    status: FaceStatus,
    points: PolygonPoints,
    surface_points: PolygonPoints,
    centre: Point3<f64>,
    area: Vector3<f64>,
}

impl SubFace {
    /// A sub-face with nothing retained.
    pub fn empty() -> Self {
        Self {
            status: FaceStatus::AboveSurface,
            points: PolygonPoints::new(),
            surface_points: PolygonPoints::new(),
            centre: Point3::origin(),
            area: Vector3::zeros(),
        }
    }

    fn whole(face: &Face) -> Self {
        Self {
            status: FaceStatus::BelowSurface,
            points: face.points().iter().copied().collect(),
            surface_points: PolygonPoints::new(),
            centre: face.centre(),
            area: face.area(),
        }
    }

    /// Face status of the cut.
    #[inline]
    pub fn status(&self) -> FaceStatus {
        self.status
    }

    /// Vertices of the retained sub-polygon.
    #[inline]
    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// Points where the face meets the cutting surface.
    #[inline]
    pub fn surface_points(&self) -> &[Point3<f64>] {
        &self.surface_points
    }

    /// Centre of the retained sub-polygon.
    #[inline]
    pub fn centre(&self) -> Point3<f64> {
        self.centre
    }

    /// Area vector of the retained sub-polygon.
    #[inline]
    pub fn area(&self) -> Vector3<f64> {
        self.area
    }

    /// Area magnitude of the retained sub-polygon.
    #[inline]
    pub fn mag_area(&self) -> f64 {
        self.area.norm()
    }
}

/// Cuts faces by planes or iso-surfaces.
///
/// The cutter holds only its tolerances; every call returns a fresh
/// [`SubFace`], so one instance can be shared across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct FaceCutter {
    config: CutConfig,
}

impl FaceCutter {
    /// Creates a cutter with the given tolerances.
    pub fn new(config: CutConfig) -> Self {
        Self { config }
    }

    /// Returns the tolerances in use.
    #[inline]
    pub fn config(&self) -> &CutConfig {
        &self.config
    }

    /// Classifies the face's vertices without cutting.
    ///
    /// The result can be passed back as [`CuttingSurface::Precomputed`] to cut
    /// the same face from either side without reclassifying it.
    pub fn classify(&self, face: &Face, surface: &CuttingSurface<'_>) -> PointClassification {
        classify(face.points(), surface, &self.config)
    }

    /// Cuts a face and returns the part on `side` of the surface.
    ///
    /// A field or precomputed classification whose length differs from the
    /// face's vertex count yields an empty sub-face.
    pub fn cut(&self, face: &Face, surface: &CuttingSurface<'_>, side: Side) -> SubFace {
        let classification = classify(face.points(), surface, &self.config);
        if classification.len() != face.len() {
            tracing::debug!(
                statuses = classification.len(),
                vertices = face.len(),
                "classification does not match face vertices, empty sub-face"
            );
            return SubFace::empty();
        }
        match side {
            Side::Positive => cut_classified(face, &classification),
            Side::Negative => cut_classified(face, &classification.flipped()),
        }
    }

    /// Returns the points where the iso-line `values == level` crosses the
    /// ring `points`: every vertex within tolerance of `level` and every
    /// interpolated crossing of a straddling edge, in ring order.
    ///
    /// Returns no points when `values` and `points` differ in length.
    pub fn cut_points(
        &self,
        points: &[Point3<f64>],
        values: &[f64],
        level: f64,
    ) -> PolygonPoints {
        let mut cut = PolygonPoints::new();
        if values.len() != points.len() {
            tracing::debug!(
                values = values.len(),
                vertices = points.len(),
                "field does not match face vertices, no cut points"
            );
            return cut;
        }

        let classification = classify_values(values, level, &self.config);
        let status = classification.status();
        let weights = classification.weights();
        let n = points.len();

        for i in 0..n {
            if status[i] == 0.0 {
                cut.push(points[i]);
            } else if let Some(w) = weights[i] {
                cut.push(interpolate(&points[i], &points[(i + 1) % n], w));
            }
        }
        if cut.len() > 2 {
            tracing::trace!(points = cut.len(), level, "iso-line crosses face more than once");
        }
        cut
    }
}

#[inline]
fn interpolate(a: &Point3<f64>, b: &Point3<f64>, w: f64) -> Point3<f64> {
    a + (b - a) * w
}

/// Clips `face` to the vertices with positive status.
fn cut_classified(face: &Face, classification: &PointClassification) -> SubFace {
    match classification.face_status() {
        FaceStatus::AboveSurface => SubFace::empty(),
        FaceStatus::BelowSurface => SubFace::whole(face),
        FaceStatus::Cut => {
            let (points, surface_points) = clip_ring(face.points(), classification);
            if points.len() < 3 {
                tracing::debug!(points = points.len(), "degenerate cut snapped to empty sub-face");
                return SubFace::empty();
            }
            let (centre, area) = polygon_centre_and_area(&points);
            SubFace {
                status: FaceStatus::Cut,
                points,
                surface_points,
                centre,
                area,
            }
        }
    }
}

/// Walks the vertex ring from the first retained vertex and builds the
/// retained polygon and the interface polygon.
///
/// Uses a Sutherland-Hodgman style walk: retained vertices go to the
/// sub-polygon, on-surface vertices to both lists, and the crossing point of
/// every straddling edge to both lists.
fn clip_ring(
    points: &[Point3<f64>],
    classification: &PointClassification,
) -> (PolygonPoints, PolygonPoints) {
    let status = classification.status();
    let weights = classification.weights();
    let n = points.len();

    let mut sub = PolygonPoints::new();
    let mut surface = PolygonPoints::new();

    let Some(start) = classification.first_retained() else {
        return (sub, surface);
    };

    for k in start..start + n {
        let i = k % n;
        let current = points[i];

        if status[i] > 0.0 {
            sub.push(current);
        } else if status[i] == 0.0 {
            sub.push(current);
            surface.push(current);
        }

        if let Some(w) = weights[i] {
            let p = interpolate(&current, &points[(i + 1) % n], w);
            sub.push(p);
            surface.push(p);
        }
    }

    (sub, surface)
}
