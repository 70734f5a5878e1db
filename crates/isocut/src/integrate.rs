//! Time integration of the wet face area swept by a moving interface.
//!
//! Conventions: the interface normal `n0` points from the wet side into the
//! dry side and `un0` is the interface speed along `n0`, so `un0 > 0` means
//! the face is filling. The arrival time of a point `x` is
//! `((x - x0) . n0) / un0`; the point is wet at time `t` once the interface
//! has passed it (`t > arrival` while filling, `t < arrival` while emptying).
//!
//! Between two consecutive vertex arrival times the interface segment sweeps
//! a quadrilateral of the face and the wet area is exactly quadratic in time,
//! so each sub-interval is integrated in closed form.

use nalgebra::{Point3, Vector3};
use smallvec::SmallVec;

use crate::classify::StatusBuf;
use crate::cutter::{FaceCutter, Side};
use crate::polygon::POLYGON_INLINE_CAPACITY;
use crate::{CutConfig, CuttingSurface, Face};

/// Local quadratic model of the area swept between two interface segments.
///
/// On the sub-interval normalized to `s` in `[0, 1]` the swept area is
/// `alpha * s^2 + beta * s`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct QuadAreaCoeffs {
    pub alpha: f64,
    pub beta: f64,
}

impl QuadAreaCoeffs {
    /// Swept area at normalized time `s`.
    #[inline]
    pub fn at(&self, s: f64) -> f64 {
        (self.alpha * s + self.beta) * s
    }

    /// Swept area at the end of the sub-interval.
    #[inline]
    pub fn area(&self) -> f64 {
        self.alpha + self.beta
    }

    /// Integral of the swept area over the normalized sub-interval.
    #[inline]
    pub fn integrated(&self) -> f64 {
        self.alpha / 3.0 + 0.5 * self.beta
    }
}

/// Derives the quadratic area coefficients from the interface segments `pf0`
/// and `pf1` sampled at the start and end of a sub-interval.
///
/// A sample with a single point is a segment collapsed onto a vertex. Returns
/// `None` when the samples cannot bound a swept quadrilateral: either sample is
/// empty, either has more than two points (the interface crosses the face
/// more than once), or both collapse to points. Callers fall back to linear
/// interpolation of the endpoint areas.
pub fn quad_area_coeffs(pf0: &[Point3<f64>], pf1: &[Point3<f64>]) -> Option<QuadAreaCoeffs> {
    let (np0, np1) = (pf0.len(), pf1.len());
    if np0 == 0 || np1 == 0 || np0 > 2 || np1 > 2 || (np0 == 1 && np1 == 1) {
        return None;
    }

    // Quadrilateral ABCD with AB = pf0 and CD = pf1, traversed so that C lies
    // beyond B and D beyond A. Each endpoint slides along one face edge, so
    // the correct pairing is the one whose sides AD and BC do not cross.
    let a = pf0[0];
    let b = pf0[np0 - 1];
    let mut c = pf1[0];
    let mut d = pf1[np1 - 1];
    if np0 == 2 && np1 == 2 && segments_cross(&a, &d, &b, &c) {
        std::mem::swap(&mut c, &mut d);
    }

    let scale = [(b - a).norm(), (c - a).norm(), (d - a).norm()]
        .into_iter()
        .fold(0.0, f64::max);
    let tol = 1e-12 * scale;

    // Local frame: A at the origin, AB (or DC for a triangle) along xhat.
    let bx = (b - a).norm();
    let xhat: Vector3<f64> = if bx > tol {
        (b - a) / bx
    } else if (c - d).norm() > tol {
        (c - d) / (c - d).norm()
    } else {
        return None;
    };

    let mut yhat = d - a;
    yhat -= xhat * yhat.dot(&xhat);
    let ylen = yhat.norm();
    if ylen <= tol {
        // Both segments on one line: nothing swept.
        return Some(QuadAreaCoeffs::default());
    }
    yhat /= ylen;

    let cx = (c - a).dot(&xhat);
    let cy = (c - a).dot(&yhat).abs();
    let dx = (d - a).dot(&xhat);
    let dy = (d - a).dot(&yhat).abs();

    Some(QuadAreaCoeffs {
        alpha: 0.5 * ((cx - bx) * dy - dx * cy),
        beta: 0.5 * bx * (dy + cy),
    })
}

/// Whether the coplanar segments `p0 p1` and `q0 q1` cross at an interior point.
fn segments_cross(p0: &Point3<f64>, p1: &Point3<f64>, q0: &Point3<f64>, q1: &Point3<f64>) -> bool {
    let p = p1 - p0;
    let q = q1 - q0;
    p.cross(&(q0 - p0)).dot(&p.cross(&(q1 - p0))) < 0.0
        && q.cross(&(p0 - q0)).dot(&q.cross(&(p1 - q0))) < 0.0
}

/// Integrates wet face area and face flux over one timestep.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeIntegrator {
    cutter: FaceCutter,
}

impl TimeIntegrator {
    /// Creates an integrator with the given tolerances.
    pub fn new(config: CutConfig) -> Self {
        Self {
            cutter: FaceCutter::new(config),
        }
    }

    /// Returns the face cutter used to sample the interface.
    #[inline]
    pub fn cutter(&self) -> &FaceCutter {
        &self.cutter
    }

    #[inline]
    fn config(&self) -> &CutConfig {
        self.cutter.config()
    }

    /// Arrival times of a plane starting at `x0` and moving with speed `un0`
    /// along the unit normal `n0`, for each point.
    pub fn arrival_times(
        points: &[Point3<f64>],
        x0: &Point3<f64>,
        n0: &Vector3<f64>,
        un0: f64,
    ) -> StatusBuf {
        points.iter().map(|p| (p - x0).dot(n0) / un0).collect()
    }

    /// Time-integrated flux through `face` for an interface plane moving at
    /// constant speed.
    ///
    /// `phi` is the volumetric face flux and `mag_sf` the face area magnitude;
    /// the result is `phi / mag_sf` times the time-integrated wet area.
    #[allow(clippy::too_many_arguments)]
    pub fn time_integrated_flux_plane(
        &self,
        face: &Face,
        x0: &Point3<f64>,
        n0: &Vector3<f64>,
        un0: f64,
        dt: f64,
        phi: f64,
        mag_sf: f64,
    ) -> f64 {
        if mag_sf <= 0.0 {
            return 0.0;
        }
        phi / mag_sf * self.time_integrated_area_plane(face, x0, n0, un0, dt, mag_sf)
    }

    /// Time-integrated flux through `face` given per-vertex arrival times.
    pub fn time_integrated_flux(
        &self,
        face: &Face,
        times: &[f64],
        un0: f64,
        dt: f64,
        phi: f64,
        mag_sf: f64,
    ) -> f64 {
        if mag_sf <= 0.0 {
            return 0.0;
        }
        phi / mag_sf * self.time_integrated_area(face, times, dt, mag_sf, un0)
    }

    /// Time-integrated wet area of `face` for an interface plane moving at
    /// constant speed.
    ///
    /// A normal shorter than the configured minimum carries no interface
    /// position and yields 0. A stationary interface yields the current wet
    /// area times `dt`.
    pub fn time_integrated_area_plane(
        &self,
        face: &Face,
        x0: &Point3<f64>,
        n0: &Vector3<f64>,
        un0: f64,
        dt: f64,
        mag_sf: f64,
    ) -> f64 {
        let len = n0.norm();
        if len < self.config().min_normal_magnitude {
            tracing::debug!(normal = len, "interface normal undefined, no swept area");
            return 0.0;
        }
        let n0 = n0 / len;

        if un0.abs() < self.config().min_speed {
            let surface = CuttingSurface::plane(*x0, n0);
            let wet = self.cutter.cut(face, &surface, Side::Negative);
            return wet_fraction(face, wet.mag_area()) * mag_sf * dt;
        }

        let times = Self::arrival_times(face.points(), x0, &n0, un0);
        let centre_time = (face.centre() - x0).dot(&n0) / un0;
        self.integrate(face, &times, centre_time, dt, mag_sf, un0)
    }

    /// Time-integrated wet area of `face` given per-vertex arrival times.
    ///
    /// Faces the interface crosses more than once are decomposed into
    /// triangles about the face centre, whose arrival time is taken as the
    /// mean of the vertex arrival times.
    pub fn time_integrated_area(
        &self,
        face: &Face,
        times: &[f64],
        dt: f64,
        mag_sf: f64,
        un0: f64,
    ) -> f64 {
        let centre_time = if times.is_empty() {
            0.0
        } else {
            times.iter().sum::<f64>() / times.len() as f64
        };
        self.integrate(face, times, centre_time, dt, mag_sf, un0)
    }

    /// Wet area of `face` at time `t` given per-vertex arrival times.
    pub fn wet_area(&self, face: &Face, times: &[f64], t: f64, mag_sf: f64, un0: f64) -> f64 {
        let surface = CuttingSurface::field(times, t);
        let wet = self.cutter.cut(face, &surface, wet_side(un0));
        wet_fraction(face, wet.mag_area()) * mag_sf
    }

    fn integrate(
        &self,
        face: &Face,
        times: &[f64],
        centre_time: f64,
        dt: f64,
        mag_sf: f64,
        un0: f64,
    ) -> f64 {
        if times.is_empty() || dt <= 0.0 || mag_sf <= 0.0 {
            return 0.0;
        }
        if times.len() != face.len() {
            tracing::debug!(
                times = times.len(),
                vertices = face.len(),
                "arrival times do not match face vertices, no swept area"
            );
            return 0.0;
        }

        let filling = un0 >= 0.0;
        let (t_min, t_max) = times
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &t| (lo.min(t), hi.max(t)));

        // Interface passed the whole face before the step.
        if t_max <= 0.0 {
            return if filling { mag_sf * dt } else { 0.0 };
        }
        // Interface does not reach the face within the step.
        if t_min >= dt {
            return if filling { 0.0 } else { mag_sf * dt };
        }

        let tol = self.config().time_merge_tolerance * dt;
        let total = match direction_changes(times, tol) {
            0 => parallel_area(t_min, dt, mag_sf, filling),
            2 => self.integrate_ring(face, times, dt, mag_sf, un0),
            shifts => {
                tracing::trace!(shifts, vertices = face.len(), "face decomposed into triangles");
                self.integrate_fan(face, times, centre_time, dt, mag_sf, un0)
            }
        };
        total.clamp(0.0, mag_sf * dt)
    }

    /// Sums the integrals over the triangles (centre, v[i], v[i + 1]).
    fn integrate_fan(
        &self,
        face: &Face,
        times: &[f64],
        centre_time: f64,
        dt: f64,
        mag_sf: f64,
        un0: f64,
    ) -> f64 {
        let points = face.points();
        let n = points.len();
        let centre = face.centre();
        let area_scale = mag_sf / face.mag_area().max(f64::MIN_POSITIVE);

        (0..n)
            .map(|i| {
                let j = (i + 1) % n;
                let tri = Face::triangle(centre, points[i], points[j]);
                let tri_times = [centre_time, times[i], times[j]];
                let mag_tri = tri.mag_area() * area_scale;
                self.integrate(&tri, &tri_times, centre_time, dt, mag_tri, un0)
            })
            .sum()
    }

    /// Integrates a face whose arrival times rise and fall once around the ring.
    fn integrate_ring(&self, face: &Face, times: &[f64], dt: f64, mag_sf: f64, un0: f64) -> f64 {
        let tol = self.config().time_merge_tolerance * dt;
        let sign = if un0 >= 0.0 { 1.0 } else { -1.0 };
        let area_scale = mag_sf / face.mag_area().max(f64::MIN_POSITIVE);

        let mut inner: SmallVec<[f64; POLYGON_INLINE_CAPACITY]> =
            times.iter().copied().filter(|&t| t > tol && t < dt - tol).collect();
        inner.sort_by(f64::total_cmp);

        let mut levels: SmallVec<[f64; POLYGON_INLINE_CAPACITY]> = SmallVec::new();
        levels.push(0.0);
        for t in inner {
            if t > levels[levels.len() - 1] + tol {
                levels.push(t);
            }
        }
        levels.push(dt);

        let mut area0 = self.wet_area(face, times, 0.0, mag_sf, un0);
        let mut pf0 = self.cutter.cut_points(face.points(), times, 0.0);
        let mut total = 0.0;

        for window in levels.windows(2) {
            let (t0, t1) = (window[0], window[1]);
            let h = t1 - t0;
            let pf1 = self.cutter.cut_points(face.points(), times, t1);
            let area1 = self.wet_area(face, times, t1, mag_sf, un0);

            total += match quad_area_coeffs(&pf0, &pf1) {
                Some(q) => h * (area0 + sign * area_scale * q.integrated()),
                None => {
                    tracing::trace!(
                        t0,
                        t1,
                        n0 = pf0.len(),
                        n1 = pf1.len(),
                        "linear area interpolation on sub-interval"
                    );
                    0.5 * h * (area0 + area1)
                }
            };

            area0 = area1;
            pf0 = pf1;
        }
        total
    }
}

/// Side of the arrival-time field that is wet: status is `arrival - t`.
#[inline]
fn wet_side(un0: f64) -> Side {
    if un0 >= 0.0 {
        Side::Negative
    } else {
        Side::Positive
    }
}

/// Fraction of the face covered by a sub-face of area `sub_area`.
#[inline]
fn wet_fraction(face: &Face, sub_area: f64) -> f64 {
    let mag = face.mag_area();
    if mag > f64::MIN_POSITIVE {
        (sub_area / mag).min(1.0)
    } else {
        0.0
    }
}

/// Wet area integral when every vertex is reached at the same time `t_hit`.
fn parallel_area(t_hit: f64, dt: f64, mag_sf: f64, filling: bool) -> f64 {
    let t = t_hit.clamp(0.0, dt);
    if filling {
        mag_sf * (dt - t)
    } else {
        mag_sf * t
    }
}

/// Counts how often the arrival times change between rising and falling
/// when walking around the face. Steps smaller than `tol` are ignored.
fn direction_changes(times: &[f64], tol: f64) -> usize {
    let n = times.len();
    let signs: SmallVec<[bool; POLYGON_INLINE_CAPACITY]> = (0..n)
        .filter_map(|i| {
            let step = times[(i + 1) % n] - times[i];
            if step.abs() > tol {
                Some(step > 0.0)
            } else {
                None
            }
        })
        .collect();

    let m = signs.len();
    (0..m).filter(|&i| signs[i] != signs[(i + 1) % m]).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square() -> Face {
        Face::rectangle(Point3::origin(), Vector3::x(), Vector3::y())
    }

    #[test]
    fn quad_coeffs_rectangle_sweep() {
        let pf0 = [Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)];
        let pf1 = [Point3::new(1.0, 0.5, 0.0), Point3::new(0.0, 0.5, 0.0)];
        let q = quad_area_coeffs(&pf0, &pf1).unwrap();
        assert_relative_eq!(q.alpha, 0.0);
        assert_relative_eq!(q.beta, 0.5);
        assert_relative_eq!(q.area(), 0.5);
        assert_relative_eq!(q.integrated(), 0.25);
    }

    #[test]
    fn quad_coeffs_segment_orientation_does_not_matter() {
        let pf0 = [Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0)];
        let a = [Point3::new(0.5, 1.0, 0.0), Point3::new(1.5, 1.0, 0.0)];
        let b = [Point3::new(1.5, 1.0, 0.0), Point3::new(0.5, 1.0, 0.0)];
        let qa = quad_area_coeffs(&pf0, &a).unwrap();
        let qb = quad_area_coeffs(&pf0, &b).unwrap();
        assert_relative_eq!(qa.alpha, qb.alpha);
        assert_relative_eq!(qa.beta, qb.beta);
        // Trapezoid with parallel sides 2 and 1, height 1.
        assert_relative_eq!(qa.area(), 1.5);
        assert_relative_eq!(qa.alpha, -0.5);
    }

    #[test]
    fn quad_coeffs_growing_triangle() {
        let pf0 = [Point3::origin()];
        let pf1 = [Point3::new(1.0, 1.0, 0.0), Point3::new(-1.0, 1.0, 0.0)];
        let q = quad_area_coeffs(&pf0, &pf1).unwrap();
        assert_relative_eq!(q.alpha, 1.0);
        assert_relative_eq!(q.beta, 0.0);
        assert_relative_eq!(q.at(0.5), 0.25);
    }

    #[test]
    fn quad_coeffs_degenerate_samples() {
        let seg = [Point3::origin(), Point3::new(1.0, 0.0, 0.0)];
        let three = [Point3::origin(), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)];
        assert!(quad_area_coeffs(&[], &seg).is_none());
        assert!(quad_area_coeffs(&seg, &[]).is_none());
        assert!(quad_area_coeffs(&seg, &three).is_none());
        assert!(quad_area_coeffs(&[Point3::origin()], &[Point3::new(0.0, 1.0, 0.0)]).is_none());
        // Collinear segments sweep nothing.
        let far = [Point3::new(2.0, 0.0, 0.0), Point3::new(3.0, 0.0, 0.0)];
        let q = quad_area_coeffs(&seg, &far).unwrap();
        assert_eq!(q.area(), 0.0);
    }

    #[test]
    fn direction_change_counts() {
        assert_eq!(direction_changes(&[0.0, 0.5, 1.0, 0.5], 1e-12), 2);
        assert_eq!(direction_changes(&[0.0, 0.0, 1.0, 1.0], 1e-12), 2);
        assert_eq!(direction_changes(&[0.0, 2.0, 1.0, 1.0], 1e-12), 2);
        assert_eq!(direction_changes(&[0.3, 0.3, 0.3], 1e-12), 0);
        assert_eq!(direction_changes(&[0.0, 2.0, 3.0, 2.0, 3.0, 2.0], 1e-12), 4);
    }

    #[test]
    fn corner_to_corner_sweep_integrates_to_half() {
        let integrator = TimeIntegrator::default();
        let face = unit_square();
        let times = [0.0, 0.5, 1.0, 0.5];
        let area = integrator.time_integrated_area(&face, &times, 1.0, 1.0, 1.0);
        assert_relative_eq!(area, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn edge_parallel_sweep_is_linear() {
        let integrator = TimeIntegrator::default();
        let face = unit_square();
        let area = integrator.time_integrated_area(&face, &[0.0, 0.0, 1.0, 1.0], 1.0, 1.0, 1.0);
        assert_relative_eq!(area, 0.5, epsilon = 1e-12);
        // Half the sweep fits in the step.
        let half = integrator.time_integrated_area(&face, &[0.0, 0.0, 1.0, 1.0], 0.5, 1.0, 1.0);
        assert_relative_eq!(half, 0.125, epsilon = 1e-12);
    }

    #[test]
    fn emptying_face_mirrors_filling() {
        let integrator = TimeIntegrator::default();
        let face = unit_square();
        let times = [0.0, 0.25, 1.0, 0.75];
        let fill = integrator.time_integrated_area(&face, &times, 1.0, 1.0, 1.0);
        let empty = integrator.time_integrated_area(&face, &times, 1.0, 1.0, -1.0);
        assert_relative_eq!(fill + empty, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn untouched_faces_are_exact() {
        let integrator = TimeIntegrator::default();
        let face = unit_square();
        let later = [2.0, 3.0, 4.0, 3.0];
        let earlier = [-4.0, -3.0, -2.0, -3.0];
        assert_eq!(integrator.time_integrated_area(&face, &later, 1.0, 1.0, 1.0), 0.0);
        assert_eq!(integrator.time_integrated_area(&face, &later, 1.0, 1.0, -1.0), 1.0);
        assert_eq!(integrator.time_integrated_area(&face, &earlier, 1.0, 1.0, 1.0), 1.0);
        assert_eq!(integrator.time_integrated_area(&face, &earlier, 1.0, 1.0, -1.0), 0.0);
    }

    #[test]
    fn parallel_face_is_a_step() {
        let integrator = TimeIntegrator::default();
        let face = unit_square();
        let times = [0.25; 4];
        assert_relative_eq!(integrator.time_integrated_area(&face, &times, 1.0, 2.0, 1.0), 1.5);
        assert_relative_eq!(integrator.time_integrated_area(&face, &times, 1.0, 2.0, -1.0), 0.5);
    }

    #[test]
    fn plane_mode_matches_arrival_mode() {
        let integrator = TimeIntegrator::default();
        let face = unit_square();
        let x0 = Point3::new(-0.2, 0.1, 0.0);
        let n0 = Vector3::new(1.0, 0.4, 0.0).normalize();
        let un0 = 1.3;
        let times = TimeIntegrator::arrival_times(face.points(), &x0, &n0, un0);
        let a = integrator.time_integrated_area_plane(&face, &x0, &n0, un0, 0.6, 1.0);
        let b = integrator.time_integrated_area(&face, &times, 0.6, 1.0, un0);
        assert_relative_eq!(a, b, epsilon = 1e-14);
    }

    #[test]
    fn flux_is_antisymmetric_in_phi() {
        let integrator = TimeIntegrator::default();
        let face = unit_square();
        let x0 = Point3::new(0.1, 0.0, 0.0);
        let n0 = Vector3::x();
        let f = integrator.time_integrated_flux_plane(&face, &x0, &n0, 0.5, 1.0, 3.0, 1.0);
        let g = integrator.time_integrated_flux_plane(&face, &x0, &n0, 0.5, 1.0, -3.0, 1.0);
        assert_eq!(f, -g);
        assert!(f > 0.0);
    }

    #[test]
    fn stationary_interface_keeps_current_area() {
        let integrator = TimeIntegrator::default();
        let face = unit_square();
        let area = integrator.time_integrated_area_plane(
            &face,
            &Point3::new(0.25, 0.0, 0.0),
            &Vector3::x(),
            0.0,
            2.0,
            1.0,
        );
        assert_relative_eq!(area, 0.5, epsilon = 1e-14);
    }

    #[test]
    fn undefined_normal_sweeps_nothing() {
        let integrator = TimeIntegrator::default();
        let area = integrator.time_integrated_area_plane(
            &unit_square(),
            &Point3::origin(),
            &Vector3::new(0.0, 0.0, 0.1),
            1.0,
            1.0,
            1.0,
        );
        assert_eq!(area, 0.0);
    }

    #[test]
    fn quad_coeffs_pair_endpoints_along_edges() {
        // The interface turns by more than 90 degrees: A slides to (0, 0) and
        // B to (1, 1), although pf1 lists them the other way round.
        let pf0 = [Point3::new(10.0, 0.0, 0.0), Point3::new(2.0, 1.0, 0.0)];
        let pf1 = [Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 0.0)];
        let q = quad_area_coeffs(&pf0, &pf1).unwrap();
        assert_relative_eq!(q.area(), 5.5, epsilon = 1e-12);
    }

    #[test]
    fn turning_interface_sweep_is_exact() {
        let integrator = TimeIntegrator::default();
        let face = Face::rectangle(Point3::origin(), Vector3::new(10.0, 0.0, 0.0), Vector3::y());
        // One minimum and one maximum around the ring.
        let times = [1.0, 0.0, -80.9, 9.1];
        let area = integrator.time_integrated_area(&face, &times, 1.0, 10.0, 1.0);
        // Wet trapezoid of area 5 t + 5 (t + 80.9) / 90, integrated over [0, 1].
        assert_relative_eq!(area, 632.0 / 90.0, epsilon = 1e-12);

        let h = 1.0 / 20000.0;
        let sampled: f64 = (0..20000)
            .map(|k| integrator.wet_area(&face, &times, (k as f64 + 0.5) * h, 10.0, 1.0))
            .sum::<f64>()
            * h;
        assert!((area - sampled).abs() < 1e-3);
    }

    #[test]
    fn mismatched_arrival_times_sweep_nothing() {
        let integrator = TimeIntegrator::default();
        let face = unit_square();
        let short = [0.0, 0.5, 1.0];
        assert_eq!(integrator.time_integrated_area(&face, &short, 1.0, 1.0, 1.0), 0.0);
        assert_eq!(integrator.time_integrated_flux(&face, &short, 1.0, 1.0, 2.0, 1.0), 0.0);
        assert_eq!(integrator.wet_area(&face, &short, 0.5, 1.0, 1.0), 0.0);

        let l_shape = Face::new([
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(1.0, 2.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        ]);
        // Four direction changes in the supplied prefix.
        let times = [0.0, 2.0, 1.0, 2.0, 1.0];
        assert_eq!(integrator.time_integrated_area(&l_shape, &times, 3.0, 3.0, 1.0), 0.0);
    }

    #[test]
    fn configured_min_speed_freezes_slow_interface() {
        let config = CutConfig::default().with_min_speed(1e-3);
        let integrator = TimeIntegrator::new(config);
        let area = integrator.time_integrated_area_plane(
            &unit_square(),
            &Point3::new(0.25, 0.0, 0.0),
            &Vector3::x(),
            1e-4,
            2.0,
            1.0,
        );
        assert_relative_eq!(area, 0.5, epsilon = 1e-14);
    }
}
