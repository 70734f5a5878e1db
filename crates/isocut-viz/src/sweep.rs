//! Animated interface plane sweeping across the scene.

use isocut::CuttingSurface;
use macroquad::prelude::*;
use nalgebra::{Point3, Vector3};

/// A plane through `x0 + n0 * un0 * t`, advanced once per frame.
pub struct Sweep {
    pub x0: Point3<f64>,
    pub n0: Vector3<f64>,
    pub un0: f64,
    /// Length of the integration window shown in the overlay.
    pub dt: f64,
    pub time: f64,
    /// Time after which the sweep restarts.
    pub period: f64,
    pub paused: bool,
}

impl Sweep {
    /// Creates a sweep starting at `x0` and moving along `n0` with speed `un0`.
    pub fn new(x0: Point3<f64>, n0: Vector3<f64>, un0: f64, period: f64) -> Self {
        Self {
            x0,
            n0: n0.try_normalize(0.0).unwrap_or_else(Vector3::x),
            un0,
            dt: 0.25,
            time: 0.0,
            period,
            paused: false,
        }
    }

    /// Current position of the interface plane.
    pub fn base(&self) -> Point3<f64> {
        self.x0 + self.n0 * (self.un0 * self.time)
    }

    /// Cutting surface for the current frame. The wet side is behind the
    /// plane, so the cut normal points against `n0`.
    pub fn surface(&self) -> CuttingSurface<'static> {
        CuttingSurface::plane(self.base(), -self.n0)
    }

    /// Advances the animation and handles keyboard input.
    ///
    /// Space pauses, `F` flips between filling and emptying, `R` restarts and
    /// the arrow keys turn the plane normal.
    pub fn update(&mut self, frame_time: f64) {
        if is_key_pressed(KeyCode::Space) {
            self.paused = !self.paused;
        }
        if is_key_pressed(KeyCode::F) {
            self.un0 = -self.un0;
            tracing::info!(un0 = self.un0, "sweep direction flipped");
        }
        if is_key_pressed(KeyCode::R) {
            self.time = 0.0;
        }
        let turn = if is_key_down(KeyCode::Left) {
            0.02
        } else if is_key_down(KeyCode::Right) {
            -0.02
        } else {
            0.0
        };
        if turn != 0.0 {
            let (s, c) = f64::sin_cos(turn);
            let n = self.n0;
            self.n0 = Vector3::new(c * n.x - s * n.y, s * n.x + c * n.y, n.z);
        }

        if !self.paused {
            self.time += frame_time;
            if self.time > self.period {
                self.time = 0.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use isocut::{Face, FaceCutter, Side};

    #[test]
    fn plane_moves_along_normal() {
        let mut sweep = Sweep::new(Point3::origin(), Vector3::new(2.0, 0.0, 0.0), 0.5, 10.0);
        sweep.time = 2.0;
        assert_eq!(sweep.base(), Point3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn wet_side_is_behind_the_plane() {
        let mut sweep = Sweep::new(Point3::origin(), Vector3::x(), 1.0, 10.0);
        sweep.time = 0.25;
        let face = Face::rectangle(Point3::origin(), Vector3::x(), Vector3::y());
        let wet = FaceCutter::default().cut(&face, &sweep.surface(), Side::Positive);
        assert!((wet.mag_area() - 0.25).abs() < 1e-14);
        assert!(wet.points().iter().all(|p| p.x <= 0.25 + 1e-14));
    }
}
