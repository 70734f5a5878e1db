//! Shared drawing utilities for the face-cutting viewer.

use isocut::{CutObserver, Face, FaceStatus, SubFace};
use macroquad::models::{draw_mesh, Mesh, Vertex};
use macroquad::prelude::*;
use nalgebra::{Point3, Vector3};

pub mod sweep;
pub use sweep::Sweep;

/// Fill colour for a sub-face with the given status.
pub fn status_color(status: FaceStatus) -> Color {
    match status {
        FaceStatus::BelowSurface => Color::from_rgba(40, 110, 220, 255),
        FaceStatus::Cut => Color::from_rgba(70, 170, 240, 255),
        FaceStatus::AboveSurface => Color::from_rgba(60, 60, 70, 255),
    }
}

#[inline]
fn to_vec3(p: &Point3<f64>) -> Vec3 {
    vec3(p.x as f32, p.y as f32, p.z as f32)
}

/// Draws a planar polygon as a triangle fan about its first vertex.
pub fn draw_polygon(points: &[Point3<f64>], color: Color) {
    if points.len() < 3 {
        return;
    }

    let vertices: Vec<Vertex> = points
        .iter()
        .map(|p| Vertex::new2(to_vec3(p), vec2(0.0, 0.0), color))
        .collect();

    let mut indices: Vec<u16> = Vec::with_capacity((points.len() - 2) * 3);
    for i in 1..points.len() - 1 {
        indices.push(0);
        indices.push(i as u16);
        indices.push((i + 1) as u16);
    }

    draw_mesh(&Mesh {
        vertices,
        indices,
        texture: None,
    });
}

/// Draws the closed outline of a polygon.
pub fn draw_outline(points: &[Point3<f64>], color: Color) {
    let n = points.len();
    for i in 0..n {
        draw_line_3d(to_vec3(&points[i]), to_vec3(&points[(i + 1) % n]), color);
    }
}

/// Draws the interface polygon of a cut as an open polyline.
pub fn draw_interface(points: &[Point3<f64>], color: Color) {
    for pair in points.windows(2) {
        draw_line_3d(to_vec3(&pair[0]), to_vec3(&pair[1]), color);
    }
}

/// Observer that draws every sub-face it receives over its parent outline.
pub struct RenderObserver<'a> {
    faces: &'a [Face],
    wet_area: f64,
    cut_faces: usize,
}

impl<'a> RenderObserver<'a> {
    /// Creates an observer for the given parent faces.
    pub fn new(faces: &'a [Face]) -> Self {
        Self {
            faces,
            wet_area: 0.0,
            cut_faces: 0,
        }
    }

    /// Total wet area drawn so far.
    pub fn wet_area(&self) -> f64 {
        self.wet_area
    }

    /// Number of cut faces drawn so far.
    pub fn cut_faces(&self) -> usize {
        self.cut_faces
    }
}

impl CutObserver for RenderObserver<'_> {
    fn visit(&mut self, face: usize, sub_face: &SubFace) {
        if let Some(parent) = self.faces.get(face) {
            draw_outline(parent.points(), GRAY);
        }
        draw_polygon(sub_face.points(), status_color(sub_face.status()));
        draw_interface(sub_face.surface_points(), ORANGE);

        self.wet_area += sub_face.mag_area();
        if sub_face.status().is_cut() {
            self.cut_faces += 1;
        }
    }
}

/// Regular polygon with `n` vertices in the plane `z = 0`.
pub fn regular_face(n: usize, centre: Point3<f64>, radius: f64) -> Face {
    let step = std::f64::consts::TAU / n as f64;
    Face::new((0..n).map(|i| {
        let theta = i as f64 * step;
        centre + Vector3::new(radius * theta.cos(), radius * theta.sin(), 0.0)
    }))
}

/// Simple orbit camera for 3D scene navigation.
pub struct OrbitCamera {
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub target: Vec3,
    /// Multiplier for scroll wheel zoom
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl OrbitCamera {
    pub fn new(distance: f32, yaw: f32, pitch: f32) -> Self {
        Self {
            distance,
            yaw,
            pitch,
            target: vec3(0.0, 0.0, 0.0),
            zoom_speed: 0.5,
            min_distance: 1.0,
            max_distance: 50.0,
        }
    }

    /// Sets the camera target point.
    pub fn with_target(mut self, target: Vec3) -> Self {
        self.target = target;
        self
    }

    /// Updates camera state from mouse drag and scroll.
    pub fn update(&mut self) {
        if is_mouse_button_down(MouseButton::Left) {
            let delta = mouse_delta_position();
            self.yaw -= delta.x * 2.0;
            self.pitch -= delta.y * 2.0;
        }
        self.pitch = self.pitch.clamp(-1.5, 1.5);

        let scroll = mouse_wheel().1;
        self.distance = (self.distance - scroll * self.zoom_speed)
            .clamp(self.min_distance, self.max_distance);
    }

    /// Returns the camera's world position. The scene's `z` axis is up.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.cos() * self.yaw.cos();
        let z = self.distance * self.pitch.sin();
        self.target + vec3(x, y, z)
    }

    /// Converts to macroquad's Camera3D for rendering.
    pub fn to_camera3d(&self) -> Camera3D {
        Camera3D {
            position: self.position(),
            up: vec3(0.0, 0.0, 1.0),
            target: self.target,
            ..Default::default()
        }
    }
}
