//! Mesh binding: by-face-index cutting and flux integration.
//!
//! The kernels in this crate work on single faces. [`MeshTopology`] is the
//! seam to the mesh that owns them, [`PolyMesh`] is a small in-memory
//! implementation, and [`FaceAdvector`] ties a mesh and a cell volume-fraction
//! field to the kernels.

use nalgebra::{Point3, Vector3};

use crate::polygon::{polygon_centre_and_area, PolygonPoints};
use crate::{
    CutConfig, CutObserver, CuttingSurface, Face, FaceCutter, MeshError, Side, SubFace,
    TimeIntegrator,
};

/// Read access to the topology and geometry of a polyhedral mesh.
pub trait MeshTopology {
    /// Mesh point coordinates.
    fn points(&self) -> &[Point3<f64>];

    /// Number of faces.
    fn n_faces(&self) -> usize;

    /// Number of cells.
    fn n_cells(&self) -> usize;

    /// Point indices of a face, in ring order.
    fn face_vertices(&self, face: usize) -> &[usize];

    /// Cell owning a face.
    fn face_owner(&self, face: usize) -> usize;

    /// Cell on the other side of a face, `None` on the boundary.
    fn face_neighbour(&self, face: usize) -> Option<usize>;

    /// Face centre.
    fn face_centre(&self, face: usize) -> Point3<f64>;

    /// Face area vector, pointing from owner to neighbour.
    fn face_area(&self, face: usize) -> Vector3<f64>;

    /// Cell volume.
    fn cell_volume(&self, cell: usize) -> f64;

    /// Number of points.
    fn n_points(&self) -> usize {
        self.points().len()
    }

    /// Coordinates of a face's vertices, in ring order.
    fn face_points(&self, face: usize) -> PolygonPoints {
        let points = self.points();
        self.face_vertices(face).iter().map(|&p| points[p]).collect()
    }

    /// Builds the [`Face`] value for a face index.
    fn face(&self, face: usize) -> Face {
        Face::new(self.face_points(face))
            .with_cells(self.face_owner(face), self.face_neighbour(face))
            .with_geometry(self.face_centre(face), self.face_area(face))
    }
}

/// An in-memory polyhedral mesh.
#[derive(Debug, Clone)]
pub struct PolyMesh {
    points: Vec<Point3<f64>>,
    faces: Vec<Vec<usize>>,
    owner: Vec<usize>,
    neighbour: Vec<Option<usize>>,
    cell_volumes: Vec<f64>,
    face_centres: Vec<Point3<f64>>,
    face_areas: Vec<Vector3<f64>>,
}

impl PolyMesh {
    /// Creates a mesh, validating the face and cell references.
    pub fn new(
        points: Vec<Point3<f64>>,
        faces: Vec<Vec<usize>>,
        owner: Vec<usize>,
        neighbour: Vec<Option<usize>>,
        cell_volumes: Vec<f64>,
    ) -> Result<Self, MeshError> {
        check_len("owner", faces.len(), owner.len())?;
        check_len("neighbour", faces.len(), neighbour.len())?;

        let n_points = points.len();
        let n_cells = cell_volumes.len();
        for (face, vertices) in faces.iter().enumerate() {
            if vertices.len() < 3 {
                return Err(MeshError::TooFewVertices {
                    face,
                    count: vertices.len(),
                });
            }
            if let Some(&point) = vertices.iter().find(|&&p| p >= n_points) {
                return Err(MeshError::PointOutOfRange {
                    face,
                    point,
                    n_points,
                });
            }
            for cell in std::iter::once(owner[face]).chain(neighbour[face]) {
                if cell >= n_cells {
                    return Err(MeshError::CellOutOfRange {
                        face,
                        cell,
                        n_cells,
                    });
                }
            }
        }

        let (face_centres, face_areas) = faces
            .iter()
            .map(|f| {
                let pts: PolygonPoints = f.iter().map(|&p| points[p]).collect();
                polygon_centre_and_area(&pts)
            })
            .unzip();

        tracing::debug!(
            points = n_points,
            faces = faces.len(),
            cells = n_cells,
            "mesh assembled"
        );

        Ok(Self {
            points,
            faces,
            owner,
            neighbour,
            cell_volumes,
            face_centres,
            face_areas,
        })
    }

    /// Builds a block of `n[0] x n[1] x n[2]` hexahedral cells of size
    /// `spacing`, with its minimum corner at `origin`.
    ///
    /// Internal faces point from the lower to the higher cell index; boundary
    /// faces point out of the block.
    pub fn cartesian(
        n: [usize; 3],
        origin: Point3<f64>,
        spacing: Vector3<f64>,
    ) -> Result<Self, MeshError> {
        let [nx, ny, nz] = n;
        let point_id = |i: usize, j: usize, k: usize| i + (nx + 1) * (j + (ny + 1) * k);
        let cell_id = |i: usize, j: usize, k: usize| i + nx * (j + ny * k);

        let mut points = Vec::with_capacity((nx + 1) * (ny + 1) * (nz + 1));
        for k in 0..=nz {
            for j in 0..=ny {
                for i in 0..=nx {
                    points.push(
                        origin
                            + Vector3::new(
                                i as f64 * spacing.x,
                                j as f64 * spacing.y,
                                k as f64 * spacing.z,
                            ),
                    );
                }
            }
        }

        let mut faces = Vec::new();
        let mut owner = Vec::new();
        let mut neighbour = Vec::new();
        let mut push_face = |mut ring: Vec<usize>, lower: Option<usize>, upper: Option<usize>| {
            match (lower, upper) {
                (Some(lo), hi) => {
                    owner.push(lo);
                    neighbour.push(hi);
                }
                (None, Some(hi)) => {
                    // Boundary face at the low end: orient it out of the block.
                    ring.reverse();
                    owner.push(hi);
                    neighbour.push(None);
                }
                (None, None) => return,
            }
            faces.push(ring);
        };

        // Faces normal to x, y and z, each ring wound so its area vector
        // points along the positive axis.
        for k in 0..nz {
            for j in 0..ny {
                for i in 0..=nx {
                    let ring = vec![
                        point_id(i, j, k),
                        point_id(i, j + 1, k),
                        point_id(i, j + 1, k + 1),
                        point_id(i, j, k + 1),
                    ];
                    let lower = (i > 0).then(|| cell_id(i - 1, j, k));
                    let upper = (i < nx).then(|| cell_id(i, j, k));
                    push_face(ring, lower, upper);
                }
            }
        }
        for k in 0..nz {
            for j in 0..=ny {
                for i in 0..nx {
                    let ring = vec![
                        point_id(i, j, k),
                        point_id(i, j, k + 1),
                        point_id(i + 1, j, k + 1),
                        point_id(i + 1, j, k),
                    ];
                    let lower = (j > 0).then(|| cell_id(i, j - 1, k));
                    let upper = (j < ny).then(|| cell_id(i, j, k));
                    push_face(ring, lower, upper);
                }
            }
        }
        for k in 0..=nz {
            for j in 0..ny {
                for i in 0..nx {
                    let ring = vec![
                        point_id(i, j, k),
                        point_id(i + 1, j, k),
                        point_id(i + 1, j + 1, k),
                        point_id(i, j + 1, k),
                    ];
                    let lower = (k > 0).then(|| cell_id(i, j, k - 1));
                    let upper = (k < nz).then(|| cell_id(i, j, k));
                    push_face(ring, lower, upper);
                }
            }
        }

        let volume = spacing.x * spacing.y * spacing.z;
        let cell_volumes = vec![volume; nx * ny * nz];
        Self::new(points, faces, owner, neighbour, cell_volumes)
    }

    /// Returns the indices of the faces of a cell.
    pub fn cell_faces(&self, cell: usize) -> Vec<usize> {
        (0..self.faces.len())
            .filter(|&f| self.owner[f] == cell || self.neighbour[f] == Some(cell))
            .collect()
    }
}

fn check_len(field: &'static str, expected: usize, found: usize) -> Result<(), MeshError> {
    if expected == found {
        Ok(())
    } else {
        Err(MeshError::LengthMismatch {
            field,
            expected,
            found,
        })
    }
}

impl MeshTopology for PolyMesh {
    fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    fn n_faces(&self) -> usize {
        self.faces.len()
    }

    fn n_cells(&self) -> usize {
        self.cell_volumes.len()
    }

    fn face_vertices(&self, face: usize) -> &[usize] {
        &self.faces[face]
    }

    fn face_owner(&self, face: usize) -> usize {
        self.owner[face]
    }

    fn face_neighbour(&self, face: usize) -> Option<usize> {
        self.neighbour[face]
    }

    fn face_centre(&self, face: usize) -> Point3<f64> {
        self.face_centres[face]
    }

    fn face_area(&self, face: usize) -> Vector3<f64> {
        self.face_areas[face]
    }

    fn cell_volume(&self, cell: usize) -> f64 {
        self.cell_volumes[cell]
    }
}

/// Answers cutting and flux queries by face index on a mesh carrying a cell
/// volume-fraction field.
///
/// Holds shared references only; one advector can serve a parallel loop over
/// faces.
#[derive(Debug)]
pub struct FaceAdvector<'a, M: MeshTopology> {
    mesh: &'a M,
    alpha: &'a [f64],
    integrator: TimeIntegrator,
}

impl<'a, M: MeshTopology> FaceAdvector<'a, M> {
    /// Binds a mesh and its cell volume-fraction field.
    pub fn new(mesh: &'a M, alpha: &'a [f64], config: CutConfig) -> Result<Self, MeshError> {
        check_len("alpha", mesh.n_cells(), alpha.len())?;
        Ok(Self {
            mesh,
            alpha,
            integrator: TimeIntegrator::new(config),
        })
    }

    /// Returns the bound mesh.
    #[inline]
    pub fn mesh(&self) -> &'a M {
        self.mesh
    }

    /// Returns the face cutter.
    #[inline]
    pub fn cutter(&self) -> &FaceCutter {
        self.integrator.cutter()
    }

    /// Returns the time integrator.
    #[inline]
    pub fn integrator(&self) -> &TimeIntegrator {
        &self.integrator
    }

    /// Builds the [`Face`] for a face index.
    pub fn face(&self, face: usize) -> Result<Face, MeshError> {
        let n_faces = self.mesh.n_faces();
        if face >= n_faces {
            return Err(MeshError::FaceOutOfRange { face, n_faces });
        }
        Ok(self.mesh.face(face))
    }

    /// Cuts a face by a plane or a face-local field.
    pub fn cut_face(
        &self,
        face: usize,
        surface: &CuttingSurface<'_>,
        side: Side,
    ) -> Result<SubFace, MeshError> {
        Ok(self.cutter().cut(&self.face(face)?, surface, side))
    }

    /// Cuts a face by the iso-surface `point_values == cut_value` of a field
    /// defined on all mesh points.
    pub fn cut_face_by_point_field(
        &self,
        face: usize,
        point_values: &[f64],
        cut_value: f64,
        side: Side,
    ) -> Result<SubFace, MeshError> {
        check_len("point field", self.mesh.n_points(), point_values.len())?;
        let f = self.face(face)?;
        let values: Vec<f64> = self
            .mesh
            .face_vertices(face)
            .iter()
            .map(|&p| point_values[p])
            .collect();
        Ok(self
            .cutter()
            .cut(&f, &CuttingSurface::field(&values, cut_value), side))
    }

    /// Cuts every face in `faces` and reports each result to `observer`.
    pub fn cut_faces<O: CutObserver>(
        &self,
        faces: impl IntoIterator<Item = usize>,
        surface: &CuttingSurface<'_>,
        side: Side,
        observer: &mut O,
    ) -> Result<(), MeshError> {
        for face in faces {
            let sub = self.cut_face(face, surface, side)?;
            observer.visit(face, &sub);
        }
        Ok(())
    }

    /// Time-integrated flux through a face for an interface plane through
    /// `x0` moving with speed `un0` along `n0`.
    ///
    /// When `n0` is too short to define an interface, the flux falls back to
    /// upwinding the volume fraction of the donor cell, limited by the fluid
    /// the donor holds.
    #[allow(clippy::too_many_arguments)]
    pub fn time_integrated_flux_plane(
        &self,
        face: usize,
        x0: &Point3<f64>,
        n0: &Vector3<f64>,
        un0: f64,
        dt: f64,
        phi: f64,
        mag_sf: f64,
    ) -> Result<f64, MeshError> {
        let f = self.face(face)?;
        if n0.norm() < self.integrator.cutter().config().min_normal_magnitude {
            let donor = match f.neighbour() {
                Some(n) if phi <= 0.0 => n,
                _ => f.owner(),
            };
            let alpha_f = self.alpha[donor];
            let available = alpha_f * self.mesh.cell_volume(donor);
            tracing::debug!(face, donor, alpha_f, "undefined interface normal, upwind flux");
            return Ok((alpha_f * phi * dt).min(available));
        }
        Ok(self
            .integrator
            .time_integrated_flux_plane(&f, x0, n0, un0, dt, phi, mag_sf))
    }

    /// Time-integrated flux through a face given per-vertex arrival times.
    pub fn time_integrated_flux(
        &self,
        face: usize,
        times: &[f64],
        un0: f64,
        dt: f64,
        phi: f64,
        mag_sf: f64,
    ) -> Result<f64, MeshError> {
        let f = self.face(face)?;
        check_len("arrival times", f.len(), times.len())?;
        Ok(self
            .integrator
            .time_integrated_flux(&f, times, un0, dt, phi, mag_sf))
    }

    /// Time-integrated wet area of a face given per-vertex arrival times.
    pub fn time_integrated_area(
        &self,
        face: usize,
        times: &[f64],
        dt: f64,
        mag_sf: f64,
        un0: f64,
    ) -> Result<f64, MeshError> {
        let f = self.face(face)?;
        check_len("arrival times", f.len(), times.len())?;
        Ok(self
            .integrator
            .time_integrated_area(&f, times, dt, mag_sf, un0))
    }
}
