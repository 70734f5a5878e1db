//! Exact face cutting and swept-area time integration for geometric
//! volume-of-fluid advection.
//!
//! A face is cut by a plane or by the iso-line of a per-vertex scalar field
//! ([`FaceCutter`]); the wet area swept across a face by a moving interface is
//! integrated over a timestep in closed form ([`TimeIntegrator`]). The
//! [`mesh`] module binds both to a polyhedral mesh by face index.

mod classify;
mod config;
mod cutter;
mod error;
mod face;
mod integrate;
pub mod mesh;
mod observer;
mod plane;
mod polygon;
mod surface;

pub use classify::{classify, classify_values, FaceStatus, PointClassification, StatusBuf};
pub use config::{CutConfig, SNAP_TOLERANCE, TIME_MERGE_TOLERANCE};
pub use cutter::{FaceCutter, Side, SubFace};
pub use error::MeshError;
pub use face::Face;
pub use integrate::{quad_area_coeffs, QuadAreaCoeffs, TimeIntegrator};
pub use mesh::{FaceAdvector, MeshTopology, PolyMesh};
pub use observer::{CollectingObserver, CutObserver, FnObserver};
pub use plane::Plane;
pub use polygon::{
    polygon_area, polygon_centre_and_area, vertex_average, PolygonPoints, POLYGON_INLINE_CAPACITY,
};
pub use surface::{AnalyticSurface, CuttingSurface};
