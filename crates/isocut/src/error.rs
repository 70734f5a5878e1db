//! Errors raised while binding mesh and field data.
//!
//! Geometric degeneracies inside the kernels are never errors; they degrade
//! to deterministic fallbacks. Only inconsistent input data is reported here.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    #[error("face {face} references point {point}, but the mesh has {n_points} points")]
    PointOutOfRange {
        face: usize,
        point: usize,
        n_points: usize,
    },
    #[error("face {face} has {count} vertices, at least 3 are required")]
    TooFewVertices { face: usize, count: usize },
    #[error("face {face} references cell {cell}, but the mesh has {n_cells} cells")]
    CellOutOfRange {
        face: usize,
        cell: usize,
        n_cells: usize,
    },
    #[error("face index {face} out of range for {n_faces} faces")]
    FaceOutOfRange { face: usize, n_faces: usize },
    #[error("{field} has {found} entries, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },
}
