//! Observers for cut results.
//!
//! Observers receive every sub-face produced by a cutting pass, so diagnostic
//! output (polygon export, statistics, visualization) stays out of the kernels.

use crate::SubFace;

/// Receives the sub-face computed for a mesh face.
///
/// Implement this trait to export or inspect cut polygons, e.g.:
/// - Writing interface polygons to a visualization file
/// - Counting cut faces per step
/// - Checking area bounds in tests
pub trait CutObserver {
    /// Called once per cut face with the face index and its result.
    fn visit(&mut self, face: usize, sub_face: &SubFace);
}

/// An observer that collects every cut face.
#[derive(Debug, Default)]
pub struct CollectingObserver {
    collected: Vec<(usize, SubFace)>,
}

impl CollectingObserver {
    /// Creates a new empty collecting observer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the collected face indices and sub-faces.
    pub fn into_sub_faces(self) -> Vec<(usize, SubFace)> {
        self.collected
    }

    /// Returns a reference to the collected faces.
    pub fn sub_faces(&self) -> &[(usize, SubFace)] {
        &self.collected
    }
}

impl CutObserver for CollectingObserver {
    fn visit(&mut self, face: usize, sub_face: &SubFace) {
        self.collected.push((face, sub_face.clone()));
    }
}

/// An observer that calls a closure for each cut face.
pub struct FnObserver<F>
where
    F: FnMut(usize, &SubFace),
{
    func: F,
}

impl<F> FnObserver<F>
where
    F: FnMut(usize, &SubFace),
{
    /// Creates a new observer from a closure.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> CutObserver for FnObserver<F>
where
    F: FnMut(usize, &SubFace),
{
    fn visit(&mut self, face: usize, sub_face: &SubFace) {
        (self.func)(face, sub_face);
    }
}
