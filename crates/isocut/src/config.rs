//! Numerical tolerances shared by the classifier, the cutter and the integrator.

use serde::{Deserialize, Serialize};

/// Default relative tolerance below which a point status is snapped to zero.
pub const SNAP_TOLERANCE: f64 = 1e-12;

/// Default relative tolerance (fraction of `dt`) for merging arrival times.
pub const TIME_MERGE_TOLERANCE: f64 = 1e-12;

/// Tolerance configuration for face cutting and time integration.
///
/// Loadable from a driver's case file through `serde`; missing fields take
/// their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CutConfig {
    /// A status `s` with `|s| <= snap_tolerance * scale` is snapped to exactly zero,
    /// where `scale` is the magnitude of the operands that produced `s`.
    pub snap_tolerance: f64,
    /// Arrival times closer than `time_merge_tolerance * dt` are treated as one.
    pub time_merge_tolerance: f64,
    /// Interface normals shorter than this are treated as undefined.
    pub min_normal_magnitude: f64,
    /// Interface speeds with magnitude below this are treated as stationary.
    pub min_speed: f64,
}

impl Default for CutConfig {
    fn default() -> Self {
        Self {
            snap_tolerance: SNAP_TOLERANCE,
            time_merge_tolerance: TIME_MERGE_TOLERANCE,
            min_normal_magnitude: 0.5,
            min_speed: 1e-300,
        }
    }
}

impl CutConfig {
    /// Sets the relative snap tolerance.
    pub fn with_snap_tolerance(mut self, tol: f64) -> Self {
        self.snap_tolerance = tol;
        self
    }

    /// Sets the relative arrival-time merge tolerance.
    pub fn with_time_merge_tolerance(mut self, tol: f64) -> Self {
        self.time_merge_tolerance = tol;
        self
    }

    /// Sets the magnitude below which an interface normal is considered undefined.
    pub fn with_min_normal_magnitude(mut self, mag: f64) -> Self {
        self.min_normal_magnitude = mag;
        self
    }

    /// Sets the speed below which an interface is considered stationary.
    pub fn with_min_speed(mut self, speed: f64) -> Self {
        self.min_speed = speed;
        self
    }

    /// Snaps `value` to zero if it is within tolerance of zero for the given
    /// operand `scale`.
    #[inline]
    pub fn snap(&self, value: f64, scale: f64) -> f64 {
        if value.abs() <= self.snap_tolerance * scale {
            0.0
        } else {
            value
        }
    }
}
