//! Eye Aspect Ratio (EAR) Computation
//!
//! Pure geometry over already-extracted eye contour landmarks. Upstream
//! face and landmark detection is someone else's problem; this crate only
//! turns six ordered 2D points per eye into a scalar openness measure.

mod ear;
mod landmarks;

pub use ear::EYE_LANDMARK_COUNT;
pub use landmarks::{EyeLandmarks, LandmarkFrame, Point2};

use thiserror::Error;

/// Errors for malformed eye geometry
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Landmark set has the wrong number of points
    #[error("invalid landmark set: expected {expected} points, got {actual}")]
    InvalidLandmarkSet { expected: usize, actual: usize },

    /// Horizontal eye axis has zero length (p0 == p3), ratio is undefined
    #[error("invalid landmark set: degenerate horizontal axis (p0 == p3)")]
    DegenerateAxis,
}
