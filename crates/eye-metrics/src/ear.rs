//! Aspect ratio computation

use crate::landmarks::EyeLandmarks;
use crate::GeometryError;

/// Number of contour points per eye
pub const EYE_LANDMARK_COUNT: usize = 6;

/// Compute the eye aspect ratio from six ordered contour points.
///
/// Vertical extent is averaged over the two landmark pairs (p1/p5, p2/p4)
/// and normalized by the horizontal corner distance (p0/p3). Low values
/// indicate a closing or closed eye.
pub(crate) fn eye_aspect_ratio(eye: &EyeLandmarks) -> Result<f32, GeometryError> {
    let p = eye.points();

    let vertical_a = p[1].distance(&p[5]);
    let vertical_b = p[2].distance(&p[4]);
    let horizontal = p[0].distance(&p[3]);

    if horizontal == 0.0 {
        return Err(GeometryError::DegenerateAxis);
    }

    Ok((vertical_a + vertical_b) / (2.0 * horizontal))
}
