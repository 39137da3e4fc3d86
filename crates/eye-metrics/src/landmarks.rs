//! Eye landmark types

use crate::ear::EYE_LANDMARK_COUNT;
use crate::GeometryError;
use serde::{Deserialize, Serialize};

/// A 2D point in frame coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point2) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

impl From<[f32; 2]> for Point2 {
    fn from(p: [f32; 2]) -> Self {
        Self { x: p[0], y: p[1] }
    }
}

/// Six ordered contour points for one eye (standard p0..p5 ordering:
/// p0/p3 are the horizontal corners, p1/p5 and p2/p4 the vertical pairs).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EyeLandmarks {
    points: [Point2; EYE_LANDMARK_COUNT],
}

impl EyeLandmarks {
    /// Build from a slice, rejecting any count other than six.
    pub fn from_points(points: &[Point2]) -> Result<Self, GeometryError> {
        let points: [Point2; EYE_LANDMARK_COUNT] =
            points
                .try_into()
                .map_err(|_| GeometryError::InvalidLandmarkSet {
                    expected: EYE_LANDMARK_COUNT,
                    actual: points.len(),
                })?;
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point2; EYE_LANDMARK_COUNT] {
        &self.points
    }

    /// Eye aspect ratio: `(|p1-p5| + |p2-p4|) / (2 * |p0-p3|)`.
    ///
    /// A zero-length horizontal axis is reported as a typed error rather
    /// than propagating infinity downstream.
    pub fn aspect_ratio(&self) -> Result<f32, GeometryError> {
        crate::ear::eye_aspect_ratio(self)
    }
}

/// Per-frame landmark input: one landmark set per eye.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandmarkFrame {
    pub left: EyeLandmarks,
    pub right: EyeLandmarks,
}

impl LandmarkFrame {
    pub fn new(left: EyeLandmarks, right: EyeLandmarks) -> Self {
        Self { left, right }
    }

    /// Mean of the two eyes' aspect ratios, the per-frame signal fed to
    /// the drowsiness monitor.
    pub fn mean_ear(&self) -> Result<f32, GeometryError> {
        let left = self.left.aspect_ratio()?;
        let right = self.right.aspect_ratio()?;
        Ok((left + right) / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_points_rejects_wrong_count() {
        let points = vec![Point2::new(0.0, 0.0); 5];
        let err = EyeLandmarks::from_points(&points).unwrap_err();
        assert_eq!(
            err,
            GeometryError::InvalidLandmarkSet {
                expected: 6,
                actual: 5
            }
        );

        let points = vec![Point2::new(0.0, 0.0); 7];
        assert!(EyeLandmarks::from_points(&points).is_err());
    }

    #[test]
    fn from_points_accepts_six() {
        let points: Vec<Point2> = (0..6).map(|i| Point2::new(i as f32, 0.0)).collect();
        assert!(EyeLandmarks::from_points(&points).is_ok());
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < f32::EPSILON);
    }
}
