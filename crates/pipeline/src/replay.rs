//! JSONL landmark replay source
//!
//! One JSON record per line, `left`/`right` holding the six `[x, y]`
//! contour points per eye. A record missing either eye is a frame where
//! no usable face was detected.

use eye_metrics::{EyeLandmarks, GeometryError, LandmarkFrame, Point2};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

/// Replay file errors
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read replay file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed replay record at line {line}: {source}")]
    Parse {
        line: usize,
        source: serde_json::Error,
    },
}

/// One recorded frame
#[derive(Debug, Clone, Deserialize)]
pub struct ReplayRecord {
    #[serde(default)]
    pub left: Option<Vec<[f32; 2]>>,
    #[serde(default)]
    pub right: Option<Vec<[f32; 2]>>,
}

impl ReplayRecord {
    /// Convert to a landmark frame; `None` when no face was recorded.
    pub fn frame(&self) -> Result<Option<LandmarkFrame>, GeometryError> {
        let (Some(left), Some(right)) = (&self.left, &self.right) else {
            return Ok(None);
        };
        let left = eye_from_raw(left)?;
        let right = eye_from_raw(right)?;
        Ok(Some(LandmarkFrame::new(left, right)))
    }
}

fn eye_from_raw(raw: &[[f32; 2]]) -> Result<EyeLandmarks, GeometryError> {
    let points: Vec<Point2> = raw.iter().map(|&p| Point2::from(p)).collect();
    EyeLandmarks::from_points(&points)
}

/// Load every record from a JSONL file, blank lines skipped.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<ReplayRecord>, ReplayError> {
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: ReplayRecord =
            serde_json::from_str(&line).map_err(|source| ReplayError::Parse {
                line: idx + 1,
                source,
            })?;
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIX_POINTS: &str =
        "[[0,0],[1,1],[3,1],[4,0],[3,-1],[1,-1]]";

    #[test]
    fn record_with_both_eyes_yields_frame() {
        let json = format!("{{\"left\": {SIX_POINTS}, \"right\": {SIX_POINTS}}}");
        let record: ReplayRecord = serde_json::from_str(&json).unwrap();
        let frame = record.frame().unwrap().unwrap();
        assert!((frame.mean_ear().unwrap() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn record_without_face_yields_none() {
        let record: ReplayRecord = serde_json::from_str("{}").unwrap();
        assert!(record.frame().unwrap().is_none());

        let json = format!("{{\"left\": {SIX_POINTS}}}");
        let record: ReplayRecord = serde_json::from_str(&json).unwrap();
        assert!(record.frame().unwrap().is_none());
    }

    #[test]
    fn record_with_short_landmark_list_is_rejected() {
        let json = "{\"left\": [[0,0],[1,1]], \"right\": [[0,0],[1,1]]}";
        let record: ReplayRecord = serde_json::from_str(json).unwrap();
        assert!(record.frame().is_err());
    }
}
