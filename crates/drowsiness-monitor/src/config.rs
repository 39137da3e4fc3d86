//! Monitor configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Drowsiness monitor configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// EAR below this value counts as a closed-eye frame
    pub ear_threshold: f32,

    /// Consecutive closed-eye frames required before the alarm raises
    pub consec_frames: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            ear_threshold: 0.28,
            consec_frames: 30,
        }
    }
}

impl MonitorConfig {
    /// Strict config: alarms on shorter closures
    pub fn strict() -> Self {
        Self {
            consec_frames: 15,
            ..Default::default()
        }
    }

    /// Lenient config: tolerates longer closures before alarming
    pub fn lenient() -> Self {
        Self {
            consec_frames: 60,
            ..Default::default()
        }
    }

    /// Derive the frame debounce from a wall-clock closure duration at a
    /// stated frame rate. The contract stays frame-count based; this is an
    /// explicit conversion, not a runtime behavior switch.
    pub fn with_closure_duration(duration: Duration, fps: f32) -> Self {
        let frames = (duration.as_secs_f32() * fps).round().max(1.0) as u32;
        Self {
            consec_frames: frames,
            ..Default::default()
        }
    }
}
