//! Actuator link error types

use thiserror::Error;

/// Errors on the actuator serial link. None of these are fatal to the
/// frame loop; the caller logs and keeps evaluating.
#[derive(Debug, Error)]
pub enum ActuatorError {
    /// Serial port open/write error
    #[error("serial link error: {0}")]
    Serial(String),

    /// Bounded write timed out, link presumed stalled
    #[error("timed out writing actuator command after {0}ms")]
    Timeout(u64),

    /// Firmware never signaled readiness
    #[error("actuator did not signal readiness")]
    NotReady,

    /// Command issued before the link was opened
    #[error("actuator link not connected")]
    NotConnected,
}

impl From<std::io::Error> for ActuatorError {
    fn from(err: std::io::Error) -> Self {
        ActuatorError::Serial(err.to_string())
    }
}

impl From<tokio_serial::Error> for ActuatorError {
    fn from(err: tokio_serial::Error) -> Self {
        ActuatorError::Serial(err.to_string())
    }
}
