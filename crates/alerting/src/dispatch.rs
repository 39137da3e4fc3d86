//! Supervised side-effect dispatch for alarm and assistance alerts

use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Failures inside a background alert side effect. Logged, never
/// propagated to the frame loop or the state machines.
#[derive(Debug, Clone, Error)]
pub enum SideEffectError {
    #[error("audio playback failed: {0}")]
    Audio(String),

    #[error("assistance announcement failed: {0}")]
    Assistance(String),
}

/// Plays a named sound asset. Implementations may block; they run on the
/// blocking pool.
pub trait AudioBackend: Send + Sync {
    fn play(&self, asset: &str) -> Result<(), SideEffectError>;
}

/// Announces the assistance warning (e.g. nearest rest stop). May block.
pub trait AssistanceBackend: Send + Sync {
    fn announce(&self) -> Result<(), SideEffectError>;
}

/// Logging placeholder audio backend for deployments without an audio
/// device attached.
pub struct LogAudioBackend;

impl AudioBackend for LogAudioBackend {
    fn play(&self, asset: &str) -> Result<(), SideEffectError> {
        info!(asset, "would play alarm sound");
        Ok(())
    }
}

/// Logging placeholder assistance backend.
pub struct LogAssistanceBackend;

impl AssistanceBackend for LogAssistanceBackend {
    fn announce(&self) -> Result<(), SideEffectError> {
        info!("would announce assistance warning");
        Ok(())
    }
}

/// Bridges alarm transitions to the two side-effecting collaborators.
///
/// Each alert kind is tracked by its own supervised join handle, so an
/// alarm sound still in flight never blocks (or is blocked by) the
/// assistance announcement. A new dispatch while the previous one is still
/// running is skipped, not queued: alerts are time-sensitive, not
/// delivery-guaranteed.
pub struct AlertDispatcher {
    audio: Arc<dyn AudioBackend>,
    assistance: Arc<dyn AssistanceBackend>,
    alarm_asset: String,
    alarm_task: Option<JoinHandle<()>>,
    assistance_task: Option<JoinHandle<()>>,
}

impl AlertDispatcher {
    pub fn new(
        audio: Arc<dyn AudioBackend>,
        assistance: Arc<dyn AssistanceBackend>,
        alarm_asset: impl Into<String>,
    ) -> Self {
        Self {
            audio,
            assistance,
            alarm_asset: alarm_asset.into(),
            alarm_task: None,
            assistance_task: None,
        }
    }

    /// Start alarm-sound playback in the background. Returns `false` if a
    /// previous playback is still in flight and this one was skipped.
    pub fn dispatch_alarm(&mut self) -> bool {
        if Self::in_flight(&self.alarm_task) {
            debug!("alarm playback already in flight, skipping");
            return false;
        }

        let audio = Arc::clone(&self.audio);
        let asset = self.alarm_asset.clone();
        self.alarm_task = Some(tokio::task::spawn_blocking(move || {
            if let Err(e) = audio.play(&asset) {
                warn!(error = %e, "alarm playback failed");
            }
        }));
        true
    }

    /// Start the assistance announcement in the background, independently
    /// of any alarm playback. Returns `false` if skipped.
    pub fn dispatch_assistance(&mut self) -> bool {
        if Self::in_flight(&self.assistance_task) {
            debug!("assistance announcement already in flight, skipping");
            return false;
        }

        let assistance = Arc::clone(&self.assistance);
        self.assistance_task = Some(tokio::task::spawn_blocking(move || {
            if let Err(e) = assistance.announce() {
                warn!(error = %e, "assistance announcement failed");
            }
        }));
        true
    }

    /// Wait for any outstanding side effects to finish. In-flight playback
    /// is never cancelled; this only drains on shutdown.
    pub async fn shutdown(&mut self) {
        if let Some(task) = self.alarm_task.take() {
            let _ = task.await;
        }
        if let Some(task) = self.assistance_task.take() {
            let _ = task.await;
        }
    }

    fn in_flight(task: &Option<JoinHandle<()>>) -> bool {
        task.as_ref().is_some_and(|t| !t.is_finished())
    }
}
