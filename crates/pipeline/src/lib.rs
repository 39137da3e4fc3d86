//! Vigilance Pipeline
//!
//! The frame loop driver: for each frame, compute the mean EAR from the
//! eye landmarks, feed the drowsiness monitor, react to the emitted event
//! (alarm sound, escalation, assistance warning), and re-assert the
//! actuator command. One task owns all three state machines; only the
//! alert side effects leave it.

pub mod config;
pub mod replay;

pub use config::{ActuatorConfig, PipelineConfig};

use actuator_link::{ActuatorClient, AlarmCommand};
use alerting::{AlertDispatcher, EscalationPolicy, EscalationState};
use drowsiness_monitor::{DrowsinessMonitor, MonitorEvent};
use eye_metrics::{GeometryError, LandmarkFrame};
use thiserror::Error;
use tracing::{warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Per-frame failures surfaced to the caller. Only input validation for
/// the current frame propagates; actuator and side-effect failures are
/// logged and absorbed.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error(transparent)]
    Landmarks(#[from] GeometryError),
}

/// What one processed frame produced
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Mean EAR over both eyes
    pub ear: f32,

    /// Monitor transition for this frame
    pub event: MonitorEvent,

    /// Whether this frame fired the assistance escalation
    pub escalated: bool,

    /// Whether the actuator command write succeeded
    pub actuator_ok: bool,
}

/// Drives one tracked subject's state machines for the process lifetime.
pub struct VigilancePipeline {
    monitor: DrowsinessMonitor,
    escalation: EscalationPolicy,
    dispatcher: AlertDispatcher,
    actuator: ActuatorClient,
    link_errors: u64,
}

impl VigilancePipeline {
    pub fn new(
        config: &PipelineConfig,
        actuator: ActuatorClient,
        dispatcher: AlertDispatcher,
    ) -> Self {
        Self {
            monitor: DrowsinessMonitor::new(config.monitor),
            escalation: EscalationPolicy::new(config.escalation),
            dispatcher,
            actuator,
            link_errors: 0,
        }
    }

    /// Process one frame's eye landmarks.
    ///
    /// Validation runs before any state mutation: a rejected frame leaves
    /// the monitor, the escalation period, and the actuator untouched.
    pub async fn process_frame(
        &mut self,
        frame: &LandmarkFrame,
    ) -> Result<FrameReport, FrameError> {
        let ear = frame.mean_ear()?;

        self.escalation.tick();
        let event = self.monitor.observe(ear);

        let mut escalated = false;
        if event.is_raise_edge() {
            self.dispatcher.dispatch_alarm();
            if self.escalation.register_alarm() {
                escalated = true;
                self.dispatcher.dispatch_assistance();
            }
        }

        let actuator_ok = self.assert_actuator().await;

        Ok(FrameReport {
            ear,
            event,
            escalated,
            actuator_ok,
        })
    }

    /// A frame with no usable face: the escalation period still advances
    /// and the actuator command is still re-asserted, but the debouncer
    /// sees nothing.
    pub async fn idle_tick(&mut self) -> bool {
        self.escalation.tick();
        self.assert_actuator().await
    }

    /// Drain outstanding alert side effects (on shutdown).
    pub async fn shutdown(&mut self) {
        self.dispatcher.shutdown().await;
    }

    pub fn monitor(&self) -> &DrowsinessMonitor {
        &self.monitor
    }

    pub fn escalation_state(&self) -> &EscalationState {
        self.escalation.state()
    }

    /// Actuator write failures observed so far
    pub fn link_errors(&self) -> u64 {
        self.link_errors
    }

    /// Re-assert the command for the current alarm state. Failures are
    /// logged and counted; the state machines keep running regardless of
    /// actuator health.
    async fn assert_actuator(&mut self) -> bool {
        let command = AlarmCommand::from_alarm(self.monitor.is_alarmed());
        match self.actuator.send(command).await {
            Ok(()) => true,
            Err(e) => {
                self.link_errors += 1;
                warn!(error = %e, ?command, "actuator write failed, continuing without haptics");
                false
            }
        }
    }

    #[cfg(test)]
    fn actuator(&self) -> &ActuatorClient {
        &self.actuator
    }
}

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}
