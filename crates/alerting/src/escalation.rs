//! Escalation policy: windowed warning counter with a once-only latch

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Escalation configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscalationConfig {
    /// Alarm activations within one period required before escalating
    pub max_warnings: u32,

    /// Period length in frame ticks; counters reset on rollover
    pub period_frames: u64,

    /// Re-arm the escalation latch when the period rolls over. Off by
    /// default: the latch then persists for the process lifetime, matching
    /// the reference behavior.
    pub rearm_on_rollover: bool,
}

impl Default for EscalationConfig {
    fn default() -> Self {
        Self {
            max_warnings: 3,
            period_frames: 30_000,
            rearm_on_rollover: false,
        }
    }
}

/// Escalation state, independent of the drowsiness debouncer's state.
///
/// Invariant: `warning_already_issued` is only ever set at a moment when
/// `warnings_in_period` has reached `max_warnings`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscalationState {
    /// Alarm-activation edges observed since the last period reset
    pub warnings_in_period: u32,

    /// Frame ticks observed since the last period reset
    pub period_elapsed_frames: u64,

    /// Latch: set once the assistance warning has fired
    pub warning_already_issued: bool,
}

/// Rate-limits the secondary "seek assistance" warning: it fires when the
/// configured number of alarm activations lands inside one rolling period,
/// and the latch keeps it from re-firing until (optionally) re-armed.
#[derive(Debug, Clone)]
pub struct EscalationPolicy {
    config: EscalationConfig,
    state: EscalationState,
}

impl EscalationPolicy {
    pub fn new(config: EscalationConfig) -> Self {
        Self {
            config,
            state: EscalationState::default(),
        }
    }

    /// Advance the period clock by one frame. Called every frame tick,
    /// alarmed or not. On rollover the warning counter resets; the latch
    /// survives unless `rearm_on_rollover` is set.
    pub fn tick(&mut self) {
        self.state.period_elapsed_frames += 1;
        if self.state.period_elapsed_frames >= self.config.period_frames {
            debug!(
                warnings = self.state.warnings_in_period,
                "escalation period rolled over"
            );
            self.state.period_elapsed_frames = 0;
            self.state.warnings_in_period = 0;
            if self.config.rearm_on_rollover {
                self.state.warning_already_issued = false;
            }
        }
    }

    /// Record an alarm-activation edge. Returns `true` exactly when the
    /// assistance warning should fire: the warning count reached the
    /// threshold and the latch was clear.
    pub fn register_alarm(&mut self) -> bool {
        self.state.warnings_in_period += 1;

        if self.state.warnings_in_period >= self.config.max_warnings
            && !self.state.warning_already_issued
        {
            self.state.warning_already_issued = true;
            info!(
                warnings = self.state.warnings_in_period,
                "escalating to assistance warning"
            );
            return true;
        }

        debug!(
            warnings = self.state.warnings_in_period,
            latched = self.state.warning_already_issued,
            "alarm registered, no escalation"
        );
        false
    }

    pub fn state(&self) -> &EscalationState {
        &self.state
    }

    pub fn config(&self) -> &EscalationConfig {
        &self.config
    }
}
