//! Monitor state and emitted events

use serde::{Deserialize, Serialize};

/// Debouncer state, owned by one monitor instance per tracked subject.
///
/// Invariant: `alarm_active` implies `consecutive_low_frames` reached the
/// configured frame count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrowsinessState {
    /// Consecutive frames whose EAR was below threshold
    pub consecutive_low_frames: u32,

    /// Whether the debounced alarm condition currently holds
    pub alarm_active: bool,
}

/// Event emitted for each observed frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MonitorEvent {
    /// Eyes open, no alarm
    Idle,

    /// Eyes below threshold but not yet long enough to alarm; carries the
    /// current consecutive-low count
    LowFrame(u32),

    /// Debounce satisfied this frame, alarm transitioned on
    AlarmRaised,

    /// Alarm already on and eyes still below threshold
    AlarmContinuing,

    /// Eyes recovered above threshold, alarm transitioned off
    AlarmCleared,
}

impl MonitorEvent {
    /// Whether this event is an alarm-activation edge
    pub fn is_raise_edge(&self) -> bool {
        matches!(self, MonitorEvent::AlarmRaised)
    }
}
