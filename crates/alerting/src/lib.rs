//! Alerting System
//!
//! Two concerns around the drowsiness alarm:
//! - escalation: a time-windowed counter that decides when repeated alarms
//!   warrant the stronger "seek assistance" warning, at most once per latch
//! - dispatch: firing the audio and assistance side effects as supervised
//!   background work, never more than one in flight per alert kind

mod dispatch;
mod escalation;

pub use dispatch::{
    AlertDispatcher, AssistanceBackend, AudioBackend, LogAssistanceBackend, LogAudioBackend,
    SideEffectError,
};
pub use escalation::{EscalationConfig, EscalationPolicy, EscalationState};
