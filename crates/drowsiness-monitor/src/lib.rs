//! Drowsiness Monitor
//!
//! Converts a noisy per-frame eye-aspect-ratio signal into discrete alarm
//! transitions using a consecutive-frame debounce:
//! - EAR below threshold accumulates a counter
//! - the counter reaching the configured frame count raises the alarm
//! - any above-threshold frame clears the counter and the alarm

pub mod config;
pub mod monitor;
pub mod state;

pub use config::MonitorConfig;
pub use monitor::DrowsinessMonitor;
pub use state::{DrowsinessState, MonitorEvent};
