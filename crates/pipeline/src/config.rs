//! Pipeline configuration

use alerting::EscalationConfig;
use drowsiness_monitor::MonitorConfig;
use serde::{Deserialize, Serialize};

/// Actuator link settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ActuatorConfig {
    /// Serial device path (e.g. "/dev/ttyUSB0"); `None` selects the mock
    /// link so the pipeline degrades to alarm-sound-only
    pub device: Option<String>,

    /// Serial baud rate
    pub baud_rate: u32,

    /// Bound for a single command write (milliseconds)
    pub write_timeout_ms: u64,
}

impl Default for ActuatorConfig {
    fn default() -> Self {
        Self {
            device: None,
            baud_rate: 9600,
            write_timeout_ms: 250,
        }
    }
}

/// Aggregate configuration for the whole pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub monitor: MonitorConfig,
    pub escalation: EscalationConfig,
    pub actuator: ActuatorConfig,

    /// Named sound asset played on alarm activation
    pub alarm_asset: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            monitor: MonitorConfig::default(),
            escalation: EscalationConfig::default(),
            actuator: ActuatorConfig::default(),
            alarm_asset: "alarm.wav".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Load from an optional TOML file with `VIGIL_*` environment
    /// overrides (e.g. `VIGIL_MONITOR__CONSEC_FRAMES=15`).
    pub fn load(path: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("VIGIL").separator("__"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_constants() {
        let config = PipelineConfig::default();
        assert_eq!(config.monitor.ear_threshold, 0.28);
        assert_eq!(config.monitor.consec_frames, 30);
        assert_eq!(config.escalation.max_warnings, 3);
        assert_eq!(config.escalation.period_frames, 30_000);
        assert!(!config.escalation.rearm_on_rollover);
        assert_eq!(config.actuator.baud_rate, 9600);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = PipelineConfig::load("does-not-exist").unwrap();
        assert_eq!(config.monitor.consec_frames, 30);
        assert!(config.actuator.device.is_none());
    }
}
