//! Actuator command encoding

use serde::{Deserialize, Serialize};

/// Wire code for "stop vibrating"
pub const STOP_CODE: u8 = 0;

/// Wire code for "start vibrating"
pub const VIBRATE_CODE: u8 = 1;

/// Single-byte actuator command, written on every frame tick rather than
/// only on alarm transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlarmCommand {
    Stop,
    Vibrate,
}

impl AlarmCommand {
    /// Map the debounced alarm state to its command
    pub fn from_alarm(alarm_active: bool) -> Self {
        if alarm_active {
            AlarmCommand::Vibrate
        } else {
            AlarmCommand::Stop
        }
    }

    /// Encode to the wire byte expected by the firmware
    pub fn as_byte(&self) -> u8 {
        match self {
            AlarmCommand::Stop => STOP_CODE,
            AlarmCommand::Vibrate => VIBRATE_CODE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_matches_firmware_codes() {
        assert_eq!(AlarmCommand::Stop.as_byte(), 0);
        assert_eq!(AlarmCommand::Vibrate.as_byte(), 1);
    }

    #[test]
    fn command_follows_alarm_state() {
        assert_eq!(AlarmCommand::from_alarm(true), AlarmCommand::Vibrate);
        assert_eq!(AlarmCommand::from_alarm(false), AlarmCommand::Stop);
    }
}
