//! Debounced drowsiness state machine

use crate::config::MonitorConfig;
use crate::state::{DrowsinessState, MonitorEvent};
use tracing::{debug, info};

/// Debouncer over the per-frame EAR signal.
///
/// Two states: AWAKE (counter accumulating or zero) and ALARMED. Recovery
/// has no hysteresis band: a single frame above threshold clears the
/// counter and the alarm, so the signal is sensitive to noise right at the
/// boundary. Callers needing recovery stability should debounce the
/// cleared edge themselves.
#[derive(Debug, Clone)]
pub struct DrowsinessMonitor {
    config: MonitorConfig,
    state: DrowsinessState,
}

impl DrowsinessMonitor {
    pub fn new(config: MonitorConfig) -> Self {
        Self {
            config,
            state: DrowsinessState::default(),
        }
    }

    /// Feed one frame's EAR value and get the resulting transition event.
    pub fn observe(&mut self, ear: f32) -> MonitorEvent {
        if ear < self.config.ear_threshold {
            self.state.consecutive_low_frames += 1;

            if self.state.alarm_active {
                return MonitorEvent::AlarmContinuing;
            }

            if self.state.consecutive_low_frames >= self.config.consec_frames {
                self.state.alarm_active = true;
                info!(
                    ear,
                    low_frames = self.state.consecutive_low_frames,
                    "drowsiness alarm raised"
                );
                return MonitorEvent::AlarmRaised;
            }

            debug!(
                ear,
                low_frames = self.state.consecutive_low_frames,
                "eyes below threshold"
            );
            MonitorEvent::LowFrame(self.state.consecutive_low_frames)
        } else {
            self.state.consecutive_low_frames = 0;

            if self.state.alarm_active {
                self.state.alarm_active = false;
                info!(ear, "drowsiness alarm cleared");
                MonitorEvent::AlarmCleared
            } else {
                MonitorEvent::Idle
            }
        }
    }

    /// Whether the debounced alarm condition currently holds
    pub fn is_alarmed(&self) -> bool {
        self.state.alarm_active
    }

    pub fn state(&self) -> &DrowsinessState {
        &self.state
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Reset to AWAKE with a zero counter (on subject change)
    pub fn reset(&mut self) {
        self.state = DrowsinessState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn monitor(threshold: f32, consec: u32) -> DrowsinessMonitor {
        DrowsinessMonitor::new(MonitorConfig {
            ear_threshold: threshold,
            consec_frames: consec,
        })
    }

    #[test]
    fn reference_scenario_transition_sequence() {
        let mut m = monitor(0.28, 3);
        let stream = [0.30, 0.20, 0.20, 0.20, 0.31];
        let events: Vec<MonitorEvent> = stream.iter().map(|&e| m.observe(e)).collect();

        assert_eq!(
            events,
            vec![
                MonitorEvent::Idle,
                MonitorEvent::LowFrame(1),
                MonitorEvent::LowFrame(2),
                MonitorEvent::AlarmRaised,
                MonitorEvent::AlarmCleared,
            ]
        );
        assert!(!m.is_alarmed());
        assert_eq!(m.state().consecutive_low_frames, 0);
    }

    #[test]
    fn exactly_one_raise_then_one_clear() {
        let mut m = monitor(0.28, 3);
        let eps = 0.01;

        let mut raised = 0;
        let mut cleared = 0;
        for _ in 0..3 {
            match m.observe(0.28 - eps) {
                MonitorEvent::AlarmRaised => raised += 1,
                MonitorEvent::AlarmCleared => cleared += 1,
                _ => {}
            }
        }
        if let MonitorEvent::AlarmCleared = m.observe(0.28 + eps) {
            cleared += 1;
        }

        assert_eq!(raised, 1);
        assert_eq!(cleared, 1);
    }

    #[test]
    fn alarm_continues_while_eyes_stay_closed() {
        let mut m = monitor(0.28, 2);
        assert_eq!(m.observe(0.1), MonitorEvent::LowFrame(1));
        assert_eq!(m.observe(0.1), MonitorEvent::AlarmRaised);
        assert_eq!(m.observe(0.1), MonitorEvent::AlarmContinuing);
        assert_eq!(m.observe(0.1), MonitorEvent::AlarmContinuing);
        assert!(m.is_alarmed());
    }

    #[test]
    fn single_recovery_frame_clears_without_hysteresis() {
        let mut m = monitor(0.28, 2);
        m.observe(0.1);
        m.observe(0.1);
        assert!(m.is_alarmed());

        // Barely above threshold is still a full recovery.
        assert_eq!(m.observe(0.2800001), MonitorEvent::AlarmCleared);
        assert_eq!(m.state().consecutive_low_frames, 0);

        // Debounce starts over from scratch.
        assert_eq!(m.observe(0.1), MonitorEvent::LowFrame(1));
    }

    #[test]
    fn threshold_is_strict_less_than() {
        let mut m = monitor(0.28, 1);
        // EAR exactly at threshold does not count as closed.
        assert_eq!(m.observe(0.28), MonitorEvent::Idle);
        assert_eq!(m.observe(0.2799), MonitorEvent::AlarmRaised);
    }

    #[test]
    fn reset_returns_to_awake() {
        let mut m = monitor(0.28, 1);
        m.observe(0.1);
        assert!(m.is_alarmed());
        m.reset();
        assert!(!m.is_alarmed());
        assert_eq!(m.state().consecutive_low_frames, 0);
    }

    proptest! {
        /// The counter never exceeds the length of the current run of
        /// below-threshold frames, and resets on every recovery.
        #[test]
        fn counter_tracks_consecutive_low_run(ears in prop::collection::vec(0.0f32..0.6, 1..200)) {
            let mut m = monitor(0.28, 30);
            let mut run = 0u32;
            for ear in ears {
                m.observe(ear);
                if ear < 0.28 {
                    run += 1;
                } else {
                    run = 0;
                }
                prop_assert_eq!(m.state().consecutive_low_frames, run);
            }
        }

        /// Alarm active always implies the counter reached the debounce
        /// threshold.
        #[test]
        fn alarm_implies_counter_at_threshold(ears in prop::collection::vec(0.0f32..0.6, 1..200)) {
            let mut m = monitor(0.28, 5);
            for ear in ears {
                m.observe(ear);
                if m.is_alarmed() {
                    prop_assert!(m.state().consecutive_low_frames >= 5);
                }
            }
        }

        /// Raise and clear edges strictly alternate, starting with a raise.
        #[test]
        fn edges_alternate(ears in prop::collection::vec(0.0f32..0.6, 1..300)) {
            let mut m = monitor(0.28, 3);
            let mut last_was_raise = false;
            for ear in ears {
                match m.observe(ear) {
                    MonitorEvent::AlarmRaised => {
                        prop_assert!(!last_was_raise);
                        last_was_raise = true;
                    }
                    MonitorEvent::AlarmCleared => {
                        prop_assert!(last_was_raise);
                        last_was_raise = false;
                    }
                    _ => {}
                }
            }
        }
    }
}
