//! Detection engine: two debounce monitors plus the shared alert gate.

use std::time::Duration;

use tracing::debug;

use crate::domain::{Event, EventKind, Measurement};
use crate::ports::EventSink;

use super::cooldown::AlertGate;
use super::monitor::{SignalMonitor, Transition};

/// Detection thresholds and durations.
///
/// All comparisons are exact (`>=`/`<`): there is no hysteresis band, a
/// single sub-threshold reading resets the signal. Whether an enter/exit
/// threshold split would reduce flicker is an upstream tunable, not
/// something this engine guesses at.
#[derive(Debug, Clone, Copy)]
pub struct DetectionConfig {
    /// EAR below this means eye-closure (lower is more closed).
    pub ear_threshold: f32,
    /// MAR at or above this means mouth-open (higher is more open).
    pub mar_threshold: f32,
    /// Blink blend-shape score at or above this means eye-closure.
    pub blink_score_threshold: f32,
    /// Jaw-open blend-shape score at or above this means mouth-open.
    pub jaw_open_score_threshold: f32,
    /// How long eyes must stay closed before confirming drowsiness.
    pub drowsy_sustain: Duration,
    /// How long the mouth must stay open before confirming a yawn.
    pub yawn_sustain: Duration,
    /// Minimum interval between alert side effects.
    pub alert_cooldown: Duration,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            ear_threshold: 0.22,
            mar_threshold: 0.6,
            blink_score_threshold: 0.5,
            jaw_open_score_threshold: 0.5,
            drowsy_sustain: Duration::from_secs(2),
            yawn_sustain: Duration::from_secs(1),
            alert_cooldown: Duration::from_secs(3),
        }
    }
}

/// What one sampling cycle produced.
#[derive(Debug, Clone, Default)]
pub struct CycleReport {
    /// Rising-edge events confirmed this cycle (at most one per signal).
    pub events: Vec<Event>,
    /// Set when the alert gate fired this cycle; drowsiness takes
    /// precedence when both signals are confirmed.
    pub alert: Option<EventKind>,
}

/// Drives the eye-closure and mouth-open monitors one cycle at a time.
///
/// Purely reactive: all timing decisions compare stored timestamps to the
/// current cycle's timestamp. No I/O, no background timers.
#[derive(Debug)]
pub struct Detector {
    config: DetectionConfig,
    eyes: SignalMonitor,
    mouth: SignalMonitor,
    gate: AlertGate,
}

impl Detector {
    /// Creates a detector with both monitors in `Idle`.
    #[must_use]
    pub fn new(config: DetectionConfig) -> Self {
        Self {
            eyes: SignalMonitor::new("eye-closure", config.drowsy_sustain),
            mouth: SignalMonitor::new("mouth-open", config.yawn_sustain),
            gate: AlertGate::new(config.alert_cooldown),
            config,
        }
    }

    /// The configuration the detector was built with.
    #[must_use]
    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Whether the eye-closure signal is currently confirmed.
    #[must_use]
    pub fn is_drowsy(&self) -> bool {
        self.eyes.is_confirmed()
    }

    /// Whether the mouth-open signal is currently confirmed.
    #[must_use]
    pub fn is_yawning(&self) -> bool {
        self.mouth.is_confirmed()
    }

    fn eye_over_threshold(&self, m: &Measurement) -> bool {
        m.ear < self.config.ear_threshold
            || m.blink_score
                .is_some_and(|s| s >= self.config.blink_score_threshold)
    }

    fn mouth_over_threshold(&self, m: &Measurement) -> bool {
        m.mar >= self.config.mar_threshold
            || m.jaw_open_score
                .is_some_and(|s| s >= self.config.jaw_open_score_threshold)
    }

    /// Advances both monitors by one cycle. Pure state mutation, no I/O.
    pub fn process(&mut self, m: &Measurement) -> CycleReport {
        let eye = self
            .eyes
            .advance(self.eye_over_threshold(m), m.face_present, m.timestamp);
        let mouth = self
            .mouth
            .advance(self.mouth_over_threshold(m), m.face_present, m.timestamp);

        let mut events = Vec::new();
        if eye == Transition::Confirmed {
            events.push(Event {
                kind: EventKind::Drowsy,
                at: m.timestamp,
                ear: m.ear,
                mar: m.mar,
            });
        }
        if mouth == Transition::Confirmed {
            events.push(Event {
                kind: EventKind::Yawn,
                at: m.timestamp,
                ear: m.ear,
                mar: m.mar,
            });
        }

        let alert = if self.eyes.is_confirmed() || self.mouth.is_confirmed() {
            if self.gate.should_alert(m.timestamp) {
                Some(if self.eyes.is_confirmed() {
                    EventKind::Drowsy
                } else {
                    EventKind::Yawn
                })
            } else {
                None
            }
        } else {
            None
        };

        CycleReport { events, alert }
    }

    /// Advances one cycle and dispatches any confirmed events to the sink.
    ///
    /// Delivery is unconditional and best-effort: the cooldown never
    /// suppresses it, and the outcome is logged rather than propagated so a
    /// missing or slow consumer cannot stall the sampling loop.
    pub fn run_cycle(&mut self, m: &Measurement, sink: &mut dyn EventSink) -> CycleReport {
        let report = self.process(m);
        for event in &report.events {
            let outcome = sink.send(event.kind);
            debug!(event = event.kind.as_token(), ?outcome, "event dispatched");
        }
        report
    }
}
