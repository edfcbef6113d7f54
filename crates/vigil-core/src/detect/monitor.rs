//! Debounce state machine for a single monitored signal.
//!
//! Suppresses transient noise in per-frame metrics by requiring the
//! over-threshold condition to hold continuously for a configured sustain
//! duration before confirming. Any sub-threshold reading or face loss is a
//! hard reset back to `Idle`; there is no separate exit threshold.

use std::time::{Duration, Instant};

use tracing::debug;

/// Timed phase of one monitored signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Signal below threshold (or never seen).
    Idle,
    /// Signal over threshold, sustain duration not yet met.
    Pending {
        /// When the current over-threshold run started.
        since: Instant,
    },
    /// Signal held over threshold for the full sustain duration.
    Confirmed,
}

/// Outcome of advancing the state machine by one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Phase unchanged, nothing to report.
    NoChange,
    /// Entered `Pending` this cycle.
    EnteredPending,
    /// Rising edge: entered `Confirmed` this cycle. Emits exactly one event.
    Confirmed,
    /// A non-idle phase was forced back to `Idle`.
    Reset,
}

/// Per-signal debounce state machine.
///
/// One instance per logical signal (eye-closure, mouth-open). Instances are
/// independent: separate sustain durations, no interaction. All timing is
/// computed against the caller-supplied monotonic timestamps, never a
/// background timer, so synthetic clocks can be injected in tests.
#[derive(Debug)]
pub struct SignalMonitor {
    name: &'static str,
    sustain: Duration,
    phase: Phase,
}

impl SignalMonitor {
    /// Creates a monitor in `Idle` with the given sustain duration.
    #[must_use]
    pub fn new(name: &'static str, sustain: Duration) -> Self {
        Self {
            name,
            sustain,
            phase: Phase::Idle,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the signal is currently confirmed.
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        self.phase == Phase::Confirmed
    }

    /// Advances the state machine by one sampling cycle.
    ///
    /// `over_threshold` is the already-combined boolean condition for this
    /// signal. Face loss overrides everything: it forces `Idle` even from
    /// `Confirmed`. A `Transition::Confirmed` result is the one rising edge
    /// per confirmed period; staying confirmed reports `NoChange`.
    pub fn advance(&mut self, over_threshold: bool, face_present: bool, now: Instant) -> Transition {
        if !face_present {
            return self.reset("face lost");
        }
        if !over_threshold {
            return self.reset("below threshold");
        }

        match self.phase {
            Phase::Idle => {
                self.phase = Phase::Pending { since: now };
                debug!(signal = self.name, "threshold crossed, pending");
                Transition::EnteredPending
            }
            Phase::Pending { since } => {
                if now.duration_since(since) >= self.sustain {
                    self.phase = Phase::Confirmed;
                    debug!(
                        signal = self.name,
                        sustain_ms = self.sustain.as_millis() as u64,
                        "sustained over threshold, confirmed"
                    );
                    Transition::Confirmed
                } else {
                    Transition::NoChange
                }
            }
            Phase::Confirmed => Transition::NoChange,
        }
    }

    fn reset(&mut self, reason: &'static str) -> Transition {
        if self.phase == Phase::Idle {
            return Transition::NoChange;
        }
        debug!(signal = self.name, reason, "reset to idle");
        self.phase = Phase::Idle;
        Transition::Reset
    }
}
