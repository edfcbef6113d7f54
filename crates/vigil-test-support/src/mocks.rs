//! Mock implementations of core port traits.

use std::sync::{Arc, Mutex, PoisonError};

use vigil_core::ports::{AlertSink, Delivery, EventSink};
use vigil_core::EventKind;

/// Mock implementation of `EventSink` for testing.
///
/// Records every dispatched kind and returns a scriptable outcome, so tests
/// can assert on delivery behavior without touching a real pipe.
#[derive(Debug)]
pub struct MockEventSink {
    sent: Vec<EventKind>,
    outcome: Delivery,
}

impl MockEventSink {
    /// Creates a sink that reports every send as `Delivered`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_outcome(Delivery::Delivered)
    }

    /// Creates a sink that reports the given outcome for every send.
    #[must_use]
    pub fn with_outcome(outcome: Delivery) -> Self {
        Self {
            sent: Vec::new(),
            outcome,
        }
    }

    /// Changes the outcome reported by subsequent sends.
    pub fn set_outcome(&mut self, outcome: Delivery) {
        self.outcome = outcome;
    }

    /// All kinds dispatched so far, in order.
    #[must_use]
    pub fn sent(&self) -> &[EventKind] {
        &self.sent
    }

    /// Number of dispatch attempts.
    #[must_use]
    pub fn sent_count(&self) -> usize {
        self.sent.len()
    }
}

impl Default for MockEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for MockEventSink {
    fn send(&mut self, kind: EventKind) -> Delivery {
        self.sent.push(kind);
        self.outcome
    }
}

/// Mock implementation of `AlertSink` for testing.
///
/// Captures alerts for later assertions.
#[derive(Debug)]
pub struct MockAlertSink {
    alerts: Arc<Mutex<Vec<EventKind>>>,
}

impl MockAlertSink {
    /// Creates a new mock alert sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            alerts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// All alerts raised so far, in order.
    #[must_use]
    pub fn alerts(&self) -> Vec<EventKind> {
        self.alerts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of alerts raised.
    #[must_use]
    pub fn alert_count(&self) -> usize {
        self.alerts().len()
    }
}

impl Default for MockAlertSink {
    fn default() -> Self {
        Self::new()
    }
}

impl AlertSink for MockAlertSink {
    fn alert(&self, kind: EventKind) {
        self.alerts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(kind);
    }
}
