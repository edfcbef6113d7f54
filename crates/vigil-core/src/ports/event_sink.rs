//! Event delivery port.

use crate::domain::EventKind;

/// Outcome of a best-effort event delivery attempt.
///
/// Delivery failures are data, not errors: the sampling loop must continue
/// identically whether or not a consumer is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The event was written to an attached consumer.
    Delivered,
    /// No consumer is attached; the event was dropped.
    NoReader,
    /// A consumer was attached but the write failed; the event was dropped.
    TransientFailure,
}

/// Port for dispatching confirmed events to external consumers.
///
/// Implementations must be non-blocking and must never propagate I/O
/// failures to the caller.
pub trait EventSink {
    /// Attempts to deliver one event, returning the outcome.
    fn send(&mut self, kind: EventKind) -> Delivery;
}

/// Sink for a disabled channel: drops everything, reports `NoReader`.
#[derive(Debug, Default)]
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn send(&mut self, _kind: EventKind) -> Delivery {
        Delivery::NoReader
    }
}
