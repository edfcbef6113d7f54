//! Vigil Core - Fatigue detection domain logic.
//!
//! This crate contains the domain types, the per-signal debounce state
//! machine, the shared alert cooldown gate, and the port traits that
//! connect the detection engine to external samplers and event consumers.

pub mod detect;
pub mod domain;
pub mod ports;

pub use detect::{AlertGate, CycleReport, DetectionConfig, Detector, Phase, SignalMonitor, Transition};
pub use domain::{Event, EventKind, Measurement};
pub use ports::{AlertSink, Delivery, EventSink, NullEventSink, SampleSource};
