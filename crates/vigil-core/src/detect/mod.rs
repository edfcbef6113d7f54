//! Temporal detection: debounce state machine, alert gate, and the engine
//! that drives one instance of each per monitored signal.

mod cooldown;
mod engine;
mod monitor;

pub use cooldown::AlertGate;
pub use engine::{CycleReport, DetectionConfig, Detector};
pub use monitor::{Phase, SignalMonitor, Transition};
