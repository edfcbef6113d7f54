//! Domain types shared across the detection pipeline.

mod event;
mod measurement;

pub use event::{Event, EventKind};
pub use measurement::Measurement;
