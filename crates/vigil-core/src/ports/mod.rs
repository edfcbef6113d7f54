//! Port definitions for hexagonal architecture.
//!
//! These traits define the boundaries between the detection core and
//! external adapters: the measurement producer, the event broadcast
//! channel, and the alert collaborator.

mod alert_sink;
mod event_sink;
mod sample_source;

pub use alert_sink::AlertSink;
pub use event_sink::{Delivery, EventSink, NullEventSink};
pub use sample_source::SampleSource;
