//! Vigil Test Support - mocks and builders for integration tests.

pub mod builders;
pub mod mocks;

pub use builders::MeasurementSeq;
pub use mocks::{MockAlertSink, MockEventSink};
