//! Vigil Adapters - External adapters for vigil.
//!
//! This crate provides adapters for:
//! - Named-pipe event broadcast (the `EventSink` behind the detection core)
//! - JSON Lines measurement input from any buffered reader
//! - Tracing-based alert output

pub mod alert;
#[cfg(unix)]
pub mod fifo;
pub mod stdin;

pub use alert::LogAlertSink;
#[cfg(unix)]
pub use fifo::FifoChannel;
pub use stdin::StdinSampleSource;

/// Well-known default path for the event pipe.
pub const DEFAULT_PIPE_PATH: &str = "/tmp/face_status_pipe";
