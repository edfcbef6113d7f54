//! Tracing-based alert sink.

use tracing::warn;
use vigil_core::ports::AlertSink;
use vigil_core::EventKind;

/// Alert sink that logs a warning per alert.
///
/// Stands in for an audio or notification collaborator; playback itself is
/// outside this crate.
#[derive(Debug, Default)]
pub struct LogAlertSink;

impl AlertSink for LogAlertSink {
    fn alert(&self, kind: EventKind) {
        match kind {
            EventKind::Drowsy => warn!("fatigue alert: driver appears drowsy"),
            EventKind::Yawn => warn!("fatigue alert: yawning detected"),
        }
    }
}
