//! Alert side-channel port.

use crate::domain::EventKind;

/// Port for the external alert collaborator (sound, notification).
///
/// Called at most once per cooldown window; the collaborator owns the
/// actual playback or notification mechanism.
pub trait AlertSink {
    /// Raises one alert for the given condition.
    fn alert(&self, kind: EventKind);
}
