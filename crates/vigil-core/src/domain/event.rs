//! Fatigue event types and their wire tokens.

use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Kind of confirmed fatigue event.
///
/// Serializes to the ASCII wire tokens (`DROWSY`, `YAWN`) used on the
/// broadcast channel and in JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventKind {
    /// Eyes held closed past the drowsy sustain duration.
    Drowsy,
    /// Mouth held open past the yawn sustain duration.
    Yawn,
}

impl EventKind {
    /// Wire token for the broadcast channel.
    #[must_use]
    pub fn as_token(self) -> &'static str {
        match self {
            Self::Drowsy => "DROWSY",
            Self::Yawn => "YAWN",
        }
    }

    /// Parses a wire token back into an event kind.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "DROWSY" => Some(Self::Drowsy),
            "YAWN" => Some(Self::Yawn),
            _ => None,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

/// A confirmed rising-edge fatigue event.
///
/// Constructed only on a `Pending -> Confirmed` transition and discarded
/// after dispatch. Carries the triggering cycle's raw ratios so downstream
/// consumers can enrich their records out-of-band.
#[derive(Debug, Clone, Copy)]
pub struct Event {
    /// What was confirmed.
    pub kind: EventKind,
    /// Timestamp of the confirming cycle.
    pub at: Instant,
    /// Eye aspect ratio at confirmation.
    pub ear: f32,
    /// Mouth aspect ratio at confirmation.
    pub mar: f32,
}
