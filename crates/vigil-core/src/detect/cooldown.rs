//! Alert cooldown gate.

use std::time::{Duration, Instant};

/// Rate limiter for side-effecting alerts (sound, notification).
///
/// One gate is shared across both event kinds: firing for drowsiness also
/// blocks a yawn alert within the same window, and vice versa. The gate
/// never suppresses event delivery on the broadcast channel, only the
/// optional alert side effect.
#[derive(Debug)]
pub struct AlertGate {
    cooldown: Duration,
    last_fired: Option<Instant>,
}

impl AlertGate {
    /// Creates a gate that fires at most once per `cooldown` window.
    #[must_use]
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_fired: None,
        }
    }

    /// Returns true and stamps the firing time iff the cooldown has elapsed
    /// since the last firing (or the gate has never fired).
    pub fn should_alert(&mut self, now: Instant) -> bool {
        if let Some(prev) = self.last_fired {
            if now.duration_since(prev) < self.cooldown {
                return false;
            }
        }
        self.last_fired = Some(now);
        true
    }

    /// When the gate last fired, if ever.
    #[must_use]
    pub fn last_fired(&self) -> Option<Instant> {
        self.last_fired
    }
}
