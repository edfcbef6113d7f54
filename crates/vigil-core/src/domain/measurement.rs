//! Per-cycle facial geometry measurement.

use std::time::Instant;

/// One cycle's worth of facial geometry scalars from the external sampler.
///
/// Immutable once constructed; the detection engine never retains a
/// measurement beyond the cycle that produced it.
#[derive(Debug, Clone, Copy)]
pub struct Measurement {
    /// Eye aspect ratio. Lower values indicate a more closed eye.
    pub ear: f32,
    /// Mouth aspect ratio. Higher values indicate a more open mouth.
    pub mar: f32,
    /// Optional model-confidence score for eye blink (blend shape).
    pub blink_score: Option<f32>,
    /// Optional model-confidence score for jaw open (blend shape).
    pub jaw_open_score: Option<f32>,
    /// Whether a face was detected this cycle.
    pub face_present: bool,
    /// Monotonic timestamp of this cycle. Timestamps must be non-decreasing.
    pub timestamp: Instant,
}

impl Measurement {
    /// Creates a measurement from the geometric ratios alone.
    #[must_use]
    pub fn new(ear: f32, mar: f32, face_present: bool, timestamp: Instant) -> Self {
        Self {
            ear,
            mar,
            blink_score: None,
            jaw_open_score: None,
            face_present,
            timestamp,
        }
    }

    /// Attaches a blink blend-shape score.
    #[must_use]
    pub fn with_blink_score(mut self, score: f32) -> Self {
        self.blink_score = Some(score);
        self
    }

    /// Attaches a jaw-open blend-shape score.
    #[must_use]
    pub fn with_jaw_open_score(mut self, score: f32) -> Self {
        self.jaw_open_score = Some(score);
        self
    }
}
