//! Builders for timed measurement sequences.

use std::time::{Duration, Instant};

use vigil_core::Measurement;

/// Builds a measurement sequence sampled at a fixed interval.
///
/// Timestamps are synthetic offsets from a base instant taken at
/// construction, so sequences are deterministic regardless of how long the
/// test itself takes to run.
#[derive(Debug)]
pub struct MeasurementSeq {
    base: Instant,
    dt: Duration,
    elapsed: f64,
    samples: Vec<Measurement>,
}

impl MeasurementSeq {
    /// Creates an empty sequence with the given sampling interval.
    #[must_use]
    pub fn new(dt_secs: f64) -> Self {
        Self {
            base: Instant::now(),
            dt: Duration::from_secs_f64(dt_secs),
            elapsed: 0.0,
            samples: Vec::new(),
        }
    }

    /// The base instant offsets are measured from.
    #[must_use]
    pub fn base(&self) -> Instant {
        self.base
    }

    fn timestamp(&self) -> Instant {
        self.base + Duration::from_secs_f64(self.elapsed)
    }

    /// Appends one face-present sample.
    #[must_use]
    pub fn push(mut self, ear: f32, mar: f32) -> Self {
        let m = Measurement::new(ear, mar, true, self.timestamp());
        self.samples.push(m);
        self.elapsed += self.dt.as_secs_f64();
        self
    }

    /// Appends `n` identical face-present samples.
    #[must_use]
    pub fn push_n(mut self, n: usize, ear: f32, mar: f32) -> Self {
        for _ in 0..n {
            self = self.push(ear, mar);
        }
        self
    }

    /// Appends one face-lost sample (metric values are irrelevant).
    #[must_use]
    pub fn face_lost(mut self) -> Self {
        let m = Measurement::new(0.0, 0.0, false, self.timestamp());
        self.samples.push(m);
        self.elapsed += self.dt.as_secs_f64();
        self
    }

    /// Finishes the sequence.
    #[must_use]
    pub fn build(self) -> Vec<Measurement> {
        self.samples
    }
}
