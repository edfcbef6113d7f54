//! JSON Lines measurement source.
//!
//! Reads one measurement per line from any buffered reader, e.g. piped
//! from an external landmark/blend-shape sampler:
//!
//! ```text
//! {"ear":0.15,"mar":0.31,"face_present":true,"t":0.1}
//! {"ear":0.15,"mar":0.31,"blink_score":0.8,"t":0.2}
//! ```
//!
//! The optional `t` field is seconds since stream start and is mapped onto
//! a fixed base instant, keeping canned streams in the monotonic clock
//! domain the detection core expects. Lines without `t` are stamped at
//! arrival time. Malformed lines are skipped with a warning.

use std::io::BufRead;
use std::time::{Duration, Instant};

use serde::Deserialize;
use tracing::warn;
use vigil_core::ports::SampleSource;
use vigil_core::Measurement;

#[derive(Debug, Deserialize)]
struct RawSample {
    ear: f32,
    mar: f32,
    #[serde(default)]
    blink_score: Option<f32>,
    #[serde(default)]
    jaw_open_score: Option<f32>,
    #[serde(default = "default_face_present")]
    face_present: bool,
    #[serde(default)]
    t: Option<f64>,
}

fn default_face_present() -> bool {
    true
}

fn into_measurement(raw: RawSample, base: Instant) -> Measurement {
    let timestamp = match raw.t {
        Some(secs) => base + Duration::from_secs_f64(secs),
        None => Instant::now(),
    };
    Measurement {
        ear: raw.ear,
        mar: raw.mar,
        blink_score: raw.blink_score,
        jaw_open_score: raw.jaw_open_score,
        face_present: raw.face_present,
        timestamp,
    }
}

/// `SampleSource` adapter over a line-oriented reader.
pub struct StdinSampleSource<R> {
    reader: R,
    base: Instant,
}

impl<R: BufRead> StdinSampleSource<R> {
    /// Creates a source; the base instant for `t` offsets is taken now.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            base: Instant::now(),
        }
    }

    /// The base instant `t` offsets are measured from.
    #[must_use]
    pub fn base(&self) -> Instant {
        self.base
    }
}

impl<R: BufRead> SampleSource for StdinSampleSource<R> {
    fn samples(&mut self) -> Box<dyn Iterator<Item = anyhow::Result<Measurement>> + '_> {
        let base = self.base;
        Box::new((&mut self.reader).lines().filter_map(move |line| {
            let line = match line {
                Ok(l) => l,
                Err(e) => return Some(Err(anyhow::Error::new(e).context("sample read failed"))),
            };
            if line.trim().is_empty() {
                return None;
            }
            match serde_json::from_str::<RawSample>(&line) {
                Ok(raw) if raw.t.is_some_and(|t| t < 0.0) => {
                    warn!("skipping sample with negative timestamp");
                    None
                }
                Ok(raw) => Some(Ok(into_measurement(raw, base))),
                Err(e) => {
                    warn!("skipping malformed sample: {e}");
                    None
                }
            }
        }))
    }
}
