//! Run command - drive the detection loop from stdin measurements.

use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::json;
use tracing::{info, warn};
use vigil_adapters::{FifoChannel, LogAlertSink, StdinSampleSource, DEFAULT_PIPE_PATH};
use vigil_core::{
    AlertSink, DetectionConfig, Detector, EventSink, NullEventSink, SampleSource,
};

use crate::config::AppConfig;

/// Parse and validate a threshold value (0.0-1.0).
fn parse_ratio(s: &str) -> Result<f32, String> {
    let value: f32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in 0.0..=1.0"))
    }
}

/// Parse and validate a positive ratio (MAR can legitimately exceed 1.0).
fn parse_positive_ratio(s: &str) -> Result<f32, String> {
    let value: f32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(format!("{value} is not a positive number"))
    }
}

/// Parse and validate a positive duration in seconds.
fn parse_seconds(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(format!("{value} is not a positive duration"))
    }
}

/// Shared arguments for the detection loop.
#[derive(Args, Clone)]
pub struct RunArgs {
    /// Named pipe path for event broadcast
    #[arg(long, value_name = "PATH")]
    pub pipe: Option<PathBuf>,

    /// Disable the named-pipe channel
    #[arg(long)]
    pub no_pipe: bool,

    /// Eye aspect ratio threshold (0.0-1.0, eyes closed below this)
    #[arg(long, value_parser = parse_ratio)]
    pub ear_threshold: Option<f32>,

    /// Mouth aspect ratio threshold (mouth open at or above this)
    #[arg(long, value_parser = parse_positive_ratio)]
    pub mar_threshold: Option<f32>,

    /// Blink blend-shape score threshold (0.0-1.0)
    #[arg(long, value_parser = parse_ratio)]
    pub blink_score_threshold: Option<f32>,

    /// Jaw-open blend-shape score threshold (0.0-1.0)
    #[arg(long, value_parser = parse_ratio)]
    pub jaw_open_score_threshold: Option<f32>,

    /// Seconds eyes must stay closed before a drowsy event
    #[arg(long, value_name = "SECONDS", value_parser = parse_seconds)]
    pub drowsy_sustain: Option<f64>,

    /// Seconds the mouth must stay open before a yawn event
    #[arg(long, value_name = "SECONDS", value_parser = parse_seconds)]
    pub yawn_sustain: Option<f64>,

    /// Minimum seconds between alert side effects
    #[arg(long, value_name = "SECONDS", value_parser = parse_seconds)]
    pub alert_cooldown: Option<f64>,
}

impl RunArgs {
    /// Builds the detection configuration with layering priority (lowest to
    /// highest): hardcoded defaults, config file values, CLI arguments.
    fn detection_config(&self, file: &AppConfig) -> DetectionConfig {
        let mut cfg = DetectionConfig::default();
        let d = &file.detection;

        if let Some(v) = self.ear_threshold.or(d.ear_threshold) {
            cfg.ear_threshold = v;
        }
        if let Some(v) = self.mar_threshold.or(d.mar_threshold) {
            cfg.mar_threshold = v;
        }
        if let Some(v) = self.blink_score_threshold.or(d.blink_score_threshold) {
            cfg.blink_score_threshold = v;
        }
        if let Some(v) = self
            .jaw_open_score_threshold
            .or(d.jaw_open_score_threshold)
        {
            cfg.jaw_open_score_threshold = v;
        }
        if let Some(v) = self.drowsy_sustain.or(d.drowsy_sustain) {
            cfg.drowsy_sustain = Duration::from_secs_f64(v);
        }
        if let Some(v) = self.yawn_sustain.or(d.yawn_sustain) {
            cfg.yawn_sustain = Duration::from_secs_f64(v);
        }
        if let Some(v) = self.alert_cooldown.or(d.alert_cooldown) {
            cfg.alert_cooldown = Duration::from_secs_f64(v);
        }

        cfg
    }

    fn pipe_path(&self, file: &AppConfig) -> PathBuf {
        self.pipe
            .clone()
            .or_else(|| file.channel.pipe_path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PIPE_PATH))
    }
}

/// Runs the sampling loop until stdin closes or an interrupt arrives.
pub fn run(args: &RunArgs, config: &AppConfig) -> Result<()> {
    let detection = args.detection_config(config);
    let mut detector = Detector::new(detection);

    let mut fifo = if args.no_pipe {
        info!("event channel disabled");
        None
    } else {
        let mut channel = FifoChannel::new(args.pipe_path(config));
        channel
            .setup()
            .context("failed to create the event pipe")?;
        Some(channel)
    };
    let mut null_sink = NullEventSink;
    let alert_sink = LogAlertSink;

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = Arc::clone(&running);
        ctrlc::set_handler(move || {
            running.store(false, Ordering::SeqCst);
        })
        .context("failed to install interrupt handler")?;
    }

    let stdin = std::io::stdin();
    let mut source = StdinSampleSource::new(stdin.lock());
    let base = source.base();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for sample in source.samples() {
        if !running.load(Ordering::SeqCst) {
            info!("interrupted, shutting down");
            break;
        }
        let measurement = match sample {
            Ok(m) => m,
            Err(e) => {
                warn!("sample stream failed: {e:#}");
                break;
            }
        };

        let sink: &mut dyn EventSink = match fifo.as_mut() {
            Some(channel) => channel,
            None => &mut null_sink,
        };
        let report = detector.run_cycle(&measurement, sink);

        for event in &report.events {
            let t = event.at.saturating_duration_since(base).as_secs_f64();
            let line = json!({
                "event": event.kind,
                "t": t,
                "ear": event.ear,
                "mar": event.mar,
            });
            writeln!(out, "{line}").context("failed to write event output")?;
        }
        if let Some(kind) = report.alert {
            alert_sink.alert(kind);
        }
    }

    // Scoped release on every exit path; Drop backstops the error paths.
    if let Some(mut channel) = fifo.take() {
        channel.teardown();
    }
    Ok(())
}
