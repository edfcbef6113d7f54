//! Listen command - debugging consumer for the event pipe.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use tracing::{info, warn};
use vigil_adapters::DEFAULT_PIPE_PATH;
use vigil_core::EventKind;

use crate::config::AppConfig;

/// Arguments for the listen command.
#[derive(Args, Clone)]
pub struct ListenArgs {
    /// Named pipe path to read events from
    #[arg(long, value_name = "PATH")]
    pub pipe: Option<PathBuf>,
}

/// Attaches to the pipe read end and prints events until the producer
/// closes it.
pub fn run(args: &ListenArgs, config: &AppConfig) -> Result<()> {
    let path = args
        .pipe
        .clone()
        .or_else(|| config.channel.pipe_path.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PIPE_PATH));

    info!("waiting for events on {}", path.display());
    // Opening the read end blocks until the producer holds the write end.
    let file = File::open(&path).with_context(|| {
        format!(
            "cannot open {} (is the producer running?)",
            path.display()
        )
    })?;

    let start = Instant::now();
    for line in BufReader::new(file).lines() {
        let line = line.context("pipe read failed")?;
        let token = line.trim();
        if token.is_empty() {
            continue;
        }
        match EventKind::from_token(token) {
            Some(kind) => {
                let elapsed = start.elapsed().as_secs_f64();
                println!("{elapsed:8.1}s  {kind}");
            }
            None => warn!("unknown event token: {token}"),
        }
    }

    info!("producer closed the pipe");
    Ok(())
}
