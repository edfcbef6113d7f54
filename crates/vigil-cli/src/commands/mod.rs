//! CLI command definitions and handlers.

pub mod listen;
pub mod run;

use clap::{Parser, Subcommand};

/// Vigil - Drowsiness and yawn detection with named-pipe event broadcast
#[derive(Parser)]
#[command(name = "vigil")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Shared run arguments (pipe path, thresholds, durations).
    #[command(flatten)]
    pub run: run::RunArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Read measurements from stdin and broadcast confirmed events
    Run(run::RunArgs),
    /// Attach to the event pipe and print received events
    Listen(listen::ListenArgs),
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Clean shutdown.
    Success,
    /// Startup or runtime failure.
    Error,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        match code {
            ExitCode::Success => Self::from(0),
            ExitCode::Error => Self::from(1),
        }
    }
}
