//! Named-pipe broadcast channel.
//!
//! Owns a well-known FIFO path, lazily (re)connects a non-blocking write
//! handle, and delivers line-oriented event tokens best-effort. A missing
//! reader is the expected steady state, not a fault: every per-send failure
//! is absorbed and reported as a [`Delivery`] outcome, and the sampling
//! loop never blocks on the pipe.

use std::ffi::CString;
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};
use vigil_core::ports::{Delivery, EventSink};
use vigil_core::EventKind;

/// Single-writer FIFO channel for `DROWSY`/`YAWN` tokens.
///
/// Connection state machine: `Disconnected -> Connected` on a successful
/// non-blocking open, `Connected -> Disconnected` only on a detected
/// disconnect (`EPIPE`). Reconnection is opportunistic: one non-blocking
/// open attempt per send while disconnected, never a timer or retry loop.
#[derive(Debug)]
pub struct FifoChannel {
    path: PathBuf,
    writer: Option<File>,
}

impl FifoChannel {
    /// Creates a channel for the given pipe path. Call [`setup`] before
    /// sending.
    ///
    /// [`setup`]: FifoChannel::setup
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            writer: None,
        }
    }

    /// The pipe path this channel owns.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a write handle is currently held.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.writer.is_some()
    }

    /// Idempotently (re)creates the pipe filesystem object.
    ///
    /// A stale object at the path is removed and recreated with owner-only
    /// read/write permission.
    ///
    /// # Errors
    ///
    /// Fails only if the filesystem object cannot be created; this is the
    /// one fatal error in the channel's lifetime and is not retried.
    pub fn setup(&mut self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)
                .with_context(|| format!("failed to remove stale pipe {}", self.path.display()))?;
        }

        let cpath = CString::new(self.path.as_os_str().as_bytes())
            .with_context(|| format!("pipe path {} contains NUL", self.path.display()))?;
        // Owner-only, matching the producer's privilege.
        if unsafe { libc::mkfifo(cpath.as_ptr(), 0o600) } != 0 {
            return Err(std::io::Error::last_os_error())
                .with_context(|| format!("failed to create pipe {}", self.path.display()));
        }

        info!("event pipe created: {}", self.path.display());
        Ok(())
    }

    /// Attempts a non-blocking open of the write end.
    ///
    /// `ENXIO` means no reader holds the read end; that is the expected
    /// steady state when no consumer is running, so it yields `None`
    /// rather than an error.
    fn try_connect(&self) -> Option<File> {
        match OpenOptions::new()
            .write(true)
            .custom_flags(libc::O_NONBLOCK)
            .open(&self.path)
        {
            Ok(file) => {
                debug!("pipe reader attached: {}", self.path.display());
                Some(file)
            }
            Err(e) if e.raw_os_error() == Some(libc::ENXIO) => None,
            Err(e) => {
                debug!("pipe open failed: {e}");
                None
            }
        }
    }

    /// Closes the handle and removes the pipe object if it still exists.
    ///
    /// Idempotent; also invoked from `Drop` so the filesystem object is
    /// released on every exit path.
    pub fn teardown(&mut self) {
        self.writer = None;
        if self.path.exists() {
            if let Err(e) = std::fs::remove_file(&self.path) {
                warn!("failed to remove pipe {}: {e}", self.path.display());
            }
        }
    }
}

impl EventSink for FifoChannel {
    fn send(&mut self, kind: EventKind) -> Delivery {
        if self.writer.is_none() {
            self.writer = self.try_connect();
        }
        let Some(writer) = self.writer.as_mut() else {
            return Delivery::NoReader;
        };

        // One non-blocking write of token + line terminator. Tokens are far
        // below PIPE_BUF, so the write is atomic when it succeeds.
        let line: &[u8] = match kind {
            EventKind::Drowsy => b"DROWSY\n",
            EventKind::Yawn => b"YAWN\n",
        };
        match writer.write(line) {
            Ok(_) => Delivery::Delivered,
            Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                // Detected disconnect: drop the handle and reconnect lazily
                // on the next send.
                debug!("pipe reader detached: {e}");
                self.writer = None;
                Delivery::TransientFailure
            }
            Err(e) => {
                // Kernel buffer full or other transient failure: keep the
                // handle, drop the event.
                debug!("pipe write failed: {e}");
                Delivery::TransientFailure
            }
        }
    }
}

impl Drop for FifoChannel {
    fn drop(&mut self) {
        self.teardown();
    }
}
