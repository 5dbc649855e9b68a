//! Observer hooks for narration and byte progress.
//!
//! The core never prints. Callers pass a `Reporter`; the CLI renders it,
//! `--json` mode and library users pass `NoopReporter`.

/// Receives human-readable messages and download progress.
pub trait Reporter {
    fn on_message(&self, _text: &str) {}

    /// Cumulative bytes written and the declared total, if the server sent one.
    fn on_progress(&self, _done: u64, _total: Option<u64>) {}
}

/// Reporter that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl Reporter for NoopReporter {}

/// Snapshot of a running download (CLI-friendly).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub bytes_done: u64,
    pub total_bytes: Option<u64>,
}

impl Progress {
    pub fn new(bytes_done: u64, total_bytes: Option<u64>) -> Self {
        Self {
            bytes_done,
            total_bytes,
        }
    }

    /// Fraction complete in [0.0, 1.0]; None when the total is unknown or zero.
    pub fn fraction(&self) -> Option<f64> {
        match self.total_bytes {
            Some(total) if total > 0 => Some((self.bytes_done as f64 / total as f64).min(1.0)),
            _ => None,
        }
    }
}
