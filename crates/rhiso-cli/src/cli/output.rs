//! Terminal output: narration, progress bar, JSON results and errors.
//!
//! In `--json` mode stdout carries exactly one JSON object, the result or
//! the error, and nothing else.

use anyhow::Result;
use rhiso_core::progress::Progress;
use rhiso_core::{Error, Reporter};
use serde_json::{json, Value};
use std::cell::Cell;
use std::io::{self, IsTerminal, Write};

const BAR_WIDTH: usize = 50;
const MIB: f64 = 1024.0 * 1024.0;

pub fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Prints core messages, plus a progress bar when stdout is a terminal.
pub struct Narrator {
    quiet: bool,
    bar: bool,
    /// A bar line is on screen without its newline.
    drawing: Cell<bool>,
}

impl Narrator {
    pub fn new(json: bool) -> Self {
        Self {
            quiet: json,
            bar: !json && io::stdout().is_terminal(),
            drawing: Cell::new(false),
        }
    }

    /// Ends a pending bar line.
    pub fn finish(&self) {
        if self.drawing.replace(false) {
            println!();
        }
    }
}

impl Reporter for Narrator {
    fn on_message(&self, text: &str) {
        if self.quiet {
            return;
        }
        self.finish();
        println!("{}", text);
    }

    fn on_progress(&self, done: u64, total: Option<u64>) {
        if !self.bar {
            return;
        }
        let mut stdout = io::stdout().lock();
        let _ = write!(stdout, "\r{}", progress_line(done, total));
        let _ = stdout.flush();
        self.drawing.set(true);
    }
}

/// `  Progress: [=====-----] 50.0% (1.0/2.0 MB)`, or just the byte count when
/// the server sent no length.
pub(crate) fn progress_line(done: u64, total: Option<u64>) -> String {
    let mb_done = done as f64 / MIB;
    match (Progress::new(done, total).fraction(), total) {
        (Some(fraction), Some(total)) => {
            let filled = (fraction * BAR_WIDTH as f64) as usize;
            format!(
                "  Progress: [{}{}] {:.1}% ({:.1}/{:.1} MB)",
                "=".repeat(filled),
                "-".repeat(BAR_WIDTH - filled),
                fraction * 100.0,
                mb_done,
                total as f64 / MIB,
            )
        }
        _ => format!("  Progress: {:.1} MB", mb_done),
    }
}

/// JSON shape of a failed command. Checksum mismatches carry both digests;
/// timeouts set `timed_out`.
pub(crate) fn error_json(err: &anyhow::Error) -> Value {
    let mut out = json!({
        "error": format!("{:#}", err),
        "status": "failed",
    });
    if core_error(err).is_some_and(Error::is_timeout) {
        out["timed_out"] = json!(true);
    }
    let mismatch = match core_error(err) {
        Some(Error::ChecksumMismatch {
            expected,
            computed,
            path,
        }) => Some((expected, computed, path)),
        _ => None,
    };
    if let Some((expected, computed, path)) = mismatch {
        out["expected_checksum"] = json!(expected);
        out["calculated_checksum"] = json!(computed);
        if let Some(name) = path.file_name() {
            out["filename"] = json!(name.to_string_lossy());
        }
    }
    out
}

fn core_error(err: &anyhow::Error) -> Option<&Error> {
    err.chain().find_map(|e| e.downcast_ref::<Error>())
}

/// Prints `err` as a JSON object on stdout or as text on stderr.
pub fn report_error(err: &anyhow::Error, json: bool) {
    if json {
        if let Ok(text) = serde_json::to_string_pretty(&error_json(err)) {
            println!("{}", text);
        }
    } else {
        eprintln!("rhiso error: {:#}", err);
    }
}
