//! Report output.
//!
//! Writes a batch of [`CandidateReport`]s either as the plain per-domain
//! listing or as JSON Lines. Only successful outcomes appear in the plain
//! listing; failures are available through [`write_failures`] and the JSON
//! `failures` array.

mod jsonl;
mod plain;

use std::io::{self, ErrorKind, Write};

use crate::config::OutputFormat;
use crate::dns::CandidateReport;

pub use jsonl::{write_jsonl, JsonReport};
pub use plain::write_plain;

/// Writes `reports` to `out` in the requested format.
pub fn write_report<W: Write>(
    out: &mut W,
    reports: &[CandidateReport],
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Plain => write_plain(out, reports),
        OutputFormat::Json => write_jsonl(out, reports),
    }
}

/// Writes one line per failed outcome: `domain KIND: error`.
pub fn write_failures<W: Write>(out: &mut W, reports: &[CandidateReport]) -> io::Result<()> {
    for report in reports {
        for outcome in report.failures() {
            if let Some(error) = &outcome.error {
                writeln!(out, "{} {}: {}", report.domain, outcome.kind, error)?;
            }
        }
    }
    out.flush()
}

/// Writer that treats a closed pipe as success (`ddump ... | head`).
pub struct IgnoreBrokenPipe<W: Write> {
    inner: W,
}

impl<W: Write> IgnoreBrokenPipe<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }
}

impl<W: Write> Write for IgnoreBrokenPipe<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.inner.write(buf) {
            Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(buf.len()),
            other => other,
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.inner.flush() {
            Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
            other => other,
        }
    }
}
