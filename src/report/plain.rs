//! Plain per-domain listing.

use std::io::{self, Write};

use crate::config::RECORD_TYPE_WIDTH;
use crate::dns::CandidateReport;

/// Writes each report as its domain, one right-aligned `KIND: answer` line per
/// successful outcome, and a blank line.
///
/// A candidate with no successful outcome prints its domain and the blank
/// line only.
pub fn write_plain<W: Write>(out: &mut W, reports: &[CandidateReport]) -> io::Result<()> {
    for report in reports {
        writeln!(out, "{}", report.domain)?;
        for outcome in report.successes() {
            writeln!(
                out,
                "{:>width$}: {}",
                outcome.kind.label(),
                outcome.answer,
                width = RECORD_TYPE_WIDTH
            )?;
        }
        writeln!(out)?;
    }
    out.flush()
}
