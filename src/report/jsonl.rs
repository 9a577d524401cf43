//! JSON Lines output.
//!
//! One object per candidate:
//!
//! ```json
//! {"domain":"example.test","records":[{"kind":"MX","answer":"10 mx.example.test.","preference":10}],"failures":[{"kind":"NS","category":"No such domain (NXDOMAIN)","error":"no such domain"}]}
//! ```

use std::io::{self, Write};

use serde::Serialize;

use crate::dns::CandidateReport;

/// Serialized form of one [`CandidateReport`].
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub domain: &'a str,
    pub records: Vec<JsonRecord<'a>>,
    pub failures: Vec<JsonFailure<'a>>,
}

#[derive(Debug, Serialize)]
pub struct JsonRecord<'a> {
    pub kind: &'a str,
    pub answer: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preference: Option<u16>,
}

#[derive(Debug, Serialize)]
pub struct JsonFailure<'a> {
    pub kind: &'a str,
    pub category: &'static str,
    pub error: String,
}

impl<'a> From<&'a CandidateReport> for JsonReport<'a> {
    fn from(report: &'a CandidateReport) -> Self {
        JsonReport {
            domain: &report.domain,
            records: report
                .successes()
                .map(|outcome| JsonRecord {
                    kind: outcome.kind.label(),
                    answer: &outcome.answer,
                    preference: outcome.preference,
                })
                .collect(),
            failures: report
                .outcomes
                .iter()
                .filter_map(|outcome| {
                    outcome.error.as_ref().map(|error| JsonFailure {
                        kind: outcome.kind.label(),
                        category: error.category().as_str(),
                        error: error.to_string(),
                    })
                })
                .collect(),
        }
    }
}

/// Writes one JSON object per report, newline separated.
pub fn write_jsonl<W: Write>(out: &mut W, reports: &[CandidateReport]) -> io::Result<()> {
    for report in reports {
        serde_json::to_writer(&mut *out, &JsonReport::from(report))?;
        writeln!(out)?;
    }
    out.flush()
}
