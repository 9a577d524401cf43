//! Record kinds, outcomes and per-candidate reports.

use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use crate::error_handling::{LookupError, UnknownRecordKind};

/// DNS record category resolved for each candidate.
///
/// The supported set is closed. `Other` carries a kind that has no lookup
/// logic; resolving it yields a failed outcome instead of a query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordKind {
    A,
    Aaaa,
    Txt,
    Cname,
    Mx,
    Ns,
    /// Unsupported kind, identified by its label.
    Other(String),
}

impl RecordKind {
    /// Kinds queried when none are configured, in report order.
    pub const DEFAULTS: [RecordKind; 6] = [
        RecordKind::A,
        RecordKind::Aaaa,
        RecordKind::Txt,
        RecordKind::Cname,
        RecordKind::Mx,
        RecordKind::Ns,
    ];

    /// Upper-case label as printed in reports.
    pub fn label(&self) -> &str {
        match self {
            RecordKind::A => "A",
            RecordKind::Aaaa => "AAAA",
            RecordKind::Txt => "TXT",
            RecordKind::Cname => "CNAME",
            RecordKind::Mx => "MX",
            RecordKind::Ns => "NS",
            RecordKind::Other(label) => label,
        }
    }

    /// Whether the resolver knows how to look this kind up.
    pub fn is_supported(&self) -> bool {
        !matches!(self, RecordKind::Other(_))
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RecordKind {
    type Err = UnknownRecordKind;

    /// Parses a configured kind, case-insensitively. Unsupported names are a
    /// configuration error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(RecordKind::A),
            "AAAA" => Ok(RecordKind::Aaaa),
            "TXT" => Ok(RecordKind::Txt),
            "CNAME" => Ok(RecordKind::Cname),
            "MX" => Ok(RecordKind::Mx),
            "NS" => Ok(RecordKind::Ns),
            _ => Err(UnknownRecordKind(s.trim().to_string())),
        }
    }
}

/// Raw answer data returned by a [`DnsLookup`](super::DnsLookup) backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    /// IPv4 or IPv6 address
    Address(IpAddr),
    /// Text record (already concatenated)
    Text(String),
    /// Host name (alias target or name server)
    Name(String),
    /// Mail exchanger
    Exchange {
        /// Preference, lower is preferred
        preference: u16,
        /// Exchanger host name
        host: String,
    },
}

/// One attempted resolution for a (candidate, kind) pair.
///
/// Exactly one of an answer or an error is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOutcome {
    /// Kind that was queried
    pub kind: RecordKind,
    /// Answer text; empty for failed outcomes
    pub answer: String,
    /// MX preference
    pub preference: Option<u16>,
    /// Why the lookup failed
    pub error: Option<LookupError>,
}

impl RecordOutcome {
    /// Successful outcome carrying `answer`.
    pub fn answer(kind: RecordKind, answer: impl Into<String>) -> Self {
        RecordOutcome {
            kind,
            answer: answer.into(),
            preference: None,
            error: None,
        }
    }

    /// Successful MX outcome. The answer reads `"<preference> <host>"`.
    pub fn exchange(preference: u16, host: &str) -> Self {
        RecordOutcome {
            kind: RecordKind::Mx,
            answer: format!("{preference} {host}"),
            preference: Some(preference),
            error: None,
        }
    }

    /// Failed outcome.
    pub fn failure(kind: RecordKind, error: LookupError) -> Self {
        RecordOutcome {
            kind,
            answer: String::new(),
            preference: None,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// All outcomes for one candidate domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateReport {
    /// Candidate domain as submitted
    pub domain: String,
    /// Outcomes across all kinds, in no guaranteed order
    pub outcomes: Vec<RecordOutcome>,
}

impl CandidateReport {
    /// Report for a candidate whose resolver task ended without publishing:
    /// one failed outcome per configured kind.
    pub fn task_failed(domain: String, kinds: &[RecordKind]) -> Self {
        CandidateReport {
            domain,
            outcomes: kinds
                .iter()
                .map(|kind| RecordOutcome::failure(kind.clone(), LookupError::TaskFailed))
                .collect(),
        }
    }

    /// Outcomes that carry an answer.
    pub fn successes(&self) -> impl Iterator<Item = &RecordOutcome> {
        self.outcomes.iter().filter(|outcome| outcome.is_success())
    }

    /// Outcomes that failed.
    pub fn failures(&self) -> impl Iterator<Item = &RecordOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.is_success())
    }

    /// Successful answers of one kind.
    pub fn answers_for(&self, kind: &RecordKind) -> Vec<&str> {
        self.successes()
            .filter(|outcome| &outcome.kind == kind)
            .map(|outcome| outcome.answer.as_str())
            .collect()
    }
}
