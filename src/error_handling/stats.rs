//! Lookup statistics tracking.
//!
//! Counts answers and failed lookups per [`FailureKind`] for the summary
//! printed at the end of a run.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::FailureKind;
use crate::dns::CandidateReport;

/// Thread-safe lookup statistics.
///
/// All failure kinds are initialized to zero on creation, so counters can be
/// bumped through a shared reference.
#[derive(Debug)]
pub struct LookupStats {
    candidates: AtomicUsize,
    answers: AtomicUsize,
    failures: HashMap<FailureKind, AtomicUsize>,
}

impl LookupStats {
    pub fn new() -> Self {
        let mut failures = HashMap::new();
        for kind in FailureKind::iter() {
            failures.insert(kind, AtomicUsize::new(0));
        }

        LookupStats {
            candidates: AtomicUsize::new(0),
            answers: AtomicUsize::new(0),
            failures,
        }
    }

    /// Builds statistics for a finished set of reports.
    pub fn from_reports<'a>(reports: impl IntoIterator<Item = &'a CandidateReport>) -> Self {
        let stats = Self::new();
        for report in reports {
            stats.record_report(report);
        }
        stats
    }

    /// Adds one candidate report to the counters.
    pub fn record_report(&self, report: &CandidateReport) {
        self.candidates.fetch_add(1, Ordering::Relaxed);
        for outcome in &report.outcomes {
            match &outcome.error {
                None => {
                    self.answers.fetch_add(1, Ordering::Relaxed);
                }
                Some(error) => self.increment_failure(error.category()),
            }
        }
    }

    /// Increment a failure counter.
    pub fn increment_failure(&self, kind: FailureKind) {
        if let Some(counter) = self.failures.get(&kind) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment failure counter for {:?} which is not in the map. \
                 This indicates a bug in LookupStats initialization.",
                kind
            );
        }
    }

    /// Get the count for a failure kind.
    pub fn get_failure_count(&self, kind: FailureKind) -> usize {
        self.failures
            .get(&kind)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Number of candidate reports counted.
    pub fn candidates(&self) -> usize {
        self.candidates.load(Ordering::SeqCst)
    }

    /// Number of successful outcomes counted.
    pub fn answers(&self) -> usize {
        self.answers.load(Ordering::SeqCst)
    }

    /// Get total failure count across all kinds.
    pub fn total_failures(&self) -> usize {
        FailureKind::iter().map(|k| self.get_failure_count(k)).sum()
    }
}

impl Default for LookupStats {
    fn default() -> Self {
        Self::new()
    }
}
