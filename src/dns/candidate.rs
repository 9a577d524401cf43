//! Per-candidate fan-out across record kinds.

use std::time::Duration;

use futures::future::join_all;

use super::lookup::DnsLookup;
use super::records::resolve_record;
use super::types::{CandidateReport, RecordKind};

/// Resolves every kind for one candidate concurrently and aggregates the
/// outcomes into a single report.
///
/// The report is assembled only once every kind has finished, so callers
/// never observe a partially filled report. Outcome order is not meaningful.
pub async fn resolve_candidate<L: DnsLookup>(
    lookup: &L,
    domain: &str,
    kinds: &[RecordKind],
    timeout: Option<Duration>,
) -> CandidateReport {
    let mut lookups = Vec::with_capacity(kinds.len());
    for kind in kinds {
        lookups.push(resolve_record(lookup, domain, kind, timeout));
    }

    let outcomes = join_all(lookups).await.into_iter().flatten().collect();

    CandidateReport {
        domain: domain.to_string(),
        outcomes,
    }
}
