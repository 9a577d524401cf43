//! Single record-kind resolution.
//!
//! [`resolve_record`] runs one query through a [`DnsLookup`] and normalizes
//! the result into [`RecordOutcome`]s. Failures never escape: they become a
//! single failed outcome for the kind.

use std::net::IpAddr;
use std::time::Duration;

use log::{debug, trace, warn};

use super::lookup::DnsLookup;
use super::types::{RecordData, RecordKind, RecordOutcome};
use crate::error_handling::LookupError;

/// Resolves one record kind for one domain.
///
/// # Arguments
///
/// * `lookup` - The DNS backend
/// * `domain` - The name to query
/// * `kind` - The record kind to query
/// * `timeout` - Upper bound for the query, if any
///
/// # Returns
///
/// Zero or more successful outcomes, or exactly one failed outcome. An
/// unsupported kind fails without sending a query.
pub async fn resolve_record<L: DnsLookup>(
    lookup: &L,
    domain: &str,
    kind: &RecordKind,
    timeout: Option<Duration>,
) -> Vec<RecordOutcome> {
    if let RecordKind::Other(label) = kind {
        warn!("Skipping {domain}: no resolution logic for record kind {label}");
        return vec![RecordOutcome::failure(
            kind.clone(),
            LookupError::UnknownKind(label.clone()),
        )];
    }

    let query = lookup.query(domain, kind);
    let result = match timeout {
        Some(limit) => match tokio::time::timeout(limit, query).await {
            Ok(result) => result,
            Err(_) => Err(LookupError::TimedOut(limit)),
        },
        None => query.await,
    };

    match result {
        Ok(data) => normalize(domain, kind, data),
        Err(error) => {
            // The resolver's own timeout carries no duration
            let error = match (error, timeout) {
                (LookupError::TimedOut(elapsed), Some(limit)) if elapsed.is_zero() => {
                    LookupError::TimedOut(limit)
                }
                (error, _) => error,
            };
            debug!("{kind} lookup for {domain} failed: {error}");
            vec![RecordOutcome::failure(kind.clone(), error)]
        }
    }
}

/// Keeps the answers matching `kind`. CNAME keeps only the end of the chain.
fn normalize(domain: &str, kind: &RecordKind, data: Vec<RecordData>) -> Vec<RecordOutcome> {
    let mut outcomes: Vec<RecordOutcome> = data
        .into_iter()
        .filter_map(|answer| match (kind, answer) {
            (RecordKind::A, RecordData::Address(ip @ IpAddr::V4(_)))
            | (RecordKind::Aaaa, RecordData::Address(ip @ IpAddr::V6(_))) => {
                Some(RecordOutcome::answer(kind.clone(), ip.to_string()))
            }
            (RecordKind::Txt, RecordData::Text(text)) => {
                Some(RecordOutcome::answer(RecordKind::Txt, text))
            }
            (RecordKind::Cname, RecordData::Name(host)) | (RecordKind::Ns, RecordData::Name(host)) => {
                Some(RecordOutcome::answer(kind.clone(), host))
            }
            (RecordKind::Mx, RecordData::Exchange { preference, host }) => {
                Some(RecordOutcome::exchange(preference, &host))
            }
            (_, other) => {
                trace!("Ignoring {other:?} in {kind} answer for {domain}");
                None
            }
        })
        .collect();

    // Alias chains arrive in order; the last hop is the canonical name
    if *kind == RecordKind::Cname {
        outcomes = outcomes.pop().into_iter().collect();
    }
    outcomes
}
