//! The DNS substrate seam.
//!
//! [`DnsLookup`] is the only place the engine touches the network. The
//! production implementation wraps `hickory-resolver`; tests provide their own.

use std::future::Future;
use std::net::IpAddr;

use hickory_resolver::error::ResolveError;
use hickory_resolver::proto::rr::{RData, RecordType};
use hickory_resolver::TokioAsyncResolver;

use super::types::{RecordData, RecordKind};
use crate::error_handling::{categorize_resolve_error, LookupError, ResolveFailure};

/// Performs one DNS query.
///
/// Implementations return every answer they get back, even ones of a different
/// type (an address query may also return the alias chain); the record
/// resolver keeps only what matches the requested kind. "No records of this
/// type" is `Ok(vec![])`, not an error.
pub trait DnsLookup: Send + Sync {
    fn query(
        &self,
        name: &str,
        kind: &RecordKind,
    ) -> impl Future<Output = Result<Vec<RecordData>, LookupError>> + Send;
}

impl DnsLookup for TokioAsyncResolver {
    async fn query(&self, name: &str, kind: &RecordKind) -> Result<Vec<RecordData>, LookupError> {
        let record_type = match kind {
            RecordKind::A => RecordType::A,
            RecordKind::Aaaa => RecordType::AAAA,
            RecordKind::Txt => RecordType::TXT,
            RecordKind::Cname => RecordType::CNAME,
            RecordKind::Mx => RecordType::MX,
            RecordKind::Ns => RecordType::NS,
            RecordKind::Other(label) => return Err(LookupError::UnknownKind(label.clone())),
        };

        let answer = self.lookup(name, record_type).await;
        answer_data(name, kind, answer.as_ref().map(|lookup| lookup.iter()))
    }
}

/// Maps a resolver answer for `name` onto [`RecordData`].
///
/// NOERROR without records is an empty answer, except for CNAME where a name
/// without an alias is its own canonical name.
fn answer_data<'a>(
    name: &str,
    kind: &RecordKind,
    answer: Result<impl Iterator<Item = &'a RData>, &ResolveError>,
) -> Result<Vec<RecordData>, LookupError> {
    match answer {
        Ok(records) => Ok(records.filter_map(record_data).collect()),
        Err(e) => match categorize_resolve_error(e) {
            ResolveFailure::NoRecords if *kind == RecordKind::Cname => {
                Ok(vec![RecordData::Name(canonical_name(name))])
            }
            ResolveFailure::NoRecords => Ok(Vec::new()),
            ResolveFailure::Failed(error) => {
                log::debug!("{kind} lookup failed for {name}: {e}");
                Err(error)
            }
        },
    }
}

/// Converts resolver record data into [`RecordData`]; unrelated types are skipped.
fn record_data(rdata: &RData) -> Option<RecordData> {
    match rdata {
        RData::A(a) => Some(RecordData::Address(IpAddr::V4(a.0))),
        RData::AAAA(aaaa) => Some(RecordData::Address(IpAddr::V6(aaaa.0))),
        RData::TXT(txt) => Some(RecordData::Text(
            // TXT records can contain multiple strings - join them
            txt.iter()
                .map(|bytes| String::from_utf8_lossy(bytes).to_string())
                .collect::<Vec<String>>()
                .join(""),
        )),
        RData::CNAME(cname) => Some(RecordData::Name(cname.0.to_utf8())),
        RData::NS(ns) => Some(RecordData::Name(ns.0.to_utf8())),
        RData::MX(mx) => Some(RecordData::Exchange {
            preference: mx.preference(),
            host: mx.exchange().to_utf8(),
        }),
        _ => None,
    }
}

/// Fully qualified form of `name`, with a single trailing dot.
pub(crate) fn canonical_name(name: &str) -> String {
    format!("{}.", name.trim_end_matches('.'))
}
