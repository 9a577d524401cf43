// Shared test helpers: an in-memory DNS backend and a fixed candidate source.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use rand::Rng;

use ddump::discovery::CandidateSource;
use ddump::dns::{DnsLookup, RecordData, RecordKind};
use ddump::error_handling::{DiscoveryError, LookupError};

/// DNS backend answering from a table.
///
/// Names missing from the table fail every lookup with NXDOMAIN, the way an
/// authoritative server answers for a name that does not exist.
#[derive(Default)]
pub struct StaticLookup {
    answers: HashMap<(String, RecordKind), Vec<RecordData>>,
    known: Vec<String>,
    max_latency_ms: u64,
    calls: AtomicUsize,
}

#[allow(dead_code)] // Not every test file uses every helper
impl StaticLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name` as existing, with no records yet.
    pub fn domain(mut self, name: &str) -> Self {
        self.known.push(name.to_string());
        self
    }

    pub fn record(mut self, name: &str, kind: RecordKind, data: RecordData) -> Self {
        if !self.known.iter().any(|known| known == name) {
            self.known.push(name.to_string());
        }
        self.answers
            .entry((name.to_string(), kind))
            .or_default()
            .push(data);
        self
    }

    pub fn address(self, name: &str, ip: &str) -> Self {
        let ip: IpAddr = ip.parse().expect("test address should parse");
        let kind = if ip.is_ipv4() { RecordKind::A } else { RecordKind::Aaaa };
        self.record(name, kind, RecordData::Address(ip))
    }

    /// Sleeps a random 0..`max` milliseconds before every answer.
    pub fn with_random_latency(mut self, max_ms: u64) -> Self {
        self.max_latency_ms = max_ms;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DnsLookup for StaticLookup {
    async fn query(&self, name: &str, kind: &RecordKind) -> Result<Vec<RecordData>, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.max_latency_ms > 0 {
            let delay = rand::rng().random_range(0..=self.max_latency_ms);
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        if !self.known.iter().any(|known| known == name) {
            return Err(LookupError::NoSuchDomain);
        }
        Ok(self
            .answers
            .get(&(name.to_string(), kind.clone()))
            .cloned()
            .unwrap_or_default())
    }
}

/// Candidate source returning a fixed list of names.
#[allow(dead_code)]
pub struct FixedSource(pub Vec<String>);

impl CandidateSource for FixedSource {
    async fn discover(&self, _root: &str) -> Result<Vec<String>, DiscoveryError> {
        Ok(self.0.clone())
    }
}

/// Candidate names `host0.<root>` .. `host{count-1}.<root>`.
#[allow(dead_code)]
pub fn numbered_hosts(root: &str, count: usize) -> Vec<String> {
    (0..count).map(|i| format!("host{i}.{root}")).collect()
}
