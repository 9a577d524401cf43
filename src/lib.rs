//! ddump library: subdomain discovery and concurrent DNS record dumps
//!
//! This library finds the subdomains of a root domain through certificate
//! transparency logs and resolves A, AAAA, TXT, CNAME, MX and NS records for
//! every candidate concurrently. Failed lookups never abort a candidate or the
//! batch; every candidate yields exactly one report.
//!
//! # Example
//!
//! ```no_run
//! use ddump::{run_dump, Config};
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     domain: "example.com".to_string(),
//!     ..Default::default()
//! };
//!
//! let report = run_dump(config, CancellationToken::new()).await?;
//! for candidate in &report.batch.reports {
//!     println!("{}: {} answers", candidate.domain, candidate.successes().count());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod app;
pub mod config;
pub mod discovery;
pub mod dns;
pub mod error_handling;
pub mod initialization;
pub mod report;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel, OutputFormat};
pub use dns::{Batch, CandidateReport, RecordKind, RecordOutcome};
pub use run::{dump_with, run_dump, DumpReport};

// Internal run module (wires discovery, resolution and statistics together)
mod run {
    use std::sync::Arc;
    use std::time::Instant;

    use anyhow::{Context, Result};
    use log::{info, warn};
    use tokio_util::sync::CancellationToken;

    use crate::app::print_lookup_statistics;
    use crate::config::Config;
    use crate::discovery::{discover_candidates, CandidateSource, CrtShSource, DiscoveryPolicy};
    use crate::dns::{resolve_batch, Batch, BatchOptions, DnsLookup};
    use crate::error_handling::LookupStats;
    use crate::initialization::{init_client, init_resolver};

    /// Results of one dump.
    #[derive(Debug)]
    pub struct DumpReport {
        /// Root domain after normalization
        pub domain: String,
        /// Number of candidates handed to the resolver
        pub candidates: usize,
        /// Per-candidate reports, plus completeness
        pub batch: Batch,
        /// Answer and failure counts
        pub stats: LookupStats,
        /// Elapsed time in seconds, discovery included
        pub elapsed_seconds: f64,
    }

    impl DumpReport {
        /// Whether every candidate reported.
        pub fn is_complete(&self) -> bool {
            self.batch.complete
        }
    }

    /// Runs a dump with the provided configuration.
    ///
    /// This is the main entry point for the library. It builds the DNS
    /// resolver and HTTP client, discovers candidates (unless `top_only`),
    /// and resolves every configured record kind for each of them.
    ///
    /// # Arguments
    ///
    /// * `config` - Root domain, record kinds, timeouts and limits
    /// * `cancel` - Cancelling it ends the batch early with a partial result
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DNS resolver or HTTP client cannot be initialized
    /// - The root domain is malformed
    /// - Candidate discovery fails
    ///
    /// Individual lookup failures are recorded in the report, never returned.
    pub async fn run_dump(config: Config, cancel: CancellationToken) -> Result<DumpReport> {
        let resolver = init_resolver(&config).context("Failed to initialize DNS resolver")?;
        let client = init_client(&config).context("Failed to initialize HTTP client")?;
        let source = CrtShSource::new(client, &config.ct_endpoint)
            .context("Failed to configure candidate discovery")?;

        dump_with(&config, &source, resolver, cancel).await
    }

    /// Runs a dump against an explicit candidate source and DNS backend.
    pub async fn dump_with<S, L>(
        config: &Config,
        source: &S,
        lookup: Arc<L>,
        cancel: CancellationToken,
    ) -> Result<DumpReport>
    where
        S: CandidateSource,
        L: DnsLookup + 'static,
    {
        let start_time = Instant::now();
        let policy = DiscoveryPolicy {
            top_only: config.top_only,
            keep_duplicates: config.keep_duplicates,
        };

        let candidates = discover_candidates(source, &config.domain, policy)
            .await
            .with_context(|| format!("Failed to discover subdomains of {}", config.domain))?;
        let domain = candidates.first().cloned().unwrap_or_default();
        let total = candidates.len();

        let options = BatchOptions::from(config);
        let batch = resolve_batch(lookup, candidates, &options, &cancel).await;
        let stats = LookupStats::from_reports(&batch.reports);

        if !batch.complete {
            warn!(
                "{} of {} candidates did not report before the batch ended",
                batch.missing.len(),
                total
            );
        }
        print_lookup_statistics(&batch, &stats);
        info!("Dump of {domain} finished");

        Ok(DumpReport {
            domain,
            candidates: total,
            batch,
            stats,
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
        })
    }
}
