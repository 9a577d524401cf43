//! Batch coordination: one task per candidate, fanned in over a channel.
//!
//! Every candidate task publishes exactly one [`CandidateReport`] into a
//! channel sized to the batch, so no producer ever waits on the coordinator.
//! The coordinator is the channel's only reader. Cancellation and the
//! optional deadline cut the batch short; the result is then flagged
//! incomplete and lists the candidates that never reported.

use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, error, info, warn};
use tokio::sync::{mpsc, Semaphore};
use tokio_util::sync::CancellationToken;

use super::candidate::resolve_candidate;
use super::lookup::DnsLookup;
use super::types::{CandidateReport, RecordKind};
use crate::config::Config;

/// Settings shared by every candidate in a batch.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Kinds resolved for each candidate
    pub kinds: Arc<[RecordKind]>,
    /// Per-lookup timeout
    pub lookup_timeout: Option<Duration>,
    /// Overall deadline for the batch
    pub deadline: Option<Duration>,
    /// Candidates resolved at once (0 = unbounded)
    pub max_concurrency: usize,
}

impl Default for BatchOptions {
    fn default() -> Self {
        BatchOptions::from(&Config::default())
    }
}

impl From<&Config> for BatchOptions {
    fn from(config: &Config) -> Self {
        BatchOptions {
            kinds: Arc::from(config.record_kinds.clone()),
            lookup_timeout: config.lookup_timeout(),
            deadline: config.deadline(),
            max_concurrency: config.max_concurrency,
        }
    }
}

/// The reports collected for one run.
#[derive(Debug, Clone)]
pub struct Batch {
    /// One report per candidate, in order of completion
    pub reports: Vec<CandidateReport>,
    /// Candidates that had not reported when the batch was interrupted
    pub missing: Vec<String>,
    /// False when cancellation or the deadline ended the batch early
    pub complete: bool,
    /// Wall time spent resolving
    pub elapsed: Duration,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// First report for `domain`, compared case-insensitively.
    pub fn find(&self, domain: &str) -> Option<&CandidateReport> {
        self.reports
            .iter()
            .find(|report| report.domain.eq_ignore_ascii_case(domain))
    }

    /// Sorts reports by domain name, for display.
    pub fn sort_by_domain(&mut self) {
        self.reports
            .sort_by_cached_key(|report| report.domain.to_ascii_lowercase());
    }
}

/// Resolves every candidate and collects one report per candidate.
///
/// One task is spawned per candidate. With `max_concurrency > 0` a semaphore
/// bounds how many of them resolve at the same time; the others wait for a
/// permit without blocking the coordinator.
///
/// # Arguments
///
/// * `lookup` - DNS backend shared by all tasks
/// * `candidates` - Names to resolve; duplicates are resolved once per occurrence
/// * `options` - Kinds, timeouts and concurrency limit
/// * `cancel` - Stops the batch early when cancelled
///
/// # Returns
///
/// A complete batch holds exactly one report per candidate. A task that dies
/// without reporting is replaced with a report whose outcomes all failed. An
/// interrupted batch holds the reports received so far and names the rest in
/// [`Batch::missing`].
pub async fn resolve_batch<L>(
    lookup: Arc<L>,
    candidates: Vec<String>,
    options: &BatchOptions,
    cancel: &CancellationToken,
) -> Batch
where
    L: DnsLookup + 'static,
{
    let start_time = Instant::now();
    let total = candidates.len();
    if total == 0 {
        return Batch {
            reports: Vec::new(),
            missing: Vec::new(),
            complete: true,
            elapsed: start_time.elapsed(),
        };
    }

    info!(
        "Resolving {} candidate{} ({} record kinds each)",
        total,
        if total == 1 { "" } else { "s" },
        options.kinds.len()
    );

    let (tx, mut rx) = mpsc::channel::<(usize, CandidateReport)>(total);
    let limiter = (options.max_concurrency > 0)
        .then(|| Arc::new(Semaphore::new(options.max_concurrency)));
    let workers = cancel.child_token();

    for (index, domain) in candidates.iter().enumerate() {
        let tx = tx.clone();
        let lookup = Arc::clone(&lookup);
        let kinds = Arc::clone(&options.kinds);
        let limiter = limiter.clone();
        let workers = workers.clone();
        let domain = domain.clone();
        let timeout = options.lookup_timeout;

        tokio::spawn(async move {
            let work = async {
                let _permit = match limiter {
                    Some(limiter) => Some(limiter.acquire_owned().await.ok()?),
                    None => None,
                };
                Some(resolve_candidate(lookup.as_ref(), &domain, &kinds, timeout).await)
            };

            let report = tokio::select! {
                _ = workers.cancelled() => None,
                report = work => report,
            };

            if let Some(report) = report {
                if tx.send((index, report)).await.is_err() {
                    debug!("Coordinator stopped before {domain} reported");
                }
            }
        });
    }
    drop(tx);

    let mut reports = Vec::with_capacity(total);
    let mut reported = vec![false; total];
    let deadline = wait_for(options.deadline);
    tokio::pin!(deadline);
    let mut interrupted = false;

    while reports.len() < total {
        // Cancellation and the deadline win over a closed channel: once the
        // workers are cancelled they drop their senders without reporting.
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!("Batch cancelled after {} of {} candidates", reports.len(), total);
                interrupted = true;
                break;
            }
            _ = &mut deadline => {
                warn!("Batch deadline reached after {} of {} candidates", reports.len(), total);
                interrupted = true;
                break;
            }
            received = rx.recv() => match received {
                Some((index, report)) => {
                    reported[index] = true;
                    reports.push(report);
                }
                None => {
                    interrupted = cancel.is_cancelled();
                    break;
                }
            },
        }
    }

    // Unwind whatever is still in flight
    workers.cancel();

    if interrupted {
        // Reports already queued are real results
        while let Ok((index, report)) = rx.try_recv() {
            reported[index] = true;
            reports.push(report);
        }
    }

    let missing: Vec<String> = candidates
        .into_iter()
        .zip(reported)
        .filter(|(_, done)| !done)
        .map(|(domain, _)| domain)
        .collect();

    if interrupted {
        return Batch {
            reports,
            missing,
            complete: false,
            elapsed: start_time.elapsed(),
        };
    }

    for domain in missing {
        error!("Resolver task for {domain} ended without a report");
        reports.push(CandidateReport::task_failed(domain, &options.kinds));
    }

    Batch {
        reports,
        missing: Vec::new(),
        complete: true,
        elapsed: start_time.elapsed(),
    }
}

/// Completes after `deadline`, or never.
async fn wait_for(deadline: Option<Duration>) {
    match deadline {
        Some(limit) => tokio::time::sleep(limit).await,
        None => std::future::pending::<()>().await,
    }
}
