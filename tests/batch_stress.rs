//! Stress tests for the batch coordinator with randomized lookup latency.

mod helpers;

use std::collections::BTreeSet;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use ddump::dns::{resolve_batch, BatchOptions, RecordKind};
use helpers::{numbered_hosts, StaticLookup};

fn backend(hosts: &[String]) -> StaticLookup {
    hosts
        .iter()
        .enumerate()
        .fold(StaticLookup::new(), |lookup, (i, host)| {
            // Every third host does not exist
            if i % 3 == 0 {
                lookup
            } else {
                lookup.address(host, &format!("10.0.{}.{}", i / 256, i % 256))
            }
        })
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_thousand_candidates_yield_thousand_reports() {
    let hosts = numbered_hosts("example.test", 1000);
    let lookup = Arc::new(backend(&hosts).with_random_latency(5));
    let options = BatchOptions::default();

    let batch = resolve_batch(
        Arc::clone(&lookup),
        hosts.clone(),
        &options,
        &CancellationToken::new(),
    )
    .await;

    assert!(batch.complete);
    assert!(batch.missing.is_empty());
    assert_eq!(batch.len(), 1000);

    let reported: BTreeSet<&str> = batch.reports.iter().map(|r| r.domain.as_str()).collect();
    let expected: BTreeSet<&str> = hosts.iter().map(String::as_str).collect();
    assert_eq!(reported, expected);
    assert_eq!(lookup.calls(), 1000 * RecordKind::DEFAULTS.len());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_unbounded_concurrency_still_reports_everything() {
    let hosts = numbered_hosts("example.test", 300);
    let lookup = Arc::new(backend(&hosts).with_random_latency(3));
    let options = BatchOptions {
        max_concurrency: 0,
        ..Default::default()
    };

    let batch = resolve_batch(lookup, hosts, &options, &CancellationToken::new()).await;

    assert!(batch.complete);
    assert_eq!(batch.len(), 300);
}

#[tokio::test]
async fn test_repeated_runs_are_set_equal() {
    let hosts = numbered_hosts("example.test", 50);
    let lookup = Arc::new(backend(&hosts).with_random_latency(2));
    let options = BatchOptions::default();

    let mut runs = Vec::new();
    for _ in 0..2 {
        let batch = resolve_batch(
            Arc::clone(&lookup),
            hosts.clone(),
            &options,
            &CancellationToken::new(),
        )
        .await;
        let answers: BTreeSet<(String, String, String)> = batch
            .reports
            .iter()
            .flat_map(|report| {
                report.successes().map(move |outcome| {
                    (
                        report.domain.clone(),
                        outcome.kind.to_string(),
                        outcome.answer.clone(),
                    )
                })
            })
            .collect();
        runs.push(answers);
    }

    assert!(!runs[0].is_empty());
    assert_eq!(runs[0], runs[1]);
}
