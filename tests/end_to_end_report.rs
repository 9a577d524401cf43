//! End-to-end runs through `dump_with` using an in-memory DNS backend.

mod helpers;

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use ddump::dns::{RecordData, RecordKind};
use ddump::report::write_report;
use ddump::{dump_with, Config, OutputFormat};
use helpers::{FixedSource, StaticLookup};

fn render(reports: &[ddump::CandidateReport]) -> String {
    let mut out = Vec::new();
    write_report(&mut out, reports, OutputFormat::Plain).expect("report should render");
    String::from_utf8(out).expect("report should be UTF-8")
}

#[tokio::test]
async fn test_root_and_failing_subdomain_print_expected_blocks() {
    // www.example.test is unknown to the backend, so every kind fails for it
    let lookup = Arc::new(StaticLookup::new().address("example.test", "93.184.216.34"));
    let source = FixedSource(vec!["www.example.test".to_string()]);
    let config = Config {
        domain: "example.test".to_string(),
        ..Default::default()
    };

    let mut report = dump_with(&config, &source, lookup, CancellationToken::new())
        .await
        .expect("dump should succeed");
    report.batch.sort_by_domain();

    assert!(report.is_complete());
    assert_eq!(report.candidates, 2);
    assert_eq!(
        render(&report.batch.reports),
        "example.test\n     A: 93.184.216.34\n\nwww.example.test\n\n"
    );

    let www = report.batch.find("www.example.test").expect("www should report");
    assert_eq!(www.failures().count(), RecordKind::DEFAULTS.len());
    assert_eq!(report.stats.answers(), 1);
    assert_eq!(report.stats.total_failures(), RecordKind::DEFAULTS.len());
}

#[tokio::test]
async fn test_top_only_never_contacts_the_source() {
    let lookup = Arc::new(
        StaticLookup::new()
            .address("example.test", "192.0.2.1")
            .record(
                "example.test",
                RecordKind::Mx,
                RecordData::Exchange {
                    preference: 10,
                    host: "mx1.example.test.".to_string(),
                },
            )
            .record(
                "example.test",
                RecordKind::Mx,
                RecordData::Exchange {
                    preference: 20,
                    host: "mx2.example.test.".to_string(),
                },
            ),
    );
    let source = FixedSource(vec!["ignored.example.test".to_string()]);
    let config = Config {
        domain: "Example.Test.".to_string(),
        top_only: true,
        ..Default::default()
    };

    let report = dump_with(&config, &source, lookup, CancellationToken::new())
        .await
        .expect("dump should succeed");

    assert_eq!(report.domain, "example.test");
    assert_eq!(report.batch.len(), 1);
    let root = &report.batch.reports[0];
    let mut mx = root.answers_for(&RecordKind::Mx);
    mx.sort_unstable();
    assert_eq!(mx, vec!["10 mx1.example.test.", "20 mx2.example.test."]);
}

#[tokio::test]
async fn test_discovered_names_are_normalized_before_resolution() {
    let lookup = Arc::new(StaticLookup::new().address("example.test", "192.0.2.1"));
    let source = FixedSource(vec![
        "*.example.test".to_string(),
        "WWW.example.test".to_string(),
        "www.example.test.".to_string(),
        "other.invalid".to_string(),
    ]);
    let config = Config {
        domain: "example.test".to_string(),
        ..Default::default()
    };

    let report = dump_with(&config, &source, lookup, CancellationToken::new())
        .await
        .expect("dump should succeed");

    let mut domains: Vec<String> = report
        .batch
        .reports
        .iter()
        .map(|r| r.domain.to_lowercase())
        .collect();
    domains.sort();
    assert_eq!(domains, vec!["example.test", "www.example.test"]);
}

#[tokio::test]
async fn test_invalid_root_is_an_error() {
    let lookup = Arc::new(StaticLookup::new());
    let source = FixedSource(Vec::new());
    let config = Config {
        domain: "not a domain".to_string(),
        ..Default::default()
    };

    let result = dump_with(&config, &source, lookup, CancellationToken::new()).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_cancelled_dump_is_incomplete() {
    let lookup = Arc::new(StaticLookup::new().address("example.test", "192.0.2.1"));
    let source = FixedSource(Vec::new());
    let config = Config {
        domain: "example.test".to_string(),
        ..Default::default()
    };
    let cancel = CancellationToken::new();
    cancel.cancel();

    let report = dump_with(&config, &source, lookup, cancel)
        .await
        .expect("cancellation is not an error");

    assert!(!report.is_complete());
    assert_eq!(report.batch.len() + report.batch.missing.len(), 1);
}
