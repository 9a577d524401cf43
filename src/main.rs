//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `ddump` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Report output and exit codes
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use std::io::{self, Write};
use std::process;
use tokio_util::sync::CancellationToken;

use ddump::app::{cancel_on_interrupt, shutdown_gracefully};
use ddump::config::{Opt, EXIT_INCOMPLETE};
use ddump::initialization::init_logger_with;
use ddump::report::{write_failures, write_report, IgnoreBrokenPipe};
use ddump::{run_dump, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; it only seeds RUST_LOG and friends
    let _ = dotenvy::dotenv();

    let config = Config::from(Opt::parse());

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    info!("Looking for subdomains of {}", config.domain);

    let cancel = CancellationToken::new();
    let listener = cancel_on_interrupt(cancel.clone());

    let output_format = config.output_format;
    let sort = config.sort;
    let show_failures = config.show_failures;

    let result = run_dump(config, cancel.clone()).await;
    shutdown_gracefully(cancel, listener).await;

    match result {
        Ok(mut report) => {
            if sort {
                report.batch.sort_by_domain();
            }

            let mut stdout = IgnoreBrokenPipe::new(io::stdout().lock());
            write_report(&mut stdout, &report.batch.reports, output_format)
                .context("Failed to write report")?;
            stdout.flush().context("Failed to write report")?;

            if show_failures {
                write_failures(&mut io::stderr().lock(), &report.batch.reports)
                    .context("Failed to write failures")?;
            }

            if !report.is_complete() {
                warn!(
                    "Incomplete results: {} candidate{} never reported",
                    report.batch.missing.len(),
                    if report.batch.missing.len() == 1 { "" } else { "s" }
                );
                process::exit(EXIT_INCOMPLETE);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("ddump error: {:#}", e);
            process::exit(1);
        }
    }
}
