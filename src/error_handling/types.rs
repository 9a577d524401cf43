//! Error type definitions.
//!
//! This module defines the initialization, discovery and lookup errors used
//! throughout the application, plus the failure categories counted in the
//! end-of-run statistics.

use std::time::Duration;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// Error initializing the DNS resolver.
    #[error("DNS resolver initialization error: {0}")]
    DnsResolverError(String),
}

/// Errors raised while discovering candidate names.
///
/// Every variant is fatal to the run: resolution never starts without a
/// candidate list.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// The root domain is empty or not a syntactically valid host name.
    #[error("Invalid root domain: {0:?}")]
    InvalidDomain(String),

    /// The configured search endpoint is not a valid URL.
    #[error("Invalid discovery endpoint {endpoint}: {source}")]
    InvalidEndpoint {
        /// Endpoint as configured
        endpoint: String,
        /// Parse failure
        #[source]
        source: url::ParseError,
    },

    /// The request could not be sent or its body could not be read.
    #[error("Could not query certificate transparency logs: {0}")]
    Request(#[from] ReqwestError),

    /// The endpoint answered with a non-success status.
    #[error("Certificate transparency endpoint returned HTTP {0}")]
    Status(u16),

    /// The response body was not the expected JSON document.
    #[error("Could not decode certificate transparency response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A record kind name outside the supported set, rejected at configuration time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown record kind: {0} (expected one of A, AAAA, TXT, CNAME, MX, NS)")]
pub struct UnknownRecordKind(pub String);

/// Why a single record lookup produced no answer.
///
/// Lookup errors never leave the candidate they belong to: they are stored as
/// failed outcomes and only surface in diagnostics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The name does not exist (NXDOMAIN).
    #[error("no such domain")]
    NoSuchDomain,

    /// The lookup did not finish within the per-lookup timeout.
    #[error("timed out after {0:?}")]
    TimedOut(Duration),

    /// The kind has no resolution logic.
    #[error("unknown record kind: {0}")]
    UnknownKind(String),

    /// The candidate task ended without publishing a report.
    #[error("resolver task failed before reporting")]
    TaskFailed,

    /// Any other resolver failure (SERVFAIL, refused, I/O, malformed answer).
    #[error("{0}")]
    Resolve(String),
}

impl LookupError {
    /// Statistics bucket for this error.
    pub fn category(&self) -> FailureKind {
        match self {
            LookupError::NoSuchDomain => FailureKind::NoSuchDomain,
            LookupError::TimedOut(_) => FailureKind::Timeout,
            LookupError::UnknownKind(_) => FailureKind::UnknownKind,
            LookupError::TaskFailed => FailureKind::TaskFailed,
            LookupError::Resolve(_) => FailureKind::Resolve,
        }
    }
}

/// Categories of failed lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum FailureKind {
    NoSuchDomain,
    Timeout,
    UnknownKind,
    TaskFailed,
    Resolve,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::NoSuchDomain => "No such domain (NXDOMAIN)",
            FailureKind::Timeout => "Lookup timeout",
            FailureKind::UnknownKind => "Unknown record kind",
            FailureKind::TaskFailed => "Resolver task failure",
            FailureKind::Resolve => "Resolver error",
        }
    }
}
