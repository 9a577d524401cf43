//! Configuration constants.
//!
//! Defaults for timeouts, concurrency and the discovery endpoint. The CLI
//! options in [`super::types`] fall back to these values.

/// Per-lookup DNS timeout in seconds.
/// Most answers arrive well under a second; a slow authoritative server should
/// not hold a candidate for longer than this.
pub const DNS_TIMEOUT_SECS: u64 = 5;

/// Attempts the resolver makes per query before reporting a failure.
/// Kept at 1: transient failures are reported, never retried.
pub const DNS_ATTEMPTS: usize = 1;

/// Port used for `--dns-server` entries given without one.
pub const DEFAULT_DNS_PORT: u16 = 53;

/// Maximum number of candidates resolved at the same time (0 disables the gate).
pub const DEFAULT_MAX_CONCURRENCY: usize = 100;

/// Certificate transparency search endpoint.
pub const DEFAULT_CT_ENDPOINT: &str = "https://crt.sh";

/// Timeout for the whole discovery request in seconds.
/// crt.sh is slow for popular domains, so this is generous.
pub const DISCOVERY_TIMEOUT_SECS: u64 = 60;

/// User-Agent sent to the discovery endpoint.
pub const USER_AGENT: &str = concat!("ddump/", env!("CARGO_PKG_VERSION"));

/// Width the record type is right-aligned to in the plain report.
pub const RECORD_TYPE_WIDTH: usize = 6;

/// Process exit status when the batch was interrupted before every candidate reported.
pub const EXIT_INCOMPLETE: i32 = 2;
