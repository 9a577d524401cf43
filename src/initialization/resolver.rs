//! DNS resolver initialization.
//!
//! This module builds the resolver from the system configuration or from an
//! explicit server list, with the per-query timeout and attempt count from
//! the configuration.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use hickory_resolver::system_conf::read_system_conf;
use hickory_resolver::TokioAsyncResolver;

use crate::config::{Config, DNS_ATTEMPTS, DNS_TIMEOUT_SECS};
use crate::error_handling::InitializationError;

/// Initializes the DNS resolver used for every record lookup.
///
/// With no `dns_servers` configured the system resolver configuration
/// (`/etc/resolv.conf` or the platform equivalent) is used. Otherwise every
/// configured server is queried over UDP with TCP fallback.
///
/// # Errors
///
/// Returns `InitializationError::DnsResolverError` if the system configuration
/// cannot be read.
pub fn init_resolver(config: &Config) -> Result<Arc<TokioAsyncResolver>, InitializationError> {
    let (resolver_config, mut opts) = if config.dns_servers.is_empty() {
        read_system_conf().map_err(|e| {
            InitializationError::DnsResolverError(format!(
                "could not read system resolver configuration: {e}"
            ))
        })?
    } else {
        (
            explicit_config(&config.dns_servers),
            ResolverOpts::default(),
        )
    };

    let timeout_secs = if config.lookup_timeout_seconds > 0 {
        config.lookup_timeout_seconds
    } else {
        DNS_TIMEOUT_SECS
    };
    opts.timeout = Duration::from_secs(timeout_secs);
    // No retries: a failed query is reported as-is
    opts.attempts = DNS_ATTEMPTS;
    // Candidates are fully qualified; never append search domains
    opts.ndots = 0;

    Ok(Arc::new(TokioAsyncResolver::tokio(resolver_config, opts)))
}

/// Resolver configuration querying exactly `servers`.
fn explicit_config(servers: &[SocketAddr]) -> ResolverConfig {
    let mut group = NameServerConfigGroup::new();
    for server in servers {
        group.merge(NameServerConfigGroup::from_ips_clear(
            &[server.ip()],
            server.port(),
            true,
        ));
    }
    ResolverConfig::from_parts(None, Vec::new(), group)
}
