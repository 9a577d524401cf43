//! Configuration types and CLI options.
//!
//! This module defines the library [`Config`] and the clap-derived [`Opt`]
//! the binary parses it from.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_CT_ENDPOINT, DEFAULT_DNS_PORT, DEFAULT_MAX_CONCURRENCY, DISCOVERY_TIMEOUT_SECS,
    DNS_TIMEOUT_SECS,
};
use crate::dns::RecordKind;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Report output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One block per domain with right-aligned record types
    Plain,
    /// One JSON object per domain (JSON Lines)
    Json,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use ddump::Config;
///
/// let config = Config {
///     domain: "example.com".to_string(),
///     top_only: true,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Root domain to dump
    pub domain: String,

    /// Skip subdomain discovery and resolve the root domain only
    pub top_only: bool,

    /// Record kinds queried for every candidate
    pub record_kinds: Vec<RecordKind>,

    /// Explicit DNS servers; empty means the system resolver configuration
    pub dns_servers: Vec<SocketAddr>,

    /// Per-lookup timeout in seconds
    pub lookup_timeout_seconds: u64,

    /// Overall batch deadline in seconds
    pub deadline_seconds: Option<u64>,

    /// Maximum candidates resolved at once (0 = unbounded)
    pub max_concurrency: usize,

    /// Keep duplicate candidate names instead of collapsing them
    pub keep_duplicates: bool,

    /// Certificate transparency search endpoint
    pub ct_endpoint: String,

    /// Discovery request timeout in seconds
    pub discovery_timeout_seconds: u64,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Report format
    pub output_format: OutputFormat,

    /// Sort the report by domain name
    pub sort: bool,

    /// Print failed lookups to stderr
    pub show_failures: bool,
}

impl Config {
    /// Per-lookup timeout, `None` when disabled with 0.
    pub fn lookup_timeout(&self) -> Option<Duration> {
        (self.lookup_timeout_seconds > 0).then(|| Duration::from_secs(self.lookup_timeout_seconds))
    }

    /// Overall batch deadline, if any.
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_seconds.map(Duration::from_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            domain: String::new(),
            top_only: false,
            record_kinds: RecordKind::DEFAULTS.to_vec(),
            dns_servers: Vec::new(),
            lookup_timeout_seconds: DNS_TIMEOUT_SECS,
            deadline_seconds: None,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            keep_duplicates: false,
            ct_endpoint: DEFAULT_CT_ENDPOINT.to_string(),
            discovery_timeout_seconds: DISCOVERY_TIMEOUT_SECS,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            output_format: OutputFormat::Plain,
            sort: false,
            show_failures: false,
        }
    }
}

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Discover subdomains and dump their records
/// ddump -d example.com
///
/// # Root domain only, against a specific resolver
/// ddump -d example.com --top-only --dns-server 9.9.9.9
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "ddump",
    version,
    about = "Dumps DNS information about a domain and its subdomains."
)]
pub struct Opt {
    /// Domain to dump data for
    #[arg(short, long)]
    pub domain: String,

    /// Do not find subdomains. Only look up the given domain name.
    #[arg(short, long)]
    pub top_only: bool,

    /// Record types to query (comma separated)
    #[arg(
        long = "types",
        value_delimiter = ',',
        default_values_t = RecordKind::DEFAULTS.to_vec()
    )]
    pub record_kinds: Vec<RecordKind>,

    /// DNS server to query instead of the system resolver (IP or IP:port, repeatable)
    #[arg(long = "dns-server", value_parser = parse_dns_server)]
    pub dns_servers: Vec<SocketAddr>,

    /// Per-lookup timeout in seconds (0 disables it)
    #[arg(long, default_value_t = DNS_TIMEOUT_SECS)]
    pub lookup_timeout_seconds: u64,

    /// Give up on unfinished candidates after this many seconds
    #[arg(long)]
    pub deadline_seconds: Option<u64>,

    /// Maximum candidates resolved at once (0 = unbounded)
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    pub max_concurrency: usize,

    /// Resolve duplicate discovered names once per occurrence
    #[arg(long)]
    pub keep_duplicates: bool,

    /// Certificate transparency search endpoint
    #[arg(long, default_value = DEFAULT_CT_ENDPOINT)]
    pub ct_endpoint: String,

    /// Discovery request timeout in seconds
    #[arg(long, default_value_t = DISCOVERY_TIMEOUT_SECS)]
    pub discovery_timeout_seconds: u64,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Report format: plain|json
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Plain)]
    pub output_format: OutputFormat,

    /// Sort the report by domain name
    #[arg(long)]
    pub sort: bool,

    /// Print failed lookups to stderr
    #[arg(long)]
    pub show_failures: bool,
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        Config {
            domain: opt.domain,
            top_only: opt.top_only,
            record_kinds: opt.record_kinds,
            dns_servers: opt.dns_servers,
            lookup_timeout_seconds: opt.lookup_timeout_seconds,
            deadline_seconds: opt.deadline_seconds,
            max_concurrency: opt.max_concurrency,
            keep_duplicates: opt.keep_duplicates,
            ct_endpoint: opt.ct_endpoint,
            discovery_timeout_seconds: opt.discovery_timeout_seconds,
            log_level: opt.log_level,
            log_format: opt.log_format,
            output_format: opt.output_format,
            sort: opt.sort,
            show_failures: opt.show_failures,
        }
    }
}

/// Parses `IP` or `IP:port`; bare addresses get port 53.
fn parse_dns_server(value: &str) -> Result<SocketAddr, String> {
    if let Ok(addr) = value.parse::<SocketAddr>() {
        return Ok(addr);
    }
    value
        .parse::<IpAddr>()
        .map(|ip| SocketAddr::new(ip, DEFAULT_DNS_PORT))
        .map_err(|_| format!("invalid DNS server address: {value}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        let cases = [
            (LogLevel::Error, log::LevelFilter::Error),
            (LogLevel::Warn, log::LevelFilter::Warn),
            (LogLevel::Info, log::LevelFilter::Info),
            (LogLevel::Debug, log::LevelFilter::Debug),
            (LogLevel::Trace, log::LevelFilter::Trace),
        ];
        for (level, expected) in cases {
            assert_eq!(log::LevelFilter::from(level), expected);
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.record_kinds, RecordKind::DEFAULTS.to_vec());
        assert_eq!(config.max_concurrency, DEFAULT_MAX_CONCURRENCY);
        assert_eq!(config.lookup_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.deadline(), None);
        assert!(!config.top_only);
        assert!(!config.keep_duplicates);
        assert_eq!(config.ct_endpoint, "https://crt.sh");
    }

    #[test]
    fn test_zero_lookup_timeout_disables_it() {
        let config = Config {
            lookup_timeout_seconds: 0,
            ..Default::default()
        };
        assert_eq!(config.lookup_timeout(), None);
    }

    #[test]
    fn test_parse_dns_server() {
        assert_eq!(
            parse_dns_server("9.9.9.9").unwrap(),
            "9.9.9.9:53".parse::<SocketAddr>().unwrap()
        );
        assert_eq!(
            parse_dns_server("127.0.0.1:5353").unwrap(),
            "127.0.0.1:5353".parse::<SocketAddr>().unwrap()
        );
        assert_eq!(
            parse_dns_server("2620:fe::fe").unwrap(),
            "[2620:fe::fe]:53".parse::<SocketAddr>().unwrap()
        );
        assert!(parse_dns_server("not-an-ip").is_err());
    }

    #[test]
    fn test_opt_into_config() {
        let opt = Opt::try_parse_from([
            "ddump",
            "-d",
            "example.com",
            "-t",
            "--types",
            "a,mx",
            "--deadline-seconds",
            "30",
        ])
        .expect("options should parse");
        let config = Config::from(opt);
        assert_eq!(config.domain, "example.com");
        assert!(config.top_only);
        assert_eq!(config.record_kinds, vec![RecordKind::A, RecordKind::Mx]);
        assert_eq!(config.deadline(), Some(Duration::from_secs(30)));
    }
}
