//! Logger initialization.
//!
//! Logs go to stderr so they never interleave with the report on stdout.

use std::io::{self, Write};

use colored::{ColoredString, Colorize};
use env_logger::fmt::Formatter;
use log::{Level, LevelFilter, Record};

use crate::config::LogFormat;
use crate::error_handling::InitializationError;

/// Dependency modules and the most verbose level let through for each.
const CLAMPED_MODULES: [(&str, LevelFilter); 4] = [
    ("reqwest", LevelFilter::Info),
    ("hyper", LevelFilter::Info),
    ("hickory_resolver", LevelFilter::Warn),
    // Truncated UDP answers are retried over TCP; the proto warnings are noise
    ("hickory_proto", LevelFilter::Error),
];

/// Initializes the logger with the specified level and format.
///
/// `RUST_LOG` is read first; `level` then overrides it for this crate.
/// Resolver and HTTP internals are clamped so a lookup failure on one
/// candidate does not flood the output.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// # Per-module filtering via RUST_LOG
/// RUST_LOG=hickory_resolver=debug ddump -d example.com --log-level debug
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    for (module, limit) in CLAMPED_MODULES {
        builder.filter_module(module, limit.min(level));
    }
    builder.filter_module("ddump", level);

    match format {
        LogFormat::Json => builder.format(json_line),
        LogFormat::Plain => builder.format(plain_line),
    };

    builder.target(env_logger::Target::Stderr);
    builder.try_init()?;
    Ok(())
}

/// `{"ts":"<rfc3339>","level":"INFO","target":"ddump::dns","msg":"..."}`
fn json_line(buf: &mut Formatter, record: &Record) -> io::Result<()> {
    let line = serde_json::json!({
        "ts": chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        "level": record.level().as_str(),
        "target": record.target(),
        "msg": record.args().to_string(),
    });
    writeln!(buf, "{line}")
}

/// `12:00:01 INFO  ddump::dns  message`, level colored.
fn plain_line(buf: &mut Formatter, record: &Record) -> io::Result<()> {
    writeln!(
        buf,
        "{} {:<5} {}  {}",
        chrono::Local::now().format("%H:%M:%S").to_string().dimmed(),
        paint(record.level()),
        record.target().cyan(),
        record.args()
    )
}

fn paint(level: Level) -> ColoredString {
    let label = level.as_str();
    match level {
        Level::Error => label.red().bold(),
        Level::Warn => label.yellow(),
        Level::Info => label.green(),
        Level::Debug => label.blue(),
        Level::Trace => label.purple(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logger_only_once() {
        // Whichever call comes second must fail instead of panicking
        let _ = init_logger_with(LevelFilter::Info, LogFormat::Plain);
        let second = init_logger_with(LevelFilter::Debug, LogFormat::Json);
        assert!(second.is_err());
    }
}
