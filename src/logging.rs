//! Tracing subscriber setup for the binary.
//!
//! Logs go to stderr so that reports on stdout stay machine-readable.
//! `RUST_LOG` takes precedence over the configured level.

use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LogFormat;

/// Map a configured level name onto a tracing filter directive.
///
/// `warning` and `critical` have no tracing counterpart and map to `warn`
/// and `error`.
pub fn level_directive(level: &str) -> &'static str {
    match level.trim().to_lowercase().as_str() {
        "debug" => "debug",
        "info" => "info",
        "error" | "critical" => "error",
        _ => "warn"
    }
}

/// Install the global subscriber.
///
/// Does nothing if a subscriber is already installed.
pub fn init_tracing(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("bq_sql_analyzer={},warn", level_directive(level)))
    });
    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false);
    let _ = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init()
    };
}
