//! Structured logging setup for the benchmark runner.
//!
//! Kernels never log. The harness emits `tracing` events (one per timed
//! variant, plus dispatch details at debug level) and the binary installs a
//! subscriber with [`init_tracing`].
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: filter directive (default `matbench=info`)
//! - `MATBENCH_LOG_FORMAT`: `pretty` or `compact` (default `compact`)

use anyhow::Result;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Tracing output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TracingFormat {
    /// Multi-line human-readable format
    Pretty,
    /// Single line per event
    Compact,
}

impl TracingFormat {
    /// Parse from string, falling back to compact.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "pretty" => TracingFormat::Pretty,
            _ => TracingFormat::Compact,
        }
    }
}

/// Tracing configuration
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub format: TracingFormat,
    /// Filter directive (e.g. "matbench=debug")
    pub filter: String,
    pub with_ansi: bool,
    pub with_target: bool,
    pub with_thread_ids: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        let format = std::env::var("MATBENCH_LOG_FORMAT")
            .map(|s| TracingFormat::parse(&s))
            .unwrap_or(TracingFormat::Compact);

        let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "matbench=info".to_string());

        Self {
            format,
            filter,
            with_ansi: true,
            with_target: false,
            with_thread_ids: false,
        }
    }
}

/// Install the global subscriber. Call once at startup.
///
/// # Errors
///
/// Fails if the filter directive doesn't parse or a subscriber is already
/// installed.
pub fn init_tracing(config: TracingConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.filter)?;

    match config.format {
        TracingFormat::Pretty => {
            let fmt_layer = fmt::layer()
                .pretty()
                .with_writer(std::io::stderr)
                .with_ansi(config.with_ansi)
                .with_target(config.with_target)
                .with_thread_ids(config.with_thread_ids)
                .with_filter(filter);

            tracing_subscriber::registry().with(fmt_layer).try_init()?;
        }
        TracingFormat::Compact => {
            let fmt_layer = fmt::layer()
                .compact()
                .with_writer(std::io::stderr)
                .with_ansi(config.with_ansi)
                .with_target(config.with_target)
                .with_thread_ids(config.with_thread_ids)
                .with_filter(filter);

            tracing_subscriber::registry().with(fmt_layer).try_init()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse() {
        assert_eq!(TracingFormat::parse("pretty"), TracingFormat::Pretty);
        assert_eq!(TracingFormat::parse("PRETTY"), TracingFormat::Pretty);
        assert_eq!(TracingFormat::parse("compact"), TracingFormat::Compact);
        assert_eq!(TracingFormat::parse("whatever"), TracingFormat::Compact);
    }

    #[test]
    fn test_bad_filter_is_an_error() {
        let config = TracingConfig {
            filter: "matbench=notalevel".to_string(),
            ..TracingConfig::default()
        };
        assert!(init_tracing(config).is_err());
    }
}
