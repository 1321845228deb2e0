//! Logging setup for programs embedding tenacc
//!
//! The library crates only emit `tracing` events: a `debug` event for every
//! dispatched kernel and a `trace` event for every abstention. Nothing is
//! printed until the embedding program installs a subscriber, for example
//! with [`init_tracing`].
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: filter directive (e.g. `RUST_LOG=tenacc_exec=debug`)
//! - `TENACC_LOG_FORMAT`: `pretty` or `compact` (default: `compact`)

use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Tracing output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TracingFormat {
    /// Multi-line human-readable format
    Pretty,
    /// Single line per event
    Compact,
}

impl TracingFormat {
    /// Parse from string
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
    /// Output format
    pub format: TracingFormat,
    /// Filter directive (e.g. "tenacc_exec=debug,warn")
    pub filter: String,
    /// Enable ANSI colors
    pub with_ansi: bool,
    /// Show thread IDs
    pub with_thread_ids: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        let format = std::env::var("TENACC_LOG_FORMAT")
            .map(|s| TracingFormat::parse(&s))
            .unwrap_or(TracingFormat::Compact);

        let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "tenacc_exec=info,warn".to_string());

        Self {
            format,
            filter,
            with_ansi: true,
            with_thread_ids: false,
        }
    }
}

/// Install a global subscriber with the given configuration
///
/// Fails if the filter does not parse or a global subscriber is already set.
///
/// # Example
///
/// ```no_run
/// use tenacc::tracing_support::{init_tracing, TracingConfig};
///
/// fn main() -> anyhow::Result<()> {
///     init_tracing(TracingConfig::default())?;
///     Ok(())
/// }
/// ```
pub fn init_tracing(config: TracingConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.filter)?;

    match config.format {
        TracingFormat::Pretty => {
            let fmt_layer = fmt::layer()
                .pretty()
                .with_ansi(config.with_ansi)
                .with_thread_ids(config.with_thread_ids)
                .with_filter(filter);

            tracing_subscriber::registry().with(fmt_layer).try_init()?;
        }
        TracingFormat::Compact => {
            let fmt_layer = fmt::layer()
                .compact()
                .with_ansi(config.with_ansi)
                .with_thread_ids(config.with_thread_ids)
                .with_filter(filter);

            tracing_subscriber::registry().with(fmt_layer).try_init()?;
        }
    }

    Ok(())
}
