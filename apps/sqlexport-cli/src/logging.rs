//! Logging setup for the sqlexport CLI
//!
//! Installs a `tracing` subscriber according to [`LoggingConfig`]. Output goes
//! through a non-blocking writer, so the returned guard must be held until the
//! program exits.

use sqlexport_core::LoggingConfig;
use std::fs::OpenOptions;
use thiserror::Error;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Error types for logging setup
#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Failed to open log file: {0}")]
    FileOpen(String),

    #[error("Failed to initialize logging: {0}")]
    Init(String),
}

/// Result type for logging operations
pub type Result<T> = std::result::Result<T, LoggingError>;

/// Initialize logging from the configuration
///
/// Nothing is installed when logging is disabled and `verbose` is off.
/// `verbose` raises the level to `debug`. `RUST_LOG` overrides either level.
///
/// # Errors
/// Returns an error if the log file cannot be opened or a global subscriber is
/// already installed
pub fn init_logging(config: &LoggingConfig, verbose: bool) -> Result<Option<WorkerGuard>> {
    if !config.enabled && !verbose {
        return Ok(None);
    }

    let level = if verbose { "debug" } else { config.level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let log_file = config.output.as_ref().filter(|_| config.enabled);
    let (writer, guard) = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| LoggingError::FileOpen(format!("{}: {e}", path.display())))?;
            tracing_appender::non_blocking(file)
        }
        None => tracing_appender::non_blocking(std::io::stderr()),
    };

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if config.json {
        let json_layer = fmt::layer()
            .json()
            .with_writer(writer)
            .with_target(true)
            .with_current_span(true);
        registry.with(json_layer).try_init()
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(writer)
            .with_target(true)
            .with_ansi(log_file.is_none());
        registry.with(fmt_layer).try_init()
    };
    installed.map_err(|e| LoggingError::Init(e.to_string()))?;

    info!("sqlexport {}", env!("CARGO_PKG_VERSION"));
    if let Some(path) = log_file {
        info!(
            "Started with logging enabled. Logfile is set to {}",
            path.display()
        );
    }

    Ok(Some(guard))
}
