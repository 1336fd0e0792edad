//! Structured logging setup using the `tracing` ecosystem.
//!
//! The library crates only emit events; binaries call one of these
//! initializers once at startup.
//!
//! The CLI prints results on stdout, so the stderr layer stays quiet
//! (warnings only) unless verbose output is requested. The rotating file
//! layer, when a log directory is available, records at the configured level.

use std::path::PathBuf;

use tracing_appender::rolling;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

use crate::config::LoggingConfig;
use crate::error::{NaError, NaResult};

/// File name prefix of the daily-rotated log.
pub const LOG_FILE_NAME: &str = "naapi.log";

/// Filter used on stderr when not verbose.
const QUIET_CONSOLE_FILTER: &str = "warn";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Which layers to install and how each one filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogOptions {
    /// Filter for the stderr layer.
    pub console_filter: String,
    /// Filter for the file layer.
    pub file_filter: String,
    /// Directory for rotated log files. `None` disables file output.
    pub log_dir: Option<PathBuf>,
    /// Write file output as JSON lines.
    pub json_output: bool,
}

impl LogOptions {
    /// Derive options from the `[logging]` section.
    ///
    /// `verbose` raises both layers to debug.
    pub fn from_config(config: &LoggingConfig, log_dir: Option<PathBuf>, verbose: bool) -> Self {
        let (console_filter, file_filter) = if verbose {
            ("debug".to_string(), "debug".to_string())
        } else {
            (QUIET_CONSOLE_FILTER.to_string(), config.level.clone())
        };
        Self {
            console_filter,
            file_filter,
            log_dir,
            json_output: config.json_output,
        }
    }
}

/// Initialize the global tracing subscriber.
///
/// Returns a guard that must be held for the life of the process when file
/// output is enabled.
pub fn init_logging(options: &LogOptions) -> NaResult<LogGuard> {
    let mut layers: Vec<BoxedLayer> = vec![fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_filter(filter(&options.console_filter))
        .boxed()];

    let guard = match &options.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let (writer, guard) = tracing_appender::non_blocking(rolling::daily(dir, LOG_FILE_NAME));
            let file_layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true);
            layers.push(if options.json_output {
                file_layer
                    .json()
                    .with_filter(filter(&options.file_filter))
                    .boxed()
            } else {
                file_layer.with_filter(filter(&options.file_filter)).boxed()
            });
            Some(guard)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| NaError::Config(format!("logging init failed: {e}")))?;

    tracing::debug!(
        console = %options.console_filter,
        file = %options.file_filter,
        dir = ?options.log_dir,
        "logging initialized"
    );

    Ok(LogGuard { _guard: guard })
}

/// Guard that keeps the non-blocking log writer alive.
/// Drop this to flush and close the log file.
pub struct LogGuard {
    _guard: Option<tracing_appender::non_blocking::WorkerGuard>,
}

/// Initialize a minimal stderr-only logger for tests or scripts.
pub fn init_console_logging(level: &str) {
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true).compact())
        .with(filter(level))
        .try_init();
}

fn filter(spec: &str) -> EnvFilter {
    EnvFilter::try_new(spec).unwrap_or_else(|_| EnvFilter::new("info"))
}
