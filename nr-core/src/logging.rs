//! Logging setup for applications that embed the Admin API client.
//!
//! The client crates only emit `tracing` events. An application calls
//! [`init_from_config`] (or [`init_logging`]) once at startup to route them
//! to stderr and to a daily rotated file.
//!
//! The configured level is read in one of two ways. A bare level such as
//! `debug` applies to this client's own targets while everything else,
//! including the HTTP stack, stays at `warn`. Anything else is taken as a
//! full `EnvFilter` directive string, e.g. `info,hyper=debug`.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{AppConfig, LoggingConfig};
use crate::constants;
use crate::error::{NrError, NrResult};

/// Targets that a bare level applies to.
const CLIENT_TARGETS: [&str; 2] = ["nr_core", "nr_api"];

/// Level for everything outside [`CLIENT_TARGETS`] when a bare level is given.
const DEPENDENCY_LEVEL: &str = "warn";

/// Build the event filter for a configured level.
///
/// An empty level means `info`. A directive string that does not parse is
/// reported as `NrError::Config` rather than silently replaced.
pub fn build_filter(level: &str) -> NrResult<EnvFilter> {
    let level = level.trim();
    let level = if level.is_empty() { "info" } else { level };

    let directives = match level.parse::<LevelFilter>() {
        Ok(bare) => client_directives(bare),
        Err(_) => level.to_string(),
    };

    EnvFilter::try_new(&directives)
        .map_err(|e| NrError::Config(format!("invalid log filter {directives:?}: {e}")))
}

fn client_directives(level: LevelFilter) -> String {
    let level = level.to_string().to_lowercase();
    let mut directives = vec![DEPENDENCY_LEVEL.to_string()];
    directives.extend(CLIENT_TARGETS.iter().map(|target| format!("{target}={level}")));
    directives.join(",")
}

/// File name prefix for the rotated log, e.g. `node-red-admin.log.2026-10-19`.
fn log_file_prefix() -> String {
    format!("{}.log", constants::APP_NAME)
}

/// Install the global subscriber: compact stderr output plus a daily rotated
/// file under `log_dir`, written as JSON lines when `json_output` is set.
///
/// Fails with `NrError::Config` on a bad filter or when a global subscriber
/// is already installed.
pub fn init_logging(logging: &LoggingConfig, log_dir: &Path) -> NrResult<LogGuard> {
    let filter = build_filter(&logging.level)?;
    std::fs::create_dir_all(log_dir)?;

    let (writer, guard) = tracing_appender::non_blocking(rolling::daily(log_dir, log_file_prefix()));

    let json_file = logging.json_output.then(|| {
        fmt::layer()
            .json()
            .with_writer(writer.clone())
            .with_current_span(false)
            .with_file(true)
            .with_line_number(true)
    });
    let plain_file = (!logging.json_output).then(|| {
        fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_file(true)
            .with_line_number(true)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .with(json_file)
        .with(plain_file)
        .try_init()
        .map_err(|e| NrError::Config(format!("logging already initialized: {e}")))?;

    tracing::debug!(
        level = %logging.level,
        dir = %log_dir.display(),
        json = logging.json_output,
        "logging initialized"
    );

    Ok(LogGuard { _guard: guard })
}

/// Initialize logging from the `[logging]` section of a loaded config.
pub fn init_from_config(config: &AppConfig) -> NrResult<LogGuard> {
    let dir = config.effective_log_dir()?;
    init_logging(&config.logging, &dir)
}

/// Keeps the background log writer alive. Dropping it flushes the file.
pub struct LogGuard {
    _guard: WorkerGuard,
}

/// Stderr-only logging for tests and short-lived tools.
///
/// A second call is a no-op.
pub fn init_console_logging(level: &str) -> NrResult<()> {
    let filter = build_filter(level)?;
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init();
    Ok(())
}
