//! Shared logging setup for Songsmith binaries.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_LOG_FILTER: &str =
    "songsmith=info,songsmith_pipeline=info,songsmith_compliance=info,songsmith_core=info";
const VERBOSE_LOG_FILTER: &str =
    "songsmith=debug,songsmith_pipeline=debug,songsmith_compliance=debug,songsmith_core=debug";

/// Logging configuration shared by Songsmith binaries.
pub struct LogConfig<'a> {
    pub app_name: &'a str,
    pub verbose: bool,
    /// Directory for the daily log file; `None` logs to stderr only.
    pub log_dir: Option<PathBuf>,
}

/// Initialize tracing with stderr output and an optional daily file.
///
/// Keep the returned guard alive until exit so buffered file output is
/// flushed.
pub fn init_logging(config: LogConfig<'_>) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if config.verbose {
            VERBOSE_LOG_FILTER
        } else {
            DEFAULT_LOG_FILTER
        })
    });

    // stdout carries JSON results, so the console layer writes to stderr
    let console_filter = if config.verbose {
        env_filter.clone()
    } else {
        EnvFilter::new("warn")
    };

    let mut guard = None;
    let file_layer = match config.log_dir {
        Some(dir) => {
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create logs directory: {}", dir.display()))?;
            let file_name = format!("{}.log", sanitize_name(config.app_name));
            let file_appender = tracing_appender::rolling::daily(dir, file_name);
            let (file_writer, worker_guard) = tracing_appender::non_blocking(file_appender);
            guard = Some(worker_guard);
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(file_writer)
                    .with_ansi(false)
                    .with_filter(env_filter),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(console_filter),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}

/// Songsmith home directory: `$SONGSMITH_HOME` or `~/.songsmith`.
pub fn songsmith_home() -> Option<PathBuf> {
    if let Ok(override_path) = std::env::var("SONGSMITH_HOME") {
        return Some(PathBuf::from(override_path));
    }
    dirs::home_dir().map(|home| home.join(".songsmith"))
}

/// Logs directory under the home directory.
pub fn logs_dir() -> Option<PathBuf> {
    songsmith_home().map(|home| home.join("logs"))
}

fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|ch| if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' { ch } else { '_' })
        .collect()
}
