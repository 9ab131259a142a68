//! Logging Infrastructure
//!
//! The terminal belongs to the UI, so nothing is logged to stdout:
//! - Daily rotating log files under `<work_dir>/logs` (deleted after 14 days)
//! - An in-memory sink for the in-app log pane (`tui-logger`)

use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// File name prefix of the rolling log files (`catalog-desk.YYYY-MM-DD`)
pub const LOG_FILE_PREFIX: &str = "catalog-desk";

/// Days a rotated log file is kept
pub const LOG_RETENTION_DAYS: i64 = 14;

/// Initialize the logging system with daily rotating logs
///
/// `RUST_LOG` overrides `level`. The returned guard flushes the file writer
/// on drop and must be held for the lifetime of the program.
pub fn init_logger_with_file(level: &str, log_dir: &Path) -> anyhow::Result<WorkerGuard> {
    fs::create_dir_all(log_dir)?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_PREFIX);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_writer(non_blocking_file);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(tui_logger::tracing_subscriber_layer())
        .try_init()?;

    // log crate adapter for dependencies that still use `log`
    if let Err(e) = tui_logger::init_logger(log::LevelFilter::Info) {
        tracing::debug!(error = ?e, "log adapter already installed");
    }
    tui_logger::set_default_level(log::LevelFilter::Info);

    Ok(guard)
}

/// Clean up rotated log files older than `keep_days` before `today`
///
/// Returns the number of files deleted. Files that do not follow the
/// `catalog-desk.YYYY-MM-DD` pattern are left alone.
pub fn cleanup_old_logs(log_dir: &Path, today: NaiveDate, keep_days: i64) -> anyhow::Result<usize> {
    if !log_dir.exists() {
        return Ok(0);
    }

    let cutoff = today - chrono::Duration::days(keep_days);
    let mut removed = 0;

    for entry in fs::read_dir(log_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        let date = name
            .strip_prefix(LOG_FILE_PREFIX)
            .and_then(|rest| rest.strip_prefix('.'))
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());

        if let Some(date) = date
            && date < cutoff
        {
            fs::remove_file(&path)?;
            tracing::info!(file = %name, "Deleted old log file");
            removed += 1;
        }
    }

    Ok(removed)
}
