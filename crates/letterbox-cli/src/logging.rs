//! File logging for the TUI session.
//!
//! The terminal belongs to the UI, so records go to `<data_dir>/logs/letterbox.log`.
//!
//! Filter priority (highest to lowest):
//! 1. `LETTERBOX_LOG` env var
//! 2. `log_filter` from config.toml
//! 3. `letterbox=info`

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use letterbox_runtime::Config;
use letterbox_runtime::config::DEFAULT_LOG_FILTER;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

pub const LOG_ENV: &str = "LETTERBOX_LOG";
pub const LOG_FILE: &str = "letterbox.log";

pub fn log_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("logs")
}

/// Install the global subscriber. Keep the returned guard alive for the
/// whole session or buffered records are lost.
pub fn init(data_dir: &Path, config: &Config) -> Result<WorkerGuard> {
    let dir = log_dir(data_dir);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(&dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = build_env_filter(std::env::var(LOG_ENV).ok().as_deref(), &config.log_filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(guard)
}

/// Unparseable directives fall through to the next source instead of failing.
fn build_env_filter(env_directives: Option<&str>, configured: &str) -> EnvFilter {
    if let Some(directives) = env_directives
        && let Ok(filter) = EnvFilter::try_new(directives)
    {
        return filter;
    }

    if let Ok(filter) = EnvFilter::try_new(configured) {
        return filter;
    }

    EnvFilter::new(DEFAULT_LOG_FILTER)
}
