//! Tracing setup.
//!
//! The dashboard owns the terminal, so its logs go to a file. The one-shot
//! snapshot command logs to stderr, keeping stdout for the JSON report.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default filter when RUST_LOG is unset
const DEFAULT_FILTER: &str = "info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Append logs to `path`, creating its parent directory if needed
pub fn init_file(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .try_init()
        .context("Failed to install log subscriber")
}

/// Log to stderr
pub fn init_stderr() -> Result<()> {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .context("Failed to install log subscriber")
}
