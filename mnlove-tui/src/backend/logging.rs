//! Log file setup
//!
//! The terminal is owned by the UI, so logs go to
//! `<data dir>/mnlove-tui/mnlove-tui.log`. `log` records from the library
//! crates are bridged into the same subscriber.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the file subscriber; returns the log path.
pub fn init_logging() -> Result<PathBuf> {
    let dir = dirs::data_local_dir()
        .or_else(dirs::cache_dir)
        .context("no data directory for the log file")?
        .join("mnlove-tui");
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    let path = dir.join("mnlove-tui.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .with(filter)
        .try_init()
        .context("logging already initialized")?;

    tracing::info!("mnlove-tui {} starting", env!("CARGO_PKG_VERSION"));
    Ok(path)
}
