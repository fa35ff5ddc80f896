//! Log file setup
//!
//! The terminal belongs to the UI, so tracing output goes to a file in the
//! config directory instead of stdout/stderr.

use crate::config::Config;
use anyhow::{anyhow, Result};
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the configured filter
pub const LOG_ENV: &str = "SUBMISSION_DESK_LOG";

const LOG_FILE: &str = "submission-desk.log";

/// Install the global subscriber, returning the log file path
pub fn init(config: &Config) -> Result<PathBuf> {
    let dir = Config::config_dir().ok_or_else(|| anyhow!("Could not determine config directory"))?;
    fs::create_dir_all(&dir)?;

    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to install log subscriber: {}", e))?;

    Ok(path)
}
