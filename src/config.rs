use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// JSON file holding the submissions
    pub data_path: PathBuf,
    /// Artificial delay added to every data service call
    pub service_latency_ms: u64,
    /// UI tick interval; toasts and background results advance per tick
    pub tick_rate_ms: u64,
    /// `tracing` filter directive used when `SUBMISSION_DESK_LOG` is unset
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        let data_path = Self::config_dir()
            .map(|dir| dir.join("submissions.json"))
            .unwrap_or_else(|| PathBuf::from("submissions.json"));
        Self {
            data_path,
            service_latency_ms: 0,
            tick_rate_ms: 100,
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".submission-desk"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Load the user's config; `Ok(None)` means there is none yet
    pub fn load() -> Result<Option<Config>> {
        match Self::config_path() {
            Some(config_path) => Self::load_from(&config_path),
            None => Ok(None),
        }
    }

    /// A file that exists but cannot be read or parsed is an error, never a
    /// reason to fall back to defaults
    pub fn load_from(config_path: &Path) -> Result<Option<Config>> {
        if !config_path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let config = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", config_path.display()))?;
        Ok(Some(config))
    }

    /// Save the config to disk
    pub fn save(&self) -> Result<()> {
        let config_path =
            Self::config_path().ok_or_else(|| anyhow!("Could not determine config path"))?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(dir) = config_path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(config_path, contents)?;

        Ok(())
    }

    pub fn service_latency(&self) -> Duration {
        Duration::from_millis(self.service_latency_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(10))
    }
}
