//! Config loading and overrides.
//!
//! One TOML file layer plus `INKSTREAM_*` environment overrides. Every
//! field has a default, so a missing or partial file is never an error;
//! an unreadable or malformed file is.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sync::autosave::{DEFAULT_DELAY_MS, DEFAULT_SAVED_DISPLAY_MS};
use crate::sync::feed::DEFAULT_PAGE_SIZE;
use crate::sync::poll::DEFAULT_POLL_INTERVAL_MS;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {reason}")]
    Read { path: String, reason: String },
    #[error("failed to parse {path}: {reason}")]
    Parse { path: String, reason: String },
}

/// Intervals and sizes for the sync core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Autosave quiet window, in milliseconds.
    pub autosave_delay_ms: u64,
    /// How long the "saved" status stays visible, in milliseconds.
    pub saved_display_ms: u64,
    /// Items per fetched page.
    pub page_size: usize,
    /// Notification poll interval, in milliseconds.
    pub poll_interval_ms: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            autosave_delay_ms: DEFAULT_DELAY_MS,
            saved_display_ms: DEFAULT_SAVED_DISPLAY_MS,
            page_size: DEFAULT_PAGE_SIZE,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl SyncConfig {
    pub fn autosave_delay(&self) -> Duration {
        Duration::from_millis(self.autosave_delay_ms)
    }

    pub fn saved_display(&self) -> Duration {
        Duration::from_millis(self.saved_display_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Load config from a file if it exists, then apply env overrides.
pub fn load(path: &Path) -> Result<SyncConfig, ConfigError> {
    let mut config = match load_file(path)? {
        Some(config) => config,
        None => SyncConfig::default(),
    };
    apply_env_overrides(&mut config);
    Ok(config)
}

fn load_file(path: &Path) -> Result<Option<SyncConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    toml::from_str(&contents)
        .map(Some)
        .map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
}

pub fn apply_env_overrides(config: &mut SyncConfig) {
    override_u64("INKSTREAM_AUTOSAVE_DELAY_MS", &mut config.autosave_delay_ms);
    override_u64("INKSTREAM_SAVED_DISPLAY_MS", &mut config.saved_display_ms);
    override_u64("INKSTREAM_POLL_INTERVAL_MS", &mut config.poll_interval_ms);

    if let Ok(raw) = std::env::var("INKSTREAM_PAGE_SIZE") {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            match trimmed.parse::<usize>() {
                Ok(value) if value > 0 => config.page_size = value,
                Ok(_) => tracing::warn!("INKSTREAM_PAGE_SIZE must be positive, ignoring"),
                Err(err) => tracing::warn!("invalid INKSTREAM_PAGE_SIZE, ignoring: {err}"),
            }
        }
    }
}

fn override_u64(name: &str, slot: &mut u64) {
    if let Ok(raw) = std::env::var(name) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            match trimmed.parse::<u64>() {
                Ok(value) => *slot = value,
                Err(err) => tracing::warn!("invalid {name}, ignoring: {err}"),
            }
        }
    }
}
