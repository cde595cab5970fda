//! Path utilities for biovision.
//!
//! All data lives under `~/.biovision/`:
//! - `~/.biovision/config.toml` - main configuration
//! - `~/.biovision/biovision_settings.json` - saved key and model choices

use std::path::PathBuf;

use crate::infrastructure::config::settings::Config;

/// Returns the biovision home directory (`~/.biovision/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".biovision")
}

/// Returns the default config file path (`~/.biovision/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

/// Directory holding saved settings: the configured one, else the home directory.
pub fn storage_dir(config: &Config) -> PathBuf {
    config.storage.dir.clone().unwrap_or_else(home_dir)
}
