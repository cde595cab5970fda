//! Handler for the `config` command group and config loading for every command.

use std::path::{Path, PathBuf};

use serde_json::json;

use super::diagnostic::ConfigDiagnostic;
use super::{output, paths};
use crate::error::{ConfigError, Error, Result};
use crate::infrastructure::config::settings::Config;

/// Config file to use: the explicit one, else `~/.biovision/config.toml`.
pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
    explicit.map_or_else(paths::default_config, Path::to_path_buf)
}

/// Load the configuration at `path`.
///
/// An explicitly named file must exist; the default one may be absent.
pub fn load(path: &Path, explicit: bool) -> Result<Config> {
    if explicit {
        Config::load(path)
    } else {
        Config::load_or_default(path)
    }
}

/// Render a config error as a miette report when it carries a source span.
///
/// Returns `None` for errors without source context.
pub fn diagnostic(err: &Error, path: &Path) -> Option<ConfigDiagnostic> {
    let Error::Config(ConfigError::Parse(parse)) = err else {
        return None;
    };
    let src = std::fs::read_to_string(path).ok()?;
    Some(ConfigDiagnostic::from_toml(parse, &src))
}

/// Execute `config show`.
pub fn execute_show(config: &Config, path: &Path) -> Result<()> {
    if output::is_json() {
        output::json_output(json!({
            "command": "config.show",
            "path": path.display().to_string(),
            "config": config,
            "defaultApiKey": config.gemini.api_key.is_some(),
        }));
        return Ok(());
    }

    output::section("Effective configuration");
    output::field("Path", path.display());
    output::field(
        "Default key",
        if config.gemini.api_key.is_some() {
            "loaded from environment"
        } else {
            "not set"
        },
    );
    output::field("Storage", paths::storage_dir(config).display());
    output::section("config.toml");
    output::lines(&config.to_toml()?);
    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(config: &Config, path: &Path) -> Result<()> {
    config.validate()?;
    if output::is_json() {
        output::json_output(json!({
            "command": "config.validate",
            "path": path.display().to_string(),
            "valid": true,
        }));
        return Ok(());
    }
    output::success(&format!("{} is valid", path.display()));
    if config.gemini.api_key.is_none() {
        output::hint("no default key in GEMINI_API_KEY; runs need a key saved in settings");
    }
    Ok(())
}
