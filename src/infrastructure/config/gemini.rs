//! Gemini endpoint configuration.
//!
//! The deployment default API key is read from `GEMINI_API_KEY` (or the
//! legacy `API_KEY`) at load time and never from the config file.

use serde::{Deserialize, Serialize};

use crate::adapter::outbound::gemini::DEFAULT_BASE_URL;

/// Environment variables consulted for the default key, in order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// Models endpoint root.
    pub base_url: String,

    /// Per-request timeout. Image generation can take well over a minute.
    pub timeout_secs: u64,

    /// Deployment default key, used when the user has not stored one.
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 120,
            api_key: None,
        }
    }
}

impl GeminiConfig {
    /// Read the default key from the environment.
    pub fn load_api_key_from_env(&mut self) {
        self.api_key = API_KEY_ENV_VARS
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty());
    }
}
