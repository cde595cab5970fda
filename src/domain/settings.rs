//! User preferences persisted across sessions.

use serde::{Deserialize, Serialize};

use super::model::ModelKind;

/// Credential and model choices.
///
/// Fields missing from a stored record fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    /// API key; empty means "use the deployment default".
    pub api_key: String,
    pub text_model: String,
    pub image_model: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            text_model: ModelKind::Text.default_id().to_string(),
            image_model: ModelKind::Image.default_id().to_string(),
        }
    }
}

impl AppSettings {
    /// The stored key, if one was provided.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        let key = self.api_key.trim();
        (!key.is_empty()).then_some(key)
    }

    /// Model id selected for `kind`.
    #[must_use]
    pub fn model(&self, kind: ModelKind) -> &str {
        match kind {
            ModelKind::Text => &self.text_model,
            ModelKind::Image => &self.image_model,
        }
    }

    /// API key with everything but the last four characters hidden.
    #[must_use]
    pub fn masked_api_key(&self) -> String {
        match self.api_key() {
            None => "(not set)".to_string(),
            Some(key) => {
                let chars: Vec<char> = key.chars().collect();
                if chars.len() <= 4 {
                    "*".repeat(chars.len())
                } else {
                    let tail: String = chars[chars.len() - 4..].iter().collect();
                    format!("{}{}", "*".repeat(chars.len() - 4), tail)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_first_catalog_entries() {
        let settings = AppSettings::default();
        assert_eq!(settings.api_key, "");
        assert_eq!(settings.text_model, "gemini-2.5-flash");
        assert_eq!(settings.image_model, "gemini-2.5-flash-image");
    }

    #[test]
    fn serializes_with_storage_field_names() {
        let settings = AppSettings {
            api_key: "k".into(),
            ..AppSettings::default()
        };
        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(json["apiKey"], "k");
        assert_eq!(json["textModel"], "gemini-2.5-flash");
        assert_eq!(json["imageModel"], "gemini-2.5-flash-image");
    }

    #[test]
    fn partial_record_fills_defaults() {
        let settings: AppSettings = serde_json::from_str(r#"{"apiKey": "abc"}"#).unwrap();
        assert_eq!(settings.api_key, "abc");
        assert_eq!(settings.image_model, "gemini-2.5-flash-image");
    }

    #[test]
    fn blank_key_reads_as_absent() {
        let settings = AppSettings {
            api_key: "   ".into(),
            ..AppSettings::default()
        };
        assert_eq!(settings.api_key(), None);
        assert_eq!(settings.masked_api_key(), "(not set)");
    }

    #[test]
    fn masked_key_keeps_last_four() {
        let settings = AppSettings {
            api_key: "AIzaSyExample1234".into(),
            ..AppSettings::default()
        };
        assert_eq!(settings.masked_api_key(), "*************1234");
    }
}
