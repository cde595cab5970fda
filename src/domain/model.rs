//! Selectable generative model catalogs.

use std::fmt;

use serde::Serialize;

/// Which remote capability a model serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Text,
    Image,
}

impl ModelKind {
    /// Stable name used in logs and command output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
        }
    }

    /// Catalog for this kind.
    #[must_use]
    pub const fn catalog(self) -> &'static [ModelOption] {
        match self {
            Self::Text => TEXT_MODELS,
            Self::Image => IMAGE_MODELS,
        }
    }

    /// Look up a catalog entry by id.
    #[must_use]
    pub fn find(self, id: &str) -> Option<&'static ModelOption> {
        self.catalog().iter().find(|option| option.id == id.trim())
    }

    /// First catalog entry, used as the default selection.
    #[must_use]
    pub fn default_id(self) -> &'static str {
        self.catalog()[0].id
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A model identifier paired with its display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelOption {
    pub id: &'static str,
    pub name: &'static str,
}

/// Structured-text generation models.
pub const TEXT_MODELS: &[ModelOption] = &[
    ModelOption {
        id: "gemini-2.5-flash",
        name: "Gemini 2.5 Flash (Fast & Efficient)",
    },
    ModelOption {
        id: "gemini-3-pro-preview",
        name: "Gemini 3.0 Pro (High Reasoning)",
    },
];

/// Image generation models.
pub const IMAGE_MODELS: &[ModelOption] = &[
    ModelOption {
        id: "gemini-2.5-flash-image",
        name: "Gemini 2.5 Flash Image (Fast)",
    },
    ModelOption {
        id: "gemini-3-pro-image-preview",
        name: "Gemini 3.0 Pro Image (High Quality)",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_first_entries() {
        assert_eq!(ModelKind::Text.default_id(), "gemini-2.5-flash");
        assert_eq!(ModelKind::Image.default_id(), "gemini-2.5-flash-image");
    }

    #[test]
    fn find_is_scoped_to_kind() {
        assert!(ModelKind::Text.find("gemini-3-pro-preview").is_some());
        assert!(ModelKind::Image.find("gemini-3-pro-preview").is_none());
        assert!(ModelKind::Image.find(" gemini-3-pro-image-preview ").is_some());
    }
}
