//! One animal's rendered view of another.

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Text payload describing one perspective, as produced by the text model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerspectiveDetails {
    pub scientific_description: String,
    pub visual_features: Vec<String>,
    pub image_prompt: String,
}

/// Both perspectives returned by one text-model call.
///
/// `perspective_a` is how animal A sees animal B, `perspective_b` the reverse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisionDetails {
    pub perspective_a: PerspectiveDetails,
    pub perspective_b: PerspectiveDetails,
}

/// Image sub-state of a perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ImageState {
    /// Request in flight.
    Loading,
    /// Image rendered; `uri` is a `data:` URI.
    Ready { uri: String },
    /// Request settled without an image.
    Unavailable { reason: String },
}

impl ImageState {
    /// Short label for progress output.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Ready { .. } => "ready",
            Self::Unavailable { .. } => "unavailable",
        }
    }
}

/// A perspective with its text populated and an image in some state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisionPerspective {
    pub scientific_description: String,
    pub visual_features: Vec<String>,
    pub image_prompt: String,
    pub image: ImageState,
}

impl VisionPerspective {
    /// Perspective awaiting its image.
    #[must_use]
    pub fn loading(details: PerspectiveDetails) -> Self {
        Self {
            scientific_description: details.scientific_description,
            visual_features: details.visual_features,
            image_prompt: details.image_prompt,
            image: ImageState::Loading,
        }
    }

    #[must_use]
    pub fn image_uri(&self) -> Option<&str> {
        match &self.image {
            ImageState::Ready { uri } => Some(uri.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.image, ImageState::Loading)
    }
}

/// Decoded `data:<mime>;base64,<payload>` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageData {
    /// Build the data URI for an inline payload that is already base64.
    #[must_use]
    pub fn data_uri(mime_type: &str, base64_payload: &str) -> String {
        format!("data:{mime_type};base64,{base64_payload}")
    }

    /// Decode a base64 data URI. Returns `None` for anything else.
    #[must_use]
    pub fn from_data_uri(uri: &str) -> Option<Self> {
        let rest = uri.strip_prefix("data:")?;
        let (mime_type, payload) = rest.split_once(";base64,")?;
        let bytes = BASE64_STANDARD.decode(payload.trim()).ok()?;
        Some(Self {
            mime_type: mime_type.to_string(),
            bytes,
        })
    }

    /// File extension matching the mime type.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            "image/png" => "png",
            _ => "bin",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> PerspectiveDetails {
        PerspectiveDetails {
            scientific_description: "Dichromatic vision".into(),
            visual_features: vec!["Dichromatic Vision".into(), "Low Acuity".into()],
            image_prompt: "POV shot of a fly".into(),
        }
    }

    #[test]
    fn loading_perspective_has_no_image() {
        let perspective = VisionPerspective::loading(details());
        assert!(perspective.is_loading());
        assert_eq!(perspective.image_uri(), None);
        assert_eq!(perspective.visual_features.len(), 2);
    }

    #[test]
    fn details_use_camel_case_fields() {
        let json = serde_json::to_value(details()).unwrap();
        assert_eq!(json["scientificDescription"], "Dichromatic vision");
        assert_eq!(json["visualFeatures"][1], "Low Acuity");
        assert_eq!(json["imagePrompt"], "POV shot of a fly");
    }

    #[test]
    fn details_require_every_field() {
        let missing_prompt = r#"{"scientificDescription": "x", "visualFeatures": []}"#;
        assert!(serde_json::from_str::<PerspectiveDetails>(missing_prompt).is_err());
    }

    #[test]
    fn data_uri_decodes() {
        let uri = ImageData::data_uri("image/png", "aGVsbG8=");
        assert_eq!(uri, "data:image/png;base64,aGVsbG8=");

        let image = ImageData::from_data_uri(&uri).unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.bytes, b"hello");
        assert_eq!(image.extension(), "png");
    }

    #[test]
    fn non_data_uri_is_rejected() {
        assert!(ImageData::from_data_uri("https://example.com/a.png").is_none());
        assert!(ImageData::from_data_uri("data:image/png,plain").is_none());
        assert!(ImageData::from_data_uri("data:image/png;base64,@@@").is_none());
    }
}
