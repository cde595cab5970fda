//! Generative vision model port.
//!
//! Defines the two logical operations the orchestrator needs from a remote
//! generative service: structured perspective text and perspective images.

use async_trait::async_trait;

use crate::domain::VisionDetails;
use crate::error::Result;

/// Credential and model selection for a single remote call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRequest {
    /// User-supplied key. `None` or blank falls back to the deployment default.
    pub api_key: Option<String>,
    /// Remote model identifier.
    pub model: String,
}

impl ModelRequest {
    #[must_use]
    pub fn new(api_key: Option<&str>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.map(ToOwned::to_owned),
            model: model.into(),
        }
    }
}

/// Client for a remote generative model that can describe and render
/// animal perspectives.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (`Send + Sync`); the orchestrator
/// drives two image requests concurrently against the same client.
///
/// # Errors
///
/// Transport and authentication failures propagate unchanged. Payload
/// problems surface as [`Error::EmptyResponse`](crate::error::Error::EmptyResponse),
/// [`Error::MalformedResponse`](crate::error::Error::MalformedResponse) or
/// [`Error::NoImageData`](crate::error::Error::NoImageData).
#[async_trait]
pub trait VisionModel: Send + Sync {
    /// Return the provider name for logging.
    fn name(&self) -> &'static str;

    /// Ask the text model how `name_a` sees `name_b` and vice versa.
    async fn fetch_vision_details(
        &self,
        name_a: &str,
        name_b: &str,
        request: &ModelRequest,
    ) -> Result<VisionDetails>;

    /// Render `prompt` and return the image as a `data:` URI.
    async fn fetch_perspective_image(&self, prompt: &str, request: &ModelRequest)
        -> Result<String>;
}
