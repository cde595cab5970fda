//! Gemini API client.
//!
//! Provides an implementation of the [`VisionModel`] trait for the Gemini
//! `generateContent` REST endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;

use super::dto::{
    Content, ErrorWrapper, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
};
use super::prompt;
use crate::domain::VisionDetails;
use crate::error::{Error, Result};
use crate::port::outbound::vision::{ModelRequest, VisionModel};

/// Gemini models endpoint root.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-goog-api-key";

const MISSING_KEY_MESSAGE: &str = "API Key is missing. Please provide one in settings.";

/// Gemini API client.
///
/// Holds an optional deployment default key that is used whenever a request
/// arrives without a key of its own.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    /// HTTP client for API requests.
    client: Client,
    /// Models endpoint root, without a trailing slash.
    base_url: String,
    /// Fallback key for requests that carry none.
    default_api_key: Option<String>,
}

impl GeminiClient {
    /// Create a client against `base_url` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(
        base_url: impl Into<String>,
        default_api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url, default_api_key))
    }

    /// Create a client around an existing `reqwest` client.
    #[must_use]
    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        default_api_key: Option<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let default_api_key = default_api_key.filter(|key| !key.trim().is_empty());
        Self {
            client,
            base_url,
            default_api_key,
        }
    }

    fn resolve_key<'a>(&'a self, request: &'a ModelRequest) -> Result<&'a str> {
        request
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .or(self.default_api_key.as_deref())
            .ok_or_else(|| Error::Auth(MISSING_KEY_MESSAGE.to_string()))
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/{}:generateContent", self.base_url, model.trim())
    }

    async fn generate(
        &self,
        request: &ModelRequest,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let api_key = self.resolve_key(request)?;
        let url = self.endpoint(&request.model);
        debug!(model = %request.model, "Sending Gemini generateContent request");

        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body_text = match response.text().await {
                Ok(text) => text,
                Err(e) => {
                    debug!(%status, error = %e, "Failed to read Gemini error body");
                    String::new()
                }
            };
            return Err(map_http_error(status, &body_text));
        }

        let body_text = response.text().await?;
        if body_text.trim().is_empty() {
            return Ok(GenerateContentResponse::default());
        }
        serde_json::from_str(&body_text).map_err(|e| Error::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl VisionModel for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn fetch_vision_details(
        &self,
        name_a: &str,
        name_b: &str,
        request: &ModelRequest,
    ) -> Result<VisionDetails> {
        if name_a.trim().is_empty() || name_b.trim().is_empty() {
            return Err(Error::Validation("animal names must not be empty".into()));
        }

        let body = GenerateContentRequest {
            contents: vec![Content::user(prompt::user_prompt(name_a, name_b))],
            system_instruction: Some(Content::system(prompt::SYSTEM_INSTRUCTION)),
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json",
                response_schema: prompt::response_schema(name_a, name_b),
            }),
        };

        let response = self.generate(request, &body).await?;
        let text = response.text().ok_or(Error::EmptyResponse)?;

        serde_json::from_str::<VisionDetails>(&text)
            .map_err(|e| Error::MalformedResponse(e.to_string()))
    }

    async fn fetch_perspective_image(
        &self,
        prompt: &str,
        request: &ModelRequest,
    ) -> Result<String> {
        if prompt.trim().is_empty() {
            return Err(Error::Validation("image prompt must not be empty".into()));
        }

        let body = GenerateContentRequest::user_text(prompt);
        let response = self.generate(request, &body).await?;
        response.first_image_uri().ok_or(Error::NoImageData)
    }
}

/// Translate a non-success response into a crate error, keeping the
/// service's own message when the body carries one.
fn map_http_error(status: StatusCode, body: &str) -> Error {
    let message = serde_json::from_str::<ErrorWrapper>(body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.to_string());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.trim().to_string());

    let rejected_key = message.contains("API key not valid") || message.contains("API_KEY_INVALID");
    if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) || rejected_key {
        return Error::Auth(message);
    }

    Error::Api {
        status: status.as_u16(),
        message,
    }
}
