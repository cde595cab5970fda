//! End-to-end runs through the Gemini adapter against a mock server.

use std::sync::Arc;
use std::time::Duration;

use biovision::adapter::outbound::gemini::GeminiClient;
use biovision::application::simulation::{RunPhase, SimulationOrchestrator};
use biovision::domain::{AppSettings, ImageState};
use biovision::testkit::domain::{animal, settings_with_key};
use httpmock::prelude::*;
use serde_json::json;

fn details_text() -> String {
    json!({
        "perspectiveA": {
            "scientificDescription": "Dichromatic vision renders the fly as a blur.",
            "visualFeatures": ["Dichromatic Vision"],
            "imagePrompt": "POV shot of a house fly"
        },
        "perspectiveB": {
            "scientificDescription": "Mosaic vision fragments the dog.",
            "visualFeatures": ["Compound Eyes"],
            "imagePrompt": "POV shot of a dog"
        }
    })
    .to_string()
}

fn orchestrator_for(server: &MockServer, default_key: Option<&str>) -> SimulationOrchestrator {
    let client = GeminiClient::new(
        server.base_url(),
        default_key.map(ToOwned::to_owned),
        Duration::from_secs(5),
    )
    .unwrap();
    SimulationOrchestrator::new(Arc::new(client))
}

#[tokio::test]
async fn full_run_uses_selected_models_and_user_key() {
    let server = MockServer::start_async().await;
    let text = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/gemini-3-pro-preview:generateContent")
                .header("x-goog-api-key", "user-key");
            then.status(200).json_body(json!({
                "candidates": [{ "content": { "parts": [{ "text": details_text() }] } }]
            }));
        })
        .await;
    let images = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/gemini-3-pro-image-preview:generateContent")
                .header("x-goog-api-key", "user-key");
            then.status(200).json_body(json!({
                "candidates": [{ "content": { "parts": [
                    { "inlineData": { "mimeType": "image/jpeg", "data": "/9j/" } }
                ] } }]
            }));
        })
        .await;

    let orchestrator = orchestrator_for(&server, Some("deployment-key"));
    let settings = AppSettings {
        api_key: "user-key".into(),
        text_model: "gemini-3-pro-preview".into(),
        image_model: "gemini-3-pro-image-preview".into(),
    };

    let result = orchestrator
        .run_simulation(&animal("dog"), &animal("fly"), &settings)
        .await
        .unwrap();

    text.assert_async().await;
    images.assert_calls_async(2).await;
    assert_eq!(
        result.perspective_a.image_uri(),
        Some("data:image/jpeg;base64,/9j/")
    );
    assert_eq!(result.perspective_b.visual_features, vec!["Compound Eyes"]);
}

#[tokio::test]
async fn image_without_inline_data_is_unavailable() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/gemini-2.5-flash:generateContent");
            then.status(200).json_body(json!({
                "candidates": [{ "content": { "parts": [{ "text": details_text() }] } }]
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/gemini-2.5-flash-image:generateContent");
            then.status(200).json_body(json!({
                "candidates": [{ "content": { "parts": [{ "text": "I cannot draw that." }] } }]
            }));
        })
        .await;

    let orchestrator = orchestrator_for(&server, None);
    let result = orchestrator
        .run_simulation(&animal("dog"), &animal("fly"), &settings_with_key("k"))
        .await
        .unwrap();

    for perspective in [&result.perspective_a, &result.perspective_b] {
        assert_eq!(
            perspective.image,
            ImageState::Unavailable {
                reason: "No image data found in response".into()
            }
        );
    }
    assert_eq!(orchestrator.snapshot().phase(), RunPhase::Result);
}

#[tokio::test]
async fn rejected_key_surfaces_service_message() {
    let server = MockServer::start_async().await;
    let images = server
        .mock_async(|when, then| {
            when.method(POST).path("/gemini-2.5-flash-image:generateContent");
            then.status(200);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/gemini-2.5-flash:generateContent");
            then.status(400).json_body(json!({
                "error": {
                    "code": 400,
                    "message": "API key not valid. Please pass a valid API key.",
                    "status": "INVALID_ARGUMENT"
                }
            }));
        })
        .await;

    let orchestrator = orchestrator_for(&server, None);
    let err = orchestrator
        .run_simulation(&animal("dog"), &animal("fly"), &settings_with_key("bad"))
        .await
        .unwrap_err();

    assert!(err.is_auth(), "got {err:?}");
    let state = orchestrator.snapshot();
    assert!(state.result.is_none());
    assert!(state
        .error
        .as_deref()
        .is_some_and(|m| m.contains("API key not valid")));
    images.assert_calls_async(0).await;
}
