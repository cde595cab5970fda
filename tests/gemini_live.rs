//! Live runs against the Gemini API.
//!
//! Gated behind the `integration-tests` feature and `#[ignore]`:
//!
//! ```bash
//! export GEMINI_API_KEY="your-key"
//! cargo test --features integration-tests --test gemini_live -- --ignored --nocapture
//! ```
//!
//! Each run makes one text call and two image calls.
#![cfg(feature = "integration-tests")]

use std::sync::Arc;
use std::time::Duration;

use biovision::adapter::outbound::gemini::{GeminiClient, DEFAULT_BASE_URL};
use biovision::application::simulation::SimulationOrchestrator;
use biovision::domain::animal::{default_observer_a, default_observer_b};
use biovision::domain::AppSettings;

#[tokio::test]
#[ignore = "requires GEMINI_API_KEY and network access"]
async fn live_dog_and_fly_simulation() {
    let Ok(key) = std::env::var("GEMINI_API_KEY") else {
        eprintln!("Skipping: GEMINI_API_KEY not set");
        return;
    };
    let client = GeminiClient::new(DEFAULT_BASE_URL, Some(key), Duration::from_secs(180)).unwrap();
    let orchestrator = SimulationOrchestrator::new(Arc::new(client));

    let result = orchestrator
        .run_simulation(
            &default_observer_a(),
            &default_observer_b(),
            &AppSettings::default(),
        )
        .await
        .expect("simulation failed");

    assert!(!result.perspective_a.scientific_description.is_empty());
    assert!(!result.perspective_b.visual_features.is_empty());
    assert!(result.is_settled());
    eprintln!("unavailable images: {:?}", result.unavailable_sides());
}
