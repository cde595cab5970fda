//! Infrastructure bootstrap helpers for service wiring.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::adapter::outbound::gemini::GeminiClient;
use crate::adapter::outbound::storage::FileStore;
use crate::application::settings::SettingsService;
use crate::application::simulation::SimulationOrchestrator;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::storage::KeyValueStore;
use crate::port::outbound::vision::VisionModel;

/// Services a command needs, wired from configuration.
pub struct Services {
    pub settings: SettingsService,
    pub orchestrator: SimulationOrchestrator,
}

/// Build the Gemini client from configuration.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be constructed.
pub fn build_vision_model(config: &Config) -> Result<Arc<dyn VisionModel>> {
    let client = GeminiClient::new(
        config.gemini.base_url.clone(),
        config.gemini.api_key.clone(),
        Duration::from_secs(config.gemini.timeout_secs),
    )?;
    info!(
        provider = client.name(),
        base_url = %config.gemini.base_url,
        default_key = config.gemini.api_key.is_some(),
        "Vision model client initialized"
    );
    Ok(Arc::new(client))
}

/// Open the settings record under `storage_dir`.
#[must_use]
pub fn build_settings(storage_dir: &Path) -> SettingsService {
    debug!(dir = %storage_dir.display(), "Opening settings store");
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(storage_dir));
    SettingsService::load(store)
}

/// Wire every service a simulation needs.
///
/// # Errors
///
/// Returns an error if the vision model client cannot be built.
pub fn build_services(config: &Config, storage_dir: &Path) -> Result<Services> {
    let model = build_vision_model(config)?;
    Ok(Services {
        settings: build_settings(storage_dir),
        orchestrator: SimulationOrchestrator::new(model),
    })
}
