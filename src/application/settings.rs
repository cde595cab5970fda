//! Settings service.
//!
//! Holds the active [`AppSettings`] for the process. Constructed once at
//! startup from durable storage and handed to whoever needs it; `save` is
//! the only way to change it.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::domain::AppSettings;
use crate::error::Result;
use crate::port::outbound::storage::KeyValueStore;

/// Storage key of the settings record.
pub const SETTINGS_KEY: &str = "biovision_settings";

/// Durable credential and model preferences.
pub struct SettingsService {
    store: Arc<dyn KeyValueStore>,
    current: RwLock<AppSettings>,
}

impl SettingsService {
    /// Read settings from `store`, falling back to defaults when the record
    /// is missing, unreadable or corrupt. Never fails.
    #[must_use]
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let settings = read_persisted(store.as_ref());
        Self {
            store,
            current: RwLock::new(settings),
        }
    }

    /// Snapshot of the active settings.
    #[must_use]
    pub fn current(&self) -> AppSettings {
        self.current.read().clone()
    }

    /// Persist `settings` and make them active immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written; the active settings
    /// are left unchanged in that case.
    pub fn save(&self, settings: AppSettings) -> Result<()> {
        let json = serde_json::to_string(&settings)?;
        self.store.set(SETTINGS_KEY, &json)?;

        info!(
            text_model = %settings.text_model,
            image_model = %settings.image_model,
            api_key_set = settings.api_key().is_some(),
            "Settings saved"
        );
        *self.current.write() = settings;
        Ok(())
    }
}

fn read_persisted(store: &dyn KeyValueStore) -> AppSettings {
    let raw = match store.get(SETTINGS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("No saved settings, using defaults");
            return AppSettings::default();
        }
        Err(e) => {
            warn!(error = %e, "Failed to read settings, using defaults");
            return AppSettings::default();
        }
    };

    match serde_json::from_str::<AppSettings>(&raw) {
        Ok(settings) => settings,
        Err(e) => {
            warn!(error = %e, "Failed to parse settings, using defaults");
            AppSettings::default()
        }
    }
}
