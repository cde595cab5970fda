//! Handler for the `settings` command group.
//!
//! The CLI counterpart of a settings dialog: show, change, edit
//! interactively, or reset the saved key and model choices.

use std::io::IsTerminal;
use std::path::Path;

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Password, Select};
use serde_json::json;

use super::command::SettingsSetArgs;
use super::output;
use crate::application::settings::SettingsService;
use crate::domain::{AppSettings, ModelKind};
use crate::error::{ConfigError, Result};

/// Validate `id` against the catalog for `kind`.
pub fn select_model(kind: ModelKind, id: &str) -> Result<String> {
    kind.find(id)
        .map(|option| option.id.to_string())
        .ok_or_else(|| {
            ConfigError::UnknownModel {
                kind: kind.as_str(),
                id: id.to_string(),
            }
            .into()
        })
}

/// Apply optional model overrides to `settings`.
pub fn with_models(
    mut settings: AppSettings,
    text_model: Option<&str>,
    image_model: Option<&str>,
) -> Result<AppSettings> {
    if let Some(id) = text_model {
        settings.text_model = select_model(ModelKind::Text, id)?;
    }
    if let Some(id) = image_model {
        settings.image_model = select_model(ModelKind::Image, id)?;
    }
    Ok(settings)
}

fn model_label(kind: ModelKind, id: &str) -> String {
    match kind.find(id) {
        Some(option) => format!("{} {}", option.id, output::muted(option.name)),
        None => format!("{id} {}", output::muted("(not in catalog)")),
    }
}

fn render(settings: &AppSettings, storage_dir: &Path) {
    if output::is_json() {
        output::json_output(json!({
            "command": "settings.show",
            "apiKey": settings.masked_api_key(),
            "apiKeySet": settings.api_key().is_some(),
            "textModel": settings.text_model,
            "imageModel": settings.image_model,
            "storage": storage_dir.display().to_string(),
        }));
        return;
    }

    output::section("Settings");
    output::field("API key", settings.masked_api_key());
    output::field("Text model", model_label(ModelKind::Text, &settings.text_model));
    output::field(
        "Image model",
        model_label(ModelKind::Image, &settings.image_model),
    );
    output::field("Storage", storage_dir.display());
}

/// Execute `settings show`.
pub fn execute_show(service: &SettingsService, storage_dir: &Path) -> Result<()> {
    let settings = service.current();
    render(&settings, storage_dir);
    if settings.api_key().is_none() && !output::is_json() {
        output::hint("without a saved key the GEMINI_API_KEY environment variable is used");
    }
    Ok(())
}

/// Execute `settings set`.
pub fn execute_set(
    service: &SettingsService,
    args: &SettingsSetArgs,
    storage_dir: &Path,
) -> Result<()> {
    if args.api_key.is_none() && args.text_model.is_none() && args.image_model.is_none() {
        return Err(ConfigError::MissingField {
            field: "--api-key, --text-model or --image-model",
        }
        .into());
    }

    let mut settings = with_models(
        service.current(),
        args.text_model.as_deref(),
        args.image_model.as_deref(),
    )?;
    if let Some(key) = &args.api_key {
        settings.api_key = key.trim().to_string();
    }

    service.save(settings.clone())?;
    if !output::is_json() {
        output::success("Settings saved");
    }
    render(&settings, storage_dir);
    Ok(())
}

/// Execute `settings edit`.
pub fn execute_edit(service: &SettingsService, storage_dir: &Path) -> Result<()> {
    if output::is_json() || !std::io::stdin().is_terminal() {
        return Err(ConfigError::InvalidValue {
            field: "settings edit",
            reason: "needs an interactive terminal; use `biovision settings set`".to_string(),
        }
        .into());
    }

    let theme = ColorfulTheme::default();
    let mut settings = service.current();

    output::section("Settings");
    output::field("Current key", settings.masked_api_key());
    let key = Password::with_theme(&theme)
        .with_prompt("Gemini API key (leave empty to keep)")
        .allow_empty_password(true)
        .interact()?;
    if !key.trim().is_empty() {
        settings.api_key = key.trim().to_string();
    }

    for (kind, prompt) in [
        (ModelKind::Text, "Text model"),
        (ModelKind::Image, "Image model"),
    ] {
        let catalog = kind.catalog();
        let current = catalog
            .iter()
            .position(|option| option.id == settings.model(kind))
            .unwrap_or(0);
        let items: Vec<String> = catalog
            .iter()
            .map(|option| format!("{} ({})", option.name, option.id))
            .collect();
        let choice = Select::with_theme(&theme)
            .with_prompt(prompt)
            .items(items.as_slice())
            .default(current)
            .interact()?;
        let id = catalog[choice].id.to_string();
        match kind {
            ModelKind::Text => settings.text_model = id,
            ModelKind::Image => settings.image_model = id,
        }
    }

    service.save(settings.clone())?;
    output::success("Settings saved");
    render(&settings, storage_dir);
    Ok(())
}

/// Execute `settings reset`.
pub fn execute_reset(service: &SettingsService, storage_dir: &Path) -> Result<()> {
    let settings = AppSettings::default();
    service.save(settings.clone())?;
    if !output::is_json() {
        output::success("Settings reset to defaults");
    }
    render(&settings, storage_dir);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn select_model_accepts_catalog_ids() {
        assert_eq!(
            select_model(ModelKind::Image, " gemini-3-pro-image-preview ").unwrap(),
            "gemini-3-pro-image-preview"
        );
    }

    #[test]
    fn select_model_rejects_wrong_kind() {
        let err = select_model(ModelKind::Text, "gemini-2.5-flash-image").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::UnknownModel { kind: "text", .. })
        ));
    }

    #[test]
    fn with_models_keeps_unset_choices() {
        let settings = with_models(
            AppSettings::default(),
            Some("gemini-3-pro-preview"),
            None,
        )
        .unwrap();
        assert_eq!(settings.text_model, "gemini-3-pro-preview");
        assert_eq!(settings.image_model, "gemini-2.5-flash-image");
    }
}
