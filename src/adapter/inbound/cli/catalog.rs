//! Animal and model catalog listings.

use serde_json::json;
use tabled::{Table, Tabled};

use super::output;
use crate::domain::{AppSettings, ModelKind, ANIMALS};
use crate::error::Result;

#[derive(Tabled)]
struct AnimalRow {
    #[tabled(rename = "Id")]
    id: &'static str,
    #[tabled(rename = "Animal")]
    label: String,
    #[tabled(rename = "Scientific name")]
    scientific_name: &'static str,
}

#[derive(Tabled)]
struct ModelRow {
    #[tabled(rename = "")]
    active: &'static str,
    #[tabled(rename = "Id")]
    id: &'static str,
    #[tabled(rename = "Name")]
    name: &'static str,
}

/// Execute `animals`.
pub fn animals() -> Result<()> {
    if output::is_json() {
        output::json_output(json!({
            "command": "animals",
            "animals": ANIMALS,
        }));
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }

    output::section("Animals");
    let rows = ANIMALS.iter().map(|animal| AnimalRow {
        id: animal.id,
        label: animal.label(),
        scientific_name: animal.scientific_name.unwrap_or("-"),
    });
    output::lines(&Table::new(rows).to_string());
    output::hint(&format!(
        "run {} to compare two of them",
        output::highlight("biovision simulate <A> <B>")
    ));
    Ok(())
}

/// Execute `models`, marking the models selected in `settings`.
pub fn models(settings: &AppSettings) -> Result<()> {
    if output::is_json() {
        output::json_output(json!({
            "command": "models",
            "text": ModelKind::Text.catalog(),
            "image": ModelKind::Image.catalog(),
            "selected": {
                "text": settings.text_model,
                "image": settings.image_model,
            },
        }));
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }

    for (kind, title) in [
        (ModelKind::Text, "Text models"),
        (ModelKind::Image, "Image models"),
    ] {
        output::section(title);
        let selected = settings.model(kind);
        let rows = kind.catalog().iter().map(|option| ModelRow {
            active: if option.id == selected { "*" } else { "" },
            id: option.id,
            name: option.name,
        });
        output::lines(&Table::new(rows).to_string());
    }
    output::hint(&format!(
        "change with {}",
        output::highlight("biovision settings set --text-model <ID> --image-model <ID>")
    ));
    Ok(())
}
