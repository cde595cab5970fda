//! Builders for domain values used across tests.

use crate::domain::animal::find;
use crate::domain::{Animal, AppSettings, PerspectiveDetails, VisionDetails};

/// Look up a catalog animal by id.
///
/// # Panics
///
/// Panics if `id` is not in the catalog.
pub fn animal(id: &str) -> Animal {
    find(id).unwrap_or_else(|| panic!("unknown test animal '{id}'"))
}

/// Build one perspective with a derived image prompt.
pub fn perspective(description: &str, features: &[&str]) -> PerspectiveDetails {
    PerspectiveDetails {
        scientific_description: description.to_string(),
        visual_features: features.iter().map(|f| (*f).to_string()).collect(),
        image_prompt: format!("First-person view. {description}"),
    }
}

/// Dog looking at a fly, and the fly looking back.
pub fn dog_fly_details() -> VisionDetails {
    VisionDetails {
        perspective_a: perspective(
            "Dichromatic vision renders the fly as a small blue-grey speck; \
             motion is detected well but fine detail is soft.",
            &[
                "Blue-yellow colour range",
                "Reduced acuity",
                "Wide peripheral field",
            ],
        ),
        perspective_b: perspective(
            "Mosaic vision from thousands of ommatidia breaks the dog into a \
             pixelated, ultraviolet-tinted mass with a flicker fusion rate far \
             above a mammal's.",
            &[
                "Compound-eye mosaic",
                "Ultraviolet sensitivity",
                "Near-360 degree field",
            ],
        ),
    }
}

/// Settings with `key` and default models.
pub fn settings_with_key(key: &str) -> AppSettings {
    AppSettings {
        api_key: key.to_string(),
        ..AppSettings::default()
    }
}
