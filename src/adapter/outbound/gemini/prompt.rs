//! Prompt text and response schema for the perspective request.

use serde_json::{json, Value};

/// Persona and task description sent as the system instruction.
pub(super) const SYSTEM_INSTRUCTION: &str = "\
You are an expert in comparative ophthalmology, biology, and animal sensory systems.
Your task is to analyze the visual systems of two selected animals and describe how they would visually perceive each other.

Consider these factors:
1. Color Vision (Trichromatic, Dichromatic, Monochromatic, UV sensitivity, etc.)
2. Visual Acuity (Blurriness, sharpness, resolution)
3. Field of View & Depth Perception (Binocular overlap, panoramic vision)
4. Motion Sensitivity (Flicker fusion rate)
5. Special Features (Thermal sensing, night vision/tapetum lucidum, compound eyes/mosaic vision)

You must also generate a highly specific image generation prompt that can be used by an AI image generator to simulate this POV photorealistically.
The prompt should include camera effects to mimic the biology (e.g., \"apply gaussian blur\", \"shift hue to blue and yellow only\", \"fisheye lens distortion\", \"pixelated mosaic effect\").

The setting is a neutral natural environment.";

/// User prompt naming both animals.
pub(super) fn user_prompt(name_a: &str, name_b: &str) -> String {
    format!(
        "Animal A: {name_a}\n\
         Animal B: {name_b}\n\
         \n\
         Describe:\n\
         1. How Animal A sees Animal B.\n\
         2. How Animal B sees Animal A."
    )
}

/// Schema the text model must satisfy.
///
/// Both perspectives and all three of their fields are required.
pub(super) fn response_schema(name_a: &str, name_b: &str) -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "perspectiveA": perspective_schema(
                &format!("How {name_a} sees {name_b}"),
                true,
            ),
            "perspectiveB": perspective_schema(
                &format!("How {name_b} sees {name_a}"),
                false,
            ),
        },
        "required": ["perspectiveA", "perspectiveB"],
    })
}

fn perspective_schema(description: &str, annotate_fields: bool) -> Value {
    let mut description_field = json!({ "type": "STRING" });
    let mut features_field = json!({ "type": "ARRAY", "items": { "type": "STRING" } });
    let mut prompt_field = json!({ "type": "STRING" });

    if annotate_fields {
        description_field["description"] =
            json!("A paragraph explaining the scientific basis of the visual perception.");
        features_field["description"] =
            json!("Key bullet points, e.g., 'Dichromatic Vision', 'Low Acuity'");
        prompt_field["description"] = json!(
            "A detailed prompt for an image generator to simulate this specific view. Start with 'POV shot of...'"
        );
    }

    json!({
        "type": "OBJECT",
        "description": description,
        "properties": {
            "scientificDescription": description_field,
            "visualFeatures": features_field,
            "imagePrompt": prompt_field,
        },
        "required": ["scientificDescription", "visualFeatures", "imagePrompt"],
    })
}
