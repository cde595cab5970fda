//! Handler for `biovision simulate`.
//!
//! Streams run progress from the orchestrator's state channel, offers a
//! manual retry for images that came back unavailable, then renders one
//! card per perspective.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use chrono::Utc;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;
use indicatif::ProgressBar;
use serde_json::json;
use tracing::debug;

use super::command::SimulateArgs;
use super::{output, settings as settings_cli};
use crate::application::simulation::{SimulationOrchestrator, SimulationState};
use crate::domain::animal::{default_observer_a, default_observer_b, find};
use crate::domain::{Animal, AppSettings, ImageData, ImageState, Side, SimulationResult};
use crate::error::{ConfigError, Result};

/// Resolve an animal argument, falling back to `default`.
pub fn resolve_animal(arg: Option<&str>, default: Animal) -> Result<Animal> {
    match arg {
        None => Ok(default),
        Some(query) => find(query).ok_or_else(|| ConfigError::UnknownAnimal(query.to_string()).into()),
    }
}

/// Prints each state change once: text ready, then each image as it settles.
struct ProgressReporter {
    spinner: ProgressBar,
    text_reported: bool,
    images_reported: [bool; 2],
}

impl ProgressReporter {
    fn new(a: Animal, b: Animal) -> Self {
        Self {
            spinner: output::spinner(&format!(
                "Analyzing how the {} and the {} see each other...",
                a.name, b.name
            )),
            text_reported: false,
            images_reported: [false; 2],
        }
    }

    fn observe(&mut self, state: &SimulationState) {
        let Some(result) = state.result.as_ref() else {
            return;
        };

        if !self.text_reported {
            self.text_reported = true;
            self.spinner.suspend(|| {
                output::event("text", "Perspective descriptions ready");
            });
            self.spinner.set_message("Rendering both perspectives...");
        }

        for side in Side::BOTH {
            let index = side_index(side);
            let perspective = result.perspective(side);
            if self.images_reported[index] || perspective.is_loading() {
                continue;
            }
            self.images_reported[index] = true;
            let label = format!("image {side}");
            let message = match &perspective.image {
                ImageState::Ready { .. } => format!(
                    "{} view of the {} ready",
                    result.observer(side).name,
                    result.subject(side).name
                ),
                ImageState::Unavailable { reason } => format!(
                    "{} view unavailable: {reason}",
                    result.observer(side).name
                ),
                ImageState::Loading => continue,
            };
            self.spinner.suspend(|| output::event(&label, &message));
        }
    }

    fn finish(&self, ok: bool) {
        if ok {
            output::spinner_success(&self.spinner, "Simulation complete");
        } else {
            output::spinner_fail(&self.spinner, "Simulation failed");
        }
    }
}

const fn side_index(side: Side) -> usize {
    match side {
        Side::A => 0,
        Side::B => 1,
    }
}

/// Run `orchestrator` while reporting every published state change.
async fn run_with_progress(
    orchestrator: &SimulationOrchestrator,
    a: Animal,
    b: Animal,
    settings: &AppSettings,
) -> Result<SimulationResult> {
    let mut rx = orchestrator.subscribe();
    let mut reporter = ProgressReporter::new(a, b);

    let run = orchestrator.run_simulation(&a, &b, settings);
    tokio::pin!(run);

    let outcome = loop {
        tokio::select! {
            outcome = &mut run => break outcome,
            changed = rx.changed() => {
                if changed.is_err() {
                    break (&mut run).await;
                }
                let state = rx.borrow_and_update().clone();
                reporter.observe(&state);
            }
        }
    };

    reporter.observe(&orchestrator.snapshot());
    reporter.finish(outcome.is_ok());
    outcome
}

fn interactive(args: &SimulateArgs) -> bool {
    !args.no_prompt
        && !output::is_json()
        && std::io::stdin().is_terminal()
        && std::io::stdout().is_terminal()
}

/// Retry each unavailable image: up to `args.retries` times without
/// asking, then interactively while the user accepts. Sides are handled
/// independently, so declining one still offers the other.
async fn retry_unavailable(
    orchestrator: &SimulationOrchestrator,
    settings: &AppSettings,
    args: &SimulateArgs,
    mut result: SimulationResult,
) -> Result<SimulationResult> {
    let theme = ColorfulTheme::default();

    for side in Side::BOTH {
        let mut automatic = args.retries;
        while matches!(result.perspective(side).image, ImageState::Unavailable { .. }) {
            let observer = result.observer(side);
            if automatic > 0 {
                automatic -= 1;
            } else if !interactive(args) {
                break;
            } else {
                let again = Confirm::with_theme(&theme)
                    .with_prompt(format!("Try again for the {} view?", observer.name))
                    .default(true)
                    .interact()?;
                if !again {
                    break;
                }
            }

            let spinner =
                output::spinner(&format!("Rendering the {} view again...", observer.name));
            result = orchestrator.retry_image(side, settings).await?;
            match &result.perspective(side).image {
                ImageState::Ready { .. } => output::spinner_success(&spinner, "Image ready"),
                ImageState::Unavailable { reason } => {
                    output::spinner_fail(&spinner, &format!("Still unavailable: {reason}"));
                }
                ImageState::Loading => spinner.finish_and_clear(),
            }
        }
    }
    Ok(result)
}

/// File name for the image of `side`.
fn image_file_name(result: &SimulationResult, side: Side, image: &ImageData) -> String {
    format!(
        "{}-sees-{}.{}",
        result.observer(side).id,
        result.subject(side).id,
        image.extension()
    )
}

/// Decode every ready image and write it under `dir`. Returns the written paths.
pub fn save_images(result: &SimulationResult, dir: &Path) -> Result<Vec<(Side, PathBuf)>> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::new();
    for side in Side::BOTH {
        let Some(uri) = result.perspective(side).image_uri() else {
            continue;
        };
        let Some(image) = ImageData::from_data_uri(uri) else {
            output::warning(&format!("image {side} is not a decodable data URI"));
            continue;
        };
        let path = dir.join(image_file_name(result, side, &image));
        std::fs::write(&path, &image.bytes)?;
        debug!(%side, path = %path.display(), bytes = image.bytes.len(), "Saved image");
        written.push((side, path));
    }
    Ok(written)
}

fn render_card(result: &SimulationResult, side: Side, saved: Option<&Path>) {
    let observer = result.observer(side);
    let subject = result.subject(side);
    let perspective = result.perspective(side);

    output::section(&format!(
        "{} {} looking at the {}",
        observer.emoji, observer.name, subject.name
    ));
    if let Some(scientific) = observer.scientific_name {
        output::note(scientific);
    }
    output::lines(&perspective.scientific_description);
    if !perspective.visual_features.is_empty() {
        output::field("Features", perspective.visual_features.join(" · "));
    }
    match (&perspective.image, saved) {
        (ImageState::Ready { .. }, Some(path)) => output::field("Image", path.display()),
        (ImageState::Ready { .. }, None) => output::field(
            "Image",
            format!("ready {}", output::muted("(use --save-images DIR to write it)")),
        ),
        (ImageState::Unavailable { reason }, _) => {
            output::warning(&format!("Image unavailable: {reason}"));
        }
        (ImageState::Loading, _) => output::field("Image", "loading"),
    }
    if output::verbosity() > 0 {
        output::field("Prompt", output::muted(&perspective.image_prompt));
    }
}

/// Execute `simulate`.
pub async fn execute(
    orchestrator: &SimulationOrchestrator,
    saved_settings: AppSettings,
    args: &SimulateArgs,
) -> Result<()> {
    let a = resolve_animal(args.animal_a.as_deref(), default_observer_a())?;
    let b = resolve_animal(args.animal_b.as_deref(), default_observer_b())?;
    let settings = settings_cli::with_models(
        saved_settings,
        args.text_model.as_deref(),
        args.image_model.as_deref(),
    )?;

    output::header(env!("CARGO_PKG_VERSION"));
    if !output::is_json() {
        output::field("Observer A", a.label());
        output::field("Observer B", b.label());
        output::field("Models", format!("{} / {}", settings.text_model, settings.image_model));
    }

    let started_at = Utc::now();
    let result = run_with_progress(orchestrator, a, b, &settings).await?;
    let result = retry_unavailable(orchestrator, &settings, args, result).await?;
    let elapsed = Utc::now() - started_at;

    let saved = match &args.save_images {
        Some(dir) => save_images(&result, dir)?,
        None => Vec::new(),
    };

    if output::is_json() {
        output::json_output(json!({
            "command": "simulate",
            "startedAt": started_at.to_rfc3339(),
            "elapsedMs": elapsed.num_milliseconds(),
            "result": result,
            "saved": saved
                .iter()
                .map(|(side, path)| json!({ "side": side, "path": path.display().to_string() }))
                .collect::<Vec<_>>(),
        }));
        return Ok(());
    }

    for side in Side::BOTH {
        let path = saved
            .iter()
            .find(|(saved_side, _)| *saved_side == side)
            .map(|(_, path)| path.as_path());
        render_card(&result, side, path);
    }

    output::note(&format!(
        "finished in {:.1}s",
        elapsed.num_milliseconds() as f64 / 1000.0
    ));
    if !result.unavailable_sides().is_empty() {
        output::hint("run again or pass --retries N to retry unavailable images");
    }
    Ok(())
}
