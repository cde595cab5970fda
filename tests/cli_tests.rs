use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;
use serde_json::json;

/// Temporary home for one CLI invocation: a config file pointing storage
/// (and optionally the Gemini endpoint) into a temp directory.
struct Sandbox {
    dir: tempfile::TempDir,
    config: PathBuf,
}

impl Sandbox {
    fn new(base_url: Option<&str>) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = dir.path().join("config.toml");
        let mut contents = format!("[storage]\ndir = {:?}\n", dir.path().join("store"));
        if let Some(url) = base_url {
            contents.push_str(&format!("\n[gemini]\nbase_url = {url:?}\ntimeout_secs = 5\n"));
        }
        fs::write(&config, contents).expect("write config");
        Self { dir, config }
    }

    fn store(&self) -> PathBuf {
        self.dir.path().join("store")
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("biovision").expect("binary");
        cmd.arg("--config")
            .arg(&self.config)
            .arg("--color")
            .arg("never")
            .env_remove("GEMINI_API_KEY")
            .env_remove("API_KEY")
            .env_remove("RUST_LOG");
        cmd
    }
}

fn json_lines(stdout: &[u8]) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(stdout)
        .lines()
        .filter_map(|line| serde_json::from_str(line).ok())
        .collect()
}

#[test]
fn animals_lists_catalog() {
    let sandbox = Sandbox::new(None);
    sandbox
        .cmd()
        .arg("animals")
        .assert()
        .success()
        .stdout(predicate::str::contains("House Fly"))
        .stdout(predicate::str::contains("Musca domestica"));
}

#[test]
fn animals_json_is_machine_readable() {
    let sandbox = Sandbox::new(None);
    let output = sandbox.cmd().args(["--json", "animals"]).output().unwrap();
    assert!(output.status.success());

    let lines = json_lines(&output.stdout);
    let animals = lines
        .iter()
        .find(|v| v["command"] == "animals")
        .expect("animals payload");
    assert_eq!(animals["animals"].as_array().unwrap().len(), 12);
    assert_eq!(animals["animals"][1]["id"], "dog");
}

#[test]
fn models_marks_default_selection() {
    let sandbox = Sandbox::new(None);
    let output = sandbox.cmd().args(["--json", "models"]).output().unwrap();
    assert!(output.status.success());

    let lines = json_lines(&output.stdout);
    let models = lines.iter().find(|v| v["command"] == "models").unwrap();
    assert_eq!(models["selected"]["text"], "gemini-2.5-flash");
    assert_eq!(models["selected"]["image"], "gemini-2.5-flash-image");
}

#[test]
fn settings_set_persists_and_masks_key() {
    let sandbox = Sandbox::new(None);
    sandbox
        .cmd()
        .args([
            "settings",
            "set",
            "--api-key",
            "AIzaSyTestKey9876",
            "--text-model",
            "gemini-3-pro-preview",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings saved"));

    assert!(sandbox.store().join("biovision_settings.json").exists());

    sandbox
        .cmd()
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("9876"))
        .stdout(predicate::str::contains("AIzaSyTestKey9876").not())
        .stdout(predicate::str::contains("gemini-3-pro-preview"));
}

#[test]
fn settings_set_rejects_unknown_model() {
    let sandbox = Sandbox::new(None);
    sandbox
        .cmd()
        .args(["settings", "set", "--image-model", "dall-e-3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown image model 'dall-e-3'"));

    assert!(!sandbox.store().join("biovision_settings.json").exists());
}

#[test]
fn settings_reset_restores_defaults() {
    let sandbox = Sandbox::new(None);
    sandbox
        .cmd()
        .args(["settings", "set", "--api-key", "secret-1234"])
        .assert()
        .success();
    sandbox.cmd().args(["settings", "reset"]).assert().success();

    let output = sandbox.cmd().args(["--json", "settings", "show"]).output().unwrap();
    let lines = json_lines(&output.stdout);
    let shown = lines
        .iter()
        .find(|v| v["command"] == "settings.show")
        .unwrap();
    assert_eq!(shown["apiKeySet"], false);
    assert_eq!(shown["textModel"], "gemini-2.5-flash");
}

#[test]
fn simulate_rejects_same_animal_twice() {
    let sandbox = Sandbox::new(Some("http://127.0.0.1:9/v1beta/models"));
    sandbox
        .cmd()
        .args(["simulate", "dog", "Dog", "--no-prompt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Please select two different animals for comparison.",
        ));
}

#[test]
fn simulate_rejects_unknown_animal() {
    let sandbox = Sandbox::new(None);
    sandbox
        .cmd()
        .args(["simulate", "dog", "unicorn"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown animal 'unicorn'"));
}

#[test]
fn simulate_without_any_key_reports_missing_key() {
    let sandbox = Sandbox::new(Some("http://127.0.0.1:9/v1beta/models"));
    sandbox
        .cmd()
        .args(["simulate", "--no-prompt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("API Key is missing"));
}

fn mock_gemini(server: &MockServer) {
    let details = json!({
        "perspectiveA": {
            "scientificDescription": "Dichromatic vision renders the fly as a blur.",
            "visualFeatures": ["Dichromatic Vision", "Low Acuity"],
            "imagePrompt": "POV shot of a house fly"
        },
        "perspectiveB": {
            "scientificDescription": "Mosaic vision fragments the dog.",
            "visualFeatures": ["Compound Eyes"],
            "imagePrompt": "POV shot of a dog, mosaic"
        }
    });
    server.mock(|when, then| {
        when.method(POST).path("/gemini-2.5-flash:generateContent");
        then.status(200).json_body(json!({
            "candidates": [{ "content": { "parts": [{ "text": details.to_string() }] } }]
        }));
    });
    server.mock(|when, then| {
        when.method(POST).path("/gemini-2.5-flash-image:generateContent");
        then.status(200).json_body(json!({
            "candidates": [{ "content": { "parts": [
                { "inlineData": { "mimeType": "image/png", "data": "aGVsbG8=" } }
            ] } }]
        }));
    });
}

fn saved_image(dir: &Path, name: &str) -> Vec<u8> {
    fs::read(dir.join(name)).unwrap_or_default()
}

#[test]
fn simulate_renders_cards_and_saves_images() {
    let server = MockServer::start();
    mock_gemini(&server);
    let sandbox = Sandbox::new(Some(&server.base_url()));
    let images = sandbox.dir.path().join("images");

    sandbox
        .cmd()
        .env("GEMINI_API_KEY", "env-key")
        .args(["simulate", "dog", "fly", "--no-prompt", "--save-images"])
        .arg(&images)
        .assert()
        .success()
        .stdout(predicate::str::contains("Dichromatic vision"))
        .stdout(predicate::str::contains("Mosaic vision"));

    assert_eq!(saved_image(&images, "dog-sees-fly.png"), b"hello");
    assert_eq!(saved_image(&images, "fly-sees-dog.png"), b"hello");
}

#[test]
fn simulate_json_emits_result() {
    let server = MockServer::start();
    mock_gemini(&server);
    let sandbox = Sandbox::new(Some(&server.base_url()));

    let output = sandbox
        .cmd()
        .env("GEMINI_API_KEY", "env-key")
        .args(["--json", "simulate"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let lines = json_lines(&output.stdout);
    let done = lines.iter().find(|v| v["command"] == "simulate").unwrap();
    assert!(done["elapsedMs"].as_i64().is_some_and(|ms| ms >= 0));
    assert!(done["startedAt"].as_str().is_some());
    assert_eq!(done["result"]["animalA"]["id"], "dog");
    assert_eq!(done["result"]["animalB"]["id"], "fly");
    assert_eq!(done["result"]["perspectiveA"]["image"]["status"], "ready");
    assert_eq!(
        done["result"]["perspectiveB"]["image"]["uri"],
        "data:image/png;base64,aGVsbG8="
    );
}

#[test]
fn config_validate_reports_invalid_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[gemini]\ntimeout_secs = 0\n").unwrap();

    Command::cargo_bin("biovision")
        .unwrap()
        .args(["config", "validate", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("timeout_secs"));
}

#[test]
fn config_syntax_error_points_at_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[gemini\nbase_url = 1\n").unwrap();

    Command::cargo_bin("biovision")
        .unwrap()
        .args(["--color", "never", "config", "show", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("biovision::config"));
}

#[test]
fn config_show_prints_effective_values() {
    let sandbox = Sandbox::new(None);
    sandbox
        .cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("timeout_secs = 120"));
}
