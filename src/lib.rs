//! BioVision - compare how two animals see each other.
//!
//! A user picks two animals; a generative text model describes how each one
//! perceives the other and writes an image prompt per perspective, then an
//! image model renders both prompts concurrently. Partial results are folded
//! into an observable state snapshot as each call resolves.
//!
//! # Architecture
//!
//! Hexagonal layout:
//!
//! - [`domain`] - Animal and model catalogs, perspectives, results, settings
//! - [`port`] - Interfaces the core depends on (`VisionModel`, `KeyValueStore`)
//! - [`adapter`] - Gemini REST client, file-backed storage, the CLI
//! - [`application`] - Settings service and the simulation orchestrator
//! - [`infrastructure`] - Configuration, logging, service wiring
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `testkit` - Export test doubles for integration tests
//! - `integration-tests` - Enable live API tests (needs `GEMINI_API_KEY`)
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use biovision::adapter::outbound::gemini::{GeminiClient, DEFAULT_BASE_URL};
//! use biovision::application::simulation::SimulationOrchestrator;
//! use biovision::domain::animal::find;
//! use biovision::domain::AppSettings;
//!
//! # async fn run() -> biovision::error::Result<()> {
//! let client = GeminiClient::new(DEFAULT_BASE_URL, std::env::var("GEMINI_API_KEY").ok(), Duration::from_secs(120))?;
//! let orchestrator = SimulationOrchestrator::new(Arc::new(client));
//! let (dog, fly) = (find("dog").unwrap(), find("fly").unwrap());
//! let result = orchestrator.run_simulation(&dog, &fly, &AppSettings::default()).await?;
//! println!("{}", result.perspective_a.scientific_description);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
