//! Simulation run lifecycle.
//!
//! - [`event`]: Run tokens and the events a run emits.
//! - [`state`]: Observable state and the reducer folding events into it.
//! - [`orchestrator`]: Drives the text call and the concurrent image calls.

pub mod event;
pub mod orchestrator;
pub mod state;

pub use event::{RunEvent, RunEventKind, RunToken};
pub use orchestrator::{SimulationOrchestrator, SAME_ANIMAL_MESSAGE};
pub use state::{RunPhase, SimulationState};
