//! Application services: settings and simulation orchestration.

pub mod settings;
pub mod simulation;
