//! Configuration loading and service wiring.

pub mod bootstrap;
pub mod config;
