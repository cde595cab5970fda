//! CLI module graph.

pub mod catalog;
pub mod command;
pub mod config;
pub mod diagnostic;
pub mod output;
pub mod paths;
pub mod settings;
pub mod simulate;
