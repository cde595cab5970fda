//! Command-line interface definitions.
//!
//! Defines the CLI structure for biovision using `clap`: run comparisons,
//! browse the animal and model catalogs, and manage saved settings and
//! configuration.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Compare how two animals see each other
#[derive(Parser, Debug)]
#[command(name = "biovision")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file [default: ~/.biovision/config.toml]
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Forced color setting, or `None` for terminal detection.
    #[must_use]
    pub const fn forced(self) -> Option<bool> {
        match self {
            Self::Auto => None,
            Self::Always => Some(true),
            Self::Never => Some(false),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare how two animals see each other
    Simulate(SimulateArgs),

    /// List the selectable animals
    Animals,

    /// List the selectable text and image models
    Models,

    /// Manage the saved API key and model choices
    #[command(subcommand)]
    Settings(SettingsCommand),

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Arguments for `biovision simulate`.
#[derive(Args, Debug, Default)]
pub struct SimulateArgs {
    /// First observer (id or name) [default: dog]
    pub animal_a: Option<String>,

    /// Second observer (id or name) [default: fly]
    pub animal_b: Option<String>,

    /// Text model for this run only
    #[arg(long, value_name = "ID")]
    pub text_model: Option<String>,

    /// Image model for this run only
    #[arg(long, value_name = "ID")]
    pub image_model: Option<String>,

    /// Write rendered images into this directory
    #[arg(long, value_name = "DIR")]
    pub save_images: Option<PathBuf>,

    /// Never offer to retry unavailable images
    #[arg(long)]
    pub no_prompt: bool,

    /// Retry unavailable images this many times without asking
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub retries: u8,
}

/// Subcommands for `biovision settings`.
#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    /// Show saved settings (the key is masked)
    Show,
    /// Change saved settings
    Set(SettingsSetArgs),
    /// Edit settings interactively
    Edit,
    /// Restore default settings
    Reset,
}

#[derive(Args, Debug, Default)]
pub struct SettingsSetArgs {
    /// API key to store (empty string clears it)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Text model id
    #[arg(long, value_name = "ID")]
    pub text_model: Option<String>,

    /// Image model id
    #[arg(long, value_name = "ID")]
    pub image_model: Option<String>,
}

/// Subcommands for `biovision config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display the effective configuration with defaults applied
    Show,
    /// Validate the configuration file
    Validate,
}
