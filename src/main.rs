use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error};

use biovision::adapter::inbound::cli::command::{Cli, Commands, ConfigCommand, SettingsCommand};
use biovision::adapter::inbound::cli::output::{self, OutputConfig};
use biovision::adapter::inbound::cli::{catalog, config, paths, settings, simulate};
use biovision::error::Result;
use biovision::infrastructure::bootstrap;
use biovision::infrastructure::config::settings::Config;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));
    output::set_color(cli.color.forced());

    let config_path = config::resolve_path(cli.config.as_deref());
    let config = match config::load(&config_path, cli.config.is_some()) {
        Ok(config) => config,
        Err(e) => {
            match config::diagnostic(&e, &config_path) {
                Some(diagnostic) if !output::is_json() => {
                    eprintln!("{:?}", miette::Report::new(diagnostic));
                }
                _ => output::error(&format!("{}: {e}", config_path.display())),
            }
            return ExitCode::FAILURE;
        }
    };

    config
        .logging
        .clone()
        .with_overrides(cli.verbose, cli.json)
        .init();
    debug!(path = %config_path.display(), "Configuration loaded");

    match dispatch(cli, &config, &config_path).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Command failed");
            output::error(&e.user_message());
            if e.is_auth() {
                output::hint("save a key with `biovision settings set --api-key <KEY>` or set GEMINI_API_KEY");
            }
            ExitCode::FAILURE
        }
    }
}

async fn dispatch(cli: Cli, config: &Config, config_path: &std::path::Path) -> Result<()> {
    let storage_dir = paths::storage_dir(config);

    match cli.command {
        Commands::Simulate(args) => {
            let services = bootstrap::build_services(config, &storage_dir)?;
            let current = services.settings.current();
            simulate::execute(&services.orchestrator, current, &args).await
        }
        Commands::Animals => catalog::animals(),
        Commands::Models => catalog::models(&bootstrap::build_settings(&storage_dir).current()),
        Commands::Settings(command) => {
            let service = bootstrap::build_settings(&storage_dir);
            match command {
                SettingsCommand::Show => settings::execute_show(&service, &storage_dir),
                SettingsCommand::Set(args) => settings::execute_set(&service, &args, &storage_dir),
                SettingsCommand::Edit => settings::execute_edit(&service, &storage_dir),
                SettingsCommand::Reset => settings::execute_reset(&service, &storage_dir),
            }
        }
        Commands::Config(ConfigCommand::Show) => config::execute_show(config, config_path),
        Commands::Config(ConfigCommand::Validate) => config::execute_validate(config, config_path),
    }
}
