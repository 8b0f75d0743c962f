//! agenda CLI entry point.

use std::path::Path;
use std::process::ExitCode;

use agenda_core::{TracingConfig, init_tracing};
use clap::Parser;
use tracing::info;

use agenda_client::cli::{Cli, Command, ConfigAction};
use agenda_client::commands;
use agenda_client::config::Config;
use agenda_client::error::ClientResult;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let tracing_config = if cli.verbose {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::default()
    };
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("warning: {}", e);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ClientResult<()> {
    let path = cli.config_path();

    match cli.command {
        Some(Command::Init { force }) => commands::init::init(&path, force).map(|_| ()),
        Some(Command::Config {
            action: ConfigAction::Path,
        }) => commands::config::path(&path),
        Some(Command::Config {
            action: ConfigAction::Dump,
        }) => commands::config::dump(&load(&cli, &path)?, &path),
        Some(Command::Config {
            action: ConfigAction::Validate,
        }) => commands::config::validate(&load(&cli, &path)?),
        Some(Command::Calendars) => commands::calendars::list(&load(&cli, &path)?).await,
        None => commands::run::run(&load(&cli, &path)?, cli.date).await,
    }
}

/// Loads (or creates) the config file and applies command-line overrides.
fn load(cli: &Cli, path: &Path) -> ClientResult<Config> {
    let mut config = Config::load_or_initialize(path)?;
    config.apply_overrides(&cli.overrides());
    info!("using config {}", path.display());
    Ok(config)
}
