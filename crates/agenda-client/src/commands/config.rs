//! Configuration commands.

use std::path::Path;

use agenda_core::EventFormatter;
use agenda_providers::{ProviderError, available_providers};

use crate::config::Config;
use crate::error::ClientResult;

/// Dump the effective configuration (overrides applied) to stdout.
pub fn dump(config: &Config, path: &Path) -> ClientResult<()> {
    println!("# config.toml ({})", path.display());
    println!("{}", config.to_toml()?);
    Ok(())
}

/// Validate the configuration without contacting the provider.
pub fn validate(config: &Config) -> ClientResult<()> {
    check(config)?;
    println!("Configuration is valid.");
    Ok(())
}

/// Checks the template, the time format and the selected provider entry.
pub fn check(config: &Config) -> ClientResult<()> {
    EventFormatter::new(&config.time_format, &config.event_template)?;

    let provider = config
        .selected_provider()
        .ok_or_else(|| ProviderError::unknown_provider(&config.provider))?;
    provider
        .validate()
        .map_err(|e| e.with_provider(&config.provider))?;

    if !available_providers()
        .iter()
        .any(|name| *name == config.provider)
    {
        return Err(ProviderError::unsupported_provider(&config.provider).into());
    }
    Ok(())
}

/// Show the configuration file path.
pub fn path(path: &Path) -> ClientResult<()> {
    println!("config: {}", path.display());
    Ok(())
}
