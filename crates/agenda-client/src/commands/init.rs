//! `agenda init`: write the default configuration.

use std::path::Path;

use tracing::info;

use crate::config::Config;
use crate::error::{ClientError, ClientResult};

/// Writes the default configuration to `path` and tells the user which
/// environment variable must hold the API key.
///
/// An existing file is only replaced when `force` is set.
pub fn init(path: &Path, force: bool) -> ClientResult<Config> {
    if path.exists() && !force {
        return Err(ClientError::AlreadyInitialized(path.to_path_buf()));
    }

    let config = Config::default();
    config.persist(path)?;
    info!("wrote default configuration to {}", path.display());

    println!("Created default configuration file at: {}", path.display());
    if let Some(provider) = config.selected_provider() {
        println!(
            "Set the {} environment variable to your {} API key.",
            provider.env_api_key, config.provider
        );
    }
    Ok(config)
}
