//! Client error types.

use std::path::PathBuf;

use agenda_core::FormatError;
use agenda_providers::ProviderError;
use thiserror::Error;

use crate::config::ConfigError;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
///
/// Every variant is fatal for the current command; `main` prints it and
/// exits non-zero.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration file error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Provider construction or fetch error.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Invalid template or time format.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// `init` found an existing file and `--force` was not given.
    #[error("configuration file already exists at {}; pass --force to overwrite", .0.display())]
    AlreadyInitialized(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_errors_display_verbatim() {
        let err: ClientError = ProviderError::missing_credential("MORGEN_API_KEY").into();
        assert_eq!(
            err.to_string(),
            "missing_credential: API key not found in environment variable MORGEN_API_KEY"
        );

        let err: ClientError = FormatError::template_parse("unclosed placeholder").into();
        assert_eq!(
            err.to_string(),
            "failed to parse event template: unclosed placeholder"
        );
    }

    #[test]
    fn already_initialized_mentions_force() {
        let err = ClientError::AlreadyInitialized(PathBuf::from("/tmp/agenda/config.toml"));
        let msg = err.to_string();
        assert!(msg.contains("/tmp/agenda/config.toml"));
        assert!(msg.contains("--force"));
    }
}
