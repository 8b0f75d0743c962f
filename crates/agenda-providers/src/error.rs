//! Error types for calendar provider operations.
//!
//! This module defines the errors that can occur when building a provider
//! or fetching events from it.

use std::fmt;
use thiserror::Error;

/// The category of a provider error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderErrorCode {
    /// The API key environment variable is unset or empty.
    MissingCredential,
    /// The provider name is not in the configuration.
    UnknownProvider,
    /// The provider is configured but no implementation is registered.
    UnsupportedProvider,
    /// Provider configuration is present but unusable (bad URL, etc.).
    ConfigurationError,
    /// Network error - connection failed, timeout, DNS resolution, etc.
    NetworkError,
    /// The server answered with a non-success status.
    HttpStatus,
    /// The response body could not be decoded.
    InvalidResponse,
}

impl ProviderErrorCode {
    /// Returns true for failures of an outbound request.
    ///
    /// These abort the whole fetch; there is no partial result.
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            Self::NetworkError | Self::HttpStatus | Self::InvalidResponse
        )
    }

    /// Returns a stable name for this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingCredential => "missing_credential",
            Self::UnknownProvider => "unknown_provider",
            Self::UnsupportedProvider => "unsupported_provider",
            Self::ConfigurationError => "configuration_error",
            Self::NetworkError => "network_error",
            Self::HttpStatus => "http_status",
            Self::InvalidResponse => "invalid_response",
        }
    }
}

impl fmt::Display for ProviderErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error that occurred while building or using a calendar provider.
#[derive(Debug, Error)]
pub struct ProviderError {
    /// The error code categorizing this error.
    code: ProviderErrorCode,
    /// A human-readable message describing the error.
    message: String,
    /// The provider that generated this error (e.g., "morgen").
    provider: Option<String>,
    /// HTTP status for [`ProviderErrorCode::HttpStatus`].
    status: Option<u16>,
    /// The underlying cause of this error, if any.
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ProviderError {
    /// Creates a new provider error with the given code and message.
    pub fn new(code: ProviderErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider: None,
            status: None,
            source: None,
        }
    }

    /// Creates a missing credential error for the named variable.
    pub fn missing_credential(env_var: &str) -> Self {
        Self::new(
            ProviderErrorCode::MissingCredential,
            format!("API key not found in environment variable {}", env_var),
        )
    }

    /// Creates an unknown provider error.
    pub fn unknown_provider(name: &str) -> Self {
        Self::new(
            ProviderErrorCode::UnknownProvider,
            format!("provider {} not found in configuration", name),
        )
    }

    /// Creates an unsupported provider error.
    pub fn unsupported_provider(name: &str) -> Self {
        Self::new(
            ProviderErrorCode::UnsupportedProvider,
            format!("unsupported provider: {}", name),
        )
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::ConfigurationError, message)
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::NetworkError, message)
    }

    /// Creates a non-success status error carrying the response body.
    pub fn http_status(status: u16, body: &str) -> Self {
        let mut err = Self::new(
            ProviderErrorCode::HttpStatus,
            format!("API request failed with status {}: {}", status, body),
        );
        err.status = Some(status);
        err
    }

    /// Creates an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::InvalidResponse, message)
    }

    /// Sets the provider name for this error.
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Sets the source error for this error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error code.
    pub fn code(&self) -> ProviderErrorCode {
        self.code
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the provider name, if set.
    pub fn provider(&self) -> Option<&str> {
        self.provider.as_deref()
    }

    /// Returns the HTTP status, if the server answered.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Returns true if an outbound request failed.
    pub fn is_request_error(&self) -> bool {
        self.code.is_request_error()
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref provider) = self.provider {
            write!(f, "[{}] ", provider)?;
        }
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// A specialized Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_error_codes() {
        assert!(ProviderErrorCode::NetworkError.is_request_error());
        assert!(ProviderErrorCode::HttpStatus.is_request_error());
        assert!(ProviderErrorCode::InvalidResponse.is_request_error());
        assert!(!ProviderErrorCode::MissingCredential.is_request_error());
        assert!(!ProviderErrorCode::UnknownProvider.is_request_error());
        assert!(!ProviderErrorCode::UnsupportedProvider.is_request_error());
    }

    #[test]
    fn error_code_display() {
        assert_eq!(
            ProviderErrorCode::MissingCredential.as_str(),
            "missing_credential"
        );
        assert_eq!(ProviderErrorCode::HttpStatus.to_string(), "http_status");
    }

    #[test]
    fn missing_credential_names_variable() {
        let err = ProviderError::missing_credential("MORGEN_API_KEY");
        assert_eq!(err.code(), ProviderErrorCode::MissingCredential);
        assert!(err.message().contains("MORGEN_API_KEY"));
        assert!(err.provider().is_none());
    }

    #[test]
    fn http_status_keeps_status_and_body() {
        let err = ProviderError::http_status(500, "boom").with_provider("morgen");
        assert_eq!(err.status(), Some(500));
        assert!(err.is_request_error());

        let display = err.to_string();
        assert!(display.contains("[morgen]"));
        assert!(display.contains("http_status"));
        assert!(display.contains("500"));
        assert!(display.contains("boom"));
    }

    #[test]
    fn factory_errors() {
        assert_eq!(
            ProviderError::unknown_provider("gcal").to_string(),
            "unknown_provider: provider gcal not found in configuration"
        );
        assert_eq!(
            ProviderError::unsupported_provider("gcal").to_string(),
            "unsupported_provider: unsupported provider: gcal"
        );
    }

    #[test]
    fn provider_error_with_source() {
        use std::error::Error;
        let io_err = std::io::Error::other("connection reset");
        let err = ProviderError::network("request failed").with_source(io_err);
        assert!(err.source().is_some());
    }
}
