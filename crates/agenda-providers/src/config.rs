//! Per-provider connection settings.
//!
//! A [`ProviderConfig`] is one entry of the `[providers]` table in the
//! configuration file. Header values may contain [`API_KEY_PLACEHOLDER`],
//! which is replaced with the key read from `env_api_key` at request time.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ProviderError, ProviderResult};

/// Token replaced by the resolved API key in header values.
pub const API_KEY_PLACEHOLDER: &str = "{API_KEY}";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Base URL of the Morgen v3 API.
pub const MORGEN_BASE_URL: &str = "https://api.morgen.so/v3";

/// Environment variable holding the Morgen API key.
pub const MORGEN_API_KEY_ENV: &str = "MORGEN_API_KEY";

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Connection settings for one calendar provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API base URL, without trailing slash.
    pub base_url: String,

    /// Name of the environment variable that holds the API key.
    pub env_api_key: String,

    /// Calendar names excluded from aggregation.
    #[serde(default)]
    pub calendars_to_ignore: Vec<String>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Header templates sent with every request.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl ProviderConfig {
    /// Creates a config with no headers and the default timeout.
    pub fn new(base_url: impl Into<String>, env_api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            env_api_key: env_api_key.into(),
            calendars_to_ignore: Vec::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            headers: BTreeMap::new(),
        }
    }

    /// The built-in Morgen entry.
    pub fn morgen_default() -> Self {
        Self::new(MORGEN_BASE_URL, MORGEN_API_KEY_ENV)
            .with_header("Authorization", format!("ApiKey {}", API_KEY_PLACEHOLDER))
            .with_header("Content-Type", "application/json")
    }

    /// Builder method to add a header template.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Builder method to set the ignore list.
    pub fn with_calendars_to_ignore(mut self, names: Vec<String>) -> Self {
        self.calendars_to_ignore = names;
        self
    }

    /// Builder method to set the request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Returns the request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns true if the calendar name is on the ignore list.
    pub fn is_ignored(&self, calendar_name: &str) -> bool {
        self.calendars_to_ignore.iter().any(|n| n == calendar_name)
    }

    /// Reads the API key from the configured environment variable.
    ///
    /// # Errors
    ///
    /// Returns a `MissingCredential` error if the variable is unset or empty.
    pub fn api_key(&self) -> ProviderResult<String> {
        match std::env::var(&self.env_api_key) {
            Ok(key) if !key.is_empty() => Ok(key),
            _ => Err(ProviderError::missing_credential(&self.env_api_key)),
        }
    }

    /// Returns the headers with the placeholder replaced by `api_key`.
    pub fn resolve_headers(&self, api_key: &str) -> BTreeMap<String, String> {
        self.headers
            .iter()
            .map(|(name, value)| (name.clone(), value.replace(API_KEY_PLACEHOLDER, api_key)))
            .collect()
    }

    /// Joins `path` onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Checks that the entry is usable.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` if `base_url` is not an absolute http(s)
    /// URL or `env_api_key` is empty.
    pub fn validate(&self) -> ProviderResult<()> {
        let url = Url::parse(&self.base_url).map_err(|e| {
            ProviderError::configuration(format!("invalid base_url {:?}: {}", self.base_url, e))
                .with_source(e)
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ProviderError::configuration(format!(
                "base_url must use http or https, got {:?}",
                url.scheme()
            )));
        }
        if self.env_api_key.trim().is_empty() {
            return Err(ProviderError::configuration("env_api_key is required"));
        }
        Ok(())
    }
}
